//! Prints what the sanitizer does to common attack payloads.

use tracing_subscriber::EnvFilter;
use zemon_content::sanitizer::Sanitizer;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let payloads = [
        "<p>Before script</p><script>alert('xss')</script><p>After script</p>",
        "<img src=x onerror=alert(1)>",
        "<a href=\"java&#x09;script:alert(1)\">link</a>",
        "<iframe srcdoc=\"<script>alert(1)</script>\" src=\"https://player.example/embed\"></iframe>",
        "<svg onload=alert(1)><circle r=1></circle></svg>",
        "<math><mtext><table><mglyph><style><img src=x onerror=alert(1)>",
        "<noscript><p title=\"</noscript><img src=x onerror=alert(1)>\"></p></noscript>",
        "<div style=\"background:url('javascript:alert(1)')\">styled</div>",
    ];

    let sanitizer = Sanitizer::new();
    for payload in payloads {
        let result = sanitizer.sanitize_with_report(payload);
        println!("input:  {payload}");
        println!("output: {}", result.html);
        println!("report: {:?}", result.report);
        println!("stable: {}\n", sanitizer.sanitize(&result.html) == result.html);
    }
}
