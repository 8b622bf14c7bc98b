//! Diagnostic hook for outgoing token requests.

use reqwest::Request;
use std::fmt;
use tracing::{trace, Level};

/// Called with every token request right before it is sent.
///
/// Observers only look; they cannot alter or veto the request.
pub trait RequestObserver: Send + Sync + fmt::Debug {
    /// Inspect an outgoing request.
    fn on_request(&self, request: &Request);
}

/// Logs a shell-reproducible `curl` command at `TRACE` level.
///
/// The rendered command includes the form body, credentials and all, so it
/// is only built when `guard::oauth` tracing is enabled at `TRACE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTrace;

impl RequestObserver for CurlTrace {
    fn on_request(&self, request: &Request) {
        if tracing::enabled!(target: "guard::oauth", Level::TRACE) {
            trace!(target: "guard::oauth", command = %curl_command(request), "Token request");
        }
    }
}

/// Observer that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {
    fn on_request(&self, _request: &Request) {}
}

/// Render a request as an equivalent `curl` invocation.
pub fn curl_command(request: &Request) -> String {
    let mut command = format!("curl -X {}", quote(request.method().as_str()));

    if let Some(body) = request.body().and_then(|b| b.as_bytes()) {
        command.push_str(" -d ");
        command.push_str(&quote(&String::from_utf8_lossy(body)));
    }

    let mut headers: Vec<String> = request
        .headers()
        .iter()
        .map(|(name, value)| format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())))
        .collect();
    headers.sort();
    for header in headers {
        command.push_str(" -H ");
        command.push_str(&quote(&header));
    }

    command.push(' ');
    command.push_str(&quote(request.url().as_str()));
    command
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
