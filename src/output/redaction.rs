//! Secret redaction for recorded commands.

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns for secrets that can appear on a kubectl command line.
static SECRET_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // kubectl create secret generic --from-literal=password=hunter2
        (r"(--from-literal=[^=\s]+=)\S+", "${1}<REDACTED>"),
        // --token, --password, --client-key-data style flags
        (
            r"(?i)(--(?:token|password|client-key-data|client-certificate-data|docker-password)[= ])\S+",
            "${1}<REDACTED>",
        ),
        // kubectl config set-credentials --auth-provider-arg=client-secret=...
        (
            r"(--auth-provider-arg=(?:client-secret|refresh-token|id-token)=)\S+",
            "${1}<REDACTED>",
        ),
        (r"(?i)(bearer\s+)([a-zA-Z0-9_\-\.]{20,})", "${1}<REDACTED>"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Redact secrets from text.
pub fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();
    for (re, replacement) in SECRET_PATTERNS.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}
