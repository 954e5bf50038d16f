//! Offline secret scan over well-known config filenames and private key files.

use super::filesystem::file_exists;
use crate::types::report::{SecurityReport, Warning};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const SUSPICIOUS_FILES: [&str; 14] = [
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.test",
    "config.json",
    "config.yml",
    "config.yaml",
    "secrets.json",
    "secrets.yml",
    "secrets.yaml",
    "credentials.json",
    "credentials.yml",
    "credentials.yaml",
];

const PRIVATE_KEY_FILES: [&str; 4] = ["id_rsa", "id_ed25519", "private.pem", "key.pem"];

const DISPLAY_CHARS: usize = 10;

struct SecretPattern {
    category: &'static str,
    pattern: Regex,
}

static SECRET_PATTERNS: OnceLock<Vec<SecretPattern>> = OnceLock::new();

/// Each pattern captures (label, value); the value group may be absent.
fn secret_patterns() -> &'static [SecretPattern] {
    SECRET_PATTERNS.get_or_init(|| {
        [
            (
                "API Key",
                r#"(?i)(api[_-]?key)["']?\s*[:=]\s*["']?([A-Za-z0-9_\-\.]{16,})"#,
            ),
            (
                "Secret Key",
                r#"(?i)(secret[_-]?key|client[_-]?secret)["']?\s*[:=]\s*["']?([A-Za-z0-9_\-/+=\.]{16,})"#,
            ),
            (
                "Password",
                r#"(?i)(password|passwd|pwd)["']?\s*[:=]\s*["']?([^\s"',]{6,})"#,
            ),
            (
                "Token",
                r#"(?i)((?:auth|access|bearer|refresh)?[_-]?token)["']?\s*[:=]\s*["']?([A-Za-z0-9_\-\.]{16,})"#,
            ),
            (
                "Private Key",
                r"(?i)(-----BEGIN (?:RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----)\s*([A-Za-z0-9+/=]+)?",
            ),
        ]
        .into_iter()
        .filter_map(|(category, source)| match Regex::new(source) {
            Ok(pattern) => Some(SecretPattern { category, pattern }),
            Err(e) => {
                tracing::error!("invalid secret pattern for {}: {}", category, e);
                None
            }
        })
        .collect()
    })
}

pub fn scan_secrets(root: &Path) -> SecurityReport {
    let mut report = SecurityReport::default();

    for name in SUSPICIOUS_FILES {
        let path = root.join(name);
        if !file_exists(&path) {
            continue;
        }
        match std::fs::read(&path) {
            Ok(bytes) => {
                report.scanned_files += 1;
                let content = String::from_utf8_lossy(&bytes);
                report.secrets_warnings.extend(scan_content(name, &content));
            }
            Err(e) => report.secrets_warnings.push(Warning::new(
                format!("Could not scan {name}: {e}"),
                "Check file permissions so the file can be audited.",
            )),
        }
    }

    for name in PRIVATE_KEY_FILES {
        if root.join(name).exists() {
            report.secrets_warnings.push(Warning::new(
                format!("Private key file found: {name}"),
                "Remove private keys from the repository, rotate them, and add the file to .gitignore.",
            ));
        }
    }

    tracing::debug!(
        "secret scan: {} file(s), {} warning(s)",
        report.scanned_files,
        report.secrets_warnings.len()
    );
    report
}

pub fn scan_content(file_name: &str, content: &str) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for SecretPattern { category, pattern } in secret_patterns() {
        for captures in pattern.captures_iter(content) {
            let value = captures
                .get(2)
                .or_else(|| captures.get(0))
                .map(|found| found.as_str())
                .unwrap_or_default();
            let shown: String = value.chars().take(DISPLAY_CHARS).collect();
            warnings.push(Warning::new(
                format!("Potential {category} in {file_name}: {shown}..."),
                "Move secrets to environment variables or a secret manager and rotate the exposed value.",
            ));
        }
    }
    warnings
}
