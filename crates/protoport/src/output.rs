/// Format a key-value pair for display.
pub fn kv(key: &str, value: &str) -> String {
    format!("{key:>20}: {value}")
}

/// Show only the start of a secret.
pub fn mask(secret: &str) -> String {
    if secret.len() > 10 {
        let prefix: String = secret.chars().take(4).collect();
        format!("{prefix}...")
    } else {
        "***".to_string()
    }
}
