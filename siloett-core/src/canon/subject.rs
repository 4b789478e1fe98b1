//! Subject-key normalization shared by extraction and validation.
//!
//! Keys are `{owner}/{aspect}` paths of lowercase snake segments:
//! `roy/physical_status`, `world/the_internet`, `timeline/s3e6`.

/// Flatten a human name into one key segment: "The Internet" ->
/// "the_internet".
pub fn normalize_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            key.extend(c.to_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            key.push('_');
            last_was_sep = true;
        }
    }
    key.trim_end_matches('_').to_string()
}

/// Human-readable form of a key's last segment:
/// "world/the_internet" -> "the internet".
pub fn display_name(subject: &str) -> String {
    subject
        .rsplit('/')
        .next()
        .unwrap_or(subject)
        .replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_flattens_names() {
        assert_eq!(normalize_key("The Internet"), "the_internet");
        assert_eq!(normalize_key("Physical Status"), "physical_status");
        assert_eq!(normalize_key("  Roy "), "roy");
        assert_eq!(normalize_key("Moss's Desk"), "moss_s_desk");
    }

    #[test]
    fn display_name_inverts_the_last_segment() {
        assert_eq!(display_name("world/the_internet"), "the internet");
        assert_eq!(display_name("roy/physical_status"), "physical status");
        assert_eq!(display_name("plain"), "plain");
    }
}
