//! Filesystem-safe filenames for harvested documents.

/// Characters that are unsafe in filenames on at least one platform.
const UNSAFE_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace unsafe filename characters with underscores.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();

    if cleaned.is_empty() {
        "document.pdf".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(sanitize_filename("relazione.pdf"), "relazione.pdf");
    }

    #[test]
    fn test_unsafe_chars_replaced() {
        assert_eq!(
            sanitize_filename(r#"a/b\c:d*e?f"g<h>i|j.pdf"#),
            "a_b_c_d_e_f_g_h_i_j.pdf"
        );
    }

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(sanitize_filename("   "), "document.pdf");
    }
}
