//! Display-name sanitization for name-addressed records.
//!
//! A track's display name is user-supplied and arbitrary; its storage path
//! must be a safe, deterministic token. The mapping has no inverse - the
//! original name survives only inside the record content.

/// Maximum length of a sanitized path token.
const MAX_TOKEN_LEN: usize = 120;

/// Token used when sanitization leaves nothing behind.
const FALLBACK_TOKEN: &str = "track";

/// Reduce a display name to a path-safe token.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9-_]` to a single `-`, trims leading/trailing `-`, caps the
/// result at 120 characters, and falls back to `"track"` when nothing
/// survives. Total and pure: same input, same output, no I/O.
pub fn sanitize(name: &str) -> String {
    let mut token = String::with_capacity(name.len().min(MAX_TOKEN_LEN));
    let mut pending_break = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_' {
            if pending_break {
                token.push('-');
                pending_break = false;
            }
            token.push(ch);
        } else {
            pending_break = true;
        }
    }

    let mut token = token.trim_matches('-').to_string();
    token.truncate(MAX_TOKEN_LEN);

    if token.is_empty() {
        FALLBACK_TOKEN.to_string()
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_punctuation() {
        assert_eq!(sanitize("My Track!! 2024"), "my-track-2024");
        assert_eq!(sanitize("Night Drive"), "night-drive");
        assert_eq!(sanitize("NIGHT DRIVE!!"), "night-drive");
    }

    #[test]
    fn keeps_safe_characters_verbatim() {
        assert_eq!(sanitize("lo-fi_beats"), "lo-fi_beats");
        assert_eq!(sanitize("a--b"), "a--b");
    }

    #[test]
    fn blank_input_falls_back() {
        assert_eq!(sanitize(""), "track");
        assert_eq!(sanitize("   "), "track");
        assert_eq!(sanitize("!!!"), "track");
    }

    #[test]
    fn long_names_are_capped() {
        let token = sanitize(&"a".repeat(200));
        assert_eq!(token.len(), 120);
        assert!(token.chars().all(|c| c == 'a'));
    }

    #[test]
    fn non_ascii_is_reduced() {
        assert_eq!(sanitize("Çafé Nights"), "af-nights");
    }

    #[test]
    fn output_is_always_path_safe() {
        let inputs = [
            "  ..//..  ",
            "über/track",
            "a b c",
            "MIXED_case-Token",
            "---",
            "🎵 bangers",
        ];
        for input in inputs {
            let token = sanitize(input);
            assert!(!token.is_empty());
            assert!(token.len() <= 120);
            assert!(token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        }
    }

    #[test]
    fn sanitized_output_is_a_fixed_point() {
        for input in ["My Track!! 2024", "night drive", "lo-fi_beats", "   "] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }
}
