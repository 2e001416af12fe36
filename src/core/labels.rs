//! Label canonicalization for comparing spreadsheet text with the section registry.

use crate::models::section::Section;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Reduce raw label text to its canonical key.
///
/// Compatibility decomposition first, so full-width letters and ligatures
/// fold to ASCII and accents split off as combining marks (which are
/// dropped). Every other character that is not an ASCII letter or digit acts
/// as a separator; separator runs collapse to one space; the result is
/// trimmed and lower-cased.
pub fn canonicalize(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len());
    for c in text.nfkd() {
        if c.is_ascii_alphanumeric() {
            spaced.push(c.to_ascii_lowercase());
        } else if !is_combining_mark(c) {
            spaced.push(' ');
        }
    }

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the text names one of the registry sections.
pub fn is_section_label(text: &str) -> bool {
    Section::from_label(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_paste_artifacts_fold_together() {
        let key = canonicalize("Ground Floor");
        assert_eq!(canonicalize("  ground\u{a0}floor "), key);
        assert_eq!(canonicalize("GROUND  FLOOR:"), key);
        assert_eq!(canonicalize("\u{201c}Ground Floor\u{201d}"), key);
        assert_eq!(canonicalize("Ground\u{202f}Floor."), key);
    }

    #[test]
    fn fullwidth_and_accents_fold_to_ascii() {
        assert_eq!(canonicalize("\u{ff32}oof"), "roof");
        assert_eq!(canonicalize("Caf\u{e9}"), "cafe");
    }

    #[test]
    fn registry_keys_stay_distinct() {
        let keys: std::collections::HashSet<String> =
            Section::ALL.iter().map(Section::canonical_key).collect();
        assert_eq!(keys.len(), Section::ALL.len());
        assert_ne!(canonicalize("1st Floor"), canonicalize("Ground Floor"));
    }

    #[test]
    fn section_labels_are_recognized() {
        assert!(is_section_label("staffing EXPENSES"));
        assert!(is_section_label("Waste-Removal"));
        assert!(!is_section_label("Entry"));
        assert!(!is_section_label(""));
    }
}
