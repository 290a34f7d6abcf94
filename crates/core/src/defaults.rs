//! Built-in categories a fresh session starts with.

use crate::rules::CategoryRule;

/// `(name, comma-separated extensions)` for each default category, in
/// display order.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Images", ".jpg, .jpeg, .png, .gif, .webp, .svg"),
    ("Documents", ".pdf, .docx, .doc, .txt, .pptx, .xlsx"),
    ("Archives", ".zip, .rar, .7z, .tar.gz"),
    ("Audio", ".mp3, .wav, .aac, .flac"),
    ("Video", ".mp4, .mov, .avi, .mkv"),
];

/// Normalized rules for [`DEFAULT_CATEGORIES`].
pub fn default_rules() -> Vec<CategoryRule> {
    DEFAULT_CATEGORIES
        .iter()
        .filter_map(|(name, exts)| CategoryRule::parse(name, exts).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    #[test]
    fn all_defaults_normalize() {
        assert_eq!(default_rules().len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn seeded_set_keeps_default_order() {
        let set = RuleSet::with_defaults();
        let names: Vec<_> = set.iter().map(CategoryRule::name).collect();
        assert_eq!(names, ["Images", "Documents", "Archives", "Audio", "Video"]);
    }

    #[test]
    fn archives_include_multi_dot_extension() {
        let set = RuleSet::with_defaults();
        let archives = set.iter().find(|r| r.name() == "Archives").unwrap();
        assert_eq!(archives.extensions(), [".zip", ".rar", ".7z", ".tar.gz"]);
    }
}
