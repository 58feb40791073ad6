//! Storage key naming.
//!
//! Inputs live under `input/`, synthesized audio under `output/` with the
//! input's final extension swapped for `.mp3`. The conversion job applies its
//! own version of this rule; nothing here confirms the two agree.

pub const INPUT_PREFIX: &str = "input/";
pub const OUTPUT_PREFIX: &str = "output/";
pub const OUTPUT_EXTENSION: &str = ".mp3";

/// Key an upload is stored under.
pub fn input_key(filename: &str) -> String {
    format!("{}{}", INPUT_PREFIX, filename)
}

/// Filename with its final extension segment removed.
///
/// A trailing dot with nothing after it is not an extension, so `"story."`
/// is returned unchanged.
pub fn base_name(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((base, ext)) if !ext.is_empty() => base,
        _ => filename,
    }
}

/// Key the conversion job is expected to write its audio to.
pub fn derive_output_key(filename: &str) -> String {
    format!("{}{}{}", OUTPUT_PREFIX, base_name(filename), OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_key() {
        assert_eq!(derive_output_key("story.txt"), "output/story.mp3");
        assert_eq!(derive_output_key("chapter.one.doc"), "output/chapter.one.mp3");
        assert_eq!(derive_output_key("report.PDF"), "output/report.mp3");
    }

    #[test]
    fn test_base_name_edge_cases() {
        assert_eq!(base_name("notes"), "notes");
        assert_eq!(base_name("story."), "story.");
        assert_eq!(base_name(".txt"), "");
    }

    #[test]
    fn test_input_key() {
        assert_eq!(input_key("story.txt"), "input/story.txt");
        assert_eq!(input_key("my file.docx"), "input/my file.docx");
    }
}
