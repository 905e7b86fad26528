use std::path::{Path, PathBuf};

use eyre::Result;
use log::{debug, warn};

use crate::youtube::{FALLBACK_TITLE, VideoTitle};

const ILLEGAL_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Make a title safe to use as a base filename: path-illegal characters are
/// dropped, the ends trimmed, and any remaining whitespace becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Base filename for a video's notes. A title that sanitizes to nothing
/// falls back to [`FALLBACK_TITLE`].
pub fn filename_base(title: &VideoTitle) -> String {
    let base = sanitize_filename(&title.text);
    if base.is_empty() {
        warn!("Title {:?} sanitized to nothing, using {FALLBACK_TITLE}", title.text);
        return FALLBACK_TITLE.to_string();
    }
    base
}

/// Join structured sections into the final document, blank line between each
pub fn render_document(sections: &[String]) -> String {
    sections.join("\n\n")
}

/// Write the document to `<dir>/<base>.md`, replacing any existing file
pub fn write_markdown(dir: &Path, base: &str, document: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{base}.md"));
    std::fs::write(&path, document)?;
    debug!("Wrote {} bytes to {}", document.len(), path.display());
    Ok(path)
}

/// The PDF rendered from a Markdown file sits beside it as `<name>.md.pdf`
pub fn pdf_path_for(markdown: &Path) -> PathBuf {
    let mut name = markdown.as_os_str().to_owned();
    name.push(".pdf");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::TitleSource;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(
            sanitize_filename(r#"  What is "Rust"? A/B <test> | part: 1*\  "#),
            "What_is_Rust_AB_test__part_1"
        );
    }

    #[test]
    fn test_sanitize_filename_unicode() {
        assert_eq!(sanitize_filename("Café Déjà vu"), "Café_Déjà_vu");
    }

    #[test]
    fn test_sanitize_filename_is_idempotent() {
        let inputs = ["a b c", " ?x: y ", "tab\there", "already_clean", "", "***"];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once);
            assert!(!once.contains(ILLEGAL_FILENAME_CHARS));
            assert!(!once.contains(' '));
        }
    }

    fn title(text: &str, source: TitleSource) -> VideoTitle {
        VideoTitle {
            text: text.to_string(),
            source,
        }
    }

    #[test]
    fn test_filename_base_from_page_title() {
        let t = title("Rust: The Book?", TitleSource::Page);
        assert_eq!(filename_base(&t), "Rust_The_Book");
    }

    #[test]
    fn test_filename_base_fallback_title() {
        let t = title(
            FALLBACK_TITLE,
            TitleSource::Fallback {
                reason: "connection refused".to_string(),
            },
        );
        assert_eq!(filename_base(&t), "video_transcript");
    }

    #[test]
    fn test_filename_base_illegal_only_title() {
        assert_eq!(filename_base(&title("***", TitleSource::Page)), FALLBACK_TITLE);
        assert_eq!(filename_base(&title(" ?:| ", TitleSource::Page)), FALLBACK_TITLE);
    }

    #[test]
    fn test_render_document_two_sections() {
        let sections = vec!["## Part one".to_string(), "## Part two".to_string()];
        assert_eq!(render_document(&sections), "## Part one\n\n## Part two");
    }

    #[test]
    fn test_render_document_empty() {
        assert_eq!(render_document(&[]), "");
    }

    #[test]
    fn test_write_markdown_two_sections() {
        let dir = tempfile::tempdir().unwrap();
        let section1 = "## Intro\n- first".to_string();
        let section2 = "## Ünïcode ✓\n- second".to_string();
        let document = render_document(&[section1.clone(), section2.clone()]);

        let path = write_markdown(dir.path(), "My_Video", &document).unwrap();

        assert_eq!(path, dir.path().join("My_Video.md"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, section1 + "\n\n" + &section2);
    }

    #[test]
    fn test_write_markdown_overwrites_and_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("notes");
        write_markdown(&nested, "video", "old content that is longer").unwrap();
        let path = write_markdown(&nested, "video", "new").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_pdf_path_for() {
        assert_eq!(pdf_path_for(Path::new("out/My_Video.md")), PathBuf::from("out/My_Video.md.pdf"));
    }
}
