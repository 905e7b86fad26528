pub mod config;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod structure;
pub mod text;
pub mod youtube;

use eyre::{Result, eyre};
use url::Url;

/// A single timed caption snippet
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Caption snippets for a video, in temporal order
#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Join all snippets into one string: newlines flattened, each snippet
    /// trimmed, empty snippets dropped, survivors joined by a single space.
    pub fn joined_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.replace('\n', " "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Extract the video ID from a YouTube URL.
///
/// Recognized shapes, tried in order:
/// - short links (`youtu.be/ID`)
/// - a `v` query parameter (`youtube.com/watch?v=ID`)
/// - `/shorts/ID`
/// - `/embed/ID`
///
/// A bare 11-character video ID is accepted as well.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    if is_bare_video_id(input) {
        return Ok(input.to_string());
    }

    let url = parse_url(input).ok_or_else(|| unsupported(input))?;
    let host = url.host_str().unwrap_or_default();
    let path = url.path();

    let id = if host.contains("youtu.be") {
        path.trim_start_matches('/').to_string()
    } else if let Some((_, v)) = url.query_pairs().find(|(k, v)| k == "v" && !v.is_empty()) {
        v.into_owned()
    } else if let Some(id) = segment_after(path, "/shorts/") {
        id
    } else if let Some(id) = segment_after(path, "/embed/") {
        id
    } else {
        return Err(unsupported(input));
    };

    if id.is_empty() {
        return Err(unsupported(input));
    }
    Ok(id)
}

/// True if the input is a bare video ID rather than a URL
pub fn is_bare_video_id(input: &str) -> bool {
    input.len() == 11 && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub(crate) fn parse_url(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        // Scheme-less input such as "www.youtube.com/watch?v=ID"
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{input}")).ok(),
        Err(_) => None,
    }
}

fn segment_after(path: &str, marker: &str) -> Option<String> {
    let (_, rest) = path.split_once(marker)?;
    let id = rest.split(['/', '?']).next().unwrap_or_default();
    Some(id.to_string())
}

fn unsupported(input: &str) -> eyre::Report {
    eyre!(
        "unsupported YouTube URL format: {input}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/shorts/ID\n  https://www.youtube.com/embed/ID\n  <11-character video ID>"
    )
}
