use eyre::{Result, bail};
use regex::Regex;

/// Default chunk size in words
pub const DEFAULT_MAX_WORDS: usize = 1000;

const MUSIC_NOTE: char = '♪';

/// Strip caption noise from a transcript.
///
/// Bracketed annotations such as `[Music]` or `[Applause]` are removed first,
/// then the musical-note glyph, then every whitespace run becomes one space
/// and the ends are trimmed. Applying it twice gives the same result as once.
pub fn clean_transcript(text: &str) -> Result<String> {
    // Dot-all so an annotation broken across a caption newline is still removed
    let brackets = Regex::new(r"(?s)\[.*?\]")?;
    let without_brackets = brackets.replace_all(text, "");
    let without_notes = without_brackets.replace(MUSIC_NOTE, "");
    Ok(without_notes.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Split text into consecutive chunks of at most `max_words` words.
///
/// Every chunk but the last holds exactly `max_words` words. Joining the
/// chunks with single spaces gives back the input's word sequence.
pub fn chunk_words(text: &str, max_words: usize) -> Result<Vec<String>> {
    if max_words == 0 {
        bail!("max_words must be a positive integer");
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    Ok(words.chunks(max_words).map(|chunk| chunk.join(" ")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_clean_removes_annotations() {
        let raw = "[Music] hello   there [Applause]\nfriends ♪ ♪ la la";
        assert_eq!(clean_transcript(raw).unwrap(), "hello there friends la la");
    }

    #[test]
    fn test_clean_non_greedy_brackets() {
        let raw = "keep [drop] this [drop too] text";
        assert_eq!(clean_transcript(raw).unwrap(), "keep this text");
    }

    #[test]
    fn test_clean_bracket_across_newline() {
        let raw = "before [Music\nplaying] after";
        assert_eq!(clean_transcript(raw).unwrap(), "before after");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "[Music] hello  world ♪",
            "a [b [c] d] e",
            "  leading and trailing\t\n",
            "unclosed [bracket here",
            "stray ] bracket [x]",
            "",
        ];
        for input in inputs {
            let once = clean_transcript(input).unwrap();
            let twice = clean_transcript(&once).unwrap();
            assert_eq!(once, twice, "input: {input:?}");
            assert!(!once.contains("  "));
            assert_eq!(once.trim(), once);
        }
    }

    #[test]
    fn test_clean_leaves_no_bracket_pairs() {
        let once = clean_transcript("a [b [c] d] e [f]").unwrap();
        if let Some(open) = once.find('[') {
            assert!(!once[open..].contains(']'));
        }
    }

    #[test]
    fn test_chunk_scenario_2500_words() {
        let text = words(2500);
        let chunks = chunk_words(&text, 1000).unwrap();
        let sizes: Vec<usize> = chunks.iter().map(|c| c.split_whitespace().count()).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
        assert_eq!(chunks.join(" "), text);
    }

    #[test]
    fn test_chunk_exact_multiple() {
        let chunks = chunk_words(&words(6), 3).unwrap();
        assert_eq!(chunks, vec!["w0 w1 w2", "w3 w4 w5"]);
    }

    #[test]
    fn test_chunk_round_trip_normalizes_whitespace() {
        let text = "  one\ttwo \n three   four five ";
        for max_words in 1..=6 {
            let chunks = chunk_words(text, max_words).unwrap();
            assert_eq!(chunks.join(" "), "one two three four five");
            assert_eq!(chunks.len(), 5_usize.div_ceil(max_words));
            for chunk in &chunks[..chunks.len() - 1] {
                assert_eq!(chunk.split_whitespace().count(), max_words);
            }
        }
    }

    #[test]
    fn test_chunk_empty_input() {
        assert!(chunk_words("", 1000).unwrap().is_empty());
        assert!(chunk_words("   \n ", 1000).unwrap().is_empty());
    }

    #[test]
    fn test_chunk_zero_max_words() {
        assert!(chunk_words("some words", 0).is_err());
    }
}
