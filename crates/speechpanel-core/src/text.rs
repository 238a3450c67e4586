//! Text rules shared by the panel: blank-input detection and the
//! live-caption transcript append.

/// True when `text` is empty or whitespace-only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Append one recognized fragment to the transcript.
///
/// Always a single space followed by the fragment, never a replace. Interim
/// results for the same utterance therefore each append again.
pub fn append_fragment(transcript: &mut String, fragment: &str) {
    transcript.reserve(fragment.len() + 1);
    transcript.push(' ');
    transcript.push_str(fragment);
}
