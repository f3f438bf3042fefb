// YouTube URL resolver
// Turns whatever the user pasted into an 11-character video id, or says why not

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

// Every YouTube video id is exactly this many characters long.
pub const VIDEO_ID_LEN: usize = 11;

// Recognized separators, in one alternation:
//   youtu.be/<id>   v/<id>   u/<w>/<id>   embed/<id>   watch?v=<id>   &v=<id>
// The leading greedy run makes the rightmost separator on the first line win.
// A "line" ends at \n, \r, U+2028 or U+2029, so the run never crosses any of them.
// Group 2 is the run of non-`#&?` characters right after the separator.
static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[^\n\r\x{2028}\x{2029}]*",
        r"(youtu.be/|v/|u/(?-u:\w)/|embed/|watch\?v=|&v=)",
        r"([^#&?]*)",
        r"[^\n\r\x{2028}\x{2029}]*",
    ))
    .expect("video URL pattern compiles")
});

// Byte-order marks count as blank padding too
fn is_blank(raw: &str) -> bool {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

// ==========================================
// VIDEO ID
// ==========================================
// An opaque 11-character token. Only `resolve()` creates one, so holding a
// VideoId means the length gate has already been passed.
//
// No alphabet check is done: whatever 11 characters followed the separator
// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Why a piece of text could not be turned into a VideoId.
// The Display text is what the user sees under the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    // Nothing (or only whitespace) was submitted
    #[error("Please enter a YouTube URL")]
    MissingInput,

    // No recognized separator, or the token after it is not 11 characters
    #[error("Invalid YouTube URL. Please enter a valid YouTube link.")]
    InvalidUrl,
}

// ==========================================
// RESOLVING: resolve()
// ==========================================
// Extracts the video id from a pasted YouTube link.
//
// Blank input is rejected with MissingInput before any matching happens.
// Otherwise the text is matched as-is against the known URL shapes, and the
// captured token must be exactly VIDEO_ID_LEN characters (Unicode scalar
// values, so 11 emoji pass the gate).
//
// Example:
// - resolve("https://youtu.be/dQw4w9WgXcQ") -> Ok("dQw4w9WgXcQ")
// - resolve("  ")                           -> Err(MissingInput)
pub fn resolve(raw: &str) -> Result<VideoId, ResolveError> {
    if is_blank(raw) {
        return Err(ResolveError::MissingInput);
    }

    let token = VIDEO_URL_RE
        .captures(raw)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            debug!(input = raw, "no YouTube URL shape matched");
            ResolveError::InvalidUrl
        })?;

    let len = token.chars().count();
    if len != VIDEO_ID_LEN {
        debug!(input = raw, token, len, "captured token has the wrong length");
        return Err(ResolveError::InvalidUrl);
    }

    debug!(video_id = token, "resolved video id");
    Ok(VideoId(token.to_owned()))
}
