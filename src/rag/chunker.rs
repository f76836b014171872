//! Fixed-budget text chunking.
//!
//! Splits a document into the minimum number of contiguous segments of at
//! most `max_chars` characters, preferring to break just after whitespace so
//! words stay intact. Segments are exhaustive: rejoining them in order
//! reproduces the input exactly.

use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// One contiguous slice of a document, the unit of embedding and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Character offset of this segment in the source text.
    pub char_offset: usize,
}

/// Split `text` into ordered segments of at most `max_chars` characters.
///
/// Empty input yields no segments. A `max_chars` of zero is a caller error.
pub fn chunk_text(text: &str, max_chars: usize) -> Result<Vec<Segment>, ApiError> {
    if max_chars == 0 {
        return Err(ApiError::BadRequest(
            "chunk size must be positive".to_string(),
        ));
    }

    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    let mut segments = Vec::new();
    let mut start = 0;

    while start < total {
        let hard_end = (start + max_chars).min(total);
        let end = if hard_end < total {
            // Break just after the last whitespace inside the budget, so the
            // whitespace stays with this segment and nothing is dropped.
            (start + 1..=hard_end)
                .rev()
                .find(|&j| chars[j - 1].is_whitespace())
                .unwrap_or(hard_end)
        } else {
            hard_end
        };

        segments.push(Segment {
            text: chars[start..end].iter().collect(),
            char_offset: start,
        });
        start = end;
    }

    Ok(segments)
}
