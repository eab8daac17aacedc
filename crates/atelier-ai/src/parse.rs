//! Generator response parsing into the typed contract.
//!
//! Generators return raw text that is ideally clean JSON but often is not.
//! Parsing attempts several recovery strategies before giving up; a
//! response that survives none of them is rejected as a whole.

use crate::contract::GenerationResponse;
use crate::error::AiError;

/// Parse a raw generator response into a validated [`GenerationResponse`].
///
/// Recovery strategies, in order:
/// 1. Direct JSON deserialization
/// 2. Extract JSON from a markdown code block
/// 3. Strip trailing commas and retry
/// 4. Code block extraction plus trailing-comma stripping
///
/// # Errors
///
/// Returns [`AiError::MalformedResponse`] when every strategy fails. The
/// caller applies nothing in that case.
pub fn parse_response(raw: &str) -> Result<GenerationResponse, AiError> {
    let trimmed = raw.trim();

    if let Ok(parsed) = serde_json::from_str::<GenerationResponse>(trimmed) {
        return Ok(parsed);
    }

    if let Some(block) = extract_codeblock(trimmed)
        && let Ok(parsed) = serde_json::from_str::<GenerationResponse>(block)
    {
        return Ok(parsed);
    }

    let cleaned = strip_trailing_commas(trimmed);
    if let Ok(parsed) = serde_json::from_str::<GenerationResponse>(&cleaned) {
        return Ok(parsed);
    }

    if let Some(block) = extract_codeblock(trimmed) {
        let cleaned_block = strip_trailing_commas(block);
        if let Ok(parsed) = serde_json::from_str::<GenerationResponse>(&cleaned_block) {
            return Ok(parsed);
        }
    }

    tracing::warn!(raw_response = trimmed, "generation response failed every parse strategy");
    Err(AiError::MalformedResponse {
        reason: "response is not valid JSON in any recoverable form".to_owned(),
    })
}

/// Extract the body of the first markdown code block, preferring a
/// ```` ```json ```` fence over a bare one.
fn extract_codeblock(text: &str) -> Option<&str> {
    let fence_end = |open: usize, tag_len: usize| {
        open.checked_add(tag_len).map(|after| {
            text.get(after..)
                .and_then(|rest| rest.find('\n'))
                .and_then(|nl| after.checked_add(nl))
                .and_then(|nl| nl.checked_add(1))
                .unwrap_or(after)
        })
    };

    let body_start = text
        .find("```json")
        .and_then(|open| fence_end(open, 7))
        .or_else(|| text.find("```").and_then(|open| fence_end(open, 3)))?;

    let body = text.get(body_start..)?;
    let close = body.find("```")?;
    body.get(..close).map(str::trim)
}

/// Remove commas that directly precede a closing brace or bracket.
fn strip_trailing_commas(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ',' {
            // Peek past whitespace without consuming non-whitespace.
            let mut lookahead = chars.clone();
            while lookahead.peek().is_some_and(|n| n.is_whitespace()) {
                lookahead.next();
            }
            if matches!(lookahead.peek(), Some('}' | ']')) {
                continue;
            }
        }
        result.push(c);
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
