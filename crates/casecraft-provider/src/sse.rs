// SPDX-License-Identifier: MIT OR Apache-2.0
//! Minimal server-sent-event framing for OpenAI-compatible streaming chat
//! completions.
//!
//! Every built-in provider streams `chat.completion.chunk` events of the
//! shape `data: {"choices":[{"delta":{"content":"..."}}]}`, terminated by
//! a literal `data: [DONE]` line.

/// Parse one SSE line. Returns `None` for blank lines, the `[DONE]`
/// sentinel, or a line that isn't valid JSON once the `data: ` prefix is
/// stripped.
#[must_use]
pub fn parse_sse_data_line(line: &str) -> Option<serde_json::Value> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    serde_json::from_str(payload).ok()
}

/// Extract the incremental text content from a parsed streaming chunk, if
/// this chunk carries one.
#[must_use]
pub fn extract_delta_content(chunk: &serde_json::Value) -> Option<String> {
    chunk
        .pointer("/choices/0/delta/content")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
