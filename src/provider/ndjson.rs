//! Newline-delimited JSON decoding for local generation streams.
//!
//! A local `/api/generate` endpoint answers with one JSON object per line,
//! each carrying the next piece of text under `response`.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use super::error::ProviderError;

#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Converts a raw NDJSON byte stream into a stream of text fragments.
///
/// Lines are reassembled across chunk boundaries before decoding, so multi-byte
/// characters split between chunks survive. The stream ends after the first
/// error.
pub fn ndjson_to_fragment_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String, ProviderError>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(ProviderError::Stream(e));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();

                match parse_ndjson_line(&String::from_utf8_lossy(&line)) {
                    Ok(Some(fragment)) => yield Ok(fragment),
                    Ok(None) => {}
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        }

        // Final line without a trailing newline
        match parse_ndjson_line(&String::from_utf8_lossy(&buffer)) {
            Ok(Some(fragment)) => yield Ok(fragment),
            Ok(None) => {}
            Err(e) => yield Err(e),
        }
    }
}

/// Parses one NDJSON line.
///
/// Returns `Ok(None)` for blank lines and objects without text, and an error for
/// invalid JSON or an `error` object sent by the server.
fn parse_ndjson_line(line: &str) -> Result<Option<String>, ProviderError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let chunk: GenerateChunk = serde_json::from_str(line)
        .map_err(|e| ProviderError::MalformedResponse(format!("{e}: {line}")))?;

    if let Some(error) = chunk.error {
        return Err(ProviderError::Upstream(error));
    }

    Ok(chunk.response.filter(|s| !s.is_empty()))
}
