//! Decoding of the agent's response event stream.

use base64::Engine;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;

use crate::error::GamesightError;
use crate::http::parse_sse_data;
use crate::types::TraceRecord;

/// One event from the agent's response stream: either a fragment of the
/// answer text or an orchestration trace record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AgentStreamEvent {
    Chunk(ChunkPayload),
    Trace(TraceEnvelope),
}

/// Base64-encoded UTF-8 answer bytes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChunkPayload {
    pub bytes: String,
}

impl ChunkPayload {
    /// Decode the chunk bytes into answer text.
    pub fn decode_text(&self) -> Result<String, GamesightError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&self.bytes)
            .map_err(|e| GamesightError::Decode(format!("chunk base64: {e}")))?;
        String::from_utf8(bytes).map_err(|e| GamesightError::Decode(format!("chunk utf-8: {e}")))
    }
}

/// Wrapper the wire format puts around each trace record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TraceEnvelope {
    pub trace: TraceRecord,
}

/// Turn an SSE response body into a stream of typed events.
///
/// Events arrive in emission order; a transport or parse failure is yielded
/// once and ends the stream. The response handle is owned by the returned
/// stream and dropped when it is.
pub(crate) fn event_stream(
    response: reqwest::Response,
) -> BoxStream<'static, Result<AgentStreamEvent, GamesightError>> {
    let byte_stream = response.bytes_stream();

    let stream = async_stream::stream! {
        let mut buffer = String::new();
        futures::pin_mut!(byte_stream);

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(GamesightError::Network(e));
                    return;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer = buffer[line_end + 1..].to_string();

                if line.is_empty() || line.starts_with(':') {
                    continue;
                }

                if let Some(data) = parse_sse_data(&line) {
                    match serde_json::from_str::<AgentStreamEvent>(data) {
                        Ok(event) => yield Ok(event),
                        Err(e) => {
                            yield Err(GamesightError::Serialization(e));
                            return;
                        }
                    }
                }
            }
        }
    };

    Box::pin(stream)
}
