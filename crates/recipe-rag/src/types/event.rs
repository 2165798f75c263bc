//! Typed events of the streaming response protocol

use serde::{Deserialize, Serialize};

use super::chunk::SourceInfo;

/// One discriminated, ordered unit of the response stream.
///
/// Serialized as `{"type": "...", "data": ...}`, one JSON record per line.
/// Exactly one `sources` event precedes all `content` events in a non-empty
/// stream; a terminal `error` event is emitted only when generation fails
/// after streaming has begun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Ordered source summaries for the retrieved chunks
    Sources(Vec<SourceInfo>),
    /// One incremental fragment of the answer
    Content(String),
    /// Terminal failure notice; the stream closes after this event
    Error(String),
}

impl StreamEvent {
    /// Encode the event as one newline-terminated JSON record
    pub fn to_ndjson_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!("Failed to encode stream event: {}", e);
            r#"{"type":"error","data":"event encoding failed"}"#.to_string()
        });
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChunkMetadata, RecipeChunk};
    use uuid::Uuid;

    #[test]
    fn test_content_event_shape() {
        let line = StreamEvent::Content("braise".to_string()).to_ndjson_line();
        assert_eq!(line, "{\"type\":\"content\",\"data\":\"braise\"}\n");
    }

    #[test]
    fn test_sources_event_shape() {
        let chunk = RecipeChunk::new(
            Uuid::new_v4(),
            "Cut the tofu into cubes",
            ChunkMetadata::new("Mapo Tofu", "vegetarian", "easy"),
            0,
        );
        let event = StreamEvent::Sources(vec![SourceInfo::from_chunk(&chunk)]);

        let line = event.to_ndjson_line();
        assert!(line.ends_with('\n'));

        let value: serde_json::Value =
            serde_json::from_str(line.trim()).expect("one JSON value per line");
        assert_eq!(value["type"], "sources");
        assert_eq!(value["data"][0]["dish_name"], "Mapo Tofu");
    }

    #[test]
    fn test_event_roundtrip() {
        let event = StreamEvent::Error("generation backend failed".to_string());
        let line = event.to_ndjson_line();
        let parsed: StreamEvent = serde_json::from_str(line.trim()).expect("roundtrip");
        assert_eq!(parsed, event);
    }
}
