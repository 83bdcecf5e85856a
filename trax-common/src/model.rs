//! Wire-level data model of the processing pipeline
//!
//! Field names follow the upstream JSON contract (camelCase:
//! `fileId`, `processingStatus`, ...). List responses carry a sparse
//! record (id and status); the details endpoint fills in the rest,
//! which [`FileRecord::merge_details`] folds in additively.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Processing state of a file as reported by the upstream service.
///
/// `Finished` is the ready sentinel; only finished files are served
/// by the presentation endpoint. Unknown wire values are preserved
/// verbatim in `Other`, never treated as a parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStatus {
    Finished,
    Processing,
    Failed,
    Other(String),
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProcessingStatus::Finished => "FINISHED",
            ProcessingStatus::Processing => "PROCESSING",
            ProcessingStatus::Failed => "FAILED",
            ProcessingStatus::Other(s) => s,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ProcessingStatus::Finished)
    }
}

impl From<&str> for ProcessingStatus {
    fn from(s: &str) -> Self {
        match s {
            "FINISHED" => ProcessingStatus::Finished,
            "PROCESSING" => ProcessingStatus::Processing,
            "FAILED" => ProcessingStatus::Failed,
            other => ProcessingStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProcessingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProcessingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ProcessingStatus::from(s.as_str()))
    }
}

/// One file known to the processing pipeline.
///
/// Immutable once fetched within a request; assembled by merging the
/// listing record with the details response and the segment list.
/// Upstream fields we do not model explicitly land in `extra` so
/// they survive the round trip to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_id: String,
    pub processing_status: ProcessingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp3_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileRecord {
    /// Minimal record as returned by the listing endpoint.
    pub fn new(file_id: impl Into<String>, status: ProcessingStatus) -> Self {
        Self {
            file_id: file_id.into(),
            processing_status: status,
            file_name: None,
            file_length: None,
            mp3_path: None,
            original_file_path: None,
            series_title: None,
            segments: None,
            extra: Map::new(),
        }
    }

    /// Fold extended metadata into the record.
    ///
    /// Keys present in `details` win (the sources are disjoint by
    /// contract, so last-write-wins is safe); keys absent keep the
    /// listing values. Unknown keys are preserved in `extra`. A value
    /// of an unexpected type for a known key is dropped with a
    /// warning rather than clobbering the typed field.
    pub fn merge_details(&mut self, details: Map<String, Value>) {
        for (key, value) in details {
            match key.as_str() {
                "fileId" => match value {
                    Value::String(s) => self.file_id = s,
                    other => self.warn_mismatch("fileId", &other),
                },
                "processingStatus" => match value {
                    Value::String(s) => self.processing_status = ProcessingStatus::from(s.as_str()),
                    other => self.warn_mismatch("processingStatus", &other),
                },
                "fileName" => match value {
                    Value::String(s) => self.file_name = Some(s),
                    other => self.warn_mismatch("fileName", &other),
                },
                "fileLength" => match value.as_u64() {
                    Some(n) => self.file_length = Some(n),
                    None => self.warn_mismatch("fileLength", &value),
                },
                "mp3Path" => match value {
                    Value::String(s) => self.mp3_path = Some(s),
                    other => self.warn_mismatch("mp3Path", &other),
                },
                "originalFilePath" => match value {
                    Value::String(s) => self.original_file_path = Some(s),
                    other => self.warn_mismatch("originalFilePath", &other),
                },
                "seriesTitle" => match value {
                    Value::String(s) => self.series_title = Some(s),
                    other => self.warn_mismatch("seriesTitle", &other),
                },
                _ => {
                    self.extra.insert(key, value);
                }
            }
        }
    }

    /// Attach the transcript segment list fetched for this file.
    pub fn attach_segments(&mut self, segments: Vec<Segment>) {
        self.segments = Some(segments);
    }

    fn warn_mismatch(&self, key: &str, value: &Value) {
        tracing::warn!(
            file_id = %self.file_id,
            key = key,
            value = %value,
            "ignoring details field with unexpected type"
        );
    }
}

/// One transcript fragment of a file.
///
/// Always belongs to exactly one [`FileRecord`] via `file_id`; has no
/// independent lifecycle and is refetched on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub segment_id: String,
    pub file_id: String,
    pub text: String,
    /// Offset from the start of the file, in seconds.
    pub start_time: f64,
    pub end_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_wire_values_round_trip() {
        for (wire, status) in [
            ("FINISHED", ProcessingStatus::Finished),
            ("PROCESSING", ProcessingStatus::Processing),
            ("FAILED", ProcessingStatus::Failed),
        ] {
            assert_eq!(ProcessingStatus::from(wire), status);
            assert_eq!(status.as_str(), wire);
        }
    }

    #[test]
    fn unknown_status_is_preserved_not_rejected() {
        let status = ProcessingStatus::from("QUEUED");
        assert_eq!(status, ProcessingStatus::Other("QUEUED".to_string()));
        assert!(!status.is_finished());
        assert_eq!(status.as_str(), "QUEUED");
    }

    #[test]
    fn sparse_listing_record_deserializes() {
        let record: FileRecord = serde_json::from_value(json!({
            "fileId": "abc",
            "processingStatus": "FINISHED",
        }))
        .unwrap();
        assert_eq!(record.file_id, "abc");
        assert!(record.processing_status.is_finished());
        assert_eq!(record.file_name, None);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn merge_is_additive_and_details_win() {
        let mut record = FileRecord::new("abc", ProcessingStatus::Finished);
        record.file_name = Some("from-listing.mp3".to_string());

        let details = json!({
            "fileName": "from-details.mp3",
            "fileLength": 1234,
            "seriesTitle": "Morning Show",
            "transcriptionEngine": "v2",
        });
        let Value::Object(details) = details else { unreachable!() };
        record.merge_details(details);

        // present in details: overwritten
        assert_eq!(record.file_name.as_deref(), Some("from-details.mp3"));
        assert_eq!(record.file_length, Some(1234));
        assert_eq!(record.series_title.as_deref(), Some("Morning Show"));
        // absent from details: kept
        assert!(record.processing_status.is_finished());
        // unknown key: preserved for the caller
        assert_eq!(record.extra["transcriptionEngine"], json!("v2"));
    }

    #[test]
    fn merge_drops_type_mismatches_instead_of_clobbering() {
        let mut record = FileRecord::new("abc", ProcessingStatus::Finished);
        record.file_name = Some("keep-me.mp3".to_string());

        let Value::Object(details) = json!({ "fileName": 42 }) else {
            unreachable!()
        };
        record.merge_details(details);
        assert_eq!(record.file_name.as_deref(), Some("keep-me.mp3"));
    }

    #[test]
    fn serialized_record_omits_absent_fields() {
        let record = FileRecord::new("abc", ProcessingStatus::Processing);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({ "fileId": "abc", "processingStatus": "PROCESSING" })
        );
    }

    #[test]
    fn segments_serialize_in_camel_case() {
        let segment = Segment {
            segment_id: "seg-1".to_string(),
            file_id: "abc".to_string(),
            text: "hello".to_string(),
            start_time: 0.0,
            end_time: 2.5,
        };
        let value = serde_json::to_value(&segment).unwrap();
        assert_eq!(value["segmentId"], json!("seg-1"));
        assert_eq!(value["startTime"], json!(0.0));
    }
}
