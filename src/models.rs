use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const TEXT_CONTENT_TYPE: &str = "text/plain";
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file picked by the user, as the picker would hand it over.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Bytes,
    /// Content type declared by the source, if any.
    pub declared_type: Option<String>,
}

/// Raw form state consumed by `input::resolve_input`.
#[derive(Debug, Clone, Default)]
pub struct InputSelection {
    pub file: Option<SelectedFile>,
    pub text: String,
    pub filename: String,
    pub voice: String,
}

impl InputSelection {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn file(file: SelectedFile) -> Self {
        Self {
            file: Some(file),
            ..Default::default()
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}

/// What actually gets uploaded. Exactly one variant per submission.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Text {
        filename: String,
        text: String,
    },
    File {
        filename: String,
        mime_type: String,
        bytes: Bytes,
    },
}

impl InputSource {
    pub fn filename(&self) -> &str {
        match self {
            InputSource::Text { filename, .. } => filename,
            InputSource::File { filename, .. } => filename,
        }
    }

    pub fn content_type(&self) -> &str {
        match self {
            InputSource::Text { .. } => TEXT_CONTENT_TYPE,
            InputSource::File { mime_type, .. } => mime_type,
        }
    }

    pub fn payload(&self) -> Bytes {
        match self {
            InputSource::Text { text, .. } => Bytes::from(text.clone().into_bytes()),
            InputSource::File { bytes, .. } => bytes.clone(),
        }
    }
}

/// A validated input plus the voice that travels with it as metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub source: InputSource,
    pub voice: String,
}

/// Body of a successful `sign-put` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedPutResponse {
    pub put_url: String,
    pub expected_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_url_example: Option<String>,
}

/// Body of a successful `sign-get` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedGetResponse {
    pub get_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub input_key: String,
    /// As reported by the backend (e.g. `s3://bucket/output/story.mp3`).
    pub expected_output: String,
    /// As derived locally.
    pub output_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackLink {
    pub output_key: String,
    pub get_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source_payload() {
        let source = InputSource::Text {
            filename: "story.txt".to_string(),
            text: "Once upon a time".to_string(),
        };
        assert_eq!(source.filename(), "story.txt");
        assert_eq!(source.content_type(), "text/plain");
        assert_eq!(source.payload(), Bytes::from_static(b"Once upon a time"));
    }

    #[test]
    fn test_signed_put_response_without_example() {
        let parsed: SignedPutResponse = serde_json::from_str(
            r#"{"put_url":"https://bucket.s3.amazonaws.com/input/a.txt?X-Amz-Signature=1","expected_output":"s3://bucket/output/a.mp3"}"#,
        )
        .unwrap();
        assert_eq!(parsed.expected_output, "s3://bucket/output/a.mp3");
        assert!(parsed.get_url_example.is_none());
    }
}
