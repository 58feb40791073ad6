// Direct object transfers against presigned S3 URLs.
// No credentials live here; the URL carries the authorization.

use crate::types::{AppError, AppResult};
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

/// Metadata header the conversion job reads the voice from.
pub const VOICE_METADATA_HEADER: &str = "x-amz-meta-voice";

#[derive(Debug, Clone)]
pub struct S3Client {
    client: Client,
}

impl S3Client {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// PUT `payload` to a presigned URL. Any non-2xx status is an
    /// `UploadFailed`; nothing is retried.
    pub async fn put_object(
        &self,
        put_url: &str,
        content_type: &str,
        voice: &str,
        payload: Bytes,
    ) -> AppResult<()> {
        debug!(bytes = payload.len(), content_type, voice, "PUT to presigned URL");

        let response = self
            .client
            .put(put_url)
            .header(CONTENT_TYPE, content_type)
            .header(VOICE_METADATA_HEADER, voice)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Presigned upload rejected");
            return Err(AppError::UploadFailed { status: status.as_u16() });
        }

        Ok(())
    }

    /// GET the object behind a presigned URL. Storage answers 403/404 until
    /// the conversion job has written the object, which surfaces as
    /// `PlaybackNotReady`.
    pub async fn get_object(&self, get_url: &str) -> AppResult<Bytes> {
        let response = self.client.get(get_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::PlaybackNotReady { status: status.as_u16() });
        }

        Ok(response.bytes().await?)
    }
}

impl Default for S3Client {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_put_object_sends_metadata() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/input/story.txt")
            .match_header("content-type", "text/plain")
            .match_header("x-amz-meta-voice", "Matthew")
            .match_body("hello")
            .with_status(200)
            .create_async()
            .await;

        let client = S3Client::new();
        let url = format!("{}/input/story.txt", server.url());
        client
            .put_object(&url, "text/plain", "Matthew", Bytes::from_static(b"hello"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_object_forbidden() {
        let mut server = Server::new_async().await;
        server
            .mock("PUT", "/input/story.txt")
            .with_status(403)
            .create_async()
            .await;

        let client = S3Client::new();
        let url = format!("{}/input/story.txt", server.url());
        let err = client
            .put_object(&url, "text/plain", "Joanna", Bytes::from_static(b"hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UploadFailed { status: 403 }));
    }

    #[tokio::test]
    async fn test_get_object_not_ready() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/output/story.mp3")
            .with_status(404)
            .create_async()
            .await;

        let client = S3Client::new();
        let url = format!("{}/output/story.mp3", server.url());
        let err = client.get_object(&url).await.unwrap_err();

        assert!(matches!(err, AppError::PlaybackNotReady { status: 404 }));
    }

    #[tokio::test]
    async fn test_get_object_returns_audio() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/output/story.mp3")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(b"ID3fakeaudio")
            .create_async()
            .await;

        let client = S3Client::new();
        let url = format!("{}/output/story.mp3", server.url());
        let audio = client.get_object(&url).await.unwrap();

        assert_eq!(&audio[..], b"ID3fakeaudio");
    }
}
