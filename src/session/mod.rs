//! Upload Session
//!
//! The orchestration layer over the signing and storage clients. Each action
//! (upload, refresh link, fetch audio) is one sequential future: sign first,
//! then transfer. Actions share the activity log and the playback source and
//! take no lock across their awaits, so overlapping actions may interleave
//! their log lines and the last one to finish owns the playback source.

pub mod log;

pub use log::{ActivityLog, LogEntry};

use crate::config::Config;
use crate::input::{resolve_input, selected_filename};
use crate::models::{InputSelection, InputSource, PlaybackLink, UploadReceipt};
use crate::signing::SigningClient;
use crate::storage::{derive_output_key, input_key, S3Client};
use crate::types::{AppError, AppResult};
use bytes::Bytes;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, warn};

pub struct UploadSession {
    config: Config,
    signer: SigningClient,
    storage: S3Client,
    log: ActivityLog,
    playback_source: Arc<Mutex<Option<String>>>,
}

impl UploadSession {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        Self {
            signer: SigningClient::with_client(http.clone(), config.signing.clone()),
            storage: S3Client::with_client(http),
            config,
            log: ActivityLog::new(),
            playback_source: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// URL most recently handed to the player, if any.
    pub fn playback_source(&self) -> Option<String> {
        self.playback_source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate the selection, sign an `input/` key and PUT the payload.
    ///
    /// Validation failures return before the log is touched and before any
    /// request is made.
    pub async fn upload(&self, selection: &InputSelection) -> AppResult<UploadReceipt> {
        let submission = resolve_input(selection, &self.config.upload)?;

        self.log.clear();
        if let InputSource::File { filename, .. } = &submission.source {
            self.log.push(format!("Uploading file: {}", filename));
        }

        let filename = submission.source.filename().to_string();
        let result = self
            .sign_and_put(
                &filename,
                submission.source.content_type(),
                &submission.voice,
                submission.source.payload(),
            )
            .await;

        if let Err(e) = &result {
            error!(error = %e, filename = %filename, "Upload action failed");
            self.log.push(format!("ERROR: {}", e));
        }
        result
    }

    async fn sign_and_put(
        &self,
        filename: &str,
        content_type: &str,
        voice: &str,
        payload: Bytes,
    ) -> AppResult<UploadReceipt> {
        let key = input_key(filename);

        self.log.push(format!("Requesting presigned PUT for {}...", key));
        self.warn_if_unconfigured();
        let signed = self.signer.request_presigned_put(&key).await?;

        self.log.push("Uploading via presigned URL...");
        self.storage
            .put_object(&signed.put_url, content_type, voice, payload)
            .await?;

        self.log.push(format!("Uploaded. Expected output: {}", signed.expected_output));
        self.log.push("Click 'Refresh Play Link' in ~30-60s to try playback.");

        Ok(UploadReceipt {
            input_key: key,
            expected_output: signed.expected_output,
            output_key: derive_output_key(filename),
        })
    }

    /// Sign a fresh GET link for the audio the current selection should
    /// produce and make it the playback source. Never cached: every call
    /// signs anew.
    pub async fn refresh_link(&self, selection: &InputSelection) -> AppResult<PlaybackLink> {
        let filename = selected_filename(selection, &self.config.upload);
        let output_key = derive_output_key(&filename);

        self.log
            .push(format!("Requesting a temporary GET link for {}...", output_key));
        self.warn_if_unconfigured();

        match self.signer.request_presigned_get(&output_key).await {
            Ok(signed) => {
                self.set_playback_source(signed.get_url.clone());
                self.log
                    .push("If processing is complete, the audio will play below.");
                Ok(PlaybackLink {
                    output_key,
                    get_url: signed.get_url,
                })
            }
            Err(e) => {
                error!(error = %e, key = %output_key, "Refresh link failed");
                self.log
                    .push(format!("ERROR: {} (Audio may not be ready yet)", e));
                Err(e)
            }
        }
    }

    /// Download whatever the playback source points at into `dest`. Storage
    /// refusing the GET is how a not-yet-converted job shows up.
    pub async fn fetch_audio(&self, dest: &Path) -> AppResult<u64> {
        let url = self
            .playback_source()
            .ok_or_else(|| AppError::validation("No playback link yet; refresh the link first"))?;

        let audio = match self.storage.get_object(&url).await {
            Ok(audio) => audio,
            Err(e) => {
                self.log.push(format!(
                    "ERROR: {} (Processing may not be finished; try again later)",
                    e
                ));
                return Err(e);
            }
        };

        tokio::fs::write(dest, &audio).await?;
        self.log
            .push(format!("Saved {} bytes of audio to {}", audio.len(), dest.display()));
        Ok(audio.len() as u64)
    }

    fn set_playback_source(&self, url: String) {
        *self
            .playback_source
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(url);
    }

    fn warn_if_unconfigured(&self) {
        if self.signer.base_url().is_none() {
            warn!("API_BASE is not configured");
            self.log.push("WARNING: API_BASE not set");
        }
    }
}
