use crate::config::SigningConfig;
use crate::models::{SignedGetResponse, SignedPutResponse};
use crate::types::{AppError, AppResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub const SIGN_PUT_PATH: &str = "/sign-put";
pub const SIGN_GET_PATH: &str = "/sign-get";

/// Client for the endpoint that hands out presigned storage URLs.
#[derive(Debug, Clone)]
pub struct SigningClient {
    client: Client,
    config: SigningConfig,
}

impl SigningClient {
    pub fn new(config: SigningConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: SigningConfig) -> Self {
        Self { client, config }
    }

    /// Configured base URL, trailing slashes removed.
    pub fn base_url(&self) -> Option<&str> {
        self.config.normalized_base()
    }

    /// Ask for a presigned PUT URL for `key`.
    pub async fn request_presigned_put(&self, key: &str) -> AppResult<SignedPutResponse> {
        let signed: SignedPutResponse = self.sign(SIGN_PUT_PATH, key).await?;
        info!(key, expected_output = %signed.expected_output, "Presigned PUT issued");
        Ok(signed)
    }

    /// Ask for a presigned GET URL for `key`. Says nothing about whether the
    /// object exists yet.
    pub async fn request_presigned_get(&self, key: &str) -> AppResult<SignedGetResponse> {
        let signed: SignedGetResponse = self.sign(SIGN_GET_PATH, key).await?;
        info!(key, "Presigned GET issued");
        Ok(signed)
    }

    async fn sign<T: DeserializeOwned>(&self, endpoint: &str, key: &str) -> AppResult<T> {
        if key.trim().is_empty() {
            return Err(AppError::validation("Storage key must not be empty"));
        }

        let path = signing_path(endpoint, key);
        let url = match self.base_url() {
            Some(base) => format!("{}{}", base, path),
            None => {
                warn!("API base not set; signing against a relative path");
                path.clone()
            }
        };

        debug!(url = %url, "Requesting signature");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(path = %path, status = status.as_u16(), "Signing request failed");
            return Err(AppError::UpstreamSigning {
                path,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("{}: {}", path, e)))
    }
}

/// `/sign-put?key=input%2Fstory.txt` style path with the key form-encoded.
pub fn signing_path(endpoint: &str, key: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
    format!("{}?key={}", endpoint, encoded)
}
