use anyhow::Result;
use serde::Deserialize;
use std::env;

pub const DEFAULT_VOICE: &str = "Joanna";
pub const DEFAULT_TEXT_FILENAME: &str = "story.txt";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub signing: SigningConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SigningConfig {
    /// Base URL of the signing endpoint. Empty means "relative to the caller".
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub default_voice: String,
    pub default_filename: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_voice: DEFAULT_VOICE.to_string(),
            default_filename: DEFAULT_TEXT_FILENAME.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            signing: SigningConfig {
                api_base: env::var("API_BASE").unwrap_or_default(),
            },
            upload: UploadConfig {
                default_voice: non_blank(env::var("TTS_DEFAULT_VOICE").ok())
                    .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
                default_filename: non_blank(env::var("TTS_DEFAULT_FILENAME").ok())
                    .unwrap_or_else(|| DEFAULT_TEXT_FILENAME.to_string()),
            },
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.signing.api_base = api_base.into();
        self
    }

    pub fn with_default_voice(mut self, voice: impl Into<String>) -> Self {
        self.upload.default_voice = voice.into();
        self
    }
}

impl SigningConfig {
    /// Base URL with trailing slashes removed, or `None` when unset.
    pub fn normalized_base(&self) -> Option<&str> {
        let base = self.api_base.trim().trim_end_matches('/');
        if base.is_empty() {
            None
        } else {
            Some(base)
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_base_trims_trailing_slashes() {
        let config = SigningConfig { api_base: "https://abc.execute-api.aws.com/prod//".to_string() };
        assert_eq!(config.normalized_base(), Some("https://abc.execute-api.aws.com/prod"));
    }

    #[test]
    fn test_normalized_base_empty() {
        assert_eq!(SigningConfig::default().normalized_base(), None);
        let config = SigningConfig { api_base: " / ".to_string() };
        assert_eq!(config.normalized_base(), None);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default().with_api_base("http://localhost:9000");
        assert_eq!(config.upload.default_voice, "Joanna");
        assert_eq!(config.upload.default_filename, "story.txt");
        assert_eq!(config.signing.api_base, "http://localhost:9000");

        let config = config.with_default_voice("Brian");
        assert_eq!(config.upload.default_voice, "Brian");
    }
}
