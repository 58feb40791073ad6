// voicedrop - Upload documents for text-to-speech and fetch the audio via presigned URLs

pub mod config;
pub mod models;
pub mod types;
pub mod input;
pub mod signing;   // Presigned URL issuance (sign-put / sign-get)
pub mod storage;
pub mod session;   // Upload / refresh-link actions and the activity log
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::{InputSelection, InputSource, PlaybackLink, SelectedFile, UploadReceipt};
pub use session::UploadSession;
pub use types::{AppError, AppResult};
