//! Signing Module
//!
//! Talks to the backend that issues presigned storage URLs:
//! - `GET /sign-put?key=input/<file>` returns a PUT URL and the expected output
//! - `GET /sign-get?key=output/<file>.mp3` returns a short-lived GET URL

pub mod client;

pub use client::{signing_path, SigningClient, SIGN_GET_PATH, SIGN_PUT_PATH};
