#![warn(missing_docs)]
//! # gait-lens-transport
//!
//! ## Purpose
//! Implements the upload client for the `gait-lens` analysis backend.
//!
//! ## Responsibilities
//! - Assemble the multipart upload envelope with the file as the single
//!   `file` field.
//! - Execute uploads through an injectable transport abstraction.
//! - Classify failures into the session's vocabulary (network, application,
//!   malformed response).
//! - Report best-effort, monotonically non-decreasing progress.
//!
//! ## Data flow
//! Selected [`VideoFile`] -> [`UploadClient::submit`] sends an
//! [`UploadEnvelope`] through [`UploadTransport`] -> response body is
//! normalized by `gait-lens-contract` -> [`ProcessingResult`] or
//! [`UploadError`].
//!
//! ## Ownership and lifetimes
//! Envelopes own their body bytes so a transport may be retried or swapped
//! without borrowing session state. The client is stateless across calls.
//!
//! ## Error model
//! All upload-path failures surface as [`UploadError`] with a
//! user-presentable message derived via [`UploadError::user_message`].

use std::sync::Arc;

use gait_lens_contract::{ContractError, parse_analysis_response, parse_error_message};
use gait_lens_core::{ProcessingResult, VideoFile};
use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

/// Upload endpoint path on the analysis backend.
pub const UPLOAD_PATH: &str = "/upload";

/// Multipart field name carrying the video binary.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Generic user-facing message for failures without a server-provided one.
pub const GENERIC_UPLOAD_FAILURE: &str = "Failed to upload video. Please try again.";

/// Observer for best-effort transfer progress in percent (0-100).
///
/// Transports may call this zero or more times; callers must tolerate
/// coarse-grained or entirely absent progress events.
pub trait ProgressSink {
    /// Reports one observed progress fraction.
    fn on_progress(&mut self, percent: u8);
}

/// Sink that discards all progress events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_progress(&mut self, _percent: u8) {}
}

/// Fully assembled upload request, ready for a transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEnvelope {
    /// Absolute upload endpoint URL.
    pub endpoint: Url,
    /// `multipart/form-data` content type including the boundary parameter.
    pub content_type: String,
    /// Encoded multipart body bytes.
    pub body: Vec<u8>,
    /// Hex SHA-256 digest of the file bytes; doubles as the job key.
    pub content_digest: String,
    /// Original file name carried in the multipart disposition.
    pub file_name: String,
}

/// Response received from the backend, regardless of status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Failure before any response was received.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportFailure(pub String);

/// Abstract wire transport used by the upload client.
pub trait UploadTransport: Send + Sync {
    /// Sends one envelope and returns whatever response arrived.
    ///
    /// # Errors
    /// Returns [`TransportFailure`] only when no response was received.
    fn send(
        &self,
        envelope: &UploadEnvelope,
        progress: &mut dyn ProgressSink,
    ) -> Result<TransportResponse, TransportFailure>;
}

/// Upload client bound to one backend origin.
#[derive(Clone)]
pub struct UploadClient {
    base: Url,
    endpoint: Url,
    transport: Arc<dyn UploadTransport>,
}

impl UploadClient {
    /// Creates a client for the given backend origin.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidOrigin`] when the origin is not an
    /// absolute `http`/`https` URL with a host.
    pub fn new(
        base_origin: impl Into<String>,
        transport: Arc<dyn UploadTransport>,
    ) -> Result<Self, UploadError> {
        let base = Url::parse(&base_origin.into())
            .map_err(|error| UploadError::InvalidOrigin(error.to_string()))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(UploadError::InvalidOrigin(
                "backend origin must use http or https".to_string(),
            ));
        }
        if base.host_str().is_none() {
            return Err(UploadError::InvalidOrigin(
                "backend origin must include a host".to_string(),
            ));
        }

        let endpoint = base
            .join(UPLOAD_PATH)
            .map_err(|error| UploadError::InvalidOrigin(error.to_string()))?;

        Ok(Self {
            base,
            endpoint,
            transport,
        })
    }

    /// Returns the backend base origin used for URL absolutization.
    pub fn base_origin(&self) -> &Url {
        &self.base
    }

    /// Returns the resolved upload endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Assembles the multipart envelope for one file.
    pub fn prepare_envelope(&self, file: &VideoFile) -> UploadEnvelope {
        let boundary = generate_boundary();
        UploadEnvelope {
            endpoint: self.endpoint.clone(),
            content_type: format!("multipart/form-data; boundary={boundary}"),
            body: build_multipart_body(file, &boundary),
            content_digest: content_digest(&file.bytes),
            file_name: file.name.clone(),
        }
    }

    /// Uploads one file and normalizes the backend response.
    ///
    /// Progress events are clamped to a non-decreasing sequence before being
    /// forwarded to `progress`.
    ///
    /// # Errors
    /// - [`UploadError::Network`] when no response was received.
    /// - [`UploadError::Application`] for non-2xx responses, carrying the
    ///   server `{error}` message when present.
    /// - [`UploadError::Malformed`] when a 2xx body matches neither known
    ///   result variant.
    pub fn submit(
        &self,
        file: &VideoFile,
        progress: &mut dyn ProgressSink,
    ) -> Result<ProcessingResult, UploadError> {
        let envelope = self.prepare_envelope(file);
        let mut monotonic = MonotonicProgress::new(progress);

        let response = self
            .transport
            .send(&envelope, &mut monotonic)
            .map_err(|failure| UploadError::Network(failure.to_string()))?;

        if !(200..300).contains(&response.status) {
            return Err(UploadError::Application {
                status: response.status,
                message: parse_error_message(&response.body),
            });
        }

        parse_analysis_response(&response.body, &self.base).map_err(UploadError::Malformed)
    }
}

/// Computes the hex SHA-256 digest of the file bytes.
///
/// The digest is stable for identical content, making it usable as an
/// idempotency/job key across resubmissions.
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Encodes one file as a `multipart/form-data` body with a single field.
pub fn build_multipart_body(file: &VideoFile, boundary: &str) -> Vec<u8> {
    let header = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{UPLOAD_FIELD_NAME}\"; \
         filename=\"{name}\"\r\nContent-Type: {mime}\r\n\r\n",
        name = file.name,
        mime = file.mime_type,
    );
    let trailer = format!("\r\n--{boundary}--\r\n");

    let mut body = Vec::with_capacity(header.len() + file.bytes.len() + trailer.len());
    body.extend_from_slice(header.as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(trailer.as_bytes());
    body
}

fn generate_boundary() -> String {
    let marker: u128 = rand::rng().random();
    format!("gait-lens-{marker:032x}")
}

/// Forwards progress while dropping regressions and values above 100.
struct MonotonicProgress<'a> {
    inner: &'a mut dyn ProgressSink,
    last: Option<u8>,
}

impl<'a> MonotonicProgress<'a> {
    fn new(inner: &'a mut dyn ProgressSink) -> Self {
        Self { inner, last: None }
    }
}

impl ProgressSink for MonotonicProgress<'_> {
    fn on_progress(&mut self, percent: u8) {
        let percent = percent.min(100);
        if self.last.is_some_and(|last| percent < last) {
            return;
        }
        self.last = Some(percent);
        self.inner.on_progress(percent);
    }
}

/// Errors produced by the upload client.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Backend origin violates client requirements.
    #[error("invalid backend origin: {0}")]
    InvalidOrigin(String),
    /// No response was received from the backend.
    #[error("network failure: {0}")]
    Network(String),
    /// Backend answered with an error status.
    #[error("application failure: backend returned status {status}")]
    Application {
        /// HTTP status code of the error response.
        status: u16,
        /// Server-provided error message, when present.
        message: Option<String>,
    },
    /// Backend answered 2xx with an unrecognized body.
    #[error("malformed analysis response: {0}")]
    Malformed(#[from] ContractError),
}

impl UploadError {
    /// Returns the message to surface to the user.
    ///
    /// The server-provided message is preferred when available; every other
    /// failure collapses into one generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Application {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_UPLOAD_FAILURE.to_string(),
        }
    }
}
