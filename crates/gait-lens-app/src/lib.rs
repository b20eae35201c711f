#![warn(missing_docs)]
//! # gait-lens-app
//!
//! ## Purpose
//! Orchestrates the upload session, transport client, and presentation
//! surfaces for `gait-lens`.
//!
//! ## Responsibilities
//! - Map session state into the display-layer vocabulary.
//! - Project a flat runtime status snapshot for the shell.
//! - Guess MIME types for picker-less environments (CLI demo).
//! - Propagate the root `VERSION` into runtime display.
//!
//! ## Data flow
//! File selection -> session state machine -> upload client -> normalized
//! result -> banner and results views rendered by the shell.
//!
//! ## Ownership and lifetimes
//! This crate passes owned snapshots between subsystems; nothing here
//! borrows session internals across calls.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`] for the demo shell;
//! upload failures themselves stay inside the session as `Failed` state.

use std::path::Path;

use gait_lens_session::{SessionError, SessionStatus, UploadSession};
use gait_lens_transport::UploadError;
use gait_lens_ui::{
    ResultsView, StatusBanner, UploadPhase, format_file_size, render_results,
    render_status_banner,
};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("GAIT_LENS_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Consolidated runtime status snapshot for simple shell projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeStatus {
    /// Session status label.
    pub status: &'static str,
    /// Latest transfer percent, when one applies.
    pub progress_percent: Option<u8>,
    /// User-facing error message, when one is held.
    pub error: Option<String>,
    /// Result variant label, present only when completed.
    pub result_variant: Option<&'static str>,
    /// Held file label (`name (X.XX MB)`), when a file is selected.
    pub file_label: Option<String>,
}

/// Projects session state into a flat status snapshot.
pub fn project_runtime_status(session: &UploadSession) -> RuntimeStatus {
    RuntimeStatus {
        status: session.status().as_str(),
        progress_percent: session.progress_percent(),
        error: session.error_message().map(str::to_string),
        result_variant: session.result().map(|result| result.variant_name()),
        file_label: session
            .selected_file()
            .map(|file| format!("{} ({})", file.name, format_file_size(file.size_bytes()))),
    }
}

/// Maps the session status onto the display-layer phase vocabulary.
pub fn upload_phase(status: SessionStatus) -> UploadPhase {
    match status {
        SessionStatus::Idle => UploadPhase::Idle,
        SessionStatus::Selected => UploadPhase::Selected,
        SessionStatus::Uploading => UploadPhase::Uploading,
        SessionStatus::Completed => UploadPhase::Completed,
        SessionStatus::Failed => UploadPhase::Failed,
    }
}

/// Renders the banner and results section for the current session.
pub fn render_session(session: &UploadSession) -> (Option<StatusBanner>, Option<ResultsView>) {
    let banner = render_status_banner(
        upload_phase(session.status()),
        session.progress_percent(),
        session.error_message(),
    );
    let results = render_results(session.result());
    (banner, results)
}

/// Guesses the MIME type for a path by extension.
///
/// Used by the demo shell, which has no file picker to supply one.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("mkv") => "video/x-matroska",
        _ => "application/octet-stream",
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session rejected the requested operation.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    /// Upload client could not be constructed.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
    /// Demo shell could not read the input file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
