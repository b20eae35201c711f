#![warn(missing_docs)]
//! # gait-lens-session
//!
//! ## Purpose
//! Implements the upload session state machine that orchestrates file
//! selection, transfer, and result lifecycle for `gait-lens`.
//!
//! ## Responsibilities
//! - Enforce legal status transitions (Idle, Selected, Uploading,
//!   Completed, Failed).
//! - Validate the selected file's MIME policy before any transport work.
//! - Guarantee single-flight uploads by state, not by UI affordances.
//! - Bind preview-handle acquisition and release to the session lifetime.
//! - Track monotonic transfer progress and freeze it at terminal events.
//!
//! ## Data flow
//! UI selects a [`VideoFile`] -> [`UploadSession::select_file`] acquires a
//! preview handle -> [`UploadSession::submit`] drives the upload client ->
//! terminal transition stores the normalized result or a user-facing
//! failure message.
//!
//! ## Ownership and lifetimes
//! The session exclusively owns its file, preview handle, and result; none
//! of them are shared. Preview handles release their registry entry on
//! every exit path, including drop.
//!
//! ## Error model
//! Caller mistakes (no file, busy session, non-video file) return
//! [`SessionError`]. Upload failures are not `Err` values here; they are a
//! legal `Failed` state carrying a user-facing message.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use gait_lens_core::{ProcessingResult, VideoFile};
use gait_lens_transport::{ProgressSink, UploadClient};
use thiserror::Error;

/// User-facing message for rejected non-video selections.
pub const INVALID_FILE_MESSAGE: &str = "Please select a valid video file";

/// Upload session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No file is held.
    Idle,
    /// A valid video file is held and ready for submit.
    Selected,
    /// Exactly one upload is in flight.
    Uploading,
    /// Upload finished and a normalized result is held.
    Completed,
    /// Upload failed; terminal until the user re-submits or clears.
    Failed,
}

impl SessionStatus {
    /// Returns a stable label for status projection.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "Idle",
            SessionStatus::Selected => "Selected",
            SessionStatus::Uploading => "Uploading",
            SessionStatus::Completed => "Completed",
            SessionStatus::Failed => "Failed",
        }
    }
}

/// Outcome of one submit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDisposition {
    /// Upload ran and the session is now `Completed`.
    Completed,
    /// Upload ran and the session is now `Failed`.
    Failed,
    /// A prior upload is still in flight; no transport call was issued.
    IgnoredInFlight,
}

/// Registry of live preview handles.
///
/// The registry makes release discipline observable: every acquired handle
/// must disappear from it on replacement, clear, and session teardown.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

#[derive(Debug, Default)]
struct RegistryState {
    live: HashSet<u64>,
    next_id: u64,
}

impl PreviewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a new preview handle for the given file.
    pub fn acquire(&self, file: &VideoFile) -> PreviewHandle {
        let mut state = self.inner.lock().expect("preview registry lock");
        let id = state.next_id;
        state.next_id += 1;
        state.live.insert(id);

        PreviewHandle {
            id,
            source_name: file.name.clone(),
            registry: Arc::clone(&self.inner),
            released: false,
        }
    }

    /// Returns the number of live (unreleased) handles.
    pub fn live_count(&self) -> usize {
        self.inner.lock().expect("preview registry lock").live.len()
    }
}

/// Revocable reference to the selected file's bytes for local playback.
///
/// Releasing is idempotent and also happens on drop, so the registry entry
/// cannot outlive the handle on any exit path.
#[derive(Debug)]
pub struct PreviewHandle {
    id: u64,
    source_name: String,
    registry: Arc<Mutex<RegistryState>>,
    released: bool,
}

impl PreviewHandle {
    /// Returns the name of the file this preview was created from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Returns `true` while the handle still holds its registry entry.
    pub fn is_live(&self) -> bool {
        !self.released
    }

    /// Explicitly releases the handle's registry entry.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Ok(mut state) = self.registry.lock() {
            state.live.remove(&self.id);
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Shared monotonic progress cell written by the transport-side sink.
#[derive(Debug, Clone, Default)]
pub struct SharedProgress {
    cell: Arc<Mutex<Option<u8>>>,
}

impl SharedProgress {
    /// Creates an empty progress cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last observed percent, if any event arrived yet.
    pub fn snapshot(&self) -> Option<u8> {
        *self.cell.lock().expect("progress cell lock")
    }

    fn reset(&self) {
        *self.cell.lock().expect("progress cell lock") = None;
    }
}

impl ProgressSink for SharedProgress {
    fn on_progress(&mut self, percent: u8) {
        let mut cell = self.cell.lock().expect("progress cell lock");
        // Keep the maximum; the upload client already drops regressions.
        *cell = Some(cell.map_or(percent, |last| last.max(percent)));
    }
}

/// Sole owner of the upload lifecycle state.
#[derive(Debug)]
pub struct UploadSession {
    status: SessionStatus,
    file: Option<VideoFile>,
    preview: Option<PreviewHandle>,
    result: Option<ProcessingResult>,
    error_message: Option<String>,
    live_progress: SharedProgress,
    frozen_progress: Option<u8>,
    registry: PreviewRegistry,
}

impl UploadSession {
    /// Creates an idle session with its own preview registry.
    pub fn new() -> Self {
        Self::with_registry(PreviewRegistry::new())
    }

    /// Creates an idle session observing the given preview registry.
    pub fn with_registry(registry: PreviewRegistry) -> Self {
        Self {
            status: SessionStatus::Idle,
            file: None,
            preview: None,
            result: None,
            error_message: None,
            live_progress: SharedProgress::new(),
            frozen_progress: None,
            registry,
        }
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the currently held file, if any.
    pub fn selected_file(&self) -> Option<&VideoFile> {
        self.file.as_ref()
    }

    /// Returns the normalized result; present only when `Completed`.
    pub fn result(&self) -> Option<&ProcessingResult> {
        self.result.as_ref()
    }

    /// Returns the user-facing error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the live preview handle, if one is held.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    /// Returns the registry this session acquires preview handles from.
    pub fn preview_registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    /// Returns the transfer progress to display.
    ///
    /// While `Uploading` this reads the live cell; at a terminal event the
    /// value is frozen (`Completed`) or cleared (`Failed`), so stale events
    /// are never applied afterwards.
    pub fn progress_percent(&self) -> Option<u8> {
        match self.status {
            SessionStatus::Uploading => self.live_progress.snapshot(),
            _ => self.frozen_progress,
        }
    }

    /// Holds a newly chosen file, replacing any prior selection.
    ///
    /// A non-video MIME type is rejected: the status stays unchanged, the
    /// file is discarded, and [`INVALID_FILE_MESSAGE`] is recorded.
    ///
    /// # Errors
    /// Returns [`SessionError::BusyUploading`] while an upload is in flight
    /// and [`SessionError::InvalidFileType`] for non-video files.
    pub fn select_file(&mut self, file: VideoFile) -> Result<(), SessionError> {
        if self.status == SessionStatus::Uploading {
            return Err(SessionError::BusyUploading);
        }

        if !file.is_video() {
            self.error_message = Some(INVALID_FILE_MESSAGE.to_string());
            return Err(SessionError::InvalidFileType {
                mime_type: file.mime_type,
            });
        }

        // Old handle must be gone before a replacement is acquired.
        self.release_preview();
        self.preview = Some(self.registry.acquire(&file));
        self.file = Some(file);
        self.result = None;
        self.error_message = None;
        self.frozen_progress = None;
        self.live_progress.reset();
        self.status = SessionStatus::Selected;
        Ok(())
    }

    /// Drops the held file, preview, and result, returning to `Idle`.
    ///
    /// # Errors
    /// Returns [`SessionError::BusyUploading`] while an upload is in flight;
    /// the workflow defines no cancel action.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        if self.status == SessionStatus::Uploading {
            return Err(SessionError::BusyUploading);
        }

        self.release_preview();
        self.file = None;
        self.result = None;
        self.error_message = None;
        self.frozen_progress = None;
        self.live_progress.reset();
        self.status = SessionStatus::Idle;
        Ok(())
    }

    /// Marks the held file as in flight.
    ///
    /// Re-submitting from `Failed` or `Completed` is legal; the file is
    /// still held. Submitting while `Uploading` must be guarded by the
    /// caller through [`UploadSession::submit`].
    ///
    /// # Errors
    /// Returns [`SessionError::NoFileSelected`] when no file is held.
    pub fn begin_upload(&mut self) -> Result<(), SessionError> {
        if self.file.is_none() {
            return Err(SessionError::NoFileSelected);
        }

        self.result = None;
        self.error_message = None;
        self.frozen_progress = None;
        self.live_progress.reset();
        self.status = SessionStatus::Uploading;
        Ok(())
    }

    /// Applies the terminal success transition.
    pub fn complete_upload(&mut self, result: ProcessingResult) {
        self.frozen_progress = Some(100);
        self.result = Some(result);
        self.error_message = None;
        self.status = SessionStatus::Completed;
    }

    /// Applies the terminal failure transition, discarding partial progress.
    pub fn fail_upload(&mut self, message: impl Into<String>) {
        self.frozen_progress = None;
        self.result = None;
        self.error_message = Some(message.into());
        self.status = SessionStatus::Failed;
    }

    /// Runs one upload through `client`, driving the full state machine.
    ///
    /// A submit while `Uploading` is a no-op: no second transport call is
    /// issued and the session is left untouched.
    ///
    /// # Errors
    /// Returns [`SessionError::NoFileSelected`] when no file is held.
    /// Upload failures are not errors here; they land the session in
    /// `Failed` with a user-facing message.
    pub fn submit(&mut self, client: &UploadClient) -> Result<SubmitDisposition, SessionError> {
        if self.status == SessionStatus::Uploading {
            return Ok(SubmitDisposition::IgnoredInFlight);
        }

        self.begin_upload()?;

        let file = self
            .file
            .clone()
            .ok_or(SessionError::NoFileSelected)?;
        let mut sink = self.live_progress.clone();

        match client.submit(&file, &mut sink) {
            Ok(result) => {
                self.complete_upload(result);
                Ok(SubmitDisposition::Completed)
            }
            Err(error) => {
                self.fail_upload(error.user_message());
                Ok(SubmitDisposition::Failed)
            }
        }
    }

    fn release_preview(&mut self) {
        if let Some(mut preview) = self.preview.take() {
            preview.release();
        }
    }
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-facing session errors; none of these leave the session unusable.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Submit or clear was requested without a held file.
    #[error("no file is selected")]
    NoFileSelected,
    /// Selected file is not a video.
    #[error("file type {mime_type} is not a video")]
    InvalidFileType {
        /// MIME type of the rejected file.
        mime_type: String,
    },
    /// Selection and clear are disallowed while an upload is in flight.
    #[error("an upload is in flight")]
    BusyUploading,
}
