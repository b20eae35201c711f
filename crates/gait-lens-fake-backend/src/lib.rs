#![warn(missing_docs)]
//! # gait-lens-fake-backend
//!
//! ## Purpose
//! Provides an in-memory analysis backend for demos and tests.
//!
//! ## Responsibilities
//! - Implement [`UploadTransport`] with scripted outcomes.
//! - Track every received upload in an explicit job table keyed by the
//!   envelope's content digest.
//! - Emit coarse-grained progress events during the fake transfer.
//!
//! ## Data flow
//! [`UploadEnvelope`] -> job record created as `Processing` -> scripted
//! outcome produces the response -> job record moves to its terminal phase.
//!
//! ## Ownership and lifetimes
//! The job table is owned by the backend and mutated only inside the call
//! that owns the job; readers query phases by key.
//!
//! ## Error model
//! The `Unreachable` script returns a transport failure before any job
//! record exists, mirroring a connection that never reached the server.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use gait_lens_transport::{
    ProgressSink, TransportFailure, TransportResponse, UploadEnvelope, UploadTransport,
};

/// One scripted backend segment, mirroring the wire shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSegment {
    /// Annotated clip URL, absolute or backend-relative.
    pub video_url: String,
    /// Pose-overlay clip URL, absolute or backend-relative.
    pub overlay_url: String,
    /// Segment duration in seconds.
    pub duration: f64,
    /// First frame index (inclusive).
    pub start_frame: u64,
    /// Last frame index (inclusive).
    pub end_frame: u64,
}

/// Scripted response the fake backend produces for every upload.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedOutcome {
    /// Succeed with response variant A.
    Frames {
        /// Frame indices to report.
        frames: Vec<u64>,
        /// Optional spliced video URL.
        spliced_video_url: Option<String>,
    },
    /// Succeed with response variant B.
    Segments {
        /// Segments to report, in order.
        segments: Vec<ScriptedSegment>,
        /// Optional pose data export URL.
        pose_data_url: Option<String>,
    },
    /// Answer with an error status and optional `{error}` body.
    ServerError {
        /// HTTP status code to return.
        status: u16,
        /// Server-side error message, when scripted.
        message: Option<String>,
    },
    /// Fail before any response is produced.
    Unreachable,
}

/// Lifecycle phase of one job in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    /// Upload received, analysis in progress.
    Processing,
    /// Analysis finished and a result was returned.
    Completed,
    /// Analysis failed and an error response was returned.
    Failed,
}

#[derive(Debug)]
struct JobRecord {
    file_name: String,
    phase: JobPhase,
}

/// In-memory analysis backend with an explicit, queryable job table.
#[derive(Debug)]
pub struct FakeAnalysisBackend {
    outcome: ScriptedOutcome,
    progress_script: Vec<u8>,
    jobs: Mutex<HashMap<String, JobRecord>>,
    calls: AtomicU32,
}

impl FakeAnalysisBackend {
    /// Creates a backend with the given scripted outcome and default
    /// coarse progress (25, 60, 100).
    pub fn new(outcome: ScriptedOutcome) -> Self {
        Self::with_progress_script(outcome, vec![25, 60, 100])
    }

    /// Creates a backend with an explicit progress script; an empty script
    /// models a network stack without progress support.
    pub fn with_progress_script(outcome: ScriptedOutcome, progress_script: Vec<u8>) -> Self {
        Self {
            outcome,
            progress_script,
            jobs: Mutex::new(HashMap::new()),
            calls: AtomicU32::new(0),
        }
    }

    /// Returns the phase of the job with the given content-digest key.
    pub fn job_phase(&self, job_key: &str) -> Option<JobPhase> {
        self.jobs
            .lock()
            .expect("job table lock")
            .get(job_key)
            .map(|record| record.phase)
    }

    /// Returns the file name recorded for the given job key.
    pub fn job_file_name(&self, job_key: &str) -> Option<String> {
        self.jobs
            .lock()
            .expect("job table lock")
            .get(job_key)
            .map(|record| record.file_name.clone())
    }

    /// Returns how many send calls reached this backend.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn response_for_outcome(&self) -> (TransportResponse, JobPhase) {
        match &self.outcome {
            ScriptedOutcome::Frames {
                frames,
                spliced_video_url,
            } => {
                let mut body = serde_json::json!({ "frames_with_one_person": frames });
                if let Some(url) = spliced_video_url {
                    body["spliced_video_url"] = serde_json::json!(url);
                }
                (
                    TransportResponse {
                        status: 200,
                        body: body.to_string(),
                    },
                    JobPhase::Completed,
                )
            }
            ScriptedOutcome::Segments {
                segments,
                pose_data_url,
            } => {
                let rendered: Vec<serde_json::Value> = segments
                    .iter()
                    .map(|segment| {
                        serde_json::json!({
                            "video_url": segment.video_url,
                            "overlay_url": segment.overlay_url,
                            "duration": segment.duration,
                            "start_frame": segment.start_frame,
                            "end_frame": segment.end_frame,
                        })
                    })
                    .collect();
                let mut body = serde_json::json!({ "segments": rendered });
                if let Some(url) = pose_data_url {
                    body["pose_data_url"] = serde_json::json!(url);
                }
                (
                    TransportResponse {
                        status: 200,
                        body: body.to_string(),
                    },
                    JobPhase::Completed,
                )
            }
            ScriptedOutcome::ServerError { status, message } => {
                let body = match message {
                    Some(message) => serde_json::json!({ "error": message }).to_string(),
                    None => String::new(),
                };
                (
                    TransportResponse {
                        status: *status,
                        body,
                    },
                    JobPhase::Failed,
                )
            }
            ScriptedOutcome::Unreachable => unreachable!("handled before job creation"),
        }
    }
}

impl UploadTransport for FakeAnalysisBackend {
    fn send(
        &self,
        envelope: &UploadEnvelope,
        progress: &mut dyn ProgressSink,
    ) -> Result<TransportResponse, TransportFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.outcome == ScriptedOutcome::Unreachable {
            // The connection never reached the server; no job exists.
            return Err(TransportFailure("connection refused".to_string()));
        }

        {
            let mut jobs = self.jobs.lock().expect("job table lock");
            jobs.insert(
                envelope.content_digest.clone(),
                JobRecord {
                    file_name: envelope.file_name.clone(),
                    phase: JobPhase::Processing,
                },
            );
        }

        for percent in &self.progress_script {
            progress.on_progress(*percent);
        }

        let (response, terminal_phase) = self.response_for_outcome();

        let mut jobs = self.jobs.lock().expect("job table lock");
        if let Some(record) = jobs.get_mut(&envelope.content_digest) {
            record.phase = terminal_phase;
        }

        Ok(response)
    }
}
