#![warn(missing_docs)]
//! # gait-lens-contract
//!
//! ## Purpose
//! Defines the analysis backend response schema and the client-side adapter
//! that normalizes it into the core result model.
//!
//! ## Responsibilities
//! - Parse the two known success payload shapes (frame list, segment list).
//! - Absolutize artifact URLs against the backend base origin.
//! - Reject payloads matching neither known shape.
//! - Extract the optional server error message from failure bodies.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_analysis_response`] -> [`ProcessingResult`]
//! stored by the upload session and rendered by presentation surfaces.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON, unknown shapes, unresolvable URLs, and segment invariant
//! violations return [`ContractError`].

use gait_lens_core::{
    CoreError, FrameListResult, ProcessingResult, Segment, SegmentListResult,
};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Superset of both success payload shapes; exactly one field set is
/// expected to be populated per response.
#[derive(Debug, Deserialize)]
struct RawAnalysisResponse {
    frames_with_one_person: Option<Vec<u64>>,
    spliced_video_url: Option<String>,
    segments: Option<Vec<RawSegment>>,
    pose_data_url: Option<String>,
}

/// One segment element as emitted by the backend.
#[derive(Debug, Deserialize)]
struct RawSegment {
    video_url: String,
    overlay_url: String,
    duration: f64,
    start_frame: u64,
    end_frame: u64,
}

/// Optional error body attached to non-2xx responses.
#[derive(Debug, Deserialize)]
struct RawErrorBody {
    error: Option<String>,
}

/// Normalizes a raw backend success body into exactly one result variant.
///
/// Dispatch inspects which known field set is present: a
/// `frames_with_one_person` array selects the frame-list variant, otherwise
/// a `segments` array selects the segment-list variant. All relative URLs
/// are resolved against `base` before exposure.
///
/// This is a pure function of its inputs and carries no hidden state.
///
/// # Errors
/// Returns [`ContractError::Decode`] for invalid JSON,
/// [`ContractError::UnknownShape`] when neither field set is present,
/// [`ContractError::InvalidUrl`] for unresolvable artifact URLs, and
/// [`ContractError::Segment`] for segment invariant violations.
pub fn parse_analysis_response(raw: &str, base: &Url) -> Result<ProcessingResult, ContractError> {
    let parsed: RawAnalysisResponse = serde_json::from_str(raw).map_err(ContractError::Decode)?;

    if let Some(frames) = parsed.frames_with_one_person {
        let spliced_video_url = parsed
            .spliced_video_url
            .map(|value| absolutize(base, "spliced_video_url", &value))
            .transpose()?;

        return Ok(ProcessingResult::FrameList(FrameListResult {
            frames_with_one_person: frames,
            spliced_video_url,
        }));
    }

    if let Some(raw_segments) = parsed.segments {
        let mut segments = Vec::with_capacity(raw_segments.len());
        for raw_segment in raw_segments {
            segments.push(Segment::new(
                absolutize(base, "video_url", &raw_segment.video_url)?,
                absolutize(base, "overlay_url", &raw_segment.overlay_url)?,
                raw_segment.duration,
                raw_segment.start_frame,
                raw_segment.end_frame,
            )?);
        }

        let pose_data_url = parsed
            .pose_data_url
            .map(|value| absolutize(base, "pose_data_url", &value))
            .transpose()?;

        return Ok(ProcessingResult::SegmentList(SegmentListResult {
            segments,
            pose_data_url,
        }));
    }

    Err(ContractError::UnknownShape)
}

/// Extracts the optional `{"error": ...}` message from a failure body.
///
/// Non-JSON bodies and bodies without a non-blank `error` field yield
/// `None`, letting callers fall back to a generic user-facing message.
pub fn parse_error_message(raw: &str) -> Option<String> {
    let parsed: RawErrorBody = serde_json::from_str(raw).ok()?;
    parsed
        .error
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

fn absolutize(base: &Url, field: &'static str, value: &str) -> Result<Url, ContractError> {
    base.join(value).map_err(|error| ContractError::InvalidUrl {
        field,
        detail: error.to_string(),
    })
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum ContractError {
    /// JSON decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Payload matches neither known result variant.
    #[error("analysis response matches no known result variant")]
    UnknownShape,
    /// Artifact URL could not be resolved against the backend origin.
    #[error("unresolvable {field} in analysis response: {detail}")]
    InvalidUrl {
        /// Response field holding the offending URL.
        field: &'static str,
        /// Parser detail message.
        detail: String,
    },
    /// Parsed segment violates core model invariants.
    #[error("invalid segment in analysis response: {0}")]
    Segment(#[from] CoreError),
}
