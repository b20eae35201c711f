#![warn(missing_docs)]
//! # gait-lens-core
//!
//! ## Purpose
//! Defines the pure data model used across the `gait-lens` workspace.
//!
//! ## Responsibilities
//! - Represent the user-selected video file and its MIME policy check.
//! - Model the two analysis result variants as one tagged union.
//! - Validate per-segment invariants at construction time.
//!
//! ## Data flow
//! Selection code wraps bytes into [`VideoFile`]. The contract adapter
//! builds [`Segment`] values and packages them into [`ProcessingResult`],
//! which the session stores and the presentation layer reads.
//!
//! ## Ownership and lifetimes
//! Files and results own their backing buffers (`Vec<u8>`, `String`) to
//! avoid hidden borrow coupling between the session and transient network
//! buffers.
//!
//! ## Error model
//! Invariant violations (negative duration, inverted frame range) return
//! [`CoreError`] variants with caller-actionable categorization.

use thiserror::Error;
use url::Url;

/// Required MIME type prefix for selectable files.
pub const VIDEO_MIME_PREFIX: &str = "video/";

/// User-selected video file held for upload and local preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// Original file name as presented by the picker.
    pub name: String,
    /// Declared MIME type (for example `video/mp4`).
    pub mime_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl VideoFile {
    /// Wraps raw bytes with their file metadata.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Returns `true` when the declared MIME type marks a video file.
    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with(VIDEO_MIME_PREFIX)
    }

    /// Returns the file size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// One analyzed sub-range of the source video with its rendered artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Annotated original clip for this segment.
    pub video_url: Url,
    /// Pose-overlay clip for this segment.
    pub overlay_url: Url,
    /// Segment duration in seconds.
    pub duration_seconds: f64,
    /// First frame index of the segment (inclusive).
    pub start_frame: u64,
    /// Last frame index of the segment (inclusive).
    pub end_frame: u64,
}

impl Segment {
    /// Constructs a validated segment.
    ///
    /// # Errors
    /// Returns [`CoreError::NegativeDuration`] for negative or non-finite
    /// durations and [`CoreError::InvertedFrameRange`] when `end_frame`
    /// precedes `start_frame`.
    pub fn new(
        video_url: Url,
        overlay_url: Url,
        duration_seconds: f64,
        start_frame: u64,
        end_frame: u64,
    ) -> Result<Self, CoreError> {
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(CoreError::NegativeDuration {
                value: duration_seconds,
            });
        }

        if end_frame < start_frame {
            return Err(CoreError::InvertedFrameRange {
                start: start_frame,
                end: end_frame,
            });
        }

        Ok(Self {
            video_url,
            overlay_url,
            duration_seconds,
            start_frame,
            end_frame,
        })
    }
}

/// Result variant listing frames where exactly one person was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameListResult {
    /// Frame indices in the order reported by the backend.
    pub frames_with_one_person: Vec<u64>,
    /// Spliced video assembled from the listed frames, when produced.
    pub spliced_video_url: Option<Url>,
}

/// Result variant listing analyzed gait segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentListResult {
    /// Segments in the order reported by the backend.
    pub segments: Vec<Segment>,
    /// Pose keypoint data export covering all segments, when produced.
    pub pose_data_url: Option<Url>,
}

/// Normalized analysis outcome; exactly one variant per completed session.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    /// Variant A: per-frame person detection output.
    FrameList(FrameListResult),
    /// Variant B: per-segment artifacts and pose data.
    SegmentList(SegmentListResult),
}

impl ProcessingResult {
    /// Returns a stable variant label for status reporting.
    pub fn variant_name(&self) -> &'static str {
        match self {
            ProcessingResult::FrameList(_) => "frame_list",
            ProcessingResult::SegmentList(_) => "segment_list",
        }
    }
}

/// Error type for core model validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Segment duration must be a finite non-negative number.
    #[error("segment duration must be non-negative, got {value}")]
    NegativeDuration {
        /// Offending duration value.
        value: f64,
    },
    /// Segment end frame must not precede its start frame.
    #[error("segment frame range is inverted: start {start}, end {end}")]
    InvertedFrameRange {
        /// Declared start frame.
        start: u64,
        /// Declared end frame.
        end: u64,
    },
}
