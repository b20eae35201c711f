#![warn(missing_docs)]
//! # gait-lens-ui
//!
//! ## Purpose
//! Defines the display-facing view models for `gait-lens`.
//!
//! ## Responsibilities
//! - Project the upload lifecycle into a status banner.
//! - Shape normalized results into frame lists and segment cards with
//!   download affordances.
//! - Format durations and file sizes for display.
//!
//! ## Data flow
//! Session snapshots and [`ProcessingResult`] values flow in; pure view
//! structures flow out. Nothing here performs network or state-mutating
//! work.
//!
//! ## Ownership and lifetimes
//! View models own their strings and URLs so the rendering shell never
//! borrows session internals.
//!
//! ## Error model
//! Renderers degrade gracefully instead of failing: missing results render
//! as `None`, missing optional artifacts simply omit their affordance.

use gait_lens_core::{ProcessingResult, Segment};
use url::Url;

/// Upload lifecycle phase as seen by the display shell.
///
/// Mirrors the session status vocabulary without depending on the session
/// crate; the app layer maps between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Nothing selected yet.
    Idle,
    /// A file is held, ready for submit.
    Selected,
    /// Transfer and processing are in flight.
    Uploading,
    /// Processing finished successfully.
    Completed,
    /// Upload or processing failed.
    Failed,
}

/// Status banner rendered above the results section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusBanner {
    /// Transfer in flight, with the latest observed percent when known.
    Uploading {
        /// Monotonic transfer percent, absent until the first event.
        percent: Option<u8>,
    },
    /// Processing finished; results are available below.
    Completed,
    /// Upload failed with a user-facing message.
    Failed {
        /// Message to show, already user-safe.
        message: String,
    },
}

impl StatusBanner {
    /// Returns the banner's headline text.
    pub fn headline(&self) -> String {
        match self {
            StatusBanner::Uploading { percent: Some(percent) } => {
                format!("Uploading... {percent}%")
            }
            StatusBanner::Uploading { percent: None } => "Uploading...".to_string(),
            StatusBanner::Completed => {
                "Processing complete. View the results below.".to_string()
            }
            StatusBanner::Failed { message } => message.clone(),
        }
    }
}

/// One download affordance with a display label and resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    /// Button/link label.
    pub label: String,
    /// Absolute download target.
    pub href: Url,
}

/// One rendered card for an analyzed segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCard {
    /// Card heading, one-based for display.
    pub heading: String,
    /// Formatted duration, `{minutes}m {seconds}s`.
    pub duration_label: String,
    /// Frame coverage, `frames {start}-{end}`.
    pub frame_range_label: String,
    /// Download affordance for the annotated original clip.
    pub original: DownloadLink,
    /// Download affordance for the pose-overlay clip.
    pub overlay: DownloadLink,
}

/// Shaped results section; `None` of the outer option means no section.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Variant A: plain frame index listing.
    Frames {
        /// Frame indices in backend order.
        frame_indices: Vec<u64>,
        /// Single optional download affordance for the spliced video.
        spliced_download: Option<DownloadLink>,
    },
    /// Variant B: one card per segment.
    Segments {
        /// Cards in backend order.
        cards: Vec<SegmentCard>,
        /// Optional pose keypoint data download.
        pose_data_download: Option<DownloadLink>,
    },
}

/// Projects the lifecycle phase into a status banner.
///
/// `Idle` and `Selected` render no banner; the upload has not started.
pub fn render_status_banner(
    phase: UploadPhase,
    progress_percent: Option<u8>,
    error_message: Option<&str>,
) -> Option<StatusBanner> {
    match phase {
        UploadPhase::Idle | UploadPhase::Selected => None,
        UploadPhase::Uploading => Some(StatusBanner::Uploading {
            percent: progress_percent,
        }),
        UploadPhase::Completed => Some(StatusBanner::Completed),
        UploadPhase::Failed => Some(StatusBanner::Failed {
            message: error_message
                .unwrap_or("There was an error processing your video.")
                .to_string(),
        }),
    }
}

/// Shapes a normalized result for display; `None` input renders nothing.
pub fn render_results(result: Option<&ProcessingResult>) -> Option<ResultsView> {
    match result? {
        ProcessingResult::FrameList(frames) => Some(ResultsView::Frames {
            frame_indices: frames.frames_with_one_person.clone(),
            spliced_download: frames.spliced_video_url.clone().map(|href| DownloadLink {
                label: "Download spliced video".to_string(),
                href,
            }),
        }),
        ProcessingResult::SegmentList(listing) => Some(ResultsView::Segments {
            cards: listing
                .segments
                .iter()
                .enumerate()
                .map(|(index, segment)| render_segment_card(index, segment))
                .collect(),
            pose_data_download: listing.pose_data_url.clone().map(|href| DownloadLink {
                label: "Download pose data".to_string(),
                href,
            }),
        }),
    }
}

fn render_segment_card(index: usize, segment: &Segment) -> SegmentCard {
    SegmentCard {
        heading: format!("Segment {}", index + 1),
        duration_label: format_duration(segment.duration_seconds),
        frame_range_label: format!("frames {}-{}", segment.start_frame, segment.end_frame),
        original: DownloadLink {
            label: "Download original".to_string(),
            href: segment.video_url.clone(),
        },
        overlay: DownloadLink {
            label: "Download pose overlay".to_string(),
            href: segment.overlay_url.clone(),
        },
    }
}

/// Formats a duration as `{minutes}m {seconds}s` with seconds truncated.
pub fn format_duration(duration_seconds: f64) -> String {
    let whole_seconds = duration_seconds.max(0.0) as u64;
    let minutes = whole_seconds / 60;
    let seconds = whole_seconds % 60;
    format!("{minutes}m {seconds}s")
}

/// Formats a byte count as a megabyte label with two decimals.
pub fn format_file_size(size_bytes: u64) -> String {
    let megabytes = size_bytes as f64 / (1024.0 * 1024.0);
    format!("{megabytes:.2} MB")
}
