//! Shared fixtures for app integration tests.

use std::sync::Arc;

use gait_lens_core::VideoFile;
use gait_lens_fake_backend::{FakeAnalysisBackend, ScriptedOutcome, ScriptedSegment};
use gait_lens_transport::{UploadClient, UploadTransport};

/// Backend origin every fixture client resolves URLs against.
#[allow(dead_code)]
pub const BACKEND_ORIGIN: &str = "http://127.0.0.1:5000";

/// Creates a deterministic selectable video file.
#[allow(dead_code)]
pub fn video_fixture() -> VideoFile {
    VideoFile::new("clip.mp4", "video/mp4", b"deterministic clip bytes".to_vec())
}

/// Creates the two-segment success outcome used by scenario tests.
#[allow(dead_code)]
pub fn two_segment_outcome() -> ScriptedOutcome {
    ScriptedOutcome::Segments {
        segments: vec![
            ScriptedSegment {
                video_url: "/videos/seg_0.mp4".to_string(),
                overlay_url: "/videos/seg_0_overlay.mp4".to_string(),
                duration: 125.0,
                start_frame: 0,
                end_frame: 371,
            },
            ScriptedSegment {
                video_url: "/videos/seg_1.mp4".to_string(),
                overlay_url: "/videos/seg_1_overlay.mp4".to_string(),
                duration: 59.0,
                start_frame: 420,
                end_frame: 659,
            },
        ],
        pose_data_url: Some("/data/pose.csv".to_string()),
    }
}

/// Builds an upload client bound to the given fake backend.
#[allow(dead_code)]
pub fn client_for(backend: &Arc<FakeAnalysisBackend>) -> UploadClient {
    UploadClient::new(BACKEND_ORIGIN, Arc::clone(backend) as Arc<dyn UploadTransport>)
        .expect("fixture client should build")
}
