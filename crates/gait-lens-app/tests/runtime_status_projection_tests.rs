//! Runtime status projection for the shell: one flat snapshot per phase.

mod common;

use std::sync::Arc;

use gait_lens_app::project_runtime_status;
use gait_lens_core::VideoFile;
use gait_lens_fake_backend::{FakeAnalysisBackend, ScriptedOutcome};
use gait_lens_session::UploadSession;

#[test]
fn runtime_status_projection_tests_idle_snapshot_is_empty() {
    let session = UploadSession::new();
    let status = project_runtime_status(&session);

    assert_eq!(status.status, "Idle");
    assert_eq!(status.progress_percent, None);
    assert_eq!(status.error, None);
    assert_eq!(status.result_variant, None);
    assert_eq!(status.file_label, None);
}

#[test]
fn runtime_status_projection_tests_selected_snapshot_labels_the_file() {
    let mut session = UploadSession::new();
    // 2 MiB of content so the label is a round megabyte figure.
    session
        .select_file(VideoFile::new(
            "walk.mp4",
            "video/mp4",
            vec![0; 2 * 1024 * 1024],
        ))
        .expect("selection should succeed");

    let status = project_runtime_status(&session);
    assert_eq!(status.status, "Selected");
    assert_eq!(status.file_label.as_deref(), Some("walk.mp4 (2.00 MB)"));
    assert_eq!(status.result_variant, None);
}

#[test]
fn runtime_status_projection_tests_completed_snapshot_names_the_variant() {
    let backend = Arc::new(FakeAnalysisBackend::new(common::two_segment_outcome()));
    let client = common::client_for(&backend);
    let mut session = UploadSession::new();

    session
        .select_file(common::video_fixture())
        .expect("selection should succeed");
    session.submit(&client).expect("submit should run");

    let status = project_runtime_status(&session);
    assert_eq!(status.status, "Completed");
    assert_eq!(status.progress_percent, Some(100));
    assert_eq!(status.result_variant, Some("segment_list"));
    assert_eq!(status.error, None);
}

#[test]
fn runtime_status_projection_tests_failed_snapshot_carries_the_message() {
    let backend = Arc::new(FakeAnalysisBackend::new(ScriptedOutcome::ServerError {
        status: 500,
        message: Some("decode failed".to_string()),
    }));
    let client = common::client_for(&backend);
    let mut session = UploadSession::new();

    session
        .select_file(common::video_fixture())
        .expect("selection should succeed");
    session.submit(&client).expect("submit should run");

    let status = project_runtime_status(&session);
    assert_eq!(status.status, "Failed");
    assert_eq!(status.error.as_deref(), Some("decode failed"));
    assert_eq!(status.result_variant, None);
    assert_eq!(status.progress_percent, None);
}
