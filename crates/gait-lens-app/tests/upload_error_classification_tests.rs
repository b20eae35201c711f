//! Failure classification through a full session submit: server errors,
//! unreachable backends, and malformed success bodies.

mod common;

use std::sync::Arc;

use gait_lens_app::render_session;
use gait_lens_fake_backend::{FakeAnalysisBackend, JobPhase, ScriptedOutcome};
use gait_lens_session::{SessionStatus, SubmitDisposition, UploadSession};
use gait_lens_transport::{
    GENERIC_UPLOAD_FAILURE, ProgressSink, TransportFailure, TransportResponse, UploadEnvelope,
    UploadTransport, content_digest,
};
use gait_lens_ui::StatusBanner;

/// Transport that always answers 200 with a fixed body.
struct FixedBodyTransport {
    body: &'static str,
}

impl UploadTransport for FixedBodyTransport {
    fn send(
        &self,
        _envelope: &UploadEnvelope,
        _progress: &mut dyn ProgressSink,
    ) -> Result<TransportResponse, TransportFailure> {
        Ok(TransportResponse {
            status: 200,
            body: self.body.to_string(),
        })
    }
}

#[test]
fn upload_error_classification_tests_server_message_reaches_the_banner() {
    let backend = Arc::new(FakeAnalysisBackend::new(ScriptedOutcome::ServerError {
        status: 500,
        message: Some("decode failed".to_string()),
    }));
    let client = common::client_for(&backend);
    let mut session = UploadSession::new();

    let file = common::video_fixture();
    let job_key = content_digest(&file.bytes);
    session.select_file(file).expect("selection should succeed");

    let disposition = session.submit(&client).expect("submit should run");
    assert_eq!(disposition, SubmitDisposition::Failed);
    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.error_message(), Some("decode failed"));
    assert_eq!(backend.job_phase(&job_key), Some(JobPhase::Failed));

    let (banner, results) = render_session(&session);
    assert_eq!(
        banner,
        Some(StatusBanner::Failed {
            message: "decode failed".to_string()
        })
    );
    assert!(results.is_none());
}

#[test]
fn upload_error_classification_tests_blank_server_message_falls_back_to_generic() {
    let backend = Arc::new(FakeAnalysisBackend::new(ScriptedOutcome::ServerError {
        status: 400,
        message: None,
    }));
    let client = common::client_for(&backend);
    let mut session = UploadSession::new();

    session
        .select_file(common::video_fixture())
        .expect("selection should succeed");
    session.submit(&client).expect("submit should run");

    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.error_message(), Some(GENERIC_UPLOAD_FAILURE));
}

#[test]
fn upload_error_classification_tests_unreachable_backend_uses_generic_message() {
    let backend = Arc::new(FakeAnalysisBackend::new(ScriptedOutcome::Unreachable));
    let client = common::client_for(&backend);
    let mut session = UploadSession::new();

    let file = common::video_fixture();
    let job_key = content_digest(&file.bytes);
    session.select_file(file).expect("selection should succeed");
    session.submit(&client).expect("submit should run");

    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.error_message(), Some(GENERIC_UPLOAD_FAILURE));
    // No response means no job record was created either.
    assert_eq!(backend.job_phase(&job_key), None);
}

#[test]
fn upload_error_classification_tests_malformed_success_body_fails_gracefully() {
    let transport = Arc::new(FixedBodyTransport {
        body: r#"{"status":"done","job":7}"#,
    });
    let client = gait_lens_transport::UploadClient::new(common::BACKEND_ORIGIN, transport)
        .expect("client should build");
    let mut session = UploadSession::new();

    session
        .select_file(common::video_fixture())
        .expect("selection should succeed");
    let disposition = session.submit(&client).expect("submit should run");

    assert_eq!(disposition, SubmitDisposition::Failed);
    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.error_message(), Some(GENERIC_UPLOAD_FAILURE));
    assert!(session.result().is_none());
}
