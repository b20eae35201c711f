#![warn(missing_docs)]
//! # gait-lens-app binary
//!
//! Console demo for the upload-and-result workflow. Runs the full session
//! state machine against the in-memory fake backend and prints the rendered
//! presentation surfaces.

use std::path::Path;
use std::sync::Arc;

use gait_lens_app::{AppError, app_version, mime_type_for_path, project_runtime_status, render_session};
use gait_lens_core::VideoFile;
use gait_lens_fake_backend::{FakeAnalysisBackend, ScriptedOutcome, ScriptedSegment};
use gait_lens_session::UploadSession;
use gait_lens_transport::{UploadClient, UploadTransport, content_digest};
use gait_lens_ui::ResultsView;

const DEMO_BACKEND_ORIGIN: &str = "http://127.0.0.1:5000";

fn main() {
    if let Err(error) = run() {
        eprintln!("gait-lens demo failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    println!("gait-lens-app {}", app_version());

    let file = match std::env::args().nth(1) {
        Some(path) => {
            let path = Path::new(&path);
            let bytes = std::fs::read(path)?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "upload.bin".to_string());
            VideoFile::new(name, mime_type_for_path(path), bytes)
        }
        None => VideoFile::new("clip.mp4", "video/mp4", b"demo video bytes".to_vec()),
    };
    let job_key = content_digest(&file.bytes);

    let backend = Arc::new(FakeAnalysisBackend::new(ScriptedOutcome::Segments {
        segments: vec![
            ScriptedSegment {
                video_url: "/videos/seg_0.mp4".to_string(),
                overlay_url: "/videos/seg_0_overlay.mp4".to_string(),
                duration: 12.4,
                start_frame: 0,
                end_frame: 371,
            },
            ScriptedSegment {
                video_url: "/videos/seg_1.mp4".to_string(),
                overlay_url: "/videos/seg_1_overlay.mp4".to_string(),
                duration: 8.0,
                start_frame: 420,
                end_frame: 659,
            },
        ],
        pose_data_url: Some("/data/pose.csv".to_string()),
    }));
    let client = UploadClient::new(
        DEMO_BACKEND_ORIGIN,
        Arc::clone(&backend) as Arc<dyn UploadTransport>,
    )?;

    let mut session = UploadSession::new();
    session.select_file(file)?;

    let status = project_runtime_status(&session);
    println!(
        "selected: {} (status={})",
        status.file_label.as_deref().unwrap_or("none"),
        status.status
    );

    session.submit(&client)?;

    let status = project_runtime_status(&session);
    println!("upload finished: status={}", status.status);
    if let Some(phase) = backend.job_phase(&job_key) {
        println!("backend job {job_key}: {phase:?}");
    }

    let (banner, results) = render_session(&session);
    if let Some(banner) = banner {
        println!("banner: {}", banner.headline());
    }

    match results {
        None => println!("no results to display"),
        Some(ResultsView::Frames {
            frame_indices,
            spliced_download,
        }) => {
            println!("frames with one person: {frame_indices:?}");
            if let Some(download) = spliced_download {
                println!("  {} -> {}", download.label, download.href);
            }
        }
        Some(ResultsView::Segments {
            cards,
            pose_data_download,
        }) => {
            for card in cards {
                println!(
                    "{} | {} | {}",
                    card.heading, card.duration_label, card.frame_range_label
                );
                println!("  {} -> {}", card.original.label, card.original.href);
                println!("  {} -> {}", card.overlay.label, card.overlay.href);
            }
            if let Some(download) = pose_data_download {
                println!("{} -> {}", download.label, download.href);
            }
        }
    }

    Ok(())
}
