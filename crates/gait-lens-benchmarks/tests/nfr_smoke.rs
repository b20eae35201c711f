//! Benchmark smoke test for the deterministic envelope/parse loop.

use std::time::Instant;

use gait_lens_contract::parse_analysis_response;
use gait_lens_core::VideoFile;
use gait_lens_transport::{build_multipart_body, content_digest};
use url::Url;

#[test]
fn benchmark_upload_path_smoke_prints_latency() {
    let file = VideoFile::new("clip.mp4", "video/mp4", vec![0xA5; 256 * 1024]);
    let base = Url::parse("http://127.0.0.1:5000").expect("base should parse");
    let response = r#"{
        "segments": [
            {"video_url": "/videos/seg_0.mp4", "overlay_url": "/videos/seg_0_overlay.mp4",
             "duration": 125.0, "start_frame": 0, "end_frame": 371},
            {"video_url": "/videos/seg_1.mp4", "overlay_url": "/videos/seg_1_overlay.mp4",
             "duration": 59.0, "start_frame": 420, "end_frame": 659}
        ],
        "pose_data_url": "/data/pose.csv"
    }"#;

    let start = Instant::now();
    let mut body_bytes = 0usize;
    let mut digest_lengths = 0usize;

    for _ in 0..100 {
        body_bytes += build_multipart_body(&file, "bench-boundary").len();
        digest_lengths += content_digest(&file.bytes).len();
        let result =
            parse_analysis_response(response, &base).expect("response should normalize");
        assert_eq!(result.variant_name(), "segment_list");
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_upload_path_elapsed_ms={elapsed_ms}");
    println!("benchmark_multipart_body_total_bytes={body_bytes}");
    println!("benchmark_digest_total_len={digest_lengths}");

    // This is a lightweight guardrail; strict NFR checks are environment-specific.
    assert!(
        elapsed_ms < 5_000,
        "upload path smoke benchmark should stay bounded"
    );
}
