//! Integration tests for submission preconditions and the in-flight gate.

mod common;

use style_scout_app::{AppError, NO_CAMERA_IMAGE_MESSAGE, NO_UPLOAD_IMAGE_MESSAGE, submit_current};
use style_scout_ui::{CaptureMode, UiState};

#[test]
fn submission_gate_tests_upload_mode_without_file_makes_no_network_call() {
    let (_backend, controller) = common::synthetic_controller();
    let transport = common::RecordingTransport::replying(200, common::success_body());
    let client = common::client_with(transport.clone());

    let result = submit_current(&controller, &client, "Female");

    match result {
        Err(AppError::Validation(message)) => assert_eq!(message, NO_UPLOAD_IMAGE_MESSAGE),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn submission_gate_tests_camera_mode_without_capture_makes_no_network_call() {
    let (_backend, mut controller) = common::synthetic_controller();
    controller.select_mode(CaptureMode::Camera);

    let transport = common::RecordingTransport::replying(200, common::success_body());
    let client = common::client_with(transport.clone());

    let result = submit_current(&controller, &client, "Male");

    match result {
        Err(AppError::Validation(message)) => assert_eq!(message, NO_CAMERA_IMAGE_MESSAGE),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn submission_gate_tests_ready_image_submits_exactly_once() {
    let (_backend, mut controller) = common::synthetic_controller();
    controller
        .attach_upload("portrait.jpg", vec![0xFF, 0xD8, 0xFF])
        .expect("upload should attach");

    let transport = common::RecordingTransport::replying(200, common::success_body());
    let client = common::client_with(transport.clone());

    submit_current(&controller, &client, "Female").expect("submission should succeed");
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn submission_gate_tests_in_flight_slot_blocks_resubmission() {
    let mut state = UiState::new("v0.1.0");
    state.set_image_ready(CaptureMode::Upload, true);

    assert!(state.begin_submission());
    assert!(!state.can_submit());
    assert!(!state.begin_submission());

    state.finish_submission(false);
    assert!(state.can_submit(), "settled request re-enables submission");
}
