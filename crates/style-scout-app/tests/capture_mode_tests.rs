//! Integration tests for exclusive capture-mode switching.

mod common;

use style_scout_camera::CameraBackend;
use style_scout_ui::CaptureMode;

#[test]
fn capture_mode_tests_selecting_active_mode_is_idempotent() {
    let (backend, mut controller) = common::synthetic_controller();

    controller.select_mode(CaptureMode::Camera);
    controller.start_session().expect("session should start");
    let zoom_before = controller.zoom();

    controller.select_mode(CaptureMode::Camera);

    assert_eq!(controller.mode(), CaptureMode::Camera);
    assert!(controller.session_active(), "session must survive a no-op reselect");
    assert_eq!(controller.zoom(), zoom_before);
    assert_eq!(backend.active_track_count(), 1);
}

#[test]
fn capture_mode_tests_leaving_camera_releases_every_track() {
    let (backend, mut controller) = common::synthetic_controller();

    controller.select_mode(CaptureMode::Camera);
    controller.start_session().expect("session should start");
    assert_eq!(backend.active_track_count(), 1);

    controller.select_mode(CaptureMode::Upload);

    assert_eq!(controller.mode(), CaptureMode::Upload);
    assert!(!controller.session_active());
    assert_eq!(backend.active_track_count(), 0);
}

#[test]
fn capture_mode_tests_switching_to_camera_keeps_upload_image() {
    let (_backend, mut controller) = common::synthetic_controller();

    controller
        .attach_upload("portrait.png", vec![1, 2, 3])
        .expect("upload should attach");
    controller.select_mode(CaptureMode::Camera);

    assert!(controller.current_image().is_none(), "camera mode has no capture yet");

    controller.select_mode(CaptureMode::Upload);
    assert!(controller.current_image().is_some(), "upload image must persist");
}
