#![warn(missing_docs)]
//! # style-scout-app
//!
//! ## Purpose
//! Orchestrates capture modes, the camera session, submission, and result
//! projection for `style-scout`.
//!
//! ## Responsibilities
//! - Own the exclusive capture-mode state machine and the optional camera
//!   session with guaranteed track release on every exit path.
//! - Hold at most one captured image per acquisition mode.
//! - Validate submission preconditions before any network activity.
//! - Route recommendation markdown through link normalization and rendering
//!   into the result view.
//!
//! ## Data flow
//! Mode selection + (file pick | camera capture) -> [`CaptureController`]
//! holds the current image -> [`submit_current`] sends it with the gender
//! selection -> [`project_analysis`] builds the render-ready view.
//!
//! ## Ownership and lifetimes
//! The controller exclusively owns the camera stream handle; no other
//! component may read or mutate it directly.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`]. Every error is recoverable
//! at the UI boundary: the controller stays usable after any failure.
//!
//! ## Security and privacy notes
//! Image bytes and preview data-URIs are never logged.

pub mod logging;

use std::sync::Arc;

use style_scout_analysis_contract::{AnalysisResult, normalize_shopping_links};
use style_scout_camera::{
    CameraBackend, CameraConstraints, CameraError, CameraSession, capture_still,
};
use style_scout_core::{CapturedImage, CoreError};
use style_scout_submit::{SubmitClient, SubmitError};
use style_scout_ui::{CaptureMode, ResultView, project_result_view};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("STYLE_SCOUT_VERSION");

/// Default analysis endpoint; override with `STYLE_SCOUT_ANALYZE_ENDPOINT`.
pub const DEFAULT_ANALYZE_ENDPOINT: &str = "https://styles.style-scout.test/api/analyze";

/// Validation message shown when Upload mode has no chosen file.
pub const NO_UPLOAD_IMAGE_MESSAGE: &str = "Please select a photo";

/// Validation message shown when Camera mode has no captured photo.
pub const NO_CAMERA_IMAGE_MESSAGE: &str = "Please capture a photo from camera";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the analysis endpoint from the environment, with default.
pub fn analyze_endpoint_from_env() -> String {
    std::env::var("STYLE_SCOUT_ANALYZE_ENDPOINT")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ANALYZE_ENDPOINT.to_string())
}

/// Owns the exclusive-choice state between Upload and Camera acquisition and
/// the camera session lifecycle (start/stop/zoom/capture).
///
/// At most one camera session and one captured image per mode exist at any
/// time by construction.
pub struct CaptureController {
    backend: Arc<dyn CameraBackend>,
    constraints: CameraConstraints,
    mode: CaptureMode,
    session: Option<CameraSession>,
    upload_image: Option<CapturedImage>,
    camera_image: Option<CapturedImage>,
}

impl CaptureController {
    /// Creates a controller in Upload mode with default camera constraints
    /// (front-facing, ideal 1280x720, 16:9).
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        Self::with_constraints(backend, CameraConstraints::default())
    }

    /// Creates a controller with caller-provided camera constraints.
    pub fn with_constraints(backend: Arc<dyn CameraBackend>, constraints: CameraConstraints) -> Self {
        Self {
            backend,
            constraints,
            mode: CaptureMode::Upload,
            session: None,
            upload_image: None,
            camera_image: None,
        }
    }

    /// Returns the active acquisition mode.
    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Returns `true` while a camera session is live.
    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the current zoom factor, when a session is live.
    pub fn zoom(&self) -> Option<f32> {
        self.session.as_ref().map(CameraSession::zoom)
    }

    /// Sets the active mode.
    ///
    /// Idempotent: selecting the already-active mode changes no state and
    /// does not touch the camera session. Switching away from Camera tears
    /// down any live session first, releasing every media track.
    pub fn select_mode(&mut self, mode: CaptureMode) {
        if mode == self.mode {
            return;
        }
        if self.mode == CaptureMode::Camera {
            self.stop_session();
        }
        self.mode = mode;
    }

    /// Starts a camera session with the configured constraints.
    ///
    /// Any previous session is released first; zoom starts at 1.0. On failure
    /// the error is categorized and no partially-initialized session remains.
    ///
    /// # Errors
    /// Propagates the backend's categorized [`CameraError`].
    pub fn start_session(&mut self) -> Result<(), CameraError> {
        self.stop_session();
        let stream = self.backend.open_stream(&self.constraints)?;
        self.session = Some(CameraSession::new(stream));
        Ok(())
    }

    /// Stops the live session, releasing every media track.
    ///
    /// Safe to call when no session is active.
    pub fn stop_session(&mut self) {
        if let Some(session) = self.session.take() {
            self.backend.release_stream(session.stream());
        }
    }

    /// Stores a clamped zoom factor and returns the applied value, which the
    /// preview rendering uses as its visual scale.
    ///
    /// # Errors
    /// Returns [`CameraError::NoActiveSession`] without a live session.
    pub fn set_zoom(&mut self, value: f32) -> Result<f32, CameraError> {
        let session = self.session.as_mut().ok_or(CameraError::NoActiveSession)?;
        Ok(session.set_zoom(value))
    }

    /// Steps zoom in by 0.5, clamped.
    ///
    /// # Errors
    /// Returns [`CameraError::NoActiveSession`] without a live session.
    pub fn zoom_in(&mut self) -> Result<f32, CameraError> {
        let session = self.session.as_mut().ok_or(CameraError::NoActiveSession)?;
        Ok(session.zoom_in())
    }

    /// Steps zoom out by 0.5, clamped.
    ///
    /// # Errors
    /// Returns [`CameraError::NoActiveSession`] without a live session.
    pub fn zoom_out(&mut self) -> Result<f32, CameraError> {
        let session = self.session.as_mut().ok_or(CameraError::NoActiveSession)?;
        Ok(session.zoom_out())
    }

    /// Captures a mirrored still from the live session.
    ///
    /// On success the session is stopped (capturing ends the live feed) and
    /// the new image replaces any prior camera capture. On failure the
    /// session stays live so the user can retry.
    ///
    /// # Errors
    /// Returns [`CameraError::NoActiveSession`] without a live session, and
    /// frame/encoding errors from the capture pipeline.
    pub fn capture_frame(&mut self) -> Result<&CapturedImage, CameraError> {
        let session = self.session.as_ref().ok_or(CameraError::NoActiveSession)?;
        let image = capture_still(self.backend.as_ref(), session)?;

        self.stop_session();
        self.camera_image = Some(image);
        Ok(self
            .camera_image
            .as_ref()
            .expect("camera image was just stored"))
    }

    /// Attaches a user-chosen upload file, replacing any prior choice.
    ///
    /// # Errors
    /// Returns [`CoreError`] for disallowed types or oversized payloads.
    pub fn attach_upload(
        &mut self,
        filename: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<&CapturedImage, CoreError> {
        let image = CapturedImage::from_upload(filename, bytes)?;
        self.upload_image = Some(image);
        Ok(self
            .upload_image
            .as_ref()
            .expect("upload image was just stored"))
    }

    /// Returns the image eligible for submission in the active mode.
    pub fn current_image(&self) -> Option<&CapturedImage> {
        match self.mode {
            CaptureMode::Upload => self.upload_image.as_ref(),
            CaptureMode::Camera => self.camera_image.as_ref(),
        }
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        self.stop_session();
    }
}

/// Submits the controller's current image with the gender selection.
///
/// # Errors
/// Returns [`AppError::Validation`] (mode-specific message, no network call)
/// when no image is available for the active mode, and categorized
/// [`AppError::Submit`] failures otherwise.
pub fn submit_current(
    controller: &CaptureController,
    client: &SubmitClient,
    gender: &str,
) -> Result<ResultView, AppError> {
    let image = controller.current_image().ok_or_else(|| {
        AppError::Validation(match controller.mode() {
            CaptureMode::Upload => NO_UPLOAD_IMAGE_MESSAGE.to_string(),
            CaptureMode::Camera => NO_CAMERA_IMAGE_MESSAGE.to_string(),
        })
    })?;

    let result = client.submit(image, gender)?;
    Ok(project_analysis(&result))
}

/// Projects one successful analysis into a render-ready view: shopping links
/// are normalized, recommendation markdown is rendered to HTML, and product
/// cards keep server order.
pub fn project_analysis(result: &AnalysisResult) -> ResultView {
    let normalized = normalize_shopping_links(&result.recommendations);
    let html = style_scout_markdown::render(&normalized);
    project_result_view(result, html)
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submission precondition failed; no network call was made.
    #[error("{0}")]
    Validation(String),
    /// Camera subsystem error.
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),
    /// Image validation error.
    #[error("image error: {0}")]
    Image(#[from] CoreError),
    /// Submission subsystem error.
    #[error("submit error: {0}")]
    Submit(#[from] SubmitError),
}
