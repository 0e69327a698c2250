#![warn(missing_docs)]
//! # style-scout-ui
//!
//! ## Purpose
//! Defines the UI-facing runtime state model for `style-scout`.
//!
//! ## Responsibilities
//! - Represent the exclusive capture mode, per-mode image readiness, and the
//!   single-in-flight submission gate.
//! - Carry dismissible alert messages for every recoverable failure.
//! - Project a successful analysis into a render-ready result view.
//!
//! ## Data flow
//! Controller events mutate [`UiState`], which drives rendered affordances;
//! successful submissions are projected through [`project_result_view`].
//!
//! ## Ownership and lifetimes
//! `UiState` owns all string/status values to simplify event reducers.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Invalid
//! combinations are prevented by guard methods.
//!
//! ## Security and privacy notes
//! UI state intentionally excludes image bytes and preview data-URIs.

use style_scout_analysis_contract::AnalysisResult;

/// Which of the two mutually-exclusive acquisition modes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Photo chosen through the file picker.
    #[default]
    Upload,
    /// Photo captured from the live camera feed.
    Camera,
}

/// Generic stage status used for the camera and submission flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// Stage has not started.
    Idle,
    /// Stage is currently running.
    Running,
    /// Stage completed successfully.
    Healthy,
    /// Stage encountered a non-fatal error.
    Degraded,
}

/// Visual severity of an alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Confirmation of a completed action.
    Success,
    /// Recoverable failure requiring user attention.
    Danger,
}

/// One dismissible alert message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Banner severity.
    pub kind: AlertKind,
    /// Human-readable message text.
    pub message: String,
}

/// Aggregate UI runtime state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Active acquisition mode.
    pub mode: CaptureMode,
    /// Whether an upload-sourced image is ready for submission.
    pub upload_ready: bool,
    /// Whether a camera-sourced image is ready for submission.
    pub camera_ready: bool,
    /// Whether a submission is currently in flight.
    pub submit_in_flight: bool,
    /// Camera pipeline stage status.
    pub camera_stage: StageStatus,
    /// Submission stage status.
    pub submit_stage: StageStatus,
    /// Currently displayed alert, when any.
    pub alert: Option<Alert>,
}

impl UiState {
    /// Creates default UI state in Upload mode.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            mode: CaptureMode::Upload,
            upload_ready: false,
            camera_ready: false,
            submit_in_flight: false,
            camera_stage: StageStatus::Idle,
            submit_stage: StageStatus::Idle,
            alert: None,
        }
    }

    /// Sets the active acquisition mode.
    pub fn select_mode(&mut self, mode: CaptureMode) {
        self.mode = mode;
    }

    /// Records image readiness for one mode.
    pub fn set_image_ready(&mut self, mode: CaptureMode, ready: bool) {
        match mode {
            CaptureMode::Upload => self.upload_ready = ready,
            CaptureMode::Camera => self.camera_ready = ready,
        }
    }

    /// Returns `true` when an image is ready for the active mode.
    pub fn image_ready(&self) -> bool {
        match self.mode {
            CaptureMode::Upload => self.upload_ready,
            CaptureMode::Camera => self.camera_ready,
        }
    }

    /// Returns `true` when the user may submit for analysis.
    pub fn can_submit(&self) -> bool {
        self.image_ready() && !self.submit_in_flight
    }

    /// Claims the single in-flight submission slot.
    ///
    /// Returns `false` (and changes nothing) when submission is not currently
    /// permitted, so callers cannot double-submit.
    pub fn begin_submission(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.submit_in_flight = true;
        self.submit_stage = StageStatus::Running;
        true
    }

    /// Releases the in-flight slot after the request settled.
    pub fn finish_submission(&mut self, success: bool) {
        self.submit_in_flight = false;
        self.submit_stage = if success {
            StageStatus::Healthy
        } else {
            StageStatus::Degraded
        };
    }

    /// Marks the camera stage running when a session starts.
    pub fn camera_session_started(&mut self) {
        self.camera_stage = StageStatus::Running;
    }

    /// Records the camera session outcome once it stops. A session that
    /// delivered a capture is healthy; a denied or failed one is degraded.
    pub fn camera_session_finished(&mut self, success: bool) {
        self.camera_stage = if success {
            StageStatus::Healthy
        } else {
            StageStatus::Degraded
        };
    }

    /// Replaces the current alert.
    pub fn show_alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind,
            message: message.into(),
        });
    }

    /// Dismisses the current alert, if any.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

/// One product card, rendered in response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Product display name.
    pub name: String,
    /// Optional description (empty string when the server omits it).
    pub description: String,
    /// Outbound shop link.
    pub shop_link: String,
}

/// Render-ready projection of one successful analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Detected skin tone label.
    pub skin_tone: String,
    /// CSS color string for the swatch element.
    pub swatch_color: String,
    /// Detected face shape label.
    pub face_shape: String,
    /// Recommendation text already converted to HTML markup.
    pub recommendations_html: String,
    /// Product cards in server order; no reordering, no dedup.
    pub products: Vec<ProductCard>,
}

/// Projects an analysis result plus pre-rendered recommendation HTML into the
/// result view. Product order is preserved exactly.
pub fn project_result_view(result: &AnalysisResult, recommendations_html: String) -> ResultView {
    ResultView {
        skin_tone: result.skin_tone.clone(),
        swatch_color: result.average_color.clone(),
        face_shape: result.face_shape.clone(),
        recommendations_html,
        products: result
            .products
            .iter()
            .map(|product| ProductCard {
                name: product.name.clone(),
                description: product.description.clone().unwrap_or_default(),
                shop_link: product.shop_link.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the submission gate.

    use super::*;

    #[test]
    fn submission_gate_requires_image_for_active_mode() {
        let mut state = UiState::new("v0.1.0");
        assert!(!state.can_submit());

        state.set_image_ready(CaptureMode::Camera, true);
        assert!(!state.can_submit(), "camera image must not satisfy upload mode");

        state.select_mode(CaptureMode::Camera);
        assert!(state.can_submit());
    }

    #[test]
    fn begin_submission_claims_single_slot() {
        let mut state = UiState::new("v0.1.0");
        state.set_image_ready(CaptureMode::Upload, true);

        assert!(state.begin_submission());
        assert!(!state.begin_submission(), "second submit must be blocked");

        state.finish_submission(true);
        assert!(state.can_submit());
        assert_eq!(state.submit_stage, StageStatus::Healthy);
    }

    #[test]
    fn camera_stage_follows_session_lifecycle() {
        let mut state = UiState::new("v0.1.0");
        assert_eq!(state.camera_stage, StageStatus::Idle);

        state.camera_session_started();
        assert_eq!(state.camera_stage, StageStatus::Running);

        state.camera_session_finished(true);
        assert_eq!(state.camera_stage, StageStatus::Healthy);

        state.camera_session_started();
        state.camera_session_finished(false);
        assert_eq!(state.camera_stage, StageStatus::Degraded);
    }

    #[test]
    fn alerts_show_and_dismiss() {
        let mut state = UiState::new("v0.1.0");
        assert!(state.alert.is_none());

        state.show_alert(AlertKind::Danger, "camera access denied");
        assert_eq!(
            state.alert,
            Some(Alert {
                kind: AlertKind::Danger,
                message: "camera access denied".to_string()
            })
        );

        state.show_alert(AlertKind::Success, "photo captured");
        assert_eq!(
            state.alert.as_ref().map(|alert| alert.kind),
            Some(AlertKind::Success),
            "a new alert replaces the current one"
        );

        state.dismiss_alert();
        assert!(state.alert.is_none());
    }
}
