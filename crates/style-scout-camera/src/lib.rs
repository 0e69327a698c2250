#![warn(missing_docs)]
//! # style-scout-camera
//!
//! ## Purpose
//! Provides camera stream acquisition, session lifecycle, and still-frame
//! capture abstractions.
//!
//! ## Responsibilities
//! - Define a backend-agnostic camera trait with preferred constraints.
//! - Model the live session (stream handle + visual zoom factor).
//! - Encode a mirrored still frame into submission-ready JPEG bytes.
//! - Expose a deterministic synthetic backend for CI and unit tests.
//!
//! ## Data flow
//! Controller opens a stream -> backend delivers [`style_scout_core::VideoFrame`]
//! values -> [`capture_still`] mirrors and encodes the current frame into a
//! [`style_scout_core::CapturedImage`].
//!
//! ## Ownership and lifetimes
//! The session exclusively owns its stream handle; releasing the session
//! releases every media track. No borrowed frame memory escapes backend
//! boundaries.
//!
//! ## Error model
//! Acquisition failures are categorized ([`CameraError::PermissionDenied`],
//! [`CameraError::DeviceNotFound`], [`CameraError::DeviceBusy`], backend
//! other) so the caller can surface a precise, recoverable message.
//!
//! ## Security and privacy notes
//! Backends must not persist raw frame bytes; captured stills exist only in
//! memory until the caller submits or discards them.

use std::sync::Mutex;

use style_scout_core::{CapturedImage, VideoFrame};
use thiserror::Error;

/// Lower zoom bound (no magnification).
pub const ZOOM_MIN: f32 = 1.0;

/// Upper zoom bound.
pub const ZOOM_MAX: f32 = 5.0;

/// Increment used by the zoom step convenience controls.
pub const ZOOM_STEP: f32 = 0.5;

/// JPEG quality used when encoding captured stills (~0.95).
pub const CAPTURE_JPEG_QUALITY: u8 = 95;

/// Which physical camera the stream should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    /// Front-facing (selfie) camera.
    User,
    /// Rear-facing camera.
    Environment,
}

/// Preferred acquisition constraints passed to the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConstraints {
    /// Preferred camera facing.
    pub facing: CameraFacing,
    /// Ideal frame width in pixels.
    pub ideal_width: u32,
    /// Ideal frame height in pixels.
    pub ideal_height: u32,
    /// Ideal aspect ratio (width over height).
    pub ideal_aspect_ratio: f32,
}

impl Default for CameraConstraints {
    /// Front-facing, ~1280x720, 16:9: the portrait-analysis defaults.
    fn default() -> Self {
        Self {
            facing: CameraFacing::User,
            ideal_width: 1280,
            ideal_height: 720,
            ideal_aspect_ratio: 16.0 / 9.0,
        }
    }
}

/// Opaque handle to an acquired media stream and its tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    /// Backend-assigned stream identity.
    pub id: u64,
    /// Number of media tracks held by this stream.
    pub track_count: usize,
}

/// Live camera session: an acquired stream plus its visual zoom factor.
///
/// The zoom is preview-scale only; it never changes optical/sensor zoom and
/// does not alter captured frame resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSession {
    stream: MediaStream,
    zoom: f32,
}

impl CameraSession {
    /// Wraps a freshly acquired stream with zoom reset to [`ZOOM_MIN`].
    pub fn new(stream: MediaStream) -> Self {
        Self {
            stream,
            zoom: ZOOM_MIN,
        }
    }

    /// Returns the owned stream handle.
    pub fn stream(&self) -> &MediaStream {
        &self.stream
    }

    /// Returns the current zoom factor.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Stores `value` clamped to `[ZOOM_MIN, ZOOM_MAX]` and returns it.
    pub fn set_zoom(&mut self, value: f32) -> f32 {
        self.zoom = clamp_zoom(value);
        self.zoom
    }

    /// Steps zoom in by [`ZOOM_STEP`], clamped.
    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    /// Steps zoom out by [`ZOOM_STEP`], clamped.
    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }
}

/// Clamps a zoom factor into the supported `[ZOOM_MIN, ZOOM_MAX]` domain.
///
/// Non-finite inputs fall back to [`ZOOM_MIN`].
pub fn clamp_zoom(value: f32) -> f32 {
    if !value.is_finite() {
        return ZOOM_MIN;
    }
    value.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Trait implemented by concrete camera providers.
pub trait CameraBackend: Send + Sync {
    /// Acquires a stream honoring `constraints` as closely as possible.
    ///
    /// # Errors
    /// Returns a categorized [`CameraError`] on acquisition failure; no
    /// partially-initialized stream may remain on the error path.
    fn open_stream(&self, constraints: &CameraConstraints) -> Result<MediaStream, CameraError>;

    /// Reads the current frame from an acquired stream.
    ///
    /// # Errors
    /// Returns [`CameraError::Backend`] when the stream is unknown or the
    /// device stopped delivering frames.
    fn read_frame(&self, stream: &MediaStream) -> Result<VideoFrame, CameraError>;

    /// Releases every media track held by `stream`. Idempotent.
    fn release_stream(&self, stream: &MediaStream);

    /// Number of media tracks currently held open by this backend.
    fn active_track_count(&self) -> usize;
}

/// Captures a still from the session's current frame.
///
/// The frame is mirrored horizontally so the photo matches the mirrored live
/// preview the user saw, then encoded as JPEG at [`CAPTURE_JPEG_QUALITY`] at
/// the frame's native resolution.
///
/// # Errors
/// Returns [`CameraError::FrameNotReady`] when the stream has not delivered a
/// frame with non-zero natural dimensions, and [`CameraError::Encode`] when
/// JPEG encoding fails.
pub fn capture_still(
    backend: &dyn CameraBackend,
    session: &CameraSession,
) -> Result<CapturedImage, CameraError> {
    let frame = backend.read_frame(session.stream())?;
    if !frame.is_ready() {
        return Err(CameraError::FrameNotReady);
    }

    let mirrored = mirror_horizontal(&frame);
    let jpeg = encode_jpeg(&mirrored)?;
    CapturedImage::from_camera_jpeg(jpeg)
        .map_err(|error| CameraError::Encode(error.to_string()))
}

/// Mirrors a frame horizontally (left-right pixel flip per row).
pub fn mirror_horizontal(frame: &VideoFrame) -> VideoFrame {
    let width = frame.width as usize;
    let mut rgba = Vec::with_capacity(frame.rgba.len());

    for row in frame.rgba.chunks_exact(width * 4) {
        for pixel in row.chunks_exact(4).rev() {
            rgba.extend_from_slice(pixel);
        }
    }

    VideoFrame {
        width: frame.width,
        height: frame.height,
        rgba,
    }
}

fn encode_jpeg(frame: &VideoFrame) -> Result<Vec<u8>, CameraError> {
    let mut rgb = Vec::with_capacity((frame.rgba.len() / 4) * 3);
    for pixel in frame.rgba.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }

    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, CAPTURE_JPEG_QUALITY)
        .encode(
            &rgb,
            frame.width,
            frame.height,
            image::ColorType::Rgb8.into(),
        )
        .map_err(|error| CameraError::Encode(error.to_string()))?;

    Ok(jpeg)
}

/// Deterministic synthetic backend for test and CI usage.
#[derive(Debug)]
pub struct SyntheticCameraBackend {
    state: Mutex<SyntheticState>,
}

#[derive(Debug)]
struct SyntheticState {
    next_stream_id: u64,
    active_tracks: usize,
    frame: VideoFrame,
    denial: Option<CameraDenial>,
}

/// Acquisition failure injected by [`SyntheticCameraBackend::with_denial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDenial {
    /// Simulates the user rejecting the permission prompt.
    PermissionDenied,
    /// Simulates a machine with no camera hardware.
    DeviceNotFound,
    /// Simulates the device being held by another application.
    DeviceBusy,
}

impl SyntheticCameraBackend {
    /// Creates a backend delivering a small deterministic frame.
    pub fn new() -> Self {
        let frame = VideoFrame::new(4, 2, default_frame_rgba())
            .expect("synthetic frame geometry is valid");
        Self::with_frame(frame)
    }

    /// Creates a backend delivering the caller-provided frame.
    pub fn with_frame(frame: VideoFrame) -> Self {
        Self {
            state: Mutex::new(SyntheticState {
                next_stream_id: 0,
                active_tracks: 0,
                frame,
                denial: None,
            }),
        }
    }

    /// Creates a backend whose `open_stream` always fails with `denial`.
    pub fn with_denial(denial: CameraDenial) -> Self {
        let backend = Self::new();
        backend
            .state
            .lock()
            .expect("synthetic state lock should work")
            .denial = Some(denial);
        backend
    }
}

impl Default for SyntheticCameraBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for SyntheticCameraBackend {
    fn open_stream(&self, _constraints: &CameraConstraints) -> Result<MediaStream, CameraError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CameraError::Backend("synthetic state lock poisoned".to_string()))?;

        if let Some(denial) = state.denial {
            return Err(match denial {
                CameraDenial::PermissionDenied => CameraError::PermissionDenied,
                CameraDenial::DeviceNotFound => CameraError::DeviceNotFound,
                CameraDenial::DeviceBusy => CameraError::DeviceBusy,
            });
        }

        state.next_stream_id += 1;
        state.active_tracks += 1;
        Ok(MediaStream {
            id: state.next_stream_id,
            track_count: 1,
        })
    }

    fn read_frame(&self, _stream: &MediaStream) -> Result<VideoFrame, CameraError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CameraError::Backend("synthetic state lock poisoned".to_string()))?;
        Ok(state.frame.clone())
    }

    fn release_stream(&self, stream: &MediaStream) {
        if let Ok(mut state) = self.state.lock() {
            state.active_tracks = state.active_tracks.saturating_sub(stream.track_count);
        }
    }

    fn active_track_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.active_tracks)
            .unwrap_or(0)
    }
}

fn default_frame_rgba() -> Vec<u8> {
    // 4x2 frame with a distinct red pixel in the top-left corner so mirror
    // tests can observe the flip.
    let mut rgba = vec![0_u8; 4 * 2 * 4];
    rgba[0] = 255;
    rgba[3] = 255;
    rgba
}

/// Camera layer error type.
#[derive(Debug, Error)]
pub enum CameraError {
    /// User or platform denied camera permission.
    #[error("camera access denied: please allow camera permission")]
    PermissionDenied,
    /// No camera device exists on this machine.
    #[error("no camera device found")]
    DeviceNotFound,
    /// Device exists but is unavailable or held by another consumer.
    #[error("camera is currently unavailable or in use")]
    DeviceBusy,
    /// Operation requires an active session but none exists.
    #[error("no active camera session")]
    NoActiveSession,
    /// Stream has not delivered a frame with non-zero dimensions yet.
    #[error("camera frame is not ready")]
    FrameNotReady,
    /// Still-frame JPEG encoding failed.
    #[error("frame encoding failed: {0}")]
    Encode(String),
    /// Uncategorized backend runtime failure.
    #[error("camera backend failure: {0}")]
    Backend(String),
}
