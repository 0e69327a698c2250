#![warn(missing_docs)]
//! # style-scout-core
//!
//! ## Purpose
//! Defines the pure data model used across the `style-scout` workspace.
//!
//! ## Responsibilities
//! - Represent raw camera video frames and finalized captured images.
//! - Validate user-uploaded photo files (extension allow-list, size cap).
//! - Build renderable preview data-URIs for any captured image.
//!
//! ## Data flow
//! Camera code emits [`VideoFrame`] objects that the capture pipeline encodes
//! into a [`CapturedImage`]. Upload code builds a [`CapturedImage`] directly
//! from user-chosen file bytes. Exactly one captured image is "current" for
//! submission at any time; callers replace it wholesale.
//!
//! ## Ownership and lifetimes
//! Frames and images own their backing buffers (`Vec<u8>`) to avoid hidden
//! borrow/lifetime coupling between acquisition, preview, and submission.
//!
//! ## Error model
//! Validation failures (shape mismatch, disallowed file type, oversized
//! payload) return [`CoreError`] variants with caller-actionable
//! categorization.
//!
//! ## Security and privacy notes
//! This crate never logs image bytes. Preview data-URIs embed the full image
//! and must not be written to logs by callers.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filename used for camera-sourced submissions regardless of device.
pub const CAMERA_CAPTURE_FILENAME: &str = "camera_capture.jpg";

/// Maximum accepted image payload size (16 MiB, matching the ingest limit).
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// File extensions accepted for uploaded photos.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Represents one decoded video frame read from an active camera stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Raw RGBA pixel buffer (`width * height * 4` bytes).
    pub rgba: Vec<u8>,
}

impl VideoFrame {
    /// Constructs a validated frame.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidFrameShape`] when the pixel buffer length
    /// is not exactly `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CoreError> {
        let expected_len = required_rgba_len(width, height)?;
        if rgba.len() != expected_len {
            return Err(CoreError::InvalidFrameShape {
                expected: expected_len,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Returns `true` when the frame carries renderable pixel data.
    ///
    /// A stream that has been opened but has not delivered its first frame
    /// reports zero natural dimensions; such frames must not be captured.
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Which acquisition path produced a captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// User-chosen file from the upload picker.
    Upload,
    /// Frame captured from a live camera session.
    Camera,
}

/// Finalized image payload plus renderable preview, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Encoded image bytes (JPEG or PNG).
    pub bytes: Vec<u8>,
    /// MIME type matching `bytes`.
    pub mime: String,
    /// Filename carried in the multipart submission.
    pub filename: String,
    /// `data:` URI for immediate preview rendering.
    pub preview_data_uri: String,
    /// Acquisition path that produced this image.
    pub source: ImageSource,
}

impl CapturedImage {
    /// Builds a captured image from a user-uploaded file.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyImage`] for zero-length bytes,
    /// [`CoreError::DisallowedFileType`] for extensions outside
    /// [`ALLOWED_EXTENSIONS`], and [`CoreError::ImageTooLarge`] above
    /// [`MAX_IMAGE_BYTES`].
    pub fn from_upload(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let filename = filename.into();
        let mime = mime_for_filename(&filename)?;
        validate_image_bytes(&bytes)?;

        let preview_data_uri = image_data_uri(&mime, &bytes);
        Ok(Self {
            bytes,
            mime,
            filename,
            preview_data_uri,
            source: ImageSource::Upload,
        })
    }

    /// Builds a captured image from camera-encoded JPEG bytes.
    ///
    /// The filename is always [`CAMERA_CAPTURE_FILENAME`] so the server sees
    /// a consistent name regardless of device.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyImage`] or [`CoreError::ImageTooLarge`] for
    /// invalid byte payloads.
    pub fn from_camera_jpeg(bytes: Vec<u8>) -> Result<Self, CoreError> {
        validate_image_bytes(&bytes)?;

        let mime = "image/jpeg".to_string();
        let preview_data_uri = image_data_uri(&mime, &bytes);
        Ok(Self {
            bytes,
            mime,
            filename: CAMERA_CAPTURE_FILENAME.to_string(),
            preview_data_uri,
            source: ImageSource::Camera,
        })
    }
}

/// Builds a base64 `data:` URI for inline preview rendering.
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Maps an allowed photo filename to its MIME type.
///
/// # Errors
/// Returns [`CoreError::DisallowedFileType`] when the extension is missing or
/// outside the allow-list.
pub fn mime_for_filename(filename: &str) -> Result<String, CoreError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .ok_or_else(|| CoreError::DisallowedFileType(filename.to_string()))?;

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg".to_string()),
        "png" => Ok("image/png".to_string()),
        _ => Err(CoreError::DisallowedFileType(filename.to_string())),
    }
}

fn validate_image_bytes(bytes: &[u8]) -> Result<(), CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::EmptyImage);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::ImageTooLarge {
            limit: MAX_IMAGE_BYTES,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn required_rgba_len(width: u32, height: u32) -> Result<usize, CoreError> {
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| CoreError::FrameInvariantViolation("frame dimensions overflow".to_string()))?;

    pixels
        .checked_mul(4)
        .ok_or_else(|| CoreError::FrameInvariantViolation("rgba length overflow".to_string()))
}

/// Error type for core domain validation failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Frame buffer shape does not match declared geometry.
    #[error("invalid frame shape: expected {expected} bytes, got {actual}")]
    InvalidFrameShape {
        /// Expected RGBA byte count.
        expected: usize,
        /// Actual RGBA byte count.
        actual: usize,
    },
    /// Image byte payload is empty.
    #[error("image payload is empty")]
    EmptyImage,
    /// Image byte payload exceeds the accepted size cap.
    #[error("image payload too large: limit {limit} bytes, got {actual}")]
    ImageTooLarge {
        /// Configured byte limit.
        limit: usize,
        /// Actual byte count.
        actual: usize,
    },
    /// Uploaded file type is outside the allow-list.
    #[error("invalid file type '{0}': please upload JPG or PNG")]
    DisallowedFileType(String),
    /// Frame geometry invariants were violated.
    #[error("frame invariant violation: {0}")]
    FrameInvariantViolation(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for image validation and preview construction.

    use super::*;

    #[test]
    fn upload_accepts_allowed_extensions() {
        let image = CapturedImage::from_upload("portrait.JPG", vec![1, 2, 3])
            .expect("jpg upload should be accepted");
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!(image.source, ImageSource::Upload);
        assert!(image.preview_data_uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn upload_rejects_disallowed_extension() {
        let result = CapturedImage::from_upload("document.gif", vec![1]);
        assert!(matches!(result, Err(CoreError::DisallowedFileType(_))));
    }

    #[test]
    fn camera_capture_uses_fixed_filename() {
        let image =
            CapturedImage::from_camera_jpeg(vec![0xFF, 0xD8]).expect("camera jpeg should build");
        assert_eq!(image.filename, CAMERA_CAPTURE_FILENAME);
        assert_eq!(image.source, ImageSource::Camera);
    }

    #[test]
    fn upload_rejects_empty_payload() {
        let result = CapturedImage::from_upload("portrait.jpg", Vec::new());
        assert!(matches!(result, Err(CoreError::EmptyImage)));
    }

    #[test]
    fn upload_rejects_oversized_payload() {
        let result = CapturedImage::from_upload("portrait.jpg", vec![0; MAX_IMAGE_BYTES + 1]);
        match result {
            Err(CoreError::ImageTooLarge { limit, actual }) => {
                assert_eq!(limit, MAX_IMAGE_BYTES);
                assert_eq!(actual, MAX_IMAGE_BYTES + 1);
            }
            other => panic!("expected size rejection, got {other:?}"),
        }
    }

    #[test]
    fn upload_accepts_payload_at_size_limit() {
        let image = CapturedImage::from_upload("portrait.png", vec![0; MAX_IMAGE_BYTES])
            .expect("payload at the cap should be accepted");
        assert_eq!(image.mime, "image/png");
    }

    #[test]
    fn frame_readiness_requires_nonzero_dimensions() {
        let ready = VideoFrame::new(2, 2, vec![0; 16]).expect("frame should be valid");
        assert!(ready.is_ready());

        let blank = VideoFrame::new(0, 0, Vec::new()).expect("zero frame should be valid");
        assert!(!blank.is_ready());
    }
}
