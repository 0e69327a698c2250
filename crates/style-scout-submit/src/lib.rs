#![warn(missing_docs)]
//! # style-scout-submit
//!
//! ## Purpose
//! Assembles and executes the one-shot analysis submission.
//!
//! ## Responsibilities
//! - Validate the analysis endpoint policy (HTTPS, `/api/analyze` path).
//! - Encode the captured image plus gender selection as one multipart body.
//! - Execute the request through an injectable transport abstraction.
//! - Classify failures so the UI can distinguish retriable from permanent.
//!
//! ## Data flow
//! [`style_scout_core::CapturedImage`] + gender -> [`SubmitClient::submit`]
//! sends through [`SubmitTransport`] -> parsed
//! [`style_scout_analysis_contract::AnalysisResult`] or categorized
//! [`SubmitError`].
//!
//! ## Ownership and lifetimes
//! Request bodies are owned buffers; nothing borrows from the caller beyond
//! the duration of one `submit` call.
//!
//! ## Error model
//! Network failures, non-success statuses, malformed responses, and
//! server-reported logical failures are distinct [`SubmitError`] variants.
//! All of them leave the client reusable for the next attempt.
//!
//! ## Security and privacy notes
//! Image bytes are never logged; only their hex digest is exposed for
//! traceability.

use std::sync::Arc;

use rand::Rng as _;
use sha2::{Digest, Sha256};
use style_scout_analysis_contract::{
    AnalysisResult, ContractError, ServerReply, parse_analyze_response,
};
use style_scout_core::CapturedImage;
use thiserror::Error;
use url::Url;

/// Required analysis path suffix for v1.
pub const REQUIRED_ANALYZE_PATH: &str = "/api/analyze";

/// Multipart field name carrying the image bytes.
pub const FILE_FIELD: &str = "file";

/// Multipart field name carrying the gender selection.
pub const GENDER_FIELD: &str = "gender";

/// One fully-encoded analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// `multipart/form-data` content type including the boundary.
    pub content_type: String,
    /// Encoded multipart body bytes.
    pub body: Vec<u8>,
    /// Hex sha256 digest of the raw image bytes, for traceability.
    pub content_digest: String,
}

/// Raw reply handed back by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body as UTF-8 text.
    pub body: String,
}

/// Abstract transport used by the submit client.
pub trait SubmitTransport: Send + Sync {
    /// Sends one POST to `endpoint` and returns the raw reply.
    ///
    /// # Errors
    /// Returns [`SubmitError::Network`] when the request never produced a
    /// server response.
    fn send(&self, endpoint: &str, request: &AnalysisRequest)
    -> Result<TransportReply, SubmitError>;
}

/// Submit client that validates endpoint policy and executes the analysis
/// request. At most one request should be in flight per client; callers gate
/// re-submission until the previous call settles.
#[derive(Clone)]
pub struct SubmitClient {
    endpoint: String,
    transport: Arc<dyn SubmitTransport>,
}

impl SubmitClient {
    /// Creates a validated submit client.
    ///
    /// # Errors
    /// Returns [`SubmitError::InvalidEndpoint`] when the URL is not HTTPS or
    /// does not end with [`REQUIRED_ANALYZE_PATH`].
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn SubmitTransport>,
    ) -> Result<Self, SubmitError> {
        let endpoint = endpoint.into();
        validate_analyze_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Returns the configured analysis endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submits one image plus gender selection and parses the reply.
    ///
    /// # Errors
    /// - [`SubmitError::Network`] when the transport fails outright.
    /// - [`SubmitError::Status`] for non-2xx replies (the server's failure
    ///   message is recovered from the body when present).
    /// - [`SubmitError::Malformed`] when a 2xx body violates the contract.
    /// - [`SubmitError::ServerRejected`] for well-formed `success:false`.
    pub fn submit(
        &self,
        image: &CapturedImage,
        gender: &str,
    ) -> Result<AnalysisResult, SubmitError> {
        let request = build_analysis_request(image, gender);
        let reply = self.transport.send(&self.endpoint, &request)?;

        if !(200..300).contains(&reply.status) {
            return Err(SubmitError::Status {
                status: reply.status,
                message: failure_message_from_body(&reply.body),
            });
        }

        match parse_analyze_response(&reply.body) {
            Ok(ServerReply::Success(result)) => Ok(result),
            Ok(ServerReply::Failure { message }) => Err(SubmitError::ServerRejected(message)),
            Err(error) => Err(SubmitError::Malformed(error.to_string())),
        }
    }
}

/// Builds the multipart request for one image + gender pair.
///
/// The image field is always named [`FILE_FIELD`] and carries the image's own
/// filename (`camera_capture.jpg` for camera-sourced images), so the server
/// sees a consistent shape regardless of acquisition mode.
pub fn build_analysis_request(image: &CapturedImage, gender: &str) -> AnalysisRequest {
    let boundary = random_boundary();
    let mut body = Vec::with_capacity(image.bytes.len() + 512);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{FILE_FIELD}\"; filename=\"{}\"\r\n",
            image.filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.mime).as_bytes());
    body.extend_from_slice(&image.bytes);
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{GENDER_FIELD}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(gender.as_bytes());
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    AnalysisRequest {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body,
        content_digest: content_digest(&image.bytes),
    }
}

/// Hex sha256 digest of the raw image bytes. Stable for identical inputs, so
/// it doubles as a trace key for one logical submission.
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Validates v1 analysis endpoint constraints.
///
/// # Errors
/// Returns [`SubmitError::InvalidEndpoint`] for non-HTTPS or path mismatch.
pub fn validate_analyze_endpoint(endpoint: &str) -> Result<(), SubmitError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| SubmitError::InvalidEndpoint(format!("invalid analyze url: {error}")))?;

    if parsed.scheme() != "https" {
        return Err(SubmitError::InvalidEndpoint(
            "analyze endpoint must use https".to_string(),
        ));
    }

    if !parsed.path().ends_with(REQUIRED_ANALYZE_PATH) {
        return Err(SubmitError::InvalidEndpoint(format!(
            "analyze endpoint path must end with {REQUIRED_ANALYZE_PATH}"
        )));
    }

    Ok(())
}

fn random_boundary() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..24)
        .map(|_| rng.sample(rand::distr::Alphanumeric) as char)
        .collect();
    format!("style-scout-{suffix}")
}

fn failure_message_from_body(body: &str) -> String {
    match parse_analyze_response(body) {
        Ok(ServerReply::Failure { message }) => message,
        _ => "Server error. Please try again.".to_string(),
    }
}

/// Coarse classification used by callers deciding whether a retry makes
/// sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Transient; retrying the identical submission may succeed.
    Retriable,
    /// Permanent; retrying without changing the input will fail again.
    Permanent,
}

/// Classifies a submit failure as transient or permanent.
pub fn classify_submit_error(error: &SubmitError) -> FailureClass {
    match error {
        SubmitError::Network(_) => FailureClass::Retriable,
        SubmitError::Status { status, .. } if *status >= 500 => FailureClass::Retriable,
        SubmitError::Status { .. }
        | SubmitError::InvalidEndpoint(_)
        | SubmitError::Malformed(_)
        | SubmitError::ServerRejected(_) => FailureClass::Permanent,
    }
}

/// Errors produced by submission assembly and execution.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Endpoint violates security or contract requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Request never produced a server response.
    #[error("network failure: {0}")]
    Network(String),
    /// Server replied with a non-success status.
    #[error("analysis request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable failure message.
        message: String,
    },
    /// Server replied 2xx but the body violated the contract.
    #[error("malformed analysis response: {0}")]
    Malformed(String),
    /// Server reported a logical failure (`success: false`).
    #[error("{0}")]
    ServerRejected(String),
}

impl From<ContractError> for SubmitError {
    fn from(error: ContractError) -> Self {
        SubmitError::Malformed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for endpoint policy and multipart assembly.

    use super::*;

    fn fixture_image() -> CapturedImage {
        CapturedImage::from_camera_jpeg(vec![0xFF, 0xD8, 0xFF]).expect("fixture should build")
    }

    #[test]
    fn validates_expected_endpoint_policy() {
        validate_analyze_endpoint("https://styles.example.test/api/analyze")
            .expect("endpoint should pass");
        assert!(validate_analyze_endpoint("http://styles.example.test/api/analyze").is_err());
        assert!(validate_analyze_endpoint("https://styles.example.test/api/other").is_err());
    }

    #[test]
    fn multipart_body_carries_both_fields() {
        let request = build_analysis_request(&fixture_image(), "Female");
        let body = String::from_utf8_lossy(&request.body);

        assert!(body.contains("name=\"file\"; filename=\"camera_capture.jpg\""));
        assert!(body.contains("Content-Type: image/jpeg"));
        assert!(body.contains("name=\"gender\"\r\n\r\nFemale"));
        assert!(request.content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn digest_is_stable_for_identical_images() {
        let a = build_analysis_request(&fixture_image(), "Female");
        let b = build_analysis_request(&fixture_image(), "Male");
        assert_eq!(a.content_digest, b.content_digest);
    }

    #[test]
    fn classification_distinguishes_transient_and_permanent() {
        assert_eq!(
            classify_submit_error(&SubmitError::Network("timeout".to_string())),
            FailureClass::Retriable
        );
        assert_eq!(
            classify_submit_error(&SubmitError::Status {
                status: 503,
                message: "unavailable".to_string()
            }),
            FailureClass::Retriable
        );
        assert_eq!(
            classify_submit_error(&SubmitError::Status {
                status: 400,
                message: "bad".to_string()
            }),
            FailureClass::Permanent
        );
    }
}
