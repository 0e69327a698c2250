#![warn(missing_docs)]
//! # style-scout-analysis-contract
//!
//! ## Purpose
//! Defines the `/api/analyze` response schema and client-side mapping helpers.
//!
//! ## Responsibilities
//! - Parse the analysis response envelope (`success` flag plus payload or
//!   failure message).
//! - Validate mandatory success fields before they reach rendering code.
//! - Normalize shopping links in recommendation markdown to search URLs.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_analyze_response`] -> [`ServerReply`] ->
//! result-view projection in the UI layer.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON or missing mandatory fields return [`ContractError`]; a
//! well-formed `success:false` envelope is not an error but a
//! [`ServerReply::Failure`].
//!
//! ## Security and privacy notes
//! The recommendation markdown is untrusted remote content; this crate only
//! restructures it and never executes or renders it.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Failure message used when the server omits one.
pub const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred";

/// One recommended product entry, rendered in response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Optional one-line description.
    #[serde(default)]
    pub description: Option<String>,
    /// Outbound shop link.
    pub shop_link: String,
}

/// Parsed successful analysis payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Detected skin tone label.
    pub skin_tone: String,
    /// Representative CSS color string (for the swatch).
    pub average_color: String,
    /// Detected face shape label.
    pub face_shape: String,
    /// Markdown-formatted recommendation text.
    pub recommendations: String,
    /// Recommended products in server order; no reordering, no dedup.
    pub products: Vec<Product>,
}

/// Analysis reply envelope: success payload or server-reported failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerReply {
    /// `success: true` with a complete payload.
    Success(AnalysisResult),
    /// `success: false` with a human-readable message.
    Failure {
        /// Server-provided message, or [`DEFAULT_FAILURE_MESSAGE`].
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawAnalyzeResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    skin_tone: Option<String>,
    #[serde(default)]
    average_color: Option<String>,
    #[serde(default)]
    face_shape: Option<String>,
    #[serde(default)]
    recommendations: Option<String>,
    #[serde(default)]
    products: Vec<Product>,
}

/// Parses raw JSON into a validated analysis reply.
///
/// # Errors
/// Returns [`ContractError::Decode`] for invalid JSON and
/// [`ContractError::InvalidContract`] when a success envelope is missing
/// mandatory fields.
pub fn parse_analyze_response(raw: &str) -> Result<ServerReply, ContractError> {
    let parsed: RawAnalyzeResponse = serde_json::from_str(raw).map_err(ContractError::Decode)?;

    if !parsed.success {
        return Ok(ServerReply::Failure {
            message: parsed
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        });
    }

    Ok(ServerReply::Success(AnalysisResult {
        skin_tone: mandatory_field(parsed.skin_tone, "skin_tone")?,
        average_color: mandatory_field(parsed.average_color, "average_color")?,
        face_shape: mandatory_field(parsed.face_shape, "face_shape")?,
        recommendations: mandatory_field(parsed.recommendations, "recommendations")?,
        products: parsed.products,
    }))
}

fn mandatory_field(value: Option<String>, field: &str) -> Result<String, ContractError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ContractError::InvalidContract(format!("{field} is missing or empty")))
}

static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\)]+)\)").expect("valid markdown link pattern")
});

/// Rewrites known shopping-platform links in recommendation markdown into
/// valid search URLs, using the link label as the search query.
///
/// Links to unknown hosts (and unparseable URLs) pass through untouched.
pub fn normalize_shopping_links(markdown: &str) -> String {
    MARKDOWN_LINK
        .replace_all(markdown, |captures: &Captures<'_>| {
            let label = &captures[1];
            let original = &captures[0];

            let Ok(parsed) = Url::parse(&captures[2]) else {
                return original.to_string();
            };
            let Some(host) = parsed.host_str().map(str::to_ascii_lowercase) else {
                return original.to_string();
            };

            let query: String =
                url::form_urlencoded::byte_serialize(label.trim().as_bytes()).collect();

            if host.contains("amazon.in") {
                format!("[{label}](https://www.amazon.in/s?k={query})")
            } else if host.contains("myntra.com") {
                format!("[{label}](https://www.myntra.com/search?query={query})")
            } else if host.contains("zara.com") {
                format!("[{label}](https://www.zara.com/in/en/search?searchTerm={query})")
            } else {
                original.to_string()
            }
        })
        .into_owned()
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum ContractError {
    /// JSON decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Parsed payload violates contract invariants.
    #[error("analysis contract violation: {0}")]
    InvalidContract(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for envelope parsing and link normalization.

    use super::*;

    #[test]
    fn failure_envelope_uses_default_message_when_blank() {
        let reply =
            parse_analyze_response(r#"{"success":false,"message":"  "}"#).expect("should parse");
        assert_eq!(
            reply,
            ServerReply::Failure {
                message: DEFAULT_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn success_envelope_requires_mandatory_fields() {
        let result = parse_analyze_response(r#"{"success":true,"skin_tone":"Fair"}"#);
        assert!(matches!(result, Err(ContractError::InvalidContract(_))));
    }

    #[test]
    fn normalizes_known_platform_links() {
        let markdown = "[Royal Blue Shirt](https://www.amazon.in/dp/B0XYZ)";
        assert_eq!(
            normalize_shopping_links(markdown),
            "[Royal Blue Shirt](https://www.amazon.in/s?k=Royal+Blue+Shirt)"
        );
    }

    #[test]
    fn leaves_unknown_hosts_untouched() {
        let markdown = "[guide](https://example.com/styles)";
        assert_eq!(normalize_shopping_links(markdown), markdown);
    }
}
