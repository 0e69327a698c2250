#![warn(missing_docs)]
//! # style-scout-markdown
//!
//! ## Purpose
//! Converts the constrained markdown subset used by recommendation text into
//! HTML markup.
//!
//! ## Responsibilities
//! - Apply an ordered list of substitution rules (headers, emphasis, links,
//!   list items) whose ordering is a contract invariant.
//! - Wrap the first contiguous run of list items in a single list container.
//! - Wrap blank-line-separated blocks in paragraph containers.
//!
//! ## Data flow
//! Recommendation markdown from the analysis response -> [`render`] -> HTML
//! string bound into the result view.
//!
//! ## Ownership and lifetimes
//! Pure string-to-string transformation; no shared state beyond lazily
//! compiled patterns.
//!
//! ## Error model
//! Infallible by construction: unknown markdown passes through untouched.
//!
//! ## Security and privacy notes
//! No sanitization is performed beyond the substitutions themselves. The
//! rendered output is a trust boundary: when the analysis service is not
//! trusted, callers must sanitize the HTML before inserting it into a live
//! document.

use std::sync::LazyLock;

use regex::Regex;

/// Ordered substitution rules.
///
/// Ordering invariants (changing the order changes the output):
/// - Headers match longest prefix first (`###` before `##` before `#`) so a
///   level-3 header is never consumed as a level-1 header with `##` text.
/// - Strong emphasis (`**`/`__`) runs before single-delimiter emphasis
///   (`*`/`_`) so `**x**` is never misparsed as nested `<em>` markers.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (heading_rule(r"^### (.*)$"), "<h3>$1</h3>"),
        (heading_rule(r"^## (.*)$"), "<h2>$1</h2>"),
        (heading_rule(r"^# (.*)$"), "<h1>$1</h1>"),
        (inline_rule(r"\*\*(.*?)\*\*"), "<strong>$1</strong>"),
        (inline_rule(r"\*(.*?)\*"), "<em>$1</em>"),
        (inline_rule(r"__(.*?)__"), "<strong>$1</strong>"),
        (inline_rule(r"_(.*?)_"), "<em>$1</em>"),
        (
            inline_rule(r"\[(.*?)\]\((.*?)\)"),
            r#"<a href="$2" target="_blank">$1</a>"#,
        ),
        (heading_rule(r"^- (.*)$"), "<li>$1</li>"),
    ]
});

/// Matches the first maximal contiguous run of rendered list items.
static LIST_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:<li>.*?</li>)(?:\n<li>.*?</li>)*").expect("valid list-run pattern")
});

fn heading_rule(pattern: &str) -> Regex {
    Regex::new(&format!("(?m){pattern}")).expect("valid line pattern")
}

fn inline_rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid inline pattern")
}

/// Renders the supported markdown subset to HTML markup.
///
/// Supported: `#`/`##`/`###` headers, `**`/`__` strong, `*`/`_` emphasis,
/// `[label](url)` links opening in a new browsing context, and `- ` list
/// items. Only the first contiguous run of list items is wrapped in a `<ul>`
/// container; later separate runs stay unwrapped (a preserved limitation of
/// the rendering contract, not an oversight to fix).
///
/// Blank-line-separated blocks become paragraph boundaries and the whole
/// output is wrapped once in a top-level `<p>` container.
pub fn render(markdown: &str) -> String {
    let mut html = markdown.to_string();

    for (pattern, replacement) in RULES.iter() {
        html = pattern.replace_all(&html, *replacement).into_owned();
    }

    // First contiguous run only.
    html = LIST_RUN
        .replacen(&html, 1, |captures: &regex::Captures<'_>| {
            format!("<ul>{}</ul>", &captures[0])
        })
        .into_owned();

    html = html.replace("\n\n", "</p><p>");
    format!("<p>{html}</p>")
}
