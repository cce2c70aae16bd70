//! Splits the model's free-form output into per-platform sections.
//!
//! The model is asked to emit one header per platform ("LinkedIn:",
//! "Twitter:", "WhatsApp:") but the output is not guaranteed to honor that:
//! casing varies, headers come wrapped in markdown, a colon may be missing,
//! and whole sections can be absent or reordered. A header counts only at
//! the start of a line, either followed by a colon or standing alone as a
//! heading, so a platform name restated inside body prose is never treated
//! as a section boundary. Absence and reordering are normal outcomes, not
//! faults; callers keep the raw text around for fallback display.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ParseResult, Platform, PlatformPost};

static LINKEDIN_MARKER: Lazy<Regex> = Lazy::new(|| marker_regex("LinkedIn"));
static TWITTER_MARKER: Lazy<Regex> = Lazy::new(|| marker_regex("Twitter"));
static WHATSAPP_MARKER: Lazy<Regex> = Lazy::new(|| marker_regex("WhatsApp"));

fn marker_regex(label: &str) -> Regex {
    // Line-anchored header: optional markdown heading markers and bold or
    // italic wrapping, the label as a whole word, then either a colon or
    // end of line. A bare label mid-sentence does not match.
    let pattern = format!(
        r"(?mi)^[ \t]*(?:#{{1,6}}[ \t]*)?[*_]{{0,3}}[ \t]*{label}\b[ \t]*[*_]{{0,3}}[ \t]*(?::[ \t]*[*_]{{0,3}}|$)"
    );
    Regex::new(&pattern).expect("marker pattern is a valid regex")
}

fn marker_for(platform: Platform) -> &'static Regex {
    match platform {
        Platform::LinkedIn => &LINKEDIN_MARKER,
        Platform::Twitter => &TWITTER_MARKER,
        Platform::WhatsApp => &WHATSAPP_MARKER,
    }
}

#[derive(Clone, Copy, Debug)]
struct Marker {
    start: usize,
    body_start: usize,
}

/// First header occurrence per platform; later restatements are ignored.
fn find_marker(platform: Platform, text: &str) -> Option<Marker> {
    marker_for(platform).find(text).map(|m| Marker {
        start: m.start(),
        body_start: m.end(),
    })
}

/// Splits `text` into the three platform sections.
///
/// When all three headers are present in canonical order the result is
/// `fully_parsed = true` and each body is the text strictly between its own
/// header and the next one. Otherwise the result degrades: every header that
/// was found still yields its own body, bounded by the nearest following
/// header of any platform, and missing platforms come back empty with
/// `present = false`. Never fails, never panics.
pub fn parse_sections(text: &str) -> ParseResult {
    let markers: Vec<(Platform, Option<Marker>)> = Platform::ALL
        .iter()
        .map(|&platform| (platform, find_marker(platform, text)))
        .collect();

    let found: Vec<Marker> = markers.iter().filter_map(|(_, m)| *m).collect();

    let fully_parsed = found.len() == Platform::ALL.len()
        && found.windows(2).all(|pair| pair[0].start < pair[1].start);

    let posts = markers
        .iter()
        .map(|&(platform, marker)| match marker {
            Some(marker) => {
                // Body runs to the nearest header that starts after this
                // one, so a reordered section never absorbs another
                // platform's text.
                let end = found
                    .iter()
                    .map(|m| m.start)
                    .filter(|&start| start > marker.start)
                    .min()
                    .unwrap_or(text.len());
                let body = if end > marker.body_start {
                    text[marker.body_start..end].trim()
                } else {
                    ""
                };
                PlatformPost {
                    platform,
                    body: body.to_string(),
                    present: true,
                }
            }
            None => PlatformPost::absent(platform),
        })
        .collect();

    ParseResult {
        posts,
        fully_parsed,
    }
}
