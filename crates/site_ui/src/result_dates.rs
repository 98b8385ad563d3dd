//! Date badges for search results.
//!
//! Post URLs embed their publish date right after the site origin
//! (`https://blog.example/2016/11/25/title/`). The badge text is read from a
//! fixed-width window at that offset, not from a general URL parse.

use chrono::{Datelike, NaiveDate};
use dom::DocumentHost;
use serde::Serialize;
use shared::{domain::NodeId, error::SiteUiError};
use tracing::debug;

use crate::{dom_failure, selectors::ResultSelectors};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Width of the `YYYY/MM/DD` window read after the origin.
pub const DATE_WINDOW_LEN: usize = 10;

/// Marks result nodes that already carry a badge.
pub const ANNOTATED_MARKER: &str = "data-date-annotated";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    pub annotated: usize,
    pub already_annotated: usize,
    pub skipped: usize,
}

/// Reads the `YYYY/M/D` date that follows `origin` in `url`.
pub fn extract_result_date(url: &str, origin: &str) -> Result<NaiveDate, SiteUiError> {
    let malformed = |reason: &str| SiteUiError::malformed_date(url, reason);

    let after_origin = url
        .get(origin.len()..)
        .ok_or_else(|| malformed("shorter than origin"))?;
    let after_origin = after_origin.strip_prefix('/').unwrap_or(after_origin);
    let window: String = after_origin.chars().take(DATE_WINDOW_LEN).collect();

    let mut parts = window.split('/');
    let mut component = |name: &str| -> Result<u32, SiteUiError> {
        let raw = parts.next().unwrap_or_default();
        let digits: &str = raw
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(raw, |(idx, _)| &raw[..idx]);
        if digits.is_empty() {
            return Err(malformed(&format!("missing {name}")));
        }
        digits
            .parse::<u32>()
            .map_err(|_| malformed(&format!("unreadable {name}")))
    };

    let year = component("year")?;
    let month = component("month")?;
    let day = component("day")?;
    let year = i32::try_from(year).map_err(|_| malformed("year out of range"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| malformed("no such calendar date"))
}

/// `Feb 1, 2013`
pub fn format_badge(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        MONTHS[date.month0() as usize],
        date.day(),
        date.year()
    )
}

/// Prepends a date badge to every result that does not have one yet.
/// Results whose URL is missing or does not embed a date are left alone.
pub fn annotate_results<D: DocumentHost>(
    doc: &mut D,
    selectors: &ResultSelectors,
    origin: &str,
) -> Result<AnnotationReport, SiteUiError> {
    let mut report = AnnotationReport::default();

    for result in doc.query_all(None, &selectors.result) {
        if doc.attribute(result, ANNOTATED_MARKER).is_some() {
            report.already_annotated += 1;
            continue;
        }

        let Some(url) = result_url(doc, result, selectors) else {
            debug!(result = %result, "search: result has no url; skipping date");
            report.skipped += 1;
            continue;
        };

        let date = match extract_result_date(&url, origin) {
            Ok(date) => date,
            Err(err) => {
                debug!(result = %result, error = %err, "search: skipping date badge");
                report.skipped += 1;
                continue;
            }
        };

        let badge = doc.create_element("div");
        doc.set_attribute(badge, "class", &selectors.badge_class)
            .map_err(dom_failure)?;
        doc.set_text(badge, &format_badge(date))
            .map_err(dom_failure)?;
        doc.prepend_child(result, badge).map_err(dom_failure)?;
        doc.set_attribute(result, ANNOTATED_MARKER, "true")
            .map_err(dom_failure)?;
        report.annotated += 1;
    }

    Ok(report)
}

fn result_url<D: DocumentHost>(
    doc: &D,
    result: NodeId,
    selectors: &ResultSelectors,
) -> Option<String> {
    let labels = doc
        .query_all(Some(result), &selectors.labels)
        .into_iter()
        .next()?;
    doc.attribute(labels, &selectors.url_attribute)
        .filter(|url| !url.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/result_dates_tests.rs"]
mod tests;
