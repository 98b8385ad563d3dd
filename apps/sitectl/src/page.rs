//! Page skeletons matching the site templates, built in memory so the
//! behavior layer can be driven without a browser.

use dom::{DocumentHost, DomError, MemoryDocument};
use shared::domain::NodeId;

pub struct PageSkeleton {
    pub doc: MemoryDocument,
    pub results: NodeId,
}

/// Listing page with the header search box, the hidden results modal and
/// the pagination list.
pub fn modal_layout(location_path: &str) -> Result<PageSkeleton, DomError> {
    let mut doc = MemoryDocument::new(location_path);
    let body = doc.body();
    doc.set_style(body, "overflow", "auto")?;

    let header = doc.append_element(body, "header", &[("class", "wrapper")])?;
    let header_mount = doc.append_element(header, "div", &[("id", "searchbox-placeholder")])?;
    doc.append_element(header_mount, "div", &[("id", "___gcse_0")])?;

    let spinner = doc.append_element(body, "div", &[("class", "loading-spinner-container")])?;
    doc.set_style(spinner, "display", "none")?;

    let modal = doc.append_element(body, "div", &[("class", "searchresults-modal")])?;
    doc.set_style(modal, "display", "none")?;
    doc.append_element(modal, "div", &[("class", "searchresults-modal-title")])?;
    doc.append_element(modal, "div", &[("class", "searchbox-row")])?;
    let results = doc.append_element(modal, "div", &[("class", "searchresults-modal-body")])?;

    doc.append_element(body, "ul", &[("class", "pagination")])?;

    Ok(PageSkeleton { doc, results })
}

/// Home page for the inline results layout.
pub fn inline_layout(location_path: &str) -> Result<PageSkeleton, DomError> {
    let mut doc = MemoryDocument::new(location_path);
    let body = doc.body();

    let header = doc.append_element(body, "header", &[("class", "wrapper")])?;
    let search_box = doc.append_element(header, "div", &[("id", "___gcse_0")])?;
    doc.append_element(search_box, "div", &[("class", "gsst_a")])?;

    let results = doc.append_element(body, "div", &[("class", "gsc-results-wrapper-nooverlay")])?;
    doc.set_style(results, "display", "none")?;
    doc.append_element(body, "div", &[("class", "home-page-posts")])?;
    doc.append_element(body, "ul", &[("class", "pagination")])?;

    Ok(PageSkeleton { doc, results })
}

/// Adds one widget result node carrying `url` under `parent`.
pub fn add_result(doc: &mut MemoryDocument, parent: NodeId, url: &str) -> Result<NodeId, DomError> {
    let result = doc.append_element(parent, "div", &[("class", "gs-webResult gs-result")])?;
    let title = doc.append_element(result, "div", &[("class", "gs-title")])?;
    doc.set_text(title, url)?;
    doc.append_element(result, "div", &[("class", "gs-per-result-labels"), ("url", url)])?;
    Ok(result)
}
