//! Search results modal.
//!
//! The widget's search box lives in the page header while the modal is
//! closed and is moved (never copied) into the modal while a search is
//! loading or showing. The controller's [`ModalState`] is the source of
//! truth; DOM parentage only mirrors it.

use dom::DocumentHost;
use shared::{
    domain::{ModalState, NodeId},
    error::SiteUiError,
};
use tracing::{debug, info, warn};

use crate::{
    dom_failure,
    result_dates::{annotate_results, AnnotationReport},
    selectors::SearchSelectors,
};

pub const QUERY_LABEL_PREFIX: &str = "Showing results for: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied { from: ModalState, to: ModalState },
    Ignored(ModalState),
}

impl Transition {
    pub fn state(self) -> ModalState {
        match self {
            Transition::Applied { to, .. } => to,
            Transition::Ignored(state) => state,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchModalController {
    state: ModalState,
    selectors: SearchSelectors,
    origin: String,
}

impl SearchModalController {
    /// `origin` is the site origin that prefixes every result URL.
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_selectors(origin, SearchSelectors::default())
    }

    pub fn with_selectors(origin: impl Into<String>, selectors: SearchSelectors) -> Self {
        Self {
            state: ModalState::Closed,
            selectors,
            origin: origin.into(),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    /// A query is about to run: label the modal, show the spinner and move
    /// the search box into the modal mount.
    pub fn on_search_starting<D: DocumentHost>(
        &mut self,
        doc: &mut D,
        name: &str,
        query: &str,
    ) -> Result<Transition, SiteUiError> {
        let label = require(doc, &self.selectors.query_label)?;
        let spinner = require(doc, &self.selectors.loading_indicator)?;
        let search_box = require(doc, &self.selectors.search_box)?;
        let mount = self.search_box_mount(doc, ModalState::Loading)?;

        write_query_label(doc, label, query)?;
        doc.set_style(spinner, "display", "flex")
            .map_err(dom_failure)?;
        place_search_box(doc, search_box, mount)?;

        // A new search while results are showing keeps the modal up; `ready`
        // brings it back to Open.
        Ok(self.transition_to(ModalState::Loading, name))
    }

    /// Results are available: hide the spinner, lock page scroll and show the
    /// modal. The search box is already in the modal mount unless the page
    /// rebuilt it since `starting`.
    pub fn on_search_ready<D: DocumentHost>(&mut self, doc: &mut D) -> Result<Transition, SiteUiError> {
        if self.state != ModalState::Loading {
            debug!(state = %self.state, "search: ready signal ignored");
            return Ok(Transition::Ignored(self.state));
        }

        let spinner = require(doc, &self.selectors.loading_indicator)?;
        let search_box = require(doc, &self.selectors.search_box)?;
        let mount = self.search_box_mount(doc, ModalState::Open)?;
        let modal = require(doc, &self.selectors.modal)?;
        let body = doc.body();

        doc.set_style(spinner, "display", "none")
            .map_err(dom_failure)?;
        place_search_box(doc, search_box, mount)?;
        doc.set_style(body, "overflow", "hidden")
            .map_err(dom_failure)?;
        doc.set_style(modal, "display", "block")
            .map_err(dom_failure)?;

        Ok(self.transition_to(ModalState::Open, "ready"))
    }

    /// Result nodes exist: attach date badges to the ones that lack them.
    pub fn on_results_rendered<D: DocumentHost>(
        &mut self,
        doc: &mut D,
    ) -> Result<AnnotationReport, SiteUiError> {
        let report = annotate_results(doc, &self.selectors.results, &self.origin)?;
        debug!(
            annotated = report.annotated,
            already_annotated = report.already_annotated,
            skipped = report.skipped,
            "search: results annotated"
        );
        Ok(report)
    }

    /// Puts the search box back in the header, restores scroll and hides the
    /// modal.
    pub fn close_modal<D: DocumentHost>(&mut self, doc: &mut D) -> Result<Transition, SiteUiError> {
        if self.state != ModalState::Open {
            debug!(state = %self.state, "search: close ignored");
            return Ok(Transition::Ignored(self.state));
        }

        let search_box = require(doc, &self.selectors.search_box)?;
        let mount = self.search_box_mount(doc, ModalState::Closed)?;
        let modal = require(doc, &self.selectors.modal)?;
        let body = doc.body();

        place_search_box(doc, search_box, mount)?;
        doc.set_style(body, "overflow", "auto")
            .map_err(dom_failure)?;
        doc.set_style(modal, "display", "none")
            .map_err(dom_failure)?;

        Ok(self.transition_to(ModalState::Closed, "close"))
    }

    /// Where the search box belongs once the controller is in `state`.
    fn search_box_mount<D: DocumentHost>(
        &self,
        doc: &D,
        state: ModalState,
    ) -> Result<NodeId, SiteUiError> {
        if state.search_box_in_modal() {
            require(doc, &self.selectors.modal_mount)
        } else {
            require(doc, &self.selectors.header_mount)
        }
    }

    fn transition_to(&mut self, to: ModalState, cause: &str) -> Transition {
        let from = self.state;
        self.state = to;
        info!(%from, %to, cause, "search: modal transition");
        Transition::Applied { from, to }
    }
}

fn require<D: DocumentHost>(doc: &D, selector: &str) -> Result<NodeId, SiteUiError> {
    doc.query(selector).ok_or_else(|| {
        warn!(selector, "search: mount point not found; aborting handler");
        SiteUiError::missing(selector)
    })
}

fn place_search_box<D: DocumentHost>(
    doc: &mut D,
    search_box: NodeId,
    mount: NodeId,
) -> Result<(), SiteUiError> {
    if doc.parent(search_box) == Some(mount) {
        return Ok(());
    }
    doc.append_child(mount, search_box).map_err(dom_failure)
}

/// `Showing results for: <b>{query}</b>`. The query goes in as a text node so
/// the host escapes it.
fn write_query_label<D: DocumentHost>(
    doc: &mut D,
    label: NodeId,
    query: &str,
) -> Result<(), SiteUiError> {
    doc.set_text(label, QUERY_LABEL_PREFIX)
        .map_err(dom_failure)?;
    let emphasis = doc.create_element("b");
    doc.set_text(emphasis, query).map_err(dom_failure)?;
    doc.append_child(label, emphasis).map_err(dom_failure)
}

#[cfg(test)]
#[path = "tests/search_modal_tests.rs"]
mod tests;
