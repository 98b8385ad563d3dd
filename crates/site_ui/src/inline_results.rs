//! Inline results layout: results replace the home page post list in place
//! instead of opening a modal. Clearing the search box brings the posts back.

use dom::DocumentHost;
use shared::{domain::NodeId, error::SiteUiError};
use tracing::{debug, info, warn};

use crate::{
    dom_failure,
    result_dates::{annotate_results, AnnotationReport},
    selectors::InlineSelectors,
};

pub const CLEAR_ACTION: &str = "clear-search";

#[derive(Debug, Clone)]
pub struct InlineResultsPresenter {
    selectors: InlineSelectors,
    origin: String,
}

impl InlineResultsPresenter {
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_selectors(origin, InlineSelectors::default())
    }

    pub fn with_selectors(origin: impl Into<String>, selectors: InlineSelectors) -> Self {
        Self {
            selectors,
            origin: origin.into(),
        }
    }

    pub fn on_results_rendered<D: DocumentHost>(
        &self,
        doc: &mut D,
    ) -> Result<AnnotationReport, SiteUiError> {
        let (wrapper, posts) = self.regions(doc)?;
        doc.set_style(wrapper, "display", "block")
            .map_err(dom_failure)?;
        doc.set_style(posts, "display", "none")
            .map_err(dom_failure)?;

        let report = annotate_results(doc, &self.selectors.results, &self.origin)?;
        info!(annotated = report.annotated, "search: inline results shown");
        Ok(report)
    }

    pub fn on_search_cleared<D: DocumentHost>(&self, doc: &mut D) -> Result<(), SiteUiError> {
        let (wrapper, posts) = self.regions(doc)?;
        doc.set_style(wrapper, "display", "none")
            .map_err(dom_failure)?;
        doc.set_style(posts, "display", "block")
            .map_err(dom_failure)?;
        info!("search: inline results cleared");
        Ok(())
    }

    /// Probe for the widget's clear button; pair with
    /// [`crate::readiness::wait_until_present`].
    pub fn clear_button<D: DocumentHost>(&self, doc: &D) -> Option<NodeId> {
        doc.query(&self.selectors.clear_button)
    }

    /// Tags the clear button so the host routes its clicks to
    /// [`InlineResultsPresenter::on_search_cleared`].
    pub fn attach_clear_action<D: DocumentHost>(
        &self,
        doc: &mut D,
        button: NodeId,
    ) -> Result<(), SiteUiError> {
        doc.set_attribute(button, "data-action", CLEAR_ACTION)
            .map_err(dom_failure)?;
        debug!(button = %button, "search: clear action attached");
        Ok(())
    }

    fn regions<D: DocumentHost>(&self, doc: &D) -> Result<(NodeId, NodeId), SiteUiError> {
        let lookup = |selector: &str| {
            doc.query(selector).ok_or_else(|| {
                warn!(selector, "search: inline region not found; aborting handler");
                SiteUiError::missing(selector)
            })
        };
        Ok((
            lookup(&self.selectors.results_wrapper)?,
            lookup(&self.selectors.home_posts)?,
        ))
    }
}
