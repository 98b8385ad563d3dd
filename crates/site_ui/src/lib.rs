//! Client-side behavior for the blog pages: the paginated post listing and
//! the search widget's results modal.

pub mod inline_results;
pub mod pagination;
pub mod readiness;
pub mod result_dates;
pub mod search_modal;
pub mod selectors;
pub mod signals;

pub use inline_results::InlineResultsPresenter;
pub use pagination::{PageLinkDescriptor, PageWindow, PaginationConfig, PaginationEngine};
pub use readiness::{wait_until_present, ReadinessError, RetryPolicy};
pub use result_dates::AnnotationReport;
pub use search_modal::{SearchModalController, Transition};
pub use selectors::{InlineSelectors, PaginationSelectors, ResultSelectors, SearchSelectors};
pub use signals::{dispatch_signal, SignalOutcome, WidgetSignal};

use shared::error::SiteUiError;

/// A host failure while mutating a node we just looked up means the node
/// went away underneath the handler; report it as a missing mount point.
pub(crate) fn dom_failure(err: dom::DomError) -> SiteUiError {
    SiteUiError::missing(err.to_string())
}
