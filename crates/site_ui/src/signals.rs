//! Lifecycle signals fired by the search widget, and the single entry point
//! that routes them to the modal controller.

use dom::DocumentHost;
use shared::{domain::ModalState, error::SiteUiError};
use tracing::{debug, warn};

use crate::{
    result_dates::AnnotationReport,
    search_modal::{SearchModalController, Transition},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetSignal {
    Starting { name: String, query: String },
    Ready,
    Rendered,
    CloseRequested,
}

impl WidgetSignal {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetSignal::Starting { .. } => "starting",
            WidgetSignal::Ready => "ready",
            WidgetSignal::Rendered => "rendered",
            WidgetSignal::CloseRequested => "close",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalOutcome {
    Transition(Transition),
    Annotated(AnnotationReport),
    /// The handler bailed out before mutating anything.
    Aborted {
        state: ModalState,
        error: SiteUiError,
    },
}

impl SignalOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, SignalOutcome::Aborted { .. })
    }
}

/// Runs the handler for `signal`. Handler failures are logged and reported
/// as [`SignalOutcome::Aborted`]; nothing propagates to the page.
pub fn dispatch_signal<D: DocumentHost>(
    controller: &mut SearchModalController,
    doc: &mut D,
    signal: WidgetSignal,
) -> SignalOutcome {
    let signal_name = signal.name();
    let result = match signal {
        WidgetSignal::Starting { name, query } => controller
            .on_search_starting(doc, &name, &query)
            .map(SignalOutcome::Transition),
        WidgetSignal::Ready => controller
            .on_search_ready(doc)
            .map(SignalOutcome::Transition),
        WidgetSignal::Rendered => controller
            .on_results_rendered(doc)
            .map(SignalOutcome::Annotated),
        WidgetSignal::CloseRequested => controller
            .close_modal(doc)
            .map(SignalOutcome::Transition),
    };

    match result {
        Ok(outcome) => {
            debug!(signal = signal_name, state = %controller.state(), "search: signal handled");
            outcome
        }
        Err(error) => {
            warn!(
                signal = signal_name,
                state = %controller.state(),
                code = ?error.code(),
                error = %error,
                "search: signal handler aborted"
            );
            SignalOutcome::Aborted {
                state: controller.state(),
                error,
            }
        }
    }
}
