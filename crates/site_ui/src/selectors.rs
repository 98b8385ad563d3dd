//! Class/id names the behavior layer looks up at call time. Defaults match
//! the stock search widget markup and the site templates.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationSelectors {
    pub container: String,
}

impl Default for PaginationSelectors {
    fn default() -> Self {
        Self {
            container: ".pagination".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResultSelectors {
    pub result: String,
    pub labels: String,
    pub url_attribute: String,
    pub badge_class: String,
}

impl Default for ResultSelectors {
    fn default() -> Self {
        Self {
            result: ".gs-webResult.gs-result".into(),
            labels: ".gs-per-result-labels".into(),
            url_attribute: "url".into(),
            badge_class: "google-result-meta".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchSelectors {
    pub search_box: String,
    pub header_mount: String,
    pub modal_mount: String,
    pub modal: String,
    pub loading_indicator: String,
    pub query_label: String,
    pub results: ResultSelectors,
}

impl Default for SearchSelectors {
    fn default() -> Self {
        Self {
            search_box: "#___gcse_0".into(),
            header_mount: "#searchbox-placeholder".into(),
            modal_mount: ".searchbox-row".into(),
            modal: ".searchresults-modal".into(),
            loading_indicator: ".loading-spinner-container".into(),
            query_label: ".searchresults-modal-title".into(),
            results: ResultSelectors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InlineSelectors {
    pub results_wrapper: String,
    pub home_posts: String,
    pub clear_button: String,
    pub results: ResultSelectors,
}

impl Default for InlineSelectors {
    fn default() -> Self {
        Self {
            results_wrapper: ".gsc-results-wrapper-nooverlay".into(),
            home_posts: ".home-page-posts".into(),
            clear_button: ".gsst_a".into(),
            results: ResultSelectors::default(),
        }
    }
}
