use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use site_ui::{
    pagination::DEFAULT_WINDOW_SIZE, InlineSelectors, PaginationConfig, PaginationSelectors,
    SearchSelectors,
};
use tracing::warn;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub total_pages: u32,
    pub base_path: String,
    pub window_size: u32,
    pub site_url: String,
    pub pagination: PaginationSelectors,
    pub search: SearchSelectors,
    pub inline: InlineSelectors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_pages: 1,
            base_path: "/page/".into(),
            window_size: DEFAULT_WINDOW_SIZE,
            site_url: "https://example.github.io/".into(),
            pagination: PaginationSelectors::default(),
            search: SearchSelectors::default(),
            inline: InlineSelectors::default(),
        }
    }
}

impl Settings {
    pub fn pagination_config(&self) -> PaginationConfig {
        PaginationConfig::new(self.total_pages, self.base_path.clone(), self.window_size)
    }

    /// Scheme, host and port of `site_url`, e.g. `https://example.github.io`.
    pub fn search_origin(&self) -> anyhow::Result<String> {
        let url = Url::parse(&self.site_url)
            .with_context(|| format!("invalid site url '{}'", self.site_url))?;
        Ok(url.origin().ascii_serialization())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    total_pages: Option<u32>,
    base_path: Option<String>,
    window_size: Option<u32>,
    site_url: Option<String>,
    pagination: Option<PaginationSelectors>,
    search: Option<SearchSelectors>,
    inline: Option<InlineSelectors>,
}

pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw, path);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings.total_pages = settings.total_pages.max(1);
    settings.window_size = settings.window_size.max(1);
    settings
}

fn apply_file(settings: &mut Settings, raw: &str, path: &Path) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config: ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.total_pages {
        settings.total_pages = v;
    }
    if let Some(v) = file_cfg.base_path {
        settings.base_path = v;
    }
    if let Some(v) = file_cfg.window_size {
        settings.window_size = v;
    }
    if let Some(v) = file_cfg.site_url {
        settings.site_url = v;
    }
    if let Some(v) = file_cfg.pagination {
        settings.pagination = v;
    }
    if let Some(v) = file_cfg.search {
        settings.search = v;
    }
    if let Some(v) = file_cfg.inline {
        settings.inline = v;
    }
}

/// Each setting is read from `APP__<NAME>`, falling back to `SITE_<NAME>`
/// when the `APP__` variable is unset.
fn apply_env<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| {
        lookup(&format!("APP__{name}")).or_else(|| lookup(&format!("SITE_{name}")))
    };

    if let Some(v) = read("TOTAL_PAGES") {
        match v.parse::<u32>() {
            Ok(parsed) => settings.total_pages = parsed,
            Err(_) => warn!(value = %v, "config: ignoring non-numeric TOTAL_PAGES"),
        }
    }
    if let Some(v) = read("WINDOW_SIZE") {
        match v.parse::<u32>() {
            Ok(parsed) => settings.window_size = parsed,
            Err(_) => warn!(value = %v, "config: ignoring non-numeric WINDOW_SIZE"),
        }
    }
    if let Some(v) = read("BASE_PATH") {
        settings.base_path = v;
    }
    if let Some(v) = read("URL") {
        settings.site_url = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
