//! Windowed page links for the post listing.
//!
//! The listing shows at most `window_size` numbered links at once. Windows
//! are aligned to multiples of `window_size` (pages 1..=10, 11..=20, ...),
//! and group jump links (`<<`, `>>`) move a whole window at a time.

use dom::DocumentHost;
use serde::Serialize;
use shared::{
    domain::{NodeId, PageNumber},
    error::SiteUiError,
};
use tracing::{debug, warn};

use crate::{dom_failure, selectors::PaginationSelectors};

/// Visible page count used by the site templates.
pub const DEFAULT_WINDOW_SIZE: u32 = 10;
pub const PREVIOUS_GROUP_LABEL: &str = "<<";
pub const NEXT_GROUP_LABEL: &str = ">>";

const PAGE_CLASS: &str = "page";
const ACTIVE_PAGE_CLASS: &str = "page active";
const GROUP_JUMP_CLASS: &str = "change-pages-set";
const GROUP_JUMP_ACTION: &str = "rerender-pagination";

/// Build-time site facts the listing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub total_pages: u32,
    pub base_path: String,
    pub window_size: u32,
}

impl PaginationConfig {
    pub fn new(total_pages: u32, base_path: impl Into<String>, window_size: u32) -> Self {
        Self {
            total_pages: total_pages.max(1),
            base_path: base_path.into(),
            window_size: window_size.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: PageNumber,
    pub total_pages: u32,
    pub window_size: u32,
    pub start_page: PageNumber,
    pub end_page: PageNumber,
}

impl PageWindow {
    pub fn has_previous_group(&self) -> bool {
        self.current_page.0 > self.window_size
    }

    pub fn has_next_group(&self) -> bool {
        self.current_page.0 < self.total_pages
    }

    pub fn pages(&self) -> impl Iterator<Item = PageNumber> {
        (self.start_page.0..=self.end_page.0).map(PageNumber)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupJump {
    Previous,
    Next,
}

impl GroupJump {
    pub fn label(self) -> &'static str {
        match self {
            GroupJump::Previous => PREVIOUS_GROUP_LABEL,
            GroupJump::Next => NEXT_GROUP_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinkDescriptor {
    pub label: String,
    pub href: String,
    pub target: PageNumber,
    pub is_active: bool,
    pub is_group_jump: bool,
}

/// Parses the trailing numeric segment of `url_path`. A path with no
/// trailing segment (the site root) is page 1.
pub fn parse_page_number(url_path: &str, total_pages: u32) -> Result<PageNumber, SiteUiError> {
    let trimmed = url_path.strip_suffix('/').unwrap_or(url_path);
    let segment = trimmed.rsplit('/').next().unwrap_or_default();
    if segment.is_empty() {
        return Ok(PageNumber::FIRST);
    }

    let invalid = || SiteUiError::InvalidPageNumber {
        raw: segment.to_string(),
        total_pages,
    };
    let page = segment.parse::<u32>().map_err(|_| invalid())?;
    if page == 0 || page > total_pages {
        return Err(invalid());
    }
    Ok(PageNumber(page))
}

/// Current page for `url_path`; anything unparsable or out of range is
/// treated as page 1.
pub fn current_page_number(url_path: &str, total_pages: u32) -> PageNumber {
    parse_page_number(url_path, total_pages).unwrap_or_else(|err| {
        debug!(path = url_path, error = %err, "pagination: normalizing to first page");
        PageNumber::FIRST
    })
}

pub fn compute_window(current_page: PageNumber, total_pages: u32, window_size: u32) -> PageWindow {
    let total_pages = total_pages.max(1);
    let window_size = window_size.max(1);
    let current = if current_page.0 == 0 || current_page.0 > total_pages {
        PageNumber::FIRST
    } else {
        current_page
    };

    let start = (current.0 - 1) / window_size * window_size + 1;
    let end = total_pages.min(start.saturating_add(window_size - 1));

    PageWindow {
        current_page: current,
        total_pages,
        window_size,
        start_page: PageNumber(start),
        end_page: PageNumber(end),
    }
}

#[derive(Debug, Clone)]
pub struct PaginationEngine {
    config: PaginationConfig,
    selectors: PaginationSelectors,
}

impl PaginationEngine {
    pub fn new(config: PaginationConfig) -> Self {
        Self::with_selectors(config, PaginationSelectors::default())
    }

    pub fn with_selectors(config: PaginationConfig, selectors: PaginationSelectors) -> Self {
        Self { config, selectors }
    }

    pub fn current_page_number(&self, url_path: &str) -> PageNumber {
        current_page_number(url_path, self.config.total_pages)
    }

    pub fn window_for(&self, current_page: PageNumber) -> PageWindow {
        compute_window(current_page, self.config.total_pages, self.config.window_size)
    }

    fn href_for(&self, page: PageNumber) -> String {
        if page.is_first() {
            "/".to_string()
        } else {
            format!("{}{}", self.config.base_path, page)
        }
    }

    pub fn build_page_link(&self, page: PageNumber, is_active: bool) -> PageLinkDescriptor {
        PageLinkDescriptor {
            label: page.to_string(),
            href: self.href_for(page),
            target: page,
            is_active,
            is_group_jump: false,
        }
    }

    pub fn build_group_jump_link(&self, target: PageNumber, jump: GroupJump) -> PageLinkDescriptor {
        PageLinkDescriptor {
            label: jump.label().to_string(),
            href: self.href_for(target),
            target,
            is_active: false,
            is_group_jump: true,
        }
    }

    /// Links for `url_path`, in display order.
    pub fn descriptors(&self, url_path: &str) -> Vec<PageLinkDescriptor> {
        let window = self.window_for(self.current_page_number(url_path));
        self.descriptors_for(&window)
    }

    pub fn descriptors_for(&self, window: &PageWindow) -> Vec<PageLinkDescriptor> {
        let visible = (window.end_page.0 - window.start_page.0) as usize + 1;
        let mut links = Vec::with_capacity(visible + 2);

        if window.has_previous_group() {
            let target = PageNumber(window.start_page.0 - window.window_size);
            links.push(self.build_group_jump_link(target, GroupJump::Previous));
        }

        links.extend(
            window
                .pages()
                .map(|page| self.build_page_link(page, page == window.current_page)),
        );

        if window.has_next_group() {
            let target = window.start_page.0.saturating_add(window.window_size);
            links.push(self.build_group_jump_link(PageNumber(target), GroupJump::Next));
        }

        links
    }

    /// Clears the pagination container and fills it with the links for the
    /// host's current location. Returns the number of links rendered.
    pub fn render<D: DocumentHost>(&self, doc: &mut D) -> Result<usize, SiteUiError> {
        let Some(container) = doc.query(&self.selectors.container) else {
            warn!(
                selector = %self.selectors.container,
                "pagination: container not found; skipping render"
            );
            return Err(SiteUiError::missing(&self.selectors.container));
        };

        let links = self.descriptors(doc.location_path());
        doc.clear_children(container).map_err(dom_failure)?;
        for link in &links {
            let item = self.link_element(doc, link)?;
            doc.append_child(container, item).map_err(dom_failure)?;
        }

        debug!(
            path = doc.location_path(),
            links = links.len(),
            "pagination: rendered"
        );
        Ok(links.len())
    }

    /// Follows a group jump link: navigates the host and re-renders the whole
    /// listing.
    pub fn activate<D: DocumentHost>(&self, doc: &mut D, href: &str) -> Result<usize, SiteUiError> {
        doc.navigate(href);
        self.render(doc)
    }

    fn link_element<D: DocumentHost>(
        &self,
        doc: &mut D,
        link: &PageLinkDescriptor,
    ) -> Result<NodeId, SiteUiError> {
        let anchor = doc.create_element("a");
        doc.set_attribute(anchor, "href", &link.href)
            .map_err(dom_failure)?;
        let class = if link.is_group_jump {
            GROUP_JUMP_CLASS
        } else if link.is_active {
            ACTIVE_PAGE_CLASS
        } else {
            PAGE_CLASS
        };
        doc.set_attribute(anchor, "class", class)
            .map_err(dom_failure)?;
        if link.is_group_jump {
            doc.set_attribute(anchor, "data-action", GROUP_JUMP_ACTION)
                .map_err(dom_failure)?;
        }
        doc.set_text(anchor, &link.label).map_err(dom_failure)?;

        let item = doc.create_element("li");
        doc.append_child(item, anchor).map_err(dom_failure)?;
        Ok(item)
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
