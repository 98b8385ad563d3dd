//! Document tree host: the mutable page tree the behavior layer reads and
//! mutates, plus an arena-backed in-memory implementation.

use shared::domain::NodeId;
use thiserror::Error;

mod memory;

pub use memory::MemoryDocument;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    #[error("appending node {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

/// Parsed form of the two selector shapes the page scripts use:
/// `#some-id` and `.class-a.class-b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Classes(Vec<String>),
}

impl Selector {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(id) = raw.strip_prefix('#') {
            if id.is_empty() {
                return None;
            }
            return Some(Self::Id(id.to_string()));
        }

        let classes: Vec<String> = raw
            .split(|c: char| c == '.' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        if classes.is_empty() {
            None
        } else {
            Some(Self::Classes(classes))
        }
    }
}

/// Operations the page exposes to its scripts. Nodes are addressed by
/// [`NodeId`] handles; the host owns the tree.
pub trait DocumentHost {
    fn body(&self) -> NodeId;
    fn location_path(&self) -> &str;
    fn navigate(&mut self, href: &str);

    fn create_element(&mut self, tag: &str) -> NodeId;
    fn create_text(&mut self, text: &str) -> NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    /// Elements under `scope` (or the whole attached tree) carrying every
    /// class in `classes`, in document order.
    fn elements_by_class(&self, scope: Option<NodeId>, classes: &[String]) -> Vec<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Moves `child` under `parent` as its last child, detaching it from any
    /// previous parent first.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError>;
    /// Same as [`DocumentHost::append_child`] but inserts as first child.
    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError>;
    fn clear_children(&mut self, node: NodeId) -> Result<(), DomError>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError>;

    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<(), DomError>;

    /// Replaces every child of `node` with a single text node.
    fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError>;
    fn text_content(&self, node: NodeId) -> String;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(None, selector).into_iter().next()
    }

    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Some(Selector::Id(id)) => self
                .element_by_id(&id)
                .filter(|node| scope.map_or(true, |root| self.is_descendant(*node, root)))
                .into_iter()
                .collect(),
            Some(Selector::Classes(classes)) => self.elements_by_class(scope, &classes),
            None => Vec::new(),
        }
    }

    /// True when `node` sits strictly below `ancestor`.
    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|value| value.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
