use shared::domain::NodeId;
use tracing::debug;

use crate::{escape_html, DocumentHost, DomError};

/// Elements that serialize without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        style: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed page tree. Node 0 is `<body>`.
///
/// Slots are never reused: a node removed by `clear_children` or `set_text`
/// keeps its id and its data until the document is dropped, so a handle a
/// caller still holds can be re-attached later. Memory therefore grows with
/// every re-render (each pagination render leaves the previous `<li>`, `<a>`
/// and text nodes behind). Fine for fixtures and one-shot CLI runs; a
/// long-lived host should build a fresh document per page view.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeData>,
    location_path: String,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryDocument {
    pub fn new(location_path: impl Into<String>) -> Self {
        let body = NodeData {
            kind: NodeKind::Element {
                tag: "body".into(),
                attributes: Vec::new(),
                style: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![body],
            location_path: location_path.into(),
        }
    }

    /// Creates an element with the given attributes and appends it to
    /// `parent`. Fixture helper for hosts and tests.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let node = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(node, name, value)?;
        }
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(data) = self.nodes.get(node.0) {
            for child in &data.children {
                self.write_html(*child, &mut out);
            }
        }
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node.0) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element {
                tag,
                attributes,
                style,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
                }
                if !style.is_empty() {
                    let rendered: Vec<String> = style
                        .iter()
                        .map(|(property, value)| format!("{property}: {value};"))
                        .collect();
                    out.push_str(&format!(" style=\"{}\"", escape_html(&rendered.join(" "))));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &data.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }

    fn data(&self, node: NodeId) -> Result<&NodeData, DomError> {
        self.nodes.get(node.0).ok_or(DomError::UnknownNode(node))
    }

    fn element_parts_mut(
        &mut self,
        node: NodeId,
    ) -> Result<(&mut Vec<(String, String)>, &mut Vec<(String, String)>), DomError> {
        let data = self
            .nodes
            .get_mut(node.0)
            .ok_or(DomError::UnknownNode(node))?;
        match &mut data.kind {
            NodeKind::Element {
                attributes, style, ..
            } => Ok((attributes, style)),
            NodeKind::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return;
        };
        self.nodes[parent.0].children.retain(|child| *child != node);
    }

    fn prepare_insert(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.data(child)?;
        if !matches!(self.data(parent)?.kind, NodeKind::Element { .. }) {
            return Err(DomError::NotAnElement(parent));
        }
        if parent == child || self.is_descendant(parent, child) {
            return Err(DomError::Cycle { parent, child });
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Attached element ids under `root` in document order.
    fn walk(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[root.0].children {
            if matches!(self.nodes[child.0].kind, NodeKind::Element { .. }) {
                out.push(*child);
            }
            self.walk(*child, out);
        }
    }
}

impl DocumentHost for MemoryDocument {
    fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn location_path(&self) -> &str {
        &self.location_path
    }

    fn navigate(&mut self, href: &str) {
        debug!(from = %self.location_path, to = href, "dom: navigate");
        self.location_path = href.to_string();
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
        })
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_string()))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut attached = Vec::new();
        self.walk(self.body(), &mut attached);
        attached
            .into_iter()
            .find(|node| self.attribute(*node, "id").as_deref() == Some(id))
    }

    fn elements_by_class(&self, scope: Option<NodeId>, classes: &[String]) -> Vec<NodeId> {
        let root = scope.unwrap_or_else(|| self.body());
        if self.nodes.get(root.0).is_none() {
            return Vec::new();
        }
        let mut candidates = Vec::new();
        self.walk(root, &mut candidates);
        candidates
            .into_iter()
            .filter(|node| classes.iter().all(|class| self.has_class(*node, class)))
            .collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.prepare_insert(parent, child)?;
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.prepare_insert(parent, child)?;
        self.nodes[parent.0].children.insert(0, child);
        Ok(())
    }

    fn clear_children(&mut self, node: NodeId) -> Result<(), DomError> {
        let data = self
            .nodes
            .get_mut(node.0)
            .ok_or(DomError::UnknownNode(node))?;
        let children = std::mem::take(&mut data.children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        Ok(())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            NodeKind::Text(_) => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let (attributes, _) = self.element_parts_mut(node)?;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { style, .. } => style
                .iter()
                .find(|(key, _)| key == property)
                .map(|(_, value)| value.clone()),
            NodeKind::Text(_) => None,
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let (_, style) = self.element_parts_mut(node)?;
        match style.iter_mut().find(|(key, _)| key == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => style.push((property.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.element_parts_mut(node)?;
        self.clear_children(node)?;
        let text_node = self.create_text(text);
        self.append_child(node, text_node)
    }

    fn text_content(&self, node: NodeId) -> String {
        let Some(data) = self.nodes.get(node.0) else {
            return String::new();
        };
        match &data.kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element { .. } => data
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }
}
