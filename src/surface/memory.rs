//! In-memory surface - an arena of nodes mirroring a document tree

use super::{Handler, NodeHandle, Surface, SurfaceEvent};
use crate::error::SurfaceError;
use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;

struct Node {
    kind: String,
    attributes: BTreeMap<String, String>,
    style_text: String,
    value: Value,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    listeners: Vec<(String, Handler)>,
}

impl Node {
    fn new(kind: &str) -> Self {
        Node {
            kind: kind.to_string(),
            attributes: BTreeMap::new(),
            style_text: String::new(),
            value: Value::Null,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

/// Headless [`Surface`] keeping every node in memory
///
/// Nodes are never freed; handles stay valid for the surface's lifetime.
/// Besides the trait operations it offers inspection helpers for tests and
/// for hosts that serialize the tree themselves.
pub struct MemorySurface {
    nodes: Vec<Node>,
}

impl MemorySurface {
    /// Create a surface with a single `body` root node
    pub fn new() -> Self {
        MemorySurface {
            nodes: vec![Node::new("body")],
        }
    }

    fn node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes
            .get(handle.raw() as usize)
            .ok_or_else(|| SurfaceError::UnknownNode(handle).into())
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut Node> {
        self.nodes
            .get_mut(handle.raw() as usize)
            .ok_or_else(|| SurfaceError::UnknownNode(handle).into())
    }

    fn insert(&mut self, node: Node) -> NodeHandle {
        self.nodes.push(node);
        NodeHandle::from_raw((self.nodes.len() - 1) as u64)
    }

    fn detach(&mut self, child: NodeHandle) -> Result<()> {
        if let Some(parent) = self.node(child)?.parent {
            self.node_mut(parent)?.children.retain(|c| *c != child);
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    fn is_valid_kind(kind: &str) -> bool {
        let mut chars = kind.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
    }

    /// Total number of nodes ever created, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn kind(&self, node: NodeHandle) -> Option<&str> {
        self.nodes.get(node.raw() as usize).map(|n| n.kind.as_str())
    }

    pub fn attribute(&self, node: NodeHandle, name: &str) -> Option<&str> {
        self.nodes
            .get(node.raw() as usize)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    pub fn style_text(&self, node: NodeHandle) -> Option<&str> {
        self.nodes
            .get(node.raw() as usize)
            .map(|n| n.style_text.as_str())
    }

    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(node.raw() as usize).and_then(|n| n.parent)
    }

    /// Whether the node is connected to the root
    pub fn is_attached(&self, node: NodeHandle) -> bool {
        let root = self.root();
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == root {
                return true;
            }
            current = self.parent(handle);
        }
        false
    }

    /// Number of listeners registered for `event` on `node`
    pub fn listener_count(&self, node: NodeHandle, event: &str) -> usize {
        self.nodes
            .get(node.raw() as usize)
            .map(|n| n.listeners.iter().filter(|(name, _)| name == event).count())
            .unwrap_or(0)
    }

    /// First node whose `id` attribute equals `id`, searching the whole arena
    pub fn find_by_id(&self, id: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .position(|n| n.attributes.get("id").map(String::as_str) == Some(id))
            .map(|i| NodeHandle::from_raw(i as u64))
    }

    /// Fire `event` on `node`, invoking its listeners in registration order
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, node: NodeHandle, event: SurfaceEvent) -> Result<usize> {
        let handlers: Vec<Handler> = self
            .node(node)?
            .listeners
            .iter()
            .filter(|(name, _)| *name == event.name)
            .map(|(_, handler)| Handler::clone(handler))
            .collect();

        for handler in &handlers {
            handler(&event);
        }
        Ok(handlers.len())
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn root(&self) -> NodeHandle {
        NodeHandle::from_raw(0)
    }

    fn create_node(&mut self, kind: &str) -> Result<NodeHandle> {
        if !Self::is_valid_kind(kind) {
            return Err(SurfaceError::UnknownNodeKind(kind.to_string()).into());
        }
        Ok(self.insert(Node::new(kind)))
    }

    fn set_attribute(&mut self, node: NodeHandle, name: &str, value: &str) -> Result<()> {
        self.node_mut(node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get_attribute(&self, node: NodeHandle, name: &str) -> Result<Option<String>> {
        Ok(self.node(node)?.attributes.get(name).cloned())
    }

    fn remove_attribute(&mut self, node: NodeHandle, name: &str) -> Result<()> {
        self.node_mut(node)?.attributes.remove(name);
        Ok(())
    }

    fn set_style_text(&mut self, node: NodeHandle, css_text: &str) -> Result<()> {
        self.node_mut(node)?.style_text = css_text.to_string();
        Ok(())
    }

    fn append_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        self.node(parent)?;
        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        if self.node(child)?.parent != Some(parent) {
            return Err(SurfaceError::NotAChild { parent, child }.into());
        }
        self.detach(child)
    }

    fn children(&self, node: NodeHandle) -> Result<Vec<NodeHandle>> {
        Ok(self.node(node)?.children.clone())
    }

    fn add_event_listener(
        &mut self,
        node: NodeHandle,
        event: &str,
        handler: Handler,
    ) -> Result<()> {
        self.node_mut(node)?
            .listeners
            .push((event.to_string(), handler));
        Ok(())
    }

    fn clone_node(&mut self, node: NodeHandle, deep: bool) -> Result<NodeHandle> {
        let source = self.node(node)?;
        let copy = Node {
            kind: source.kind.clone(),
            attributes: source.attributes.clone(),
            style_text: source.style_text.clone(),
            value: source.value.clone(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        };
        let children = if deep {
            source.children.clone()
        } else {
            Vec::new()
        };

        let handle = self.insert(copy);
        for child in children {
            let child_copy = self.clone_node(child, true)?;
            self.append_child(handle, child_copy)?;
        }
        Ok(handle)
    }

    fn value(&self, node: NodeHandle) -> Result<Value> {
        Ok(self.node(node)?.value.clone())
    }

    fn set_value(&mut self, node: NodeHandle, value: &Value) -> Result<()> {
        self.node_mut(node)?.value = value.clone();
        Ok(())
    }
}
