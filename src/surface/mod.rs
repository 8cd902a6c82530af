//! Rendering surface abstraction
//!
//! The engine never touches a concrete node tree directly. Everything it needs
//! from the host (create a node, read and write attributes and inline style, attach and
//! detach children, listen for events, duplicate nodes, and read/write a
//! node's value slot) goes through the [`Surface`] trait.
//!
//! [`MemorySurface`] is an in-process implementation used for headless
//! operation and tests.

mod memory;

pub use memory::MemorySurface;

use anyhow::Result;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Opaque handle to a node owned by a surface
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Construct a handle from a surface-specific raw value
    pub const fn from_raw(raw: u64) -> Self {
        NodeHandle(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Event delivered to a handler by the host
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceEvent {
    /// Event name, e.g. `click` or `keydown`
    pub name: String,
    /// Node the listener was attached to
    pub target: NodeHandle,
    /// Host-specific payload
    pub detail: Value,
}

impl SurfaceEvent {
    pub fn new(name: impl Into<String>, target: NodeHandle) -> Self {
        SurfaceEvent {
            name: name.into(),
            target,
            detail: Value::Null,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }
}

/// Event callback; shared between a descriptor and the surface
pub type Handler = Rc<dyn Fn(&SurfaceEvent)>;

/// Wrap a closure as a [`Handler`]
pub fn handler(f: impl Fn(&SurfaceEvent) + 'static) -> Handler {
    Rc::new(f)
}

/// Capability the engine needs from the host node tree
pub trait Surface {
    /// Top-level node that `publish` attaches to by default
    fn root(&self) -> NodeHandle;

    /// Create a detached node of the given kind
    fn create_node(&mut self, kind: &str) -> Result<NodeHandle>;

    fn set_attribute(&mut self, node: NodeHandle, name: &str, value: &str) -> Result<()>;

    /// Current value of an attribute, `None` when absent
    fn get_attribute(&self, node: NodeHandle, name: &str) -> Result<Option<String>>;

    /// Remove an attribute; absent attributes are ignored
    fn remove_attribute(&mut self, node: NodeHandle, name: &str) -> Result<()>;

    /// Replace the node's inline style text
    fn set_style_text(&mut self, node: NodeHandle, css_text: &str) -> Result<()>;

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent first
    fn append_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()>;

    fn remove_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()>;

    /// Current children of `node`, in order
    fn children(&self, node: NodeHandle) -> Result<Vec<NodeHandle>>;

    fn add_event_listener(&mut self, node: NodeHandle, event: &str, handler: Handler)
        -> Result<()>;

    /// Duplicate a node (and its subtree when `deep`). Listeners are not copied.
    fn clone_node(&mut self, node: NodeHandle, deep: bool) -> Result<NodeHandle>;

    /// Read the node's value slot
    fn value(&self, node: NodeHandle) -> Result<Value>;

    /// Write the node's value slot
    fn set_value(&mut self, node: NodeHandle, value: &Value) -> Result<()>;
}
