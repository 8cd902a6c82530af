//! Built-in widgets
//!
//! [`Widget`] is the closed set of things a container can hold. Containers and
//! lists need to tell their children apart (nested records go to containers,
//! values go to leaves), so children are stored as this enum rather than as
//! trait objects.

pub mod container;
pub mod list;
pub mod visual;

pub use container::Container;
pub use list::List;
pub use visual::{InputType, VisualComponent};

use crate::component::{Buildable, DataBindable, Duplicate, Styleable};
use crate::context::Ui;
use crate::id::Id;
use crate::record::{self, Record};
use crate::style::Style;
use crate::surface::{NodeHandle, Surface};
use anyhow::Result;
use serde_json::Value;

/// Any child of a container
///
/// Copies are made with [`Duplicate`](crate::Duplicate), never by `Clone`.
///
/// ```compile_fail
/// fn copyable<T: Clone>() {}
/// copyable::<kdui::Widget>();
/// ```
#[derive(Debug)]
pub enum Widget {
    Leaf(VisualComponent),
    Container(Container),
    List(List),
}

impl Widget {
    pub fn id(&self) -> &Id {
        match self {
            Widget::Leaf(leaf) => leaf.id(),
            Widget::Container(container) => container.id(),
            Widget::List(list) => list.id(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Widget::Leaf(leaf) => leaf.field(),
            Widget::Container(container) => container.field(),
            Widget::List(list) => list.field(),
        }
    }

    /// The visual component at the root of this widget
    pub fn visual(&self) -> &VisualComponent {
        match self {
            Widget::Leaf(leaf) => leaf,
            Widget::Container(container) => container.visual(),
            Widget::List(list) => list.container().visual(),
        }
    }

    pub fn visual_mut(&mut self) -> &mut VisualComponent {
        match self {
            Widget::Leaf(leaf) => leaf,
            Widget::Container(container) => container.visual_mut(),
            Widget::List(list) => list.container_mut().visual_mut(),
        }
    }

    /// Children holder, for containers and lists
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Widget::Leaf(_) => None,
            Widget::Container(container) => Some(container),
            Widget::List(list) => Some(list.container()),
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Widget::Leaf(_) => None,
            Widget::Container(container) => Some(container),
            Widget::List(list) => Some(list.container_mut()),
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Widget::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn value<S: Surface>(&self, ui: &Ui<S>) -> Result<Value> {
        self.visual().value(ui)
    }

    pub fn set_value<S: Surface>(&mut self, ui: &mut Ui<S>, value: impl Into<Value>) -> Result<()> {
        self.visual_mut().set_value(ui, value)
    }

    /// Flat binding used for list rows: every leaf reads `record[leaf.field]`
    pub(crate) fn bind_record<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()> {
        match self {
            Widget::Leaf(leaf) => leaf.set_data(ui, record),
            Widget::Container(container) => container.bind_record(ui, record),
            Widget::List(list) => {
                let nested = list
                    .field()
                    .and_then(|field| record::lookup(record, field))
                    .cloned();
                match nested {
                    Some(records) => list.set_data(ui, &records),
                    None => Ok(()),
                }
            }
        }
    }

    pub(crate) fn inherit_style<S: Surface>(&mut self, ui: &mut Ui<S>, style: &Style) -> Result<()> {
        self.visual_mut().inherit_style(ui, style)
    }

    /// Drop owner-index entries for every node below and including this one
    pub(crate) fn release_nodes<S: Surface>(&self, ui: &mut Ui<S>) {
        match self {
            Widget::Leaf(leaf) => {
                if let Some(node) = leaf.node() {
                    ui.release(node);
                }
            }
            Widget::Container(container) => container.release_nodes(ui),
            Widget::List(list) => list.release_nodes(ui),
        }
    }
}

impl Buildable for Widget {
    fn build<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<()> {
        match self {
            Widget::Leaf(leaf) => leaf.build(ui),
            Widget::Container(container) => container.build(ui),
            Widget::List(list) => list.build(ui),
        }
    }

    fn node(&self) -> Option<NodeHandle> {
        self.visual().node()
    }
}

impl Duplicate for Widget {
    fn duplicate<S: Surface>(&self, ui: &mut Ui<S>) -> Result<Self> {
        Ok(match self {
            Widget::Leaf(leaf) => Widget::Leaf(leaf.duplicate(ui)?),
            Widget::Container(container) => Widget::Container(container.duplicate(ui)?),
            Widget::List(list) => Widget::List(list.duplicate(ui)?),
        })
    }
}

impl Styleable for Widget {
    fn append_style<S: Surface>(&mut self, ui: &mut Ui<S>, property: &str, value: &str) -> Result<&mut Self> {
        self.visual_mut().append_style(ui, property, value)?;
        Ok(self)
    }
}

impl DataBindable for Widget {
    fn set_data<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()> {
        match self {
            Widget::Leaf(leaf) => leaf.set_data(ui, record),
            Widget::Container(container) => container.set_data(ui, record),
            Widget::List(list) => list.set_data(ui, record),
        }
    }
}

impl From<VisualComponent> for Widget {
    fn from(leaf: VisualComponent) -> Self {
        Widget::Leaf(leaf)
    }
}

impl From<Container> for Widget {
    fn from(container: Container) -> Self {
        Widget::Container(container)
    }
}

impl From<List> for Widget {
    fn from(list: List) -> Self {
        Widget::List(list)
    }
}
