//! Component system - descriptor state and the capability traits every
//! widget implements
//!
//! A [`Component`] is pure data until it is built: it records which kind of
//! node to create, how to tag it, which record field it binds to, its staged
//! value and its event handlers. Building materializes a surface node; the
//! component is built exactly when it holds a node handle.

use crate::context::Ui;
use crate::entity::Entity;
use crate::error::ComponentError;
use crate::id::Id;
use crate::record::{self, Record};
use crate::style::Style;
use crate::surface::{Handler, NodeHandle, Surface};
use anyhow::Result;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// Materialization into surface nodes
pub trait Buildable {
    /// Build the surface node(s) for this descriptor
    fn build<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<()>;

    /// Surface node, present exactly when built
    fn node(&self) -> Option<NodeHandle>;

    fn is_built(&self) -> bool {
        self.node().is_some()
    }
}

/// Copying a descriptor under a fresh identifier
///
/// A built source yields a built copy with its own duplicated node; the copy
/// never shares a surface node with the original.
pub trait Duplicate: Sized {
    fn duplicate<S: Surface>(&self, ui: &mut Ui<S>) -> Result<Self>;
}

/// Style mutation with write-through once built
pub trait Styleable {
    /// Set a style property
    fn append_style<S: Surface>(
        &mut self,
        ui: &mut Ui<S>,
        property: &str,
        value: &str,
    ) -> Result<&mut Self>;
}

/// Pushing record data into a descriptor by field name
pub trait DataBindable {
    fn set_data<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()>;
}

/// Where a component's value lives on its node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueSlot {
    /// The node's value slot (form-like nodes)
    #[default]
    Value,
    /// A named attribute holding the value as text, e.g. `src` for images
    Attribute(String),
    /// A boolean attribute, present exactly when the value is truthy, e.g.
    /// `checked` for checkboxes
    Flag(String),
}

/// Base descriptor shared by every widget
///
/// Not `Clone`: a copy must get its own id and node, see [`Duplicate`].
///
/// ```compile_fail
/// fn copyable<T: Clone>() {}
/// copyable::<kdui::Component>();
/// ```
pub struct Component {
    entity: Entity,
    node_kind: String,
    node_sub_kind: Option<String>,
    field: Option<String>,
    style: Style,
    value: Option<Value>,
    value_slot: ValueSlot,
    events: Vec<(String, Handler)>,
    node: Option<NodeHandle>,
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", self.entity.id())
            .field("node_kind", &self.node_kind)
            .field("node_sub_kind", &self.node_sub_kind)
            .field("field", &self.field)
            .field("value", &self.value)
            .field("events", &self.events.iter().map(|(e, _)| e).collect::<Vec<_>>())
            .field("node", &self.node)
            .finish()
    }
}

impl Component {
    /// Create an unbuilt component that will materialize as `node_kind`
    pub fn new(entity: Entity, node_kind: impl Into<String>) -> Self {
        Component {
            entity,
            node_kind: node_kind.into(),
            node_sub_kind: None,
            field: None,
            style: Style::new(),
            value: None,
            value_slot: ValueSlot::Value,
            events: Vec::new(),
            node: None,
        }
    }

    /// Builder form of [`Component::set_node_sub_kind`] for fresh components
    pub(crate) fn with_node_sub_kind(mut self, sub_kind: impl Into<String>) -> Self {
        self.node_sub_kind = Some(sub_kind.into());
        self
    }

    pub fn id(&self) -> &Id {
        self.entity.id()
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Override the identifier, re-stamping the node when built
    pub fn set_id<S: Surface>(&mut self, ui: &mut Ui<S>, id: impl Into<Id>) -> Result<()> {
        let id = id.into();
        if let Some(node) = self.node {
            ui.surface_mut().set_attribute(node, "id", id.as_str())?;
            ui.claim(node, &id);
        }
        self.entity.set_id(id);
        Ok(())
    }

    pub fn node_kind(&self) -> &str {
        &self.node_kind
    }

    /// Change the node kind; only allowed before build
    pub fn set_node_kind(&mut self, kind: impl Into<String>) -> Result<()> {
        if self.node.is_some() {
            return Err(ComponentError::requires_unbuilt(self.id().as_str(), "set_node_kind").into());
        }
        self.node_kind = kind.into();
        Ok(())
    }

    pub fn node_sub_kind(&self) -> Option<&str> {
        self.node_sub_kind.as_deref()
    }

    /// Change the node sub-kind (the `type` attribute); only allowed before build
    pub fn set_node_sub_kind(&mut self, sub_kind: Option<String>) -> Result<()> {
        if self.node.is_some() {
            return Err(
                ComponentError::requires_unbuilt(self.id().as_str(), "set_node_sub_kind").into(),
            );
        }
        self.node_sub_kind = sub_kind;
        Ok(())
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Bind this component to a record field
    pub fn set_field(&mut self, name: impl Into<String>) {
        self.field = Some(name.into());
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub(crate) fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn value_slot(&self) -> &ValueSlot {
        &self.value_slot
    }

    pub fn set_value_slot(&mut self, slot: ValueSlot) {
        self.value_slot = slot;
    }

    /// Set a free-form attribute stamped on the node at build time
    pub fn set_attribute<S: Surface>(
        &mut self,
        ui: &mut Ui<S>,
        name: &str,
        value: &str,
    ) -> Result<()> {
        self.entity.set_attribute(name, value);
        if let Some(node) = self.node {
            if name != "id" {
                ui.surface_mut().set_attribute(node, name, value)?;
            }
        }
        Ok(())
    }

    pub fn node(&self) -> Option<NodeHandle> {
        self.node
    }

    pub fn is_built(&self) -> bool {
        self.node.is_some()
    }

    /// Value staged on the descriptor, regardless of build state
    pub fn staged_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Create the surface node
    ///
    /// Unlike container builds this is not guarded: calling it on a built
    /// component replaces the node with a fresh one (the old node is left
    /// wherever it was attached).
    pub fn build<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<NodeHandle> {
        if let Some(old) = self.node.take() {
            ui.release(old);
        }

        let node = ui.surface_mut().create_node(&self.node_kind)?;
        let surface = ui.surface_mut();
        if let Some(sub_kind) = &self.node_sub_kind {
            surface.set_attribute(node, "type", sub_kind)?;
        }
        surface.set_attribute(node, "id", self.entity.id().as_str())?;
        for (name, value) in self.entity.attributes() {
            surface.set_attribute(node, name, value)?;
        }
        for (event, handler) in &self.events {
            surface.add_event_listener(node, event, Handler::clone(handler))?;
        }

        ui.claim(node, self.entity.id());
        self.node = Some(node);

        debug!(target: "kdui.build", id = %self.entity.id(), kind = %self.node_kind, ?node, "component_built");
        Ok(node)
    }

    /// Store a value, writing it to the node when built
    pub fn set_value<S: Surface>(&mut self, ui: &mut Ui<S>, value: Value) -> Result<()> {
        if let Some(node) = self.node {
            write_slot(ui, node, &self.value_slot, &value)?;
        }
        trace!(target: "kdui.data", id = %self.entity.id(), %value, "value_set");
        self.value = Some(value);
        Ok(())
    }

    /// Current value: read back from the node once built, otherwise the staged one
    ///
    /// Attribute slots read as a string (`null` when absent), flag slots as a
    /// boolean.
    pub fn value<S: Surface>(&self, ui: &Ui<S>) -> Result<Value> {
        let Some(node) = self.node else {
            return Ok(self.value.clone().unwrap_or(Value::Null));
        };
        match &self.value_slot {
            ValueSlot::Value => ui.surface().value(node),
            ValueSlot::Attribute(name) => Ok(ui
                .surface()
                .get_attribute(node, name)?
                .map_or(Value::Null, Value::String)),
            ValueSlot::Flag(name) => {
                let present = ui.surface().get_attribute(node, name)?.is_some();
                Ok(Value::Bool(present))
            }
        }
    }

    pub(crate) fn stage_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|(name, _)| name.as_str())
    }

    /// Register (or replace) the handler for `event`
    ///
    /// When built, the new handler is attached to the node right away. A
    /// handler it replaces stays attached: surfaces have no listener removal.
    pub fn add_event<S: Surface>(
        &mut self,
        ui: &mut Ui<S>,
        event: &str,
        handler: Handler,
    ) -> Result<()> {
        if let Some(node) = self.node {
            ui.surface_mut()
                .add_event_listener(node, event, Handler::clone(&handler))?;
        }
        self.stage_event(event, handler);
        Ok(())
    }

    pub(crate) fn stage_event(&mut self, event: &str, handler: Handler) {
        match self.events.iter_mut().find(|(name, _)| name == event) {
            Some(slot) => slot.1 = handler,
            None => self.events.push((event.to_string(), handler)),
        }
    }

    /// Copy under a new id; a built source gets its node duplicated
    ///
    /// `deep` controls whether the node's subtree is duplicated with it.
    /// Containers pass `false` and rebuild the subtree from their children's
    /// own duplicates so every descendant keeps exclusive node ownership.
    pub(crate) fn duplicate_with<S: Surface>(&self, ui: &mut Ui<S>, deep: bool) -> Result<Self> {
        let mut copy = Component {
            entity: self.entity.duplicate(ui.ids()),
            node_kind: self.node_kind.clone(),
            node_sub_kind: self.node_sub_kind.clone(),
            field: self.field.clone(),
            style: self.style.clone(),
            value: self.value.clone(),
            value_slot: self.value_slot.clone(),
            events: self
                .events
                .iter()
                .map(|(event, handler)| (event.clone(), Handler::clone(handler)))
                .collect(),
            node: None,
        };

        if let Some(node) = self.node {
            let dup = ui.surface_mut().clone_node(node, deep)?;
            let surface = ui.surface_mut();
            surface.set_attribute(dup, "id", copy.entity.id().as_str())?;
            for (event, handler) in &copy.events {
                surface.add_event_listener(dup, event, Handler::clone(handler))?;
            }
            ui.claim(dup, copy.entity.id());
            copy.node = Some(dup);
        }

        Ok(copy)
    }

    /// Bind from a record using this component's field
    pub(crate) fn bind_field<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()> {
        let Some(field) = self.field.clone() else {
            return Ok(());
        };
        match record::lookup(record, &field) {
            Some(value) => self.set_value(ui, value.clone()),
            None if ui.config().strict_fields => Err(self.unresolved(&field).into()),
            None => {
                trace!(target: "kdui.data", id = %self.entity.id(), field = %field, "field_undefined_skipped");
                Ok(())
            }
        }
    }

    pub(crate) fn unresolved(&self, field: &str) -> ComponentError {
        ComponentError::UnresolvedField {
            id: self.entity.id().to_string(),
            field: field.to_string(),
        }
    }
}

impl Buildable for Component {
    fn build<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<()> {
        Component::build(self, ui).map(|_| ())
    }

    fn node(&self) -> Option<NodeHandle> {
        self.node
    }
}

impl Duplicate for Component {
    fn duplicate<S: Surface>(&self, ui: &mut Ui<S>) -> Result<Self> {
        self.duplicate_with(ui, true)
    }
}

impl DataBindable for Component {
    fn set_data<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()> {
        self.bind_field(ui, record)
    }
}

fn write_slot<S: Surface>(
    ui: &mut Ui<S>,
    node: NodeHandle,
    slot: &ValueSlot,
    value: &Value,
) -> Result<()> {
    match slot {
        ValueSlot::Value => ui.surface_mut().set_value(node, value),
        ValueSlot::Attribute(name) => {
            ui.surface_mut()
                .set_attribute(node, name, &record::to_attribute_text(value))
        }
        ValueSlot::Flag(name) if record::is_truthy(value) => {
            ui.surface_mut().set_attribute(node, name, "")
        }
        ValueSlot::Flag(name) => ui.surface_mut().remove_attribute(node, name),
    }
}
