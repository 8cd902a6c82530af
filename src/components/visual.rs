//! Visual component - a leaf widget with dimensions and style

use crate::component::{Buildable, Component, DataBindable, Duplicate, Styleable, ValueSlot};
use crate::components::container::{publish_target, Container};
use crate::context::Ui;
use crate::entity::Entity;
use crate::id::{Id, IdRegistry};
use crate::layout::Length;
use crate::record::Record;
use crate::style::Style;
use crate::surface::{Handler, NodeHandle, Surface};
use anyhow::Result;
use serde_json::Value;
use tracing::debug;

/// `type` sub-kinds of `input` nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Button,
    Text,
    CheckBox,
    Color,
    Date,
    DateTime,
    Email,
    File,
    Hidden,
    Image,
    Month,
    Number,
    Password,
    Radio,
    Range,
    Reset,
    Search,
    Submit,
    Tel,
    Time,
    Url,
    Week,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Button => "button",
            InputType::Text => "text",
            InputType::CheckBox => "checkbox",
            InputType::Color => "color",
            InputType::Date => "date",
            InputType::DateTime => "datetime-local",
            InputType::Email => "email",
            InputType::File => "file",
            InputType::Hidden => "hidden",
            InputType::Image => "image",
            InputType::Month => "month",
            InputType::Number => "number",
            InputType::Password => "password",
            InputType::Radio => "radio",
            InputType::Range => "range",
            InputType::Reset => "reset",
            InputType::Search => "search",
            InputType::Submit => "submit",
            InputType::Tel => "tel",
            InputType::Time => "time",
            InputType::Url => "url",
            InputType::Week => "week",
        }
    }

    /// Where values of this input type are written
    fn value_slot(&self) -> ValueSlot {
        match self {
            InputType::CheckBox => ValueSlot::Flag("checked".into()),
            InputType::Image => ValueSlot::Attribute("src".into()),
            _ => ValueSlot::Value,
        }
    }
}

/// Leaf widget: a component plus size and inherited style
///
/// Style intent is always recorded on the descriptor; once built, every change
/// is also written straight to the node so a later rebuild reproduces it.
///
/// Copies are made with [`Duplicate`](crate::Duplicate), never by `Clone`.
///
/// ```compile_fail
/// fn copyable<T: Clone>() {}
/// copyable::<kdui::VisualComponent>();
/// ```
#[derive(Debug)]
pub struct VisualComponent {
    component: Component,
    width: Option<Length>,
    height: Option<Length>,
    /// Style handed down by the parent container
    inherited: Style,
}

impl VisualComponent {
    /// Create a leaf that will materialize as `node_kind`
    pub fn new(ids: &IdRegistry, node_kind: impl Into<String>) -> Self {
        Self::from_component(Component::new(Entity::bare(ids), node_kind))
    }

    /// Create a leaf with an initial attribute bag
    pub fn with_attributes<I, K, V>(ids: &IdRegistry, node_kind: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_component(Component::new(Entity::new(ids, attributes), node_kind))
    }

    pub fn from_component(component: Component) -> Self {
        VisualComponent {
            component,
            width: None,
            height: None,
            inherited: Style::new(),
        }
    }

    /// `input` node of the given type
    pub fn input(ids: &IdRegistry, input_type: InputType) -> Self {
        let mut component =
            Component::new(Entity::bare(ids), "input").with_node_sub_kind(input_type.as_str());
        component.set_value_slot(input_type.value_slot());
        Self::from_component(component)
    }

    /// `img` node whose value is its source
    pub fn image(ids: &IdRegistry) -> Self {
        let mut component = Component::new(Entity::bare(ids), "img");
        component.set_value_slot(ValueSlot::Attribute("src".into()));
        Self::from_component(component)
    }

    /// Full-width one pixel rule
    pub fn horizontal_line(ids: &IdRegistry) -> Self {
        Self::new(ids, "hr").with_css_text(
            "position:absolute; top:0; left:0; width:100%; height:1px; background-color:Gray;",
        )
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.component.set_field(field);
        self
    }

    pub fn with_size(mut self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.component.style_mut().set(property, value);
        self
    }

    pub fn with_css_text(mut self, css_text: &str) -> Self {
        let parsed = Style::parse(css_text);
        let style = self.component.style().clone().merge(&parsed);
        *self.component.style_mut() = style;
        self
    }

    /// Stage a value; applied when the component is built
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.component.stage_value(value.into());
        self
    }

    pub fn with_event(mut self, event: &str, handler: Handler) -> Self {
        self.component.stage_event(event, handler);
        self
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut Component {
        &mut self.component
    }

    pub fn id(&self) -> &Id {
        self.component.id()
    }

    pub fn field(&self) -> Option<&str> {
        self.component.field()
    }

    pub fn set_field(&mut self, field: impl Into<String>) {
        self.component.set_field(field);
    }

    pub fn width(&self) -> Option<&Length> {
        self.width.as_ref()
    }

    pub fn height(&self) -> Option<&Length> {
        self.height.as_ref()
    }

    pub fn style(&self) -> &Style {
        self.component.style()
    }

    pub fn inherited_style(&self) -> &Style {
        &self.inherited
    }

    /// Size, own style and inherited style merged in that order
    pub fn effective_style(&self, unit: &str) -> Style {
        let mut style = Style::new();
        if let Some(width) = &self.width {
            style.set("width", width.render(unit));
        }
        if let Some(height) = &self.height {
            style.set("height", height.render(unit));
        }
        style.merge(self.component.style()).merge(&self.inherited)
    }

    pub fn set_value<S: Surface>(&mut self, ui: &mut Ui<S>, value: impl Into<Value>) -> Result<()> {
        self.component.set_value(ui, value.into())
    }

    pub fn value<S: Surface>(&self, ui: &Ui<S>) -> Result<Value> {
        self.component.value(ui)
    }

    pub fn add_event<S: Surface>(&mut self, ui: &mut Ui<S>, event: &str, handler: Handler) -> Result<()> {
        self.component.add_event(ui, event, handler)
    }

    pub fn set_id<S: Surface>(&mut self, ui: &mut Ui<S>, id: impl Into<Id>) -> Result<()> {
        self.component.set_id(ui, id)
    }

    /// Append css text such as `color:red; margin:0`
    pub fn append_css_text<S: Surface>(&mut self, ui: &mut Ui<S>, css_text: &str) -> Result<&mut Self> {
        for declaration in Style::parse(css_text).iter() {
            self.component
                .style_mut()
                .set(declaration.property.clone(), declaration.value.clone());
        }
        self.apply_style(ui)?;
        Ok(self)
    }

    /// Set width and/or height; `None` leaves a dimension unchanged
    pub fn set_size<S: Surface>(
        &mut self,
        ui: &mut Ui<S>,
        width: Option<Length>,
        height: Option<Length>,
    ) -> Result<&mut Self> {
        if let Some(width) = width {
            self.component.style_mut().remove("width");
            self.width = Some(width);
        }
        if let Some(height) = height {
            self.component.style_mut().remove("height");
            self.height = Some(height);
        }
        self.apply_style(ui)?;
        Ok(self)
    }

    /// Center absolutely within the parent
    pub fn center<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<&mut Self> {
        self.append_css_text(
            ui,
            "position:absolute; top:50%; left:50%; transform:translate(-50%, -50%);",
        )
    }

    pub fn bring_to_front<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<&mut Self> {
        let z = self.z_index();
        self.component.style_mut().set("z-index", z.saturating_add(1).to_string());
        self.apply_style(ui)?;
        Ok(self)
    }

    /// Lower the z-index by one, never below zero
    pub fn push_to_back<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<&mut Self> {
        let z = self.z_index();
        if z > 0 {
            self.component.style_mut().set("z-index", (z - 1).to_string());
            self.apply_style(ui)?;
        }
        Ok(self)
    }

    pub fn z_index(&self) -> i64 {
        self.component
            .style()
            .get("z-index")
            .and_then(|z| z.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_visible<S: Surface>(&mut self, ui: &mut Ui<S>, visible: bool) -> Result<&mut Self> {
        let visibility = if visible { "visible" } else { "hidden" };
        self.component.style_mut().set("visibility", visibility);
        self.apply_style(ui)?;
        Ok(self)
    }

    /// Build if needed and attach to `target` (or the surface root)
    pub fn publish<S: Surface>(&mut self, ui: &mut Ui<S>, target: Option<&Container>) -> Result<&mut Self> {
        if !self.is_built() {
            Buildable::build(self, ui)?;
        }
        let parent = publish_target(ui, target)?;
        if let Some(node) = self.node() {
            ui.surface_mut().append_child(parent, node)?;
            debug!(target: "kdui.build", id = %self.id(), ?parent, "published");
        }
        Ok(self)
    }

    /// Write the effective style to the node, if built
    pub(crate) fn apply_style<S: Surface>(&self, ui: &mut Ui<S>) -> Result<()> {
        if let Some(node) = self.component.node() {
            let css_text = self.effective_style(&ui.config().length_unit).to_css_text();
            ui.surface_mut().set_style_text(node, &css_text)?;
        }
        Ok(())
    }

    /// Replace the style handed down by the parent
    pub(crate) fn inherit_style<S: Surface>(&mut self, ui: &mut Ui<S>, style: &Style) -> Result<()> {
        self.inherited = style.clone();
        self.apply_style(ui)
    }

    pub(crate) fn duplicate_with<S: Surface>(&self, ui: &mut Ui<S>, deep: bool) -> Result<Self> {
        Ok(VisualComponent {
            component: self.component.duplicate_with(ui, deep)?,
            width: self.width.clone(),
            height: self.height.clone(),
            inherited: self.inherited.clone(),
        })
    }
}

impl Buildable for VisualComponent {
    /// Build the node, apply size and style, then replay any staged value
    ///
    /// Not guarded: a built component gets a fresh node.
    fn build<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<()> {
        self.component.build(ui)?;
        self.apply_style(ui)?;
        if let Some(value) = self.component.staged_value().cloned() {
            self.component.set_value(ui, value)?;
        }
        Ok(())
    }

    fn node(&self) -> Option<NodeHandle> {
        self.component.node()
    }
}

impl Duplicate for VisualComponent {
    fn duplicate<S: Surface>(&self, ui: &mut Ui<S>) -> Result<Self> {
        self.duplicate_with(ui, true)
    }
}

impl Styleable for VisualComponent {
    fn append_style<S: Surface>(&mut self, ui: &mut Ui<S>, property: &str, value: &str) -> Result<&mut Self> {
        self.component.style_mut().set(property, value);
        self.apply_style(ui)?;
        Ok(self)
    }
}

impl DataBindable for VisualComponent {
    fn set_data<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()> {
        self.component.bind_field(ui, record)
    }
}
