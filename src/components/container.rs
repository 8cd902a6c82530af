//! Container component - ordered children, recursive build and field binding

use crate::component::{Buildable, DataBindable, Duplicate, Styleable};
use crate::components::visual::VisualComponent;
use crate::components::Widget;
use crate::config::BindingPolicy;
use crate::context::Ui;
use crate::error::ComponentError;
use crate::id::{Id, IdRegistry};
use crate::layout::Length;
use crate::record::{self, Record};
use crate::style::Style;
use crate::surface::{Handler, NodeHandle, Surface};
use anyhow::Result;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Widget owning an ordered list of children
///
/// Children appended before the container is built wait for its `build()`;
/// children appended afterwards are built and attached immediately.
///
/// Copies are made with [`Duplicate`](crate::Duplicate), never by `Clone`.
///
/// ```compile_fail
/// fn copyable<T: Clone>() {}
/// copyable::<kdui::Container>();
/// ```
#[derive(Debug)]
pub struct Container {
    visual: VisualComponent,
    children: Vec<Widget>,
    /// Style handed to every child
    child_style: Style,
}

impl Container {
    /// Plain `div` container
    pub fn new(ids: &IdRegistry) -> Self {
        Self::from_visual(VisualComponent::new(ids, "div"))
    }

    pub fn from_visual(visual: VisualComponent) -> Self {
        Container {
            visual,
            children: Vec::new(),
            child_style: Style::new(),
        }
    }

    /// Layer: children are positioned relative to it
    pub fn layer(ids: &IdRegistry) -> Self {
        Self::new(ids).with_children_style("position", "relative")
    }

    /// Row: children flow inline
    pub fn row(ids: &IdRegistry) -> Self {
        Self::layer(ids).with_children_style("display", "inline")
    }

    /// Column: children stack as blocks
    pub fn column(ids: &IdRegistry) -> Self {
        Self::layer(ids).with_children_style("display", "block")
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.visual.set_field(field);
        self
    }

    pub fn with_size(mut self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.visual = self.visual.with_size(width, height);
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.visual = self.visual.with_style(property, value);
        self
    }

    pub fn with_event(mut self, event: &str, handler: Handler) -> Self {
        self.visual = self.visual.with_event(event, handler);
        self
    }

    pub fn with_children_style(mut self, property: &str, value: &str) -> Self {
        self.child_style.set(property, value);
        self
    }

    /// Builder form of [`Container::append`]
    ///
    /// Only for unbuilt containers: a built one needs the [`Ui`] to attach the
    /// child, so this fails with `InvalidState` and [`Container::append`] must
    /// be used instead.
    pub fn with_child(mut self, child: impl Into<Widget>) -> Result<Self> {
        if self.visual.is_built() {
            return Err(ComponentError::requires_unbuilt(self.id().as_str(), "with_child").into());
        }
        self.children.push(child.into());
        Ok(self)
    }

    pub fn visual(&self) -> &VisualComponent {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut VisualComponent {
        &mut self.visual
    }

    pub fn id(&self) -> &Id {
        self.visual.id()
    }

    pub fn field(&self) -> Option<&str> {
        self.visual.field()
    }

    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Widget] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children_style(&self) -> &Style {
        &self.child_style
    }

    /// Append a child
    ///
    /// If this container is built the child is built (unless it already is),
    /// given the children style and attached as the last surface child.
    pub fn append<S: Surface>(&mut self, ui: &mut Ui<S>, child: impl Into<Widget>) -> Result<&mut Self> {
        let mut child = child.into();
        if let Some(parent) = self.visual.node() {
            child.inherit_style(ui, &self.child_style)?;
            if !child.is_built() {
                child.build(ui)?;
            }
            if let Some(node) = child.node() {
                ui.surface_mut().append_child(parent, node)?;
            }
            trace!(target: "kdui.build", parent = %self.id(), child = %child.id(), "attached_on_join");
        }
        self.children.push(child);
        Ok(self)
    }

    /// Append several children in order
    pub fn append_all<S, I>(&mut self, ui: &mut Ui<S>, children: I) -> Result<&mut Self>
    where
        S: Surface,
        I: IntoIterator,
        I::Item: Into<Widget>,
    {
        for child in children {
            self.append(ui, child)?;
        }
        Ok(self)
    }

    /// Set this container's own value
    pub fn set_value<S: Surface>(&mut self, ui: &mut Ui<S>, value: impl Into<Value>) -> Result<()> {
        self.visual.set_value(ui, value)
    }

    pub fn value<S: Surface>(&self, ui: &Ui<S>) -> Result<Value> {
        self.visual.value(ui)
    }

    /// Set the value of every immediate child bound to `field`
    ///
    /// Does not look into nested containers. Returns how many children matched.
    pub fn set_value_by_field<S: Surface>(
        &mut self,
        ui: &mut Ui<S>,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<usize> {
        let value = value.into();
        let mut matched = 0;
        for child in &mut self.children {
            if child.field() == Some(field) {
                child.set_value(ui, value.clone())?;
                matched += 1;
            }
        }
        Ok(matched)
    }

    /// Add a declaration to the children style and re-apply it to every child
    pub fn append_children_style<S: Surface>(
        &mut self,
        ui: &mut Ui<S>,
        property: &str,
        value: &str,
    ) -> Result<&mut Self> {
        self.child_style.set(property, value);
        for child in &mut self.children {
            child.inherit_style(ui, &self.child_style)?;
        }
        Ok(self)
    }

    /// Call `callback` for every immediate child, in order
    pub fn for_each_component(&self, mut callback: impl FnMut(&Widget)) -> &Self {
        for child in &self.children {
            callback(child);
        }
        self
    }

    /// Call `callback` for every descendant whose id is `id`
    ///
    /// Depth-first, pre-order. A matching child is not searched further, but
    /// the traversal continues past it, so duplicated ids yield several calls.
    /// Returns the number of calls made.
    pub fn for_component_by_id(&mut self, id: &str, mut callback: impl FnMut(&mut Widget)) -> usize {
        self.visit_by_id(id, &mut callback)
    }

    fn visit_by_id(&mut self, id: &str, callback: &mut dyn FnMut(&mut Widget)) -> usize {
        let mut calls = 0;
        for child in &mut self.children {
            if child.id() == id {
                callback(child);
                calls += 1;
            } else if let Some(container) = child.as_container_mut() {
                calls += container.visit_by_id(id, callback);
            }
        }
        calls
    }

    /// First descendant with the given id, depth-first
    pub fn find_by_id(&self, id: &str) -> Option<&Widget> {
        for child in &self.children {
            if child.id() == id {
                return Some(child);
            }
            if let Some(found) = child.as_container().and_then(|c| c.find_by_id(id)) {
                return Some(found);
            }
        }
        None
    }

    /// Drop every child, detaching their nodes when built
    ///
    /// Grandchildren keep their nodes; only the direct children are detached.
    pub fn clear<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<&mut Self> {
        if let Some(node) = self.visual.node() {
            let attached = ui.surface().children(node)?;
            for child in attached {
                ui.surface_mut().remove_child(node, child)?;
            }
        }
        for child in &self.children {
            child.release_nodes(ui);
        }
        debug!(target: "kdui.build", id = %self.id(), removed = self.children.len(), "container_cleared");
        self.children.clear();
        Ok(self)
    }

    /// Build if needed and attach to `target` (or the surface root)
    pub fn publish<S: Surface>(&mut self, ui: &mut Ui<S>, target: Option<&Container>) -> Result<&mut Self> {
        self.build(ui)?;
        let parent = publish_target(ui, target)?;
        if let Some(node) = self.visual.node() {
            ui.surface_mut().append_child(parent, node)?;
            debug!(target: "kdui.build", id = %self.id(), ?parent, "published");
        }
        Ok(self)
    }

    /// Push every value of `record` into every bound leaf below this container
    ///
    /// Unlike [`DataBindable::set_data`] this ignores the containers' own
    /// fields and treats the record as flat: each leaf reads
    /// `record[leaf.field]`.
    pub fn bind_record<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()> {
        for child in &mut self.children {
            child.bind_record(ui, record)?;
        }
        Ok(())
    }

    pub(crate) fn release_nodes<S: Surface>(&self, ui: &mut Ui<S>) {
        if let Some(node) = self.visual.node() {
            ui.release(node);
        }
        for child in &self.children {
            child.release_nodes(ui);
        }
    }

    pub(crate) fn clear_descriptors(&mut self) -> Vec<Widget> {
        std::mem::take(&mut self.children)
    }
}

impl Buildable for Container {
    /// Build this container and every unbuilt child, attaching children in order
    ///
    /// A no-op when already built.
    fn build<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<()> {
        if self.visual.is_built() {
            return Ok(());
        }

        self.visual.build(ui)?;
        let parent = match self.visual.node() {
            Some(node) => node,
            None => return Err(ComponentError::requires_built(self.id().as_str(), "build").into()),
        };

        for child in &mut self.children {
            child.inherit_style(ui, &self.child_style)?;
            if !child.is_built() {
                child.build(ui)?;
            }
            if let Some(node) = child.node() {
                ui.surface_mut().append_child(parent, node)?;
            }
        }

        debug!(target: "kdui.build", id = %self.id(), children = self.children.len(), "container_built");
        Ok(())
    }

    fn node(&self) -> Option<NodeHandle> {
        self.visual.node()
    }
}

impl Duplicate for Container {
    /// Deep copy: every child is duplicated independently
    ///
    /// For a built container the copy's node is a shallow duplicate and the
    /// children's duplicated nodes are attached to it, so each descriptor in
    /// the copy owns exactly the node it refers to.
    fn duplicate<S: Surface>(&self, ui: &mut Ui<S>) -> Result<Self> {
        let visual = self.visual.duplicate_with(ui, false)?;
        let mut children = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let copy = child.duplicate(ui)?;
            if let (Some(parent), Some(node)) = (visual.node(), copy.node()) {
                ui.surface_mut().append_child(parent, node)?;
            }
            children.push(copy);
        }

        Ok(Container {
            visual,
            children,
            child_style: self.child_style.clone(),
        })
    }
}

impl Styleable for Container {
    fn append_style<S: Surface>(&mut self, ui: &mut Ui<S>, property: &str, value: &str) -> Result<&mut Self> {
        self.visual.append_style(ui, property, value)?;
        Ok(self)
    }
}

impl DataBindable for Container {
    /// Bind children whose field is defined in `record`
    ///
    /// Container children receive the nested record, leaves receive the value.
    /// With [`BindingPolicy::FirstChildOnly`] only the first child is looked
    /// at; with [`BindingPolicy::AllMatching`] every child is.
    fn set_data<S: Surface>(&mut self, ui: &mut Ui<S>, record: &Record) -> Result<()> {
        let strict = ui.config().strict_fields;
        if !record.is_object() {
            if strict {
                warn!(target: "kdui.data", id = %self.id(), found = record::type_name(record), "record_rejected");
                return Err(ComponentError::NotARecord {
                    id: self.id().to_string(),
                    found: record::type_name(record),
                }
                .into());
            }
            trace!(target: "kdui.data", id = %self.id(), "non_object_record_ignored");
            return Ok(());
        }

        let limit = match ui.config().binding {
            BindingPolicy::AllMatching => self.children.len(),
            BindingPolicy::FirstChildOnly => self.children.len().min(1),
        };

        let mut bound = 0;
        for child in self.children.iter_mut().take(limit) {
            let Some(field) = child.field().map(str::to_string) else {
                continue;
            };
            match record::lookup(record, &field) {
                Some(value) => {
                    match child {
                        Widget::Leaf(leaf) => leaf.set_value(ui, value.clone())?,
                        Widget::Container(container) => container.set_data(ui, value)?,
                        Widget::List(list) => list.set_data(ui, value)?,
                    }
                    bound += 1;
                }
                None if strict => {
                    warn!(target: "kdui.data", id = %child.id(), field = %field, "field_unresolved");
                    return Err(ComponentError::UnresolvedField {
                        id: child.id().to_string(),
                        field,
                    }
                    .into());
                }
                None => {}
            }
        }

        debug!(target: "kdui.data", id = %self.id(), bound, policy = ?ui.config().binding, "data_set");
        Ok(())
    }
}

/// Node that `publish` attaches to
pub(crate) fn publish_target<S: Surface>(ui: &Ui<S>, target: Option<&Container>) -> Result<NodeHandle> {
    match target {
        None => Ok(ui.surface().root()),
        Some(container) => container
            .node()
            .ok_or_else(|| ComponentError::requires_built(container.id().as_str(), "publish target").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::visual::InputType;
    use crate::config::Config;
    use crate::surface::MemorySurface;
    use serde_json::json;

    fn text_input(ui: &Ui<MemorySurface>, field: &str) -> VisualComponent {
        VisualComponent::input(ui.ids(), InputType::Text).with_field(field)
    }

    #[test]
    fn test_build_attaches_children_in_order() {
        let mut ui = Ui::headless();
        let a = text_input(&ui, "a");
        let b = text_input(&ui, "b");
        let (a_id, b_id) = (a.id().clone(), b.id().clone());

        let mut column = Container::column(ui.ids()).with_child(a).unwrap().with_child(b).unwrap();
        column.build(&mut ui).unwrap();

        let node = column.node().unwrap();
        let kids = ui.surface().children(node).unwrap();
        assert_eq!(kids.len(), 2);
        assert_eq!(ui.owner_of(kids[0]), Some(&a_id));
        assert_eq!(ui.owner_of(kids[1]), Some(&b_id));
        assert_eq!(
            ui.surface().style_text(kids[0]),
            Some("position:relative;display:block;")
        );
    }

    #[test]
    fn test_double_build_does_not_duplicate_children() {
        let mut ui = Ui::headless();
        let child = text_input(&ui, "a");
        let mut container = Container::new(ui.ids()).with_child(child).unwrap();

        container.build(&mut ui).unwrap();
        let node = container.node().unwrap();
        let child_node = container.children()[0].node().unwrap();
        let before = ui.surface().node_count();

        container.build(&mut ui).unwrap();

        assert_eq!(container.node(), Some(node));
        assert_eq!(container.children()[0].node(), Some(child_node));
        assert_eq!(ui.surface().children(node).unwrap(), vec![child_node]);
        assert_eq!(ui.surface().node_count(), before);
    }

    #[test]
    fn test_attach_on_join() {
        let mut ui = Ui::headless();
        let mut unbuilt = Container::new(ui.ids());
        let first = text_input(&ui, "a");
        unbuilt.append(&mut ui, first).unwrap();
        assert!(!unbuilt.children()[0].is_built());

        unbuilt.build(&mut ui).unwrap();
        assert!(unbuilt.children()[0].is_built());

        let late = text_input(&ui, "b");
        unbuilt.append(&mut ui, late).unwrap();
        let late_node = unbuilt.children()[1].node().unwrap();
        assert_eq!(ui.surface().parent(late_node), unbuilt.node());
    }

    #[test]
    fn test_builder_child_rejected_once_built() {
        let mut ui = Ui::headless();
        let mut container = Container::new(ui.ids());
        container.build(&mut ui).unwrap();

        let late = text_input(&ui, "a");
        let err = container.with_child(late).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::InvalidState { operation: "with_child", required: "unbuilt", .. })
        ));
    }

    #[test]
    fn test_set_data_binds_all_matching_children() {
        let mut ui = Ui::headless();
        let mut column = Container::column(ui.ids());
        let first = text_input(&ui, "first");
        let last = text_input(&ui, "last");
        column.append_all(&mut ui, [first, last]).unwrap();
        column.build(&mut ui).unwrap();

        column
            .set_data(&mut ui, &json!({"first": "Grace", "last": "Hopper"}))
            .unwrap();

        assert_eq!(column.children()[0].value(&ui).unwrap(), json!("Grace"));
        assert_eq!(column.children()[1].value(&ui).unwrap(), json!("Hopper"));
    }

    #[test]
    fn test_set_data_first_child_only_policy() {
        let mut ui =
            Ui::headless_with_config(Config::default().with_binding(BindingPolicy::FirstChildOnly));
        let mut column = Container::column(ui.ids());
        let first = text_input(&ui, "first");
        let last = text_input(&ui, "last");
        column.append_all(&mut ui, [first, last]).unwrap();
        column.build(&mut ui).unwrap();

        column
            .set_data(&mut ui, &json!({"first": "Grace", "last": "Hopper"}))
            .unwrap();

        assert_eq!(column.children()[0].value(&ui).unwrap(), json!("Grace"));
        assert_eq!(column.children()[1].value(&ui).unwrap(), Value::Null);
    }

    #[test]
    fn test_set_data_ignores_unbound_fields() {
        let mut ui = Ui::headless();
        let mut container = Container::new(ui.ids());
        let name = text_input(&ui, "name");
        container.append(&mut ui, name).unwrap();

        container
            .set_data(&mut ui, &json!({"name": "Ada", "age": 36}))
            .unwrap();
        assert_eq!(container.children()[0].value(&ui).unwrap(), json!("Ada"));

        // Staged before build, live after
        container.build(&mut ui).unwrap();
        let node = container.children()[0].node().unwrap();
        assert_eq!(ui.surface().value(node).unwrap(), json!("Ada"));
    }

    #[test]
    fn test_set_data_recurses_into_nested_records() {
        let mut ui = Ui::headless();
        let street = text_input(&ui, "street");
        let address = Container::row(ui.ids()).with_field("address").with_child(street).unwrap();
        let name = text_input(&ui, "name");
        let mut form = Container::column(ui.ids())
            .with_child(name).unwrap()
            .with_child(address).unwrap();
        form.build(&mut ui).unwrap();

        form.set_data(
            &mut ui,
            &json!({"name": "Ada", "address": {"street": "St James's Square"}}),
        )
        .unwrap();

        let address = form.children()[1].as_container().unwrap();
        assert_eq!(
            address.children()[0].value(&ui).unwrap(),
            json!("St James's Square")
        );
    }

    #[test]
    fn test_set_data_leaves_own_value_alone() {
        let mut ui = Ui::headless();
        let street = text_input(&ui, "street");
        let mut address = Container::row(ui.ids())
            .with_field("address")
            .with_child(street)
            .unwrap();
        address.build(&mut ui).unwrap();
        address.set_value(&mut ui, "kept").unwrap();

        address
            .set_data(&mut ui, &json!({"address": "replaced", "street": "Main"}))
            .unwrap();

        assert_eq!(address.value(&ui).unwrap(), json!("kept"));
        assert_eq!(address.children()[0].value(&ui).unwrap(), json!("Main"));
    }

    #[test]
    fn test_strict_binding_errors() {
        let mut ui = Ui::headless_with_config(Config::default().with_strict_fields(true));
        let mut container = Container::new(ui.ids());
        let name = text_input(&ui, "name");
        container.append(&mut ui, name).unwrap();

        let err = container.set_data(&mut ui, &json!({"age": 1})).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::UnresolvedField { .. })
        ));

        let err = container.set_data(&mut ui, &json!([1, 2])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::NotARecord { found: "array", .. })
        ));
    }

    #[test]
    fn test_set_value_by_field_is_shallow() {
        let mut ui = Ui::headless();
        let nested = text_input(&ui, "x");
        let inner = Container::new(ui.ids()).with_child(nested).unwrap();
        let direct = text_input(&ui, "x");
        let mut outer = Container::new(ui.ids())
            .with_child(inner).unwrap()
            .with_child(direct).unwrap();

        let matched = outer.set_value_by_field(&mut ui, "x", 5).unwrap();

        assert_eq!(matched, 1);
        assert_eq!(outer.children()[1].value(&ui).unwrap(), json!(5));
        let inner = outer.children()[0].as_container().unwrap();
        assert_eq!(inner.children()[0].value(&ui).unwrap(), Value::Null);
    }

    #[test]
    fn test_duplicate_built_container_is_independent() {
        let mut ui = Ui::headless();
        let name = text_input(&ui, "name");
        let mut original = Container::column(ui.ids()).with_child(name).unwrap();
        original.build(&mut ui).unwrap();
        original
            .set_data(&mut ui, &json!({"name": "Ada"}))
            .unwrap();

        let mut copy = original.duplicate(&mut ui).unwrap();
        assert_ne!(copy.id(), original.id());
        assert_ne!(copy.children()[0].id(), original.children()[0].id());
        assert!(copy.is_built());

        // Copy's child node lives under the copy's node
        let copy_child = copy.children()[0].node().unwrap();
        assert_eq!(ui.surface().parent(copy_child), copy.node());
        assert_eq!(
            ui.surface().children(copy.node().unwrap()).unwrap(),
            vec![copy_child]
        );

        copy.set_data(&mut ui, &json!({"name": "Grace"})).unwrap();
        assert_eq!(copy.children()[0].value(&ui).unwrap(), json!("Grace"));
        assert_eq!(original.children()[0].value(&ui).unwrap(), json!("Ada"));
    }

    #[test]
    fn test_duplicate_unbuilt_container() {
        let mut ui = Ui::headless();
        let name = text_input(&ui, "name");
        let original = Container::row(ui.ids()).with_child(name).unwrap();

        let copy = original.duplicate(&mut ui).unwrap();
        assert!(!copy.is_built());
        assert!(!copy.children()[0].is_built());
        assert_eq!(copy.children_style(), original.children_style());
        assert_eq!(copy.children()[0].field(), Some("name"));
    }

    #[test]
    fn test_append_children_style() {
        let mut ui = Ui::headless();
        let built_child = text_input(&ui, "a");
        let mut container = Container::new(ui.ids()).with_child(built_child).unwrap();
        container.build(&mut ui).unwrap();

        container.append_children_style(&mut ui, "margin", "4px").unwrap();
        container.append_children_style(&mut ui, "margin", "8px").unwrap();

        let node = container.children()[0].node().unwrap();
        assert_eq!(ui.surface().style_text(node), Some("margin:8px;"));

        // Unbuilt containers only stage it
        let mut staged = Container::new(ui.ids());
        let child = text_input(&ui, "b");
        staged.append(&mut ui, child).unwrap();
        staged.append_children_style(&mut ui, "color", "red").unwrap();
        assert_eq!(
            staged.children()[0].visual().inherited_style().get("color"),
            Some("red")
        );
    }

    #[test]
    fn test_for_component_by_id() {
        let mut ui = Ui::headless();
        let target = text_input(&ui, "t");
        let target_id = target.id().clone();
        let inner = Container::new(ui.ids()).with_child(target).unwrap();
        let mut outer = Container::new(ui.ids())
            .with_child(text_input(&ui, "a")).unwrap()
            .with_child(inner).unwrap();

        let mut seen = Vec::new();
        let calls = outer.for_component_by_id(target_id.as_str(), |w| seen.push(w.id().clone()));
        assert_eq!(calls, 1);
        assert_eq!(seen, vec![target_id.clone()]);

        assert!(outer.find_by_id(target_id.as_str()).is_some());
        assert!(outer.find_by_id("nope").is_none());
    }

    #[test]
    fn test_for_component_by_id_visits_duplicates() {
        let mut ui = Ui::headless();
        let mut a = text_input(&ui, "a");
        let mut b = text_input(&ui, "b");
        a.set_id(&mut ui, "dup").unwrap();
        b.set_id(&mut ui, "dup").unwrap();
        let inner = Container::new(ui.ids()).with_child(b).unwrap();
        let mut outer = Container::new(ui.ids()).with_child(a).unwrap().with_child(inner).unwrap();

        let calls = outer.for_component_by_id("dup", |w| {
            if let Widget::Leaf(leaf) = w {
                leaf.set_field("seen");
            }
        });
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_for_each_component() {
        let mut ui = Ui::headless();
        let a = text_input(&ui, "a");
        let b = text_input(&ui, "b");
        let mut container = Container::new(ui.ids());
        container.append_all(&mut ui, [a, b]).unwrap();

        let mut fields = Vec::new();
        container.for_each_component(|w| fields.push(w.field().map(str::to_string)));
        assert_eq!(fields, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn test_clear_detaches_children() {
        let mut ui = Ui::headless();
        let a = text_input(&ui, "a");
        let mut container = Container::new(ui.ids()).with_child(a).unwrap();
        container.build(&mut ui).unwrap();
        let child_node = container.children()[0].node().unwrap();

        container.clear(&mut ui).unwrap();

        assert!(container.is_empty());
        assert!(ui.surface().children(container.node().unwrap()).unwrap().is_empty());
        assert_eq!(ui.surface().parent(child_node), None);
        assert_eq!(ui.owner_of(child_node), None);
    }

    #[test]
    fn test_publish_container() {
        let mut ui = Ui::headless();
        let mut host = Container::new(ui.ids());
        host.publish(&mut ui, None).unwrap();

        let a = text_input(&ui, "a");
        let mut panel = Container::new(ui.ids()).with_child(a).unwrap();
        panel.publish(&mut ui, Some(&host)).unwrap();

        assert!(panel.children()[0].is_built());
        assert_eq!(ui.surface().parent(panel.node().unwrap()), host.node());
        assert!(ui.surface().is_attached(panel.children()[0].node().unwrap()));
    }
}
