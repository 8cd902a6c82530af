//! List component - one templated row per record
//!
//! The first child given to a list is not rendered. At build time it is
//! captured as the row template; every assignment of records then stamps a
//! fresh duplicate of the template per record, binds it and appends it.

use crate::component::{Buildable, DataBindable, Duplicate, Styleable};
use crate::components::container::Container;
use crate::components::Widget;
use crate::config::FillMode;
use crate::context::Ui;
use crate::error::ComponentError;
use crate::id::{Id, IdRegistry};
use crate::layout::Length;
use crate::record::{self, Record};
use crate::surface::{NodeHandle, Surface};
use anyhow::Result;
use tracing::{debug, trace, warn};

/// Container whose rows are generated from an array of records
///
/// Copies are made with [`Duplicate`](crate::Duplicate), never by `Clone`.
///
/// ```compile_fail
/// fn copyable<T: Clone>() {}
/// copyable::<kdui::List>();
/// ```
#[derive(Debug)]
pub struct List {
    container: Container,
    /// Never built through the list and never attached
    template: Option<Box<Widget>>,
    records: Option<Vec<Record>>,
}

impl List {
    pub fn new(ids: &IdRegistry) -> Self {
        Self::from_container(Container::new(ids))
    }

    /// Wrap an existing container; its first child becomes the template
    pub fn from_container(container: Container) -> Self {
        List {
            container,
            template: None,
            records: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.container = self.container.with_field(field);
        self
    }

    pub fn with_size(mut self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.container = self.container.with_size(width, height);
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.container = self.container.with_style(property, value);
        self
    }

    pub fn with_children_style(mut self, property: &str, value: &str) -> Self {
        self.container = self.container.with_children_style(property, value);
        self
    }

    /// Add an initial child; only the first one is used, as the template
    ///
    /// Fails with `InvalidState` once the list is built.
    pub fn with_child(mut self, child: impl Into<Widget>) -> Result<Self> {
        self.container = self.container.with_child(child)?;
        Ok(self)
    }

    /// Set the row template directly instead of capturing the first child
    pub fn with_template(mut self, template: impl Into<Widget>) -> Self {
        self.template = Some(Box::new(template.into()));
        self
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn id(&self) -> &Id {
        self.container.id()
    }

    pub fn field(&self) -> Option<&str> {
        self.container.field()
    }

    pub fn template(&self) -> Option<&Widget> {
        self.template.as_deref()
    }

    /// Current rows (the initial children until the list is built)
    pub fn rows(&self) -> &[Widget] {
        self.container.children()
    }

    pub fn records(&self) -> Option<&[Record]> {
        self.records.as_deref()
    }

    /// Stage records without filling
    pub fn set_records(&mut self, records: Vec<Record>) -> &mut Self {
        self.records = Some(records);
        self
    }

    /// Stamp one row per staged record
    ///
    /// With [`FillMode::Replace`] existing rows are cleared first; with
    /// [`FillMode::Append`] they are kept. Does nothing when no records are
    /// staged.
    pub fn fill<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<&mut Self> {
        let Some(records) = self.records.clone() else {
            return Ok(self);
        };
        let Some(template) = self.template.as_deref() else {
            return Err(ComponentError::MissingTemplate {
                id: self.container.id().to_string(),
            }
            .into());
        };

        // Bind every row before touching the current ones, so a failed
        // binding leaves the list as it was
        let mut rows: Vec<Widget> = Vec::with_capacity(records.len());
        for record in &records {
            let mut row = template.duplicate(ui)?;
            if let Err(err) = row.bind_record(ui, record) {
                row.release_nodes(ui);
                for row in &rows {
                    row.release_nodes(ui);
                }
                return Err(err);
            }
            rows.push(row);
        }

        if ui.config().fill_mode == FillMode::Replace {
            self.container.clear(ui)?;
        }
        self.container.append_all(ui, rows)?;

        debug!(
            target: "kdui.list",
            id = %self.container.id(),
            records = records.len(),
            rows = self.container.len(),
            mode = ?ui.config().fill_mode,
            "list_filled"
        );
        Ok(self)
    }

    pub fn publish<S: Surface>(&mut self, ui: &mut Ui<S>, target: Option<&Container>) -> Result<&mut Self> {
        self.build(ui)?;
        self.container.publish(ui, target)?;
        Ok(self)
    }

    pub(crate) fn release_nodes<S: Surface>(&self, ui: &mut Ui<S>) {
        self.container.release_nodes(ui);
        if let Some(template) = &self.template {
            template.release_nodes(ui);
        }
    }
}

impl Buildable for List {
    /// Capture the template, drop the initial children, build, then fill
    ///
    /// A no-op when already built.
    fn build<S: Surface>(&mut self, ui: &mut Ui<S>) -> Result<()> {
        if self.container.is_built() {
            return Ok(());
        }

        if self.template.is_none() {
            let Some(first) = self.container.children().first() else {
                return Err(ComponentError::MissingTemplate {
                    id: self.container.id().to_string(),
                }
                .into());
            };
            let template = first.duplicate(ui)?;
            trace!(target: "kdui.list", id = %self.container.id(), template = %template.id(), "template_captured");
            self.template = Some(Box::new(template));
        }

        for initial in self.container.clear_descriptors() {
            initial.release_nodes(ui);
        }

        self.container.build(ui)?;
        if self.records.is_some() {
            self.fill(ui)?;
        }
        Ok(())
    }

    fn node(&self) -> Option<NodeHandle> {
        self.container.node()
    }
}

impl Duplicate for List {
    fn duplicate<S: Surface>(&self, ui: &mut Ui<S>) -> Result<Self> {
        let template = match &self.template {
            Some(template) => Some(Box::new(template.duplicate(ui)?)),
            None => None,
        };
        Ok(List {
            container: self.container.duplicate(ui)?,
            template,
            records: self.records.clone(),
        })
    }
}

impl Styleable for List {
    fn append_style<S: Surface>(&mut self, ui: &mut Ui<S>, property: &str, value: &str) -> Result<&mut Self> {
        self.container.append_style(ui, property, value)?;
        Ok(self)
    }
}

impl DataBindable for List {
    /// Store an array of records, filling right away when built
    fn set_data<S: Surface>(&mut self, ui: &mut Ui<S>, records: &Record) -> Result<()> {
        let Some(items) = records.as_array() else {
            if ui.config().strict_fields {
                warn!(target: "kdui.data", id = %self.id(), found = record::type_name(records), "list_data_rejected");
                return Err(ComponentError::NotARecord {
                    id: self.id().to_string(),
                    found: record::type_name(records),
                }
                .into());
            }
            trace!(target: "kdui.data", id = %self.id(), "non_array_records_ignored");
            return Ok(());
        };

        let previous = self.records.replace(items.clone());
        if self.container.is_built() {
            if let Err(err) = self.fill(ui) {
                self.records = previous;
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::visual::{InputType, VisualComponent};
    use crate::config::Config;
    use crate::surface::MemorySurface;
    use serde_json::{json, Value};

    fn text_input(ui: &Ui<MemorySurface>, field: &str) -> VisualComponent {
        VisualComponent::input(ui.ids(), InputType::Text).with_field(field)
    }

    fn row_template(ui: &Ui<MemorySurface>) -> Container {
        Container::row(ui.ids())
            .with_child(text_input(ui, "first")).unwrap()
            .with_child(text_input(ui, "last")).unwrap()
    }

    fn row_values(ui: &Ui<MemorySurface>, list: &List) -> Vec<(Value, Value)> {
        list.rows()
            .iter()
            .map(|row| {
                let row = row.as_container().unwrap();
                (
                    row.children()[0].value(ui).unwrap(),
                    row.children()[1].value(ui).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_build_without_children_fails() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids());

        let err = list.build(&mut ui).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::MissingTemplate { .. })
        ));
        assert!(!list.is_built());
    }

    #[test]
    fn test_builder_child_rejected_once_built() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids())
            .with_child(text_input(&ui, "name"))
            .unwrap();
        list.build(&mut ui).unwrap();

        let err = list.with_child(text_input(&ui, "other")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_rows_from_records() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids()).with_child(row_template(&ui)).unwrap();
        list.build(&mut ui).unwrap();
        assert!(list.rows().is_empty());

        list.set_data(
            &mut ui,
            &json!([
                {"first": "Ada", "last": "Lovelace"},
                {"first": "Grace", "last": "Hopper"},
            ]),
        )
        .unwrap();

        assert_eq!(
            row_values(&ui, &list),
            vec![
                (json!("Ada"), json!("Lovelace")),
                (json!("Grace"), json!("Hopper")),
            ]
        );

        let node = list.node().unwrap();
        let attached = ui.surface().children(node).unwrap();
        assert_eq!(attached.len(), 2);
        assert_eq!(ui.owner_of(attached[1]), Some(list.rows()[1].id()));
    }

    #[test]
    fn test_only_first_child_is_a_stencil() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids())
            .with_child(text_input(&ui, "name")).unwrap()
            .with_child(text_input(&ui, "name")).unwrap()
            .with_child(text_input(&ui, "name")).unwrap();
        list.set_records(vec![json!({"name": "a"}), json!({"name": "b"}), json!({"name": "c"})]);

        list.build(&mut ui).unwrap();

        assert_eq!(list.rows().len(), 3);
        let values: Vec<Value> = list.rows().iter().map(|r| r.value(&ui).unwrap()).collect();
        assert_eq!(values, vec![json!("a"), json!("b"), json!("c")]);

        let template = list.template().unwrap();
        assert!(!template.is_built());
        assert!(list.rows().iter().all(|r| r.id() != template.id()));
        assert_eq!(ui.surface().children(list.node().unwrap()).unwrap().len(), 3);
    }

    #[test]
    fn test_refill_replaces_rows() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids()).with_child(text_input(&ui, "name")).unwrap();
        list.build(&mut ui).unwrap();

        list.set_data(&mut ui, &json!([{"name": "a"}, {"name": "b"}])).unwrap();
        list.set_data(&mut ui, &json!([{"name": "c"}])).unwrap();

        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.rows()[0].value(&ui).unwrap(), json!("c"));
        assert_eq!(ui.surface().children(list.node().unwrap()).unwrap().len(), 1);
    }

    #[test]
    fn test_append_fill_mode_accumulates() {
        let mut ui =
            Ui::headless_with_config(Config::default().with_fill_mode(FillMode::Append));
        let mut list = List::new(ui.ids()).with_child(text_input(&ui, "name")).unwrap();
        list.build(&mut ui).unwrap();

        list.set_data(&mut ui, &json!([{"name": "a"}])).unwrap();
        list.set_data(&mut ui, &json!([{"name": "b"}])).unwrap();

        let values: Vec<Value> = list.rows().iter().map(|r| r.value(&ui).unwrap()).collect();
        assert_eq!(values, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_failed_refill_keeps_previous_rows() {
        let mut ui = Ui::headless_with_config(Config::default().with_strict_fields(true));
        let mut list = List::new(ui.ids())
            .with_child(text_input(&ui, "name"))
            .unwrap();
        list.build(&mut ui).unwrap();
        list.set_data(&mut ui, &json!([{"name": "a"}, {"name": "b"}])).unwrap();

        let err = list
            .set_data(&mut ui, &json!([{"name": "c"}, {"nick": "d"}]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::UnresolvedField { .. })
        ));

        let values: Vec<Value> = list.rows().iter().map(|r| r.value(&ui).unwrap()).collect();
        assert_eq!(values, vec![json!("a"), json!("b")]);
        assert_eq!(ui.surface().children(list.node().unwrap()).unwrap().len(), 2);
        assert_eq!(list.records().map(<[Record]>::len), Some(2));
    }

    #[test]
    fn test_records_before_build_fill_on_build() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids()).with_child(row_template(&ui)).unwrap();

        list.set_data(&mut ui, &json!([{"first": "Ada", "last": "Lovelace"}]))
            .unwrap();
        // Not built yet: the initial child is still the only row
        assert_eq!(list.rows().len(), 1);

        list.build(&mut ui).unwrap();
        assert_eq!(
            row_values(&ui, &list),
            vec![(json!("Ada"), json!("Lovelace"))]
        );
        assert!(list.rows()[0].is_built());
    }

    #[test]
    fn test_rows_bind_flat_through_nested_containers() {
        let mut ui = Ui::headless();
        let inner = Container::new(ui.ids())
            .with_field("ignored")
            .with_child(text_input(&ui, "city")).unwrap();
        let template = Container::row(ui.ids())
            .with_child(text_input(&ui, "name")).unwrap()
            .with_child(inner).unwrap();
        let mut list = List::new(ui.ids()).with_child(template).unwrap();
        list.build(&mut ui).unwrap();

        list.set_data(&mut ui, &json!([{"name": "Ada", "city": "London"}]))
            .unwrap();

        let row = list.rows()[0].as_container().unwrap();
        let inner = row.children()[1].as_container().unwrap();
        assert_eq!(inner.children()[0].value(&ui).unwrap(), json!("London"));
    }

    #[test]
    fn test_non_array_data() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids()).with_child(text_input(&ui, "name")).unwrap();
        list.build(&mut ui).unwrap();
        list.set_data(&mut ui, &json!({"name": "a"})).unwrap();
        assert!(list.records().is_none());

        let mut strict = Ui::headless_with_config(Config::default().with_strict_fields(true));
        let mut list = List::new(strict.ids()).with_child(text_input(&strict, "name")).unwrap();
        let err = list.set_data(&mut strict, &json!("a")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComponentError>(),
            Some(ComponentError::NotARecord { found: "string", .. })
        ));
    }

    #[test]
    fn test_list_inside_container_receives_nested_array() {
        let mut ui = Ui::headless();
        let people = List::new(ui.ids())
            .with_field("people")
            .with_child(text_input(&ui, "name")).unwrap();
        let mut page = Container::column(ui.ids())
            .with_child(text_input(&ui, "title")).unwrap()
            .with_child(people).unwrap();
        page.build(&mut ui).unwrap();

        page.set_data(
            &mut ui,
            &json!({"title": "Team", "people": [{"name": "a"}, {"name": "b"}]}),
        )
        .unwrap();

        let Widget::List(people) = &page.children()[1] else {
            panic!("expected a list");
        };
        assert_eq!(people.rows().len(), 2);
        assert_eq!(people.rows()[1].value(&ui).unwrap(), json!("b"));
    }

    #[test]
    fn test_duplicate_list() {
        let mut ui = Ui::headless();
        let mut list = List::new(ui.ids()).with_child(text_input(&ui, "name")).unwrap();
        list.build(&mut ui).unwrap();
        list.set_data(&mut ui, &json!([{"name": "a"}])).unwrap();

        let mut copy = list.duplicate(&mut ui).unwrap();
        assert_ne!(copy.id(), list.id());
        assert_eq!(copy.rows().len(), 1);

        copy.set_data(&mut ui, &json!([{"name": "x"}, {"name": "y"}])).unwrap();
        assert_eq!(copy.rows().len(), 2);
        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.rows()[0].value(&ui).unwrap(), json!("a"));
    }
}
