//! Entity - identifier plus the caller's initial attribute bag

use crate::id::{Id, IdRegistry};
use std::collections::BTreeMap;

/// Free-form attributes stamped on the surface node at build time
pub type Attributes = BTreeMap<String, String>;

/// Base of every descriptor: an identity and an attribute bag
#[derive(Debug)]
pub struct Entity {
    id: Id,
    attributes: Attributes,
}

impl Entity {
    /// Create an entity from an attribute bag
    ///
    /// A caller-supplied `id` attribute is discarded: the identifier always
    /// comes from the registry (use `set_id` to override it afterwards).
    pub fn new<I, K, V>(ids: &IdRegistry, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attributes: Attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        attributes.remove("id");

        Entity {
            id: ids.issue(),
            attributes,
        }
    }

    /// Create an entity with no attributes
    pub fn bare(ids: &IdRegistry) -> Self {
        Entity {
            id: ids.issue(),
            attributes: Attributes::new(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute; `id` is reserved and ignored
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name != "id" {
            self.attributes.insert(name, value.into());
        }
    }

    /// Copy every attribute onto a new entity with a freshly issued id
    pub fn duplicate(&self, ids: &IdRegistry) -> Self {
        Entity {
            id: ids.issue(),
            attributes: self.attributes.clone(),
        }
    }
}
