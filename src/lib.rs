//! kdui - a declarative component tree with record data binding
//!
//! Widgets are described as plain data and materialized onto a [`Surface`]
//! (an HTML-like node tree) on demand:
//! - Descriptors first, nodes later: `build()` creates nodes, children
//!   appended to a built container are attached immediately
//! - Record binding by field name, recursing into nested containers
//! - Lists that stamp one duplicate of a template row per record
//! - Independent duplicates of built and unbuilt trees
//!
//! [`Ui`] carries the surface, the identifier registry and the
//! [`Config`] through every call. [`Ui::headless`] runs everything against an
//! in-memory surface.

pub mod component;
pub mod components;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod id;
pub mod layout;
pub mod record;
pub mod style;
pub mod surface;

// Re-export commonly used types
pub use component::{Buildable, Component, DataBindable, Duplicate, Styleable, ValueSlot};
pub use components::{Container, InputType, List, VisualComponent, Widget};
pub use config::{BindingPolicy, Config, FillMode};
pub use context::Ui;
pub use entity::{Attributes, Entity};
pub use error::{ComponentError, SurfaceError};
pub use id::{Id, IdRegistry};
pub use layout::Length;
pub use record::Record;
pub use style::{Declaration, Style};
pub use surface::{handler, Handler, MemorySurface, NodeHandle, Surface, SurfaceEvent};
