#![deny(clippy::all)]

//! Type rendering and property formatting for the docsmith pipeline.
//!
//! This crate turns the extractor's type graph into canonical strings and
//! structured per-field records:
//! - [`render::render_type`] renders any type node to its canonical text.
//! - [`names::resolve_qualified_name`] maps flattened type names to dotted
//!   display names.
//! - [`properties::PropertyFormatter`] assembles [`FormattedProperty`] records
//!   for props and parameters.
//! - [`entities::EntityFormatter`] classifies exports into documentable
//!   entities.
//!
//! Everything here is a pure transform: no I/O, no suspension, total over
//! every type kind.
//!
//! [`FormattedProperty`]: docsmith_types::FormattedProperty

pub mod entities;
pub mod expand;
pub mod layout;
pub mod names;
pub mod policy;
pub mod properties;
pub mod render;
pub mod services;
pub mod styler;

pub use entities::{slugify, EntityFormatter};
pub use expand::expand_type;
pub use layout::{compute_short_type, split_top_level, TypeLayoutPrinter};
pub use names::resolve_qualified_name;
pub use policy::FormatPolicy;
pub use properties::{normalize_single_line, PropertyFormatter};
pub use render::{render_type, RenderContext, UNKNOWN_TYPE};
pub use services::FormatServices;
pub use styler::CmarkStyler;
