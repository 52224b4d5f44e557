//! Core types - pure abstractions shared across the codebase.

mod link;
mod site_path;

pub use link::LinkKind;
pub use site_path::SitePath;
