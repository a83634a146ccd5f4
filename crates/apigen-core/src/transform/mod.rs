pub mod flatten;
pub mod methods;
pub mod parameters;
pub mod resource_tree;
pub mod security;
pub mod segments;
pub mod spec_to_context;
pub mod uri;

pub use spec_to_context::{build_context, build_context_with};
