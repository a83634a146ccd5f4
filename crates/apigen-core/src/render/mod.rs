pub mod generate;
pub mod helpers;
pub mod profile;
mod view;

pub use generate::{GenerationOutput, Renderer, generate};
pub use helpers::{BuiltinHelper, Helper, HelperFn, HelperSet};
pub use profile::{Files, FilesFn, LanguageProfile, RenderFn, RenderOptions, TemplateBody};
