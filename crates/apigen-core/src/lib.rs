pub mod config;
pub mod error;
pub mod format;
pub mod ids;
pub mod ir;
pub mod parse;
pub mod render;
pub mod transform;

pub use error::{GenerateError, ParseError};
pub use format::{FormatOverrides, FormatStrategy};
pub use render::{GenerationOutput, LanguageProfile, generate};

/// A target language that ships a language profile.
pub trait Target {
    fn id(&self) -> config::TargetId;
    fn profile(&self) -> LanguageProfile;
}
