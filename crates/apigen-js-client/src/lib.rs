pub mod format;
pub mod generator;
pub mod helpers;
pub mod type_mapper;

pub use generator::JsClientTarget;
