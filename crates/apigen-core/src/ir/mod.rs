pub mod context;
pub mod diagnostics;
pub mod http;
pub mod parameter;
pub mod resource;

pub use context::{GenerationContext, SecuritySchemeIndex};
pub use diagnostics::TreeWarning;
pub use http::HttpMethod;
pub use parameter::Parameter;
pub use resource::{MethodId, MethodRecord, ResourceId, ResourceNode, ResourceTree};
