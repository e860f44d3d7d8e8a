//! Commonly used types and functions, re-exported in one place.
//!
//! ```rust
//! use enfold::prelude::*;
//! ```
pub use crate::config::Config;
pub use crate::context::{Context, ToTemplateValue, Value};
pub use crate::error::{error_code, Error};
pub use crate::logging::Logger;
pub use crate::registry::{Template, Templates};
pub use crate::renderer::Renderer;
