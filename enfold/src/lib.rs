//! Enfold renders hierarchical HTML pages. A page path like `"blog/posts"`
//! names a leaf template nested inside every layout enclosing it, up to the
//! root layout registered under the empty string. The leaf renders first;
//! each enclosing layout receives the markup below it under the reserved
//! `"content"` key and wraps it.
//!
//! When rendering fails, [`render`] degrades gracefully: it attempts the
//! error page matching the failure (the page at `"404"` for a missing
//! template, `"500"` otherwise, with configurable overrides), escalates to
//! the 500 page when the error page itself fails, and bottoms out in a
//! static payload. The caller always gets renderable bytes; the returned
//! error exists so the response handler can set the status code with
//! [`error_code`].
//!
//! # Example
//!
//! ```
//! use enfold::{Context, Error, Renderer, Templates};
//!
//! let mut pages = Templates::new();
//! pages.insert("", |ctx: &Context| -> Result<String, Error> {
//!     Ok(format!("<html>{}</html>", ctx["content"]))
//! });
//! pages.insert("index", |_: &Context| -> Result<String, Error> {
//!     Ok("<h1>Hello</h1>".to_string())
//! });
//!
//! let renderer = Renderer::new(pages, Templates::new());
//! let (bytes, err) = renderer.render("index", &Context::new());
//!
//! assert!(err.is_none());
//! assert_eq!(bytes, b"<html><h1>Hello</h1></html>".to_vec());
//! ```
//!
//! Template compilation is not this crate's business: anything implementing
//! [`Template`] can live in a registry, including plain closures. Registries
//! and configuration are set up once at startup and read-only afterwards, so
//! concurrent render calls need no locking.
mod cascade;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod path;
pub mod prelude;
pub mod registry;
pub mod renderer;

pub use config::Config;
pub use context::{Context, ToTemplateValue, Value, CONTENT_KEY};
pub use error::{error_code, Error};
pub use logging::Logger;
pub use path::STANDALONE_MARKER;
pub use registry::{Template, Templates};
pub use renderer::{
    error_path, render, render_error, render_page, render_standalone, setup, Renderer,
};
