//! Page rendering and the error-fallback pipeline.
//!
//! A [`Renderer`] owns the two template registries and the configuration,
//! all read-only after construction. [`Renderer::render`] is the shorthand
//! entry point: it renders the requested page and, on failure, falls back
//! to the error page matching the failure, degrading to the 500 page and
//! finally to a static payload. Rendering always produces bytes; the
//! returned error only carries the character of the problem so the
//! response handler can set the status code with [`Error::code`].
use once_cell::sync::OnceCell;
use tracing::error;

use crate::cascade::{Cascade, Step};
use crate::config::{self, Config, BUILTIN_FAILURE};
use crate::context::Context;
use crate::error::{Error, INTERNAL_ERROR};
use crate::path;
use crate::registry::Templates;

static RENDERER: OnceCell<Renderer> = OnceCell::new();

pub struct Renderer {
    pages: Templates,
    standalone: Templates,
    config: Config,
}

impl Renderer {
    /// Create a renderer over the two registries: hierarchical pages
    /// (with the root layout under `""`) and standalone templates.
    pub fn new(pages: Templates, standalone: Templates) -> Self {
        Self {
            pages,
            standalone,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Render the page at the given path, automatically falling back to
    /// the error pages corresponding to the kinds of errors that may occur
    /// (404, 500, possibly others).
    ///
    /// Rendering is always going to be successful; the role of the error
    /// is not to signal a complete failure, but to carry the information
    /// about the character of the problem (if any) that occurred in the
    /// process. Examine it with [`Error::code`] to set the response status.
    pub fn render(&self, path: &str, context: &Context) -> (Vec<u8>, Option<Error>) {
        match self.render_page(path, context) {
            Ok(bytes) => (bytes, None),
            Err(err) => {
                let (bytes, last) = self.render_error(err, context);
                (bytes, Some(last))
            }
        }
    }

    /// Render the page at the given path and, hierarchically, all layouts
    /// enclosing it, up to the root, passing the data bag to each template.
    ///
    /// Each layout receives the markup it encloses under the reserved
    /// `"content"` key, trimmed and marked as pre-escaped HTML. The markup
    /// travels through an explicit accumulator rather than the caller's
    /// bag: a `"content"` entry supplied by the caller stays visible to the
    /// leaf template and is only shadowed for layouts.
    pub fn render_page(&self, path: &str, context: &Context) -> Result<Vec<u8>, Error> {
        let (_path, chain) = path::resolve(path, &self.pages)?;

        let mut content: Option<String> = None;

        for name in &chain {
            let scope = match content {
                Some(ref html) => context.with_content(html),
                None => context.clone(),
            };

            let rendered = self.pages.execute(name, &scope)?;
            content = Some(rendered.trim().to_string());
        }

        Ok(content.unwrap_or_default().into_bytes())
    }

    /// Render a standalone template at the given path. Unlike pages,
    /// standalone names may begin with `$`, no layouts are applied, and
    /// there is no fallback to the page hierarchy.
    pub fn render_standalone(&self, path: &str, context: &Context) -> Result<Vec<u8>, Error> {
        if !self.standalone.contains(path) {
            return Err(Error::NotFound(path.to_string()));
        }

        Ok(self.standalone.execute(path, context)?.into_bytes())
    }

    /// Render the error page corresponding to the error, automatically
    /// falling back to other error pages if a different error occurs.
    /// Never fails: when no error page can be rendered, the configured
    /// ultimate-failure bytes (or a built-in message) are served.
    ///
    /// Returns the rendered bytes and the last error that occurred in the
    /// process, already escalated to a 500 classification when the error
    /// page itself could not be rendered.
    pub fn render_error(&self, mut err: Error, context: &Context) -> (Vec<u8>, Error) {
        let mut cascade = Cascade::new();

        loop {
            match cascade.admit(err.code()) {
                Step::Attempt(code) => {
                    if code != err.code() {
                        err = Error::Escalated(Box::new(err));
                    }

                    match self.render_page(&self.error_page_path(code), context) {
                        Ok(bytes) => return (bytes, err),
                        Err(failure) => err = failure,
                    }
                }
                Step::Exhausted => {
                    if err.code() != INTERNAL_ERROR {
                        err = Error::Escalated(Box::new(err));
                    }

                    error!("internal rendering error: {}", err);

                    let bytes = if self.config.ultimate_failure.is_empty() {
                        BUILTIN_FAILURE.as_bytes().to_vec()
                    } else {
                        self.config.ultimate_failure.clone()
                    };

                    return (bytes, err);
                }
            }
        }
    }

    /// Template path of the error page for this error: the configured
    /// override for its status code, or the code's decimal string.
    pub fn error_path(&self, err: &Error) -> String {
        self.error_page_path(err.code())
    }

    fn error_page_path(&self, code: u16) -> String {
        match self.config.error_pages.get(&code) {
            Some(path) => path.clone(),
            None => code.to_string(),
        }
    }
}

/// Install the process-wide renderer. Call once at startup, before any of
/// the module-level render functions.
pub fn setup(renderer: Renderer) -> Result<(), config::Error> {
    RENDERER
        .set(renderer)
        .map_err(|_| config::Error::AlreadySetup)
}

/// The installed renderer. Rendering before [`setup`] is a programming
/// error, not a runtime condition, so this panics instead of returning.
fn renderer() -> &'static Renderer {
    RENDERER
        .get()
        .expect("rendering before setup; call enfold::setup() at startup")
}

/// Module-level [`Renderer::render`] against the installed renderer.
pub fn render(path: &str, context: &Context) -> (Vec<u8>, Option<Error>) {
    renderer().render(path, context)
}

/// Module-level [`Renderer::render_page`] against the installed renderer.
pub fn render_page(path: &str, context: &Context) -> Result<Vec<u8>, Error> {
    renderer().render_page(path, context)
}

/// Module-level [`Renderer::render_standalone`] against the installed renderer.
pub fn render_standalone(path: &str, context: &Context) -> Result<Vec<u8>, Error> {
    renderer().render_standalone(path, context)
}

/// Module-level [`Renderer::render_error`] against the installed renderer.
pub fn render_error(err: Error, context: &Context) -> (Vec<u8>, Error) {
    renderer().render_error(err, context)
}

/// Module-level [`Renderer::error_path`] against the installed renderer.
pub fn error_path(err: &Error) -> String {
    renderer().error_path(err)
}
