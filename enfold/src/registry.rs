//! Named template registries and the executor interface.
//!
//! The crate does not parse or compile templates; it drives anything that
//! implements [`Template`]. Registries are populated at startup and
//! read-only afterwards, so concurrent render calls share them without
//! locking.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::Error;

/// A compiled template ready to execute against a data bag.
///
/// Implementations are expected to escape plain [`crate::Value::String`]s
/// on interpolation and emit [`crate::Value::Html`] verbatim.
pub trait Template: Send + Sync {
    fn render(&self, context: &Context) -> Result<String, Error>;
}

impl<F> Template for F
where
    F: Fn(&Context) -> Result<String, Error> + Send + Sync,
{
    fn render(&self, context: &Context) -> Result<String, Error> {
        self(context)
    }
}

/// A named set of templates.
///
/// Pages live in one registry, keyed by normalized path with the root
/// layout under `""`. Standalone templates live in another, keyed by exact
/// name, where the `$` marker is permitted.
#[derive(Default, Clone)]
pub struct Templates {
    templates: HashMap<String, Arc<dyn Template>>,
}

impl Templates {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl ToString, template: impl Template + 'static) -> &mut Self {
        self.templates.insert(name.to_string(), Arc::new(template));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Template>> {
        self.templates.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registered template names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names = self
            .templates
            .keys()
            .map(|name| name.as_str())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Execute the named template against the data bag. Fails with
    /// [`Error::NotFound`] when the name is not registered.
    pub fn execute(&self, name: &str, context: &Context) -> Result<String, Error> {
        match self.get(name) {
            Some(template) => template.render(context),
            None => Err(Error::NotFound(name.to_string())),
        }
    }
}

impl fmt::Debug for Templates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Templates")
            .field("names", &self.names())
            .finish()
    }
}
