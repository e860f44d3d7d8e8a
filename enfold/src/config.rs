//! Renderer configuration.
//!
//! Configuration is read once at startup and immutable afterwards. It can
//! be built in code or loaded from an optional `enfold.toml` file:
//!
//! ```toml
//! ultimate_failure_file = "static/failure.html"
//!
//! [error_pages]
//! 404 = "errors/not_found"
//! 500 = "errors/internal"
//! ```
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Served when the cascade cannot render any error page and no
/// ultimate-failure payload is configured.
pub(crate) const BUILTIN_FAILURE: &str = "
            <h3>
                <center>500 - Internal Server Error</center>
            </h3>
            ";

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: \"{0}\" is not a status code")]
    Code(String),

    #[error("renderer is already set up")]
    AlreadySetup,
}

/// Renderer configuration.
#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Error page path overrides, by status code. Codes without an entry
    /// resolve to their decimal string, e.g. 404 to the page at `"404"`.
    pub error_pages: HashMap<u16, String>,

    /// Static bytes served when no error page can be rendered. Empty means
    /// use the built-in message.
    pub ultimate_failure: Vec<u8>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the error page path for a status code.
    pub fn error_page(mut self, code: u16, path: impl ToString) -> Self {
        self.error_pages.insert(code, path.to_string());
        self
    }

    /// Set the static bytes served when no error page can be rendered.
    pub fn ultimate_failure(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.ultimate_failure = bytes.into();
        self
    }

    /// Load configuration from `enfold.toml` in the current directory.
    /// Returns the defaults when no config file exists.
    pub fn load() -> Result<Config, Error> {
        Self::load_from(".")
    }

    /// Load configuration from `enfold.toml` in the given directory.
    /// Returns the defaults when no config file exists.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Config, Error> {
        for name in ["enfold.toml", "Enfold.toml"] {
            let path = dir.as_ref().join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Config::default())
    }

    /// Load configuration from the given TOML file. The ultimate-failure
    /// file path, if any, is resolved relative to the config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, Error> {
        let file: ConfigFile = toml::from_str(&read_to_string(path.as_ref())?)?;
        let mut config = Config::default();

        for (code, page) in file.error_pages {
            let parsed = code.parse::<u16>().map_err(|_| Error::Code(code.clone()))?;
            config.error_pages.insert(parsed, page);
        }

        if let Some(failure) = file.ultimate_failure_file {
            let failure = match path.as_ref().parent() {
                Some(dir) => dir.join(failure),
                None => failure,
            };
            config.ultimate_failure = std::fs::read(failure)?;
        }

        Ok(config)
    }
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    error_pages: HashMap<String, String>,
    ultimate_failure_file: Option<PathBuf>,
}
