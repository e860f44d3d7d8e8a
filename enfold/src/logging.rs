//! Wrapper around `tracing_subscriber` for logging.
//!
//! Configures application-wide logging at the `INFO` level. If you prefer
//! to use your own logging subscriber, don't initialize the `Logger`; the
//! renderer only emits regular `tracing` events.
//!
//! ### Example
//!
//! ```rust
//! use enfold::Logger;
//!
//! Logger::init();
//! ```
use once_cell::sync::OnceCell;
use std::io::IsTerminal;
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub struct Logger;

impl Logger {
    /// Configure logging application-wide.
    ///
    /// Calling this multiple times is safe. Logger will be initialized only once.
    pub fn init() {
        INITIALIZED.get_or_init(|| {
            setup_logging();

            ()
        });
    }
}

fn setup_logging() {
    fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_file(false)
        .with_target(false)
        .finish()
        .init();
}
