//! Application entry builder and runtime configuration.
//!
//! ## Usage
//!
//! Configure the runtime, then launch it to install logging and obtain a
//! [`Runtime`] ready for its first pass.

use crate::{composer::Component, runtime::Runtime};

/// Configuration for a [`Runtime`].
///
/// # Examples
///
/// ```
/// use trellis_ui::RuntimeConfig;
///
/// let config = RuntimeConfig {
///     name: "signup".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.max_settle_passes, 8);
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Name recorded on every pass span.
    pub name: String,
    /// Upper bound on passes run by [`Runtime::settle`].
    ///
    /// Effects that keep writing state would otherwise re-render forever.
    pub max_settle_passes: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: "trellis".to_string(),
            max_settle_passes: 8,
        }
    }
}

/// Builder for application startup.
pub struct EntryPoint<C> {
    root: C,
    config: RuntimeConfig,
}

impl<C> EntryPoint<C>
where
    C: Component + 'static,
{
    /// Creates a new entry point from the root component.
    pub fn new(root: C) -> Self {
        Self {
            root,
            config: RuntimeConfig::default(),
        }
    }

    /// Overrides the runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs the tracing subscriber and returns the runtime.
    pub fn launch(self) -> Runtime {
        init_tracing();
        tracing::info!(runtime = %self.config.name, "launching");
        Runtime::with_config(self.root, self.config)
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,trellis_ui=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
