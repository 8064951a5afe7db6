pub use tracing;
use tracing::level_filters::LevelFilter;
use tracing::Span;
pub use tracing_subscriber;

/// The field name used to tag log output with the component that produced it.
pub const COMPONENT_KEY: &str = "component";

/// A [`trace`] log with the target `"chainio"`
///
/// [`trace`]: tracing::trace
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($tt:tt)*) => {
        $crate::tracing::trace!(target: $target, $($tt)*)
    };
    ($($tt:tt)*) => {
        $crate::tracing::trace!(target: "chainio", $($tt)*)
    }
}

/// A [`debug`] log with the target `"chainio"`
///
/// [`debug`]: tracing::debug
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($tt:tt)*) => {
        $crate::tracing::debug!(target: $target, $($tt)*)
    };
    ($($tt:tt)*) => {
        $crate::tracing::debug!(target: "chainio", $($tt)*)
    }
}

/// An [`info`] log with the target `"chainio"`
///
/// [`info`]: tracing::info
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($tt:tt)*) => {
        $crate::tracing::info!(target: $target, $($tt)*)
    };
    ($($tt:tt)*) => {
        $crate::tracing::info!(target: "chainio", $($tt)*)
    }
}

/// A [`warn`] log with the target `"chainio"`
///
/// [`warn`]: tracing::warn
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($tt:tt)*) => {
        $crate::tracing::warn!(target: $target, $($tt)*)
    };
    ($($tt:tt)*) => {
        $crate::tracing::warn!(target: "chainio", $($tt)*)
    }
}

/// An [`error`] log with the target `"chainio"`
///
/// [`error`]: tracing::error
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($tt:tt)*) => {
        $crate::tracing::error!(target: $target, $($tt)*)
    };
    ($($tt:tt)*) => {
        $crate::tracing::error!(target: "chainio", $($tt)*)
    }
}

/// Sets up the logging for any crate
pub fn setup_log() {
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::fmt::SubscriberBuilder::default()
        .without_time()
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::NONE)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish()
        .try_init();
}

/// A structured logger handed to chain clients.
///
/// The logger is a [`Span`]. Work done by a client is instrumented with it, so every event the
/// client emits carries the fields of the span (and of its parents).
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// A root logger, with no fields attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            span: tracing::info_span!(target: "chainio", "chainio"),
        }
    }

    /// A logger that discards its context. Events still reach the global subscriber.
    #[must_use]
    pub fn none() -> Self {
        Self { span: Span::none() }
    }

    /// Derive a logger tagged with `component`.
    #[must_use]
    pub fn with_component(&self, component: &'static str) -> Self {
        Self {
            span: tracing::info_span!(
                target: "chainio",
                parent: &self.span,
                "chainio",
                { COMPONENT_KEY } = component
            ),
        }
    }

    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}
