//! Centralized logging configuration for so3kit binaries.
//!
//! Provides a consistent tracing setup with bracketed formatting and a
//! default INFO level, overrideable through the `RUST_LOG` environment
//! variable.

use tracing::Level;

/// Initialize the tracing subscriber with so3kit's standard configuration.
///
/// Default log level: INFO (overrideable via `RUST_LOG`).
///
/// Format: `[LEVEL YYYY-MM-DD HH:MM:SS target] message`
///
/// # Example
/// ```no_run
/// use so3kit::init_logger;
///
/// init_logger();
/// tracing::info!("demo started");
/// ```
pub fn init_logger() {
    init_logger_with_level(Level::INFO)
}

/// Initialize the tracing subscriber with a custom default level.
///
/// # Arguments
/// * `default_level` - The default log level (overrideable via `RUST_LOG`)
pub fn init_logger_with_level(default_level: Level) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .event_format(BracketFormat)
        .init();
}

/// Event formatter producing `[LEVEL timestamp target] message` lines.
struct BracketFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for BracketFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        use chrono::Local;

        let metadata = event.metadata();

        write!(writer, "[")?;
        match *metadata.level() {
            Level::ERROR => write!(writer, "\x1b[31mERROR\x1b[0m ")?,
            Level::WARN => write!(writer, "\x1b[33mWARN\x1b[0m ")?,
            Level::INFO => write!(writer, "\x1b[32mINFO\x1b[0m ")?,
            Level::DEBUG => write!(writer, "\x1b[34mDEBUG\x1b[0m ")?,
            Level::TRACE => write!(writer, "\x1b[35mTRACE\x1b[0m ")?,
        }
        write!(
            writer,
            "{} {}] ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            metadata.target()
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
