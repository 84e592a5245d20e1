use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Event format: local time of day, padded level, short module target,
/// fields. A counter session never spans days, so the date is left out.
struct LocalFmt;

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// `bakery_core::ticket` becomes `core::ticket`; foreign targets such as
/// `sqlx::query` are kept whole.
fn short_target(target: &str) -> &str {
    target.strip_prefix("bakery_").unwrap_or(target)
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format(TIME_FORMAT);
        let target = short_target(meta.target());

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{target}\x1b[0m ",
                level_colour(*meta.level()),
                meta.level()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} {target} ", meta.level())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// How the binary wants its logs.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Raise the default level from `info` to `debug`.
    pub verbose: bool,
    /// Also append records to this file (no ANSI colours).
    pub file: Option<PathBuf>,
}

fn make_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "debug,sqlx=warn"
    } else {
        "info,sqlx=warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initializes logging. Call once at startup.
///
/// Records go to stderr so command output on stdout stays clean. `RUST_LOG`
/// overrides the level chosen by `options.verbose`.
pub fn init_logging(options: &LogOptions) -> Result<()> {
    let file_layer = match &options.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(make_filter(options.verbose));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer.map(|layer| layer.with_filter(make_filter(options.verbose))))
        .try_init()
        .context("logging already initialized")
}
