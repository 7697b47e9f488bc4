//! Logging setup.
//!
//! All workers log through `tracing`. The fmt layer formats each event into
//! its own buffer and then hands it to a [`LogGate`], which holds a single
//! mutex while the line is copied to every sink (log file and console). Two
//! workers' lines therefore never interleave, on either sink.

use anyhow::Context;
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

type Sink = Box<dyn Write + Send>;

/// Mutual-exclusion gate in front of the log sinks.
#[derive(Clone, Default)]
pub struct LogGate {
    sinks: Arc<Mutex<Vec<Sink>>>,
}

impl LogGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink. Every line is written to every sink, in insertion order.
    pub fn with_sink(self, sink: impl Write + Send + 'static) -> Self {
        self.lock().push(Box::new(sink));
        self
    }

    /// Append to `path` (created if missing) and echo to stderr.
    pub fn file_and_console(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new().with_sink(file).with_sink(io::stderr()))
    }

    /// Enter the critical section. Sinks are written only through the guard.
    pub fn enter(&self) -> GateGuard<'_> {
        GateGuard { sinks: self.lock() }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sink>> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to the sinks for the lifetime of the guard.
pub struct GateGuard<'a> {
    sinks: MutexGuard<'a, Vec<Sink>>,
}

impl Write for GateGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in self.sinks.iter_mut() {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in self.sinks.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogGate {
    type Writer = GateGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.enter()
    }
}

/// In-memory sink that can be shared with a [`LogGate`] and read back.
#[derive(Clone, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `<timestamp> - <logger> - <LEVEL> - <message>`
pub struct DashedFormat;

impl<S, N> FormatEvent<S, N> for DashedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build the subscriber writing through `gate`.
pub fn subscriber(gate: LogGate, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .event_format(DashedFormat)
            .with_ansi(false)
            .with_writer(gate),
    )
}

/// Install the global subscriber: `log_file` plus the console, filtered by
/// `RUST_LOG` (default `info`).
pub fn init_logging(log_file: &Path) -> anyhow::Result<()> {
    let gate = LogGate::file_and_console(log_file)
        .with_context(|| format!("Failed to open log file {log_file:?}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    subscriber(gate, filter)
        .try_init()
        .context("Failed to install the tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_guard_serializes_multi_part_writes() {
        let buffer = LogBuffer::new();
        let gate = LogGate::new().with_sink(buffer.clone());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let gate = gate.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        let mut guard = gate.enter();
                        write!(guard, "worker={worker} ").unwrap();
                        write!(guard, "line={i} ").unwrap();
                        writeln!(guard, "end").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = buffer.lines();
        assert_eq!(lines.len(), 8 * 200);
        for line in lines {
            let parts: Vec<&str> = line.split(' ').collect();
            assert_eq!(parts.len(), 3, "garbled line: {line}");
            assert!(parts[0].starts_with("worker="), "garbled line: {line}");
            assert!(parts[1].starts_with("line="), "garbled line: {line}");
            assert_eq!(parts[2], "end", "garbled line: {line}");
        }
    }

    #[test]
    fn test_every_sink_gets_every_line() {
        let first = LogBuffer::new();
        let second = LogBuffer::new();
        let gate = LogGate::new()
            .with_sink(first.clone())
            .with_sink(second.clone());

        writeln!(gate.enter(), "hello").unwrap();

        assert_eq!(first.contents(), "hello\n");
        assert_eq!(second.contents(), "hello\n");
    }

    #[test]
    fn test_line_format() {
        let buffer = LogBuffer::new();
        let gate = LogGate::new().with_sink(buffer.clone());

        tracing::subscriber::with_default(subscriber(gate, EnvFilter::new("info")), || {
            tracing::info!(target: "db_queries", "Starting");
            tracing::debug!(target: "db_queries", "filtered out");
        });

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.ends_with(" - db_queries - INFO - Starting"), "{line}");
        // 2026-10-19 12:34:56,789
        let timestamp = line.split(" - ").next().unwrap();
        assert_eq!(timestamp.len(), 23, "{line}");
        assert_eq!(&timestamp[19..20], ",");
    }

    #[test]
    fn test_concurrent_events_stay_whole() {
        let buffer = LogBuffer::new();
        let gate = LogGate::new().with_sink(buffer.clone());
        let dispatch = tracing::Dispatch::new(subscriber(gate, EnvFilter::new("info")));

        let handles: Vec<_> = (1..=6)
            .map(|worker| {
                let dispatch = dispatch.clone();
                thread::spawn(move || {
                    tracing::dispatcher::with_default(&dispatch, || {
                        for i in 0..100 {
                            tracing::info!(
                                target: "db_queries",
                                "Select Thread {worker}: Query 'humidity > 80' returned {i} results (took 0.0001s)"
                            );
                        }
                    });
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = buffer.lines();
        assert_eq!(lines.len(), 600);
        for line in lines {
            assert_eq!(line.matches(" - db_queries - INFO - ").count(), 1, "{line}");
            assert!(line.ends_with("results (took 0.0001s)"), "{line}");
        }
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queries.log");

        writeln!(LogGate::file_and_console(&path).unwrap().enter(), "first").unwrap();
        writeln!(LogGate::file_and_console(&path).unwrap().enter(), "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
