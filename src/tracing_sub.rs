use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::LogConfig;

/// Writer handed to the fmt layer for each event. The terminal belongs to
/// the desktop while it runs, so output goes to the log file or nowhere.
pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<File>>,
}

impl SubscriberMakeWriter {
    /// Append to `path`, creating it if needed.
    pub fn to_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Arc::new(file)),
        })
    }

    pub fn discard() -> Self {
        Self::default()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Build the subscriber described by `config` without installing it.
pub fn subscriber(
    config: &LogConfig,
) -> io::Result<impl tracing::Subscriber + Send + Sync + use<>> {
    let writer = match &config.file {
        Some(path) => SubscriberMakeWriter::to_file(path)?,
        None => SubscriberMakeWriter::discard(),
    };
    Ok(tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .finish())
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init(config: &LogConfig) -> io::Result<()> {
    let subscriber = subscriber(config)?;
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}
