use super::Sink;
use crate::error::{Error, Result};
use crate::record::LogRecord;
use std::fmt::Debug;
use std::io::{self, Write};
use std::net::{Shutdown, TcpStream};

/// Writes each record as one JSON object followed by `\n`.
///
/// The writer is flushed after every record so that a downstream reader sees
/// each line as soon as it is generated.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Debug> Sink for JsonLinesSink<W> {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.writer.flush().map_err(Error::from)
    }
}

/// Newline-delimited JSON on the process's standard output.
pub type ConsoleSink = JsonLinesSink<io::Stdout>;

impl ConsoleSink {
    /// A sink writing to stdout.
    pub fn stdout() -> Self {
        JsonLinesSink::new(io::stdout())
    }
}

/// Newline-delimited JSON over a TCP connection dialled once at startup.
///
/// There is no reconnect: a broken connection fails the next write.
#[derive(Debug)]
pub struct TcpSink {
    inner: JsonLinesSink<TcpStream>,
    endpoint: String,
    is_shutdown: bool,
}

impl TcpSink {
    /// Dial `endpoint` (`host:port`).
    pub fn connect(endpoint: &str) -> Result<Self> {
        let stream = TcpStream::connect(endpoint).map_err(|source| Error::Connect {
            endpoint: endpoint.to_string(),
            source,
        })?;
        // Records are small and written whole; don't let Nagle hold them back.
        stream.set_nodelay(true)?;

        tracing::debug!(
            name: "TcpSink.Connected",
            endpoint = endpoint,
            local_addr = ?stream.local_addr().ok()
        );

        Ok(TcpSink {
            inner: JsonLinesSink::new(stream),
            endpoint: endpoint.to_string(),
            is_shutdown: false,
        })
    }

    /// Address this sink was dialled with.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Sink for TcpSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        self.inner.emit(record)
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.is_shutdown {
            return Ok(());
        }
        self.is_shutdown = true;
        self.inner.shutdown()?;
        self.inner.get_ref().shutdown(Shutdown::Write)?;
        tracing::debug!(name: "TcpSink.Closed", endpoint = self.endpoint.as_str());
        Ok(())
    }
}
