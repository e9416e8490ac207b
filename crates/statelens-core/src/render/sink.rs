//! Output lines and the sinks that receive them.

use crate::errors::{ExError, ExErrorKind};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Text of the notice emitted when there is no tree to render
pub const ROOT_NOT_FOUND: &str = "component tree root not found";

/// Presentation hint for a line; sinks are free to ignore it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleHint {
    Root,
    Component,
    Annotation,
    Notice,
}

/// One rendered line with optional style and structured payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            payload: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: StyleHint) -> Self {
        Self {
            style: Some(style),
            ..Self::plain(text)
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// The "root not found" notice
pub fn not_found_notice() -> Line {
    Line::styled(ROOT_NOT_FOUND, StyleHint::Notice)
}

/// Destination for rendered lines
pub trait Sink {
    /// # Errors
    ///
    /// Implementations backed by I/O report write failures as `Io`.
    fn emit(&mut self, line: &Line) -> Result<(), ExError>;
}

/// Deliver `lines` in order, stopping at the first failure
///
/// # Errors
///
/// The first error returned by the sink.
pub fn emit_all<S: Sink + ?Sized>(sink: &mut S, lines: &[Line]) -> Result<(), ExError> {
    for line in lines {
        sink.emit(line)?;
    }
    Ok(())
}

fn write_failed(err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op("emit")
        .with_message(err.to_string())
}

/// Writes the plain text of each line
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn emit(&mut self, line: &Line) -> Result<(), ExError> {
        writeln!(self.writer, "{}", line.text).map_err(write_failed)
    }
}

/// Writes each line as one JSON object, keeping style and payload
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn emit(&mut self, line: &Line) -> Result<(), ExError> {
        let json = serde_json::to_string(line).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("emit")
                .with_message(e.to_string())
        })?;
        writeln!(self.writer, "{}", json).map_err(write_failed)
    }
}

/// Keeps lines in memory
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<Line>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }
}

impl Sink for BufferSink {
    fn emit(&mut self, line: &Line) -> Result<(), ExError> {
        self.lines.push(line.clone());
        Ok(())
    }
}
