//! JSON Lines event encoding: one JSON object per line.

use std::io::{BufRead, Lines, Write};

use anyhow::{Context, Result};

use super::EventSink;
use crate::enrich::Event;

/// Reads one event per non-blank line.
pub struct JsonLinesReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> JsonLinesReader<R> {
    /// Wraps `input`; line numbers start at 1.
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonLinesReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            let line_number = self.line_number;

            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    let context = format!("Failed to read event on line {}", line_number);
                    return Some(Err(e).context(context));
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            return Some(
                serde_json::from_str::<Event>(&line)
                    .with_context(|| format!("Line {} is not a JSON object", line_number)),
            );
        }
    }
}

/// Writes one event per line, flushing after each event.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Writes events to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesWriter<W> {
    fn write_event(&mut self, event: &Event) -> Result<()> {
        let mut line = serde_json::to_vec(event).context("Failed to encode event")?;
        line.push(b'\n');
        self.writer
            .write_all(&line)
            .and_then(|()| self.writer.flush())
            .context("Failed to write event")
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush events")
    }
}
