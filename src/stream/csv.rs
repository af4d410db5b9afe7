//! CSV event encoding.
//!
//! Input columns become string fields. The output header is fixed before the
//! first row: the input columns followed by every field the loaded databases
//! can add, so rows can be written one at a time.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use csv::StringRecord;
use serde_json::Value;

use super::EventSink;
use crate::enrich::Event;

/// Reads CSV rows as events keyed by the header row.
pub struct CsvEventReader<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: StringRecord,
}

impl<R: Read> CsvEventReader<R> {
    /// Wraps `input` and reads its header row.
    pub fn new(input: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().from_reader(input);
        let headers = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }

    /// Column names from the header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for CsvEventReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self
                .headers
                .iter()
                .zip(self.record.iter())
                .map(|(name, value)| (name.clone(), Value::String(value.to_string())))
                .collect())),
            Ok(false) => None,
            Err(e) => Some(Err(e).context("Failed to read CSV row")),
        }
    }
}

/// Output header: input columns, then generated columns not already present.
pub fn csv_columns(input_headers: &[String], generated: &[String]) -> Vec<String> {
    let mut columns = input_headers.to_vec();
    for name in generated {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }
    columns
}

/// Writes events as CSV rows under a fixed header.
pub struct CsvEventWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<String>,
}

impl<W: Write> CsvEventWriter<W> {
    /// Creates the writer and writes the header row.
    pub fn new(output: W, columns: Vec<String>) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(output);
        writer
            .write_record(&columns)
            .context("Failed to write CSV header")?;
        Ok(Self { writer, columns })
    }

    /// Flushes buffered rows and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
    }
}

impl<W: Write> EventSink for CsvEventWriter<W> {
    fn write_event(&mut self, event: &Event) -> Result<()> {
        let row = self
            .columns
            .iter()
            .map(|column| event.get(column).map(cell_text).unwrap_or_default());
        self.writer
            .write_record(row)
            .context("Failed to write CSV row")?;
        self.writer.flush().context("Failed to write CSV row")
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush CSV output")
    }
}

/// Text of a CSV cell; `null` is an empty cell.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
