//! Event streams: reading events, enriching them, writing them back out.
//!
//! Events are processed strictly one at a time in input order, and each
//! enriched event is written (and flushed) before the next one is read.

mod csv;
mod jsonl;
mod output;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

pub use self::csv::{csv_columns, CsvEventReader, CsvEventWriter};
pub use jsonl::{JsonLinesReader, JsonLinesWriter};
pub use output::{is_broken_pipe, open_output};

use crate::enrich::{Enricher, Event};

/// Path that selects stdin as the event source.
pub const STDIN_PATH: &str = "-";

/// Destination for enriched events.
pub trait EventSink {
    /// Writes one event.
    fn write_event(&mut self, event: &Event) -> Result<()>;

    /// Flushes anything still buffered.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens the event source: stdin for `-`, the named file otherwise.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIN_PATH {
        log::info!("Reading events from stdin");
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Enriches every event from `events` into `sink`, returning the number written.
///
/// Stops at the first unreadable event or enrichment error; events written
/// before it stay written. When the sink reports a closed pipe no further
/// input is read and the count so far is returned as a success.
pub fn enrich_stream<I, S>(enricher: &mut Enricher, events: I, sink: &mut S) -> Result<usize>
where
    I: IntoIterator<Item = Result<Event>>,
    S: EventSink + ?Sized,
{
    let mut written = 0usize;
    for event in events {
        let enriched = enricher.enrich(event?)?;
        match sink.write_event(&enriched) {
            Ok(()) => written += 1,
            Err(e) if is_broken_pipe(&e) => {
                log::info!("Output closed after {} events, stopping", written);
                return Ok(written);
            }
            Err(e) => return Err(e),
        }
    }
    match sink.finish() {
        Err(e) if !is_broken_pipe(&e) => Err(e),
        _ => Ok(written),
    }
}
