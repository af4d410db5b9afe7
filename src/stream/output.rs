//! Output destinations for enriched events.

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Opens the event destination: the given file, or stdout when `None`.
///
/// Write errors are passed through untouched. A reader that closes stdout
/// early surfaces as [`ErrorKind::BrokenPipe`], which [`is_broken_pipe`]
/// recognizes so the driver can stop reading input.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Whether `err` was caused by the downstream reader closing the pipe (EPIPE).
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(e) = cause.downcast_ref::<io::Error>() {
            return e.kind() == ErrorKind::BrokenPipe;
        }
        match cause.downcast_ref::<csv::Error>().map(csv::Error::kind) {
            Some(csv::ErrorKind::Io(e)) => e.kind() == ErrorKind::BrokenPipe,
            _ => false,
        }
    })
}
