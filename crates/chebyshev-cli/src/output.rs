//! Output formatting for scored records

use crate::error::CliResult;
use chebyshev_detector::ScoredRecord;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io::Write;

/// Output format for scored records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// A single pretty-printed JSON array
    Json,
}

/// Writes scored records in the chosen format as they arrive.
pub struct RecordWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    /// Array framing state for `Json`.
    formatter: PrettyFormatter<'static>,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            formatter: PrettyFormatter::new(),
            written: 0,
        }
    }

    /// Emit one scored record.
    pub fn write(&mut self, record: ScoredRecord) -> CliResult<()> {
        match self.format {
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut self.writer, &record)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Json => {
                let first = self.written == 0;
                if first {
                    self.formatter.begin_array(&mut self.writer)?;
                }
                self.formatter.begin_array_value(&mut self.writer, first)?;
                // The element formatter starts at the array's indent level.
                let mut ser = serde_json::Serializer::with_formatter(
                    &mut self.writer,
                    self.formatter.clone(),
                );
                record.serialize(&mut ser)?;
                self.formatter.end_array_value(&mut self.writer)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Close any open framing, flush, and hand back the writer.
    pub fn finish(mut self) -> CliResult<W> {
        if self.format == OutputFormat::Json {
            if self.written == 0 {
                self.formatter.begin_array(&mut self.writer)?;
            }
            self.formatter.end_array(&mut self.writer)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}
