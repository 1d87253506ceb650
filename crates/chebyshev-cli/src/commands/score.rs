//! Score command

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, RecordWriter};
use chebyshev_detector::{
    ChebyshevDetector, DetectorContext, DetectorRun, InputRecord, RunSummary,
};
use clap::Args;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Arguments for `chebyshev score`
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON-lines input file (`-` or omitted for stdin)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Stream name for log events (overrides the config file)
    #[arg(long)]
    pub data_set: Option<String>,

    /// Print a run summary to stderr when done
    #[arg(long)]
    pub summary: bool,
}

/// Execute the score command
pub fn execute(args: ScoreArgs, config: &CliConfig, format: OutputFormat) -> CliResult<()> {
    let data_set = args
        .data_set
        .clone()
        .or_else(|| config.data_set.clone())
        .unwrap_or_else(|| stream_name(args.input.as_deref()));

    // Reject bad probabilities before touching the input.
    let detector =
        ChebyshevDetector::from_context(DetectorContext::new(data_set), config.detector.clone())?;
    debug!(
        k1 = detector.k1(),
        k2 = detector.k2(),
        data_set = %detector.context().data_set,
        "detector constructed"
    );

    let reader = open_input(args.input.as_deref())?;
    let stdout = io::stdout();
    let writer = RecordWriter::new(io::BufWriter::new(stdout.lock()), format);

    let summary = score_stream(reader, writer, detector)?;

    if args.summary {
        eprintln!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

/// Score every record read from `reader`, writing results as they are produced.
///
/// Blank lines are skipped. The first malformed line aborts the run with its
/// 1-based line number.
pub fn score_stream<R, W>(
    reader: R,
    mut writer: RecordWriter<W>,
    detector: ChebyshevDetector,
) -> CliResult<RunSummary>
where
    R: BufRead,
    W: Write,
{
    let mut run = DetectorRun::new(detector);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = InputRecord::from_json_line(&line).map_err(|source| CliError::Record {
            line: idx + 1,
            source,
        })?;
        writer.write(run.process(&record))?;
    }

    writer.finish()?;
    let (_, summary) = run.finish();
    Ok(summary)
}

fn open_input(path: Option<&str>) -> CliResult<Box<dyn BufRead>> {
    match path {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(p) => Ok(Box::new(BufReader::new(File::open(p)?))),
    }
}

fn stream_name(path: Option<&str>) -> String {
    match path {
        None | Some("-") => "stdin".to_string(),
        Some(p) => Path::new(p)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| p.to_string()),
    }
}
