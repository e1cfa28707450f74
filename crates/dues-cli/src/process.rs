//! Reading command input and writing one reply per command.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use dues_tracker::Household;
use tracing::{debug, info};

use crate::cli::{Cli, OutputFormat};
use crate::dispatch::{Reply, Terminal};
use crate::summary::write_summary;

/// Counts gathered while processing an input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub commands: usize,
    pub failures: usize,
}

/// Run the whole program for parsed arguments.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = crate::config::load(cli.config.as_deref(), cli.capacity)?;
    info!(capacity = config.capacity, "starting household");

    let house = Household::new(config);
    let terminal = Terminal::new(&house, &house);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = if cli.input == Path::new("-") {
        process_reader(io::stdin().lock(), &terminal, cli.format, &mut out)?
    } else {
        process_file(&cli.input, &terminal, cli.format, &mut out)?
    };
    out.flush().context("writing output")?;
    info!(commands = stats.commands, failures = stats.failures, "input processed");

    if cli.summary {
        let snapshot = house.snapshot()?;
        write_summary(&snapshot, &mut io::stderr().lock()).context("writing summary")?;
    }
    Ok(())
}

/// Process every command in the file at `path`.
pub fn process_file(
    path: &Path,
    terminal: &Terminal<'_>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<ProcessStats> {
    let file = File::open(path)
        .with_context(|| format!("error opening the input file {}", path.display()))?;
    process_reader(BufReader::new(file), terminal, format, out)
        .with_context(|| format!("error processing {}", path.display()))
}

/// Process every command line from `reader`, writing one reply per command.
///
/// Per-command failures are written as replies. Only read or write errors
/// stop processing.
pub fn process_reader(
    reader: impl BufRead,
    terminal: &Terminal<'_>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<ProcessStats> {
    let mut stats = ProcessStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("error reading line {}", index + 1))?;
        let Some(reply) = terminal.execute_line(&line) else {
            continue;
        };

        stats.commands += 1;
        if let Err(failure) = &reply.result {
            stats.failures += 1;
            debug!(line = index + 1, command = %reply.command, reason = %failure.message(), "command failed");
        }
        write_reply(&reply, format, out).context("writing output")?;
    }

    Ok(stats)
}

fn write_reply(reply: &Reply, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", reply.to_text())?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &reply.to_json())?;
            writeln!(out)?;
        }
    }
    Ok(())
}
