use std::fs;
use std::io::{self, Read};

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use promflat::cliopt::CliOpt;
use promflat::output::{JsonEncoder, LineWriter, Output};
use promflat::transform::flatten;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    let level = if opt.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = opt.flatten_config()?;

    let input: Box<dyn Read + Send> = match &opt.input {
        Some(path) => Box::new(fs::File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let mut records = Vec::new();
    flatten(input, &config, &mut records);
    tracing::debug!(records = records.len(), "exposition flattened");

    let mut output = Output::new(
        Box::new(LineWriter::new(io::BufWriter::new(io::stdout()))),
        Box::new(JsonEncoder::new()),
    );
    for record in &records {
        output.write(record)?;
    }
    output.flush()?;

    Ok(())
}
