use std::fs::File;
use std::io::{BufWriter, Cursor, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use ticktape::{Config, Mode};

/// Two-pass CSV/binary codec for trade tick records.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Compress CSV into binary (default).
    #[arg(short = 'c', long, conflicts_with = "decompress")]
    compress: bool,

    /// Decompress binary into CSV.
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Route the dictionary to a scratch sink instead of the output file, so the output
    /// contains only the record stream. Compress mode only; the result is not decodable.
    #[arg(short = 'x', long)]
    debug: bool,

    /// Input file path.
    input: PathBuf,

    /// Output file path.
    output: PathBuf,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ticktape=info".parse().unwrap()))
        .init();

    if let Err(err) = run(&args) {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ticktape::CodecError> {
    let mode = if args.decompress { Mode::Decompress } else { Mode::Compress };

    match mode {
        Mode::Compress => {
            let mut input_bytes = Vec::new();
            File::open(&args.input)?.read_to_end(&mut input_bytes)?;
            let mut input = Cursor::new(input_bytes);

            let mut output = BufWriter::new(File::create(&args.output)?);
            let config = Config::compress(args.debug);
            ticktape::compress(&mut input, &mut output, &config)
        }
        Mode::Decompress => {
            let mut input = File::open(&args.input)?;
            let mut output = BufWriter::new(File::create(&args.output)?);
            let config = Config::decompress();
            ticktape::decompress(&mut input, &mut output, &config)
        }
    }
}
