use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use tuple_wire::engine::batch::BatchBuffer;
use tuple_wire::engine::errors::WireError;
use tuple_wire::engine::frame::{FrameReader, FrameWriter};
use tuple_wire::engine::limits::WireLimits;
use tuple_wire::engine::types::{ColumnType, ValueRef};
use tuple_wire::logging;
use tuple_wire::shared::config::CONFIG;

#[derive(Parser)]
#[command(name = "wire_tool")]
#[command(about = "Inspect and generate tuple batch frame files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every batch in a frame file as one JSON line
    Dump { file: PathBuf },

    /// Write random NORMAL batches followed by EOS
    Sample {
        file: PathBuf,

        #[arg(long, default_value = "3")]
        batches: usize,

        /// Rows per batch
        #[arg(long, default_value = "10")]
        rows: usize,

        /// Column types, e.g. INT32,STRING,BOOLEAN (random when omitted)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        #[arg(long, default_value = "0")]
        source_id: i64,

        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;
    let limits = WireLimits::from_settings(&CONFIG.wire);

    match args.command {
        Command::Dump { file } => cmd_dump(&file, limits),
        Command::Sample {
            file,
            batches,
            rows,
            columns,
            source_id,
            seed,
        } => {
            let types = parse_types(&columns)?;
            cmd_sample(&file, limits, batches, rows, types, source_id, seed)
        }
    }
}

fn parse_types(names: &[String]) -> anyhow::Result<Vec<ColumnType>> {
    names
        .iter()
        .map(|name| {
            name.parse::<ColumnType>()
                .map_err(|_| anyhow::anyhow!("unknown column type '{name}'"))
        })
        .collect()
}

fn cmd_dump(path: &PathBuf, limits: WireLimits) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = FrameReader::new(BufReader::new(file), limits);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut frames = 0usize;
    loop {
        match reader.read_frame() {
            Ok(batch) => {
                frames += 1;
                writeln!(out, "{}", batch.to_json())?;
                if batch.is_end_of_stream() {
                    break;
                }
            }
            Err(WireError::EndOfStream) => break,
            Err(err) => {
                err.log_error();
                if err.is_stream_fatal() {
                    return Err(err).context(format!("reading frame {frames}"));
                }
            }
        }
    }
    info!(frames, path = %path.display(), "dump finished");
    Ok(())
}

fn cmd_sample(
    path: &PathBuf,
    limits: WireLimits,
    batches: usize,
    rows: usize,
    mut types: Vec<ColumnType>,
    source_id: i64,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if types.is_empty() {
        let count = rng.gen_range(1..=6);
        types = (0..count)
            .map(|_| ColumnType::ALL[rng.gen_range(0..ColumnType::ALL.len())])
            .collect();
    }

    let limits = limits.with_batch_rows(rows.max(1));
    let mut buffer = BatchBuffer::new(source_id, types.clone(), limits)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let writer = FrameWriter::new(BufWriter::new(file), limits);

    let mut bytes = 0usize;
    for _ in 0..batches * rows {
        let strings: Vec<String> = types
            .iter()
            .map(|_| random_word(&mut rng))
            .collect();
        let row: Vec<ValueRef<'_>> = types
            .iter()
            .zip(&strings)
            .map(|(ty, word)| random_value(&mut rng, *ty, word))
            .collect();
        buffer.push_row(&row)?;
        while let Some(batch) = buffer.pop_ready() {
            bytes += writer.write_frame(&batch)?;
        }
    }
    // Only the EOS marker is left since the row total is a multiple of `rows`.
    for batch in buffer.finish()? {
        bytes += writer.write_frame(&batch)?;
    }

    info!(
        batches,
        rows,
        columns = types.len(),
        bytes,
        path = %path.display(),
        "sample written"
    );
    Ok(())
}

fn random_word<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(0..10);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

fn random_value<'a, R: Rng>(rng: &mut R, ty: ColumnType, word: &'a str) -> ValueRef<'a> {
    match ty {
        ColumnType::Int32 => ValueRef::Int32(rng.gen_range(-1000..1000)),
        ColumnType::Int64 => ValueRef::Int64(rng.r#gen()),
        ColumnType::Float32 => ValueRef::Float32(rng.r#gen()),
        ColumnType::Float64 => ValueRef::Float64(rng.gen_range(-1e6..1e6)),
        ColumnType::String => ValueRef::from(word),
        ColumnType::Boolean => ValueRef::Boolean(rng.gen_bool(0.5)),
    }
}
