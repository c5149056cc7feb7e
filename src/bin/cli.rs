//! gridstore CLI
//!
//! Write, read and verify matrix files from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use gridstore::{codec, Config, Layout, MatrixStore, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// gridstore CLI
#[derive(Parser, Debug)]
#[command(name = "gridstore-cli")]
#[command(about = "Square integer matrix storage tool")]
#[command(version)]
struct Args {
    /// Matrix dimension (side length)
    #[arg(short, long, default_value = "10")]
    dimension: usize,

    /// Allocation layout
    #[arg(short, long, value_enum, default_value = "contiguous")]
    layout: LayoutArg,

    /// File format
    #[arg(short, long, value_enum, default_value = "text")]
    format: FormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill a matrix with scale*i*j and write it to a file
    Write {
        /// Output path
        path: PathBuf,

        /// Scale applied to the i*j fill rule
        #[arg(short, long, default_value = "1")]
        scale: i64,
    },

    /// Read a matrix file and print it as text
    Read {
        /// Input path
        path: PathBuf,
    },

    /// Read a matrix file and check every element against scale*i*j
    Verify {
        /// Input path
        path: PathBuf,

        /// Scale applied to the i*j fill rule
        #[arg(short, long, default_value = "1")]
        scale: i64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Contiguous,
    Scattered,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Contiguous => Layout::Contiguous,
            LayoutArg::Scattered => Layout::Scattered,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Binary,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gridstore=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .dimension(args.dimension)
        .layout(args.layout.into())
        .build();
    let store = MatrixStore::new(config);

    if let Err(e) = run(&store, args.format, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(store: &MatrixStore, format: FormatArg, command: Commands) -> Result<()> {
    match command {
        Commands::Write { path, scale } => {
            let mut matrix = store.allocate()?;
            matrix.fill(|i, j| scale * (i as i64) * (j as i64));

            match format {
                FormatArg::Text => store.save_text(&matrix, &path)?,
                FormatArg::Binary => store.save_binary(&matrix, &path)?,
            }
            Ok(())
        }

        Commands::Read { path } => {
            let matrix = match format {
                FormatArg::Text => store.load_text(&path)?,
                FormatArg::Binary => store.load_binary(&path)?,
            };

            let stdout = std::io::stdout();
            codec::text::write(&matrix, stdout.lock())
        }

        Commands::Verify { path, scale } => {
            let matrix = match format {
                FormatArg::Text => store.load_text(&path)?,
                FormatArg::Binary => store.load_binary(&path)?,
            };

            match store.verify(&matrix, |i, j| scale * (i as i64) * (j as i64)) {
                None => {
                    println!("Matrix read correctly!");
                    Ok(())
                }
                Some(m) => {
                    eprintln!(
                        "Mismatch at ({}, {}): expected {}, found {}",
                        m.row, m.column, m.expected, m.found
                    );
                    process::exit(1);
                }
            }
        }
    }
}
