use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use delta_canvas::{
    config::{CANVAS_HEIGHT, CANVAS_WIDTH, CELL_SIZE, COLS, FLUSH_INTERVAL, GRID, ROWS},
    editor::{config::EditorConfig, Editor},
    sync::{transport::read_json_lines, JsonLines},
    types::CellCoord,
};

/// Paint on a cell grid and stream only the changed cells.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open an interactive drawing session in the terminal.
    Draw {
        /// File that receives one JSON batch per line on every sync.
        #[arg(long, default_value = "delta-canvas.jsonl")]
        out: PathBuf,
        /// Log file (the terminal is taken by the editor).
        #[arg(long, default_value = "delta-canvas.log")]
        log: PathBuf,
    },
    /// Summarize and validate a batch log written by `draw`.
    Inspect { path: PathBuf },
    /// Print the fixed canvas geometry and sync interval.
    Geometry,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Draw { out, log } => {
            init_file_logging(&log)?;
            draw(&out)
        }
        Commands::Inspect { path } => {
            init_stderr_logging();
            inspect(&path)
        }
        Commands::Geometry => {
            geometry();
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "delta_canvas=info".into())
}

fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn draw(out: &Path) -> Result<()> {
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(out)
        .with_context(|| format!("Failed to open {}", out.display()))?;

    let mut editor = Editor::new(JsonLines::new(BufWriter::new(file)), EditorConfig::load());
    editor.run()
}

fn inspect(path: &Path) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let batches =
        read_json_lines(&text).with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut total_cells = 0;
    let mut colors = BTreeSet::new();

    for (i, batch) in batches.iter().enumerate() {
        for group in batch.groups() {
            for &[x, y] in &group.pixels {
                if !GRID.contains(CellCoord::new(x, y)) {
                    bail!(
                        "batch {}: pixel [{x}, {y}] lies outside the {}x{} grid",
                        i + 1,
                        GRID.cols,
                        GRID.rows,
                    );
                }
            }
            colors.insert(group.color.as_str());
        }
        total_cells += batch.cell_count();
        println!(
            "batch {:>4}: {:>3} colors, {:>4} cells",
            i + 1,
            batch.group_count(),
            batch.cell_count(),
        );
    }

    println!(
        "{} batches, {} cells, {} distinct colors",
        batches.len(),
        total_cells,
        colors.len(),
    );
    Ok(())
}

fn geometry() {
    println!("canvas:   {CANVAS_WIDTH}x{CANVAS_HEIGHT} px");
    println!("cell:     {CELL_SIZE} px");
    println!("grid:     {COLS}x{ROWS} cells");
    println!("interval: {} ms", FLUSH_INTERVAL.as_millis());
}
