//! RV32 pipeline simulator CLI.
//!
//! This binary is a thin front end over `rvpipe-core`. It performs:
//! 1. **Assemble:** Translate an assembly file and print the machine words.
//! 2. **Run:** Load assembly or a word listing, run it to drain or to the cycle cap,
//!    and print the register dump and statistics.
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` (or `trace`) for stage detail.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rvpipe_core::common::SimResult;
use rvpipe_core::config::Config;
use rvpipe_core::sim::loader::{self, ProgramText};
use rvpipe_core::sim::{ProgramSource, RunOutcome};
use rvpipe_core::{Simulator, asm};

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    author,
    version,
    about = "Instructional RV32 five-stage pipeline simulator",
    long_about = "Assemble RV32 programs and run them on a five-stage pipeline without forwarding.\n\nExamples:\n  rvpipe asm demo.s\n  rvpipe run demo.s --trace\n  rvpipe run program.hex --max-cycles 200 --snapshots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a source file and print one word per line.
    Asm {
        /// Assembly source file.
        file: PathBuf,

        /// Print 32-digit binary instead of 8-digit hex.
        #[arg(long)]
        binary: bool,
    },

    /// Run a program (`.s`/`.asm` as assembly, anything else as a word listing).
    Run {
        /// Program file.
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured cycle cap.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Log the pipeline diagram every cycle.
        #[arg(long)]
        trace: bool,

        /// Print every cycle's snapshot as a JSON line.
        #[arg(long)]
        snapshots: bool,

        /// Raw binary image to copy into data memory before running.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Base address for `--data`.
        #[arg(long, default_value_t = 0)]
        data_base: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Asm { file, binary } => cmd_asm(&file, binary),
        Commands::Run {
            file,
            config,
            max_cycles,
            trace,
            snapshots,
            data,
            data_base,
        } => cmd_run(&RunArgs {
            file,
            config,
            max_cycles,
            trace,
            snapshots,
            data,
            data_base,
        }),
    };

    if let Err(e) = result {
        eprintln!("\n[!] {e}");
        process::exit(1);
    }
}

/// Options of the `run` subcommand.
#[derive(Debug)]
struct RunArgs {
    file: PathBuf,
    config: Option<PathBuf>,
    max_cycles: Option<u64>,
    trace: bool,
    snapshots: bool,
    data: Option<PathBuf>,
    data_base: u32,
}

/// Assembles `file` and prints its words.
fn cmd_asm(file: &Path, binary: bool) -> SimResult<()> {
    let source = fs::read_to_string(file)?;
    let program = asm::assemble(&source)?;
    for word in &program.words {
        if binary {
            println!("{word:032b}");
        } else {
            println!("{word:08x}");
        }
    }
    Ok(())
}

/// Loads and runs a program, then prints registers, modified memory, and statistics.
fn cmd_run(args: &RunArgs) -> SimResult<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    if let Some(cap) = args.max_cycles {
        config.pipeline.max_cycles = cap;
    }
    config.general.trace_instructions |= args.trace;

    let mut sim = Simulator::new(&config);
    let text = loader::load_program_text(&args.file)?;
    info!(
        "[*] Loading {} ({})",
        args.file.display(),
        match text {
            ProgramText::Assembly(_) => "assembly",
            ProgramText::Listing(_) => "word listing",
        }
    );
    sim.load(ProgramSource::from(&text))?;
    if let Some(path) = &args.data {
        sim.load_data_image(&loader::load_binary(path)?, args.data_base)?;
    }

    let outcome = if args.snapshots {
        let mut failed = None;
        let outcome = sim.run_inspect(config.pipeline.max_cycles, |snap| {
            match snap.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => failed = Some(e),
            }
        })?;
        if let Some(e) = failed {
            return Err(e);
        }
        outcome
    } else {
        sim.run_to_completion()?
    };

    match outcome {
        RunOutcome::Drained { cycles } => println!("[*] Drained after {cycles} cycles"),
        RunOutcome::CycleLimit { cycles } => {
            println!("[*] Stopped at the cycle limit ({cycles} cycles)");
        }
    }

    println!("\nRegisters:");
    for (idx, (name, value)) in sim.dump_registers().into_iter().enumerate() {
        println!("  x{idx:<2} {name:<5} = {value:#010x} ({})", value as i32);
    }
    let snapshot = sim.snapshot();
    if !snapshot.memory.is_empty() {
        println!("\nModified memory:");
        for word in &snapshot.memory {
            println!("  [{:#06x}] = {:#010x}", word.addr, word.value);
        }
    }
    println!();
    sim.stats().print();
    Ok(())
}
