// Platkit - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Diagnostics setup (log file, shutdown hook)
// 4. Reading a file through the line reader under a timer

use clap::Parser;
use platkit::core::random::Random;
use platkit::core::timer::Timer;
use platkit::platform::config::{self, PlatformPaths};
use platkit::platform::diagnostics::Diagnostics;
use platkit::platform::fs;
use platkit::util::{self, constants};
use std::io::{self, Write};
use std::path::PathBuf;

/// Platkit - read a text file through the platform layer.
///
/// Lines are normalised (CR/LF removed) and printed; timing and a summary go
/// to the diagnostic log when one is configured.
#[derive(Parser, Debug)]
#[command(name = "platkit", version, about)]
struct Cli {
    /// File to read.
    path: PathBuf,

    /// Diagnostic log file (appended to).
    #[arg(short = 'l', long = "log-file")]
    log_file: Option<PathBuf>,

    /// Line buffer capacity in bytes; longer lines are split.
    #[arg(short = 'c', long = "capacity")]
    capacity: Option<usize>,

    /// Random seed for --sample (defaults to the current time).
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Print this many randomly chosen lines instead of the whole file.
    #[arg(long = "sample", conflicts_with = "head")]
    sample: Option<usize>,

    /// Print only the first N lines.
    #[arg(long = "head")]
    head: Option<usize>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Teardown run on the first fatal error.
fn shutdown(diag: &Diagnostics) {
    diag.log("platkit: shutting down after fatal error\n");
    diag.close_log();
    std::process::exit(constants::EXIT_FAILURE);
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let (app_config, config_warnings) = config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "Platkit starting"
    );

    let diag = Diagnostics::new().with_shutdown_hook(shutdown);

    if let Some(log_path) = cli.log_file.as_ref().or(app_config.diagnostic_log.as_ref()) {
        if let Err(e) = diag.open_log(log_path) {
            tracing::warn!(error = %e, "Continuing without diagnostic log");
        }
    }

    let capacity = match cli.capacity {
        Some(c)
            if (constants::MIN_LINE_CAPACITY..=constants::ABSOLUTE_MAX_LINE_CAPACITY)
                .contains(&c) =>
        {
            c
        }
        Some(c) => {
            tracing::warn!(
                capacity = c,
                default = app_config.line_capacity,
                "Line capacity out of range; using configured value"
            );
            app_config.line_capacity
        }
        None => app_config.line_capacity,
    };

    let mut reader = match fs::open_lines(&cli.path, capacity) {
        Ok(reader) => reader,
        Err(e) => diag.fatal(&format!("platkit: {e}\n")),
    };

    let mut timer = Timer::system();
    timer.start();
    let mut lines: Vec<String> = Vec::new();
    while let Some(line) = reader.next_line(&diag) {
        lines.push(String::from_utf8_lossy(line).into_owned());
    }
    timer.stop();

    let selected: Vec<&str> = if let Some(count) = cli.sample {
        let mut random = match cli.seed.or(app_config.random_seed) {
            Some(seed) => Random::with_seed(seed),
            None => Random::from_time(),
        };
        let bound = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        if bound == 0 {
            Vec::new()
        } else {
            (0..count)
                .map(|_| lines[random.next_int(bound) as usize].as_str())
                .collect()
        }
    } else {
        let limit = cli.head.unwrap_or(lines.len());
        lines.iter().take(limit).map(String::as_str).collect()
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for line in &selected {
        if let Err(e) = writeln!(out, "{line}") {
            tracing::debug!(error = %e, "Stopped writing output");
            break;
        }
    }
    if let Err(e) = out.flush() {
        tracing::debug!(error = %e, "Failed to flush output");
    }

    diag.log(&format!(
        "{}: {} lines, {:.3}s real, {:.3}s cpu, {:.0}% cpu\n",
        cli.path.display(),
        reader.line_number(),
        timer.elapsed_real(),
        timer.elapsed_cpu(),
        timer.cpu_usage() * 100.0,
    ));

    tracing::info!(
        path = %cli.path.display(),
        lines = reader.line_number(),
        printed = selected.len(),
        elapsed_real = timer.elapsed_real(),
        elapsed_cpu = timer.elapsed_cpu(),
        cpu_usage = timer.cpu_usage(),
        "Finished reading"
    );

    diag.close_log();
}
