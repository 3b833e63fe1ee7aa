use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use toolman::{
    commands,
    common::{normalize_go_style_args, parse_manifest_path},
    logger, GlobalOpts, RunConfig,
};
use toolman_config::Config;

#[derive(Parser)]
#[command(name = "toolman")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Track Go tool dependencies in tools.go and install them",
    long_about = "toolman keeps the tools a project depends on as anonymous imports in tools.go \
                  and installs them with `go install`, one after another.\n\n\
                  Without flags every tracked tool is installed."
)]
struct Cli {
    /// Path to the tools file (default: ./tools.go)
    #[arg(short = 'f', value_name = "PATH", value_parser = parse_manifest_path)]
    file: Option<PathBuf>,

    /// Create the tools file
    #[arg(long)]
    init: bool,

    /// Track a tool and install it (e.g. example.com/some/tool/url)
    #[arg(long, value_name = "TOOL")]
    add: Option<String>,

    #[command(flatten)]
    global: GlobalOpts,
}

fn main() {
    let cli = Cli::parse_from(normalize_go_style_args(std::env::args_os()));
    let verbosity = cli.global.verbosity_level();

    let settings = match Config::load() {
        Ok(settings) => settings,
        Err(e) => fail(&e.to_string()),
    };

    if let Err(e) = logger::init_with_verbosity(
        verbosity,
        cli.global.quiet,
        settings.log_file_path().as_deref(),
    ) {
        logger::warn(&format!("Failed to initialize log file: {}", e));
    }
    init_tracing(verbosity, logger::get_log_path().as_deref());

    let run_config = match RunConfig::from_flags(cli.file, cli.init, cli.add) {
        Ok(run_config) => run_config,
        Err(e) => fail(&e.to_string()),
    };

    if let Err(e) = commands::run(&run_config, &settings) {
        fail(&e.to_string());
    }
}

fn fail(message: &str) -> ! {
    logger::error(message);
    std::process::exit(1);
}

/// Route library diagnostics from `tracing`
///
/// With a log file they are appended there at the requested verbosity. On the
/// console only warnings pass, the logger already prints debug lines at `-v`.
fn init_tracing(verbosity: u8, log_file: Option<&Path>) {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    let log_writer = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let _ = match log_writer {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter(tracing_level(verbosity)))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter("warn"))
            .compact()
            .with_writer(std::io::stderr)
            .try_init(),
    };
}

fn tracing_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
