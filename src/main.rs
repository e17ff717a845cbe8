use std::path::PathBuf;
use std::process::ExitCode;

use print_cost::config;
use print_cost::config::settings::Settings;
use print_cost::pipeline::orchestrator::estimate_all_files;
use print_cost::web::WebServer;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: print_cost [--settings <settings.yaml>] <command>
  serve                 Start the web server
  estimate <file>...    Print the cost estimate of each PDF or image as JSON";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("{USAGE}");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("print_cost {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_logging();

    // Split off the optional --settings flag.
    let mut settings_path: Option<PathBuf> = None;
    let mut rest: Vec<String> = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--settings" {
            match iter.next() {
                Some(path) => settings_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("ERROR: --settings requires a path");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            rest.push(arg);
        }
    }

    let settings = match config::load_settings(settings_path.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rest.split_first() {
        Some((command, files)) if command == "estimate" => run_estimate(files, &settings),
        Some((command, extra)) if command == "serve" && extra.is_empty() => run_serve(settings),
        _ => {
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_estimate(files: &[String], settings: &Settings) -> ExitCode {
    if files.is_empty() {
        eprintln!("ERROR: estimate requires at least one file");
        return ExitCode::FAILURE;
    }

    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    let results = estimate_all_files(&paths, settings);

    let mut has_error = false;
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(report) => {
                println!("{}", report.to_json_pretty());
            }
            Err(e) => {
                eprintln!("ERROR: {}: {e}", path.display());
                has_error = true;
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_serve(settings: Settings) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("ERROR: Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = WebServer::new(settings);
    match runtime.block_on(server.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
