//! Parlance CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use parlance_runtime::{Engine, EngineConfig, Repl};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    scripts: Vec<PathBuf>,
    commands: Vec<String>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    verbose: bool,
    base_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--verbose" => config.verbose = true,
            "-c" | "--command" => {
                let command = args.next().ok_or("--command requires a sentence")?;
                config.commands.push(command);
            }
            "--dir" => {
                let dir = args.next().ok_or("--dir requires a path")?;
                config.base_dir = Some(PathBuf::from(dir));
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}").into());
            }
            path => config.scripts.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("parlance {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(config.verbose);

    let mut engine_config = EngineConfig::interactive();
    if let Some(dir) = &config.base_dir {
        engine_config = engine_config.with_base_dir(dir);
    }
    let engine = Engine::new(engine_config, parlance_stdlib::plugins())?;
    let mut repl = Repl::new(engine)?;

    for script in &config.scripts {
        repl.run_script(script)?;
    }

    for command in &config.commands {
        if let parlance_runtime::Reply::Ran { value, output } = repl.eval(command)? {
            if output.is_empty() && !value.is_nil() {
                println!("{value}");
            }
        }
    }

    if config.batch_mode {
        return Ok(());
    }

    if !config.scripts.is_empty() || !config.commands.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mParlance\x1b[0m - English-like command interpreter

\x1b[1mUSAGE:\x1b[0m
    parlance [OPTIONS] [SCRIPTS...]

\x1b[1mARGUMENTS:\x1b[0m
    [SCRIPTS...]    Files to run line by line before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -b, --batch            Run scripts and commands, then exit (no REPL)
    -c, --command TEXT     Run one sentence (may be repeated)
    --dir PATH             Resolve relative file paths against PATH
    --verbose              Log parsing and dispatch decisions to stderr

\x1b[1mEXAMPLES:\x1b[0m
    parlance                                   Start interactive REPL
    parlance -b -c \"SAY Hello World.\"          Run one sentence and exit
    parlance setup.pl                          Run setup.pl, then start REPL
    parlance --dir data -b report.pl           Run report.pl against ./data

\x1b[1mREPL COMMANDS:\x1b[0m
    :help [VERB]     Show grammar help, or how VERB is used
    :verbs           List every verb
    :vars            Show variables
    :clear           Forget all variables
    :quit            Exit (or Ctrl+D)

Set RUST_LOG (e.g. RUST_LOG=parlance_parser=trace) for finer logging."
    );
}
