use std::{fs, process::ExitCode};

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use visionscript::{
    config::Config, interpreter::evaluator::core::Interpreter, vision::dry_run::DryRunVision,
};

/// VisionScript is a small, stack-oriented language for computer vision
/// scripts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells visionscript to read the script from a file instead of taking it
    /// literally.
    #[arg(short, long)]
    file: bool,

    /// Only parse the script and report whether it is valid.
    #[arg(long)]
    validate: bool,

    /// Print the parsed script, and the session history after running.
    #[arg(long)]
    debug: bool,

    /// Confidence threshold, in percent, a fresh session starts with.
    #[arg(long, env = "VISIONSCRIPT_CONFIDENCE", default_value_t = visionscript::config::DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Values for `Input[key]`, as `key=value`.
    #[arg(long = "input", value_parser = parse_input)]
    inputs: Vec<(String, String)>,

    contents: String,
}

fn parse_input(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
       .map(|(key, value)| (key.to_string(), value.to_string()))
       .ok_or_else(|| format!("expected key=value, found '{raw}'"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                                                    EnvFilter::new("warn")
                                                                                }))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist? ({e})",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let config = Config { confidence: args.confidence,
                          ..Config::default() };
    let mut interpreter = args.inputs
                              .into_iter()
                              .fold(Interpreter::new(Box::new(DryRunVision)).with_config(config),
                                    |interpreter, (key, value)| interpreter.with_input(key, value));

    let program = match interpreter.parse(&script) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };
    debug!(statements = program.statements.len(), "parsed script");

    if args.debug {
        eprintln!("{program:#?}");
    }
    if args.validate {
        println!("Valid");
        return ExitCode::SUCCESS;
    }

    let result = interpreter.evaluate(&program);

    if args.debug {
        eprintln!("history: {:?}", interpreter.session.history_names());
        eprintln!("last: {}", interpreter.session.last);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "script failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
