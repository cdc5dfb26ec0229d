use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use erasing::{DeterministicTransducer, Error, ErasingSystem, RunConfig, Transducer, Transition};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Describe every step of a run on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide whether an erasing system accepts each input
    Erase(EraseArgs),
    /// Print every output a finite transducer produces for each input
    Transduce(TransduceArgs),
}

#[derive(Args, Debug)]
struct EraseArgs {
    /// Erasing strings, comma separated
    #[arg(short, long, value_delimiter = ',')]
    strings: Vec<String>,

    /// Pattern of the regular language the erased strings must form
    #[arg(short, long)]
    pattern: String,

    /// Rank candidates from the end of the pattern
    #[arg(short, long)]
    lazy: bool,

    /// Try only the first position of each erasing string
    #[arg(long)]
    first_position: bool,

    #[command(flatten)]
    inputs: Inputs,
}

#[derive(Args, Debug)]
struct TransduceArgs {
    /// Transition as from:input:to:output (input and output may be empty)
    #[arg(
        short,
        long = "transition",
        value_name = "TRANSITION",
        value_parser = parse_transition,
        required = true
    )]
    transitions: Vec<Transition>,

    /// Initial state
    #[arg(short, long)]
    initial: String,

    /// Final state (repeatable)
    #[arg(short = 'F', long = "final", value_name = "STATE")]
    finals: Vec<String>,

    /// Longest output at which an epsilon move may still be taken
    #[arg(short, long, value_name = "N", conflicts_with = "deterministic")]
    max_output_length: Option<usize>,

    /// Require one-symbol, non-conflicting transitions
    #[arg(short, long)]
    deterministic: bool,

    #[command(flatten)]
    inputs: Inputs,
}

#[derive(Args, Debug)]
struct Inputs {
    /// Read inputs from a file, one per line
    #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "input")]
    input_file: Option<String>,

    /// Inputs; read from stdin (one per line) when none are given
    #[arg(value_name = "INPUT")]
    input: Vec<String>,
}

fn parse_transition(arg: &str) -> Result<Transition, String> {
    match arg.split(':').collect_vec().as_slice() {
        [from, _, to, _] if from.is_empty() || to.is_empty() => {
            Err(format!("states must not be empty in '{arg}'"))
        }
        [from, input, to, output] => Ok(Transition::new(*from, *input, *to, *output)),
        _ => Err(format!("expected from:input:to:output, got '{arg}'")),
    }
}

fn read_inputs(inputs: Inputs) -> Result<Vec<String>> {
    if let Some(path) = inputs.input_file {
        let contents =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
        return Ok(contents.lines().map(str::to_string).collect());
    }
    if !inputs.input.is_empty() {
        return Ok(inputs.input);
    }
    let mut contents = String::new();
    io::stdin()
        .read_to_string(&mut contents)
        .context("Failed to read stdin")?;
    Ok(contents.lines().map(str::to_string).collect())
}

fn erase(args: EraseArgs, verbose: bool) -> Result<()> {
    let mut config = RunConfig::default().verbose(verbose);
    if args.lazy {
        config = config.lazy();
    }
    if args.first_position {
        config = config.first_position_only();
    }
    let system = ErasingSystem::with_config(args.strings, &args.pattern, config)?;
    for input in read_inputs(args.inputs)? {
        let accepted = system.run(&input)?;
        println!("{}", if accepted { "accepted" } else { "rejected" });
    }
    Ok(())
}

fn transduce(args: TransduceArgs) -> Result<()> {
    let inputs = read_inputs(args.inputs)?;
    if args.deterministic {
        let gsm = DeterministicTransducer::new(args.transitions, &args.initial, args.finals)?;
        for input in inputs {
            print_outputs(gsm.run(&input));
        }
    } else {
        let transducer = Transducer::new(args.transitions, &args.initial, args.finals)?
            .with_max_output_length(args.max_output_length);
        for input in inputs {
            print_outputs(transducer.run(&input));
        }
    }
    Ok(())
}

fn print_outputs(outputs: impl Iterator<Item = String>) {
    let mut any = false;
    for output in outputs {
        println!("{output}");
        any = true;
    }
    if !any {
        println!("<no output>");
    }
}

fn exit_status(err: &anyhow::Error) -> u8 {
    if let Some(err) = err.downcast_ref::<Error>() {
        return match err {
            Error::InitialStateNotInStates(_) => 30,
            Error::FinalStatesNotStatesSubset(_) => 31,
            Error::InvalidTransition { .. } => 32,
            Error::IllegalSymbolOccurrence { .. } | Error::EmptyErasingString => 40,
            Error::InvalidRegularLanguagePattern(_) => 41,
            Error::MaximumInputStringLengthExceeded { .. } => 42,
        };
    }
    if err.downcast_ref::<io::Error>().is_some() {
        return 20;
    }
    99
}

fn usage_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => 11,
        ErrorKind::MissingRequiredArgument | ErrorKind::MissingSubcommand => 12,
        _ => 10,
    }
}

fn run(cli: Cli) -> Result<()> {
    debug!(?cli, "parsed arguments");
    match cli.command {
        Command::Erase(args) => erase(args, cli.verbose),
        Command::Transduce(args) => transduce(args),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_status(err.kind()));
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}
