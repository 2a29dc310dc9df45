//! Springseq CLI entry point.
//!
//! Each subcommand reads text from a file argument or stdin and prints the
//! result to stdout, as JSON unless stated otherwise.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use springseq::chat::{
    extract_parameters, format_parameter_text, is_sequence_request, ParameterMemory,
};
use springseq::config::{load_config, load_default_config, Config};
use springseq::parser::{normalize_pdf_text, parse_specification};
use springseq::patterns::{sequence_description, standard_speed, COMMANDS};
use springseq::sequence::ResponseNormalizer;
use springseq::specification::SpringSpecification;

/// Springseq: spring-test specification and sequence text tools.
#[derive(Parser)]
#[command(name = "springseq", version, about)]
struct Cli {
    /// Config file to use instead of `~/.springseq/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write JSON logs to this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Parse specification text into fields and set points.
    ParseSpec {
        /// Clean the text as PDF extraction output first.
        #[arg(long)]
        pdf: bool,
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// Rewrite PDF-extracted text into canonical specification lines.
    CleanPdf {
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// Print whether a chat message asks for a test sequence.
    Classify {
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// Extract engineering parameters from a chat message.
    Extract {
        /// Print `Key: value` lines instead of JSON.
        #[arg(long)]
        text: bool,
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// Run each input line as a chat message and report intent, parameters
    /// and the remembered context from earlier lines.
    Chat {
        /// Number of earlier summaries shown as context.
        #[arg(long, default_value_t = 3)]
        context: usize,
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// Normalize a model response into a sequence table.
    Normalize {
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// Apply parsed specification text onto a specification and print it.
    Apply {
        /// JSON specification to start from (the demo spring when omitted).
        #[arg(long)]
        spec: Option<PathBuf>,
        /// Print the prompt block instead of JSON.
        #[arg(long)]
        prompt: bool,
        /// Input file (stdin when omitted).
        input: Option<PathBuf>,
    },
    /// List the command catalogue.
    Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _logging_guard = match &cli.log_dir {
        Some(dir) => Some(springseq::logging::init_production(dir)?),
        None => {
            springseq::logging::init_cli();
            None
        }
    };

    let config = resolve_config(cli.config.as_deref())?;
    debug!(start_marker = %config.normalizer.start_marker, "configuration loaded");

    match cli.command {
        Command::ParseSpec { pdf, input } => handle_parse_spec(pdf, input.as_deref()),
        Command::CleanPdf { input } => {
            let text = read_input(input.as_deref())?;
            print!("{}", normalize_pdf_text(&text));
            Ok(())
        }
        Command::Classify { input } => {
            let text = read_input(input.as_deref())?;
            println!("{}", is_sequence_request(&text));
            Ok(())
        }
        Command::Extract { text, input } => handle_extract(text, input.as_deref()),
        Command::Chat { context, input } => handle_chat(&config, context, input.as_deref()),
        Command::Normalize { input } => handle_normalize(&config, input.as_deref()),
        Command::Apply {
            spec,
            prompt,
            input,
        } => handle_apply(spec.as_deref(), prompt, input.as_deref()),
        Command::Commands => handle_commands(),
    }
}

fn resolve_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => load_default_config().context("failed to load default config"),
    }
}

/// Read the whole input file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn handle_parse_spec(pdf: bool, input: Option<&Path>) -> anyhow::Result<()> {
    let mut text = read_input(input)?;
    if pdf {
        text = normalize_pdf_text(&text);
    }
    let parsed = parse_specification(&text);
    info!(
        fields = parsed.basic_info.len(),
        set_points = parsed.set_points.len(),
        "parsed specification"
    );
    print_json(&parsed)
}

fn handle_extract(as_text: bool, input: Option<&Path>) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let params = extract_parameters(&text);
    if as_text {
        println!("{}", format_parameter_text(&params));
        Ok(())
    } else {
        print_json(&params)
    }
}

fn handle_chat(config: &Config, context: usize, input: Option<&Path>) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let mut memory = ParameterMemory::from(&config.memory);
    let mut turns = Vec::new();

    for message in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let params = extract_parameters(message);
        turns.push(serde_json::json!({
            "message": message,
            "sequence_request": is_sequence_request(message),
            "context": memory.recent(context),
            "parameters": &params,
        }));
        if !params.is_empty() {
            memory.push(format_parameter_text(&params));
        }
    }

    debug!(turns = turns.len(), remembered = memory.len(), "chat session processed");
    print_json(&turns)
}

fn handle_normalize(config: &Config, input: Option<&Path>) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let table = ResponseNormalizer::new(&config.normalizer).normalize(&text);
    info!(rows = table.data_len(), "normalized response");
    print_json(&table)
}

fn handle_apply(spec: Option<&Path>, prompt: bool, input: Option<&Path>) -> anyhow::Result<()> {
    let base = match spec {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<SpringSpecification>(&json)
                .with_context(|| format!("failed to parse specification {}", path.display()))?
        }
        None => SpringSpecification::default(),
    };

    let text = read_input(input)?;
    let updated = base.apply_parsed(&parse_specification(&text));
    if prompt {
        print!("{}", updated.to_prompt_text());
        Ok(())
    } else {
        print_json(&updated)
    }
}

fn handle_commands() -> anyhow::Result<()> {
    for (code, description) in COMMANDS {
        let sequence = sequence_description(code).unwrap_or(description);
        println!("{code:<8} {sequence:<24} {:>4} rpm  {description}", standard_speed(code));
    }
    Ok(())
}
