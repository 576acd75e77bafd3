//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Every line that is not a REPL command is a self-description and triggers
//! one extraction plus, when complete, one prediction.

use crate::commands;
use crate::config::{pacer_home, Settings};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use pacer_domain::{FinishTimePredictor, LlmProvider, TraceSink};
use pacer_extractor::FieldExtractor;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl<L, S, P>(
    extractor: &FieldExtractor<L, S>,
    predictor: &P,
    settings: &Settings,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider + Send + Sync + 'static,
    S: TraceSink + Send + Sync + 'static,
    L::Error: Display,
    S::Error: Display,
    P: FinishTimePredictor,
    P::Error: Display,
{
    println!(
        "{}",
        formatter.info("Pacer - describe yourself to get a half-marathon prediction. Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("pacer> ") {
            Ok(line) => {
                let Some(input) = parse_line(&line) else {
                    continue;
                };

                editor.add_history_entry(line.trim()).ok();

                match input {
                    ReplLine::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplLine::Help => print_help(formatter),
                    ReplLine::Describe(text) => {
                        match commands::trigger(extractor, predictor, &text).await {
                            Ok(outcome) => match formatter.format_outcome(&outcome) {
                                Ok(rendered) => println!("{}", rendered),
                                Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                            },
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// One line of REPL input.
#[derive(Debug, PartialEq)]
enum ReplLine {
    Exit,
    Help,
    Describe(String),
}

/// Classify a REPL line; blank lines are skipped.
///
/// Commands are matched on the trimmed line, but a description is passed on
/// exactly as typed, the same as a one-shot `predict`.
fn parse_line(line: &str) -> Option<ReplLine> {
    match line.trim() {
        "" => None,
        "exit" | "quit" | "q" => Some(ReplLine::Exit),
        "help" | "?" => Some(ReplLine::Help),
        _ => Some(ReplLine::Describe(line.to_string())),
    }
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", e),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let pacer_dir = pacer_home()?;
    std::fs::create_dir_all(&pacer_dir)?;
    Ok(pacer_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Usage:"));
    println!();
    println!("  <description>    - Predict from a self-description, e.g.");
    println!("                     jestem kobietą, mam 29 lat, 5 km biegam w tempie 6.1 min/km");
    println!("  help, ?          - Show this help");
    println!("  exit, quit, q    - Exit REPL");
    println!();
}
