//! Schema Literal CLI
//!
//! Command-line interface for converting schema renderings and stored
//! schema documents into literal expressions.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schema_literal::{
    check_document, load_document_auto, render_document, split_fields, ConvertError, Grammar,
    Pipeline, Stage,
};

#[derive(Parser)]
#[command(name = "schema-literal")]
#[command(about = "Convert textual schema renderings into literal expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert schema text (as printed by the engine) into a literal
    Convert {
        /// Schema text file (stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Put every field constructor on its own line
        #[arg(long)]
        per_line: bool,

        /// Stages to run, comma separated: containers, booleans, types, fields (default: all)
        #[arg(long, value_delimiter = ',')]
        stages: Vec<String>,

        /// Container constructor token rewritten to [...]
        #[arg(long, default_value = "List")]
        container_token: String,

        /// Field constructor token whose name argument gets quoted
        #[arg(long, default_value = "StructField")]
        field_token: String,
    },

    /// Render a stored JSON schema document and convert it into a literal
    FromJson {
        /// Schema document source: file path or URL (http:// or https://)
        schema: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Put every field constructor on its own line
        #[arg(long)]
        per_line: bool,

        /// Print the rendered schema text without converting it
        #[arg(long)]
        raw: bool,
    },

    /// Check that a stored JSON schema document is well formed
    Check {
        /// Schema document source: file path or URL (http:// or https://)
        schema: String,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            per_line,
            stages,
            container_token,
            field_token,
        } => run_convert(ConvertArgs {
            input,
            output,
            per_line,
            stages,
            container_token,
            field_token,
        }),

        Commands::FromJson {
            schema,
            output,
            per_line,
            raw,
        } => run_from_json(&schema, output, per_line, raw),

        Commands::Check { schema, json } => run_check(&schema, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

struct ConvertArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    per_line: bool,
    stages: Vec<String>,
    container_token: String,
    field_token: String,
}

fn run_convert(args: ConvertArgs) -> Result<(), u8> {
    let ConvertArgs {
        input,
        output,
        per_line,
        stages,
        container_token,
        field_token,
    } = args;

    let grammar = Grammar::default()
        .container_token(container_token)
        .field_token(field_token);
    let mut pipeline = Pipeline::new(grammar).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if !stages.is_empty() {
        let parsed = stages
            .iter()
            .map(|name| {
                Stage::parse(name.trim()).ok_or_else(|| {
                    eprintln!(
                        "Error: unknown stage \"{}\": expected containers, booleans, types, or fields",
                        name
                    );
                    2u8
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        pipeline = pipeline.with_stages(parsed);
    }

    let text = read_input(input.as_deref()).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let mut converted = pipeline.run(text.trim_end());
    if per_line {
        converted = split_fields(&converted, &pipeline.grammar().field_token);
    }

    write_output(output.as_deref(), &converted)
}

fn run_from_json(
    schema_source: &str,
    output: Option<PathBuf>,
    per_line: bool,
    raw: bool,
) -> Result<(), u8> {
    let document = load_document_auto(schema_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let text = render_document(&document).map_err(|e| {
        report_document_error(&e);
        e.exit_code() as u8
    })?;

    let grammar = Grammar::default();
    let mut result = if raw {
        text
    } else {
        let pipeline = Pipeline::new(grammar.clone()).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;
        pipeline.run(&text)
    };

    if per_line {
        result = split_fields(&result, &grammar.field_token);
    }

    write_output(output.as_deref(), &result)
}

fn run_check(schema_source: &str, json_output: bool) -> Result<(), u8> {
    let document = load_document_auto(schema_source).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    match check_document(&document) {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(ConvertError::InvalidDocument { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                eprintln!("Check failed:");
                for error in errors {
                    eprintln!("  {}", error);
                }
            }
            Err(1)
        }
        Err(e) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

/// Read schema text from a file, or from stdin for `None` and `-`.
fn read_input(input: Option<&Path>) -> Result<String, ConvertError> {
    match input {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(ConvertError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            std::fs::read_to_string(path).map_err(|source| ConvertError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| ConvertError::ReadError {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), u8> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

/// Print a document error, listing each mismatch when there are several.
fn report_document_error(err: &ConvertError) {
    eprintln!("Error: {}", err);
    if let ConvertError::InvalidDocument { errors } = err {
        for error in errors {
            eprintln!("  {}", error);
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}
