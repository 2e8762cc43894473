//! Command-line interface for the TypoScript lexers
//! This binary prints token streams of TypoScript files and lists the registered lexers.
//!
//! Usage:
//!   typoscript tokens `<path>` [--lexer `<alias>`] [--format `<format>`]  - Print the token stream
//!   typoscript check `<path>` [--lexer `<alias>`]                        - Verify round trip, count errors
//!   typoscript lexers [--format `<format>`]                              - List registered lexers
//!
//! Set `RUST_LOG=debug` (or `trace`) to see rule table construction and delegation.

use clap::{Arg, Command};
use serde::Serialize;
use typoscript::typoscript::registry;
use typoscript::typoscript::token::{detokenize, render_listing, with_text};
use typoscript::LexError;

fn main() {
    env_logger::init();

    let format_arg = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format: 'text', 'json' or 'yaml'")
        .value_parser(["text", "json", "yaml"])
        .default_value("text");
    let lexer_arg = Arg::new("lexer")
        .long("lexer")
        .short('l')
        .help("Lexer alias (e.g., 'typoscript', 'typoscripthtmldata'); chosen by file name if omitted");

    let matches = Command::new("typoscript")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting how TypoScript sources are tokenized")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(lexer_arg.clone())
                .arg(format_arg.clone()),
        )
        .subcommand(
            Command::new("check")
                .about("Check that tokens reproduce the source and count unmatched characters")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(lexer_arg),
        )
        .subcommand(
            Command::new("lexers")
                .about("List registered lexers")
                .arg(format_arg),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let lexer = tokens_matches.get_one::<String>("lexer");
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(path, lexer.map(String::as_str), format)
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            let lexer = check_matches.get_one::<String>("lexer");
            handle_check_command(path, lexer.map(String::as_str))
        }
        Some(("lexers", lexers_matches)) => {
            let format = lexers_matches.get_one::<String>("format").unwrap();
            handle_lexers_command(format)
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn serialize<T: Serialize>(value: &T, format: &str) -> Result<String, String> {
    match format {
        "json" => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        "yaml" => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        other => Err(format!("Unsupported format: {}", other)),
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, alias: Option<&str>, format: &str) -> Result<(), String> {
    let source = std::fs::read_to_string(path).map_err(LexError::from)?;
    let info = registry::select(path, alias)?;
    let tokens = info.lexer().tokenize(&source);
    log::debug!("{}: {} tokens from {}", info.name, tokens.len(), path);

    let output = match format {
        "text" => render_listing(&source, &tokens),
        _ => serialize(&with_text(&source, &tokens), format)?,
    };
    print!("{}", output);
    Ok(())
}

/// Handle the check command
fn handle_check_command(path: &str, alias: Option<&str>) -> Result<(), String> {
    let source = std::fs::read_to_string(path).map_err(LexError::from)?;
    let info = registry::select(path, alias)?;
    let tokens = info.lexer().tokenize(&source);

    if detokenize(&source, &tokens) != source {
        return Err(format!("{}: tokens do not reproduce the source", path));
    }
    let errors = tokens.iter().filter(|(token, _)| token.is_error()).count();
    println!(
        "{}: {} tokens, {} unmatched characters ({})",
        path,
        tokens.len(),
        errors,
        info.name
    );
    Ok(())
}

/// Handle the lexers command
fn handle_lexers_command(format: &str) -> Result<(), String> {
    if format != "text" {
        print!("{}", serialize(&registry::all(), format)?);
        return Ok(());
    }

    println!("Available lexers:\n");
    for info in registry::all() {
        println!("  {}", info.name);
        println!("    aliases:   {}", info.aliases.join(", "));
        if !info.filenames.is_empty() {
            println!("    filenames: {}", info.filenames.join(", "));
        }
        if !info.mimetypes.is_empty() {
            println!("    mimetypes: {}", info.mimetypes.join(", "));
        }
    }
    Ok(())
}
