use anyhow::Result;
use clap::Parser as ClapParser;
use lox::diagnostics::{Diagnostic, Diagnostics};
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::scanner::Scanner;
use std::fs;
use std::io;
use std::process;

#[derive(ClapParser)]
#[command(name = "lox")]
#[command(about = "The Lox programming language")]
struct Cli {
    /// Script file to run (omit for REPL)
    script: Option<String>,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version print to stdout and are not misuse
            let misuse = e.use_stderr();
            let _ = e.print();
            process::exit(if misuse { 64 } else { 0 });
        }
    };

    match cli.script {
        None => run_prompt()?,
        Some(path) => run_file(&path)?,
    }

    Ok(())
}

fn run_file(path: &str) -> Result<()> {
    let contents = fs::read_to_string(path)?;
    let diagnostics = run(&contents, io::stdout());

    for diagnostic in diagnostics.entries() {
        eprintln!("{}", diagnostic);
    }

    if diagnostics.had_compile_error() {
        process::exit(65);
    }
    if diagnostics.had_runtime_error() {
        process::exit(70);
    }

    Ok(())
}

fn run_prompt() -> Result<()> {
    let mut rl = rustyline::DefaultEditor::new()?;

    let history_path = dirs::home_dir().map(|p| p.join(".lox_history"));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                // Each line runs independently; errors never end the session
                let diagnostics = run(&line, io::stdout());
                for diagnostic in diagnostics.entries() {
                    eprintln!("{}", diagnostic);
                }
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(rustyline::error::ReadlineError::Interrupted) => println!("^C"),
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Runs one source buffer through scan -> parse -> interpret. All compile-time
/// errors are collected first; if any occurred, interpretation is skipped.
fn run<W: io::Write>(source: &str, out: W) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let scanner = Scanner::new(source);
    let result = scanner.scan_tokens();
    for e in &result.errors {
        diagnostics.report(Diagnostic::from(e));
    }

    let parser = Parser::new(result.tokens);
    let statements = match parser.parse() {
        Ok(statements) => statements,
        Err(errors) => {
            for e in &errors {
                diagnostics.report(Diagnostic::from(e));
            }
            return diagnostics;
        }
    };

    if diagnostics.had_compile_error() {
        return diagnostics;
    }

    let mut interpreter = Interpreter::new(out);
    if let Err(e) = interpreter.interpret(&statements) {
        diagnostics.report(Diagnostic::from(&e));
    }

    diagnostics
}
