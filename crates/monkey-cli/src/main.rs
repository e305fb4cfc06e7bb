mod repl;

use std::fs;
use std::path::Path;

use monkey_interpreter::Interpreter;
use monkey_parser::parse;
use monkey_syntax::error::Error;
use owo_colors::OwoColorize;

fn render_error(kind: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(path) => path,
        None => {
            repl::start_repl();
            return;
        }
    };

    if !Path::new(path).exists() {
        eprintln!(
            "{}: {}",
            "error".red().bold(),
            format!("File not found: {}", path).red()
        );
        std::process::exit(1);
    }
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path, e).red()
            );
            std::process::exit(1);
        }
    };

    let (program, errors) = parse(&src);
    if !errors.is_empty() {
        for err in &errors {
            render_error("Parse error", err);
        }
        std::process::exit(1);
    }

    let mut interpreter = Interpreter::new();
    if let Err(e) = interpreter.run(&program) {
        render_error("Runtime error", &e);
        std::process::exit(1);
    }
}
