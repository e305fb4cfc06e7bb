use std::io::{self, Write};

use monkey_interpreter::{Interpreter, MemoryStats, Value};
use monkey_lexer::Lexer;
use monkey_parser::parse;
use monkey_syntax::error::Error;
use monkey_syntax::token::TokenKind;
use owo_colors::OwoColorize;

pub fn start_repl() {
    println!(
        "{}",
        "Monkey REPL. Type :help for help, :quit to exit."
            .bold()
            .green()
    );

    let mut interpreter = Interpreter::new();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() {
            "monkey> ".cyan().to_string()
        } else {
            "   ...> ".cyan().to_string()
        };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => {
                    println!("Goodbye.");
                    break;
                }
                ":help" | ":h" => {
                    println!(
                        "{}\n  {}  {}\n  {}  {}",
                        "Commands:".bold(),
                        ":help".yellow(),
                        "Show this help",
                        ":quit".yellow(),
                        "Exit the REPL"
                    );
                    println!(
                        "  {}  {}\n  {}  {}\n  {}  {}",
                        ":vars".yellow(),
                        "List global bindings",
                        ":mem".yellow(),
                        "Show memory stats",
                        ":reset".yellow(),
                        "Clear state (bindings/mem)"
                    );
                    println!("Type code to evaluate. Multi-line input is supported.");
                    continue;
                }
                ":vars" => {
                    print_vars(&interpreter);
                    continue;
                }
                ":mem" => {
                    print_mem(&interpreter);
                    continue;
                }
                ":reset" => {
                    interpreter.reset();
                    println!("{}", "State reset.".yellow());
                    continue;
                }
                _ => {
                    println!("{}", "Unknown command. Type :help.".red());
                    continue;
                }
            }
        }

        buffer.push_str(&line);

        if !is_complete(&buffer) {
            continue;
        }

        let (program, errors) = parse(&buffer);
        if errors.is_empty() {
            match interpreter.run(&program) {
                Ok(value) => {
                    if value != Value::Null {
                        println!("{}", value.to_string().bright_blue());
                    }
                }
                Err(e) => render_error("Runtime error", &e),
            }
        } else {
            for err in &errors {
                render_error("Parse error", err);
            }
        }

        buffer.clear();
    }
}

fn print_vars(interpreter: &Interpreter) {
    let mut vars = interpreter.vars_snapshot();
    vars.sort_by(|a, b| a.0.cmp(&b.0));
    if vars.is_empty() {
        println!("{}", "<no vars>".dimmed());
        return;
    }
    for (name, value) in vars {
        println!("{} = {}", name.yellow(), value.to_string().bright_blue());
    }
}

fn print_mem(interpreter: &Interpreter) {
    let MemoryStats {
        strings_allocated,
        bytes_allocated,
    } = interpreter.memory_stats();
    println!("{}: {}", "strings".yellow(), strings_allocated);
    println!("{}: {} bytes", "bytes".yellow(), bytes_allocated);
}

fn render_error(kind: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
}

/// Dispatch the buffer to the parser only once its delimiters balance, so
/// multi-line functions and arrays can be typed naturally.
fn is_complete(input: &str) -> bool {
    let mut lexer = Lexer::new(input);
    let tokens = lexer.tokenize();
    let mut paren = 0i32;
    let mut brace = 0i32;
    let mut bracket = 0i32;
    for token in &tokens {
        match token.kind {
            TokenKind::LParen => paren += 1,
            TokenKind::RParen => paren -= 1,
            TokenKind::LBrace => brace += 1,
            TokenKind::RBrace => brace -= 1,
            TokenKind::LBracket => bracket += 1,
            TokenKind::RBracket => bracket -= 1,
            _ => {}
        }
    }
    // over-closed input is complete too; the parser reports it
    paren <= 0 && brace <= 0 && bracket <= 0
}
