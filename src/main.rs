use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use std::io::{self, BufRead, Write};
use symex::{format_exerr, Evaluator, ExResult};

lazy_static! {
    static ref RE_DERIVATIVE: Regex =
        Regex::new(r"^d\s+([a-zA-Z_][a-zA-Z_0-9]*)\s+(.+)$").expect("command regex is valid");
}

/// Parses `name=value, name=value`.
fn parse_bindings(text: &str) -> ExResult<Vec<(&str, f64)>> {
    text.split(',')
        .filter(|b| !b.trim().is_empty())
        .map(|binding| {
            let (name, value) = binding
                .split_once('=')
                .ok_or_else(|| format_exerr!(Misuse, "expected name=value, got {}", binding))?;
            let value = value
                .trim()
                .parse::<f64>()
                .map_err(|e| format_exerr!(Misuse, "invalid value in {}, {:?}", binding, e))?;
            Ok((name.trim(), value))
        })
        .collect()
}

fn process_line(line: &str) -> ExResult<String> {
    if let Some(caps) = RE_DERIVATIVE.captures(line) {
        let expr = Evaluator::create(&caps[2])?;
        Ok(expr.derivative(&caps[1])?.to_string())
    } else if let Some((formula, bindings)) = line.split_once('@') {
        let mut expr = Evaluator::create(formula)?;
        let x = expr.evaluate_bindings(parse_bindings(bindings)?)?;
        Ok(format!("{x}"))
    } else {
        Ok(Evaluator::create(line)?.to_string())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("symex repl, enter a formula, 'd <var> <formula>', or '<formula> @ x=1, y=2'");
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        stdout.write_all("> ".as_bytes())?;
        stdout.flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        match process_line(line) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Error {e}"),
        }
    }
    Ok(())
}
