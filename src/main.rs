use std::process;

use regex_numeric_range::{DigitPattern, compile_range};

fn print_usage() {
    eprintln!(
        "\
Usage: renum [OPTIONS] <MIN> <MAX>

Print a regular expression matching exactly the decimal integers in the
inclusive range [MIN, MAX] (requires 0 <= MIN < MAX).

Options:
  --parts      Print one line per compiled sub-pattern instead of the
               assembled alternation
  -h, --help   Print this help message"
    );
}

fn parse_bound(s: &str) -> i64 {
    s.parse::<i64>().unwrap_or_else(|_| {
        eprintln!("error: not an integer: {s}");
        process::exit(1);
    })
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut parts = false;
    let mut positional = Vec::new();
    for arg in &args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "--parts" => {
                parts = true;
            }
            other if other.starts_with("--") => {
                eprintln!("error: unknown option: {other}");
                print_usage();
                process::exit(1);
            }
            other => {
                positional.push(other);
            }
        }
    }

    if positional.len() != 2 {
        print_usage();
        process::exit(1);
    }

    let min = parse_bound(positional[0]);
    let max = parse_bound(positional[1]);

    let patterns = compile_range(min, max).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    if parts {
        for p in &patterns {
            let (first, merged) = p.wildcards();
            let counts = match merged {
                Some(m) => format!("{first},{m}"),
                None => first.to_string(),
            };
            println!(
                "{:<24} base={:<20} digits={} wildcards={counts}",
                p.optimised(),
                p.pattern(),
                p.digits()
            );
        }
    } else {
        let alternation = patterns
            .iter()
            .map(DigitPattern::optimised)
            .collect::<Vec<_>>()
            .join("|");
        println!("{alternation}");
    }
}
