//! bitpat CLI
//!
//! Compile bit patterns and priority lookup tables from the command line.

use bitpatc::commands::{explain, lookup_file, match_pattern, parse_pattern, CliError};
use bitpatc::diagnostic::{ColorMode, TerminalEmitter};

/// Options shared by every command.
#[derive(Default)]
struct Options {
    emit: bool,
    color: ColorMode,
}

fn main() {
    bitpatc::init_tracing();

    let mut options = Options::default();
    let mut positional: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--emit" {
            options.emit = true;
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            match mode.parse() {
                Ok(mode) => options.color = mode,
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(2);
                }
            }
        } else {
            positional.push(arg);
        }
    }

    let Some(command) = positional.first() else {
        print_usage();
        return;
    };

    let mut stdout = std::io::stdout().lock();
    let result = match (command.as_str(), &positional[1..]) {
        ("parse", [pattern]) => parse_pattern(pattern, &mut stdout).map(|()| true),
        ("match", [pattern, subject]) => match_pattern(pattern, subject, options.emit, &mut stdout),
        ("lookup", [path, subject]) => {
            lookup_file(path, subject, options.emit, &mut stdout).map(|_| true)
        }
        ("--explain", [code]) => explain(code, &mut stdout).map(|()| true),
        ("help" | "--help" | "-h", []) => {
            print_usage();
            return;
        }
        ("version" | "--version", []) => {
            println!("bitpat {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("error: unrecognized arguments: {}", positional.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    match result {
        Ok(true) => {}
        // `match` reports a miss through the exit status.
        Ok(false) => std::process::exit(1),
        Err(err) => report(&err, options.color),
    }
}

fn report(err: &CliError, color: ColorMode) -> ! {
    tracing::debug!(error = ?err, "command failed");
    let mut emitter = TerminalEmitter::stderr(color);
    emitter.emit(&err.to_diagnostic());
    std::process::exit(2);
}

fn print_usage() {
    println!("bitpat - bit pattern and priority lookup compiler");
    println!();
    println!("Usage: bitpat <command> [options]");
    println!();
    println!("Commands:");
    println!("  parse <pattern>              Show a pattern's width, mask and value");
    println!("  match <pattern> <subject>    Test a subject against a pattern (exit 1 on miss)");
    println!("  lookup <table> <subject>     Evaluate a lookup table file for a subject");
    println!("  --explain <code>             Explain an error code (e.g., E0002)");
    println!("  help                         Show this help message");
    println!("  version                      Show version information");
    println!();
    println!("Options:");
    println!("  --emit                       Print the emitted expression");
    println!("  --color=<when>               auto, always or never (default: auto)");
    println!();
    println!("Patterns: [b|o|h|x]<symbols>, `?` is a wildcard, `_` separates groups.");
    println!("Logging:  RUST_LOG=bitpat=debug, BITPAT_LOG_TREE=1 for span trees.");
}
