use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;

use hearth::{Error, Vm};

const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_SOFTWARE: u8 = 70;
const EX_IOERR: u8 = 74;

/// Matches the reference driver's `char line[1024]` REPL input buffer.
const REPL_LINE_MAX: u64 = 1024;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => repl(),
        2 => run_file(&args[1]),
        _ => {
            eprintln!("Usage: hearth [path]");
            ExitCode::from(EX_USAGE)
        }
    }
}

fn repl() -> ExitCode {
    let mut vm = Vm::new();
    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::from(EX_IOERR);
        }
        let mut line = String::new();
        let mut bounded = stdin.lock().take(REPL_LINE_MAX);
        match bounded.read_line(&mut line) {
            Ok(0) => {
                println!();
                return ExitCode::SUCCESS;
            }
            Ok(_) if bounded.limit() == 0 && !line.ends_with('\n') => {
                eprintln!("Input line too long (max {REPL_LINE_MAX} bytes); ignoring.");
                drain_rest_of_line(&stdin);
            }
            Ok(_) => {
                if let Err(err) = vm.interpret(&line) {
                    report_error(&err);
                }
            }
            Err(_) => return ExitCode::from(EX_IOERR),
        }
    }
}

/// Discards the remainder of an overlong REPL line so the next prompt
/// starts at the following line rather than mid-line leftovers.
fn drain_rest_of_line(stdin: &io::Stdin) {
    let mut rest = String::new();
    let _ = stdin.lock().read_line(&mut rest);
}

fn run_file(path: &str) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Could not read file \"{path}\": {err}");
            return ExitCode::from(EX_IOERR);
        }
    };

    let mut vm = Vm::new();
    match vm.interpret(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ Error::Compile(_)) => {
            report_error(&err);
            ExitCode::from(EX_DATAERR)
        }
        Err(err @ Error::Runtime(_)) => {
            report_error(&err);
            ExitCode::from(EX_SOFTWARE)
        }
        Err(err @ Error::Io(_)) => {
            report_error(&err);
            ExitCode::from(EX_IOERR)
        }
    }
}

fn report_error(err: &Error) {
    eprintln!("{err}");
}
