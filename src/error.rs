//! Error types surfaced by the compiler and virtual machine.

use std::fmt;

use thiserror::Error;

/// A single compile-time diagnostic: one `[line L] Error<loc>: <msg>` line.
#[derive(Debug, Clone)]
pub struct CompileError {
    pub line: u32,
    pub loc: String,
    pub message: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line, self.loc, self.message)
    }
}

/// Every diagnostic collected from one compile pass, in emission order.
#[derive(Debug, Clone)]
pub struct CompileErrors(pub Vec<CompileError>);

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// A runtime failure together with the call-frame trace active when it fired.
///
/// `trace` holds one `[line L] in <name>` entry per active frame, newest first.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub message: String,
    pub trace: Vec<String>,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        for (i, frame) in self.trace.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

/// Top-level error type for every fallible entry point in this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Compile(CompileErrors),
    #[error("{0}")]
    Runtime(RuntimeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
