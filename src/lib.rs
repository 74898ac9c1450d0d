//! A single-pass bytecode compiler and stack-based virtual machine for a
//! small dynamically-typed scripting language: C-like syntax, global and
//! block-scoped local variables, `if`/`while`/`for` control flow, and
//! first-class functions.
//!
//! ```
//! let mut vm = hearth::Vm::new();
//! vm.interpret("print 1 + 2;").unwrap();
//! ```

pub mod chunk;
pub mod compiler;
pub mod debug;
pub mod error;
pub mod scanner;
pub mod table;
pub mod value;
pub mod vm;

pub use chunk::{Chunk, OpCode};
pub use error::{CompileError, CompileErrors, Error, Result, RuntimeError};
pub use table::Table;
pub use value::{ObjFunction, ObjString, Value};
pub use vm::{SharedBuffer, Vm};

/// Compiles and runs `source` in a fresh [`Vm`]. Convenience wrapper for
/// one-shot execution; callers that need state to persist across multiple
/// inputs (a REPL) should keep their own [`Vm`] and call
/// [`Vm::interpret`] directly.
pub fn run_source(source: &str) -> Result<()> {
    Vm::new().interpret(source)
}
