//! Monkey interpreter: evaluates AST nodes with a tree-walking evaluator.
//!
//! This crate provides the runtime for the Monkey programming language. It
//! walks the AST produced by the parser, threading an environment handle
//! through every node. Early returns travel as a control-flow variant and
//! runtime errors as `Err`, so each boundary (block, call, program) decides
//! exactly what to unwrap.

pub mod builtins;
pub mod env;
pub mod flow;
pub mod interpreter;
pub mod value;

pub use env::{EnvId, Environments};
pub use interpreter::{Interpreter, MemoryStats};
pub use value::Value;
