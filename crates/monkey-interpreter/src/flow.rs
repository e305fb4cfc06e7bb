//! Control flow for the evaluator.

use crate::value::Value;

/// Outcome of evaluating a node.
///
/// Blocks pass `Return` through untouched; the program top level and the
/// function-call boundary unwrap it. Runtime errors travel separately as
/// the `Err` arm of the surrounding `Result`.
#[derive(Debug)]
pub(crate) enum Flow {
    /// Continue normal evaluation with the given value
    Continue(Value),
    /// Unwind to the nearest function call or the program top level
    Return(Value),
}
