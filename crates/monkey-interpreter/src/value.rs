//! Runtime values for the Monkey interpreter.

use std::fmt;

use monkey_syntax::ast::Block;

use crate::builtins::Builtin;
use crate::env::EnvId;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value
    Integer(i64),
    /// A UTF-8 encoded string value
    Str(String),
    /// A boolean value (true or false)
    Boolean(bool),
    /// An ordered sequence of values; all operations on it are non-mutating
    Array(Vec<Value>),
    /// A function literal bundled with the environment it closed over
    Function {
        parameters: Vec<String>,
        body: Block,
        env: EnvId,
    },
    /// A native function from the builtin table
    Builtin(Builtin),
    /// The absence of a value
    Null,
}

impl Value {
    /// Type tag used in runtime error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Str(_) => "STRING",
            Value::Boolean(_) => "BOOLEAN",
            Value::Array(_) => "ARRAY",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Null => "NULL",
        }
    }

    /// Debug rendering; identical to the `Display` output.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Function {
                parameters, body, ..
            } => {
                write!(f, "fn({}) {{\n{}\n}}", parameters.join(", "), body)
            }
            Value::Builtin(_) => write!(f, "built-in function"),
            Value::Null => write!(f, "null"),
        }
    }
}
