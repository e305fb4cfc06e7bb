//! Native functions, reachable by bare identifier when no binding shadows
//! them.

use monkey_syntax::error::{error, Result};

use crate::value::Value;

type BuiltinFn = fn(&[Value]) -> Result<Value>;

/// A named native function. Builtins are first-class: they can be bound,
/// passed as arguments, and returned like any other value.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    func: BuiltinFn,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// The builtin table.
const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("len", builtin_len),
    ("first", builtin_first),
    ("last", builtin_last),
    ("rest", builtin_rest),
    ("push", builtin_push),
    ("puts", builtin_puts),
];

/// Look a builtin up by name. Consulted after environment lookup misses.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(builtin_name, _)| *builtin_name == name)
        .map(|&(name, func)| Builtin { name, func })
}

fn expect_arity(args: &[Value], want: usize) -> Result<()> {
    if args.len() != want {
        return error(format!(
            "wrong number of arguments. got={}, want={}",
            args.len(),
            want
        ));
    }
    Ok(())
}

/// `len(v)`: byte length of a string or element count of an array.
fn builtin_len(args: &[Value]) -> Result<Value> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_first(args: &[Value]) -> Result<Value> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        other => error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_last(args: &[Value]) -> Result<Value> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        other => error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// `rest(arr)`: a new array of everything but the first element, or null
/// for an empty array.
fn builtin_rest(args: &[Value]) -> Result<Value> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(elements[1..].to_vec()))
            }
        }
        other => error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// `push(arr, v)`: a new array with `v` appended; the input is untouched.
fn builtin_push(args: &[Value]) -> Result<Value> {
    expect_arity(args, 2)?;
    match &args[0] {
        Value::Array(elements) => {
            let mut extended = elements.clone();
            extended.push(args[1].clone());
            Ok(Value::Array(extended))
        }
        other => error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// `puts(...)`: print each argument on its own line; returns null.
fn builtin_puts(args: &[Value]) -> Result<Value> {
    if std::env::var("MONKEY_BENCH_SILENT").is_err() {
        for arg in args {
            println!("{}", arg);
        }
    }
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::Array(values.iter().copied().map(Value::Integer).collect())
    }

    #[test]
    fn test_len() {
        assert_eq!(
            builtin_len(&[Value::Str("hello".to_string())]),
            Ok(Value::Integer(5))
        );
        assert_eq!(builtin_len(&[ints(&[1, 2, 3])]), Ok(Value::Integer(3)));
        assert_eq!(
            builtin_len(&[Value::Integer(1)]).unwrap_err().msg,
            "argument to `len` not supported, got INTEGER"
        );
        assert_eq!(
            builtin_len(&[]).unwrap_err().msg,
            "wrong number of arguments. got=0, want=1"
        );
    }

    #[test]
    fn test_first_last_rest_on_empty_array() {
        assert_eq!(builtin_first(&[ints(&[])]), Ok(Value::Null));
        assert_eq!(builtin_last(&[ints(&[])]), Ok(Value::Null));
        assert_eq!(builtin_rest(&[ints(&[])]), Ok(Value::Null));
    }

    #[test]
    fn test_rest_copies() {
        let original = ints(&[1, 2, 3]);
        assert_eq!(builtin_rest(&[original.clone()]), Ok(ints(&[2, 3])));
        assert_eq!(original, ints(&[1, 2, 3]));
    }

    #[test]
    fn test_push_does_not_mutate() {
        let original = ints(&[1, 2]);
        assert_eq!(
            builtin_push(&[original.clone(), Value::Integer(3)]),
            Ok(ints(&[1, 2, 3]))
        );
        assert_eq!(original, ints(&[1, 2]));
    }

    #[test]
    fn test_lookup() {
        assert!(lookup("len").is_some());
        assert!(lookup("puts").is_some());
        assert!(lookup("print").is_none());
    }
}
