//! Main evaluation engine.

use monkey_syntax::ast::{
    Block, Expression, InfixOperator, PrefixOperator, Program, Statement,
};
use monkey_syntax::error::{error, Result};

use crate::builtins;
use crate::env::{EnvId, Environments};
use crate::flow::Flow;
use crate::value::Value;

/// Counters for string allocation during execution.
#[derive(Default, Debug, Clone)]
pub struct MemoryStats {
    /// Number of string values allocated during execution
    pub strings_allocated: usize,
    /// Total bytes allocated for string storage
    pub bytes_allocated: usize,
}

/// Extracts the value of a flow, propagating an early return to the caller.
macro_rules! flow_value {
    ($flow:expr) => {
        match $flow {
            Flow::Continue(value) => value,
            signal @ Flow::Return(_) => return Ok(signal),
        }
    };
}

pub struct Interpreter {
    envs: Environments,
    /// Root frame; a REPL session keeps its bindings here across inputs
    global: EnvId,
    /// Memory usage tracking for observability
    mem: MemoryStats,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let mut envs = Environments::new();
        let global = envs.new_global();
        Self {
            envs,
            global,
            mem: MemoryStats::default(),
        }
    }

    pub fn memory_stats(&self) -> MemoryStats {
        self.mem.clone()
    }

    /// Drop every environment and start over from a fresh global frame.
    pub fn reset(&mut self) {
        self.envs = Environments::new();
        self.global = self.envs.new_global();
        self.mem = MemoryStats::default();
    }

    /// Global bindings, for the REPL `:vars` listing.
    pub fn vars_snapshot(&self) -> Vec<(String, Value)> {
        self.envs.snapshot(self.global)
    }

    /// Evaluate a program against the global environment. The result is the
    /// value of the last statement; a top-level `return` stops execution
    /// early and yields its value.
    pub fn run(&mut self, program: &Program) -> Result<Value> {
        let mut result = Value::Null;
        for statement in &program.statements {
            match self.eval_statement(self.global, statement)? {
                Flow::Continue(value) => result = value,
                Flow::Return(value) => return Ok(value),
            }
        }
        Ok(result)
    }

    fn eval_statement(&mut self, env: EnvId, statement: &Statement) -> Result<Flow> {
        match statement {
            Statement::Let { name, value } => {
                let value = flow_value!(self.eval_expression(env, value)?);
                self.envs.set(env, name.clone(), value);
                Ok(Flow::Continue(Value::Null))
            }
            Statement::Return(expression) => {
                let value = flow_value!(self.eval_expression(env, expression)?);
                Ok(Flow::Return(value))
            }
            Statement::Expression(expression) => self.eval_expression(env, expression),
        }
    }

    /// Unlike `run`, a block passes `Return` through untouched so that a
    /// `return` nested in inner blocks unwinds all the way to the function
    /// boundary.
    fn eval_block(&mut self, env: EnvId, block: &Block) -> Result<Flow> {
        let mut result = Value::Null;
        for statement in &block.statements {
            result = flow_value!(self.eval_statement(env, statement)?);
        }
        Ok(Flow::Continue(result))
    }

    fn eval_expression(&mut self, env: EnvId, expression: &Expression) -> Result<Flow> {
        match expression {
            Expression::IntegerLiteral(value) => Ok(Flow::Continue(Value::Integer(*value))),
            Expression::StringLiteral(value) => {
                self.mem.strings_allocated += 1;
                self.mem.bytes_allocated += value.len();
                Ok(Flow::Continue(Value::Str(value.clone())))
            }
            Expression::BooleanLiteral(value) => Ok(Flow::Continue(Value::Boolean(*value))),
            Expression::Identifier(name) => self.eval_identifier(env, name).map(Flow::Continue),
            Expression::Prefix { operator, right } => {
                let right = flow_value!(self.eval_expression(env, right)?);
                eval_prefix(*operator, right).map(Flow::Continue)
            }
            Expression::Infix {
                operator,
                left,
                right,
            } => {
                let left = flow_value!(self.eval_expression(env, left)?);
                let right = flow_value!(self.eval_expression(env, right)?);
                self.eval_infix(*operator, left, right).map(Flow::Continue)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = flow_value!(self.eval_expression(env, condition)?);
                if is_truthy(&condition) {
                    self.eval_block(env, consequence)
                } else if let Some(alternative) = alternative {
                    self.eval_block(env, alternative)
                } else {
                    Ok(Flow::Continue(Value::Null))
                }
            }
            Expression::FunctionLiteral { parameters, body } => Ok(Flow::Continue(Value::Function {
                parameters: parameters.clone(),
                body: body.clone(),
                env,
            })),
            Expression::ArrayLiteral(expressions) => {
                let mut elements = Vec::with_capacity(expressions.len());
                for expression in expressions {
                    elements.push(flow_value!(self.eval_expression(env, expression)?));
                }
                Ok(Flow::Continue(Value::Array(elements)))
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let function = flow_value!(self.eval_expression(env, function)?);
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(flow_value!(self.eval_expression(env, argument)?));
                }
                self.apply_function(function, args)
            }
            Expression::Index { left, index } => {
                let left = flow_value!(self.eval_expression(env, left)?);
                let index = flow_value!(self.eval_expression(env, index)?);
                eval_index(left, index).map(Flow::Continue)
            }
        }
    }

    fn eval_identifier(&mut self, env: EnvId, name: &str) -> Result<Value> {
        if let Some(value) = self.envs.get(env, name) {
            return Ok(value);
        }
        if let Some(builtin) = builtins::lookup(name) {
            return Ok(Value::Builtin(builtin));
        }
        error(format!("identifier not found: {}", name))
    }

    fn eval_infix(&mut self, operator: InfixOperator, left: Value, right: Value) -> Result<Value> {
        match (left, right) {
            (Value::Integer(left), Value::Integer(right)) => {
                eval_integer_infix(operator, left, right)
            }
            (Value::Str(left), Value::Str(right)) => self.eval_string_infix(operator, left, right),
            (left, right) if left.type_name() != right.type_name() => error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
            (left, right) => match operator {
                InfixOperator::Eq => Ok(Value::Boolean(left == right)),
                InfixOperator::NotEq => Ok(Value::Boolean(left != right)),
                _ => error(format!(
                    "unknown operator: {} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                )),
            },
        }
    }

    fn eval_string_infix(
        &mut self,
        operator: InfixOperator,
        left: String,
        right: String,
    ) -> Result<Value> {
        match operator {
            InfixOperator::Plus => {
                let concatenated = format!("{}{}", left, right);
                self.mem.strings_allocated += 1;
                self.mem.bytes_allocated += concatenated.len();
                Ok(Value::Str(concatenated))
            }
            InfixOperator::Eq => Ok(Value::Boolean(left == right)),
            InfixOperator::NotEq => Ok(Value::Boolean(left != right)),
            _ => error(format!("unknown operator: STRING {} STRING", operator)),
        }
    }

    fn apply_function(&mut self, function: Value, arguments: Vec<Value>) -> Result<Flow> {
        match function {
            Value::Function {
                parameters,
                body,
                env,
            } => {
                if arguments.len() != parameters.len() {
                    return error(format!(
                        "wrong number of arguments. got={}, want={}",
                        arguments.len(),
                        parameters.len()
                    ));
                }
                // the call frame encloses the captured environment, not the
                // caller's; that is what makes closures lexical
                let call_env = self.envs.new_enclosed(env);
                for (parameter, argument) in parameters.iter().zip(arguments) {
                    self.envs.set(call_env, parameter.clone(), argument);
                }
                match self.eval_block(call_env, &body)? {
                    // an explicit return stops here; the last value of the
                    // body is the implicit result otherwise
                    Flow::Return(value) | Flow::Continue(value) => Ok(Flow::Continue(value)),
                }
            }
            Value::Builtin(builtin) => Ok(Flow::Continue(builtin.call(&arguments)?)),
            other => error(format!("not a function: {}", other.type_name())),
        }
    }
}

fn eval_prefix(operator: PrefixOperator, right: Value) -> Result<Value> {
    match operator {
        PrefixOperator::Bang => Ok(Value::Boolean(!is_truthy(&right))),
        PrefixOperator::Minus => match right {
            Value::Integer(value) => Ok(Value::Integer(value.wrapping_neg())),
            other => error(format!("unknown operator: -{}", other.type_name())),
        },
    }
}

fn eval_integer_infix(operator: InfixOperator, left: i64, right: i64) -> Result<Value> {
    match operator {
        InfixOperator::Plus => Ok(Value::Integer(left.wrapping_add(right))),
        InfixOperator::Minus => Ok(Value::Integer(left.wrapping_sub(right))),
        InfixOperator::Asterisk => Ok(Value::Integer(left.wrapping_mul(right))),
        InfixOperator::Slash => {
            if right == 0 {
                return error("division by zero");
            }
            Ok(Value::Integer(left.wrapping_div(right)))
        }
        InfixOperator::Lt => Ok(Value::Boolean(left < right)),
        InfixOperator::Gt => Ok(Value::Boolean(left > right)),
        InfixOperator::Eq => Ok(Value::Boolean(left == right)),
        InfixOperator::NotEq => Ok(Value::Boolean(left != right)),
    }
}

fn eval_index(left: Value, index: Value) -> Result<Value> {
    match (left, index) {
        (Value::Array(elements), Value::Integer(index)) => {
            if index < 0 || index as usize >= elements.len() {
                // out-of-range indexing yields null, not an error
                return Ok(Value::Null);
            }
            Ok(elements[index as usize].clone())
        }
        (left, _) => error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

/// Everything is truthy except `null` and `false`.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Boolean(false))
}
