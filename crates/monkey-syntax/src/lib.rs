//! Monkey language syntax definitions and abstract syntax tree.
//!
//! This crate provides the foundational syntax elements for the Monkey
//! programming language: token definitions, abstract syntax tree (AST)
//! nodes, and the error type shared across the toolchain. Every other crate
//! in the workspace depends on these types.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │              Parser                 │  <- Produces AST
//! ├─────────────────────────────────────┤
//! │               Lexer                 │  <- Produces Tokens
//! ├─────────────────────────────────────┤
//! │           Source Code               │  <- Raw text input
//! └─────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ## Working with tokens
//!
//! ```rust
//! use monkey_syntax::{Token, TokenKind, lookup_ident};
//!
//! let token = Token::new(TokenKind::Ident, "variable");
//! assert_eq!(lookup_ident("fn"), TokenKind::Function);
//! assert_eq!(lookup_ident("variable"), TokenKind::Ident);
//! ```
//!
//! ## Building AST nodes
//!
//! ```rust
//! use monkey_syntax::{Expression, Statement};
//!
//! let expression = Expression::IntegerLiteral(42);
//! let statement = Statement::Expression(expression);
//! assert_eq!(statement.to_string(), "42;");
//! ```

/// Token definitions and the keyword lookup table.
pub mod token;

/// Abstract syntax tree node definitions and the canonical stringifier.
pub mod ast;

/// Error handling utilities and types.
pub mod error;

// Re-export all public items for convenience
pub use ast::*;
pub use error::*;
pub use token::*;
