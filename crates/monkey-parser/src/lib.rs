pub mod parser;

pub use parser::Parser;

use monkey_lexer::Lexer;
use monkey_syntax::ast::Program;
use monkey_syntax::error::Error;

/// Parse source text into a program plus any accumulated parse errors.
///
/// The program is always returned; it is usable only when the error list is
/// empty.
pub fn parse(source: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use monkey_syntax::ast::*;

    fn parse_program_str(input: &str) -> Program {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "parse errors for {:?}: {:?}", input, errors);
        program
    }

    fn parse_expr_str(input: &str) -> Expression {
        let mut program = parse_program_str(input);
        assert_eq!(program.statements.len(), 1, "input: {:?}", input);
        match program.statements.remove(0) {
            Statement::Expression(expression) => expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    fn parse_errors_str(input: &str) -> Vec<String> {
        let (_, errors) = parse(input);
        errors.into_iter().map(|e| e.msg).collect()
    }

    #[test]
    fn test_let_statements() {
        let program = parse_program_str("let x = 5; let y = true; let foobar = y;");
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(
            &program.statements[0],
            Statement::Let { name, value: Expression::IntegerLiteral(5) } if name == "x"
        ));
        assert!(matches!(
            &program.statements[1],
            Statement::Let { name, value: Expression::BooleanLiteral(true) } if name == "y"
        ));
        assert!(matches!(
            &program.statements[2],
            Statement::Let { name, value: Expression::Identifier(v) } if name == "foobar" && v == "y"
        ));
    }

    #[test]
    fn test_return_statements() {
        let program = parse_program_str("return 5; return foobar;");
        assert_eq!(program.statements.len(), 2);
        for statement in &program.statements {
            assert!(matches!(statement, Statement::Return(_)));
        }
    }

    #[test]
    fn test_literal_expressions() {
        assert!(matches!(parse_expr_str("42"), Expression::IntegerLiteral(42)));
        assert!(matches!(parse_expr_str("\"hello\""), Expression::StringLiteral(s) if s == "hello"));
        assert!(matches!(parse_expr_str("true"), Expression::BooleanLiteral(true)));
        assert!(matches!(parse_expr_str("false"), Expression::BooleanLiteral(false)));
        assert!(matches!(parse_expr_str("foobar"), Expression::Identifier(s) if s == "foobar"));
    }

    #[test]
    fn test_prefix_expressions() {
        assert!(matches!(
            parse_expr_str("!5"),
            Expression::Prefix { operator: PrefixOperator::Bang, .. }
        ));
        assert!(matches!(
            parse_expr_str("-15"),
            Expression::Prefix { operator: PrefixOperator::Minus, .. }
        ));
    }

    #[test]
    fn test_infix_expressions() {
        let cases = [
            ("5 + 5", InfixOperator::Plus),
            ("5 - 5", InfixOperator::Minus),
            ("5 * 5", InfixOperator::Asterisk),
            ("5 / 5", InfixOperator::Slash),
            ("5 < 5", InfixOperator::Lt),
            ("5 > 5", InfixOperator::Gt),
            ("5 == 5", InfixOperator::Eq),
            ("5 != 5", InfixOperator::NotEq),
        ];
        for (input, expected) in cases {
            match parse_expr_str(input) {
                Expression::Infix { operator, .. } => assert_eq!(operator, expected),
                other => panic!("expected infix for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_operator_precedence_canonical_strings() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            ("a == b < c", "(a == (b < c))"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
            ("true", "true"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
            ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_expr_str(input).to_string(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_statements_render_semicolon_terminated() {
        assert_eq!(
            parse_program_str("3 + 4; -5 * 5").to_string(),
            "(3 + 4);((-5) * 5);"
        );
        assert_eq!(
            parse_program_str("let x = \"hi\"; return x;").to_string(),
            "let x=\"hi\";return x;"
        );
    }

    #[test]
    fn test_if_expression() {
        match parse_expr_str("if (x < y) { x }") {
            Expression::If {
                consequence,
                alternative,
                ..
            } => {
                assert_eq!(consequence.statements.len(), 1);
                assert!(alternative.is_none());
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_if_else_expression() {
        match parse_expr_str("if (x < y) { x } else { y }") {
            Expression::If { alternative, .. } => {
                let alternative = alternative.expect("alternative block");
                assert_eq!(alternative.statements.len(), 1);
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_function_literal() {
        match parse_expr_str("fn(x, y) { x + y; }") {
            Expression::FunctionLiteral { parameters, body } => {
                assert_eq!(parameters, vec!["x".to_string(), "y".to_string()]);
                assert_eq!(body.statements.len(), 1);
            }
            other => panic!("expected function literal, got {:?}", other),
        }
    }

    #[test]
    fn test_function_parameter_lists() {
        let cases: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];
        for (input, expected) in cases {
            match parse_expr_str(input) {
                Expression::FunctionLiteral { parameters, .. } => {
                    assert_eq!(parameters, expected, "input: {}", input);
                }
                other => panic!("expected function literal, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_duplicate_parameters_rejected() {
        let errors = parse_errors_str("fn(a, b, a) { a }");
        assert_eq!(errors, vec!["duplicate function parameter: a".to_string()]);
    }

    #[test]
    fn test_call_expression() {
        match parse_expr_str("add(1, 2 * 3, 4 + 5)") {
            Expression::Call {
                function,
                arguments,
            } => {
                assert!(matches!(*function, Expression::Identifier(ref s) if s == "add"));
                assert_eq!(arguments.len(), 3);
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_array_literals() {
        match parse_expr_str("[1, 2 * 2, 3 + 3]") {
            Expression::ArrayLiteral(elements) => assert_eq!(elements.len(), 3),
            other => panic!("expected array literal, got {:?}", other),
        }
        match parse_expr_str("[]") {
            Expression::ArrayLiteral(elements) => assert!(elements.is_empty()),
            other => panic!("expected array literal, got {:?}", other),
        }
    }

    #[test]
    fn test_index_expression() {
        match parse_expr_str("myArray[1 + 1]") {
            Expression::Index { left, .. } => {
                assert!(matches!(*left, Expression::Identifier(ref s) if s == "myArray"));
            }
            other => panic!("expected index, got {:?}", other),
        }
    }

    #[test]
    fn test_expect_peek_error() {
        let errors = parse_errors_str("let x 5;");
        assert_eq!(
            errors[0],
            "expected next token to be =, got INT instead"
        );
    }

    #[test]
    fn test_no_prefix_parse_function_error() {
        let errors = parse_errors_str("let x = ;");
        assert_eq!(errors, vec!["no prefix parse function for ; found".to_string()]);
    }

    #[test]
    fn test_integer_literal_out_of_range() {
        let errors = parse_errors_str("92233720368547758080");
        assert_eq!(
            errors,
            vec!["could not parse \"92233720368547758080\" as integer".to_string()]
        );
    }

    #[test]
    fn test_errors_accumulate_across_statements() {
        let errors = parse_errors_str("let = 1; let y 2; foobar;");
        assert!(errors.len() >= 2, "errors: {:?}", errors);
    }

    #[test]
    fn test_canonical_string_round_trips() {
        let sources = [
            "let x = 5 * 5 + 10; x;",
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);",
            "let a = [1, 2, 3]; a[1 + 1]; -a[0];",
            "\"Hello\" + \" \" + \"World\"",
        ];
        for source in sources {
            let first = parse_program_str(source).to_string();
            let second = parse_program_str(&first).to_string();
            assert_eq!(first, second, "source: {}", source);
        }
    }
}
