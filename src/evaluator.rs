use crate::ast::{self, Expression, Node, Operator, Statement};
use crate::builtins::{Builtins, BUILTINS};
use crate::environment::Environment;
use crate::object::{EvalError, FunctionObject, Object, Result};
use std::io::Write;
use std::rc::Rc;

/// How a statement sequence finished: by running off its end, or through a
/// `return`.
enum Completion {
    Normal(Option<Object>),
    Return(Object),
}

/// Tree-walking evaluator. The builtin table and the sink that `println`
/// writes to are fixed when it is constructed.
pub struct Evaluator<'b, W> {
    builtins: &'b Builtins,
    out: W,
}

impl<W: Write> Evaluator<'static, W> {
    pub fn new(out: W) -> Self {
        Self::with_builtins(&BUILTINS, out)
    }
}

impl<'b, W: Write> Evaluator<'b, W> {
    pub fn with_builtins(builtins: &'b Builtins, out: W) -> Self {
        Self { builtins, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs `program` against `env`. The result is the value of the last
    /// node executed, or of a top-level `return`; declarations and function
    /// definitions have no value.
    pub fn eval_program(
        &mut self,
        program: &ast::Program,
        env: &mut Environment,
    ) -> Result<Option<Object>> {
        Ok(match self.eval_nodes(&program.nodes, env)? {
            Completion::Normal(value) => value,
            Completion::Return(value) => Some(value),
        })
    }

    fn eval_nodes(&mut self, nodes: &[Node], env: &mut Environment) -> Result<Completion> {
        let mut last = None;

        for node in nodes.iter() {
            last = match node {
                Node::Statement(Statement::Declaration(decl)) => {
                    self.eval_declaration(decl, env)?;
                    None
                }
                Node::Statement(Statement::Return(ret)) => {
                    let value = self.eval_expression(&ret.value, env)?;
                    return Ok(Completion::Return(value));
                }
                Node::Expression(Expression::FunctionDefinition(def)) => {
                    self.define_function(def, env)?;
                    None
                }
                Node::Expression(Expression::FunctionCall(call)) => self.eval_call(call, env)?,
                Node::Expression(expr) => Some(self.eval_expression(expr, env)?),
            };
        }

        Ok(Completion::Normal(last))
    }

    fn eval_declaration(
        &mut self,
        decl: &ast::VariableDeclaration,
        env: &mut Environment,
    ) -> Result<()> {
        let name = &decl.name.name;
        if env.contains(name) {
            return Err(EvalError::RedeclaredVariable { name: name.clone() });
        }

        let value = self.eval_expression(&decl.initializer, env)?;
        env.declare(name, value)
    }

    fn define_function(
        &mut self,
        def: &Rc<ast::FunctionDefinition>,
        env: &mut Environment,
    ) -> Result<Object> {
        let function = Object::Function(FunctionObject::from(Rc::clone(def)));
        env.declare(&def.name, function.clone())?;
        Ok(function)
    }

    pub fn eval_expression(&mut self, expr: &Expression, env: &mut Environment) -> Result<Object> {
        match expr {
            Expression::Number(raw) => raw
                .parse()
                .map(Object::Number)
                .map_err(|_| EvalError::NumberOutOfRange { raw: raw.clone() }),
            Expression::String(s) => Ok(Object::Text(s.clone())),
            Expression::Variable(var) => self.lookup(&var.name, env),
            Expression::BinaryOp(op) => {
                let left = self.eval_expression(&op.left, env)?;
                let right = self.eval_expression(&op.right, env)?;
                eval_binary_expression(op.operator, left, right)
            }
            Expression::FunctionCall(call) => {
                self.eval_call(call, env)?
                    .ok_or_else(|| EvalError::NoValue {
                        name: call.callee.name.clone(),
                    })
            }
            Expression::FunctionDefinition(def) => self.define_function(def, env),
        }
    }

    /// Local bindings shadow builtins.
    fn lookup(&self, name: &str, env: &Environment) -> Result<Object> {
        env.get(name)
            .cloned()
            .or_else(|| self.builtins.get(name).copied().map(Object::Builtin))
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: name.to_owned(),
            })
    }

    fn eval_call(&mut self, call: &ast::FunctionCall, env: &mut Environment) -> Result<Option<Object>> {
        let name = &call.callee.name;
        let callee = self.lookup(name, env)?;

        let arguments = call
            .arguments
            .iter()
            .map(|arg| self.eval_expression(arg, env))
            .collect::<Result<Vec<_>>>()?;

        match callee {
            Object::Builtin(builtin) => builtin.call(&mut self.out, arguments),
            Object::Function(function) => self.call_function(&function, arguments),
            obj => Err(EvalError::InvalidFunctionCallTarget {
                name: name.clone(),
                type_name: obj.type_name(),
            }),
        }
    }

    fn call_function(
        &mut self,
        function: &FunctionObject,
        arguments: Vec<Object>,
    ) -> Result<Option<Object>> {
        if arguments.len() != function.arity() {
            return Err(EvalError::IncorrectArity {
                name: function.name().to_owned(),
                got: arguments.len(),
                want: function.arity(),
            });
        }

        let def = &function.definition;
        let mut frame = Environment::new();
        for (param, value) in def.parameters.iter().zip(arguments) {
            frame.declare(&param.name, value)?;
        }

        Ok(match self.eval_nodes(&def.body, &mut frame)? {
            Completion::Return(value) => Some(value),
            Completion::Normal(_) => None,
        })
    }
}

fn eval_binary_expression(operator: Operator, left: Object, right: Object) -> Result<Object> {
    match (left, right) {
        (Object::Number(x), Object::Number(y)) => eval_number_binary_expression(operator, x, y),
        (left, right) if operator == Operator::Add && is_text_like(&left) && is_text_like(&right) => {
            Ok(Object::Text(format!("{}{}", left, right)))
        }
        (left, right) => Err(EvalError::TypeMismatch {
            left: left.type_name(),
            operator,
            right: right.type_name(),
        }),
    }
}

fn is_text_like(obj: &Object) -> bool {
    matches!(obj, Object::Number(_) | Object::Text(_))
}

fn eval_number_binary_expression(operator: Operator, left: i64, right: i64) -> Result<Object> {
    let result = match operator {
        Operator::Add => left.checked_add(right),
        Operator::Subtract => left.checked_sub(right),
        Operator::Multiply => left.checked_mul(right),
        Operator::Divide => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            left.checked_div(right)
        }
    };

    result
        .map(Object::Number)
        .ok_or(EvalError::Overflow { operator })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn test_eval(input: &str) -> Result<Option<Object>> {
        test_eval_with_output(input).0
    }

    fn test_eval_with_output(input: &str) -> (Result<Option<Object>>, String) {
        let tokens = tokenize(input).expect("Lex errors found");
        let program = parse(&tokens).expect("Parse errors found");

        let mut evaluator = Evaluator::new(Vec::new());
        let result = evaluator.eval_program(&program, &mut Environment::new());
        let output = String::from_utf8(evaluator.into_output()).unwrap();

        (result, output)
    }

    fn test_value(input: &str) -> Object {
        test_eval(input)
            .unwrap_or_else(|err| panic!("{}: {}", input, err))
            .unwrap_or_else(|| panic!("{}: no value", input))
    }

    #[test]
    fn test_eval_number_expression() {
        let cases = vec![
            ("5", 5),
            ("10;", 10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("5 * 2 + 10", 60),
            ("5 + 2 * 10", 25),
            ("10 - 4 - 3", 9),
            ("7 / 2", 3),
            ("1 + 1 - 2 * 3 / 4", 2),
            ("0009", 9),
        ];

        for (input, output) in cases.into_iter() {
            assert_eq!(test_value(input), Object::Number(output), "{}", input);
        }
    }

    #[test]
    fn test_eval_text_expression() {
        let cases = vec![
            ("\"hello\"", "hello"),
            ("\"foo\" + \"bar\"", "foobar"),
            ("\"n = \" + 4", "n = 4"),
            ("4 + \"2\"", "42"),
            ("\"a\" + 1 + 2", "a3"),
        ];

        for (input, output) in cases.into_iter() {
            assert_eq!(test_value(input), Object::Text(output.to_owned()), "{}", input);
        }
    }

    #[test]
    fn test_type_mismatch() {
        let cases = vec![
            ("\"a\" - 1", "TEXT", Operator::Subtract, "NUMBER"),
            ("2 * \"b\"", "NUMBER", Operator::Multiply, "TEXT"),
            ("\"a\" / \"b\"", "TEXT", Operator::Divide, "TEXT"),
            ("println + 1", "BUILTIN", Operator::Add, "NUMBER"),
        ];

        for (input, left, operator, right) in cases.into_iter() {
            assert_eq!(
                test_eval(input),
                Err(EvalError::TypeMismatch {
                    left,
                    operator,
                    right
                })
            );
        }
    }

    #[test]
    fn test_arithmetic_errors() {
        assert_eq!(test_eval("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(
            test_eval("9223372036854775807 + 1"),
            Err(EvalError::Overflow {
                operator: Operator::Add
            })
        );
        assert_eq!(
            test_eval("99999999999999999999"),
            Err(EvalError::NumberOutOfRange {
                raw: "99999999999999999999".to_owned()
            })
        );
    }

    #[test]
    fn test_declarations() {
        let cases = vec![
            ("let a = 5; a;", 5),
            ("const a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; const b = a; let c = a + b + 5; c;", 15),
        ];

        for (input, output) in cases.into_iter() {
            assert_eq!(test_value(input), Object::Number(output), "{}", input);
        }
    }

    #[test]
    fn test_declaration_has_no_value() {
        assert_eq!(test_eval("let a = 1;"), Ok(None));
        assert_eq!(test_eval(""), Ok(None));
    }

    #[test]
    fn test_redeclared_variable() {
        let cases = vec![
            "let a = 1; let a = 2;",
            "const a = 1; let a = 2;",
            "let a = 1; func a() { return 1; }",
        ];

        for input in cases.into_iter() {
            assert_eq!(
                test_eval(input),
                Err(EvalError::RedeclaredVariable {
                    name: "a".to_owned()
                }),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_redeclaration_does_not_evaluate_initializer() {
        let (result, output) = test_eval_with_output("let a = 1; let a = println(\"side effect\");");

        assert!(result.is_err());
        assert_eq!(output, "");
    }

    #[test]
    fn test_undefined_variable() {
        assert_eq!(
            test_eval("foobar;"),
            Err(EvalError::UndefinedVariable {
                name: "foobar".to_owned()
            })
        );
        assert_eq!(
            test_eval("missing(1);"),
            Err(EvalError::UndefinedVariable {
                name: "missing".to_owned()
            })
        );
    }

    #[test]
    fn test_function_application() {
        let cases = vec![
            ("func add(x, y) { return x + y; } add(2, 3);", 5),
            ("func identity(x) { return x; } identity(5);", 5),
            ("func double(x) { return x * 2; } double(double(3));", 12),
            ("func five() { return 5; } five() + 1;", 6),
            ("func add(x, y) { return x + y; } add(5 + 5, add(5, 5));", 20),
            (
                "func f(x) { let y = x * 2; func g(z) { return z + 1; } return g(y); } f(4);",
                9,
            ),
        ];

        for (input, output) in cases.into_iter() {
            assert_eq!(test_value(input), Object::Number(output), "{}", input);
        }
    }

    #[test]
    fn test_return_short_circuits() {
        let (result, output) = test_eval_with_output(
            "func f() { println(\"before\"); return 1; println(\"after\"); } f();",
        );

        assert_eq!(result, Ok(Some(Object::Number(1))));
        assert_eq!(output, "before\n");

        assert_eq!(test_eval("return 7; 8;"), Ok(Some(Object::Number(7))));
    }

    #[test]
    fn test_function_without_return_has_no_value() {
        assert_eq!(test_eval("func f() { 1 + 1; } f();"), Ok(None));
        assert_eq!(
            test_eval("func f() { 1 + 1; } let x = f();"),
            Err(EvalError::NoValue {
                name: "f".to_owned()
            })
        );
        assert_eq!(
            test_eval("let x = println(1);"),
            Err(EvalError::NoValue {
                name: "println".to_owned()
            })
        );
    }

    #[test]
    fn test_functions_do_not_capture_enclosing_bindings() {
        assert_eq!(
            test_eval("let a = 1; func f() { return a; } f();"),
            Err(EvalError::UndefinedVariable {
                name: "a".to_owned()
            })
        );
        assert_eq!(
            test_eval("func g() { return 1; } func f() { return g(); } f();"),
            Err(EvalError::UndefinedVariable {
                name: "g".to_owned()
            })
        );
    }

    #[test]
    fn test_builtins_reachable_from_functions() {
        let (result, output) =
            test_eval_with_output("func greet(who) { println(\"hello\", who); return 0; } greet(\"you\");");

        assert_eq!(result, Ok(Some(Object::Number(0))));
        assert_eq!(output, "hello you\n");
    }

    #[test]
    fn test_parameters_shadow_builtins() {
        assert_eq!(
            test_value("func f(println) { return println + 1; } f(1);"),
            Object::Number(2)
        );
    }

    #[test]
    fn test_call_frames_are_discarded() {
        assert_eq!(
            test_eval("func f(x) { return x; } f(1); x;"),
            Err(EvalError::UndefinedVariable {
                name: "x".to_owned()
            })
        );
    }

    #[test]
    fn test_incorrect_arity() {
        assert_eq!(
            test_eval("func add(x, y) { return x + y; } add(1);"),
            Err(EvalError::IncorrectArity {
                name: "add".to_owned(),
                got: 1,
                want: 2
            })
        );
    }

    #[test]
    fn test_invalid_function_call_target() {
        assert_eq!(
            test_eval("let x = 1; x(2);"),
            Err(EvalError::InvalidFunctionCallTarget {
                name: "x".to_owned(),
                type_name: "NUMBER"
            })
        );
    }

    #[test]
    fn test_println() {
        let (result, output) = test_eval_with_output(
            "const greeting = \"hello\"; let n = 40 + 2; println(greeting, n); println();",
        );

        assert_eq!(result, Ok(None));
        assert_eq!(output, "hello 42\n\n");
    }

    #[test]
    fn test_function_value_display() {
        assert_eq!(
            test_value("func add(x, y) { return x + y; } add;").to_string(),
            "func add(x, y)"
        );
        assert_eq!(test_value("println;").to_string(), "builtin println");
    }

    #[test]
    fn test_custom_builtins() {
        fn answer(_: &mut dyn Write, _: Vec<Object>) -> Result<Option<Object>> {
            Ok(Some(Object::Number(42)))
        }

        let builtins: Builtins = vec![("answer", crate::builtins::Builtin::new("answer", answer))]
            .into_iter()
            .collect();
        let tokens = tokenize("answer() + 1; println;").unwrap();
        let program = parse(&tokens).unwrap();
        let mut evaluator = Evaluator::with_builtins(&builtins, Vec::new());

        assert_eq!(
            evaluator.eval_program(&program, &mut Environment::new()),
            Err(EvalError::UndefinedVariable {
                name: "println".to_owned()
            })
        );

        let tokens = tokenize("answer() + 1;").unwrap();
        let program = parse(&tokens).unwrap();
        assert_eq!(
            evaluator.eval_program(&program, &mut Environment::new()),
            Ok(Some(Object::Number(43)))
        );
    }
}
