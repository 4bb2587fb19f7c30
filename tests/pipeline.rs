use sci::bytecode::CompileError;
use sci::frontend::{LexErrorKind, Punct, TypeKeyword};
use sci::{CompiledProgram, Limits, Literal, Op, ParserError, SciError, Token};

const RETURN_88: &str = "int main() { return 88; }";

const CALL_F: &str = "\
int f() { return 10; }
int main() { return f(); }
";

fn tokens(source: &str) -> Vec<Token> {
    sci::tokenize(source, &Limits::default())
        .into_iter()
        .map(|s| s.token)
        .collect()
}

fn compile(source: &str) -> CompiledProgram {
    sci::compile(source, &Limits::default()).expect("compile failed")
}

fn compile_err(source: &str) -> ParserError {
    match sci::compile(source, &Limits::default()) {
        Ok(program) => panic!("expected compile error, got {:?}", program),
        Err(e) => e,
    }
}

fn run(source: &str) -> i32 {
    sci::run_source(source, &Limits::default()).expect("run failed")
}

// ============================================================
// Lexing
// ============================================================

#[test]
fn empty_source_is_single_terminator() {
    assert_eq!(tokens(""), vec![Token::Eof]);
}

#[test]
fn escaped_newline_char_literal() {
    assert_eq!(
        tokens(r"'\n'"),
        vec![Token::Literal(Literal::Char('\n')), Token::Eof]
    );
}

#[test]
fn plain_char_literal() {
    assert_eq!(
        tokens("'k'"),
        vec![Token::Literal(Literal::Char('k')), Token::Eof]
    );
}

#[test]
fn lexing_halts_at_first_error() {
    let toks = tokens("void @ int");
    assert_eq!(toks.len(), 2);
    assert_eq!(toks[0], Token::KwType(TypeKeyword::Void));
    match &toks[1] {
        Token::Error(e) => assert_eq!(e.kind, LexErrorKind::UnexpectedCharacter('@')),
        other => panic!("expected error token, got {:?}", other),
    }
}

#[test]
fn return_88_token_sequence() {
    assert_eq!(
        tokens(RETURN_88),
        vec![
            Token::KwType(TypeKeyword::Int),
            Token::Id("main".to_string()),
            Token::Punct(Punct::OpenPar),
            Token::Punct(Punct::ClosePar),
            Token::Punct(Punct::OpenCurly),
            Token::KwRet,
            Token::Literal(Literal::Int(88)),
            Token::Punct(Punct::Semicolon),
            Token::Punct(Punct::CloseCurly),
            Token::Eof,
        ]
    );
}

// ============================================================
// Compiling and running
// ============================================================

#[test]
fn return_88_compiles_and_runs() {
    let program = compile(RETURN_88);
    let main = program.main().unwrap();
    assert_eq!(main.ops, vec![Op::Push(Literal::Int(88)), Op::Return]);
    assert_eq!(main.instruction(2), &Op::None);
    assert_eq!(run(RETURN_88), 88);
}

#[test]
fn main_takes_slot_zero_regardless_of_order() {
    let program = compile(CALL_F);
    assert_eq!(program.functions[0].name, "main");
    assert_eq!(program.functions[0].ops, vec![Op::Call(1), Op::Return]);
    assert_eq!(program.functions[1].name, "f");
    assert_eq!(
        program.functions[1].ops,
        vec![Op::Push(Literal::Int(10)), Op::Return]
    );
    assert_eq!(run(CALL_F), 10);
}

#[test]
fn demo_program_returns_420() {
    assert_eq!(run(sci::cli::DEMO_SOURCE), 420);
}

#[test]
fn comments_nested_blocks_and_params() {
    let source = "\
# leading comment
int add(int a, int b) {
    // arguments are parsed but not bound
    { ; }
    return 7;
}
int main() {
    add(1, 2);
    return add(3, 4);
}
";
    assert_eq!(run(source), 7);
}

#[test]
fn same_source_gives_identical_results() {
    let first = (tokens(CALL_F), compile(CALL_F), run(CALL_F));
    let second = (tokens(CALL_F), compile(CALL_F), run(CALL_F));
    assert_eq!(first, second);
    assert_eq!(
        compile(CALL_F).to_bytes().unwrap(),
        compile(CALL_F).to_bytes().unwrap()
    );
}

#[test]
fn image_runs_like_the_source() {
    let bytes = compile(CALL_F).to_bytes().unwrap();
    let program = CompiledProgram::from_bytes(&bytes).unwrap();
    assert_eq!(sci::Interpreter::new().run(&program).unwrap(), 10);
}

// ============================================================
// Errors
// ============================================================

#[test]
fn undefined_function_is_compile_error() {
    let err = compile_err("int main() { return g(); }");
    assert!(matches!(
        err,
        ParserError::Compile {
            source: CompileError::UndefinedFunction(ref name),
            ..
        } if name == "g"
    ));
}

#[test]
fn forward_reference_is_undefined() {
    let err = compile_err("int main() { return f(); }\nint f() { return 1; }");
    assert_eq!(err.span().line, 1);
    assert!(matches!(
        err,
        ParserError::Compile {
            source: CompileError::UndefinedFunction(_),
            ..
        }
    ));
}

#[test]
fn lexical_error_surfaces_through_parser() {
    let err = compile_err("int main() { return 1 @ }");
    assert!(matches!(err, ParserError::Lexical(_)));
}

#[test]
fn syntax_error_reports_position() {
    let err = compile_err("int main() { return 1 }");
    assert!(matches!(
        err,
        ParserError::UnexpectedToken {
            expected: sci::frontend::TokenKind::Punct(Punct::Semicolon),
            ..
        }
    ));
}

#[test]
fn program_without_main_fails_at_runtime() {
    let program = compile("int f() { return 1; }");
    assert!(!program.has_main());
    let err = sci::run_source("int f() { return 1; }", &Limits::default()).unwrap_err();
    assert!(matches!(
        err,
        SciError::Runtime(ref e) if e.kind == sci::runtime::RuntimeErrorKind::MissingMain
    ));
}

#[test]
fn evaluate_yields_zero_on_error() {
    assert_eq!(sci::evaluate("int main() { return 5; }"), 5);
    assert_eq!(sci::evaluate("int main() { return 5 }"), 0);
    assert_eq!(sci::evaluate(""), 0);
    assert_eq!(sci::evaluate("int main() { }"), 0);
}

// ============================================================
// Capacities
// ============================================================

#[test]
fn too_many_functions() {
    let limits = Limits {
        max_functions: 2,
        ..Limits::default()
    };
    let err = sci::compile(
        "int a() { return 1; } int b() { return 2; } int main() { return 3; }",
        &limits,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ParserError::Compile {
            source: CompileError::TooManyFunctions { limit: 2, .. },
            ..
        }
    ));
}

#[test]
fn function_too_long() {
    let limits = Limits {
        max_instructions: 3,
        ..Limits::default()
    };
    let source = "int main() { 1; 2; 3; return 4; }";
    assert!(sci::compile(source, &limits).is_err());
    assert_eq!(sci::run_source(source, &Limits::default()).unwrap(), 4);
}

#[test]
fn token_capacity() {
    let limits = Limits {
        max_tokens: 5,
        ..Limits::default()
    };
    let err = sci::compile(RETURN_88, &limits).unwrap_err();
    assert!(matches!(
        err,
        ParserError::Lexical(ref e) if e.kind == LexErrorKind::TooManyTokens(5)
    ));
}

#[test]
fn call_depth_capacity() {
    let source = "int main() { return main(); }";
    let limits = Limits {
        max_call_depth: 3,
        ..Limits::default()
    };
    assert!(matches!(
        sci::run_source(source, &limits),
        Err(SciError::Runtime(ref e))
            if e.kind == sci::runtime::RuntimeErrorKind::CallStackOverflow { limit: 3 }
    ));
}

#[test]
fn limits_from_json() {
    let limits = Limits::from_json(r#"{ "max_call_depth": 2 }"#).unwrap();
    assert_eq!(limits.max_call_depth, 2);
    assert_eq!(limits.max_functions, Limits::default().max_functions);
}
