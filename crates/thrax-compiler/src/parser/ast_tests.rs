use crate::Compilation;
use crate::parser::ast::{Expr, Stmt};

fn body(source: &str) -> Expr {
    let compilation = Compilation::expect_valid(source);
    compilation
        .root()
        .var_defs()
        .last()
        .and_then(|def| def.body())
        .expect("definition has a body")
}

#[test]
fn var_def_accessors() {
    let compilation = Compilation::expect_valid("export x = 'a';\ny = 'b';");
    let defs: Vec<_> = compilation.root().var_defs().collect();
    assert_eq!(defs.len(), 2);

    assert!(defs[0].is_exported());
    assert_eq!(defs[0].name().unwrap().text(), "x");
    assert!(!defs[1].is_exported());
    assert_eq!(defs[1].name().unwrap().text(), "y");
    assert!(matches!(defs[1].body(), Some(Expr::Str(_))));
}

#[test]
fn repeat_bounds() {
    let Expr::Repeat(range) = body("x = a{2,5};") else {
        panic!("expected Repeat");
    };
    assert!(range.is_range());
    assert_eq!(range.lower().unwrap().text(), "2");
    assert_eq!(range.upper().unwrap().text(), "5");
    assert!(matches!(range.operand(), Some(Expr::Ref(_))));

    let Expr::Repeat(exact) = body("x = a{3};") else {
        panic!("expected Repeat");
    };
    assert!(!exact.is_range());
    assert_eq!(exact.lower().unwrap().text(), "3");
    assert!(exact.upper().is_none());
}

#[test]
fn closure_marker() {
    let Expr::Closure(closure) = body("x = a+;") else {
        panic!("expected Closure");
    };
    assert_eq!(closure.marker().unwrap().text(), "+");
    assert!(matches!(closure.operand(), Some(Expr::Ref(_))));
}

#[test]
fn string_raw_text_keeps_escapes() {
    let Expr::Str(s) = body(r"x = 'a\'[65]';") else {
        panic!("expected Str");
    };
    assert_eq!(s.raw_text(), r"a\'[65]");

    let Expr::Str(empty) = body("x = \"\";") else {
        panic!("expected Str");
    };
    assert!(empty.value().is_none());
    assert_eq!(empty.raw_text(), "");
}

#[test]
fn chain_operands_in_source_order() {
    let Expr::Union(union) = body("x = a | b c | d;") else {
        panic!("expected Union");
    };
    let operands: Vec<_> = union.operands().collect();
    assert_eq!(operands.len(), 3);
    assert!(matches!(operands[0], Expr::Ref(_)));
    assert!(matches!(operands[1], Expr::Concat(_)));
    assert_eq!(union.operators().count(), 2);

    let expr = Expr::Union(union);
    assert_eq!(expr.chain_operands().map(|ops| ops.len()), Some(3));
    assert!(!expr.has_missing_operand());
}

#[test]
fn chain_operands_only_for_chains() {
    assert!(body("x = a:'b';").chain_operands().is_none());
    assert!(body("x = a - b;").chain_operands().is_some());
    assert!(body("x = a @ b;").chain_operands().is_some());
}

#[test]
fn output_operands() {
    let Expr::Output(output) = body("x = a:'b';") else {
        panic!("expected Output");
    };
    assert!(matches!(output.lhs(), Some(Expr::Ref(_))));
    assert!(matches!(output.rhs(), Some(Expr::Str(_))));
}

#[test]
fn chain_with_missing_operand() {
    let compilation = Compilation::expect("x = a | ;");
    let body = compilation
        .root()
        .var_defs()
        .next()
        .and_then(|def| def.body())
        .expect("definition has a body");
    assert!(matches!(body, Expr::Union(_)));
    assert!(body.has_missing_operand());
    assert_eq!(body.chain_operands().map(|ops| ops.len()), Some(1));
}

#[test]
fn weight_and_nested() {
    let Expr::Weight(weight) = body("x = (a) <1.5>;") else {
        panic!("expected Weight");
    };
    assert_eq!(weight.value().unwrap().text(), "1.5");

    let Some(Expr::Nested(nested)) = weight.operand() else {
        panic!("expected Nested");
    };
    assert!(matches!(nested.inner(), Some(Expr::Ref(_))));
}

#[test]
fn call_arguments() {
    let Expr::Call(call) = body("x = F['a', b | c, (d)];") else {
        panic!("expected Call");
    };
    assert_eq!(call.name().unwrap().text(), "F");
    let args: Vec<_> = call.args().collect();
    assert_eq!(args.len(), 3);
    assert!(matches!(args[1], Expr::Union(_)));
}

#[test]
fn other_statements() {
    let compilation = Compilation::expect_valid(
        "import 'x.grm' as x;\nfunc F[a, b] { y = a; return y b; }\nreturn 'z';",
    );
    let stmts: Vec<_> = compilation.root().stmts().collect();
    assert_eq!(stmts.len(), 3);

    let Stmt::Import(import) = &stmts[0] else {
        panic!("expected Import");
    };
    assert_eq!(import.path().unwrap().raw_text(), "x.grm");
    assert_eq!(import.alias().unwrap().text(), "x");

    let Stmt::FuncDef(func) = &stmts[1] else {
        panic!("expected FuncDef");
    };
    assert_eq!(func.name().unwrap().text(), "F");
    let params: Vec<_> = func
        .params()
        .unwrap()
        .names()
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(params, vec!["a", "b"]);
    let inner: Vec<_> = func.body().collect();
    assert!(matches!(inner[0], Stmt::VarDef(_)));
    assert!(matches!(inner[1], Stmt::Return(_)));

    let Stmt::Return(ret) = &stmts[2] else {
        panic!("expected Return");
    };
    assert!(matches!(ret.body(), Some(Expr::Str(_))));
}
