use crate::Compilation;
use crate::re::Re;
use crate::shot_solomonoff;

#[test]
fn literals_fold_through_references() {
    shot_solomonoff!(r#"
        a = "ab" "cd";
        b = 'x';
        c = a b;
    "#, @r"
    a = 'abcd'
    b = 'x'
    c = 'abcdx'
    ");
}

#[test]
fn classes_fold() {
    shot_solomonoff!(r#"
        A = 'a' | 'b' | 'c';
        B = 'b' | 'c' | 'd';
        U = A | B;
        D = A - B;
    "#, @r"
    A = ['a'-'c']
    B = ['b'-'d']
    U = ['a'-'d']
    D = 'a'
    ");
}

#[test]
fn class_with_gaps_is_parenthesized() {
    shot_solomonoff!(r#"
        d = 'a' | 'b';
        e = d 'c';
        m = 'a' | 'c';
        k = m*;
    "#, @r"
    d = ['a'-'b']
    e = ['a'-'b'] 'c'
    m = 'a'|'c'
    k = ('a'|'c')*
    ");
}

#[test]
fn complex_definitions_are_shared_by_name() {
    shot_solomonoff!(r#"
        s = 'a'*;
        t = s s | 'b';
    "#, @r"
    s = 'a'*
    t = !!s s|'b'
    ");
}

#[test]
fn repetition_hoists_complex_operand() {
    shot_solomonoff!(r#"
        y = 'a'*;
        x = y{2,4};
    "#, @r"
    y = 'a'*
    __x__0 = y
    x = !!__x__0 !!__x__0 !!__x__0? __x__0?
    ");
}

#[test]
fn repetition_of_literals() {
    shot_solomonoff!(r#"
        x = 'ab'{3};
        z = 'ab'{0,2};
        e = 'a'{3,1};
        f = 'a'{0};
    "#, @r"
    x = 'ababab'
    z = 'ab'? 'ab'?
    e = ''
    f = ''
    ");
}

#[test]
fn synthetic_names_restart_per_definition() {
    let compilation = Compilation::expect_valid("y = 'a'*; x = y{2} y{1,2}; z = y{2};");
    let names: Vec<_> = compilation.program().iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["y", "__x__0", "__x__1", "x", "__z__0", "z"]);
}

#[test]
fn unsupported_constructs_become_sentinels() {
    shot_solomonoff!(r#"
        o = 'a':'b';
        n = 'a':('b'*);
        w = 'a' <2>;
        f = F['a'];
    "#, @r"
    o = 'a':'b'
    n = NONDETERMINISM_ERROR
    w = WEIGHT_NOT_SUPPORTED
    f = FUNCTION_NOT_SUPPORTED
    ");

    let compilation = Compilation::expect_valid("n = 'a':('b'*);\nw = 'a' <2>;");
    insta::assert_snapshot!(compilation.dump_diagnostics(), @r"
    warning at 8..14: output side must be a string literal: replaced by `NONDETERMINISM_ERROR`
    warning at 20..27: weights are not supported: `<2>` replaced by `WEIGHT_NOT_SUPPORTED`
    ");
}

#[test]
fn escapes_resolve() {
    shot_solomonoff!(r#"
        x = "a\"b[0x41]";
    "#, @r#"x = 'a"bA'"#);
}

#[test]
fn compose_and_subtract() {
    shot_solomonoff!(r#"
        p = 'a'* @ 'b';
        q = 'a'* - 'b';
    "#, @r"
    p = compose['a'*,'b']
    q = subtract['a'*,'b']
    ");
}

#[test]
fn redefinition_keeps_position() {
    shot_solomonoff!(r#"
        a = 'x';
        b = 'y';
        a = 'z';
    "#, @r"
    a = 'z'
    b = 'y'
    ");
}

#[test]
fn undefined_reference_is_kept() {
    let compilation = Compilation::expect_valid("x = missing 'a';");
    insta::assert_snapshot!(compilation.dump_diagnostics(), @"warning at 4..11: `missing` is not defined");
    insta::assert_snapshot!(compilation.to_solomonoff(), @"x = missing 'a'");
}

#[test]
fn empty_literal_is_neutral_in_concatenation() {
    let compilation = Compilation::expect_valid("x = 'a' '';");
    assert_eq!(compilation.program().get("x"), Some(&Re::Char { codepoint: 97 }));
}

#[test]
fn unsupported_statements_warn() {
    let compilation = Compilation::expect_valid(
        "import 'lib.grm' as lib;\nfunc F[a] { return a; }\nx = 'a';",
    );
    insta::assert_snapshot!(compilation.dump_diagnostics(), @r"
    warning at 0..24: imports are not supported: `lib.grm` is not loaded
    warning at 25..48: functions are not supported: body of `F` is not evaluated
    ");
    assert_eq!(compilation.program().len(), 1);
}

#[test]
fn long_concatenation_serializes() {
    let source = format!("y = 'a'*;\nx = {};", "y ".repeat(150_000));
    let compilation = Compilation::new(&source)
        .with_exec_fuel(None)
        .exec()
        .unwrap();
    assert!(compilation.is_valid());
    assert!(matches!(compilation.program().get("x"), Some(Re::Concat { .. })));

    let text = compilation.to_solomonoff();
    assert!(text.starts_with("y = 'a'*\nx = !!y !!y "));
    assert!(text.ends_with(" !!y y\n"));
    assert_eq!(text.matches("!!y").count(), 149_999);
}

#[test]
fn large_repetition_of_complex_operand_serializes() {
    let compilation = Compilation::expect_valid("x = 'a'*{200000};");
    let names: Vec<_> = compilation.program().iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["__x__0", "x"]);

    let text = compilation.to_solomonoff();
    assert!(text.starts_with("__x__0 = 'a'*\nx = !!__x__0 !!__x__0 "));
    assert!(text.ends_with(" !!__x__0 __x__0\n"));
    assert_eq!(text.matches("!!__x__0").count(), 199_999);
}

#[test]
fn large_repetition_of_literal_is_one_buffer() {
    let compilation = Compilation::expect_valid("x = 'ab'{100000} 'c';");
    let Some(Re::Str { seq }) = compilation.program().get("x") else {
        panic!("expected a folded literal");
    };
    assert_eq!(seq.len(), 200_001);
    assert_eq!(seq.at(199_998), 'a' as u32);
    assert_eq!(seq.at(200_000), 'c' as u32);
}

#[test]
fn empty_repetition_of_complex_operand_is_not_hoisted() {
    shot_solomonoff!(r#"
        y = 'a'*;
        e = y{0,0};
        f = y{3,1};
    "#, @r"
    y = 'a'*
    e = ''
    f = ''
    ");

    let compilation = Compilation::expect_valid("y = 'a'*; e = y{0,0}; f = y{3,1};");
    assert!(
        compilation
            .program()
            .iter()
            .all(|(name, _)| !name.starts_with("__"))
    );
    assert_eq!(compilation.program().len(), 3);
}

#[test]
fn literals_after_a_reference_stay_separate() {
    shot_solomonoff!(r#"
        y = 'a'*;
        x = 'b' 'c' y 'd' 'e';
    "#, @r"
    y = 'a'*
    x = 'bc' y 'd' 'e'
    ");
}
