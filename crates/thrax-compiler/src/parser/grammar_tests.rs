use crate::Compilation;
use crate::parser::SyntaxKind;
use crate::shot_cst;

#[test]
fn literal_definition() {
    shot_cst!(r#"
        x = 'a' "b";
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Concat
          Str
            SingleQuote "'"
            StrVal "a"
            SingleQuote "'"
          Str
            DoubleQuote "\""
            StrVal "b"
            DoubleQuote "\""
        Semicolon ";"
    "#);
}

#[test]
fn empty_literal() {
    shot_cst!(r#"
        x = '';
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Str
          SingleQuote "'"
          SingleQuote "'"
        Semicolon ";"
    "#);
}

#[test]
fn binary_precedence() {
    shot_cst!(r#"
        x = a b | c - d @ e;
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Compose
          Union
            Concat
              Ref
                Id "a"
              Ref
                Id "b"
            Pipe "|"
            Diff
              Ref
                Id "c"
              Minus "-"
              Ref
                Id "d"
          At "@"
          Ref
            Id "e"
        Semicolon ";"
    "#);
}

#[test]
fn chained_operators_share_one_node() {
    shot_cst!(r#"
        x = a | b | c;
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Union
          Ref
            Id "a"
          Pipe "|"
          Ref
            Id "b"
          Pipe "|"
          Ref
            Id "c"
        Semicolon ";"
    "#);
}

#[test]
fn long_juxtaposition_is_flat() {
    let source = format!("x = {};", "a ".repeat(50_000));
    let compilation = Compilation::new(&source)
        .with_exec_fuel(None)
        .exec()
        .unwrap();
    let body = compilation
        .root()
        .var_defs()
        .next()
        .and_then(|def| def.body())
        .expect("definition has a body");
    assert_eq!(body.as_cst().kind(), SyntaxKind::Concat);
    assert_eq!(body.chain_operands().map(|ops| ops.len()), Some(50_000));
}

#[test]
fn closure_and_repetition() {
    shot_cst!(r#"
        x = (a | 'b')+ {1,2};
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Repeat
          Closure
            Nested
              ParenOpen "("
              Union
                Ref
                  Id "a"
                Pipe "|"
                Str
                  SingleQuote "'"
                  StrVal "b"
                  SingleQuote "'"
              ParenClose ")"
            Plus "+"
          BraceOpen "{"
          Number "1"
          Comma ","
          Number "2"
          BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn exact_repetition() {
    shot_cst!(r#"
        x = a?{3};
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Repeat
          Closure
            Ref
              Id "a"
            Question "?"
          BraceOpen "{"
          Number "3"
          BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn output_binds_tighter_than_concat() {
    shot_cst!(r#"
        x = a 'b':'c';
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Concat
          Ref
            Id "a"
          Output
            Str
              SingleQuote "'"
              StrVal "b"
              SingleQuote "'"
            Colon ":"
            Str
              SingleQuote "'"
              StrVal "c"
              SingleQuote "'"
        Semicolon ";"
    "#);
}

#[test]
fn weight_on_output_side() {
    shot_cst!(r#"
        x = a:'b' <0.5>;
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Output
          Ref
            Id "a"
          Colon ":"
          Weight
            Str
              SingleQuote "'"
              StrVal "b"
              SingleQuote "'"
            AngleOpen "<"
            Number "0.5"
            AngleClose ">"
        Semicolon ";"
    "#);
}

#[test]
fn statements() {
    shot_cst!(r#"
        import 'lib.grm' as lib;
        export y = lib.kDigit;
        func F[a, b] {
          return a b;
        }
        z = F['x', y];
    "#, @r#"
    Root
      Import
        KwImport "import"
        Str
          SingleQuote "'"
          StrVal "lib.grm"
          SingleQuote "'"
        KwAs "as"
        Id "lib"
        Semicolon ";"
      VarDef
        KwExport "export"
        Id "y"
        Equals "="
        Ref
          Id "lib.kDigit"
        Semicolon ";"
      FuncDef
        KwFunc "func"
        Id "F"
        Params
          BracketOpen "["
          Id "a"
          Comma ","
          Id "b"
          BracketClose "]"
        BraceOpen "{"
        Return
          KwReturn "return"
          Concat
            Ref
              Id "a"
            Ref
              Id "b"
          Semicolon ";"
        BraceClose "}"
      VarDef
        Id "z"
        Equals "="
        Call
          Id "F"
          Args
            BracketOpen "["
            Str
              SingleQuote "'"
              StrVal "x"
              SingleQuote "'"
            Comma ","
            Ref
              Id "y"
            BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn comments_are_skipped_in_dump() {
    shot_cst!(r#"
        # header
        x = a; # trailing
    "#, @r#"
    Root
      VarDef
        Id "x"
        Equals "="
        Ref
          Id "a"
        Semicolon ";"
    "#);
}

#[test]
fn trivia_is_kept_in_tree() {
    let compilation = Compilation::expect_valid("x = a; # c");
    insta::assert_snapshot!(compilation.dump_cst_full(), @r##"
    Root
      VarDef
        Id "x"
        Whitespace " "
        Equals "="
        Whitespace " "
        Ref
          Id "a"
        Semicolon ";"
      Whitespace " "
      LineComment "# c"
    "##);
}

#[test]
fn tree_is_lossless() {
    let source = "export x = ( a|'b' ) {1, 2} ;  # done\n";
    let compilation = Compilation::expect_valid(source);
    assert_eq!(compilation.as_cst().text().to_string(), source);
}

#[test]
fn spans_in_dump() {
    let compilation = Compilation::expect_valid("x = a;");
    insta::assert_snapshot!(compilation.printer().with_spans(true).dump(), @r#"
    Root [0..6]
      VarDef [0..6]
        Id [0..1] "x"
        Equals [2..3] "="
        Ref [4..5]
          Id [4..5] "a"
        Semicolon [5..6] ";"
    "#);
}
