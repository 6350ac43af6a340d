//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors. Missing
//! pieces of a broken tree show up as `None`.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

/// N-ary operator nodes: `a | b | c` is one `Union` with three operands.
macro_rules! chain_node {
    ($($name:ident => $op:ident),* $(,)?) => {
        $(
            impl $name {
                pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
                    self.0.children().filter_map(Expr::cast)
                }

                pub fn operators(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
                    tokens(&self.0, SyntaxKind::$op)
                }
            }
        )*
    };
}

ast_node!(Root, Root);
ast_node!(VarDef, VarDef);
ast_node!(Import, Import);
ast_node!(FuncDef, FuncDef);
ast_node!(Params, Params);
ast_node!(Return, Return);
ast_node!(Compose, Compose);
ast_node!(Union, Union);
ast_node!(Diff, Diff);
ast_node!(Concat, Concat);
ast_node!(Output, Output);
ast_node!(Weight, Weight);
ast_node!(Repeat, Repeat);
ast_node!(Closure, Closure);
ast_node!(Ref, Ref);
ast_node!(Str, Str);
ast_node!(Nested, Nested);
ast_node!(Call, Call);
ast_node!(Args, Args);

chain_node!(Compose => At, Union => Pipe, Diff => Minus);

impl Concat {
    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl Output {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

fn tokens(node: &SyntaxNode, kind: SyntaxKind) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(move |t| t.kind() == kind)
}

/// Top-level or function-body statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    VarDef(VarDef),
    Import(Import),
    FuncDef(FuncDef),
    Return(Return),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::VarDef => VarDef::cast(node).map(Stmt::VarDef),
            SyntaxKind::Import => Import::cast(node).map(Stmt::Import),
            SyntaxKind::FuncDef => FuncDef::cast(node).map(Stmt::FuncDef),
            SyntaxKind::Return => Return::cast(node).map(Stmt::Return),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Stmt::VarDef(n) => n.as_cst(),
            Stmt::Import(n) => n.as_cst(),
            Stmt::FuncDef(n) => n.as_cst(),
            Stmt::Return(n) => n.as_cst(),
        }
    }
}

/// Any expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Compose(Compose),
    Union(Union),
    Diff(Diff),
    Concat(Concat),
    Output(Output),
    Weight(Weight),
    Repeat(Repeat),
    Closure(Closure),
    Ref(Ref),
    Str(Str),
    Nested(Nested),
    Call(Call),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Compose => Compose::cast(node).map(Expr::Compose),
            SyntaxKind::Union => Union::cast(node).map(Expr::Union),
            SyntaxKind::Diff => Diff::cast(node).map(Expr::Diff),
            SyntaxKind::Concat => Concat::cast(node).map(Expr::Concat),
            SyntaxKind::Output => Output::cast(node).map(Expr::Output),
            SyntaxKind::Weight => Weight::cast(node).map(Expr::Weight),
            SyntaxKind::Repeat => Repeat::cast(node).map(Expr::Repeat),
            SyntaxKind::Closure => Closure::cast(node).map(Expr::Closure),
            SyntaxKind::Ref => Ref::cast(node).map(Expr::Ref),
            SyntaxKind::Str => Str::cast(node).map(Expr::Str),
            SyntaxKind::Nested => Nested::cast(node).map(Expr::Nested),
            SyntaxKind::Call => Call::cast(node).map(Expr::Call),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Compose(n) => n.as_cst(),
            Expr::Union(n) => n.as_cst(),
            Expr::Diff(n) => n.as_cst(),
            Expr::Concat(n) => n.as_cst(),
            Expr::Output(n) => n.as_cst(),
            Expr::Weight(n) => n.as_cst(),
            Expr::Repeat(n) => n.as_cst(),
            Expr::Closure(n) => n.as_cst(),
            Expr::Ref(n) => n.as_cst(),
            Expr::Str(n) => n.as_cst(),
            Expr::Nested(n) => n.as_cst(),
            Expr::Call(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }

    /// Operands of an n-ary operator node (`@ | -` and juxtaposition), in
    /// source order. `None` for every other kind.
    pub fn chain_operands(&self) -> Option<Vec<Expr>> {
        match self {
            Expr::Compose(n) => Some(n.operands().collect()),
            Expr::Union(n) => Some(n.operands().collect()),
            Expr::Diff(n) => Some(n.operands().collect()),
            Expr::Concat(n) => Some(n.operands().collect()),
            _ => None,
        }
    }

    /// An operator of a chain has nothing after it, as in `a | ;`.
    pub fn has_missing_operand(&self) -> bool {
        let (operands, operators) = match self {
            Expr::Compose(n) => (n.operands().count(), n.operators().count()),
            Expr::Union(n) => (n.operands().count(), n.operators().count()),
            Expr::Diff(n) => (n.operands().count(), n.operators().count()),
            _ => return false,
        };
        operands <= operators
    }
}

impl Root {
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }

    pub fn var_defs(&self) -> impl Iterator<Item = VarDef> + '_ {
        self.0.children().filter_map(VarDef::cast)
    }
}

impl VarDef {
    pub fn is_exported(&self) -> bool {
        token(&self.0, SyntaxKind::KwExport).is_some()
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Import {
    pub fn path(&self) -> Option<Str> {
        self.0.children().find_map(Str::cast)
    }

    pub fn alias(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl FuncDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn params(&self) -> Option<Params> {
        self.0.children().find_map(Params::cast)
    }

    pub fn body(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl Params {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0, SyntaxKind::Id)
    }
}

impl Return {
    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Weight {
    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn value(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Number)
    }
}

impl Repeat {
    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// `n` in `{n}`, `from` in `{from,to}`.
    pub fn lower(&self) -> Option<SyntaxToken> {
        self.bound(0)
    }

    /// `to` in `{from,to}`; `None` for `{n}`.
    pub fn upper(&self) -> Option<SyntaxToken> {
        if self.is_range() { self.bound(1) } else { None }
    }

    pub fn is_range(&self) -> bool {
        token(&self.0, SyntaxKind::Comma).is_some()
    }

    fn bound(&self, nth: usize) -> Option<SyntaxToken> {
        tokens(&self.0, SyntaxKind::Number).nth(nth)
    }
}

impl Closure {
    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// `*`, `+` or `?`.
    pub fn marker(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question
                )
            })
    }
}

impl Ref {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl Str {
    /// Raw content between the quotes, escapes unresolved.
    pub fn value(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::StrVal)
    }

    pub fn raw_text(&self) -> String {
        self.value().map(|t| t.text().to_string()).unwrap_or_default()
    }
}

impl Nested {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Call {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .find_map(Args::cast)
            .into_iter()
            .flat_map(|args| args.0.children().filter_map(Expr::cast).collect::<Vec<_>>())
    }
}
