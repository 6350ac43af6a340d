//! Expression builder: typed AST to a table of `Re` values.
//!
//! Every definition is evaluated bottom-up. Literal and class leaves fold
//! eagerly (`"ab" "cd"` becomes one literal, `['a'-'c'] | 'x'` one class);
//! everything else becomes a generic node. Constructs the downstream pipeline
//! cannot handle are replaced by sentinel variables and reported as
//! warnings, so the program always builds.

mod invariants;
mod program;

#[cfg(test)]
mod build_tests;

use std::rc::Rc;

use indexmap::IndexMap;
use rowan::{TextRange, TextSize};
use thrax_core::{Alphabet, IntSeq, Ranges};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::{self, Expr, Root, Stmt};
use crate::parser::{SyntaxKind, SyntaxToken};
use crate::re::{
    FUNCTION_NOT_SUPPORTED, NONDETERMINISM_ERROR, Quantifier, Re, WEIGHT_NOT_SUPPORTED,
    parse_literal,
};

pub use program::Program;

use invariants::{assert_def_open, assert_no_open_def};

pub struct ExprBuilder<'a> {
    alphabet: &'a dyn Alphabet,
    diag: &'a mut Diagnostics,
    vars: IndexMap<String, Rc<Re>>,
    /// Name of the definition being evaluated.
    current_def: Option<String>,
    /// Next synthetic-variable suffix; reset per definition.
    synthetic: usize,
}

impl<'a> ExprBuilder<'a> {
    pub fn new(alphabet: &'a dyn Alphabet, diag: &'a mut Diagnostics) -> Self {
        Self {
            alphabet,
            diag,
            vars: IndexMap::new(),
            current_def: None,
            synthetic: 0,
        }
    }

    pub fn build(mut self, root: &Root) -> IndexMap<String, Rc<Re>> {
        for stmt in root.stmts() {
            self.visit_stmt(&stmt);
        }
        self.vars
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDef(def) => self.visit_var_def(def),
            Stmt::Import(import) => {
                let path = import.path().map(|p| p.raw_text()).unwrap_or_default();
                self.diag
                    .report(DiagnosticKind::ImportNotSupported, import.text_range())
                    .message(format!("`{path}` is not loaded"))
                    .emit();
            }
            Stmt::FuncDef(func) => {
                let name = func.name().map(|t| t.text().to_string()).unwrap_or_default();
                self.diag
                    .report(DiagnosticKind::FunctionNotSupported, func.text_range())
                    .message(format!("body of `{name}` is not evaluated"))
                    .emit();
            }
            Stmt::Return(ret) => {
                self.diag
                    .report(DiagnosticKind::FunctionNotSupported, ret.text_range())
                    .message("`return` outside a function body")
                    .emit();
            }
        }
    }

    fn visit_var_def(&mut self, def: &ast::VarDef) {
        let Some(name) = def.name() else {
            return;
        };
        let name = name.text().to_string();

        self.begin_def(&name);
        let value = def.body().and_then(|body| self.build_expr(&body));
        self.end_def(&name, value);
    }

    fn begin_def(&mut self, name: &str) {
        assert_no_open_def(self.current_def.as_deref(), name);
        self.current_def = Some(name.to_string());
        self.synthetic = 0;
    }

    /// Binds the value unless the body was incomplete. Rebinding a name keeps
    /// its original position.
    fn end_def(&mut self, name: &str, value: Option<Rc<Re>>) {
        assert_def_open(self.current_def.as_deref(), name);
        self.current_def = None;
        if let Some(value) = value {
            self.vars.insert(name.to_string(), value);
        }
    }

    fn build_expr(&mut self, expr: &Expr) -> Option<Rc<Re>> {
        match expr {
            Expr::Compose(_) | Expr::Union(_) | Expr::Diff(_) | Expr::Concat(_) => {
                self.build_chain(expr)
            }
            Expr::Output(n) => self.build_output(n),
            Expr::Weight(n) => Some(self.build_weight(n)),
            Expr::Repeat(n) => self.build_repeat(n),
            Expr::Closure(n) => self.build_closure(n),
            Expr::Ref(n) => self.build_ref(n),
            Expr::Str(n) => self.build_str(n),
            Expr::Nested(n) => self.build_expr(&n.inner()?),
            Expr::Call(n) => Some(self.build_call(n)),
        }
    }

    /// All operators of one chain share a node, so `a b c ...` folds left
    /// in one pass however long it is. Every operand is evaluated even when
    /// the chain is incomplete.
    fn build_chain(&mut self, expr: &Expr) -> Option<Rc<Re>> {
        let kind = expr.as_cst().kind();
        let operands = expr.chain_operands()?;
        let values: Vec<_> = operands.iter().map(|e| self.build_expr(e)).collect();
        if expr.has_missing_operand() {
            return None;
        }
        let values = values.into_iter().collect::<Option<Vec<_>>>()?;

        if kind == SyntaxKind::Concat {
            let mut folder = ConcatFolder::default();
            for value in values {
                folder.push(value);
            }
            return folder.finish();
        }
        values
            .into_iter()
            .reduce(|lhs, rhs| self.combine(kind, lhs, rhs))
    }

    fn combine(&self, kind: SyntaxKind, lhs: Rc<Re>, rhs: Rc<Re>) -> Rc<Re> {
        match kind {
            SyntaxKind::Union => match self.set_pair(&lhs, &rhs) {
                Some((l, r)) => Rc::new(Re::Set {
                    ranges: l.union(&r, self.alphabet),
                }),
                None => Rc::new(Re::union(lhs, rhs)),
            },
            SyntaxKind::Diff => match self.set_pair(&lhs, &rhs) {
                Some((l, r)) => Rc::new(Re::Set {
                    ranges: l.difference(&r, self.alphabet),
                }),
                None => Rc::new(Re::diff(lhs, rhs)),
            },
            _ => Rc::new(Re::compose(lhs, rhs)),
        }
    }

    fn set_pair(&self, lhs: &Re, rhs: &Re) -> Option<(Ranges, Ranges)> {
        Some((lhs.as_set(self.alphabet)?, rhs.as_set(self.alphabet)?))
    }

    fn build_output(&mut self, node: &ast::Output) -> Option<Rc<Re>> {
        let input = node.lhs().and_then(|e| self.build_expr(&e));
        let rhs_expr = node.rhs()?;
        let output = self.build_expr(&rhs_expr)?;
        let input = input?;

        if let Some(output) = output.as_str() {
            return Some(Rc::new(Re::Output { input, output }));
        }

        self.diag
            .report(DiagnosticKind::OutputNotLiteral, rhs_expr.text_range())
            .message(format!("replaced by `{NONDETERMINISM_ERROR}`"))
            .emit();
        Some(Rc::new(Re::var(NONDETERMINISM_ERROR)))
    }

    /// The weighted operand is dropped unevaluated.
    fn build_weight(&mut self, node: &ast::Weight) -> Rc<Re> {
        let weight = node.value().map(|t| t.text().to_string()).unwrap_or_default();
        self.diag
            .report(DiagnosticKind::WeightNotSupported, node.text_range())
            .message(format!("`<{weight}>` replaced by `{WEIGHT_NOT_SUPPORTED}`"))
            .emit();
        Rc::new(Re::var(WEIGHT_NOT_SUPPORTED))
    }

    /// `x{from,to}`: `from` copies of `x`, then `to - from` optional copies.
    fn build_repeat(&mut self, node: &ast::Repeat) -> Option<Rc<Re>> {
        let from = bound(node.lower())?;
        let to = if node.is_range() {
            bound(node.upper())?
        } else {
            from
        };

        if to == 0 || from > to {
            return Some(Rc::new(Re::epsilon()));
        }

        let operand = self.build_expr(&node.operand()?)?;
        let unit = if operand.is_str_like() {
            operand
        } else {
            self.hoist(operand)?
        };

        let mut folder = ConcatFolder::default();
        for _ in 0..from {
            folder.push(unit.clone());
        }
        for _ in from..to {
            folder.push(Rc::new(Re::kleene(unit.clone(), Quantifier::ZeroOrOne)));
        }
        folder.finish()
    }

    /// Binds `value` to a fresh `__<def>__<k>` variable and returns a
    /// reference to it.
    fn hoist(&mut self, value: Rc<Re>) -> Option<Rc<Re>> {
        let def = self.current_def.as_deref()?;
        let name = format!("__{def}__{}", self.synthetic);
        self.synthetic += 1;
        self.vars.insert(name.clone(), value);
        Some(Rc::new(Re::var(name)))
    }

    fn build_closure(&mut self, node: &ast::Closure) -> Option<Rc<Re>> {
        let operand = self.build_expr(&node.operand()?)?;
        match node
            .marker()
            .and_then(|t| Quantifier::from_marker(t.text()))
        {
            Some(quantifier) => Some(Rc::new(Re::kleene(operand, quantifier))),
            None => Some(operand),
        }
    }

    /// Leaves are inlined by value; anything else is referenced by name.
    fn build_ref(&mut self, node: &ast::Ref) -> Option<Rc<Re>> {
        let name = node.name()?;
        let name = name.text();

        match self.vars.get(name) {
            Some(value) if value.is_set_like() || value.is_str_like() => Some(value.clone()),
            Some(_) => Some(Rc::new(Re::var(name))),
            None => {
                self.diag
                    .report(DiagnosticKind::UndefinedReference, node.text_range())
                    .message(name)
                    .emit();
                Some(Rc::new(Re::var(name)))
            }
        }
    }

    fn build_str(&mut self, node: &ast::Str) -> Option<Rc<Re>> {
        let Some(value) = node.value() else {
            return Some(Rc::new(Re::epsilon()));
        };

        match parse_literal(value.text()) {
            Ok(seq) => Some(Rc::new(Re::literal(seq))),
            Err(err) => {
                let start = value.text_range().start();
                let range = TextRange::new(
                    start + TextSize::from(err.span.start as u32),
                    start + TextSize::from(err.span.end as u32),
                );
                self.diag
                    .report(DiagnosticKind::InvalidNumericEscape, range)
                    .message(err.to_string())
                    .emit();
                None
            }
        }
    }

    /// Arguments are not evaluated.
    fn build_call(&mut self, node: &ast::Call) -> Rc<Re> {
        let name = node.name().map(|t| t.text().to_string()).unwrap_or_default();
        self.diag
            .report(DiagnosticKind::FunctionNotSupported, node.text_range())
            .message(format!("call to `{name}` replaced by `{FUNCTION_NOT_SUPPORTED}`"))
            .emit();
        Rc::new(Re::var(FUNCTION_NOT_SUPPORTED))
    }
}

/// Left fold of a juxtaposition. Two operands fold only when both are
/// literals, so only the leading run of literals folds; it is joined into
/// one buffer when the run ends.
#[derive(Default)]
struct ConcatFolder {
    acc: Option<Rc<Re>>,
    leading: Vec<Rc<Re>>,
}

impl ConcatFolder {
    fn push(&mut self, value: Rc<Re>) {
        if self.acc.is_none() && value.is_str_like() {
            self.leading.push(value);
            return;
        }
        self.flush();
        self.append(value);
    }

    fn finish(mut self) -> Option<Rc<Re>> {
        self.flush();
        self.acc
    }

    fn flush(&mut self) {
        if self.leading.len() < 2 {
            if let Some(single) = self.leading.pop() {
                self.append(single);
            }
            return;
        }
        let seqs: Vec<IntSeq> = self.leading.drain(..).filter_map(|re| re.as_str()).collect();
        let mut codepoints = Vec::with_capacity(seqs.iter().map(IntSeq::len).sum());
        for seq in &seqs {
            codepoints.extend_from_slice(seq.as_slice());
        }
        self.append(Rc::new(Re::literal(IntSeq::from(codepoints))));
    }

    fn append(&mut self, value: Rc<Re>) {
        self.acc = Some(match self.acc.take() {
            Some(acc) => Rc::new(Re::concat(acc, value)),
            None => value,
        });
    }
}

/// Bounds that do not fit `u32` were already reported by the parser.
fn bound(token: Option<SyntaxToken>) -> Option<u32> {
    token?.text().parse().ok()
}
