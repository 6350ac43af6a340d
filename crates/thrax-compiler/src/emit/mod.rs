//! Canonical textual output.
//!
//! Two passes over the variable table. The first counts references per
//! name ([`UsageCounts`]). The second prints `name = expr` lines and consumes
//! a private copy of those counts: every reference except the last one to a
//! given name is prefixed with the sharing marker `!!`.

mod printer;


use std::fmt::{self, Write};
use std::rc::Rc;

use indexmap::IndexMap;
use thrax_core::Alphabet;

use crate::re::Re;

pub use printer::SerializationContext;

/// Sharing marker placed before a reference that is used again later.
pub const SHARED_MARKER: &str = "!!";

/// Reference count per variable name, in first-reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageCounts(IndexMap<String, usize>);

impl UsageCounts {
    pub fn count(vars: &IndexMap<String, Rc<Re>>) -> Self {
        let mut counts = IndexMap::new();
        for re in vars.values() {
            re.count_usages(&mut counts);
        }
        Self(counts)
    }

    pub fn get(&self, name: &str) -> usize {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_map(&self) -> &IndexMap<String, usize> {
        &self.0
    }
}

/// Writes every definition in table order.
pub fn write_program(
    w: &mut impl Write,
    vars: &IndexMap<String, Rc<Re>>,
    alphabet: &dyn Alphabet,
) -> fmt::Result {
    let counts = UsageCounts::count(vars);
    let mut ctx = SerializationContext::new(alphabet, &counts);
    for (name, re) in vars {
        ctx.write_definition(w, name, re)?;
    }
    Ok(())
}
