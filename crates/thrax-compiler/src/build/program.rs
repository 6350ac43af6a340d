use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use thrax_core::Alphabet;

use crate::emit::{UsageCounts, write_program};
use crate::re::Re;

/// Built variable table, in definition order.
#[derive(Clone)]
pub struct Program {
    vars: IndexMap<String, Rc<Re>>,
    alphabet: Rc<dyn Alphabet>,
}

impl Program {
    pub fn new(vars: IndexMap<String, Rc<Re>>, alphabet: Rc<dyn Alphabet>) -> Self {
        Self { vars, alphabet }
    }

    pub fn vars(&self) -> &IndexMap<String, Rc<Re>> {
        &self.vars
    }

    pub fn get(&self, name: &str) -> Option<&Re> {
        self.vars.get(name).map(Rc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Re)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn alphabet(&self) -> &dyn Alphabet {
        self.alphabet.as_ref()
    }

    pub(crate) fn shared_alphabet(&self) -> Rc<dyn Alphabet> {
        self.alphabet.clone()
    }

    /// How often each variable is referenced across all definitions.
    pub fn usages(&self) -> UsageCounts {
        UsageCounts::count(&self.vars)
    }

    /// Canonical text, one `name = expr` line per definition.
    pub fn to_solomonoff(&self) -> String {
        let mut out = String::new();
        write_program(&mut out, &self.vars, self.alphabet.as_ref())
            .expect("String write never fails");
        out
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("vars", &self.vars)
            .finish_non_exhaustive()
    }
}

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.vars.serialize(serializer)
    }
}
