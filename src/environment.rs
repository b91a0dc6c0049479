use crate::object::{EvalError, Object, Result};
use std::collections::HashMap;

/// Bindings of a single call frame. The top level gets one for the whole
/// run; each user function call gets a fresh one holding its parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<String, Object>,
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, name: &str) -> Option<&Object> {
        self.store.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Binds a new name. Names already bound in this frame cannot be
    /// declared again.
    pub fn declare(&mut self, name: &str, val: Object) -> Result<()> {
        if self.contains(name) {
            return Err(EvalError::RedeclaredVariable {
                name: name.to_owned(),
            });
        }
        self.store.insert(name.to_owned(), val);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
