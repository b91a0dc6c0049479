use crate::object::*;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::io::Write;

pub type BuiltinFn = fn(&mut dyn Write, Vec<Object>) -> Result<Option<Object>>;

/// Read-only table of host functions, consulted when a name is not bound
/// in the current environment.
pub type Builtins = HashMap<&'static str, Builtin>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    func: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        Self { name, func }
    }

    pub fn call(&self, out: &mut dyn Write, args: Vec<Object>) -> Result<Option<Object>> {
        (self.func)(out, args)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "builtin {}", self.name)
    }
}

fn println(out: &mut dyn Write, args: Vec<Object>) -> Result<Option<Object>> {
    let line: Vec<String> = args.iter().map(Object::to_string).collect();
    writeln!(out, "{}", line.join(" "))?;
    Ok(None)
}

lazy_static! {
    pub static ref BUILTINS: Builtins = vec![Builtin::new("println", println)]
        .into_iter()
        .map(|builtin| (builtin.name, builtin))
        .collect();
}
