use std::fmt;

use serde::{Deserialize, Serialize};

/// A logic term: variable, integer, or compound (an atom is a compound with
/// no arguments).
///
/// The `Display` form has no whitespace (`aHead(0,1)`), which is what
/// compiled circuits use to name their nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Var(String),
    Int(i64),
    Compound { functor: String, args: Vec<Term> },
}

impl Term {
    /// An atom with no arguments.
    pub fn atom(functor: impl Into<String>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args: Vec::new(),
        }
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn functor(&self) -> Option<&str> {
        match self {
            Term::Compound { functor, .. } => Some(functor),
            _ => None,
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound { args, .. } => args,
            _ => &[],
        }
    }

    pub fn arity(&self) -> usize {
        self.args().len()
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Int(_) => true,
            Term::Compound { args, .. } => args.iter().all(Term::is_ground),
        }
    }

    /// Collect variable names in first-occurrence order.
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Term::Var(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Term::Int(_) => {}
            Term::Compound { args, .. } => args.iter().for_each(|a| a.collect_variables(out)),
        }
    }

    /// Return a copy with the argument at `index` replaced. Out-of-range
    /// indices and non-compound terms are returned unchanged.
    pub fn with_arg(&self, index: usize, value: Term) -> Term {
        match self {
            Term::Compound { functor, args } if index < args.len() => {
                let mut args = args.clone();
                args[index] = value;
                Term::Compound {
                    functor: functor.clone(),
                    args,
                }
            }
            other => other.clone(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(name) => f.write_str(name),
            Term::Int(v) => write!(f, "{v}"),
            Term::Compound { functor, args } => {
                f.write_str(functor)?;
                if !args.is_empty() {
                    f.write_str("(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}
