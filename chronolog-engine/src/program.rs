//! Parsed program representation.

use std::fmt;

use chronolog_core::Term;

/// A body literal: an atom, possibly negated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub atom: Term,
    pub positive: bool,
}

impl Literal {
    pub fn positive(atom: Term) -> Self {
        Self {
            atom,
            positive: true,
        }
    }

    pub fn negative(atom: Term) -> Self {
        Self {
            atom,
            positive: false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "\\+{}", self.atom)
        }
    }
}

/// A top-level statement. Disjunctive bodies are split into one `Rule` per
/// conjunction while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `head.` when `probability` is `None`, `p::head.` otherwise.
    Fact {
        head: Term,
        probability: Option<f64>,
    },
    Rule {
        head: Term,
        body: Vec<Literal>,
    },
}

impl Clause {
    pub fn head(&self) -> &Term {
        match self {
            Clause::Fact { head, .. } | Clause::Rule { head, .. } => head,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Fact {
                head,
                probability: Some(p),
            } => write!(f, "{p}::{head}."),
            Clause::Fact {
                head,
                probability: None,
            } => write!(f, "{head}."),
            Clause::Rule { head, body } => {
                write!(f, "{head} :- ")?;
                for (i, lit) in body.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{lit}")?;
                }
                f.write_str(".")
            }
        }
    }
}

/// A parsed program: clauses and queries in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub clauses: Vec<Clause>,
    pub queries: Vec<Term>,
}

impl Program {
    /// Probabilistic facts in declaration order.
    pub fn probabilistic_facts(&self) -> impl Iterator<Item = (&Term, f64)> {
        self.clauses.iter().filter_map(|c| match c {
            Clause::Fact {
                head,
                probability: Some(p),
            } => Some((head, *p)),
            _ => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = (&Term, &[Literal])> {
        self.clauses.iter().filter_map(|c| match c {
            Clause::Rule { head, body } => Some((head, body.as_slice())),
            _ => None,
        })
    }
}
