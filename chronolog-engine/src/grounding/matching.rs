//! One-sided matching of non-ground patterns against ground atoms.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chronolog_core::Term;

/// Variable name → bound ground term.
pub type Bindings = BTreeMap<String, Term>;

/// Apply `bindings` to `term`. Unbound variables are left in place.
pub fn substitute(term: &Term, bindings: &Bindings) -> Term {
    match term {
        Term::Var(name) => bindings.get(name).cloned().unwrap_or_else(|| term.clone()),
        Term::Int(_) => term.clone(),
        Term::Compound { functor, args } => Term::Compound {
            functor: functor.clone(),
            args: args.iter().map(|a| substitute(a, bindings)).collect(),
        },
    }
}

/// Match `pattern` against a ground term, extending `bindings`.
/// Returns `None` when they do not match.
pub fn match_ground(pattern: &Term, ground: &Term, bindings: &Bindings) -> Option<Bindings> {
    let mut out = bindings.clone();
    if match_into(pattern, ground, &mut out) {
        Some(out)
    } else {
        None
    }
}

fn match_into(pattern: &Term, ground: &Term, bindings: &mut Bindings) -> bool {
    match (pattern, ground) {
        (Term::Var(name), _) => match bindings.get(name) {
            Some(bound) => bound == ground,
            None => {
                bindings.insert(name.clone(), ground.clone());
                true
            }
        },
        (Term::Int(a), Term::Int(b)) => a == b,
        (
            Term::Compound { functor: f1, args: a1 },
            Term::Compound { functor: f2, args: a2 },
        ) => {
            f1 == f2
                && a1.len() == a2.len()
                && a1.iter().zip(a2).all(|(p, g)| match_into(p, g, bindings))
        }
        _ => false,
    }
}

/// Ground atoms grouped by functor and arity.
#[derive(Debug, Default)]
pub struct AtomIndex {
    by_signature: HashMap<(String, usize), Vec<Term>>,
}

impl AtomIndex {
    pub fn build(atoms: &BTreeSet<Term>) -> Self {
        let mut by_signature: HashMap<(String, usize), Vec<Term>> = HashMap::new();
        for atom in atoms {
            if let Some(functor) = atom.functor() {
                by_signature
                    .entry((functor.to_string(), atom.arity()))
                    .or_default()
                    .push(atom.clone());
            }
        }
        Self { by_signature }
    }

    pub fn candidates(&self, pattern: &Term) -> &[Term] {
        pattern
            .functor()
            .and_then(|f| self.by_signature.get(&(f.to_string(), pattern.arity())))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Every binding that satisfies all `positives` against the index,
/// left to right.
pub fn join(positives: &[&Term], index: &AtomIndex) -> Vec<Bindings> {
    let mut frontier = vec![Bindings::new()];
    for pattern in positives {
        let mut next = Vec::new();
        for bindings in &frontier {
            let bound = substitute(pattern, bindings);
            for atom in index.candidates(&bound) {
                if let Some(extended) = match_ground(&bound, atom, bindings) {
                    next.push(extended);
                }
            }
        }
        if next.is_empty() {
            return next;
        }
        frontier = next;
    }
    frontier
}
