//! Relevant grounding of a parsed program.
//!
//! Derives the set of possibly-true ground atoms bottom-up (negation ignored),
//! instantiates rules against it, keeps only what the queries depend on, and
//! orders the result so every atom comes after the atoms it depends on.

pub mod matching;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chronolog_core::errors::{EngineError, EngineResult};
use chronolog_core::Term;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::program::{Clause, Literal, Program};
use matching::{join, match_ground, substitute, AtomIndex, Bindings};

/// An independent probabilistic choice: one declaration of `p::atom`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceVar {
    pub atom: Term,
    pub probability: f64,
}

/// Body literal referring to an earlier atom by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroundLiteral {
    pub atom: usize,
    pub positive: bool,
}

/// Definition of one relevant ground atom.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomDef {
    pub atom: Term,
    /// Declared as a certain fact.
    pub certain: bool,
    /// Choice variables declaring this atom.
    pub choices: Vec<usize>,
    /// Rule bodies; each references only atoms with a smaller index.
    pub bodies: Vec<Vec<GroundLiteral>>,
}

/// The relevant ground program, topologically ordered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroundProgram {
    pub choices: Vec<ChoiceVar>,
    pub atoms: Vec<AtomDef>,
    /// Query atoms with their index in `atoms`, or `None` when the atom can
    /// never be derived.
    pub queries: Vec<(Term, Option<usize>)>,
}

impl GroundProgram {
    /// Choice variable names (atom display text) → variable index.
    /// An atom declared more than once is named by its last declaration.
    pub fn named_choices(&self) -> BTreeMap<String, usize> {
        self.choices
            .iter()
            .enumerate()
            .map(|(i, c)| (c.atom.to_string(), i))
            .collect()
    }

    pub fn baseline_weights(&self) -> Vec<f64> {
        self.choices.iter().map(|c| c.probability).collect()
    }
}

/// Ground `program`, keeping only atoms relevant to its queries.
pub fn ground(program: &Program, atom_limit: usize) -> EngineResult<GroundProgram> {
    validate(program)?;

    let possible = derive_possible(program, atom_limit)?;
    let definitions = instantiate_rules(program, &possible);
    let query_atoms = resolve_queries(program, &possible);
    let relevant = collect_relevant(&query_atoms, &definitions, &possible);

    let order = dependency_order(&relevant, &definitions)?;
    let position: HashMap<&Term, usize> = order.iter().enumerate().map(|(i, t)| (*t, i)).collect();

    let mut choices = Vec::new();
    let mut choices_by_atom: HashMap<&Term, Vec<usize>> = HashMap::new();
    for (atom, probability) in program.probabilistic_facts() {
        if relevant.contains(atom) {
            choices_by_atom.entry(atom).or_default().push(choices.len());
            choices.push(ChoiceVar {
                atom: atom.clone(),
                probability,
            });
        }
    }

    let certain: HashSet<&Term> = program
        .clauses
        .iter()
        .filter_map(|c| match c {
            Clause::Fact {
                head,
                probability: None,
            } => Some(head),
            _ => None,
        })
        .collect();

    let atoms = order
        .iter()
        .map(|atom| AtomDef {
            atom: (*atom).clone(),
            certain: certain.contains(atom),
            choices: choices_by_atom.get(atom).cloned().unwrap_or_default(),
            bodies: definitions
                .get(*atom)
                .map(|bodies| {
                    bodies
                        .iter()
                        .map(|body| {
                            body.iter()
                                .map(|lit| GroundLiteral {
                                    atom: position[&lit.atom],
                                    positive: lit.positive,
                                })
                                .collect()
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    let queries = query_atoms
        .into_iter()
        .map(|q| {
            let index = position.get(&q).copied();
            (q, index)
        })
        .collect();

    debug!(
        possible = possible.len(),
        relevant = atoms.len(),
        choices = choices.len(),
        "grounding complete"
    );

    Ok(GroundProgram {
        choices,
        atoms,
        queries,
    })
}

/// Facts must be ground. Rule variables in the head or under negation must
/// be bound by a positive body literal.
fn validate(program: &Program) -> EngineResult<()> {
    for clause in &program.clauses {
        match clause {
            Clause::Fact { head, .. } => {
                if !head.is_ground() {
                    return Err(EngineError::NonGroundFact {
                        fact: clause.to_string(),
                    });
                }
            }
            Clause::Rule { head, body } => {
                let bound: HashSet<&str> = body
                    .iter()
                    .filter(|l| l.positive)
                    .flat_map(|l| l.atom.variables())
                    .collect();
                let needed = head
                    .variables()
                    .into_iter()
                    .chain(body.iter().filter(|l| !l.positive).flat_map(|l| l.atom.variables()));
                for variable in needed {
                    if !bound.contains(variable) {
                        return Err(EngineError::UnsafeVariable {
                            variable: variable.to_string(),
                            clause: clause.to_string(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

fn positives(body: &[Literal]) -> Vec<&Term> {
    body.iter().filter(|l| l.positive).map(|l| &l.atom).collect()
}

/// Least fixpoint of the program with every fact assumed true and negation
/// ignored: an over-approximation of what can ever hold.
fn derive_possible(program: &Program, atom_limit: usize) -> EngineResult<BTreeSet<Term>> {
    let mut possible: BTreeSet<Term> = program
        .clauses
        .iter()
        .filter(|c| matches!(c, Clause::Fact { .. }))
        .map(|c| c.head().clone())
        .collect();

    loop {
        let index = AtomIndex::build(&possible);
        let mut derived = Vec::new();
        for (head, body) in program.rules() {
            for bindings in join(&positives(body), &index) {
                let atom = substitute(head, &bindings);
                if !possible.contains(&atom) {
                    derived.push(atom);
                }
            }
        }
        if derived.is_empty() {
            return Ok(possible);
        }
        possible.extend(derived);
        if possible.len() > atom_limit {
            return Err(EngineError::GroundingLimitExceeded { limit: atom_limit });
        }
    }
}

/// Ground rule bodies per head. Negated atoms that can never hold are
/// trivially true and dropped.
fn instantiate_rules(
    program: &Program,
    possible: &BTreeSet<Term>,
) -> BTreeMap<Term, BTreeSet<Vec<Literal>>> {
    let index = AtomIndex::build(possible);
    let mut definitions: BTreeMap<Term, BTreeSet<Vec<Literal>>> = BTreeMap::new();
    for (head, body) in program.rules() {
        for bindings in join(&positives(body), &index) {
            let ground_body = ground_body(body, &bindings, possible);
            definitions
                .entry(substitute(head, &bindings))
                .or_default()
                .insert(ground_body);
        }
    }
    definitions
}

fn ground_body(body: &[Literal], bindings: &Bindings, possible: &BTreeSet<Term>) -> Vec<Literal> {
    body.iter()
        .map(|lit| Literal {
            atom: substitute(&lit.atom, bindings),
            positive: lit.positive,
        })
        .filter(|lit| lit.positive || possible.contains(&lit.atom))
        .collect()
}

/// Ground query atoms in declaration order, without duplicates. Non-ground
/// queries expand to every possible atom they match.
fn resolve_queries(program: &Program, possible: &BTreeSet<Term>) -> Vec<Term> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for query in &program.queries {
        if query.is_ground() {
            if seen.insert(query.clone()) {
                out.push(query.clone());
            }
            continue;
        }
        for atom in possible {
            if match_ground(query, atom, &Bindings::new()).is_some() && seen.insert(atom.clone()) {
                out.push(atom.clone());
            }
        }
    }
    out
}

fn collect_relevant(
    queries: &[Term],
    definitions: &BTreeMap<Term, BTreeSet<Vec<Literal>>>,
    possible: &BTreeSet<Term>,
) -> BTreeSet<Term> {
    let mut relevant = BTreeSet::new();
    let mut stack: Vec<&Term> = queries.iter().filter(|q| possible.contains(*q)).collect();
    while let Some(atom) = stack.pop() {
        if !relevant.insert(atom.clone()) {
            continue;
        }
        if let Some(bodies) = definitions.get(atom) {
            for lit in bodies.iter().flatten() {
                if !relevant.contains(&lit.atom) {
                    stack.push(&lit.atom);
                }
            }
        }
    }
    relevant
}

/// Relevant atoms ordered so dependencies come first.
fn dependency_order<'a>(
    relevant: &'a BTreeSet<Term>,
    definitions: &BTreeMap<Term, BTreeSet<Vec<Literal>>>,
) -> EngineResult<Vec<&'a Term>> {
    let mut graph: DiGraph<&Term, ()> = DiGraph::new();
    let nodes: HashMap<&Term, NodeIndex> = relevant.iter().map(|t| (t, graph.add_node(t))).collect();

    for atom in relevant {
        if let Some(bodies) = definitions.get(atom) {
            for lit in bodies.iter().flatten() {
                if let Some(&dep) = nodes.get(&lit.atom) {
                    graph.update_edge(dep, nodes[atom], ());
                }
            }
        }
    }

    let sorted = toposort(&graph, None).map_err(|cycle| EngineError::CyclicProgram {
        atom: graph[cycle.node_id()].to_string(),
    })?;
    Ok(sorted.into_iter().map(|n| graph[n]).collect())
}
