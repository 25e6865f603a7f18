use chronolog_core::errors::{EngineError, EngineResult};
use chronolog_core::Term;
use pest::iterators::Pair;

use super::Rule;
use crate::program::{Clause, Literal, Program};

/// Disjunctive normal form of a rule body: alternatives of conjunctions.
type Dnf = Vec<Vec<Literal>>;

#[derive(Default)]
struct Builder {
    program: Program,
    anonymous: usize,
}

pub(super) fn build_program(pair: Pair<Rule>) -> EngineResult<Program> {
    let mut builder = Builder::default();
    for statement in pair.into_inner() {
        match statement.as_rule() {
            Rule::query => {
                let term = builder.first_term(statement)?;
                builder.program.queries.push(term);
            }
            Rule::prob_fact => builder.prob_fact(statement)?,
            Rule::rule => builder.rule(statement)?,
            Rule::fact => {
                let head = builder.head(statement)?;
                builder.program.clauses.push(Clause::Fact {
                    head,
                    probability: None,
                });
            }
            Rule::EOI => {}
            other => return Err(unexpected(&statement, other)),
        }
    }
    Ok(builder.program)
}

impl Builder {
    fn prob_fact(&mut self, pair: Pair<Rule>) -> EngineResult<()> {
        let mut inner = pair.into_inner();
        let prob_pair = inner.next().ok_or_else(|| missing("probability"))?;
        let term_pair = inner.next().ok_or_else(|| missing("fact"))?;
        let head = self.head_term(term_pair)?;

        let text = prob_pair.as_str();
        let probability = text
            .parse::<f64>()
            .ok()
            .filter(|p| (0.0..=1.0).contains(p))
            .ok_or_else(|| EngineError::InvalidProbability {
                value: text.to_string(),
                fact: head.to_string(),
            })?;

        self.program.clauses.push(Clause::Fact {
            head,
            probability: Some(probability),
        });
        Ok(())
    }

    fn rule(&mut self, pair: Pair<Rule>) -> EngineResult<()> {
        let mut inner = pair.into_inner();
        let head_pair = inner.next().ok_or_else(|| missing("rule head"))?;
        let body_pair = inner.next().ok_or_else(|| missing("rule body"))?;
        let head = self.head_term(head_pair)?;
        for body in self.disjunction(body_pair)? {
            self.program.clauses.push(Clause::Rule {
                head: head.clone(),
                body,
            });
        }
        Ok(())
    }

    fn head(&mut self, pair: Pair<Rule>) -> EngineResult<Term> {
        let term_pair = pair.into_inner().next().ok_or_else(|| missing("term"))?;
        self.head_term(term_pair)
    }

    fn head_term(&mut self, pair: Pair<Rule>) -> EngineResult<Term> {
        let (line, column) = pair.line_col();
        let term = self.term(pair)?;
        if term.functor().is_none() {
            return Err(EngineError::Parse {
                line,
                column,
                message: format!("clause head must be an atom, found {term}"),
            });
        }
        Ok(term)
    }

    fn first_term(&mut self, pair: Pair<Rule>) -> EngineResult<Term> {
        let term_pair = pair.into_inner().next().ok_or_else(|| missing("term"))?;
        self.term(term_pair)
    }

    fn disjunction(&mut self, pair: Pair<Rule>) -> EngineResult<Dnf> {
        let mut alternatives = Vec::new();
        for conjunction in pair.into_inner() {
            alternatives.extend(self.conjunction(conjunction)?);
        }
        Ok(alternatives)
    }

    /// Cross product of the alternatives of each conjunct.
    fn conjunction(&mut self, pair: Pair<Rule>) -> EngineResult<Dnf> {
        let mut acc: Dnf = vec![Vec::new()];
        for item in pair.into_inner() {
            let options = match item.as_rule() {
                Rule::term => vec![vec![Literal::positive(self.term(item)?)]],
                Rule::negation => {
                    let atom = self.first_term(item)?;
                    vec![vec![Literal::negative(atom)]]
                }
                Rule::group => {
                    let inner = item.into_inner().next().ok_or_else(|| missing("group"))?;
                    self.disjunction(inner)?
                }
                other => return Err(unexpected(&item, other)),
            };
            acc = acc
                .into_iter()
                .flat_map(|prefix| {
                    options.iter().map(move |option| {
                        let mut body = prefix.clone();
                        body.extend(option.iter().cloned());
                        body
                    })
                })
                .collect();
        }
        Ok(acc)
    }

    fn term(&mut self, pair: Pair<Rule>) -> EngineResult<Term> {
        let inner = match pair.as_rule() {
            Rule::term => pair.into_inner().next().ok_or_else(|| missing("term"))?,
            _ => pair,
        };
        match inner.as_rule() {
            Rule::variable => {
                let name = inner.as_str();
                if name == "_" {
                    self.anonymous += 1;
                    Ok(Term::var(format!("_G{}", self.anonymous)))
                } else {
                    Ok(Term::var(name))
                }
            }
            Rule::integer => {
                let (line, column) = inner.line_col();
                inner
                    .as_str()
                    .parse::<i64>()
                    .map(Term::Int)
                    .map_err(|e| EngineError::Parse {
                        line,
                        column,
                        message: e.to_string(),
                    })
            }
            Rule::compound => {
                let mut parts = inner.into_inner();
                let functor = parts.next().ok_or_else(|| missing("functor"))?;
                let functor = functor.as_str().to_string();
                let args = parts.map(|a| self.term(a)).collect::<EngineResult<Vec<_>>>()?;
                Ok(Term::compound(functor, args))
            }
            other => Err(unexpected(&inner, other)),
        }
    }
}

fn missing(what: &str) -> EngineError {
    EngineError::Parse {
        line: 0,
        column: 0,
        message: format!("missing {what}"),
    }
}

fn unexpected(pair: &Pair<Rule>, found: Rule) -> EngineError {
    let (line, column) = pair.line_col();
    EngineError::Parse {
        line,
        column,
        message: format!("unexpected {found:?}"),
    }
}
