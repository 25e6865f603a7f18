//! Program text → `Program`, via a pest grammar.

mod builder;

use chronolog_core::errors::{EngineError, EngineResult};
use pest::error::{Error as PestError, LineColLocation};
use pest::Parser;

use crate::program::Program;

#[derive(pest_derive::Parser)]
#[grammar = "parser/program.pest"] // Path relative to src/
pub struct ProgramParser;

/// Parse a complete program.
pub fn parse_program(text: &str) -> EngineResult<Program> {
    let mut pairs = ProgramParser::parse(Rule::program, text).map_err(parse_error)?;
    let program = pairs.next().ok_or_else(|| EngineError::Parse {
        line: 1,
        column: 1,
        message: "empty parse".to_string(),
    })?;
    builder::build_program(program)
}

fn parse_error(err: PestError<Rule>) -> EngineError {
    let (line, column) = match err.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    EngineError::Parse {
        line,
        column,
        message: err.variant.message().into_owned(),
    }
}
