//! Scenario 1: a grammar accepting a single JSON-style number token,
//! transformed into an actual `i64`/`f64`.

use farkle_core::build::conflict::NoConflictResolver;
use farkle_core::grammar::Grammar;
use farkle_parser::{ObjectStore, Parser, PostProcessor};
use farkle_runtime::{ParseErrorKind, Position, Production, Terminal};

use crate::grammars::{json_number_dfa, JsonNumberGrammar};

#[derive(Debug, Clone, Copy, PartialEq)]
enum JsonNumber {
  Int(i64),
  Float(f64),
}

#[derive(Default)]
struct JsonNumberPostProcessor;

impl PostProcessor for JsonNumberPostProcessor {
  type Value = JsonNumber;

  fn transform(&mut self, _terminal: Terminal, span: &[char], _position: Position) -> JsonNumber {
    let text: String = span.iter().collect();
    if text.contains('.') { JsonNumber::Float(text.parse().expect("DFA only accepts well-formed numbers")) }
    else { JsonNumber::Int(text.parse().expect("DFA only accepts well-formed numbers")) }
  }

  fn fuse(&mut self, _production: &Production, members: Vec<JsonNumber>, _store: &mut ObjectStore) -> Result<JsonNumber, farkle_runtime::PostProcessorError> {
    Ok(members.into_iter().next().expect("S' -> Number always has exactly one member"))
  }

  fn eof(&mut self) -> JsonNumber {
    JsonNumber::Int(0)
  }
}

fn parser() -> Parser {
  let grammar = Grammar::build(&JsonNumberGrammar, json_number_dfa(), vec![], &NoConflictResolver, None).expect("grammar builds");
  Parser::new(grammar)
}

#[test]
fn integer_literal_becomes_an_int() {
  let parser = parser();
  let mut pp = JsonNumberPostProcessor;
  let value = parser.parse("123", &mut pp).expect("123 is a valid number");
  assert_eq!(value, JsonNumber::Int(123));
}

#[test]
fn decimal_literal_becomes_a_float() {
  let parser = parser();
  let mut pp = JsonNumberPostProcessor;
  let value = parser.parse("12.5", &mut pp).expect("12.5 is a valid number");
  assert_eq!(value, JsonNumber::Float(12.5));
}

#[test]
fn leading_non_digit_is_a_lexical_error() {
  let parser = parser();
  let mut pp = JsonNumberPostProcessor;
  let err = parser.parse("abc", &mut pp).unwrap_err();
  match err {
    farkle_runtime::FarkleError::ParseError { position, kind: ParseErrorKind::LexicalError(c) } => {
      assert_eq!(c, 'a');
      assert_eq!(position, Position::new(1, 1, 0));
    }
    other => panic!("expected a lexical error, got {other:?}"),
  }
}

#[test]
fn a_trailing_dot_with_no_fraction_digits_errors_on_the_next_token() {
  // Maximal-munch DFA scanning backtracks "1." to the longest *accepting*
  // prefix ("1", since the fractional group is optional) rather than
  // failing the whole literal; the `.` is then left to fail on its own as
  // a separate, unmatched token.
  let parser = parser();
  let mut pp = JsonNumberPostProcessor;
  let err = parser.parse("1.", &mut pp).unwrap_err();
  match err {
    farkle_runtime::FarkleError::ParseError { position, kind: ParseErrorKind::LexicalError(c) } => {
      assert_eq!(c, '.');
      assert_eq!(position, Position::new(1, 2, 1));
    }
    other => panic!("expected a lexical error on the stray '.', got {other:?}"),
  }
}
