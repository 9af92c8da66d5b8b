//! Public parsing entry point (§6): wires a [`farkle_core::grammar::Grammar`],
//! a [`Tokenizer`], and a [`PostProcessor`] together over any
//! [`ParserInput`].

use farkle_core::grammar::SharedGrammar;
use farkle_runtime::{FarkleError, ParserInput};
use tracing::instrument;

use crate::driver;
use crate::post_processor::PostProcessor;
use crate::tokenizer::Tokenizer;

/// A grammar bound to nothing yet: cheap to construct, since the grammar
/// itself is an `Arc` clone (§4.4 "one grammar, many parses").
#[derive(Clone)]
pub struct Parser {
  grammar: SharedGrammar,
}

impl Parser {
  pub fn new(grammar: SharedGrammar) -> Self {
    Self { grammar }
  }

  /// Parses `input` to completion with `post_processor`, returning the
  /// single semantic value accepted at the grammar's start production, or
  /// the first fatal error encountered (§1 Non-goals: no error recovery).
  #[instrument(skip_all)]
  pub fn parse<PP: PostProcessor>(&self, input: impl ParserInput, post_processor: &mut PP) -> Result<PP::Value, FarkleError> {
    let mut stream = input.into_char_stream().map_err(|err| FarkleError::ParseError {
      position: farkle_runtime::Position::START,
      kind: farkle_runtime::ParseErrorKind::UserError(err.to_string()),
    })?;
    let mut tokenizer = Tokenizer::new();
    driver::run(&self.grammar, &mut stream, &mut tokenizer, post_processor)
  }
}

#[cfg(test)]
mod tests {
  use farkle_core::build::conflict::NoConflictResolver;
  use farkle_core::grammar::Grammar;
  use farkle_runtime::{DFAEdge, DFAState, DFASymbol, Symbol, Terminal};

  use super::*;
  use crate::post_processor::SyntaxCheckPostProcessor;

  struct BalancedParens;

  impl farkle_core::build::syntax::AbstractSyntaxProvider for BalancedParens {
    fn terminal_count(&self) -> usize { 3 }
    fn nonterminal_count(&self) -> usize { 2 }
    fn production_count(&self) -> usize { 3 }
    fn start_production(&self) -> u32 { 0 }
    fn end_symbol(&self) -> Terminal { Terminal(2) }
    fn production_head(&self, production: u32) -> farkle_runtime::Nonterminal {
      match production {
        0 => farkle_runtime::Nonterminal(0),
        _ => farkle_runtime::Nonterminal(1),
      }
    }
    fn production_members(&self, production: u32) -> &[Symbol] {
      match production {
        0 => &[Symbol::Nonterminal(farkle_runtime::Nonterminal(1))],
        1 => &[Symbol::Terminal(Terminal(0)), Symbol::Nonterminal(farkle_runtime::Nonterminal(1)), Symbol::Terminal(Terminal(1))],
        _ => &[],
      }
    }
    fn nonterminal_productions(&self, nonterminal: farkle_runtime::Nonterminal) -> &[u32] {
      match nonterminal.0 {
        0 => &[0],
        _ => &[1, 2],
      }
    }
  }

  fn two_state_dfa() -> Vec<DFAState> {
    // state 0: '(' -> accept terminal 0 at state 1; ')' -> accept terminal 1 at state 2.
    vec![
      DFAState {
        edges: vec![
          DFAEdge { range: '('..')', next_state: Some(1) },
          DFAEdge { range: ')'..'*', next_state: Some(2) },
        ],
        anything_else: None,
        accept_symbol: None,
      },
      DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(0), name: "(".into() }) },
      DFAState { edges: vec![], anything_else: None, accept_symbol: Some(DFASymbol::Terminal { id: Terminal(1), name: ")".into() }) },
    ]
  }

  #[test]
  fn parses_balanced_parens_end_to_end() {
    let grammar_def = BalancedParens;
    let grammar = Grammar::build(&grammar_def, two_state_dfa(), vec![], &NoConflictResolver, None).expect("grammar builds");
    let parser = Parser::new(grammar);
    let mut pp = SyntaxCheckPostProcessor;
    parser.parse("(())", &mut pp).expect("balanced input parses");
  }

  #[test]
  fn rejects_unbalanced_input() {
    let grammar_def = BalancedParens;
    let grammar = Grammar::build(&grammar_def, two_state_dfa(), vec![], &NoConflictResolver, None).expect("grammar builds");
    let parser = Parser::new(grammar);
    let mut pp = SyntaxCheckPostProcessor;
    assert!(parser.parse("(()", &mut pp).is_err());
  }
}
