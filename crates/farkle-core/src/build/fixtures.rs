//! Shared small grammars used by the builder stage tests. Kept in one
//! place so the LR(0)/nullable/follow/lookahead stage tests all exercise
//! the same two concrete grammars instead of each re-deriving its own toy
//! fixture.

#![cfg(test)]

use farkle_runtime::{Nonterminal, Symbol, Terminal};

use super::syntax::AbstractSyntaxProvider;

/// `S' -> S`, `S -> ( S ) | ε` — §8 scenario 2 ("Balanced parens").
///
/// Terminals: 0 = `(`, 1 = `)`. Nonterminals: 0 = S', 1 = S.
pub struct BalancedParens {
  members: Vec<Vec<Symbol>>,
}

impl BalancedParens {
  pub fn new() -> Self {
    let lparen = Symbol::Terminal(Terminal(0));
    let rparen = Symbol::Terminal(Terminal(1));
    let s = Symbol::Nonterminal(Nonterminal(1));
    Self {
      members: vec![
        vec![s],                  // 0: S' -> S
        vec![lparen, s, rparen],  // 1: S -> ( S )
        vec![],                  // 2: S -> ε
      ],
    }
  }
}

impl AbstractSyntaxProvider for BalancedParens {
  fn terminal_count(&self) -> usize {
    2
  }
  fn nonterminal_count(&self) -> usize {
    2
  }
  fn production_count(&self) -> usize {
    self.members.len()
  }
  fn start_production(&self) -> u32 {
    0
  }
  fn end_symbol(&self) -> Terminal {
    Terminal(2)
  }
  fn production_head(&self, production: u32) -> Nonterminal {
    if production == 0 {
      Nonterminal(0)
    } else {
      Nonterminal(1)
    }
  }
  fn production_members(&self, production: u32) -> &[Symbol] {
    &self.members[production as usize]
  }
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32] {
    static START: [u32; 1] = [0];
    static S: [u32; 2] = [1, 2];
    if nonterminal.0 == 0 {
      &START
    } else {
      &S
    }
  }
}

/// `E' -> E`, `E -> E + E | E * E | n` — §8 scenario 5
/// ("Shift/reduce by precedence"), used by the materialization tests.
///
/// Terminals: 0 = `+`, 1 = `*`, 2 = `n`. Nonterminals: 0 = E', 1 = E.
pub struct PrecedenceGrammar {
  members: Vec<Vec<Symbol>>,
}

impl PrecedenceGrammar {
  pub fn new() -> Self {
    let plus = Symbol::Terminal(Terminal(0));
    let star = Symbol::Terminal(Terminal(1));
    let n = Symbol::Terminal(Terminal(2));
    let e = Symbol::Nonterminal(Nonterminal(1));
    Self {
      members: vec![
        vec![e],                // 0: E' -> E
        vec![e, plus, e],       // 1: E -> E + E
        vec![e, star, e],       // 2: E -> E * E
        vec![n],                // 3: E -> n
      ],
    }
  }
}

impl AbstractSyntaxProvider for PrecedenceGrammar {
  fn terminal_count(&self) -> usize {
    3
  }
  fn nonterminal_count(&self) -> usize {
    2
  }
  fn production_count(&self) -> usize {
    self.members.len()
  }
  fn start_production(&self) -> u32 {
    0
  }
  fn end_symbol(&self) -> Terminal {
    Terminal(3)
  }
  fn production_head(&self, production: u32) -> Nonterminal {
    if production == 0 {
      Nonterminal(0)
    } else {
      Nonterminal(1)
    }
  }
  fn production_members(&self, production: u32) -> &[Symbol] {
    &self.members[production as usize]
  }
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32] {
    static START: [u32; 1] = [0];
    static E: [u32; 3] = [1, 2, 3];
    if nonterminal.0 == 0 {
      &START
    } else {
      &E
    }
  }
}
