//! The abstract syntax provider contract (§6 "Grammar input to table
//! builder"): everything the LALR table builder needs from a syntax
//! definition, independent of how that definition was parsed or
//! constructed. Grammar authoring itself (a combinator/builder surface
//! for defining productions) is out of scope here.

use farkle_runtime::{Nonterminal, Symbol, Terminal};

/// A syntax definition as the table builder sees it.
pub trait AbstractSyntaxProvider {
  fn terminal_count(&self) -> usize;
  fn nonterminal_count(&self) -> usize;
  fn production_count(&self) -> usize;

  /// The augmented start production `S' -> S`.
  fn start_production(&self) -> u32;

  fn end_symbol(&self) -> Terminal;

  /// The production's head nonterminal.
  fn production_head(&self, production: u32) -> Nonterminal;

  /// The production's handle, in order.
  fn production_members(&self, production: u32) -> &[Symbol];

  /// All productions whose head is `nonterminal`.
  fn nonterminal_productions(&self, nonterminal: Nonterminal) -> &[u32];
}
