//! Conflict resolver interface (C10): consulted during table materialization
//! (§4.5(h)) whenever a terminal would otherwise receive two competing
//! actions.

use farkle_runtime::Terminal;

/// The outcome of comparing a newly proposed action against a terminal's
/// current dominant action (or, for reduce/reduce, against another
/// production).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  /// Keep the existing (first) option.
  ChooseOption1,
  /// Replace the dominant list with the new (second) option.
  ChooseOption2,
  /// Suppress all actions for this terminal (it becomes non-associative).
  ChooseNeither,
  /// Cannot decide: both options are kept, which manifests as ambiguity
  /// unless a later comparison resolves it.
  CannotChoose,
}

/// Resolves shift/reduce and reduce/reduce conflicts encountered while
/// materializing the action table. Reduce/reduce conflicts may not return
/// `ChooseNeither` (§4.6); callers that do are a builder-internal bug, not
/// a user error.
pub trait ConflictResolver {
  fn resolve_shift_reduce(&self, terminal: Terminal, production: u32) -> Decision;
  fn resolve_reduce_reduce(&self, p1: u32, p2: u32) -> Decision;
}

/// A resolver that never picks a side, used when the grammar has no
/// precedence policy configured. Every conflict it touches therefore
/// surfaces as an ambiguous-grammar build error during materialization,
/// which is the correct behavior for a grammar that didn't ask for
/// conflict resolution in the first place.
pub struct NoConflictResolver;

impl ConflictResolver for NoConflictResolver {
  fn resolve_shift_reduce(&self, _terminal: Terminal, _production: u32) -> Decision {
    Decision::CannotChoose
  }

  fn resolve_reduce_reduce(&self, _p1: u32, _p2: u32) -> Decision {
    Decision::CannotChoose
  }
}
