//! Reduction lookaheads (§4.5(g)): the per-`(state, production)` terminal
//! sets that license a reduce action, plus the accept action for the
//! augmented start production.

use std::collections::HashMap;

use farkle_runtime::BitSet;

use super::goto_deps::follow_symbols;
use super::lr0::Lr0Automaton;
use super::syntax::AbstractSyntaxProvider;

/// Maps `(state, production)` to the set of terminals that license a
/// reduction of `production` while in `state`. The augmented start
/// production's entry (keyed by the state reached by shifting its whole
/// handle from the initial state) is always exactly `{end_symbol}` and is
/// treated as the accept action by the materialization stage, never a
/// plain reduce.
pub type ReductionLookaheads = HashMap<(u32, u32), BitSet>;

pub fn compute_reduction_lookaheads(
  automaton: &Lr0Automaton,
  syntax: &dyn AbstractSyntaxProvider,
  follows: &[BitSet],
) -> ReductionLookaheads {
  let mut lookaheads: ReductionLookaheads = HashMap::new();

  for g in &automaton.gotos {
    for &production in syntax.nonterminal_productions(g.nonterminal) {
      let handle = syntax.production_members(production);
      let Some(reduce_state) = follow_symbols(automaton, g.from_state, handle) else { continue };
      lookaheads.entry((reduce_state, production)).or_default().union_with(&follows[g.index]);
    }
  }

  // The augmented start production is never the target of a GOTO (its head
  // never appears on the right-hand side of any production), so its accept
  // state is found directly from the automaton's initial state.
  let start_production = syntax.start_production();
  let start_handle = syntax.production_members(start_production);
  if let Some(accept_state) = follow_symbols(automaton, 0, start_handle) {
    lookaheads.entry((accept_state, start_production)).or_default().insert(syntax.end_symbol().0 as usize);
  }

  lookaheads
}
