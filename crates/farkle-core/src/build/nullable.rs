//! Nullable nonterminals (§4.5(b)) and production nullable-starts
//! (§4.5(c)).

use farkle_runtime::Symbol;

use super::syntax::AbstractSyntaxProvider;
use super::{cancelled, CancellationToken};

/// Computes, to fixpoint, the set of nonterminals that can derive the
/// empty string. A nonterminal is nullable if any of its productions
/// consists entirely of nullable symbols; the end-of-input symbol is not
/// part of this computation (§9 Open Question: this design takes the
/// position that EOF is never nullable, only appearing explicitly in the
/// augmented start production's follow set).
///
/// `cancellation` is polled once per outer iteration of the fixpoint loop,
/// so a build on a pathologically large grammar can be aborted before this
/// stage runs to completion rather than only between stages.
pub fn compute_nullable_nonterminals(syntax: &dyn AbstractSyntaxProvider, cancellation: Option<&CancellationToken>) -> Vec<bool> {
  let mut nullable = vec![false; syntax.nonterminal_count()];

  loop {
    if cancelled(cancellation) {
      break;
    }

    let mut changed = false;

    for nt in 0..syntax.nonterminal_count() {
      if nullable[nt] {
        continue;
      }
      let is_nullable = syntax.nonterminal_productions(farkle_runtime::Nonterminal(nt as u32)).iter().any(|&production| {
        syntax.production_members(production).iter().all(|symbol| match symbol {
          Symbol::Terminal(_) => false,
          Symbol::Nonterminal(n) => nullable[n.0 as usize],
        })
      });
      if is_nullable {
        nullable[nt] = true;
        changed = true;
      }
    }

    if !changed {
      break;
    }
  }

  nullable
}

/// For every production, the smallest index `i` such that every symbol from
/// `i` onward is nullable. A production with no nullable suffix (not even
/// the empty suffix past its end) gets `handle.len()`; an empty-handled
/// production is nullable starting at `0`.
pub fn compute_production_nullable_starts(syntax: &dyn AbstractSyntaxProvider, nullable: &[bool]) -> Vec<u32> {
  (0..syntax.production_count())
    .map(|production| {
      let handle = syntax.production_members(production as u32);
      let mut start = handle.len();
      for (i, symbol) in handle.iter().enumerate().rev() {
        let is_nullable = match symbol {
          Symbol::Terminal(_) => false,
          Symbol::Nonterminal(n) => nullable[n.0 as usize],
        };
        if is_nullable {
          start = i;
        } else {
          break;
        }
      }
      start as u32
    })
    .collect()
}
