//! The grammar database (C4): the immutable tables a compiled grammar
//! carries, plus the entry point that runs the table builder (C9) and
//! computes the optimized lookup tables (C5) from them.

use std::sync::Arc;

use farkle_runtime::{DFAState, FarkleError, Group, LALRState, Production, Terminal};
use tracing::instrument;

use crate::build::{build_lalr_tables, conflict::ConflictResolver, syntax::AbstractSyntaxProvider, BuildConfig, CancellationToken};
use crate::optimized::OptimizedOperations;

/// An immutable, fully-built grammar: the DFA table, the group table, the
/// production list, and the LALR action/goto tables, plus the precomputed
/// C5 caches over them. Cheap to clone (it's always held behind
/// [`SharedGrammar`]) and safe to share across threads — a Grammar never
/// changes after [`Grammar::build`] returns (§5 "Thread-safety").
pub struct Grammar {
  pub terminal_count:    usize,
  pub nonterminal_count: usize,
  pub end_symbol:        Terminal,
  pub productions:       Vec<Production>,
  pub dfa_states:        Vec<DFAState>,
  pub groups:            Vec<Group>,
  pub lalr_states:       Vec<LALRState>,
  pub optimized:         OptimizedOperations,
}

/// Shared-ownership handle to a built grammar.
pub type SharedGrammar = Arc<Grammar>;

impl Grammar {
  /// Builds a grammar from an abstract syntax provider and its pre-built
  /// lexical tables (the DFA states and the group table are inputs here,
  /// not derived — their construction from a regex/combinator surface is
  /// out of scope, per §1).
  #[instrument(skip_all, fields(terminals = syntax.terminal_count(), nonterminals = syntax.nonterminal_count()))]
  pub fn build(
    syntax: &dyn AbstractSyntaxProvider,
    dfa_states: Vec<DFAState>,
    groups: Vec<Group>,
    conflict_resolver: &dyn ConflictResolver,
    cancellation: Option<&CancellationToken>,
  ) -> Result<SharedGrammar, FarkleError> {
    let mut config = BuildConfig::new(conflict_resolver);
    if let Some(token) = cancellation {
      config = config.with_cancellation(token);
    }

    let lalr_states = build_lalr_tables(syntax, &config)?;
    tracing::debug!(states = lalr_states.len(), "lalr table materialized");

    let productions = (0..syntax.production_count() as u32)
      .map(|index| Production { index, head: syntax.production_head(index), handle: syntax.production_members(index).to_vec() })
      .collect();

    let optimized =
      OptimizedOperations::compute(&dfa_states, &lalr_states, &groups, syntax.terminal_count(), syntax.nonterminal_count());

    Ok(Arc::new(Grammar {
      terminal_count: syntax.terminal_count(),
      nonterminal_count: syntax.nonterminal_count(),
      end_symbol: syntax.end_symbol(),
      productions,
      dfa_states,
      groups,
      lalr_states,
      optimized,
    }))
  }

  pub fn production(&self, index: u32) -> &Production {
    &self.productions[index as usize]
  }

  pub fn group(&self, index: usize) -> &Group {
    &self.groups[index]
  }
}
