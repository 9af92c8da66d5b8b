//! LALR(1) table construction (§4.5, §4.6): turns an [`AbstractSyntaxProvider`]
//! into the DFA/LALR tables [`crate::grammar::Grammar`] carries.
//!
//! [`AbstractSyntaxProvider`]: syntax::AbstractSyntaxProvider

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use farkle_runtime::{BuildDiagnostic, FarkleError, LALRState};

pub mod conflict;
pub mod follows;
pub mod goto_deps;
pub mod lookaheads;
pub mod lr0;
pub mod materialize;
pub mod nullable;
pub mod syntax;

#[cfg(test)]
pub(crate) mod fixtures;

use conflict::{ConflictResolver, NoConflictResolver};
use syntax::AbstractSyntaxProvider;

/// A cooperative cancellation flag polled at each fixpoint iteration and
/// each outer stage of table construction (§5 "Cancellation"). Cloning
/// shares the same underlying flag, so the caller can hold one half and
/// hand the other to [`build_lalr_tables`] from a different thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
  pub fn new() -> Self {
    Self(Arc::new(AtomicBool::new(false)))
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}

/// Options accepted by [`build_lalr_tables`]. The conflict resolver
/// defaults to [`NoConflictResolver`], which turns every shift/reduce or
/// reduce/reduce conflict into a build error — appropriate for a grammar
/// that never registered a precedence policy.
pub struct BuildConfig<'a> {
  pub conflict_resolver: &'a dyn ConflictResolver,
  pub cancellation:      Option<&'a CancellationToken>,
}

impl<'a> BuildConfig<'a> {
  pub fn new(conflict_resolver: &'a dyn ConflictResolver) -> Self {
    Self { conflict_resolver, cancellation: None }
  }

  pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
    self.cancellation = Some(token);
    self
  }
}

impl<'a> Default for BuildConfig<'a> {
  fn default() -> Self {
    Self { conflict_resolver: &NoConflictResolver, cancellation: None }
  }
}

pub(crate) fn cancelled(cancellation: Option<&CancellationToken>) -> bool {
  cancellation.is_some_and(CancellationToken::is_cancelled)
}

/// Runs stages (a) through (h) of §4.5 in order, producing the final
/// [`LALRState`] table. Polls `config.cancellation` between stages and
/// inside both fixpoint loops ((b) nullable closure and (f) follow
/// propagation), per §5.
pub fn build_lalr_tables(syntax: &dyn AbstractSyntaxProvider, config: &BuildConfig) -> Result<Vec<LALRState>, FarkleError> {
  let cancellation = config.cancellation;

  let automaton = lr0::build_lr0_automaton(syntax);
  if cancelled(cancellation) {
    return Err(cancelled_error());
  }

  let nullable = nullable::compute_nullable_nonterminals(syntax, cancellation);
  let production_nullable_starts = nullable::compute_production_nullable_starts(syntax, &nullable);
  if cancelled(cancellation) {
    return Err(cancelled_error());
  }

  let deps = goto_deps::compute_goto_dependencies(&automaton, syntax, &nullable, &production_nullable_starts);
  let mut follows = follows::initial_follows(&automaton, syntax);
  follows::propagate_follows(&mut follows, &deps, cancellation);
  if cancelled(cancellation) {
    return Err(cancelled_error());
  }

  let lookaheads = lookaheads::compute_reduction_lookaheads(&automaton, syntax, &follows);
  if cancelled(cancellation) {
    return Err(cancelled_error());
  }

  materialize::materialize_states(&automaton, syntax, &lookaheads, config.conflict_resolver)
}

fn cancelled_error() -> FarkleError {
  FarkleError::BuildError { diagnostics: vec![BuildDiagnostic::new("grammar build cancelled")] }
}
