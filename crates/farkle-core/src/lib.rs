//! # farkle_core
//!
//! The grammar database (C4 immutable tables + C5 optimized lookup tables)
//! and the LALR table builder (C9) that computes them from an abstract
//! syntax provider (C10's conflict resolver is consulted during the
//! build), housed together since the database's shape is dictated by
//! what the builder produces.

pub mod build;
pub mod grammar;
pub mod optimized;

pub use build::{build_lalr_tables, BuildConfig, CancellationToken};
pub use build::conflict::{ConflictResolver, Decision};
pub use build::syntax::AbstractSyntaxProvider;
pub use grammar::{Grammar, SharedGrammar};
pub use optimized::OptimizedOperations;
