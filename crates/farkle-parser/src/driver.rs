//! LALR pushdown driver (C7): the shift/reduce/goto loop of §4.3, wrapping
//! each `fuse` call in a `catch_unwind` boundary per §7.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use farkle_core::grammar::Grammar;
use farkle_runtime::{Action, CharStream, ExpectedSymbol, FarkleError, ParseErrorKind, PostProcessorError, Position};
use tracing::instrument;

use crate::post_processor::PostProcessor;
use crate::tokenizer::Tokenizer;

/// Runs a single parse to completion: pulls tokens from `tokenizer`,
/// drives the two parallel stacks, and invokes `post_processor.fuse` on
/// every reduction. Returns the single semantic value left on the object
/// stack when an `Accept` action fires.
#[instrument(skip_all)]
pub fn run<PP: PostProcessor>(
  grammar: &Grammar,
  stream: &mut CharStream,
  tokenizer: &mut Tokenizer,
  post_processor: &mut PP,
) -> Result<PP::Value, FarkleError> {
  let mut state_stack: Vec<u32> = vec![0];
  let mut object_stack: Vec<PP::Value> = Vec::new();
  let mut current = None;

  loop {
    if current.is_none() {
      current = Some(tokenizer.next_token(stream, grammar, post_processor)?);
    }
    let token = current.as_ref().expect("just populated above");
    let top_state = *state_stack.last().expect("state stack always has a sentinel");

    let action =
      if token.is_eof { grammar.lalr_states[top_state as usize].eof_action } else { grammar.optimized.action(top_state, token.symbol) };

    match action {
      Some(Action::Accept) => {
        return Ok(object_stack.pop().expect("accept with an empty object stack is a driver bug, not a user error"));
      }

      Some(Action::Shift(next_state)) => {
        let token = current.take().expect("checked above");
        tracing::trace!(state = next_state, terminal = token.symbol.0, "shift");
        state_stack.push(next_state);
        object_stack.push(token.data);
      }

      Some(Action::Reduce(production_index)) => {
        let production = grammar.production(production_index);
        let arity = production.handle.len();
        tracing::trace!(production = production_index, arity, "reduce");

        let split_at = object_stack.len() - arity;
        let members = object_stack.split_off(split_at);
        state_stack.truncate(state_stack.len() - arity);

        let under_state = *state_stack.last().expect("state stack always has a sentinel");
        let goto_state = grammar
          .optimized
          .goto(under_state, production.head)
          .expect("a reduction's goto target must exist or the table build is broken");

        let position = token.position;
        let store = stream.object_store();
        let value = fuse_with_panic_boundary(post_processor, production, members, store, position)?;

        state_stack.push(goto_state);
        object_stack.push(value);
      }

      None => {
        let mut expected: BTreeSet<ExpectedSymbol> =
          grammar.lalr_states[top_state as usize].actions.iter().map(|(terminal, _)| ExpectedSymbol::Terminal(*terminal)).collect();
        if grammar.lalr_states[top_state as usize].eof_action.is_some() {
          expected.insert(ExpectedSymbol::EndOfInput);
        }
        let actual = if token.is_eof { ExpectedSymbol::EndOfInput } else { ExpectedSymbol::Terminal(token.symbol) };
        return Err(FarkleError::ParseError { position: token.position, kind: ParseErrorKind::SyntaxError { expected, actual } });
      }
    }
  }
}

fn fuse_with_panic_boundary<PP: PostProcessor>(
  post_processor: &mut PP,
  production: &farkle_runtime::Production,
  members: Vec<PP::Value>,
  store: &mut crate::post_processor::ObjectStore,
  fallback_position: Position,
) -> Result<PP::Value, FarkleError> {
  let outcome = panic::catch_unwind(AssertUnwindSafe(|| post_processor.fuse(production, members, store)));

  match outcome {
    Ok(Ok(value)) => Ok(value),
    Ok(Err(err)) => Err(post_processor_error_to_parse_error(err, fallback_position)),
    Err(payload) => {
      let message = panic_message(payload);
      Err(post_processor_error_to_parse_error(PostProcessorError::Panic(message), fallback_position))
    }
  }
}

fn post_processor_error_to_parse_error(err: PostProcessorError, fallback_position: Position) -> FarkleError {
  match err {
    PostProcessorError::Application { position, message } => {
      FarkleError::ParseError { position: position.unwrap_or(fallback_position), kind: ParseErrorKind::UserError(message) }
    }
    PostProcessorError::Panic(message) => {
      FarkleError::ParseError { position: fallback_position, kind: ParseErrorKind::UserError(message) }
    }
  }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    (*message).to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "post-processor panicked with a non-string payload".to_string()
  }
}
