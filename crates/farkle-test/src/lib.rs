//! End-to-end scenario and property tests for the farkle workspace:
//! exercising the compiled pipeline against real input, rather than
//! unit-testing one builder stage at a time.

mod grammars;

#[cfg(test)]
mod scenario_json_number;
#[cfg(test)]
mod scenario_balanced_parens;
#[cfg(test)]
mod scenario_line_comment;
#[cfg(test)]
mod scenario_nested_block_comment;
#[cfg(test)]
mod scenario_precedence;
#[cfg(test)]
mod scenario_crlf;
