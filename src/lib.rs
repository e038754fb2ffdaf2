//! # dafsa-compiler
//!
//! Compiles an unordered dictionary of short ASCII strings — each paired
//! with a return code 0-7 — into a compact byte-array encoding of a
//! [deterministic acyclic finite state automaton](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton).
//! This is the same representation Chromium's public suffix list and
//! registry-controlled-domain tables compile down to.
//!
//! The pipeline is six stages, each one taking and returning a fresh
//! [`graph::Dafsa`]:
//!
//! ```text
//! build -> reverse -> suffix-merge -> reverse -> suffix-merge
//!        -> label-join -> topological-sort -> encode
//! ```
//!
//! ## Buffer Example
//!
//! ```rs
//! use dafsa_compiler::compile;
//! let words = vec!["google.com1".to_string(), "example.com2".to_string()];
//! let bytes = compile(&words).expect("compilation failed");
//! ```
//!
//! ## File Example
//!
//! ```rs
//! use dafsa_compiler::{compile, gperf};
//! let text = std::fs::read_to_string("suffixes.gperf").expect("read failed");
//! let words = gperf::parse(&text, false).expect("malformed dictionary");
//! let bytes = compile(&words).expect("compilation failed");
//! std::fs::write("suffixes.dafsa", bytes).expect("write failed");
//! ```

mod encode;
pub mod format;
pub mod gperf;
pub mod graph;
mod label_join;
mod reverse;
mod suffix_merge;
mod toposort;

use graph::Dafsa;

/// Errors this crate reports. Stage preconditions derived from a previous
/// stage's postconditions are invariants, not `Result`s — a violation there
/// is a `debug_assert!`, since it can only mean a bug in this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("malformed input: {0}")]
    InputMalformed(String),
    #[error("encoding overflow: distance {0} exceeds the 3-byte offset limit")]
    EncodingOverflow(usize),
}

/// Compiles a dictionary into its byte-array DAFSA encoding.
///
/// Each entry in `words` is a printable-ASCII string of at least two bytes
/// whose last byte is an ASCII digit `'0'`-`'7'` giving that word's return
/// value — exactly the "Core input" shape a [`gperf::parse`] call produces.
/// Order and duplicates in `words` do not affect the compiled output.
pub fn compile(words: &[String]) -> Result<Vec<u8>, Error> {
    let dafsa = graph::build(words)?;
    let dafsa = pipeline(dafsa);
    let order = toposort::topo_sort(&dafsa);
    encode::encode(&dafsa, &order)
}

/// The four middle stages, run in the fixed order `spec.md` §2 prescribes:
/// reversing, merging, reversing again, merging again, then fusing labels.
/// Two suffix-merge passes are required because the first only exposes
/// sharing created by the first reversal; the second reversal restores the
/// original edge direction so the second merge can unify shared *prefixes*
/// (which only look like shared suffixes once reversed back again).
fn pipeline(dafsa: Dafsa) -> Dafsa {
    let dafsa = reverse::reverse(&dafsa);
    let dafsa = suffix_merge::merge_suffixes(&dafsa);
    let dafsa = reverse::reverse(&dafsa);
    let dafsa = suffix_merge::merge_suffixes(&dafsa);
    label_join::join_labels(&dafsa)
}
