#[macro_use(debug)]
extern crate tracing;

pub mod automaton;
pub mod cases;
pub mod transitions;
pub mod trie;
