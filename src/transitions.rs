use std::collections::BTreeMap;

use crate::automaton::Automaton;
use crate::trie::NodeIdx;
use crate::trie::Trie;

/// Lazily memoized automaton transition function.
///
/// Kept apart from the trie so the trie stays read-only after
/// construction; the cache holds derived [`NodeIdx`] handles only
/// and must always agree with recomputing through the suffix chain.
#[derive(Debug)]
pub struct TransitionTable {
	cache: Vec<BTreeMap<char, NodeIdx>>,
}

impl TransitionTable {
	pub fn new(automaton: &Automaton) -> Self {
		Self {
			cache: vec![BTreeMap::new(); automaton.trie().len()],
		}
	}

	/// Where the automaton goes from `node` on `ch`: the trie edge if
	/// one exists, else the transition of the suffix-linked node, with
	/// the root transitioning to itself on characters it has no edge
	/// for. Total over every node and character.
	///
	/// The recursion is expressed as an explicit walk up the suffix
	/// chain; every node visited without an answer gets the final
	/// target memoized.
	pub fn transition(&mut self, automaton: &Automaton, node: NodeIdx, ch: char) -> NodeIdx {
		let trie: &Trie = automaton.trie();

		let mut walked: Vec<NodeIdx> = Vec::new();
		let mut probe: NodeIdx = node;
		let target: NodeIdx = loop {
			if let Some(child) = trie.child(probe, ch) {
				break child;
			}
			if let Some(&memoized) = self.cache[probe.index()].get(&ch) {
				break memoized;
			}
			walked.push(probe);
			match automaton.suffix_link(probe) {
				Some(up) => probe = up,
				// The root absorbs everything it has no edge for.
				None => break probe,
			}
		};

		debug!("=== transition {node:?} on {ch:?} -> {target:?} (memoizing {} nodes)", walked.len());
		for missed in walked.into_iter() {
			self.cache[missed.index()].insert(ch, target);
		}

		target
	}
}
