use std::collections::VecDeque;

use crate::trie::NodeIdx;
use crate::trie::Trie;

/// The resolved automaton: the trie plus, per node, its suffix link,
/// terminal link and nesting count.
///
/// Links are non-owning [`NodeIdx`] handles into the trie arena,
/// kept in a side table so the trie itself stays untouched
/// after construction.
#[derive(Debug)]
pub struct Automaton {
	trie: Trie,
	links: Vec<NodeLinks>,
	max_nesting: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeLinks {
	/// Node whose path is the longest proper suffix of this node's path
	/// that is also a trie path. `None` only for the root.
	suffix: Option<NodeIdx>,
	/// Nearest terminal node on the suffix-link chain, this node excluded.
	terminal: Option<NodeIdx>,
	/// How many patterns are simultaneous dictionary-suffixes along
	/// this node's matching chain.
	nesting: usize,
}

impl Automaton {
	/// Consumes a built trie and computes every link and nesting count
	/// in one breadth-first pass.
	///
	/// Suffix links always point at strictly shallower nodes, so by the
	/// time a node is dequeued its suffix target is fully resolved;
	/// that is what makes the single pass sufficient.
	pub fn resolve(trie: Trie) -> Self {
		let root: NodeIdx = trie.root();

		let mut links: Vec<NodeLinks> = vec![NodeLinks::default(); trie.len()];
		if trie[root].is_terminal() {
			// The empty pattern nests with itself.
			links[root.index()].nesting = 1;
		}
		let mut max_nesting: usize = links[root.index()].nesting;

		let mut queue: VecDeque<NodeIdx> = VecDeque::new();
		queue.push_back(root);

		while let Some(curr) = queue.pop_front() {
			for (ch, child) in trie[curr].children() {
				queue.push_back(child);

				// Walk the suffix chain starting at `curr` itself;
				// the first suffix-linked node with a trie edge for `ch`
				// supplies the target, an exhausted chain means the root.
				// Root children take the exhausted branch immediately.
				let mut probe: NodeIdx = curr;
				let suffix: NodeIdx = loop {
					match links[probe.index()].suffix {
						None => break root,
						Some(up) => match trie.child(up, ch) {
							Some(target) => break target,
							None => probe = up,
						},
					}
				};
				debug_assert!(trie[suffix].depth() < trie[child].depth());
				links[child.index()].suffix = Some(suffix);

				links[child.index()].terminal = if trie[suffix].is_terminal() {
					Some(suffix)
				} else {
					links[suffix.index()].terminal
				};

				let mut nesting: usize = links[curr.index()].nesting.max(links[suffix.index()].nesting);
				if trie[child].is_terminal() {
					nesting += 1;
				}
				links[child.index()].nesting = nesting;

				debug!(
					"=== resolved {child:?} ({ch:?}): suffix {suffix:?}, terminal {:?}, nesting {nesting}",
					links[child.index()].terminal
				);

				if max_nesting < nesting {
					max_nesting = nesting;
				}
			}
		}

		Self {
			trie,
			links,
			max_nesting,
		}
	}

	/// Maximum nesting count over all nodes; the per-case answer.
	pub fn max_nesting(&self) -> usize {
		self.max_nesting
	}

	pub fn suffix_link(&self, node: NodeIdx) -> Option<NodeIdx> {
		self.links[node.index()].suffix
	}

	pub fn terminal_link(&self, node: NodeIdx) -> Option<NodeIdx> {
		self.links[node.index()].terminal
	}

	pub fn nesting(&self, node: NodeIdx) -> usize {
		self.links[node.index()].nesting
	}

	pub fn trie(&self) -> &Trie {
		&self.trie
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn resolve(patterns: &[&str]) -> Automaton {
		let mut trie: Trie = Trie::new();
		for pattern in patterns.iter() {
			trie.insert(pattern);
		}
		Automaton::resolve(trie)
	}

	#[test]
	fn no_patterns() {
		assert_eq!(resolve(&[]).max_nesting(), 0);
	}

	#[test]
	fn single_pattern() {
		assert_eq!(resolve(&["hello"]).max_nesting(), 1);
	}

	#[test]
	fn empty_pattern_alone() {
		assert_eq!(resolve(&[""]).max_nesting(), 1);
	}

	#[test]
	fn pure_nesting_chain() {
		assert_eq!(resolve(&["a", "ba", "cba"]).max_nesting(), 3);
	}

	#[test]
	fn disjoint_patterns() {
		assert_eq!(resolve(&["ab", "cd"]).max_nesting(), 1);
	}

	#[test]
	fn shared_prefix_is_not_nesting() {
		// Prefix overlap alone never stacks terminals on one suffix chain.
		assert_eq!(resolve(&["ab", "ac", "ad"]).max_nesting(), 1);
	}

	#[test]
	fn suffix_stack() {
		assert_eq!(resolve(&["abc", "bc", "c"]).max_nesting(), 3);
		assert_eq!(resolve(&["aaa", "aa", "a"]).max_nesting(), 3);
	}

	#[test]
	fn order_independence() {
		let orders: &[[&str; 3]] = &[
			["a", "ba", "cba"],
			["a", "cba", "ba"],
			["ba", "a", "cba"],
			["ba", "cba", "a"],
			["cba", "a", "ba"],
			["cba", "ba", "a"],
		];
		for order in orders.iter() {
			assert_eq!(resolve(order).max_nesting(), 3, "order {order:?}");
		}
	}

	#[test]
	fn link_structure() {
		let automaton: Automaton = resolve(&["a", "ba"]);
		let trie: &Trie = automaton.trie();

		let root: NodeIdx = trie.root();
		let a: NodeIdx = trie.child(root, 'a').unwrap();
		let b: NodeIdx = trie.child(root, 'b').unwrap();
		let ba: NodeIdx = trie.child(b, 'a').unwrap();

		assert_eq!(automaton.suffix_link(root), None);
		assert_eq!(automaton.suffix_link(a), Some(root));
		assert_eq!(automaton.suffix_link(b), Some(root));
		assert_eq!(automaton.suffix_link(ba), Some(a));

		assert_eq!(automaton.terminal_link(root), None);
		assert_eq!(automaton.terminal_link(a), None);
		assert_eq!(automaton.terminal_link(b), None);
		assert_eq!(automaton.terminal_link(ba), Some(a));

		assert_eq!(automaton.nesting(root), 0);
		assert_eq!(automaton.nesting(a), 1);
		assert_eq!(automaton.nesting(b), 0);
		assert_eq!(automaton.nesting(ba), 2);
		assert_eq!(automaton.max_nesting(), 2);
	}

	#[test]
	fn terminal_link_skips_non_terminal_suffixes() {
		// "cba" links to "ba" (not a pattern), whose terminal link is "a".
		let automaton: Automaton = resolve(&["a", "cba"]);
		let trie: &Trie = automaton.trie();

		let c: NodeIdx = trie.child(trie.root(), 'c').unwrap();
		let cb: NodeIdx = trie.child(c, 'b').unwrap();
		let cba: NodeIdx = trie.child(cb, 'a').unwrap();
		let a: NodeIdx = trie.child(trie.root(), 'a').unwrap();

		assert_eq!(automaton.suffix_link(cba), Some(a));
		assert_eq!(automaton.terminal_link(cba), Some(a));
		assert_eq!(automaton.nesting(cba), 2);
	}

	#[test]
	fn terminal_chains_strictly_decrease_in_depth() {
		let automaton: Automaton = resolve(&["a", "ba", "cba", "dcba", "b", "cb"]);
		let trie: &Trie = automaton.trie();

		let mut nodes: Vec<NodeIdx> = vec![trie.root()];
		let mut i: usize = 0;
		while i < nodes.len() {
			for (_, child) in trie[nodes[i]].children() {
				nodes.push(child);
			}
			i += 1;
		}
		assert_eq!(nodes.len(), trie.len());

		for &start in nodes.iter() {
			let mut node: NodeIdx = start;
			let mut depth: usize = trie[node].depth();
			while let Some(next) = automaton.terminal_link(node) {
				assert!(trie[next].depth() < depth);
				depth = trie[next].depth();
				node = next;
			}
		}
	}
}
