use std::collections::BTreeMap;

/// Prefix trie over the inserted patterns.
///
/// Nodes live in one arena and refer to each other by [`NodeIdx`];
/// parents own their child edges, nothing else owns anything.
#[derive(Debug)]
pub struct Trie {
	nodes: Vec<TrieNode>,
}

#[derive(Debug)]
pub struct TrieNode {
	idx: usize,
	depth: usize,
	is_terminal: bool,
	children: BTreeMap<char, NodeIdx>,
}

#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub struct NodeIdx(usize);

impl Trie {
	pub fn new() -> Self {
		let root: TrieNode = TrieNode {
			idx: 0,
			depth: 0,
			is_terminal: false,
			children: BTreeMap::new(),
		};
		Self { nodes: vec![root] }
	}

	/// Walks from the root, creating a node per missing character,
	/// and marks the final node terminal.
	/// An empty pattern marks the root itself.
	/// Inserting the same pattern twice changes nothing.
	pub fn insert(&mut self, pattern: &str) {
		let mut curr: NodeIdx = self.root();
		for ch in pattern.chars() {
			curr = match self[curr].children.get(&ch) {
				Some(&child) => child,
				None => {
					let depth: usize = self[curr].depth + 1;
					let child: NodeIdx = self.new_node(depth);
					self[curr].children.insert(ch, child);
					child
				},
			};
		}
		self[curr].is_terminal = true;
	}

	pub fn root(&self) -> NodeIdx {
		NodeIdx(0)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		// The root always exists; "empty" means no pattern characters.
		self.nodes.len() == 1
	}

	pub fn child(&self, node: NodeIdx, ch: char) -> Option<NodeIdx> {
		self[node].children.get(&ch).copied()
	}

	fn new_node(&mut self, depth: usize) -> NodeIdx {
		let n: usize = self.nodes.len();
		self.nodes.push(TrieNode {
			idx: n,
			depth,
			is_terminal: false,
			children: BTreeMap::new(),
		});
		NodeIdx(n)
	}
}

impl TrieNode {
	pub fn is_terminal(&self) -> bool {
		self.is_terminal
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	pub fn children(&self) -> impl Iterator<Item = (char, NodeIdx)> + '_ {
		self.children.iter().map(|(&ch, &child)| (ch, child))
	}
}

impl NodeIdx {
	pub fn is_root(&self) -> bool {
		self.0 == 0
	}

	pub(crate) fn index(self) -> usize {
		self.0
	}
}

impl std::ops::Index<NodeIdx> for Trie {
	type Output = TrieNode;

	fn index(&self, i: NodeIdx) -> &Self::Output {
		&self.nodes[i.0]
	}
}

impl std::ops::IndexMut<NodeIdx> for Trie {
	fn index_mut(&mut self, i: NodeIdx) -> &mut Self::Output {
		&mut self.nodes[i.0]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn stuff() {
		let mut trie: Trie = Trie::new();
		trie.insert("ab");
		trie.insert("ac");
		// root, a, b, c
		assert_eq!(trie.len(), 4);

		let root: NodeIdx = trie.root();
		let a: NodeIdx = trie.child(root, 'a').unwrap();
		let b: NodeIdx = trie.child(a, 'b').unwrap();
		let c: NodeIdx = trie.child(a, 'c').unwrap();

		assert!(!trie[root].is_terminal());
		assert!(!trie[a].is_terminal());
		assert!(trie[b].is_terminal());
		assert!(trie[c].is_terminal());

		assert_eq!(trie[a].depth(), 1);
		assert_eq!(trie[b].depth(), 2);
		assert_eq!(trie.child(root, 'b'), None);
	}

	#[test]
	fn shared_prefixes_share_nodes() {
		let mut trie: Trie = Trie::new();
		trie.insert("abc");
		trie.insert("ab");
		trie.insert("a");
		// root + a + b + c, no duplicates
		assert_eq!(trie.len(), 4);

		let a: NodeIdx = trie.child(trie.root(), 'a').unwrap();
		assert!(trie[a].is_terminal());
		assert_eq!(trie[a].children().count(), 1);
	}

	#[test]
	fn repeated_insert_is_a_noop() {
		let mut trie: Trie = Trie::new();
		trie.insert("xyz");
		let len: usize = trie.len();
		trie.insert("xyz");
		assert_eq!(trie.len(), len);
	}

	#[test]
	fn empty_pattern_marks_root() {
		let mut trie: Trie = Trie::new();
		trie.insert("");
		assert_eq!(trie.len(), 1);
		assert!(trie[trie.root()].is_terminal());
	}
}
