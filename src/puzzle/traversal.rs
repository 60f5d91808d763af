use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::trace;

use super::error::{PuzzleError, Result};
use super::graph::{Graph, NodeId, edge_key};

/// Answer key produced by a breadth-first traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversal {
	order: Vec<NodeId>,
	predecessor: BTreeMap<NodeId, Option<NodeId>>,
}

/// Breadth-first traversal from `start`, visiting neighbours in ascending id
/// order. Nodes unreachable from `start` are left out of the result.
pub fn traverse(graph: &Graph, start: NodeId) -> Result<Traversal> {
	if !graph.contains(start) {
		return Err(PuzzleError::NotFound(start));
	}

	let mut order = Vec::with_capacity(graph.len());
	let mut predecessor = BTreeMap::new();
	let mut visited = BTreeSet::from([start]);
	let mut queue = VecDeque::from([start]);
	predecessor.insert(start, None);

	while let Some(current) = queue.pop_front() {
		trace!("Visiting: {}", current);
		order.push(current);

		for nbr in graph.neighbors_of(current)? {
			if visited.insert(nbr) {
				predecessor.insert(nbr, Some(current));
				queue.push_back(nbr);
			}
		}
	}

	Ok(Traversal { order, predecessor })
}

impl Traversal {
	/// Visitation order, start first.
	pub fn order(&self) -> &[NodeId] {
		&self.order
	}

	/// Number of visited nodes.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Whether nothing was visited.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// The start node.
	pub fn start(&self) -> Option<NodeId> {
		self.order.first().copied()
	}

	/// Node expected at `index`.
	pub fn step(&self, index: usize) -> Option<NodeId> {
		self.order.get(index).copied()
	}

	/// Whether `id` was reached.
	pub fn contains(&self, id: NodeId) -> bool {
		self.predecessor.contains_key(&id)
	}

	/// Node that discovered `id`; `None` for the start and for unvisited ids.
	pub fn predecessor_of(&self, id: NodeId) -> Option<NodeId> {
		self.predecessor.get(&id).copied().flatten()
	}

	/// Full predecessor map; the start maps to `None`.
	pub fn predecessors(&self) -> &BTreeMap<NodeId, Option<NodeId>> {
		&self.predecessor
	}

	/// Discovery edges in visitation order, normalized low id first.
	pub fn tree_edges(&self) -> Vec<(NodeId, NodeId)> {
		self.order
			.iter()
			.filter_map(|&id| self.predecessor_of(id).map(|pred| edge_key(pred, id)))
			.collect()
	}

	/// Builds the BFS tree as its own graph: visited nodes at their original
	/// positions, joined only by discovery edges.
	pub fn to_tree(&self, graph: &Graph) -> Result<Graph> {
		let mut tree = Graph::new();
		for &id in &self.order {
			let node = graph.node(id).ok_or(PuzzleError::NotFound(id))?;
			tree.add_node(id, node.position());
			if let Some(parent) = self.predecessor_of(id) {
				tree.add_edge(parent, id)?;
			}
		}
		Ok(tree)
	}
}
