use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::warn;

use super::error::{PuzzleError, Result};

/// Dense node identifier, starting at 0.
pub type NodeId = usize;

/// Highlight applied to a node or an edge while grading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayState {
	/// Not graded yet.
	#[default]
	Neutral,
	/// Picked at the right step.
	Correct,
	/// Picked out of order.
	Incorrect,
}

/// Position on the puzzle board.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal board coordinate.
	pub x: f64,
	/// Vertical board coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Creates a point from board coordinates.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(&self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A graph node with a fixed position and a mutable highlight.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	id: NodeId,
	position: Point,
	/// Current highlight.
	pub state: DisplayState,
}

impl Node {
	/// The node's id.
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Where the node sits on the board.
	pub fn position(&self) -> Point {
		self.position
	}

	/// Letter label (`A` for node 0); ids past `Z` fall back to the number.
	pub fn label(&self) -> String {
		match u8::try_from(self.id) {
			Ok(n) if n < 26 => char::from(b'A' + n).to_string(),
			_ => self.id.to_string(),
		}
	}
}

/// Unordered edge key, lower id first.
pub fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
	(a.min(b), a.max(b))
}

/// Undirected graph with ascending neighbour order.
///
/// Nodes and adjacency live in ordered maps so every iteration (hit testing,
/// BFS fan-out, edge listing) is by ascending id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: BTreeMap<NodeId, Node>,
	adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
	edge_states: BTreeMap<(NodeId, NodeId), DisplayState>,
}

impl Graph {
	/// Empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a neutral node with no neighbours.
	///
	/// Re-adding an id replaces its position and clears the highlights on the
	/// node and on its incident edges. Edges themselves are kept.
	pub fn add_node(&mut self, id: NodeId, position: Point) {
		let node = Node {
			id,
			position,
			state: DisplayState::Neutral,
		};
		if self.nodes.insert(id, node).is_some() {
			warn!("node {} added twice, keeping the latest position", id);
			self.edge_states.retain(|&(a, b), _| a != id && b != id);
		}
		self.adjacency.entry(id).or_default();
	}

	/// Connects `a` and `b` in both directions.
	pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<()> {
		if !self.contains(a) || !self.contains(b) {
			return Err(PuzzleError::InvalidEdge(a, b));
		}
		if a == b {
			return Err(PuzzleError::SelfLoop(a));
		}
		if self.has_edge(a, b) {
			return Err(PuzzleError::DuplicateEdge(a, b));
		}
		self.adjacency.entry(a).or_default().insert(b);
		self.adjacency.entry(b).or_default().insert(a);
		Ok(())
	}

	/// Copy of the neighbour list of `id`, ascending.
	pub fn neighbors_of(&self, id: NodeId) -> Result<Vec<NodeId>> {
		self.adjacency
			.get(&id)
			.map(|nbrs| nbrs.iter().copied().collect())
			.ok_or(PuzzleError::NotFound(id))
	}

	/// Whether `id` was added.
	pub fn contains(&self, id: NodeId) -> bool {
		self.nodes.contains_key(&id)
	}

	/// Whether `a` and `b` are adjacent.
	pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
		self.adjacency
			.get(&a)
			.is_some_and(|nbrs| nbrs.contains(&b))
	}

	/// Looks up a node.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(&id)
	}

	/// All nodes by ascending id.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.values()
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Every undirected edge once, as `(low, high)` in ascending order.
	pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
		self.adjacency.iter().flat_map(|(&a, nbrs)| {
			nbrs.range(a + 1..).map(move |&b| (a, b))
		})
	}

	/// Number of undirected edges.
	pub fn edge_count(&self) -> usize {
		self.edges().count()
	}

	/// Sets a node highlight; unknown ids are ignored.
	pub fn set_node_state(&mut self, id: NodeId, state: DisplayState) {
		if let Some(node) = self.nodes.get_mut(&id) {
			node.state = state;
		}
	}

	/// Sets an edge highlight; pairs that are not edges are ignored.
	pub fn set_edge_state(&mut self, a: NodeId, b: NodeId, state: DisplayState) {
		if self.has_edge(a, b) {
			self.edge_states.insert(edge_key(a, b), state);
		}
	}

	/// Highlight of the edge between `a` and `b`, neutral if never set.
	pub fn edge_state(&self, a: NodeId, b: NodeId) -> DisplayState {
		self.edge_states
			.get(&edge_key(a, b))
			.copied()
			.unwrap_or_default()
	}

	/// Drops every node and edge highlight back to neutral.
	pub fn reset_states(&mut self) {
		for node in self.nodes.values_mut() {
			node.state = DisplayState::Neutral;
		}
		self.edge_states.clear();
	}

	/// First node (by ascending id) whose centre is within `radius` of `point`.
	pub fn hit_test(&self, point: Point, radius: f64) -> Option<NodeId> {
		self.nodes
			.values()
			.find(|node| node.position.distance(point) <= radius)
			.map(|node| node.id)
	}
}

impl fmt::Display for Graph {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (id, nbrs) in &self.adjacency {
			let list: Vec<String> = nbrs.iter().map(ToString::to_string).collect();
			writeln!(f, "Node {} -> {}", id, list.join(", "))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn square() -> Graph {
		let mut g = Graph::new();
		for (id, (x, y)) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]
			.into_iter()
			.enumerate()
		{
			g.add_node(id, Point::new(x, y));
		}
		for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
			g.add_edge(a, b).unwrap();
		}
		g
	}

	#[test]
	fn neighbours_are_sorted_regardless_of_insertion_order() {
		let mut g = Graph::new();
		for id in 0..5 {
			g.add_node(id, Point::default());
		}
		g.add_edge(0, 4).unwrap();
		g.add_edge(2, 0).unwrap();
		g.add_edge(0, 1).unwrap();
		g.add_edge(3, 0).unwrap();
		assert_eq!(g.neighbors_of(0).unwrap(), vec![1, 2, 3, 4]);
		assert_eq!(g.neighbors_of(4).unwrap(), vec![0]);
	}

	#[test]
	fn neighbors_of_unknown_node_is_not_found() {
		let g = square();
		assert_eq!(g.neighbors_of(9), Err(PuzzleError::NotFound(9)));
	}

	#[test]
	fn edge_to_missing_node_is_rejected() {
		let mut g = square();
		assert_eq!(g.add_edge(0, 7), Err(PuzzleError::InvalidEdge(0, 7)));
		assert_eq!(g.add_edge(7, 0), Err(PuzzleError::InvalidEdge(7, 0)));
		assert!(!g.contains(7));
		assert_eq!(g.neighbors_of(0).unwrap(), vec![1, 3]);
	}

	#[test]
	fn duplicate_edge_is_rejected_and_adjacency_untouched() {
		let mut g = square();
		assert_eq!(g.add_edge(1, 0), Err(PuzzleError::DuplicateEdge(1, 0)));
		assert_eq!(g.neighbors_of(0).unwrap(), vec![1, 3]);
		assert_eq!(g.neighbors_of(1).unwrap(), vec![0, 2]);
		assert_eq!(g.edge_count(), 4);
	}

	#[test]
	fn self_loop_is_rejected() {
		let mut g = square();
		assert_eq!(g.add_edge(2, 2), Err(PuzzleError::SelfLoop(2)));
	}

	#[test]
	fn readding_a_node_keeps_its_edges() {
		let mut g = square();
		g.set_node_state(1, DisplayState::Correct);
		g.add_node(1, Point::new(50.0, 50.0));
		let node = g.node(1).unwrap();
		assert_eq!(node.position(), Point::new(50.0, 50.0));
		assert_eq!(node.state, DisplayState::Neutral);
		assert_eq!(g.neighbors_of(1).unwrap(), vec![0, 2]);
	}

	#[test]
	fn readding_a_node_clears_its_edge_highlights() {
		let mut g = square();
		g.set_edge_state(0, 1, DisplayState::Correct);
		g.set_edge_state(2, 3, DisplayState::Correct);
		g.add_node(1, Point::new(50.0, 50.0));
		assert_eq!(g.edge_state(0, 1), DisplayState::Neutral);
		assert_eq!(g.edge_state(2, 3), DisplayState::Correct);
		assert!(g.has_edge(1, 0));
	}

	#[test]
	fn edges_are_listed_once_normalized() {
		let g = square();
		let edges: Vec<_> = g.edges().collect();
		assert_eq!(edges, vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
	}

	#[test]
	fn edge_state_is_keyed_by_unordered_pair() {
		let mut g = square();
		g.set_edge_state(3, 0, DisplayState::Correct);
		assert_eq!(g.edge_state(0, 3), DisplayState::Correct);
		assert_eq!(g.edge_state(3, 0), DisplayState::Correct);
		assert_eq!(g.edge_state(0, 1), DisplayState::Neutral);
	}

	#[test]
	fn state_setters_ignore_unknown_targets() {
		let mut g = square();
		g.set_node_state(42, DisplayState::Incorrect);
		g.set_edge_state(0, 2, DisplayState::Correct);
		assert!(g.nodes().all(|n| n.state == DisplayState::Neutral));
		assert_eq!(g.edge_state(0, 2), DisplayState::Neutral);
	}

	#[test]
	fn reset_clears_highlights() {
		let mut g = square();
		g.set_node_state(0, DisplayState::Correct);
		g.set_node_state(2, DisplayState::Incorrect);
		g.set_edge_state(0, 1, DisplayState::Correct);
		g.reset_states();
		assert!(g.nodes().all(|n| n.state == DisplayState::Neutral));
		assert_eq!(g.edge_state(0, 1), DisplayState::Neutral);
	}

	#[test]
	fn hit_test_picks_within_radius() {
		let g = square();
		assert_eq!(g.hit_test(Point::new(95.0, 103.0), 20.0), Some(2));
		assert_eq!(g.hit_test(Point::new(120.0, 0.0), 20.0), Some(1));
		assert_eq!(g.hit_test(Point::new(50.0, 50.0), 20.0), None);
	}

	#[test]
	fn overlapping_hit_returns_lowest_id() {
		let mut g = Graph::new();
		g.add_node(3, Point::new(10.0, 0.0));
		g.add_node(1, Point::new(0.0, 0.0));
		assert_eq!(g.hit_test(Point::new(5.0, 0.0), 20.0), Some(1));
	}

	#[test]
	fn labels_are_letters() {
		let mut g = Graph::new();
		g.add_node(0, Point::default());
		g.add_node(8, Point::default());
		g.add_node(30, Point::default());
		assert_eq!(g.node(0).unwrap().label(), "A");
		assert_eq!(g.node(8).unwrap().label(), "I");
		assert_eq!(g.node(30).unwrap().label(), "30");
	}

	#[test]
	fn display_lists_adjacency() {
		let g = square();
		assert_eq!(
			g.to_string(),
			"Node 0 -> 1, 3\nNode 1 -> 0, 2\nNode 2 -> 1, 3\nNode 3 -> 0, 2\n"
		);
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(64))]

		#[test]
		fn prop_adjacency_symmetric_and_sorted(
			n in 1usize..12,
			pairs in prop::collection::vec((0usize..12, 0usize..12), 0..40)
		) {
			let mut g = Graph::new();
			for id in 0..n {
				g.add_node(id, Point::default());
			}
			let mut added = Vec::new();
			for (a, b) in pairs {
				if g.add_edge(a, b).is_ok() {
					added.push((a, b));
				}
			}
			for (a, b) in added {
				prop_assert!(g.neighbors_of(a).unwrap().contains(&b));
				prop_assert!(g.neighbors_of(b).unwrap().contains(&a));
			}
			for id in 0..n {
				let nbrs = g.neighbors_of(id).unwrap();
				prop_assert!(nbrs.windows(2).all(|w| w[0] < w[1]));
			}
		}
	}
}
