use super::error::{PuzzleError, Result};
use super::graph::{Graph, NodeId, Point};

/// Where one node goes on the board.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
	/// Node id.
	pub id: NodeId,
	/// Board position.
	pub position: Point,
}

/// Static puzzle content: layout, edges, where the search starts and how many
/// wrong guesses the player gets.
#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleDefinition {
	/// Node layout.
	pub nodes: Vec<NodeSpec>,
	/// Undirected edges, each listed once.
	pub edges: Vec<(NodeId, NodeId)>,
	/// Where the search starts.
	pub start: NodeId,
	/// Wrong guesses allowed.
	pub tries: u32,
	/// Click distance that still counts as hitting a node.
	pub pick_radius: f64,
	/// Logical board size the node positions are laid out in.
	pub board: (f64, f64),
}

impl PuzzleDefinition {
	/// Nine-node puzzle: a ring around a centre bridge with a wing on each
	/// corner.
	pub fn reference() -> Self {
		let positions = [
			(400.0, 100.0), // start (top)
			(600.0, 300.0), // right
			(400.0, 500.0), // bottom
			(200.0, 300.0), // left
			(100.0, 150.0), // top left wing
			(700.0, 150.0), // top right wing
			(100.0, 450.0), // bottom left wing
			(700.0, 450.0), // bottom right wing
			(400.0, 300.0), // centre
		];
		let nodes = positions
			.into_iter()
			.enumerate()
			.map(|(id, (x, y))| NodeSpec {
				id,
				position: Point::new(x, y),
			})
			.collect();

		let edges = vec![
			// ring
			(0, 1),
			(1, 2),
			(2, 3),
			(3, 0),
			// centre bridge
			(0, 8),
			(2, 8),
			// wings
			(3, 4),
			(4, 6),
			(6, 2),
			(1, 5),
			(5, 7),
			(7, 2),
		];

		Self {
			nodes,
			edges,
			start: 0,
			tries: 10,
			pick_radius: 20.0,
			board: (1280.0, 720.0),
		}
	}

	/// Checks the settings that cannot be caught while building the graph.
	pub fn validate(&self) -> Result<()> {
		if self.tries == 0 {
			return Err(PuzzleError::NoTries);
		}
		if !(self.pick_radius.is_finite() && self.pick_radius > 0.0) {
			return Err(PuzzleError::InvalidRadius(self.pick_radius));
		}
		if !self.nodes.iter().any(|n| n.id == self.start) {
			return Err(PuzzleError::NotFound(self.start));
		}
		Ok(())
	}

	/// Adds every node, then every edge, stopping at the first bad entry.
	pub fn build_graph(&self) -> Result<Graph> {
		let mut graph = Graph::new();
		for spec in &self.nodes {
			graph.add_node(spec.id, spec.position);
		}
		for &(a, b) in &self.edges {
			graph.add_edge(a, b)?;
		}
		Ok(graph)
	}
}

impl Default for PuzzleDefinition {
	fn default() -> Self {
		Self::reference()
	}
}
