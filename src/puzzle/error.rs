use thiserror::Error;

use super::graph::NodeId;

/// Convenience alias for results using the puzzle error type.
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Errors raised while building a puzzle graph or session.
///
/// These are construction-time failures on static puzzle data. Wrong or empty
/// clicks during play are graded by the session and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuzzleError {
	/// Unknown node id.
	#[error("node {0} not found")]
	NotFound(NodeId),

	/// Edge endpoint was never added.
	#[error("edge {0}-{1} references a node that was never added")]
	InvalidEdge(NodeId, NodeId),

	/// Edge added twice.
	#[error("edge {0}-{1} already exists")]
	DuplicateEdge(NodeId, NodeId),

	/// Edge from a node to itself.
	#[error("self loop on node {0}")]
	SelfLoop(NodeId),

	/// Tries budget of zero.
	#[error("puzzle must allow at least one try")]
	NoTries,

	/// Pick radius that is not a positive finite number.
	#[error("pick radius must be a positive finite number, got {0}")]
	InvalidRadius(f64),
}
