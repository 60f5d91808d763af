//! Puzzle core: graph model, breadth-first answer key and grading.
//!
//! Nothing in here knows about the canvas. The front-end feeds picks into a
//! [`GameSession`] and reads node, edge and counter state back out to draw.

mod definition;
mod error;
mod graph;
mod session;
mod traversal;

pub use definition::{NodeSpec, PuzzleDefinition};
pub use error::{PuzzleError, Result};
pub use graph::{DisplayState, Graph, Node, NodeId, Point, edge_key};
pub use session::{GameSession, Guess, Outcome};
pub use traversal::{Traversal, traverse};
