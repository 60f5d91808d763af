use log::{debug, info};

use super::definition::PuzzleDefinition;
use super::error::Result;
use super::graph::{DisplayState, Graph, NodeId, Point};
use super::traversal::{Traversal, traverse};

/// Where a session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
	/// Still accepting picks.
	#[default]
	InProgress,
	/// Every reachable node was picked in order.
	Won,
	/// Tries ran out.
	Lost,
}

impl Outcome {
	/// Whether the session has ended.
	pub fn is_terminal(self) -> bool {
		self != Outcome::InProgress
	}
}

/// What a single submitted pick did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guess {
	/// Empty-space click, or the session had already ended.
	Ignored,
	/// The expected node was picked.
	Correct(NodeId),
	/// Some other node was picked.
	Incorrect {
		/// Node under the click.
		picked: NodeId,
		/// Node the key wanted.
		expected: NodeId,
	},
}

/// One play-through of a puzzle: the graph being coloured in, its answer key,
/// and the grading counters.
#[derive(Clone, Debug)]
pub struct GameSession {
	graph: Graph,
	key: Traversal,
	pick_radius: f64,
	tries_budget: u32,
	step_index: usize,
	tries_remaining: u32,
	outcome: Outcome,
}

impl GameSession {
	/// Builds the graph and runs the traversal once.
	pub fn new(definition: &PuzzleDefinition) -> Result<Self> {
		definition.validate()?;
		let graph = definition.build_graph()?;
		debug!("Graph structure:\n{}", graph);

		let key = traverse(&graph, definition.start)?;
		debug!("Answer key: {:?}", key.order());

		Ok(Self {
			graph,
			key,
			pick_radius: definition.pick_radius,
			tries_budget: definition.tries,
			step_index: 0,
			tries_remaining: definition.tries,
			outcome: Outcome::InProgress,
		})
	}

	/// Hit-tests `point` against the board and grades whatever was under it.
	pub fn pick(&mut self, point: Point) -> Guess {
		let picked = self.graph.hit_test(point, self.pick_radius);
		self.submit_guess(picked)
	}

	/// Grades one pick against the answer key.
	pub fn submit_guess(&mut self, picked: Option<NodeId>) -> Guess {
		if self.outcome.is_terminal() {
			return Guess::Ignored;
		}
		let (Some(picked), Some(expected)) = (picked, self.key.step(self.step_index)) else {
			return Guess::Ignored;
		};

		let guess = if picked == expected {
			self.graph.set_node_state(picked, DisplayState::Correct);
			if let Some(pred) = self.key.predecessor_of(picked) {
				self.graph
					.set_edge_state(pred, picked, DisplayState::Correct);
			}
			self.step_index += 1;
			Guess::Correct(picked)
		} else {
			self.graph.set_node_state(picked, DisplayState::Incorrect);
			self.tries_remaining = self.tries_remaining.saturating_sub(1);
			Guess::Incorrect { picked, expected }
		};
		debug!(
			"{:?}: step {}/{}, {} tries left",
			guess,
			self.step_index,
			self.key.len(),
			self.tries_remaining
		);

		if self.step_index >= self.key.len() {
			self.outcome = Outcome::Won;
			info!("Puzzle solved with {} tries left", self.tries_remaining);
		} else if self.tries_remaining == 0 {
			self.outcome = Outcome::Lost;
			info!("Out of tries at step {}", self.step_index);
		}
		guess
	}

	/// Starts over on the same puzzle. The answer key is reused.
	pub fn restart(&mut self) {
		self.graph.reset_states();
		self.step_index = 0;
		self.tries_remaining = self.tries_budget;
		self.outcome = Outcome::InProgress;
	}

	/// The graph with its current highlights.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Answer key.
	pub fn key(&self) -> &Traversal {
		&self.key
	}

	/// Number of nodes found so far.
	pub fn step_index(&self) -> usize {
		self.step_index
	}

	/// Wrong guesses still allowed.
	pub fn tries_remaining(&self) -> u32 {
		self.tries_remaining
	}

	/// Current outcome.
	pub fn outcome(&self) -> Outcome {
		self.outcome
	}

	/// Click radius used by [`GameSession::pick`].
	pub fn pick_radius(&self) -> f64 {
		self.pick_radius
	}

	/// Discovery edges the player has not confirmed yet.
	pub fn remaining_answer_edges(&self) -> Vec<(NodeId, NodeId)> {
		self.key
			.tree_edges()
			.into_iter()
			.filter(|&(a, b)| self.graph.edge_state(a, b) != DisplayState::Correct)
			.collect()
	}

	/// On-screen counters, plus the outcome banner once the session ends.
	pub fn status_lines(&self) -> Vec<String> {
		let mut lines = vec![
			format!("Tries left: {}", self.tries_remaining),
			format!("Step: {} out of {}", self.step_index, self.key.len()),
		];
		match self.outcome {
			Outcome::Lost => lines.push("Game Over:(".to_string()),
			Outcome::Won => lines.push("Congratulations you have won!".to_string()),
			Outcome::InProgress => {}
		}
		lines
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ANSWER: [NodeId; 9] = [0, 1, 3, 8, 2, 5, 4, 6, 7];

	fn session() -> GameSession {
		GameSession::new(&PuzzleDefinition::reference()).unwrap()
	}

	#[test]
	fn starts_in_progress() {
		let s = session();
		assert_eq!(s.step_index(), 0);
		assert_eq!(s.tries_remaining(), 10);
		assert_eq!(s.outcome(), Outcome::InProgress);
		assert_eq!(s.key().order(), &ANSWER);
	}

	#[test]
	fn correct_guess_advances_and_colours_discovery_edge() {
		let mut s = session();
		assert_eq!(s.submit_guess(Some(0)), Guess::Correct(0));
		assert_eq!(s.submit_guess(Some(1)), Guess::Correct(1));
		assert_eq!(s.step_index(), 2);
		assert_eq!(s.tries_remaining(), 10);
		assert_eq!(s.graph().node(1).unwrap().state, DisplayState::Correct);
		assert_eq!(s.graph().edge_state(1, 0), DisplayState::Correct);
		assert_eq!(s.graph().edge_state(1, 2), DisplayState::Neutral);
	}

	#[test]
	fn wrong_guess_costs_one_try() {
		let mut s = session();
		assert_eq!(
			s.submit_guess(Some(2)),
			Guess::Incorrect {
				picked: 2,
				expected: 0
			}
		);
		assert_eq!(s.step_index(), 0);
		assert_eq!(s.tries_remaining(), 9);
		assert_eq!(s.graph().node(2).unwrap().state, DisplayState::Incorrect);
	}

	#[test]
	fn reclicking_a_solved_node_marks_it_incorrect() {
		let mut s = session();
		s.submit_guess(Some(0));
		assert!(matches!(s.submit_guess(Some(0)), Guess::Incorrect { .. }));
		assert_eq!(s.graph().node(0).unwrap().state, DisplayState::Incorrect);
		assert_eq!(s.step_index(), 1);
	}

	#[test]
	fn empty_click_is_ignored() {
		let mut s = session();
		assert_eq!(s.submit_guess(None), Guess::Ignored);
		assert_eq!(s.pick(Point::new(1000.0, 700.0)), Guess::Ignored);
		assert_eq!(s.tries_remaining(), 10);
		assert_eq!(s.step_index(), 0);
	}

	#[test]
	fn pick_grades_node_under_the_cursor() {
		let mut s = session();
		assert_eq!(s.pick(Point::new(410.0, 95.0)), Guess::Correct(0));
		// just outside the 20px radius of node 1 at (600, 300)
		assert_eq!(s.pick(Point::new(621.0, 300.0)), Guess::Ignored);
		assert_eq!(s.pick(Point::new(600.0, 320.0)), Guess::Correct(1));
	}

	#[test]
	fn full_answer_wins() {
		let mut s = session();
		for id in ANSWER {
			s.submit_guess(Some(id));
		}
		assert_eq!(s.outcome(), Outcome::Won);
		assert_eq!(s.step_index(), ANSWER.len());
		assert!(s.remaining_answer_edges().is_empty());
		assert_eq!(
			s.status_lines().last().map(String::as_str),
			Some("Congratulations you have won!")
		);

		assert_eq!(s.submit_guess(Some(0)), Guess::Ignored);
		assert_eq!(s.step_index(), ANSWER.len());
		assert_eq!(s.tries_remaining(), 10);
		assert_eq!(s.outcome(), Outcome::Won);
		assert_eq!(s.graph().node(0).unwrap().state, DisplayState::Correct);
	}

	#[test]
	fn win_ignores_spent_tries() {
		let mut s = session();
		for _ in 0..9 {
			s.submit_guess(Some(8));
		}
		assert_eq!(s.tries_remaining(), 1);
		for id in ANSWER {
			s.submit_guess(Some(id));
		}
		assert_eq!(s.outcome(), Outcome::Won);
		assert_eq!(s.tries_remaining(), 1);
	}

	#[test]
	fn running_out_of_tries_loses_and_freezes() {
		let mut s = session();
		s.submit_guess(Some(0));
		for _ in 0..10 {
			s.submit_guess(Some(7));
		}
		assert_eq!(s.outcome(), Outcome::Lost);
		assert_eq!(s.tries_remaining(), 0);

		assert_eq!(s.submit_guess(Some(1)), Guess::Ignored);
		assert_eq!(s.step_index(), 1);
		assert_eq!(s.tries_remaining(), 0);
		assert_eq!(s.outcome(), Outcome::Lost);
		assert_eq!(s.remaining_answer_edges().len(), ANSWER.len() - 1);
		assert_eq!(s.status_lines()[2], "Game Over:(");
	}

	#[test]
	fn status_lines_report_progress() {
		let mut s = session();
		s.submit_guess(Some(0));
		s.submit_guess(Some(5));
		assert_eq!(s.status_lines(), vec!["Tries left: 9", "Step: 1 out of 9"]);
	}

	#[test]
	fn restart_resets_counters_and_highlights() {
		let mut s = session();
		s.submit_guess(Some(0));
		s.submit_guess(Some(1));
		s.submit_guess(Some(6));
		let key = s.key().clone();

		s.restart();
		assert_eq!(s.step_index(), 0);
		assert_eq!(s.tries_remaining(), 10);
		assert_eq!(s.outcome(), Outcome::InProgress);
		assert!(s.graph().nodes().all(|n| n.state == DisplayState::Neutral));
		assert_eq!(s.graph().edge_state(0, 1), DisplayState::Neutral);
		assert_eq!(s.key(), &key);
	}

	#[test]
	fn unreachable_nodes_do_not_count_toward_the_win() {
		let mut def = PuzzleDefinition::reference();
		def.nodes.push(crate::puzzle::definition::NodeSpec {
			id: 9,
			position: Point::new(1000.0, 600.0),
		});
		let mut s = GameSession::new(&def).unwrap();
		assert_eq!(s.key().len(), 9);
		for id in ANSWER {
			s.submit_guess(Some(id));
		}
		assert_eq!(s.outcome(), Outcome::Won);
	}

	#[test]
	fn invalid_definition_fails_construction() {
		let mut def = PuzzleDefinition::reference();
		def.tries = 0;
		assert!(GameSession::new(&def).is_err());
	}
}
