use log::debug;

use crate::puzzle::{DisplayState, GameSession, Guess, NodeId, Point, PuzzleDefinition, Result};

pub const NODE_RADIUS: f64 = 20.0;
pub const EDGE_WIDTH: f64 = 2.0;
pub const FONT_SIZE: f64 = 20.0;
/// Lowest screen row the status text may reach. The home page overlay starts
/// below this.
pub const HUD_BOTTOM: f64 = 120.0;
const HUD_LINE: f64 = 25.0;

pub const BACKGROUND: &str = "rgb(230, 99, 102)";
pub const OUTLINE: &str = "black";
pub const TEXT: &str = "black";

pub fn state_color(state: DisplayState) -> &'static str {
	match state {
		DisplayState::Neutral => "rgb(130, 130, 130)",
		DisplayState::Correct => "rgb(0, 228, 48)",
		DisplayState::Incorrect => "rgb(230, 41, 55)",
	}
}

/// Uniform scale and offset fitting the puzzle board into the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub fn fit(board: (f64, f64), width: f64, height: f64) -> Self {
		let k = (width / board.0).min(height / board.1);
		Self {
			x: (width - board.0 * k) / 2.0,
			y: (height - board.1 * k) / 2.0,
			k,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub highlight_t: f64,
	pub prev_node: Option<NodeId>,
}

pub struct BfsCanvasState {
	pub session: GameSession,
	pub transform: ViewTransform,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	board: (f64, f64),
}

impl BfsCanvasState {
	pub fn new(puzzle: &PuzzleDefinition, width: f64, height: f64) -> Result<Self> {
		let session = GameSession::new(puzzle)?;
		Ok(Self {
			session,
			transform: ViewTransform::fit(puzzle.board, width, height),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
			board: puzzle.board,
		})
	}

	pub fn screen_to_board(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let point = self.screen_to_board(sx, sy);
		self.session
			.graph()
			.hit_test(point, self.session.pick_radius())
	}

	/// Grades a click at screen coordinates.
	pub fn click(&mut self, sx: f64, sy: f64) -> Guess {
		let point = self.screen_to_board(sx, sy);
		let guess = self.session.pick(point);
		if guess != Guess::Ignored {
			debug!("click at ({:.0}, {:.0}) -> {:?}", point.x, point.y, guess);
		}
		guess
	}

	/// Status lines with their text baselines in screen space.
	pub fn status_layout(&self) -> Vec<(String, f64)> {
		let mut y = 10.0 + FONT_SIZE;
		let mut placed = Vec::new();
		for (i, line) in self.session.status_lines().into_iter().enumerate() {
			// outcome banner sits a line further down
			if i == 2 {
				y += HUD_LINE;
			}
			placed.push((line, y));
			y += HUD_LINE;
		}
		placed
	}

	pub fn restart(&mut self) {
		self.session.restart();
		self.flow_time = 0.0;
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover.node == node {
			return;
		}
		// Keep the old node around while its ring fades out
		if node.is_none() {
			self.hover.prev_node = self.hover.node.take();
		} else {
			self.hover.prev_node = None;
		}
		self.hover.node = node;
	}

	pub fn is_hovered(&self, id: NodeId) -> bool {
		self.hover.node == Some(id) || self.hover.prev_node == Some(id)
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;

		let (target, speed) = if self.hover.node.is_some() {
			(1.0, 8.0)
		} else {
			(0.0, 6.0)
		};
		self.hover.highlight_t += (target - self.hover.highlight_t) * (speed * dt).min(1.0);
		if self.hover.node.is_none() && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
			self.hover.prev_node = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.transform = ViewTransform::fit(self.board, width, height);
	}
}
