use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{
	BACKGROUND, BfsCanvasState, EDGE_WIDTH, FONT_SIZE, NODE_RADIUS, OUTLINE, TEXT, state_color,
};
use crate::puzzle::{DisplayState, Outcome};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &BfsCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	if state.session.outcome() == Outcome::Lost {
		draw_answer(state, ctx);
	}
	draw_nodes(state, ctx);
	ctx.restore();
	draw_status(state, ctx);
}

fn draw_edges(state: &BfsCanvasState, ctx: &CanvasRenderingContext2d) {
	let graph = state.session.graph();
	ctx.set_line_width(EDGE_WIDTH);

	for (a, b) in graph.edges() {
		let (Some(n1), Some(n2)) = (graph.node(a), graph.node(b)) else {
			continue;
		};
		let (p1, p2) = (n1.position(), n2.position());
		ctx.set_stroke_style_str(state_color(graph.edge_state(a, b)));
		ctx.begin_path();
		ctx.move_to(p1.x, p1.y);
		ctx.line_to(p2.x, p2.y);
		ctx.stroke();
	}
}

/// Marching dashes over the discovery edges the player never reached.
fn draw_answer(state: &BfsCanvasState, ctx: &CanvasRenderingContext2d) {
	let graph = state.session.graph();
	let (dash, gap) = (10.0, 6.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_line_dash_offset(-(state.flow_time * 30.0) % (dash + gap));
	ctx.set_stroke_style_str("rgba(255, 214, 0, 0.9)");
	ctx.set_line_width(EDGE_WIDTH * 1.5);

	for (a, b) in state.session.remaining_answer_edges() {
		let (Some(n1), Some(n2)) = (graph.node(a), graph.node(b)) else {
			continue;
		};
		let (p1, p2) = (n1.position(), n2.position());
		ctx.begin_path();
		ctx.move_to(p1.x, p1.y);
		ctx.line_to(p2.x, p2.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &BfsCanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	let terminal = state.session.outcome().is_terminal();
	ctx.set_font(&format!("{}px sans-serif", FONT_SIZE));

	for node in state.session.graph().nodes() {
		let p = node.position();

		if !terminal && state.is_hovered(node.id()) && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, NODE_RADIUS + 6.0 * t, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", 0.35 * t));
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(state_color(node.state));
		ctx.fill();
		ctx.set_stroke_style_str(OUTLINE);
		ctx.set_line_width(if node.state == DisplayState::Neutral {
			1.0
		} else {
			2.0
		});
		ctx.stroke();

		let label = node.label();
		let width = ctx
			.measure_text(&label)
			.map(|m| m.width())
			.unwrap_or(FONT_SIZE / 2.0);
		ctx.set_fill_style_str(TEXT);
		let _ = ctx.fill_text(&label, p.x - width / 2.0, p.y + FONT_SIZE / 2.0 - 3.0);
	}
}

/// Counters in the top-left corner, drawn in screen space.
fn draw_status(state: &BfsCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(TEXT);
	ctx.set_font(&format!("{}px sans-serif", FONT_SIZE));
	for (line, y) in state.status_layout() {
		let _ = ctx.fill_text(&line, 10.0, y);
	}
}
