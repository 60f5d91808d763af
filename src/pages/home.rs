use leptos::prelude::*;

use crate::components::bfs_canvas::{BfsCanvas, HUD_BOTTOM};
use crate::puzzle::PuzzleDefinition;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let puzzle = Signal::derive(PuzzleDefinition::reference);
	let overlay_style = format!("top: {}px;", HUD_BOTTOM + 10.0);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<BfsCanvas puzzle=puzzle fullscreen=true />
				<div class="graph-overlay" style=overlay_style>
					<h1>"BFS Guesser"</h1>
					<p class="subtitle">
						"Click the nodes in the order a breadth-first search from A would visit them."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
