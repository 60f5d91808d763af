mod component;
mod render;
mod state;

pub use component::BfsCanvas;
pub use state::HUD_BOTTOM;
