mod component;
mod render;
mod state;
mod timer;

pub use component::ConstellationCanvas;
