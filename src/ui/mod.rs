pub mod renderer;

pub use renderer::{BoardRenderer, Glyphs};
