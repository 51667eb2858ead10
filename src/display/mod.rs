pub mod input;
pub mod panel;
pub mod renderer;
pub mod theme;
