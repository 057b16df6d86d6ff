pub mod render;
pub mod symbols;
