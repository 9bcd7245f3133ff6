pub mod bin;
pub mod color;
