mod rgb555;

pub use rgb555::*;
