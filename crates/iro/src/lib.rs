mod common;
mod error;
pub mod parser;
pub mod raster;
mod rgb555;
pub mod util;
pub mod writer;

pub use common::bin::*;
pub use common::color;
pub use error::Error;
pub use parser::*;
pub use raster::{export_png, rasterize};
pub use rgb555::*;
pub use util::normalize;
pub use writer::*;
