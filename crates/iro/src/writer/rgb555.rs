use std::io::Write;

use byteorder::{WriteBytesExt, LE};

use crate::{BinWriter, Rgb555};

pub struct Rgb555Writer<'a> {
    pixels: &'a [Rgb555],
}

impl<'a> Rgb555Writer<'a> {
    pub fn new(pixels: &'a [Rgb555]) -> Self {
        Self { pixels }
    }
}

impl BinWriter for Rgb555Writer<'_> {
    fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for pixel in self.pixels {
            w.write_u16::<LE>(pixel.0)?;
        }

        Ok(())
    }
}
