use std::io::{Cursor, Error, ErrorKind};

use byteorder::{ReadBytesExt, LE};

use crate::{BinReader, Rgb555};

/// Reads raw little-endian RGB555 halfwords, as dumped from VRAM.
pub struct Rgb555Parser;

impl BinReader<Vec<Rgb555>> for Rgb555Parser {
    fn read(data: &[u8]) -> std::io::Result<Vec<Rgb555>> {
        if data.len() % 2 != 0 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("pixel data has an odd length of {} bytes", data.len()),
            ));
        }

        let mut words = vec![0u16; data.len() / 2];
        Cursor::new(data).read_u16_into::<LE>(&mut words)?;

        Ok(words.into_iter().map(Rgb555).collect())
    }
}
