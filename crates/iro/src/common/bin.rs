use std::io::Write;

pub trait BinWriter {
    fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()>;

    fn write(&self) -> std::io::Result<Vec<u8>> {
        let mut data = vec![];
        self.write_to(&mut data)?;
        Ok(data)
    }
}

pub trait BinReader<T> {
    fn read(data: &[u8]) -> std::io::Result<T>;
}
