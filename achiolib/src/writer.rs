//! Запись дерева на провод: строки по 94 байта, LF, блоки по десять строк.

use std::io::Write;

use crate::error::Result;
use crate::file::File;

pub struct Writer<W: Write> {
    output: W,
}

impl<W: Write> Writer<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Сериализует файл построчно, без буферизации всего содержимого,
    /// и добивает последний блок строками из девяток.
    pub fn write(&mut self, file: &File) -> Result<()> {
        let mut lines = 0usize;
        writeln!(self.output, "{}", file.header)?;
        lines += 1;
        for batch in &file.batches {
            writeln!(self.output, "{}", batch.header)?;
            lines += 1;
            for entry in &batch.entries {
                writeln!(self.output, "{}", entry)?;
                lines += 1;
                for addenda in &entry.addenda {
                    writeln!(self.output, "{}", addenda)?;
                    lines += 1;
                }
            }
            writeln!(self.output, "{}", batch.control)?;
            lines += 1;
        }
        writeln!(self.output, "{}", file.control)?;
        lines += 1;

        let filler = "9".repeat(94);
        while lines % 10 != 0 {
            writeln!(self.output, "{filler}")?;
            lines += 1;
        }
        self.output.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}
