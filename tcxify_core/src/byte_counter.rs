use std::io::Write;

/// A Write adapter that keeps track of how many bytes have gone through it,
/// so we can report the size of a file without asking the filesystem.
pub struct ByteCounter<W> {
    inner: W,
    count: usize,
}

impl<W: Write> ByteCounter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    pub fn bytes_written(&self) -> usize {
        self.count
    }
}

impl<W: Write> Write for ByteCounter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bytes() {
        let mut w = ByteCounter::new(Vec::new());
        write!(w, "<Trackpoint>").unwrap();
        writeln!(w, "</Trackpoint>").unwrap();
        assert_eq!(w.bytes_written(), 26);
    }
}
