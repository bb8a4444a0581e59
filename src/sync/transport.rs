//! Transport boundary — where drained batches leave the process.
//!
//! Delivery guarantees belong to whatever sits behind the trait; the
//! scheduler hands each batch over exactly once and never retries.

use std::io::{self, Write};

use thiserror::Error;

use crate::types::Batch;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode batch: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write batch: {0}")]
    Io(#[from] io::Error),
}

pub trait Transport {
    fn send(&mut self, batch: &Batch) -> Result<(), TransportError>;
}

/// Writes each batch as one compact JSON array per line.
pub struct JsonLines<W: Write> {
    out: W,
}

impl<W: Write> JsonLines<W> {
    pub fn new(out: W) -> Self {
        JsonLines { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Transport for JsonLines<W> {
    fn send(&mut self, batch: &Batch) -> Result<(), TransportError> {
        let mut line = serde_json::to_vec(batch)?;
        line.push(b'\n');
        self.out.write_all(&line)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps delivered batches in memory.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    pub batches: Vec<Batch>,
}

impl Transport for MemoryTransport {
    fn send(&mut self, batch: &Batch) -> Result<(), TransportError> {
        self.batches.push(batch.clone());
        Ok(())
    }
}

/// Parse a JSON-lines batch log, skipping blank lines.
pub fn read_json_lines(text: &str) -> Result<Vec<Batch>, serde_json::Error> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PixelGroup};

    fn batch(color: &str, pixels: Vec<[i32; 2]>) -> Batch {
        Batch(vec![PixelGroup {
            color: Color::from(color),
            pixels,
        }])
    }

    #[test]
    fn json_lines_writes_one_batch_per_line() {
        let mut transport = JsonLines::new(Vec::new());
        transport.send(&batch("#f00", vec![[0, 0]])).unwrap();
        transport.send(&batch("#0f0", vec![[1, 2], [3, 4]])).unwrap();

        let text = String::from_utf8(transport.into_inner()).unwrap();
        assert_eq!(
            text,
            "[{\"color\":\"#f00\",\"pixels\":[[0,0]]}]\n[{\"color\":\"#0f0\",\"pixels\":[[1,2],[3,4]]}]\n"
        );

        let parsed = read_json_lines(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].cell_count(), 2);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_surfaces_as_error() {
        let mut transport = JsonLines::new(Broken);
        let err = transport.send(&batch("#fff", vec![[0, 0]])).unwrap_err();
        assert!(matches!(err, TransportError::Io(_)), "got {err}");
    }

    #[test]
    fn read_json_lines_rejects_garbage() {
        assert!(read_json_lines("[]\nnot json\n").is_err());
        assert_eq!(read_json_lines("\n[]\n\n").unwrap().len(), 1);
    }
}
