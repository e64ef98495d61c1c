use std::io::{self, BufRead, BufReader, Read};

/// Size of the buffer lines are read through unless told otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 10 * 1024 * 1024;

/// Iterator over the raw lines of a reader.
///
/// Each line keeps its trailing delimiter (`\n` unless set with
/// `delimiter`). The last line has none if the input does not end in one.
/// Invalid UTF-8 surfaces as an `InvalidData` error.
pub struct LineReader<R> {
    reader: BufReader<R>,
    delimiter: u8,
    line_count: usize,
}

impl<R> LineReader<R>
where
    R: Read,
{
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_CHUNK_SIZE, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        LineReader {
            reader: BufReader::with_capacity(capacity, reader),
            delimiter: b'\n',
            line_count: 0,
        }
    }

    /// Splits lines on `delimiter` instead of `\n`, e.g. `\r` for old Mac files.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Number of lines read so far.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Groups lines into batches of at most `lines_per_chunk` lines.
    pub fn chunks(self, lines_per_chunk: usize) -> LineChunks<R> {
        LineChunks {
            lines: self,
            lines_per_chunk: lines_per_chunk.max(1),
        }
    }
}

impl<R> Iterator for LineReader<R>
where
    R: Read,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        match self.reader.read_until(self.delimiter, &mut line) {
            Ok(0) => None,
            Ok(_n) => match String::from_utf8(line) {
                Ok(line) => {
                    self.line_count += 1;
                    Some(Ok(line))
                }
                Err(e) => Some(Err(io::Error::new(io::ErrorKind::InvalidData, e))),
            },
            Err(e) => Some(Err(e)),
        }
    }
}

/// Batches of lines from a `LineReader`.
pub struct LineChunks<R> {
    lines: LineReader<R>,
    lines_per_chunk: usize,
}

impl<R> Iterator for LineChunks<R>
where
    R: Read,
{
    type Item = io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::with_capacity(self.lines_per_chunk);
        while chunk.len() < self.lines_per_chunk {
            match self.lines.next() {
                Some(Ok(line)) => chunk.push(line),
                Some(Err(e)) => return Some(Err(e)),
                None => break,
            }
        }
        if chunk.is_empty() {
            return None;
        }
        tracing::trace!(
            lines = chunk.len(),
            total = self.lines.line_count(),
            "read chunk"
        );
        Some(Ok(chunk))
    }
}
