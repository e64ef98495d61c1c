use crate::{Error, Parser};
use std::io::Read;
use std::ops::Range;

/// Iterator of `Record`s read from CSV.
///
/// Consumes its input once; after `None` it stays exhausted.
pub struct Records<R> {
    parser: Parser<R>,
}

/// CSV record.
#[derive(Debug)]
pub struct Record {
    /// Contents of the record.
    buf: Vec<u8>,
    /// Ranges describing locations of fields within `buf`.
    field_bounds: Vec<Range<usize>>,
}

impl<R> Records<R> {
    pub(crate) fn new(parser: Parser<R>) -> Self {
        Self { parser }
    }
}

impl<R> Records<R>
where
    R: Read,
{
    /// Number of physical lines consumed so far.
    pub fn line_count(&self) -> usize {
        self.parser.line_count()
    }
}

impl<R> Iterator for Records<R>
where
    R: Read,
{
    type Item = std::result::Result<Record, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_record()
    }
}

impl Record {
    pub(crate) fn new(buf: Vec<u8>, field_bounds: Vec<Range<usize>>) -> Self {
        Self { buf, field_bounds }
    }

    /// Returns record's fields as strings.
    pub fn fields(&self) -> Vec<&str> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }

    /// Returns the field at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        let bounds = self.field_bounds.get(index)?;
        // Parser only hands over buffers it has validated as UTF-8.
        let buf_as_str = unsafe { std::str::from_utf8_unchecked(&self.buf) };
        Some(&buf_as_str[bounds.clone()])
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.field_bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_bounds.is_empty()
    }
}
