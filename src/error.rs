use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    line: Option<usize>,
    kind: ErrorKind,
}

impl Error {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Error {
            line: Some(line),
            kind,
        }
    }

    /// Line on which the error occurred, if it happened while reading.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    BadField { col: usize, msg: String },
    RecordTooLarge { max_record_size: usize },
    Io(std::io::Error),
    Utf8(std::str::Utf8Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ErrorKind::BadField { col, msg } => {
                write!(f, "Field is malformed: {} (column: {}", msg, col)?
            }
            ErrorKind::RecordTooLarge { max_record_size } => write!(
                f,
                "Record is larger than maximum of {} bytes (",
                max_record_size
            )?,
            ErrorKind::Io(err) => write!(f, "Problem reading input: {} (", err)?,
            ErrorKind::Utf8(err) => write!(f, "Input contains invalid UTF-8: {} (", err)?,
        };
        match (&self.kind, self.line) {
            (ErrorKind::BadField { .. }, Some(line)) => write!(f, ", line: {})", line),
            (ErrorKind::BadField { .. }, None) => write!(f, ")"),
            (_, Some(line)) => write!(f, "line: {})", line),
            (_, None) => write!(f, "before first line)"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            ErrorKind::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error {
            line: None,
            kind: ErrorKind::Io(e),
        }
    }
}
