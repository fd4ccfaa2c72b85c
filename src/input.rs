use std::{
    fs::File,
    io::{prelude::*, BufReader, Cursor},
    path::Path,
    str::FromStr,
};

const TEST_DATA_FILENAME: &str = "TEST DATA";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{file}:{line}: {message} for {record:?}")]
    Record {
        file: String,
        line: usize,
        record: String,
        message: String,
    },
}

/// Parse the file at the specified path into a stream of `T`.
///
/// Each line is treated as a separate record. Leading and trailing spaces
/// are trimmed before being handed to the parser. Blank lines and lines
/// starting with `#` are skipped.
///
/// If any record cannot be parsed, this yields the error, logs a warning, and stops iteration.
///
/// See also [`parse_str`] for equivalent functionality for strings, useful for test data.
pub fn parse<'a, T>(
    path: &'a Path,
) -> std::io::Result<impl 'a + Iterator<Item = Result<T, ParseError>>>
where
    T: 'a + FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    parse_reader(reader, path.display())
}

/// Parse the provided data into a stream of `T`.
///
/// Each line is treated as a separate record. Leading and trailing spaces
/// are trimmed before being handed to the parser. Blank lines and lines
/// starting with `#` are skipped.
///
/// If any record cannot be parsed, this yields the error, logs a warning, and stops iteration.
///
/// See also [`parse`] for equivalent functionality for input files.
pub fn parse_str<'a, T>(
    data: &'a str,
) -> std::io::Result<impl '_ + Iterator<Item = Result<T, ParseError>>>
where
    T: 'a + FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    parse_reader(Cursor::new(data), TEST_DATA_FILENAME)
}

/// Parse the contents of the provided reader into a stream of `T`.
///
/// Often [`parse`] or [`parse_str`] are more ergonomic.
///
/// The file name can technically be anything which is `'a + Display`, but it's used within
/// errors as the file name, so it should be reasonably interprable as such.
pub fn parse_reader<'a, T, Reader, Filename>(
    mut reader: Reader,
    file_name: Filename,
) -> std::io::Result<impl 'a + Iterator<Item = Result<T, ParseError>>>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
    Reader: 'a + BufRead,
    Filename: 'a + std::fmt::Display,
{
    let mut buf = String::new();
    let mut line: usize = 0;
    let mut failed = false;
    Ok(std::iter::from_fn(move || {
        if failed {
            return None;
        }
        loop {
            buf.clear();
            match reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => line += 1,
                Err(err) => {
                    failed = true;
                    tracing::warn!("{}:{}: {}", file_name, line + 1, err);
                    return Some(Err(err.into()));
                }
            }
            let record = buf.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }
            return Some(T::from_str(record).map_err(|err| {
                failed = true;
                tracing::warn!("{}:{}: {} for {:?}", file_name, line, err, record);
                ParseError::Record {
                    file: file_name.to_string(),
                    line,
                    record: record.to_string(),
                    message: err.to_string(),
                }
            }));
        }
    }))
}
