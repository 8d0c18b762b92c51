//! Parser for the Book-Crossing data files.
//!
//! Both files are `;`-separated, ISO-8859-1 encoded, and start with a header:
//! - BX_Books.csv: ISBN;Book-Title;Book-Author;Year-Of-Publication;Publisher;Image-URL-S;Image-URL-M;Image-URL-L
//! - BX-Book-Ratings.csv: User-ID;ISBN;Book-Rating
//!
//! Records are split by the `csv` crate, so quoted fields may contain the
//! separator, escaped `""` quotes and line breaks. Field bytes are decoded
//! as Latin-1 afterwards.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Field separator used by both files
pub const FIELD_SEPARATOR: u8 = b';';

const BOOK_FIELDS: usize = 8;
const RATING_FIELDS: usize = 3;

/// Decode ISO-8859-1 (Latin-1) bytes
///
/// Each byte maps directly to the Unicode code point of the same value, so the
/// conversion never fails.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Name used in error messages for a data file
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Line on which a record starts, 1-based
fn record_line(record: &ByteRecord) -> usize {
    record.position().map_or(0, |pos| pos.line() as usize)
}

/// Read every data record of `path`, header skipped, decoded as Latin-1
///
/// Each record is handed to `build` with its line number once its field count
/// has been checked against `expected`.
fn read_records<T>(
    path: &Path,
    expected: usize,
    mut build: impl FnMut(&str, usize, Vec<String>) -> Result<T>,
) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let name = display_name(path);

    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| DataLoadError::ParseError {
            file: name.clone(),
            line: e.position().map_or(0, |pos| pos.line() as usize),
            reason: e.to_string(),
        })?;
        let line = record_line(&record);

        if record.len() != expected {
            return Err(DataLoadError::FieldCountMismatch {
                file: name,
                expected,
                found: record.len(),
                line,
            });
        }

        let fields = record.iter().map(decode_latin1).collect();
        rows.push(build(&name, line, fields)?);
    }

    Ok(rows)
}

/// Year column: `0` and unparseable values mean "unknown"
fn parse_year(s: &str) -> Option<u16> {
    match s.trim().parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(year) => Some(year),
    }
}

/// Parse the books file
///
/// Format: ISBN;Book-Title;Book-Author;Year-Of-Publication;Publisher;Image-URL-S;Image-URL-M;Image-URL-L
pub fn parse_books(path: &Path) -> Result<Vec<Book>> {
    read_records(path, BOOK_FIELDS, |file, line, fields| {
        let mut parts = fields.into_iter();
        let mut next = || parts.next().unwrap_or_default();

        let isbn = next();
        if isbn.trim().is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: "Missing ISBN".to_string(),
            });
        }

        Ok(Book {
            isbn,
            title: next(),
            author: next(),
            year: parse_year(&next()),
            publisher: next(),
            image_url_small: next(),
            image_url_medium: next(),
            image_url_large: next(),
        })
    })
}

/// Parse the ratings file
///
/// Format: User-ID;ISBN;Book-Rating
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    read_records(path, RATING_FIELDS, |file, line, fields| {
        let mut parts = fields.into_iter();
        let mut next = || parts.next().unwrap_or_default();
        let (user_id, isbn, rating_value) = (next(), next(), next());

        Ok(Rating {
            user_id: user_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("Invalid userId: {}", e),
            })?,
            isbn,
            rating: rating_value.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("Invalid rating: {}", e),
            })?,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_latin1(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_parse_books_quoted_fields() {
        let file = write_latin1(
            b"header\n\"0195153448\";\"Classical; Mythology\";\"Mark \"\"P.\"\" Morford\";\"2002\";\"\";\"\";\"\";\"\"\n",
        );

        let books = parse_books(file.path()).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Classical; Mythology");
        assert_eq!(books[0].author, "Mark \"P.\" Morford");
        assert_eq!(books[0].image_url_large, "");
    }

    #[test]
    fn test_parse_books_title_spanning_lines() {
        let file = write_latin1(
            b"header\n\"A1\";\"Line one\nline two\";\"Ann\";\"1999\";\"Pub\";\"s\";\"m\";\"l\"\nB2;Beta;Bob;2001;Pub;s;m;l\n",
        );

        let books = parse_books(file.path()).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Line one\nline two");
        assert_eq!(books[0].author, "Ann");
        assert_eq!(books[1].isbn, "B2");
    }

    #[test]
    fn test_parse_ratings_line_after_multiline_record() {
        let file = write_latin1(b"User-ID;ISBN;Book-Rating\n1;\"odd\nisbn\";5\n2;X;nope\n");

        match parse_ratings(file.path()) {
            Err(DataLoadError::ParseError { line, reason, .. }) => {
                assert_eq!(line, 4);
                assert!(reason.contains("rating"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2002"), Some(2002));
        assert_eq!(parse_year("0"), None);
        assert_eq!(parse_year("DK Publishing Inc"), None);
    }

    #[test]
    fn test_parse_books_latin1_and_header() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(
            b"\"ISBN\";\"Book-Title\";\"Book-Author\";\"Year-Of-Publication\";\"Publisher\";\"Image-URL-S\";\"Image-URL-M\";\"Image-URL-L\"\n",
        );
        bytes.extend_from_slice(b"\"0002005018\";\"Clara Callan\";\"Richard Bruce Wright\";\"2001\";\"HarperFlamingo Canada\";\"s\";\"m\";\"l\"\n");
        bytes.extend_from_slice(b"\n");
        // 0xE9 is 'é' in Latin-1
        bytes.extend_from_slice(b"\"2080674722\";\"Les Mis\xE9rables\";\"Victor Hugo\";\"0\";\"Flammarion\";\"\";\"\";\"\"\n");
        let file = write_latin1(&bytes);

        let books = parse_books(file.path()).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].isbn, "0002005018");
        assert_eq!(books[0].title, "Clara Callan");
        assert_eq!(books[0].year, Some(2001));
        assert_eq!(books[1].title, "Les Misérables");
        assert_eq!(books[1].year, None);
    }

    #[test]
    fn test_parse_ratings() {
        let file = write_latin1(
            b"\"User-ID\";\"ISBN\";\"Book-Rating\"\r\n\"276725\";\"034545104X\";\"0\"\r\n\"276726\";\"0155061224\";\"5\"\r\n",
        );

        let ratings = parse_ratings(file.path()).unwrap();
        assert_eq!(ratings, vec![
            Rating::new(276725, "034545104X", 0),
            Rating::new(276726, "0155061224", 5),
        ]);
    }

    #[test]
    fn test_parse_ratings_rejects_bad_user_id() {
        let file = write_latin1(b"User-ID;ISBN;Book-Rating\n1;A;5\nabc;B;3\n");

        match parse_ratings(file.path()) {
            Err(DataLoadError::ParseError { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("userId"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_books_field_count_mismatch() {
        let file = write_latin1(b"header\nA;Title only\n");

        assert!(matches!(
            parse_books(file.path()),
            Err(DataLoadError::FieldCountMismatch { expected: 8, found: 2, line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_ratings(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.is_missing_file());
    }
}
