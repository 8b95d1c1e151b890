//! Newline-delimited file list reader

use crate::error::{PcacheError, Result};
use std::io::BufRead;

/// Feed each non-blank line of `reader` to `handle`, in arrival order.
///
/// Lines are handed over as they are read, so work starts before the
/// input is complete. Lines are split on raw bytes; a name that is not
/// valid UTF-8 is passed on lossily decoded and fails later as a file
/// that cannot be accessed. Returns the number of paths delivered, or
/// [`PcacheError::InputStream`] if reading fails part-way; paths read
/// before the failure have already been handled.
pub fn for_each_path<R, F>(reader: R, mut handle: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut delivered = 0;
    for line in reader.split(b'\n') {
        let mut line = line.map_err(PcacheError::InputStream)?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let path = String::from_utf8_lossy(&line);
        if path.trim().is_empty() {
            continue;
        }
        handle(&*path);
        delivered += 1;
    }
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    fn collect(input: &[u8]) -> (Vec<String>, usize) {
        let mut seen = Vec::new();
        let count = for_each_path(Cursor::new(input), |p| seen.push(p.to_string())).unwrap();
        (seen, count)
    }

    #[test]
    fn test_reads_paths_in_order() {
        let (seen, count) = collect(b"a.txt\nb.txt\n");
        assert_eq!(seen, vec!["a.txt", "b.txt"]);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_no_trailing_newline_and_crlf() {
        let (seen, _) = collect(b"a.txt\r\nb.txt");
        assert_eq!(seen, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_skips_blank_lines_but_keeps_spaces_in_names() {
        let (seen, count) = collect(b"\n  \r\nmy file.txt\n\n");
        assert_eq!(seen, vec!["my file.txt"]);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_empty_input() {
        let (seen, count) = collect(b"");
        assert!(seen.is_empty());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_later_lines() {
        let (seen, count) = collect(b"a.txt\n\xff.txt\nb.txt\n");
        assert_eq!(seen, vec!["a.txt", "\u{FFFD}.txt", "b.txt"]);
        assert_eq!(count, 3);
    }

    /// Yields some bytes, then fails
    struct BrokenReader {
        data: Cursor<Vec<u8>>,
    }

    impl BrokenReader {
        fn new(data: &[u8]) -> Self {
            Self {
                data: Cursor::new(data.to_vec()),
            }
        }
    }

    impl Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "stream reset"));
            }
            Ok(n)
        }
    }

    #[test]
    fn test_read_error_after_partial_input() {
        let reader = BufReader::new(BrokenReader::new(b"a.txt\nb.txt\n"));
        let mut seen = Vec::new();

        let result = for_each_path(reader, |p| seen.push(p.to_string()));

        assert!(matches!(result, Err(PcacheError::InputStream(_))));
        assert_eq!(seen, vec!["a.txt", "b.txt"]);
    }
}
