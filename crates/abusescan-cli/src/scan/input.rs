//! Host list reader.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

/// Lazy, single-pass sequence of trimmed, non-empty lines from a host list.
pub struct HostList<R> {
    lines: Lines<R>,
}

impl HostList<BufReader<File>> {
    /// Open a host list file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> HostList<R> {
    /// Read hosts from any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for HostList<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    let host = line.trim();
                    if !host.is_empty() {
                        return Some(Ok(host.to_string()));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
