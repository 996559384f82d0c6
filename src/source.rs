//! URL list reader
//!
//! One URL per line. Lines are trimmed and blank lines are skipped; nothing
//! else about the line is checked here.

use crate::error::{AppError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Lazy sequence of URLs read from a line-oriented source
pub struct UrlSource<R> {
    lines: Lines<R>,
}

impl UrlSource<BufReader<File>> {
    /// Open a URL file. Missing or unreadable files fail here, before any
    /// line is read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AppError::io(format!("Cannot open URL file '{}': {}", path.display(), e)))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> UrlSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { lines: reader.lines() }
    }
}

impl<R: BufRead> Iterator for UrlSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    let url = line.trim();
                    if !url.is_empty() {
                        return Some(Ok(url.to_string()));
                    }
                }
                Err(e) => return Some(Err(AppError::io(format!("Failed to read URL file: {}", e)))),
            }
        }
    }
}

/// Read every URL from `path`. Any read error aborts the whole list.
pub fn read_urls<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    UrlSource::open(path)?.collect()
}
