use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a corpus file and returns one sentence per line.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Strips trailing whitespace from every line
/// - Invalid UTF-8 sequences are replaced rather than rejected
pub(crate) fn read_sentences<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut bytes = Vec::new();
	File::open(filename)?.read_to_end(&mut bytes)?;
	let contents = String::from_utf8_lossy(&bytes);
	Ok(contents.lines().map(|line| line.trim_end().to_owned()).collect())
}
