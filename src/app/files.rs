use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use crate::args::defaults::{STDIN, STDOUT};

/// Opens `name` for reading, `stdin` meaning standard input.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_input(name: &str) -> io::Result<Box<dyn BufRead>> {
    if name == STDIN {
        return Ok(Box::new(io::stdin().lock()));
    }
    Ok(Box::new(BufReader::new(File::open(name)?)))
}

/// Opens `name` for writing, `stdout` meaning standard output.
///
/// Files are created when missing and truncated otherwise.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be created.
pub fn open_output(name: &str) -> io::Result<Box<dyn Write>> {
    if name == STDOUT {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    Ok(Box::new(BufWriter::new(File::create(name)?)))
}
