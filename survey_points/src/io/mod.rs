//! Delimited text input and output for survey point tables.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub mod columns;
pub use columns::{ColumnMapping, ColumnRole};

pub mod delimited;
pub use delimited::{preview_file, split_line, Delimiter, Preview};

pub mod points;
pub use points::{parse_points, read_points_file, write_points, write_points_csv, ImportOptions};

/// Reads a file to string.
pub fn read_to_string(path: &Path) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}
