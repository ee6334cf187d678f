use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use super::columns::ColumnMapping;
use super::delimited::{split_line, Delimiter};
use super::read_to_string;
use crate::point::SurveyPoint;

/// How a delimited file is turned into survey points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub delimiter: Delimiter,
    pub skip_header: bool,
    pub mapping: ColumnMapping,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            skip_header: false,
            mapping: ColumnMapping::pnezd(),
        }
    }
}

/// Parses delimited text into points. Rows that fail to map are dropped.
pub fn parse_points(text: &str, options: &ImportOptions) -> Vec<SurveyPoint> {
    let mut pts = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if options.skip_header && idx == 0 {
            continue;
        }
        let fields = split_line(line, options.delimiter);
        match options.mapping.map_row(fields.as_slice()) {
            Some(p) => pts.push(p),
            None => log::debug!("line {}: row dropped", idx + 1),
        }
    }
    pts
}

/// Reads a delimited file of survey points.
pub fn read_points_file(path: &Path, options: &ImportOptions) -> io::Result<Vec<SurveyPoint>> {
    let text = read_to_string(path)?;
    Ok(parse_points(&text, options))
}

fn point_record(p: &SurveyPoint) -> [String; 5] {
    [
        p.id.clone(),
        p.northing.to_string(),
        p.easting.to_string(),
        p.elevation.to_string(),
        p.description.clone(),
    ]
}

/// Writes points as comma separated records in PNEZD order. Fields holding a
/// comma, a quote or a line break are quoted.
pub fn write_points<W: Write>(out: W, points: &[SurveyPoint]) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    for p in points {
        writer.write_record(&point_record(p))?;
    }
    writer.flush()
}

pub fn write_points_csv(path: &Path, points: &[SurveyPoint]) -> io::Result<()> {
    write_points(File::create(path)?, points)
}
