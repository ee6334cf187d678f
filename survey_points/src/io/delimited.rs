use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Field separator of a delimited text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    /// One or more spaces; empty fields are skipped.
    Space,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Space => ' ',
        }
    }

    fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Delimiter::Comma),
            ';' => Some(Delimiter::Semicolon),
            '\t' => Some(Delimiter::Tab),
            ' ' => Some(Delimiter::Space),
            _ => None,
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    /// Accepts a name (`comma`, `semicolon`, `tab`, `space`) or the literal character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "comma" => return Ok(Delimiter::Comma),
            "semicolon" => return Ok(Delimiter::Semicolon),
            "tab" | "\\t" => return Ok(Delimiter::Tab),
            "space" => return Ok(Delimiter::Space),
            _ => {}
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Delimiter::from_char(c).ok_or_else(|| format!("unsupported delimiter '{}'", s))
            }
            _ => Err(format!("unsupported delimiter '{}'", s)),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Space => "space",
        };
        f.write_str(name)
    }
}

/// Splits one line into fields.
///
/// [`Delimiter::Tab`] splits on every tab and keeps empty fields;
/// [`Delimiter::Space`] treats runs of spaces as one separator. Comma and
/// semicolon lines are read as CSV: a field wrapped in double quotes may hold
/// the delimiter and `""` inside it stands for one quote. An unterminated
/// quote, as written by older exports, runs to the end of the line.
pub fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Space => line
            .split(' ')
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
        Delimiter::Tab => line.split('\t').map(str::to_string).collect(),
        Delimiter::Comma | Delimiter::Semicolon => split_quoted(line, delimiter.as_byte()),
    }
}

// One reader per line keeps a stray quote from swallowing the lines after it.
fn split_quoted(line: &str, delimiter: u8) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        Ok(false) => Vec::new(),
        Err(e) => {
            log::debug!("unreadable line {:?}: {}", line, e);
            Vec::new()
        }
    }
}

/// First rows of a delimited file split into cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preview {
    pub rows: Vec<Vec<String>>,
    /// Column count of the widest row.
    pub column_count: usize,
}

/// Reads at most `max_rows` lines of `path` for display. A skipped header
/// line counts toward `max_rows`.
pub fn preview_file(
    path: &Path,
    delimiter: Delimiter,
    skip_header: bool,
    max_rows: usize,
) -> io::Result<Preview> {
    let reader = BufReader::new(File::open(path)?);
    let mut preview = Preview::default();
    for (idx, line) in reader.lines().take(max_rows).enumerate() {
        let line = line?;
        if skip_header && idx == 0 {
            continue;
        }
        let cells = split_line(&line, delimiter);
        preview.column_count = preview.column_count.max(cells.len());
        preview.rows.push(cells);
    }
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_delimiters_keep_empty_fields() {
        assert_eq!(split_line("1,,3,", Delimiter::Comma), ["1", "", "3", ""]);
        assert_eq!(split_line("1;2", Delimiter::Semicolon), ["1", "2"]);
        assert_eq!(split_line("1\t\t3", Delimiter::Tab), ["1", "", "3"]);
    }

    #[test]
    fn quoted_fields_hold_the_delimiter() {
        assert_eq!(
            split_line("1,\"Iron pin, NE corner\",x", Delimiter::Comma),
            ["1", "Iron pin, NE corner", "x"]
        );
        assert_eq!(
            split_line("\"a;b\";\"say \"\"hi\"\"\"", Delimiter::Semicolon),
            ["a;b", "say \"hi\""]
        );
        assert_eq!(split_line("1,\"legacy", Delimiter::Comma), ["1", "legacy"]);
        assert!(split_line("", Delimiter::Comma).is_empty());
    }

    #[test]
    fn tab_and_space_split_literally() {
        assert_eq!(split_line("\"a\tb\"", Delimiter::Tab), ["\"a", "b\""]);
        assert_eq!(split_line("\"a b\"", Delimiter::Space), ["\"a", "b\""]);
    }

    #[test]
    fn space_collapses_runs() {
        assert_eq!(split_line("  1   2 3  ", Delimiter::Space), ["1", "2", "3"]);
        assert!(split_line("", Delimiter::Space).is_empty());
    }

    #[test]
    fn parse_delimiter_names() {
        assert_eq!("comma".parse::<Delimiter>(), Ok(Delimiter::Comma));
        assert_eq!(";".parse::<Delimiter>(), Ok(Delimiter::Semicolon));
        assert_eq!("TAB".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert_eq!(" ".parse::<Delimiter>(), Ok(Delimiter::Space));
        assert!("|".parse::<Delimiter>().is_err());
        assert!(",,".parse::<Delimiter>().is_err());
    }

    #[test]
    fn preview_counts_header_in_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pts.csv");
        std::fs::write(&path, "id,n,e\n1,2,3\n4,5,6,7\n8,9,10\n").unwrap();

        let p = preview_file(&path, Delimiter::Comma, true, 3).unwrap();
        assert_eq!(p.rows.len(), 2);
        assert_eq!(p.rows[0], ["1", "2", "3"]);
        assert_eq!(p.column_count, 4);

        let p = preview_file(&path, Delimiter::Comma, false, 10).unwrap();
        assert_eq!(p.rows.len(), 4);
        assert_eq!(p.rows[0][0], "id");
    }

    #[test]
    fn preview_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(preview_file(&dir.path().join("none.csv"), Delimiter::Comma, false, 10).is_err());
    }
}
