//! Assignment of input columns to survey point fields.

use std::str::FromStr;

use crate::point::SurveyPoint;

/// Field an input column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnRole {
    #[default]
    Ignore,
    Identifier,
    Northing,
    Easting,
    Elevation,
    Description,
}

impl ColumnRole {
    /// Label shown when choosing a role for a column.
    pub fn label(self) -> &'static str {
        match self {
            ColumnRole::Ignore => "Ignore",
            ColumnRole::Identifier => "Point ID",
            ColumnRole::Northing => "Northing",
            ColumnRole::Easting => "Easting",
            ColumnRole::Elevation => "Elevation",
            ColumnRole::Description => "Description",
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(ColumnRole::Identifier),
            'N' => Some(ColumnRole::Northing),
            'E' => Some(ColumnRole::Easting),
            'Z' => Some(ColumnRole::Elevation),
            'D' => Some(ColumnRole::Description),
            'X' | '-' => Some(ColumnRole::Ignore),
            _ => None,
        }
    }
}

/// Role of each input column, by position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMapping {
    pub roles: Vec<ColumnRole>,
}

impl ColumnMapping {
    pub fn new(roles: Vec<ColumnRole>) -> Self {
        Self { roles }
    }

    /// Point number, northing, easting, elevation, description.
    pub fn pnezd() -> Self {
        Self::new(vec![
            ColumnRole::Identifier,
            ColumnRole::Northing,
            ColumnRole::Easting,
            ColumnRole::Elevation,
            ColumnRole::Description,
        ])
    }

    /// Builds a point from one row of fields.
    ///
    /// Only columns present in both the row and the mapping are read; fields
    /// not fed by any column keep their defaults. Returns `None` when a
    /// numeric column does not parse or the identifier ends up empty.
    pub fn map_row<S: AsRef<str>>(&self, fields: &[S]) -> Option<SurveyPoint> {
        let mut pt = SurveyPoint::default();
        for (role, raw) in self.roles.iter().zip(fields) {
            let value = raw.as_ref().trim();
            match role {
                ColumnRole::Ignore => {}
                ColumnRole::Identifier => pt.id = value.to_string(),
                ColumnRole::Northing => pt.northing = value.parse().ok()?,
                ColumnRole::Easting => pt.easting = value.parse().ok()?,
                ColumnRole::Elevation => pt.elevation = value.parse().ok()?,
                ColumnRole::Description => pt.description = value.to_string(),
            }
        }
        pt.has_id().then_some(pt)
    }
}

impl FromStr for ColumnMapping {
    type Err = String;

    /// Parses a column code such as `PNEZD` or `PENZ-D`: P = point ID,
    /// N = northing, E = easting, Z = elevation, D = description and
    /// X or `-` for an ignored column. Case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let roles = s
            .trim()
            .chars()
            .map(|c| ColumnRole::from_code(c).ok_or_else(|| format!("unknown column code '{}'", c)))
            .collect::<Result<Vec<_>, _>>()?;
        if roles.is_empty() {
            return Err("empty column code".to_string());
        }
        Ok(Self::new(roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes() {
        let m: ColumnMapping = "penz-d".parse().unwrap();
        assert_eq!(
            m.roles,
            vec![
                ColumnRole::Identifier,
                ColumnRole::Easting,
                ColumnRole::Northing,
                ColumnRole::Elevation,
                ColumnRole::Ignore,
                ColumnRole::Description,
            ]
        );
        assert!("PNQ".parse::<ColumnMapping>().is_err());
        assert!("".parse::<ColumnMapping>().is_err());
    }

    #[test]
    fn map_full_row() {
        let p = ColumnMapping::pnezd()
            .map_row(&["12", " 100.5", "200.25 ", "10", " Iron pin"])
            .unwrap();
        assert_eq!(p, SurveyPoint::new("12", 100.5, 200.25, 10.0, "Iron pin"));
    }

    #[test]
    fn bad_number_drops_row() {
        assert!(ColumnMapping::pnezd().map_row(&["1", "abc", "2", "3"]).is_none());
        assert!(ColumnMapping::pnezd().map_row(&["1", "", "2", "3"]).is_none());
    }

    #[test]
    fn empty_identifier_drops_row() {
        assert!(ColumnMapping::pnezd().map_row(&[" ", "1", "2", "3"]).is_none());
        let m: ColumnMapping = "NEZ".parse().unwrap();
        assert!(m.map_row(&["1", "2", "3"]).is_none());
    }

    #[test]
    fn short_rows_keep_defaults() {
        let p = ColumnMapping::pnezd().map_row(&["7", "1.5"]).unwrap();
        assert_eq!(p, SurveyPoint::new("7", 1.5, 0.0, 0.0, ""));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let m: ColumnMapping = "PN".parse().unwrap();
        let p = m.map_row(&["7", "1.5", "not a number"]).unwrap();
        assert_eq!(p.northing, 1.5);
    }

    #[test]
    fn later_column_overwrites_same_role() {
        let m: ColumnMapping = "PDD".parse().unwrap();
        let p = m.map_row(&["1", "first", "second"]).unwrap();
        assert_eq!(p.description, "second");
    }

    #[test]
    fn cells_are_taken_verbatim_after_trimming() {
        let p = ColumnMapping::pnezd()
            .map_row(&["\"A\"", "1", "2", "3", "\"quoted\""])
            .unwrap();
        assert_eq!(p.id, "\"A\"");
        assert_eq!(p.description, "\"quoted\"");
    }
}
