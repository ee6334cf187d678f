use crate::geometry::Point;

/// Representation of a survey point: an identifier with grid coordinates,
/// an elevation and a free-form description.
///
/// Within a [`PointCollection`](crate::PointCollection) the identifier acts as
/// the key; two points are the same point when their identifiers match
/// exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct SurveyPoint {
    pub id: String,
    pub northing: f64,
    pub easting: f64,
    pub elevation: f64,
    pub description: String,
}

impl SurveyPoint {
    pub fn new(
        id: impl Into<String>,
        northing: f64,
        easting: f64,
        elevation: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            northing,
            easting,
            elevation,
            description: description.into(),
        }
    }

    /// Plan position in drawing coordinates (x = easting, y = northing).
    pub fn position(&self) -> Point {
        Point::new(self.easting, self.northing)
    }

    /// Whether the point carries an identifier.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
