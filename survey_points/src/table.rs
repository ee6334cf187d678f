//! Table-view model over a [`PointCollection`].
//!
//! The table never holds the points. It keeps a subscription to the
//! collection and tracks only what a view needs between redraws: row count
//! and the selected row.

use std::fmt;
use std::sync::mpsc::Receiver;

use crate::collection::{CollectionEvent, PointCollection};
use crate::point::SurveyPoint;

/// Columns shown for each point, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Northing,
    Easting,
    Elevation,
    Description,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Id,
        Column::Northing,
        Column::Easting,
        Column::Elevation,
        Column::Description,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Northing => "Northing",
            Column::Easting => "Easting",
            Column::Elevation => "Elevation",
            Column::Description => "Description",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display text of this column for `point`.
    pub fn text(self, point: &SurveyPoint) -> String {
        match self {
            Column::Id => point.id.clone(),
            Column::Northing => point.northing.to_string(),
            Column::Easting => point.easting.to_string(),
            Column::Elevation => point.elevation.to_string(),
            Column::Description => point.description.clone(),
        }
    }

    /// Writes `value` into this column of `point`. Numeric columns reject
    /// text that does not parse as a number and leave the point untouched.
    pub fn set(self, point: &mut SurveyPoint, value: &str) -> bool {
        let number = || value.trim().parse::<f64>().ok();
        match self {
            Column::Id => point.id = value.to_string(),
            Column::Description => point.description = value.to_string(),
            Column::Northing => match number() {
                Some(v) => point.northing = v,
                None => return false,
            },
            Column::Easting => match number() {
                Some(v) => point.easting = v,
                None => return false,
            },
            Column::Elevation => match number() {
                Some(v) => point.elevation = v,
                None => return false,
            },
        }
        true
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug)]
pub struct PointTable {
    events: Receiver<CollectionEvent>,
    rows: usize,
    selected: Option<usize>,
}

impl PointTable {
    /// Attaches a new table to `points`.
    pub fn attach(points: &mut PointCollection) -> Self {
        Self {
            events: points.subscribe(),
            rows: points.len(),
            selected: None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects `row`, or clears the selection when the row does not exist.
    pub fn select(&mut self, row: Option<usize>) {
        self.selected = row.filter(|&r| r < self.rows);
    }

    /// Drains pending change notifications and returns them in order.
    pub fn poll(&mut self) -> Vec<CollectionEvent> {
        let events: Vec<_> = self.events.try_iter().collect();
        for event in &events {
            self.apply(*event);
        }
        events
    }

    fn apply(&mut self, event: CollectionEvent) {
        match event {
            CollectionEvent::Inserted { .. } => self.rows += 1,
            CollectionEvent::Removed { index } => {
                self.rows = self.rows.saturating_sub(1);
                self.selected = match self.selected {
                    Some(s) if s == index => None,
                    Some(s) if s > index => Some(s - 1),
                    other => other,
                };
            }
            CollectionEvent::Updated { .. } => {}
            CollectionEvent::Reset { len } => {
                self.rows = len;
                self.selected = None;
            }
        }
    }

    /// Display text of a cell.
    pub fn cell(&self, points: &PointCollection, row: usize, column: usize) -> Option<String> {
        let point = points.get(row)?;
        Column::from_index(column).map(|c| c.text(point))
    }

    /// Edits a cell in place. Returns false for unknown cells or rejected input.
    pub fn set_cell(
        &self,
        points: &mut PointCollection,
        row: usize,
        column: usize,
        value: &str,
    ) -> bool {
        let Some(column) = Column::from_index(column) else {
            return false;
        };
        let Some(mut point) = points.get(row).cloned() else {
            return false;
        };
        if !column.set(&mut point, value) {
            return false;
        }
        points.replace_at(row, point).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PointCollection {
        PointCollection::from_points(vec![
            SurveyPoint::new("1", 100.0, 200.0, 10.0, "Point 1"),
            SurveyPoint::new("2", 110.0, 210.0, 11.5, "Point 2"),
            SurveyPoint::new("3", 120.0, 220.0, 12.1, "Point 3"),
        ])
    }

    #[test]
    fn headers_in_display_order() {
        let headers: Vec<_> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(headers, ["ID", "Northing", "Easting", "Elevation", "Description"]);
    }

    #[test]
    fn cells_follow_collection() {
        let mut points = sample();
        let mut table = PointTable::attach(&mut points);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(&points, 1, 3).as_deref(), Some("11.5"));
        assert_eq!(table.cell(&points, 1, 5), None);
        assert_eq!(table.cell(&points, 7, 0), None);

        points.append(SurveyPoint::new("4", 0.0, 0.0, 0.0, "New Point"));
        table.poll();
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn selection_tracks_removals() {
        let mut points = sample();
        let mut table = PointTable::attach(&mut points);
        table.select(Some(2));
        points.remove_at(0);
        table.poll();
        assert_eq!(table.selected(), Some(1));
        points.remove_at(1);
        table.poll();
        assert_eq!(table.selected(), None);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn reset_clears_selection() {
        let mut points = sample();
        let mut table = PointTable::attach(&mut points);
        table.select(Some(0));
        points.clear();
        let events = table.poll();
        assert_eq!(events, vec![CollectionEvent::Reset { len: 0 }]);
        assert_eq!(table.selected(), None);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn select_out_of_range_clears() {
        let mut points = sample();
        let mut table = PointTable::attach(&mut points);
        table.select(Some(3));
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn numeric_cells_reject_text() {
        let mut points = sample();
        let table = PointTable::attach(&mut points);
        assert!(!table.set_cell(&mut points, 0, 1, "north"));
        assert_eq!(points.get(0).unwrap().northing, 100.0);
        assert!(table.set_cell(&mut points, 0, 1, " 101.25 "));
        assert_eq!(points.get(0).unwrap().northing, 101.25);
        assert!(table.set_cell(&mut points, 0, 4, "Fence corner"));
        assert_eq!(points.get(0).unwrap().description, "Fence corner");
        assert!(!table.set_cell(&mut points, 9, 0, "x"));
    }
}
