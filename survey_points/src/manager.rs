//! Point manager session: the point table together with the drawing it
//! belongs to.

use std::io;
use std::path::Path;

use crate::collection::PointCollection;
use crate::drawing::{write_point_entities, DrawingDocument};
use crate::error::DocumentError;
use crate::io::{read_points_file, write_points_csv, ImportOptions};
use crate::point::SurveyPoint;
use crate::settings::Settings;
use crate::sync::{DrawingSynchronizer, MergeSummary};

/// Owns the point table and drives drawing updates for it.
///
/// The drawing is optional; without one every drawing-related operation is a
/// no-op and the session works on the table alone.
pub struct PointManager<'d> {
    points: PointCollection,
    document: Option<&'d mut dyn DrawingDocument>,
    settings: Settings,
}

impl<'d> PointManager<'d> {
    pub fn new(document: Option<&'d mut dyn DrawingDocument>, settings: Settings) -> Self {
        Self {
            points: PointCollection::new(),
            document,
            settings,
        }
    }

    /// Starts a session on an existing table.
    pub fn with_points(
        points: PointCollection,
        document: Option<&'d mut dyn DrawingDocument>,
        settings: Settings,
    ) -> Self {
        Self {
            points,
            document,
            settings,
        }
    }

    pub fn points(&self) -> &PointCollection {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut PointCollection {
        &mut self.points
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn into_points(self) -> PointCollection {
        self.points
    }

    pub fn count_label(&self) -> String {
        format!("Points: {}", self.points.len())
    }

    /// Appends a blank point numbered after the current row count.
    pub fn add_point(&mut self) -> usize {
        let id = (self.points.len() + 1).to_string();
        self.points
            .append(SurveyPoint::new(id, 0.0, 0.0, 0.0, "New Point"))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<SurveyPoint> {
        self.points.remove_at(index)
    }

    pub fn export_csv(&self, path: &Path) -> io::Result<()> {
        write_points_csv(path, self.points.as_slice())
    }

    /// Appends points whose identifier is not yet in the table and draws
    /// each of them. Returns how many were added.
    pub fn import_points(&mut self, points: Vec<SurveyPoint>) -> usize {
        let mut added = 0;
        for pt in points {
            if self.points.contains_id(&pt.id) {
                log::debug!("point {} already exists; not imported", pt.id);
                continue;
            }
            if let Some(doc) = self.document.as_deref_mut() {
                write_point_entities(doc, &pt, &self.settings);
            }
            self.points.append(pt);
            added += 1;
        }
        added
    }

    pub fn import_file(&mut self, path: &Path, options: &ImportOptions) -> io::Result<usize> {
        let pts = read_points_file(path, options)?;
        Ok(self.import_points(pts))
    }

    /// Rebuilds points from the drawing and merges them into the table.
    /// `resolve_overwrite` decides whether points with an existing
    /// identifier replace the table entry.
    pub fn sync_from_drawing<F>(&mut self, resolve_overwrite: F) -> Result<MergeSummary, DocumentError>
    where
        F: FnOnce(usize) -> bool,
    {
        let Some(doc) = self.document.as_deref() else {
            return Ok(MergeSummary::default());
        };
        DrawingSynchronizer::new(&self.settings).synchronize_from(doc, &mut self.points, resolve_overwrite)
    }

    /// Centers the drawing view on the point in row `index`.
    pub fn select_row(&mut self, index: usize) -> bool {
        let Some(pt) = self.points.get(index) else {
            return false;
        };
        let center = pt.position();
        match self.document.as_deref_mut() {
            Some(doc) => {
                doc.zoom_to_point(center, self.settings.zoom_radius);
                true
            }
            None => false,
        }
    }
}
