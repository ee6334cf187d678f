//! Rebuilds survey points from the point and label entities of a drawing
//! and merges them into a point collection.
//!
//! A point marker on the point layer becomes a survey point when a number
//! label lies within the correlation radius. Elevation and description labels
//! within the same radius fill in the remaining fields. When several labels of
//! one role qualify, the one enumerated last wins; distance only decides
//! whether a label qualifies at all.

use crate::collection::PointCollection;
use crate::drawing::{DrawingEntity, DrawingEntityReader, EntityKind, Label};
use crate::error::DocumentError;
use crate::geometry::distance;
use crate::layers::{LabelRole, PointLayers};
use crate::point::SurveyPoint;
use crate::settings::Settings;

/// Outcome of merging found points into a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    /// Points reconstructed from the drawing.
    pub found: usize,
    /// Found points whose identifier was new.
    pub appended: usize,
    /// Existing points overwritten by a found point.
    pub replaced: usize,
    /// Found points dropped because their identifier already existed.
    pub kept: usize,
}

#[derive(Debug, Clone)]
pub struct DrawingSynchronizer {
    layers: PointLayers,
    radius: f64,
}

impl DrawingSynchronizer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            layers: settings.layers.clone(),
            radius: settings.correlation_radius,
        }
    }

    /// Collects every text and multiline text entity as a label, whatever its layer.
    pub fn extract_labels(&self, entities: &[DrawingEntity]) -> Vec<Label> {
        entities.iter().filter_map(Label::from_entity).collect()
    }

    /// Reconstructs survey points in entity enumeration order. Candidates
    /// without a number label are dropped.
    pub fn collect_points(&self, entities: &[DrawingEntity]) -> Vec<SurveyPoint> {
        let labels = self.extract_labels(entities);
        let mut found = Vec::new();
        for entity in entities {
            if entity.kind != EntityKind::Point || !self.layers.is_point_layer(&entity.layer) {
                continue;
            }
            let mut pt = SurveyPoint {
                easting: entity.position.x,
                northing: entity.position.y,
                ..SurveyPoint::default()
            };
            for label in &labels {
                // NaN distances never qualify
                if !(distance(entity.position, label.position) <= self.radius) {
                    continue;
                }
                self.apply_label(&mut pt, label);
            }
            if !pt.has_id() {
                log::debug!(
                    "skipping point without identifier at {} {}",
                    pt.easting,
                    pt.northing
                );
                continue;
            }
            found.push(pt);
        }
        found
    }

    fn apply_label(&self, pt: &mut SurveyPoint, label: &Label) {
        let text = label.text.trim();
        match self.layers.label_role(&label.layer) {
            Some(LabelRole::Number) => {
                if let Ok(n) = text.parse::<i32>() {
                    pt.id = n.to_string();
                }
            }
            Some(LabelRole::Elevation) => {
                if let Ok(z) = text.parse::<f64>() {
                    pt.elevation = z;
                }
            }
            Some(LabelRole::Description) => pt.description = text.to_string(),
            None => {}
        }
    }

    /// Merges `found` into `points` in order. A found point replaces an
    /// existing point with the same identifier only when `overwrite` is set;
    /// otherwise the existing point is kept. New identifiers are appended.
    pub fn merge(
        &self,
        found: Vec<SurveyPoint>,
        points: &mut PointCollection,
        overwrite: bool,
    ) -> MergeSummary {
        let mut summary = MergeSummary {
            found: found.len(),
            ..MergeSummary::default()
        };
        for pt in found {
            match points.find_by_id(&pt.id) {
                Some(index) if overwrite => {
                    points.replace_at(index, pt);
                    summary.replaced += 1;
                }
                Some(_) => summary.kept += 1,
                None => {
                    points.append(pt);
                    summary.appended += 1;
                }
            }
        }
        summary
    }

    /// Reconstructs points from `entities` and merges them into `points`.
    pub fn synchronize(
        &self,
        entities: &[DrawingEntity],
        points: &mut PointCollection,
        overwrite: bool,
    ) -> MergeSummary {
        let found = self.collect_points(entities);
        self.synchronize_found(found, points, overwrite)
    }

    /// Reads all entities from `reader` and merges the points found.
    ///
    /// `resolve_overwrite` receives the number of points found and is only
    /// asked when both the collection and the found set are non-empty; in
    /// every other case existing points are kept. An enumeration failure
    /// leaves `points` untouched.
    pub fn synchronize_from<R, F>(
        &self,
        reader: &R,
        points: &mut PointCollection,
        resolve_overwrite: F,
    ) -> Result<MergeSummary, DocumentError>
    where
        R: DrawingEntityReader + ?Sized,
        F: FnOnce(usize) -> bool,
    {
        let entities = reader.entities(true)?;
        let found = self.collect_points(&entities);
        if found.is_empty() {
            log::info!("no survey points found in drawing");
            return Ok(MergeSummary::default());
        }
        let overwrite = !points.is_empty() && resolve_overwrite(found.len());
        Ok(self.synchronize_found(found, points, overwrite))
    }

    fn synchronize_found(
        &self,
        found: Vec<SurveyPoint>,
        points: &mut PointCollection,
        overwrite: bool,
    ) -> MergeSummary {
        let summary = self.merge(found, points, overwrite);
        log::info!(
            "synchronized {} points: {} appended, {} replaced, {} kept",
            summary.found,
            summary.appended,
            summary.replaced,
            summary.kept
        );
        summary
    }
}

impl Default for DrawingSynchronizer {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
