//! Host document backed by a DXF file.

use std::path::{Path, PathBuf};

use ::dxf::entities::{Entity, EntityType, MText, ModelPoint, Text};
use ::dxf::enums::{HorizontalTextJustification, VerticalTextJustification};
use ::dxf::tables::Layer;
use ::dxf::Drawing;

use crate::drawing::{
    DrawingEntity, DrawingEntityReader, DrawingEntityWriter, EntityKind, HorizontalAlignment,
    TextEntity, VerticalAlignment,
};
use crate::error::DocumentError;
use crate::geometry::Point;

pub struct DxfDocument {
    drawing: Drawing,
    path: Option<PathBuf>,
    active_layer: String,
    view: Option<(Point, f64)>,
}

impl DxfDocument {
    /// Creates an empty drawing not yet tied to a file.
    pub fn new() -> Self {
        Self {
            drawing: Drawing::new(),
            path: None,
            active_layer: "0".to_string(),
            view: None,
        }
    }

    /// Loads a drawing from a DXF file.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let drawing = Drawing::load_file(path).map_err(|e| DocumentError::Dxf(e.to_string()))?;
        Ok(Self {
            drawing,
            path: Some(path.to_path_buf()),
            active_layer: "0".to_string(),
            view: None,
        })
    }

    /// Opens `path` when it exists, otherwise starts an empty drawing that
    /// [`save`](Self::save) will create there.
    pub fn open_or_new(path: &Path) -> Result<Self, DocumentError> {
        if path.exists() {
            Self::open(path)
        } else {
            let mut doc = Self::new();
            doc.path = Some(path.to_path_buf());
            Ok(doc)
        }
    }

    /// Writes the drawing back to the file it was opened from.
    pub fn save(&self) -> Result<(), DocumentError> {
        match &self.path {
            Some(path) => self.save_as(path),
            None => Err(DocumentError::Unavailable("drawing has no file path".into())),
        }
    }

    pub fn save_as(&self, path: &Path) -> Result<(), DocumentError> {
        self.drawing
            .save_file(path)
            .map_err(|e| DocumentError::Dxf(e.to_string()))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Center and radius of the last zoom request.
    pub fn view(&self) -> Option<(Point, f64)> {
        self.view
    }

    fn ensure_layer(&mut self, name: &str) {
        if self.drawing.layers().any(|l| l.name == name) {
            return;
        }
        let mut layer = Layer::default();
        layer.name = name.to_string();
        self.drawing.add_layer(layer);
    }

    fn add(&mut self, specific: EntityType) {
        let layer = self.active_layer.clone();
        self.ensure_layer(&layer);
        let mut entity = Entity::new(specific);
        entity.common.layer = layer;
        self.drawing.add_entity(entity);
    }
}

impl Default for DxfDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Text longer than one group code value is split into `extended_text`
/// chunks followed by the final `text` chunk.
fn mtext_content(m: &MText) -> String {
    let mut content = m.extended_text.concat();
    content.push_str(&m.text);
    content
}

fn convert_entity(entity: &Entity) -> DrawingEntity {
    let (position, kind) = match &entity.specific {
        EntityType::ModelPoint(p) => (Point::new(p.location.x, p.location.y), EntityKind::Point),
        EntityType::Text(t) => (
            Point::new(t.location.x, t.location.y),
            EntityKind::Text(t.value.clone()),
        ),
        EntityType::MText(m) => (
            Point::new(m.insertion_point.x, m.insertion_point.y),
            EntityKind::MultilineText(mtext_content(m).replace("\\P", "\n")),
        ),
        EntityType::Line(l) => (Point::new(l.p1.x, l.p1.y), EntityKind::Line),
        EntityType::Circle(c) => (Point::new(c.center.x, c.center.y), EntityKind::Circle),
        _ => (Point::default(), EntityKind::Other),
    };
    DrawingEntity::new(entity.common.layer.clone(), position, kind)
}

impl DrawingEntityReader for DxfDocument {
    fn entities(&self, include_all: bool) -> Result<Vec<DrawingEntity>, DocumentError> {
        Ok(self
            .drawing
            .entities()
            .filter(|e| include_all || e.common.is_visible)
            .map(convert_entity)
            .collect())
    }
}

impl DrawingEntityWriter for DxfDocument {
    fn set_active_layer(&mut self, name: &str) {
        self.active_layer = name.to_string();
    }

    fn add_point_entity(&mut self, position: Point) {
        let mut point = ModelPoint::default();
        point.location = ::dxf::Point::new(position.x, position.y, 0.0);
        self.add(EntityType::ModelPoint(point));
    }

    fn add_text_entity(&mut self, text: &TextEntity) {
        let location = ::dxf::Point::new(text.position.x, text.position.y, 0.0);
        let mut t = Text::default();
        t.location = location.clone();
        // non-left justification places text by the second alignment point
        t.second_alignment_point = location;
        t.text_height = text.height;
        t.value = text.content.clone();
        t.rotation = text.rotation;
        t.horizontal_text_justification = match text.horizontal {
            HorizontalAlignment::Left => HorizontalTextJustification::Left,
            HorizontalAlignment::Center => HorizontalTextJustification::Center,
            HorizontalAlignment::Right => HorizontalTextJustification::Right,
        };
        t.vertical_text_justification = match text.vertical {
            VerticalAlignment::Baseline => VerticalTextJustification::Baseline,
            VerticalAlignment::Bottom => VerticalTextJustification::Bottom,
            VerticalAlignment::Middle => VerticalTextJustification::Middle,
            VerticalAlignment::Top => VerticalTextJustification::Top,
        };
        self.add(EntityType::Text(t));
    }

    fn refresh_view(&mut self) {
        log::debug!("drawing holds {} entities", self.drawing.entities().count());
    }

    fn zoom_to_point(&mut self, center: Point, radius: f64) {
        self.view = Some((center, radius));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::SurveyPoint;
    use crate::settings::Settings;

    #[test]
    fn written_entities_survive_save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.dxf");

        let mut doc = DxfDocument::open_or_new(&path).unwrap();
        let p = SurveyPoint::new("7", 20.0, 10.0, 0.0, "Hydrant");
        crate::drawing::write_point_entities(&mut doc, &p, &Settings::default());
        doc.save().unwrap();

        let reopened = DxfDocument::open(&path).unwrap();
        let ents = reopened.entities(true).unwrap();
        assert_eq!(ents.len(), 3);
        assert_eq!(ents[0], DrawingEntity::point("PNTS", 10.0, 20.0));
        assert_eq!(ents[1], DrawingEntity::text("PNTNO", 10.5, 20.5, "7"));
        assert_eq!(ents[2], DrawingEntity::text("PNTDESC", 10.5, 19.5, "Hydrant"));
    }

    #[test]
    fn long_mtext_joins_extended_chunks() {
        let mut doc = DxfDocument::new();
        let mut mtext = MText::default();
        mtext.extended_text = vec!["a".repeat(250), "b".repeat(250)];
        mtext.text = "c\\Pd".to_string();
        let mut entity = Entity::new(EntityType::MText(mtext));
        entity.common.layer = "PNTDESC".to_string();
        doc.drawing.add_entity(entity);

        let ents = doc.entities(true).unwrap();
        let expected = format!("{}{}c\nd", "a".repeat(250), "b".repeat(250));
        assert_eq!(ents, vec![DrawingEntity::mtext("PNTDESC", 0.0, 0.0, expected)]);
    }

    #[test]
    fn new_document_without_path_cannot_save() {
        let doc = DxfDocument::new();
        assert!(matches!(doc.save(), Err(DocumentError::Unavailable(_))));
    }
}
