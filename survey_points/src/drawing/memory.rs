use crate::drawing::{
    DrawingEntity, DrawingEntityReader, DrawingEntityWriter, EntityKind, TextEntity,
};
use crate::error::DocumentError;
use crate::geometry::Point;

/// In-memory host document.
#[derive(Debug, Default)]
pub struct MemoryDrawing {
    entities: Vec<(DrawingEntity, bool)>,
    texts: Vec<(String, TextEntity)>,
    active_layer: String,
    refreshes: usize,
    zoom: Option<(Point, f64)>,
    unavailable: bool,
}

impl MemoryDrawing {
    pub fn new() -> Self {
        Self {
            active_layer: "0".to_string(),
            ..Self::default()
        }
    }

    /// Creates a drawing holding `entities`, all visible.
    pub fn with_entities(entities: Vec<DrawingEntity>) -> Self {
        let mut drawing = Self::new();
        drawing.entities = entities.into_iter().map(|e| (e, true)).collect();
        drawing
    }

    pub fn push(&mut self, entity: DrawingEntity) {
        self.entities.push((entity, true));
    }

    pub fn push_hidden(&mut self, entity: DrawingEntity) {
        self.entities.push((entity, false));
    }

    /// Makes every later enumeration fail.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn active_layer(&self) -> &str {
        &self.active_layer
    }

    /// Text entities written through the writer contract, with their layer.
    pub fn texts(&self) -> &[(String, TextEntity)] {
        &self.texts
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn last_zoom(&self) -> Option<(Point, f64)> {
        self.zoom
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl DrawingEntityReader for MemoryDrawing {
    fn entities(&self, include_all: bool) -> Result<Vec<DrawingEntity>, DocumentError> {
        if self.unavailable {
            return Err(DocumentError::Unavailable("drawing is not open".into()));
        }
        Ok(self
            .entities
            .iter()
            .filter(|(_, visible)| include_all || *visible)
            .map(|(e, _)| e.clone())
            .collect())
    }
}

impl DrawingEntityWriter for MemoryDrawing {
    fn set_active_layer(&mut self, name: &str) {
        self.active_layer = name.to_string();
    }

    fn add_point_entity(&mut self, position: Point) {
        let entity = DrawingEntity::new(self.active_layer.clone(), position, EntityKind::Point);
        self.entities.push((entity, true));
    }

    fn add_text_entity(&mut self, text: &TextEntity) {
        let entity = DrawingEntity::new(
            self.active_layer.clone(),
            text.position,
            EntityKind::Text(text.content.clone()),
        );
        self.entities.push((entity, true));
        self.texts.push((self.active_layer.clone(), text.clone()));
    }

    fn refresh_view(&mut self) {
        self.refreshes += 1;
    }

    fn zoom_to_point(&mut self, center: Point, radius: f64) {
        self.zoom = Some((center, radius));
    }
}
