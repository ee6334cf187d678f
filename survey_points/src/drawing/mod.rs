//! Drawing entities and the contracts a host document must provide.

use crate::error::DocumentError;
use crate::geometry::Point;

pub mod dxf_document;
pub use dxf_document::DxfDocument;

pub mod memory;
pub use memory::MemoryDrawing;

pub mod writer;
pub use writer::write_point_entities;

/// Type of a drawing entity with its type-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Point,
    Text(String),
    MultilineText(String),
    Line,
    Circle,
    Other,
}

/// Snapshot of a single entity read from a host document.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingEntity {
    pub layer: String,
    /// Start point, insertion point or center depending on the kind.
    pub position: Point,
    pub kind: EntityKind,
}

impl DrawingEntity {
    pub fn new(layer: impl Into<String>, position: Point, kind: EntityKind) -> Self {
        Self {
            layer: layer.into(),
            position,
            kind,
        }
    }

    pub fn point(layer: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(layer, Point::new(x, y), EntityKind::Point)
    }

    pub fn text(layer: impl Into<String>, x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::new(layer, Point::new(x, y), EntityKind::Text(content.into()))
    }

    pub fn mtext(layer: impl Into<String>, x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::new(layer, Point::new(x, y), EntityKind::MultilineText(content.into()))
    }

    /// Text content for text and multiline text entities.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Text(s) | EntityKind::MultilineText(s) => Some(s),
            _ => None,
        }
    }
}

/// Text entity read from the drawing and considered as point metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Point,
    pub layer: String,
    pub text: String,
}

impl Label {
    /// Projects a text or multiline text entity into a label.
    pub fn from_entity(entity: &DrawingEntity) -> Option<Self> {
        entity.text_content().map(|text| Self {
            position: entity.position,
            layer: entity.layer.clone(),
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    Baseline,
    #[default]
    Bottom,
    Middle,
    Top,
}

/// Text entity to be placed into a drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntity {
    pub content: String,
    pub position: Point,
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

/// Read access to the entities of a host document.
pub trait DrawingEntityReader {
    /// Enumerates entities. Hidden entities are included only when
    /// `include_all` is set.
    fn entities(&self, include_all: bool) -> Result<Vec<DrawingEntity>, DocumentError>;
}

/// Mutation primitives of a host document.
pub trait DrawingEntityWriter {
    /// Makes `name` the layer new entities are placed on.
    fn set_active_layer(&mut self, name: &str);
    fn add_point_entity(&mut self, position: Point);
    fn add_text_entity(&mut self, text: &TextEntity);
    fn refresh_view(&mut self);
    fn zoom_to_point(&mut self, center: Point, radius: f64);
}

/// A host document offering both contracts.
pub trait DrawingDocument: DrawingEntityReader + DrawingEntityWriter {}

impl<T: DrawingEntityReader + DrawingEntityWriter + ?Sized> DrawingDocument for T {}
