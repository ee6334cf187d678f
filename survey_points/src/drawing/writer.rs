use crate::drawing::{DrawingEntityWriter, HorizontalAlignment, TextEntity, VerticalAlignment};
use crate::layers::LabelRole;
use crate::point::SurveyPoint;
use crate::settings::Settings;

/// Places a point marker for `point` and labels for its non-empty fields:
/// number above right, description below right, elevation above left.
pub fn write_point_entities<W>(writer: &mut W, point: &SurveyPoint, settings: &Settings)
where
    W: DrawingEntityWriter + ?Sized,
{
    let layers = &settings.layers;
    let style = &settings.labels;
    let pos = point.position();
    let d = style.offset;

    writer.set_active_layer(&layers.point);
    writer.add_point_entity(pos);

    let mut label = |role: LabelRole, content: String, dx: f64, dy: f64, h: HorizontalAlignment| {
        writer.set_active_layer(layers.layer_for(role));
        writer.add_text_entity(&TextEntity {
            content,
            position: pos.offset(dx, dy),
            height: style.height,
            rotation: 0.0,
            horizontal: h,
            vertical: VerticalAlignment::Bottom,
        });
    };

    if point.has_id() {
        label(LabelRole::Number, point.id.clone(), d, d, HorizontalAlignment::Left);
    }
    if !point.description.is_empty() {
        label(
            LabelRole::Description,
            point.description.clone(),
            d,
            -d,
            HorizontalAlignment::Left,
        );
    }
    if point.elevation.abs() > 1e-12 {
        label(
            LabelRole::Elevation,
            point.elevation.to_string(),
            -d,
            d,
            HorizontalAlignment::Right,
        );
    }
    writer.refresh_view();
}
