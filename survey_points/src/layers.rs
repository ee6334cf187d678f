//! Layer names that carry survey point geometry and labels.

use serde::{Deserialize, Serialize};

/// Role a text label plays for the point it sits next to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Number,
    Elevation,
    Description,
}

/// Names of the layers holding point markers and their labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLayers {
    pub point: String,
    pub number: String,
    pub elevation: String,
    pub description: String,
}

impl Default for PointLayers {
    fn default() -> Self {
        Self {
            point: "PNTS".to_string(),
            number: "PNTNO".to_string(),
            elevation: "PNTELEV".to_string(),
            description: "PNTDESC".to_string(),
        }
    }
}

impl PointLayers {
    /// Whether `layer` is the point marker layer.
    pub fn is_point_layer(&self, layer: &str) -> bool {
        same_layer(layer, &self.point)
    }

    /// Returns the label role assigned to `layer`, if any.
    pub fn label_role(&self, layer: &str) -> Option<LabelRole> {
        if same_layer(layer, &self.number) {
            Some(LabelRole::Number)
        } else if same_layer(layer, &self.elevation) {
            Some(LabelRole::Elevation)
        } else if same_layer(layer, &self.description) {
            Some(LabelRole::Description)
        } else {
            None
        }
    }

    /// Layer a label of the given role is written to.
    pub fn layer_for(&self, role: LabelRole) -> &str {
        match role {
            LabelRole::Number => &self.number,
            LabelRole::Elevation => &self.elevation,
            LabelRole::Description => &self.description,
        }
    }
}

/// Case-insensitive layer name comparison.
pub fn same_layer(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
