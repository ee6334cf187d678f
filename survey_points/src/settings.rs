//! Persisted settings for point synchronization and label placement.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::layers::PointLayers;

/// Size and placement of the labels written next to a point marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Text height in drawing units.
    pub height: f64,
    /// Distance from the marker along each axis.
    pub offset: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            height: 1.0,
            offset: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layers: PointLayers,
    /// Maximum distance between a point marker and a label that describes it.
    pub correlation_radius: f64,
    pub labels: LabelStyle,
    /// View radius used when zooming to a selected point.
    pub zoom_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layers: PointLayers::default(),
            correlation_radius: 3.0,
            labels: LabelStyle::default(),
            zoom_radius: 10.0,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when no path is
    /// given or the file cannot be read.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match load_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("using default settings; cannot load {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

pub fn load_settings(path: &Path) -> io::Result<Settings> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn save_settings(path: &Path, settings: &Settings) -> io::Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{ "correlation_radius": 1.5, "layers": { "point": "SURVEY" } }"#)
                .unwrap();
        assert_eq!(s.correlation_radius, 1.5);
        assert_eq!(s.layers.point, "SURVEY");
        assert_eq!(s.layers.number, "PNTNO");
        assert_eq!(s.labels, LabelStyle::default());
        assert_eq!(s.zoom_radius, 10.0);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut s = Settings::default();
        s.labels.height = 2.5;
        save_settings(&path, &s).unwrap();
        assert_eq!(load_settings(&path).unwrap(), s);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_or_default(Some(&dir.path().join("nope.json")));
        assert_eq!(s, Settings::default());
    }
}
