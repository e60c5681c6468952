//! Editor configuration.
//!
//! Every field has a default so a partial JSON object (or none at all)
//! yields a working editor.

use serde::{Deserialize, Serialize};

/// Tunables for geometry, zoom, and the remote store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side length of the node box, in graph units.
    pub node_size: f64,
    /// Gap between a node's boundary and the end of an edge line.
    pub edge_margin: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom change per unit of wheel `deltaY` (applied negated).
    pub zoom_step: f64,
    /// Prefix joined onto every request path. Empty means same origin.
    pub base_url: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_size: 50.0,
            edge_margin: 5.0,
            min_zoom: 0.125,
            max_zoom: 4.0,
            zoom_step: 0.01,
            base_url: String::new(),
        }
    }
}

impl EditorConfig {
    /// Distance from a node center to its boundary.
    pub fn half_extent(&self) -> f64 {
        self.node_size / 2.0
    }

    /// How far an edge end sits from its node center.
    pub fn edge_offset(&self) -> f64 {
        self.half_extent() + self.edge_margin
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Join a request path onto `base_url` without doubling the slash.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}{path}")
    }
}
