//! Stroke definitions for relationship edges in layout output.
//!
//! An [`EdgeStroke`] carries the visual weight of an edge: its color, line
//! width and whether a renderer should animate it.
//!
//! ```
//! use schemagraph_core::{color::Color, stroke::EdgeStroke};
//!
//! let stroke = EdgeStroke::solid(Color::new("#c17532").unwrap(), 2.0).with_animated(true);
//! assert_eq!(stroke.width(), 2.0);
//! ```

use serde::Serialize;

use crate::color::Color;

/// Visual properties of an edge stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStroke {
    color: Color,
    #[serde(rename = "strokeWidth")]
    width: f32,
    animated: bool,
}

impl EdgeStroke {
    /// Creates a solid, non-animated stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            animated: false,
        }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.set_animated(animated);
        self
    }
}

impl Default for EdgeStroke {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_animated_solid_stroke() {
        let stroke = EdgeStroke::solid(Color::new("red").unwrap(), 2.0).with_animated(true);

        assert_eq!(stroke.color().to_hex(), "#ff0000");
        assert!(approx_eq!(f32, stroke.width(), 2.0));
        assert!(stroke.animated());
    }

    #[test]
    fn test_serialization() {
        let stroke = EdgeStroke::solid(Color::new("#7a5c3a").unwrap(), 1.0);
        let json = serde_json::to_string(&stroke).unwrap();
        assert_eq!(json, r##"{"color":"#7a5c3a","strokeWidth":1.0,"animated":false}"##);
    }
}
