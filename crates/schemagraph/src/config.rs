//! Configuration types for schema analysis.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from an
//! external file, and every section falls back to its defaults when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Spacing of the hierarchical layout.
//! - [`StyleConfig`] - Edge colors per reference mechanism.
//! - [`AnalysisConfig`] - Thresholds of the issue detector.
//!
//! # Example
//!
//! ```
//! # use schemagraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.analysis().cascade_threshold(), 2);
//! ```

use serde::Deserialize;

use schemagraph_core::color::Color;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Analysis configuration section.
    #[serde(default)]
    analysis: AnalysisConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, analysis: AnalysisConfig) -> Self {
        Self {
            layout,
            style,
            analysis,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value: a spacing that is
    /// negative or not finite, or a color string that cannot be parsed.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("layout.rank_spacing", self.layout.rank_spacing),
            ("layout.node_spacing", self.layout.node_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{name} must be a non-negative number, got {value}"
                ));
            }
        }
        self.style.foreign_key_color()?;
        self.style.embedded_color()?;
        Ok(())
    }
}

/// Spacing of the hierarchical layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between consecutive ranks.
    rank_spacing: f32,

    /// Vertical distance between nodes of the same rank.
    node_spacing: f32,
}

impl LayoutConfig {
    pub fn new(rank_spacing: f32, node_spacing: f32) -> Self {
        Self {
            rank_spacing,
            node_spacing,
        }
    }

    pub fn rank_spacing(&self) -> f32 {
        self.rank_spacing
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(280.0, 120.0)
    }
}

/// Edge colors, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    foreign_key_color: String,
    embedded_color: String,
}

impl StyleConfig {
    pub fn new(foreign_key_color: impl Into<String>, embedded_color: impl Into<String>) -> Self {
        Self {
            foreign_key_color: foreign_key_color.into(),
            embedded_color: embedded_color.into(),
        }
    }

    /// Returns the parsed color of foreign-key edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn foreign_key_color(&self) -> Result<Color, String> {
        Color::new(&self.foreign_key_color)
            .map_err(|err| format!("Invalid foreign key color in config: {err}"))
    }

    /// Returns the parsed color of embedded edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn embedded_color(&self) -> Result<Color, String> {
        Color::new(&self.embedded_color)
            .map_err(|err| format!("Invalid embedded color in config: {err}"))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new("#c17532", "#7a5c3a")
    }
}

/// Thresholds of the issue detector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// A schema with more foreign-key relationships than this is reported
    /// as a cascade risk.
    cascade_threshold: usize,
}

impl AnalysisConfig {
    pub fn new(cascade_threshold: usize) -> Self {
        Self { cascade_threshold }
    }

    pub fn cascade_threshold(&self) -> usize {
        self.cascade_threshold
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(2)
    }
}
