use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Packing algorithms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Shelf rows of decreasing height; fast and predictable.
    Shelf,
    /// Guillotine free-rect splitting (best area fit, shorter leftover axis).
    Guillotine,
}

impl FromStr for Algorithm {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shelf" => Ok(Self::Shelf),
            "guillotine" => Ok(Self::Guillotine),
            _ => Err(()),
        }
    }
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shelf => "shelf",
            Self::Guillotine => "guillotine",
        }
    }
}

/// Input orderings. Every order falls back to identifier ascending on ties.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    HeightDesc,
    AreaDesc,
    MaxSideDesc,
    WidthDesc,
    IdAsc,
    /// Keep the caller's iteration order.
    None,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "height_desc" => Ok(Self::HeightDesc),
            "area_desc" => Ok(Self::AreaDesc),
            "max_side_desc" => Ok(Self::MaxSideDesc),
            "width_desc" => Ok(Self::WidthDesc),
            "id_asc" => Ok(Self::IdAsc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackerConfig {
    /// Maximum page width in pixels.
    pub max_width: u32,
    /// Maximum page height in pixels.
    pub max_height: u32,
    /// Gap reserved to the right of and below every placement.
    pub spacing: u32,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,
    /// Rasterize pages at the bounding box of their placements instead of the max size.
    #[serde(default)]
    pub trim_to_bounding_box: bool,
    /// Scale applied when deriving pack sizes from source images.
    #[serde(default = "default_pixel_scale")]
    pub pixel_scale: f32,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_width: 4096,
            max_height: 4096,
            spacing: 0,
            algorithm: default_algorithm(),
            sort_order: default_sort_order(),
            trim_to_bounding_box: false,
            pixel_scale: default_pixel_scale(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if a page dimension is zero, if the spacing leaves no
    /// room for even a 1x1 rectangle, or if `pixel_scale` is not a positive
    /// finite number.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }

        if self.spacing >= self.max_width || self.spacing >= self.max_height {
            return Err(AtlasError::InvalidConfig(format!(
                "spacing ({}) leaves no usable space in a {}x{} page",
                self.spacing, self.max_width, self.max_height
            )));
        }

        if !self.pixel_scale.is_finite() || self.pixel_scale <= 0.0 {
            return Err(AtlasError::InvalidConfig(format!(
                "pixel_scale must be positive, got {}",
                self.pixel_scale
            )));
        }

        Ok(())
    }
}

fn default_algorithm() -> Algorithm {
    Algorithm::Shelf
}
fn default_sort_order() -> SortOrder {
    SortOrder::HeightDesc
}
fn default_pixel_scale() -> f32 {
    1.0
}

/// Builder for `PackerConfig`.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn spacing(mut self, v: u32) -> Self {
        self.cfg.spacing = v;
        self
    }
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.cfg.algorithm = v;
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn trim_to_bounding_box(mut self, v: bool) -> Self {
        self.cfg.trim_to_bounding_box = v;
        self
    }
    pub fn pixel_scale(mut self, v: f32) -> Self {
        self.cfg.pixel_scale = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
