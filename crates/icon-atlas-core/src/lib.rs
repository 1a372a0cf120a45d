//! Rectangle packing and texture atlases for map icons and sprites.
//!
//! - Packing: `pack` places `(id, Size)` pairs on as few fixed-size pages as it
//!   can (Shelf by default, Guillotine optional), keeping a spacing gap.
//! - Atlases: `build_atlas_pages` rasterizes a `PackResult` into RGBA pages;
//!   `create_texture_atlas` does both steps from a map of images.
//! - Custom assets: `custom_assets` packs icons rendered by an `AssetProvider`.
//!
//! Quick example:
//! ```ignore
//! use std::collections::HashMap;
//! use icon_atlas_core::{PackerConfig, Size, pack};
//! # fn main() -> icon_atlas_core::Result<()> {
//! let sizes = HashMap::from([("a".to_string(), Size::new(100, 100)), ("b".to_string(), Size::new(64, 32))]);
//! let cfg = PackerConfig { max_width: 1024, max_height: 1024, ..Default::default() };
//! let out = pack(sizes, &cfg)?;
//! println!("pages: {}", out.pages.len());
//! # Ok(()) }
//! ```

pub mod assets;
pub mod atlas;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;

pub use assets::*;
pub use atlas::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
pub mod prelude {
    pub use crate::assets::{AssetInfo, AssetProvider, custom_assets};
    pub use crate::atlas::{AtlasPage, ImageSource, build_atlas_pages, create_texture_atlas};
    pub use crate::config::{Algorithm, PackerConfig, PackerConfigBuilder, SortOrder};
    pub use crate::error::{AtlasError, Result};
    pub use crate::model::{PackResult, PackStats, Page, Placement, Rect, Size, UvRect};
    pub use crate::pipeline::pack;
}
