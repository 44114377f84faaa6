// SPDX-License-Identifier: GPL-3.0-only

//! Layout graphic resources.
//!
//! Each supported device model maps to one SVG file named
//! `{map}-layout.svg`. The files ship inside the crate via `rust-embed`;
//! a [`LayoutSource::Directory`] reads them from disk instead, which lets
//! packagers and tests supply their own graphics.

use crate::app_settings::MAPPING_DIR;
use crate::keyboard::LoadError;
use rust_embed::RustEmbed;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "resources/mapping/"]
struct MappingAssets;

/// Graphic used for models without a dedicated entry.
pub const DEFAULT_MAPPING: &str = "blackwidow-chroma-keyboard";

/// Models with a dedicated graphic.
pub const MODEL_MAPPINGS: &[(&str, &str)] = &[
    ("Razer BlackWidow Elite", "blackwidow-elite-keyboard"),
    ("Razer Mamba Elite", "mamba-elite-mouse"),
];

/// Returns the graphic name for a device model.
#[must_use]
pub fn mapping_for_model(model: &str) -> &'static str {
    MODEL_MAPPINGS
        .iter()
        .find(|(name, _)| *name == model)
        .map_or(DEFAULT_MAPPING, |(_, map)| map)
}

/// Returns the resource file name for a device model.
#[must_use]
pub fn resource_name(model: &str) -> String {
    format!("{}-layout.svg", mapping_for_model(model))
}

/// Returns the names of the graphics compiled into the crate.
#[must_use]
pub fn embedded_resources() -> Vec<String> {
    let mut names: Vec<String> = MappingAssets::iter().map(|name| name.into_owned()).collect();
    names.sort();
    names
}

/// Where layout graphics are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LayoutSource {
    /// Graphics compiled into the crate
    #[default]
    Embedded,
    /// Graphics read from a directory at load time
    Directory(PathBuf),
}

impl LayoutSource {
    /// Fetches a resource as text.
    pub async fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        match self {
            LayoutSource::Embedded => {
                let file = MappingAssets::get(resource).ok_or_else(|| {
                    LoadError::ResourceNotFound {
                        resource: resource.to_string(),
                        location: format!("embedded {}", MAPPING_DIR),
                    }
                })?;
                String::from_utf8(file.data.into_owned()).map_err(|_| LoadError::InvalidUtf8 {
                    resource: resource.to_string(),
                })
            }
            LayoutSource::Directory(dir) => {
                let path = dir.join(resource);
                match tokio::fs::read(&path).await {
                    Ok(bytes) => String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
                        resource: resource.to_string(),
                    }),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        Err(LoadError::ResourceNotFound {
                            resource: resource.to_string(),
                            location: dir.display().to_string(),
                        })
                    }
                    Err(e) => Err(LoadError::Io {
                        source: e,
                        path: path.display().to_string(),
                    }),
                }
            }
        }
    }
}
