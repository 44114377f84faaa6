// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application name, used for the default log directive.
pub const APP_NAME: &str = "chromakeys";

/// Default `tracing` filter directive for the binary.
pub const DEFAULT_LOG_DIRECTIVE: &str = "chromakeys=info";

/// Default id of the element hosting the keyboard graphic.
pub const DEFAULT_CONTAINER_ID: &str = "keyboard-div";

// ============================================================================
// Key Styling
// ============================================================================

/// Fill of a key with no colour assigned.
pub const EMPTY_KEY_FILL: &str = "#000";

/// Border (and text stroke) of a key with no colour assigned.
pub const EMPTY_KEY_BORDER: &str = "#404040";

/// Border of a key with a colour assigned.
pub const USED_KEY_BORDER: &str = "#808080";

/// Text stroke drawn on dark key fills.
pub const LIGHT_TEXT_STROKE: &str = "#ffffff";

/// Text stroke drawn on light key fills.
pub const DARK_TEXT_STROKE: &str = "#000000";

/// Luminance threshold (0-255 scale) below which a fill counts as dark.
pub const LUMINANCE_THRESHOLD: u32 = 128;

// ============================================================================
// Layout Graphic Conventions
// ============================================================================

/// Layout used when a switch is requested to a layout that does not exist.
pub const FALLBACK_LAYOUT: &str = "kb-gb";

/// Class carried by every layout group.
pub const LAYOUT_CLASS: &str = "kblayout";

/// Class carried by every key group.
pub const KEY_CLASS: &str = "key";

/// Id of the group holding the ambient background shapes.
pub const EFFECT_LAYER_ID: &str = "effect-layer";

/// Element names that make up the visible body of a key.
pub const SHAPE_TAGS: &[&str] = &["path", "rect", "ellipse"];

/// Element names that make up the label of a key.
pub const LABEL_TAGS: &[&str] = &["text"];

/// Directory (relative to the crate root) of the embedded layout graphics.
pub const MAPPING_DIR: &str = "resources/mapping";
