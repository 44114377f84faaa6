// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for the keyboard widget.
//!
//! This module defines key addressing, LED indicators, effect modes and the
//! error types returned by widget operations.

use crate::scene::SceneError;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Key Addressing
// ============================================================================

/// Row/column address of a key, written `key{row}-{col}` in layout graphics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId {
    /// Matrix row
    pub row: u32,
    /// Matrix column
    pub col: u32,
}

impl KeyId {
    /// Creates a new key address.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Returns the element id of this key, e.g. `key1-5`.
    #[must_use]
    pub fn element_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key{}-{}", self.row, self.col)
    }
}

impl FromStr for KeyId {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || UnknownNameError::new("key id", s);
        let (row, col) = s
            .strip_prefix("key")
            .and_then(|rest| rest.split_once('-'))
            .ok_or_else(err)?;
        Ok(Self {
            row: row.parse().map_err(|_| err())?,
            col: col.parse().map_err(|_| err())?,
        })
    }
}

// ============================================================================
// LED Indicators
// ============================================================================

/// LED indicators drawn on a layout graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    /// Caps Lock indicator
    CapsLock,
    /// Num Lock indicator
    NumLock,
    /// Scroll Lock indicator
    ScrollLock,
    /// Game Mode indicator
    GameMode,
    /// Macro recording indicator
    Macro,
}

impl Led {
    /// Every LED indicator.
    pub const ALL: [Led; 5] = [
        Led::CapsLock,
        Led::NumLock,
        Led::ScrollLock,
        Led::GameMode,
        Led::Macro,
    ];

    /// Returns the id of the element drawing this LED.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Led::CapsLock => "caps-lock",
            Led::NumLock => "num-lock",
            Led::ScrollLock => "scroll-lock",
            Led::GameMode => "game-mode",
            Led::Macro => "macro-led",
        }
    }
}

impl fmt::Display for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

impl FromStr for Led {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caps-lock" => Ok(Led::CapsLock),
            "num-lock" => Ok(Led::NumLock),
            "scroll-lock" => Ok(Led::ScrollLock),
            "game-mode" => Ok(Led::GameMode),
            "macro" | "macro-led" => Ok(Led::Macro),
            other => Err(UnknownNameError::new("LED", other)),
        }
    }
}

// ============================================================================
// Effect Modes
// ============================================================================

/// Lighting effect shown behind the keys.
///
/// Only [`EffectMode::None`] changes the graphic; the animated modes are
/// driven by the backend and leave the effect layer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectMode {
    /// No effect; the background is reset to the empty style
    #[default]
    None,
    /// Single static colour
    Static,
    /// Colour wave across the keyboard
    Wave,
    /// Cycling spectrum
    Spectrum,
    /// Keys light up when pressed
    Reactive,
    /// Breathing pulse
    Breath,
    /// Ripple from pressed keys
    Ripple,
    /// Random twinkling keys
    Starlight,
}

impl FromStr for EffectMode {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(EffectMode::None),
            "static" => Ok(EffectMode::Static),
            "wave" => Ok(EffectMode::Wave),
            "spectrum" => Ok(EffectMode::Spectrum),
            "reactive" => Ok(EffectMode::Reactive),
            "breath" => Ok(EffectMode::Breath),
            "ripple" => Ok(EffectMode::Ripple),
            "starlight" => Ok(EffectMode::Starlight),
            other => Err(UnknownNameError::new("effect mode", other)),
        }
    }
}

// ============================================================================
// Error Handling Types
// ============================================================================

/// A name that does not match any known LED, effect mode, key id or editor mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNameError {
    /// What kind of name was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl UnknownNameError {
    /// Creates a new error.
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for UnknownNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownNameError {}

/// Error returned when a layout graphic cannot be loaded.
///
/// A failed load is terminal for the widget instance: the caller must build
/// a new widget (or call `load` again) rather than expect a retry.
#[derive(Debug)]
pub enum LoadError {
    /// The resolved resource does not exist
    ResourceNotFound {
        /// Resource file name
        resource: String,
        /// Where the resource was looked up
        location: String,
    },

    /// The resource exists but could not be read
    Io {
        /// The underlying I/O error
        source: std::io::Error,
        /// Path being read
        path: String,
    },

    /// The resource is not valid UTF-8
    InvalidUtf8 {
        /// Resource file name
        resource: String,
    },

    /// The resource is not a usable SVG document
    Scene {
        /// The underlying scene error
        source: SceneError,
        /// Resource file name
        resource: String,
    },

    /// The graphic contains no layout groups
    NoLayouts {
        /// Resource file name
        resource: String,
    },

    /// `load` was called on a widget that already finished loading
    AlreadyLoaded,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::ResourceNotFound { resource, location } => {
                write!(f, "Layout resource '{}' not found in {}", resource, location)
            }
            LoadError::Io { source, path } => {
                write!(f, "I/O error reading layout resource '{}': {}", path, source)
            }
            LoadError::InvalidUtf8 { resource } => {
                write!(f, "Layout resource '{}' is not valid UTF-8", resource)
            }
            LoadError::Scene { source, resource } => {
                write!(f, "Layout resource '{}' could not be parsed: {}", resource, source)
            }
            LoadError::NoLayouts { resource } => write!(
                f,
                "Layout resource '{}' contains no layout groups\n  Suggestion: \
                 mark each layout group with class=\"kblayout\"",
                resource
            ),
            LoadError::AlreadyLoaded => write!(f, "Keyboard widget is already loaded"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Scene { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error returned by strict widget operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The widget has not finished loading
    NotLoaded,
    /// The requested layout is not in the loaded graphic
    UnknownLayout {
        /// Requested layout id
        requested: String,
        /// Layouts the graphic provides
        available: Vec<String>,
    },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::NotLoaded => write!(f, "Keyboard widget has not been loaded"),
            WidgetError::UnknownLayout {
                requested,
                available,
            } => write!(
                f,
                "Layout '{}' does not exist (available: {})",
                requested,
                available.join(", ")
            ),
        }
    }
}

impl std::error::Error for WidgetError {}

// ============================================================================
// Tests
// ============================================================================
