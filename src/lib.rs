// SPDX-License-Identifier: GPL-3.0-only

//! Chromakeys - keyboard layout widget for a peripheral lighting editor
//!
//! This crate presents device layout graphics (SVG) for a Linux lighting
//! profile editor and turns clicks on keys into commands for the native
//! backend that drives the hardware.
//!
//! # Architecture
//!
//! 1. **Scene** (`scene`): a mutable SVG element tree with lookup by id,
//!    class and tag name.
//!
//! 2. **Widget** (`keyboard`): indexes layouts, keys and LEDs in a scene and
//!    applies the key colour rules.
//!
//! 3. **Editor** (`editor`): owns a widget plus the editing mode and picker
//!    colour, and sends [`backend::BackendCommand`]s over a channel.
//!
//! # Modules
//!
//! - `app_settings`: Centralized constants (colours, class names, fallback layout)
//! - `backend`: Commands for the native backend and their string encoding
//! - `config`: User configuration read from JSON
//! - `editor`: Editing modes and key click handling
//! - `keyboard`: The keyboard layout widget
//! - `resources`: Device model table and layout graphic sources
//! - `scene`: SVG scene graph

pub mod app_settings;
pub mod backend;
pub mod config;
pub mod editor;
pub mod keyboard;
pub mod resources;
pub mod scene;

pub use keyboard::KeyboardWidget;

// ============================================================================
// Integration Tests
// ============================================================================
