// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layout widget.
//!
//! This module provides [`KeyboardWidget`], which presents a device layout
//! graphic and tracks per-key colours, LED indicators, key interactivity and
//! the active layout.
//!
//! # Features
//!
//! - **Layout discovery**: groups with class `kblayout` become layouts
//! - **Key colours**: set, clear and read key fills by row/column or id
//! - **Contrast**: key labels switch between white and black strokes
//! - **LED indicators**: Caps Lock, Num Lock, Scroll Lock, Game Mode, Macro
//! - **Interactivity**: keys can be detached from pointer handling
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use chromakeys::keyboard::{KeyboardWidget, Led};
//! use chromakeys::resources::LayoutSource;
//!
//! let mut widget = KeyboardWidget::new("keyboard-div", LayoutSource::Embedded);
//! widget.load("Razer BlackWidow Elite", |_| {}).await?;
//!
//! if !widget.set_active_layout("kb-us") {
//!     eprintln!("kb-us missing, showing {:?}", widget.active_layout());
//! }
//! widget.set_key_color(2, 3, "#00ff00");
//! widget.set_led_state(Led::CapsLock, true);
//! ```

pub mod style;
pub mod types;
pub mod widget;

#[cfg(test)]
pub(crate) mod fixtures;

pub use style::KeyStyle;
pub use types::{EffectMode, KeyId, Led, LoadError, UnknownNameError, WidgetError};
pub use widget::KeyboardWidget;
