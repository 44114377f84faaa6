// SPDX-License-Identifier: GPL-3.0-only

//! Shared graphics and helpers for widget tests.

use crate::keyboard::KeyboardWidget;
use crate::resources::{self, LayoutSource};
use tempfile::TempDir;

/// Two layouts, `kb-a` visible and `kb-b` hidden, with a Caps Lock and a
/// Macro LED and an effect layer. `key1-1` exists only in `kb-b`.
pub(crate) const TWO_LAYOUT_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200" height="120">
  <g id="effect-layer">
    <rect x="0" y="0" width="200" height="120" fill="#222" stroke="#111"/>
  </g>
  <g id="kb-a" class="kblayout">
    <g id="key0-0" class="key">
      <rect x="0" y="0" width="30" height="30" fill="#ff0000"/>
      <text x="5" y="20">Esc</text>
    </g>
    <g id="key0-1" class="key">
      <rect x="40" y="0" width="30" height="30"/>
      <text x="45" y="20">F1</text>
    </g>
    <g id="key1-0" class="key">
      <path d="M0 40h30v30h-30z"/>
      <text x="5" y="60">Tab</text>
    </g>
  </g>
  <g id="kb-b" class="kblayout" style="display:none">
    <g id="key0-0" class="key">
      <rect x="0" y="0" width="30" height="30"/>
      <text x="5" y="20">Esc</text>
    </g>
    <g id="key1-1" class="key">
      <ellipse cx="55" cy="55" rx="15" ry="15"/>
      <text x="45" y="60">Q</text>
    </g>
  </g>
  <rect id="caps-lock" x="180" y="0" width="10" height="4" display="none"/>
  <rect id="macro-led" x="180" y="10" width="10" height="4" display="none"/>
</svg>
"##;

/// Writes `svg` as the default graphic into a temporary directory.
pub(crate) fn fixture_dir(svg: &str) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(resources::resource_name("any model"));
    std::fs::write(path, svg).expect("write fixture graphic");
    dir
}

/// Loads `svg` into a new widget. Keep the directory alive for the test.
pub(crate) async fn load_fixture(svg: &str) -> (TempDir, KeyboardWidget) {
    let dir = fixture_dir(svg);
    let mut widget = KeyboardWidget::new("keyboard-div", LayoutSource::Directory(dir.path().into()));
    widget
        .load("any model", |_| {})
        .await
        .expect("fixture graphic should load");
    (dir, widget)
}
