// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard layout widget.
//!
//! [`KeyboardWidget`] owns the scene of one device graphic. The graphic holds
//! one or more layout groups (class `kblayout`); exactly one of them is
//! visible at a time after loading. Keys are groups named `key{row}-{col}`
//! inside a layout, so the same key id exists once per layout and every key
//! operation addresses the active layout.
//!
//! Nothing but [`KeyboardWidget::load`] may be relied upon before loading
//! completes: reads return `None` and writes are ignored.

use crate::app_settings::{
    EFFECT_LAYER_ID, FALLBACK_LAYOUT, KEY_CLASS, LABEL_TAGS, LAYOUT_CLASS, SHAPE_TAGS,
};
use crate::keyboard::style::KeyStyle;
use crate::keyboard::types::{EffectMode, KeyId, Led, LoadError, WidgetError};
use crate::resources::{self, LayoutSource};
use crate::scene::{NodeId, Scene};
use std::collections::HashSet;

/// A layout group discovered in the graphic.
#[derive(Debug, Clone)]
struct LayoutEntry {
    id: String,
    node: NodeId,
}

/// State that exists only once a graphic has been loaded.
#[derive(Debug, Clone)]
struct Loaded {
    scene: Scene,
    layouts: Vec<LayoutEntry>,
    /// Index into `layouts`
    active: usize,
    /// Key groups whose pointer handler has been detached
    disabled: HashSet<NodeId>,
}

impl Loaded {
    fn active_node(&self) -> NodeId {
        self.layouts[self.active].node
    }

    fn key_node(&self, key_id: &str) -> Option<NodeId> {
        self.scene.find_by_id_within(self.active_node(), key_id)
    }

    fn position(&self, layout: &str) -> Option<usize> {
        self.layouts.iter().position(|l| l.id == layout)
    }

    fn apply_style(&mut self, key: NodeId, style: &KeyStyle) {
        for label in self.scene.select_tags(key, LABEL_TAGS) {
            self.scene.set_attr(label, "stroke", style.text_stroke);
        }
        for shape in self.scene.select_tags(key, SHAPE_TAGS) {
            self.scene.set_attr(shape, "stroke", style.border);
            self.scene.set_attr(shape, "fill", style.fill.as_str());
        }
    }

    fn switch_to(&mut self, index: usize) {
        let old = self.active_node();
        let new = self.layouts[index].node;
        self.scene.set_display(old, false);
        self.scene.set_display(new, true);
        self.active = index;
    }
}

/// Widget presenting a device layout graphic.
///
/// # Example
///
/// ```rust,ignore
/// use chromakeys::keyboard::KeyboardWidget;
/// use chromakeys::resources::LayoutSource;
///
/// let mut widget = KeyboardWidget::new("keyboard-div", LayoutSource::Embedded);
/// widget
///     .load("Razer BlackWidow Elite", |w| {
///         tracing::info!("Layouts: {:?}", w.available_layouts());
///     })
///     .await?;
///
/// widget.set_key_color(1, 5, "#ff0000");
/// assert_eq!(widget.get_key_color(1, 5).as_deref(), Some("#ff0000"));
/// ```
#[derive(Debug, Clone)]
pub struct KeyboardWidget {
    container_id: String,
    source: LayoutSource,
    fallback_layout: String,
    loaded: Option<Loaded>,
}

impl KeyboardWidget {
    /// Creates an unloaded widget.
    ///
    /// # Arguments
    ///
    /// * `container_id` - Id of the view element hosting the graphic
    /// * `source` - Where layout graphics are fetched from
    pub fn new(container_id: impl Into<String>, source: LayoutSource) -> Self {
        Self {
            container_id: container_id.into(),
            source,
            fallback_layout: FALLBACK_LAYOUT.to_string(),
            loaded: None,
        }
    }

    /// Sets the layout substituted by [`set_active_layout`](Self::set_active_layout)
    /// when the requested one does not exist.
    #[must_use]
    pub fn with_fallback_layout(mut self, layout: impl Into<String>) -> Self {
        self.fallback_layout = layout.into();
        self
    }

    /// Returns the id of the view element hosting the graphic.
    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Returns the source graphics are fetched from.
    #[must_use]
    pub fn source(&self) -> &LayoutSource {
        &self.source
    }

    /// Returns true once [`load`](Self::load) has completed successfully.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Loads the graphic for a device model.
    ///
    /// The resource is resolved from the model table (unknown models use the
    /// default graphic), fetched, and parsed. Layout groups are discovered,
    /// one of them is made the only visible layout, all keys are reset to the
    /// empty style, and the effect layer is cleared. `on_ready` then runs
    /// exactly once.
    ///
    /// On error the widget stays unloaded and `on_ready` is not called.
    pub async fn load<F>(&mut self, model: &str, on_ready: F) -> Result<(), LoadError>
    where
        F: FnOnce(&mut KeyboardWidget),
    {
        if self.loaded.is_some() {
            return Err(LoadError::AlreadyLoaded);
        }

        let resource = resources::resource_name(model);
        tracing::debug!(
            "Loading '{}' for model '{}' into #{}",
            resource,
            model,
            self.container_id
        );

        let text = self.source.fetch(&resource).await?;
        let scene = Scene::parse(&text).map_err(|source| LoadError::Scene {
            source,
            resource: resource.clone(),
        })?;

        let loaded = discover_layouts(scene).ok_or(LoadError::NoLayouts {
            resource: resource.clone(),
        })?;

        tracing::info!(
            "Loaded '{}' with layouts [{}], active '{}'",
            resource,
            loaded
                .layouts
                .iter()
                .map(|l| l.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            loaded.layouts[loaded.active].id
        );

        self.loaded = Some(loaded);
        self.setup();
        on_ready(self);
        Ok(())
    }

    /// Resets keys and the effect layer; run after loading and every switch.
    fn setup(&mut self) {
        self.reset_all_keys();
        self.set_effect_mode(EffectMode::None);
    }

    // ========================================================================
    // Layouts
    // ========================================================================

    /// Returns the layout ids found in the graphic, in document order.
    #[must_use]
    pub fn available_layouts(&self) -> Vec<&str> {
        self.loaded
            .as_ref()
            .map(|l| l.layouts.iter().map(|e| e.id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Returns the id of the visible layout.
    #[must_use]
    pub fn active_layout(&self) -> Option<&str> {
        self.loaded
            .as_ref()
            .map(|l| l.layouts[l.active].id.as_str())
    }

    /// Returns the ids of the layout groups currently displayed in the scene.
    #[must_use]
    pub fn visible_layouts(&self) -> Vec<&str> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        loaded
            .layouts
            .iter()
            .filter(|l| loaded.scene.is_displayed(l.node))
            .map(|l| l.id.as_str())
            .collect()
    }

    /// Switches the visible layout.
    ///
    /// When `layout` does not exist the error is logged and the fallback
    /// layout is shown instead (or the current layout is kept if the
    /// fallback is missing too). Either way keys are reset afterwards.
    ///
    /// # Returns
    ///
    /// `true` if the requested layout is now active, `false` if a
    /// substitute was used or the widget is not loaded.
    pub fn set_active_layout(&mut self, layout: &str) -> bool {
        let fallback = self.fallback_layout.clone();
        let Some(loaded) = self.loaded.as_mut() else {
            tracing::warn!("Layout switch to '{}' before load", layout);
            return false;
        };

        let (target, exists) = match loaded.position(layout) {
            Some(index) => (index, true),
            None => {
                tracing::error!(
                    "Layout \"{}\" does not exist! Using '{}'.",
                    layout,
                    fallback
                );
                (loaded.position(&fallback).unwrap_or(loaded.active), false)
            }
        };

        loaded.switch_to(target);
        tracing::info!("Active layout: {}", loaded.layouts[target].id);
        self.setup();
        exists
    }

    /// Switches the visible layout, failing without side effects when
    /// `layout` does not exist.
    pub fn try_set_active_layout(&mut self, layout: &str) -> Result<(), WidgetError> {
        let loaded = self.loaded.as_mut().ok_or(WidgetError::NotLoaded)?;
        let index = loaded
            .position(layout)
            .ok_or_else(|| WidgetError::UnknownLayout {
                requested: layout.to_string(),
                available: loaded.layouts.iter().map(|l| l.id.clone()).collect(),
            })?;

        loaded.switch_to(index);
        tracing::info!("Active layout: {}", layout);
        self.setup();
        Ok(())
    }

    // ========================================================================
    // Keys
    // ========================================================================

    /// Returns the fill of a key in the active layout, or `None` if the key
    /// does not exist.
    #[must_use]
    pub fn get_key_color(&self, row: u32, col: u32) -> Option<String> {
        self.get_key_color_by_id(&KeyId::new(row, col).element_id())
    }

    /// Returns the fill of a key addressed by element id.
    #[must_use]
    pub fn get_key_color_by_id(&self, key_id: &str) -> Option<String> {
        let loaded = self.loaded.as_ref()?;
        let key = loaded.key_node(key_id)?;
        let shape = *loaded.scene.select_tags(key, SHAPE_TAGS).first()?;
        loaded.scene.attr(shape, "fill").map(str::to_string)
    }

    /// Returns true if the active layout has a key at `row`/`col`.
    #[must_use]
    pub fn has_key(&self, row: u32, col: u32) -> bool {
        self.loaded
            .as_ref()
            .and_then(|l| l.key_node(&KeyId::new(row, col).element_id()))
            .is_some()
    }

    /// Sets the colour of a key. See [`set_key_color_by_id`](Self::set_key_color_by_id).
    pub fn set_key_color(&mut self, row: u32, col: u32, color: &str) {
        self.set_key_color_by_id(&KeyId::new(row, col).element_id(), color);
    }

    /// Sets the colour of a key addressed by element id, e.g. `key1-5`.
    ///
    /// The empty sentinel (`#000` / `#000000`) resets the key to the empty
    /// style. Missing keys are ignored.
    pub fn set_key_color_by_id(&mut self, key_id: &str, color: &str) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let Some(key) = loaded.key_node(key_id) else {
            tracing::debug!("No key '{}' in the active layout", key_id);
            return;
        };
        let style = KeyStyle::for_color(color);
        loaded.apply_style(key, &style);
        tracing::debug!("Key {} set to {}", key_id, style.fill);
    }

    /// Resets a key to the empty style.
    pub fn clear_key_by_id(&mut self, key_id: &str) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        match loaded.key_node(key_id) {
            Some(key) => loaded.apply_style(key, &KeyStyle::empty()),
            None => tracing::debug!("No key '{}' in the active layout", key_id),
        }
    }

    /// Resets every key of the active layout to the empty style.
    pub fn reset_all_keys(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let keys = loaded.scene.select_class(loaded.active_node(), KEY_CLASS);
        let empty = KeyStyle::empty();
        for key in keys {
            loaded.apply_style(key, &empty);
        }
    }

    /// Attaches the pointer handler of a key. Its colour is unchanged.
    pub fn enable_key(&mut self, row: u32, col: u32) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        if let Some(key) = loaded.key_node(&KeyId::new(row, col).element_id()) {
            loaded.disabled.remove(&key);
        }
    }

    /// Detaches the pointer handler of a key. Its colour is unchanged.
    pub fn disable_key(&mut self, row: u32, col: u32) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        if let Some(key) = loaded.key_node(&KeyId::new(row, col).element_id()) {
            loaded.disabled.insert(key);
        }
    }

    /// Returns true if the key exists in the active layout and accepts
    /// pointer interaction.
    #[must_use]
    pub fn is_key_enabled(&self, row: u32, col: u32) -> bool {
        let Some(loaded) = self.loaded.as_ref() else {
            return false;
        };
        loaded
            .key_node(&KeyId::new(row, col).element_id())
            .is_some_and(|key| !loaded.disabled.contains(&key))
    }

    // ========================================================================
    // Effects and LEDs
    // ========================================================================

    /// Applies an effect mode to the background layer.
    ///
    /// Only [`EffectMode::None`] has a visual effect here: every shape of the
    /// effect layer gets the empty fill and border.
    pub fn set_effect_mode(&mut self, mode: EffectMode) {
        if mode != EffectMode::None {
            return;
        }
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let Some(layer) = loaded.scene.find_by_id(EFFECT_LAYER_ID) else {
            return;
        };
        let empty = KeyStyle::empty();
        for rect in loaded.scene.select_tags(layer, &["rect"]) {
            loaded.scene.set_attr(rect, "fill", empty.fill.as_str());
            loaded.scene.set_attr(rect, "stroke", empty.border);
        }
    }

    /// Shows or hides an LED indicator.
    pub fn set_led_state(&mut self, led: Led, enabled: bool) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        match loaded.scene.find_by_id(led.element_id()) {
            Some(node) => loaded.scene.set_display(node, enabled),
            None => tracing::debug!("Graphic has no '{}' indicator", led),
        }
    }

    /// Returns whether an LED indicator is shown, or `None` if the graphic
    /// does not draw it.
    #[must_use]
    pub fn led_state(&self, led: Led) -> Option<bool> {
        let loaded = self.loaded.as_ref()?;
        let node = loaded.scene.find_by_id(led.element_id())?;
        Some(loaded.scene.is_displayed(node))
    }

    /// Shows or hides the Caps Lock indicator.
    pub fn set_caps_lock(&mut self, enabled: bool) {
        self.set_led_state(Led::CapsLock, enabled);
    }

    /// Shows or hides the Num Lock indicator.
    pub fn set_num_lock(&mut self, enabled: bool) {
        self.set_led_state(Led::NumLock, enabled);
    }

    /// Shows or hides the Scroll Lock indicator.
    pub fn set_scroll_lock(&mut self, enabled: bool) {
        self.set_led_state(Led::ScrollLock, enabled);
    }

    /// Shows or hides the Game Mode indicator.
    pub fn set_game_mode(&mut self, enabled: bool) {
        self.set_led_state(Led::GameMode, enabled);
    }

    /// Shows or hides the Macro indicator.
    pub fn set_macro_led(&mut self, enabled: bool) {
        self.set_led_state(Led::Macro, enabled);
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Returns the loaded scene.
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.loaded.as_ref().map(|l| &l.scene)
    }

    /// Serializes the current graphic for display.
    #[must_use]
    pub fn to_svg(&self) -> Option<String> {
        self.scene().map(Scene::to_svg_string)
    }
}

/// Indexes the layout groups of a freshly parsed scene and makes exactly one
/// of them visible: the last displayed group, or the first group if every
/// group is hidden. Returns `None` when the scene has no layouts.
fn discover_layouts(mut scene: Scene) -> Option<Loaded> {
    let mut layouts = Vec::new();
    for node in scene.select_class(scene.root(), LAYOUT_CLASS) {
        match scene.attr(node, "id") {
            Some(id) => layouts.push(LayoutEntry {
                id: id.to_string(),
                node,
            }),
            None => tracing::warn!("Ignoring layout group without an id"),
        }
    }
    if layouts.is_empty() {
        return None;
    }

    let active = match layouts.iter().rposition(|l| scene.is_displayed(l.node)) {
        Some(index) => index,
        None => {
            tracing::warn!("No active layout found, showing '{}'", layouts[0].id);
            0
        }
    };

    for (index, layout) in layouts.iter().enumerate() {
        if index == active {
            scene.set_display(layout.node, true);
        } else if scene.is_displayed(layout.node) {
            tracing::warn!("Hiding extra visible layout '{}'", layout.id);
            scene.set_display(layout.node, false);
        }
    }

    Some(Loaded {
        scene,
        layouts,
        active,
        disabled: HashSet::new(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_settings::{EMPTY_KEY_BORDER, EMPTY_KEY_FILL, USED_KEY_BORDER};
    use crate::keyboard::fixtures::{self, TWO_LAYOUT_SVG};

    /// Returns the (fill, shape stroke, label stroke) of a key in the active layout.
    fn key_visual(widget: &KeyboardWidget, key_id: &str) -> (String, String, String) {
        let loaded = widget.loaded.as_ref().unwrap();
        let key = loaded.key_node(key_id).unwrap();
        let scene = &loaded.scene;
        let shape = scene.select_tags(key, SHAPE_TAGS)[0];
        let label = scene.select_tags(key, LABEL_TAGS)[0];
        (
            scene.attr(shape, "fill").unwrap().to_string(),
            scene.attr(shape, "stroke").unwrap().to_string(),
            scene.attr(label, "stroke").unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_load_discovers_layouts() {
        let (_dir, widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        assert!(widget.is_loaded());
        assert_eq!(widget.available_layouts(), vec!["kb-a", "kb-b"]);
        assert_eq!(widget.active_layout(), Some("kb-a"));
        assert_eq!(widget.visible_layouts(), vec!["kb-a"]);
    }

    #[tokio::test]
    async fn test_load_resets_keys_and_effect_layer() {
        let (_dir, widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        assert_eq!(
            key_visual(&widget, "key0-0"),
            (
                EMPTY_KEY_FILL.to_string(),
                EMPTY_KEY_BORDER.to_string(),
                EMPTY_KEY_BORDER.to_string()
            )
        );

        let scene = widget.scene().unwrap();
        let layer = scene.find_by_id(EFFECT_LAYER_ID).unwrap();
        for rect in scene.select_tags(layer, &["rect"]) {
            assert_eq!(scene.attr(rect, "fill"), Some(EMPTY_KEY_FILL));
            assert_eq!(scene.attr(rect, "stroke"), Some(EMPTY_KEY_BORDER));
        }
    }

    #[tokio::test]
    async fn test_load_calls_on_ready_once() {
        let dir = fixtures::fixture_dir(TWO_LAYOUT_SVG);
        let mut widget = KeyboardWidget::new("kb", LayoutSource::Directory(dir.path().into()));
        let mut calls = 0;

        widget
            .load("any model", |w| {
                assert!(w.is_loaded());
                calls += 1;
            })
            .await
            .unwrap();
        assert_eq!(calls, 1);

        let second = widget.load("any model", |_| calls += 1).await;
        assert!(matches!(second, Err(LoadError::AlreadyLoaded)));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_widget_unloaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut widget = KeyboardWidget::new("kb", LayoutSource::Directory(dir.path().into()));
        let mut ready = false;

        let result = widget.load("any model", |_| ready = true).await;
        assert!(matches!(result, Err(LoadError::ResourceNotFound { .. })));
        assert!(!ready);
        assert!(!widget.is_loaded());
        assert!(widget.available_layouts().is_empty());
        assert_eq!(widget.get_key_color(0, 0), None);
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_graphic() {
        let dir = fixtures::fixture_dir("<svg><g></svg>");
        let mut widget = KeyboardWidget::new("kb", LayoutSource::Directory(dir.path().into()));

        let result = widget.load("any model", |_| {}).await;
        assert!(matches!(result, Err(LoadError::Scene { .. })));
        assert!(!widget.is_loaded());
    }

    #[tokio::test]
    async fn test_load_rejects_graphic_without_layouts() {
        let dir = fixtures::fixture_dir(r#"<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#);
        let mut widget = KeyboardWidget::new("kb", LayoutSource::Directory(dir.path().into()));

        let result = widget.load("any model", |_| {}).await;
        assert!(matches!(result, Err(LoadError::NoLayouts { .. })));
    }

    #[tokio::test]
    async fn test_load_enforces_single_visible_layout() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g id="kb-a" class="kblayout" display="none"/>
            <g id="kb-b" class="kblayout"/>
            <g id="kb-c" class="kblayout"/>
        </svg>"#;
        let (_dir, widget) = fixtures::load_fixture(svg).await;

        // The last visible group wins.
        assert_eq!(widget.active_layout(), Some("kb-c"));
        assert_eq!(widget.visible_layouts(), vec!["kb-c"]);
    }

    #[tokio::test]
    async fn test_load_honours_style_over_display_attribute() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g id="kb-a" class="kblayout" style="display:none"/>
            <g id="kb-b" class="kblayout" display="none" style="display:inline"/>
        </svg>"#;
        let (_dir, widget) = fixtures::load_fixture(svg).await;

        assert_eq!(widget.active_layout(), Some("kb-b"));
        assert_eq!(widget.visible_layouts(), vec!["kb-b"]);
    }

    #[tokio::test]
    async fn test_load_shows_first_layout_when_all_hidden() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g id="kb-a" class="kblayout" style="display:none"/>
            <g id="kb-b" class="kblayout" display="none"/>
        </svg>"#;
        let (_dir, widget) = fixtures::load_fixture(svg).await;

        assert_eq!(widget.active_layout(), Some("kb-a"));
        assert_eq!(widget.visible_layouts(), vec!["kb-a"]);
    }

    #[tokio::test]
    async fn test_set_then_get_key_color() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        widget.set_key_color(0, 1, "#00ff00");
        assert_eq!(widget.get_key_color(0, 1).as_deref(), Some("#00ff00"));
        assert_eq!(
            key_visual(&widget, "key0-1"),
            (
                "#00ff00".to_string(),
                USED_KEY_BORDER.to_string(),
                "#000000".to_string()
            )
        );

        widget.set_key_color(0, 1, "#000000");
        assert_eq!(widget.get_key_color(0, 1).as_deref(), Some(EMPTY_KEY_FILL));
    }

    #[tokio::test]
    async fn test_sentinel_forms_give_identical_state() {
        let (_dir, mut short) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;
        let (_dir2, mut long) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        short.set_key_color(1, 0, "#123456");
        long.set_key_color(1, 0, "#123456");
        short.set_key_color(1, 0, "#000");
        long.set_key_color(1, 0, "#000000");

        assert_eq!(short.to_svg(), long.to_svg());
        assert_eq!(key_visual(&short, "key1-0"), key_visual(&long, "key1-0"));
    }

    #[tokio::test]
    async fn test_dark_fill_gets_white_label() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        widget.set_key_color_by_id("key0-0", "#0000aa");
        assert_eq!(key_visual(&widget, "key0-0").2, "#ffffff");
    }

    #[tokio::test]
    async fn test_missing_key_is_ignored() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;
        let before = widget.to_svg();

        assert_eq!(widget.get_key_color(9, 9), None);
        assert!(!widget.has_key(9, 9));
        widget.set_key_color(9, 9, "#ff0000");
        widget.clear_key_by_id("key9-9");
        widget.disable_key(9, 9);

        assert_eq!(widget.to_svg(), before);
        assert!(!widget.is_key_enabled(9, 9));
    }

    #[tokio::test]
    async fn test_keys_are_scoped_to_active_layout() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        // key1-1 only exists in kb-b
        assert!(!widget.has_key(1, 1));
        assert!(widget.set_active_layout("kb-b"));
        assert!(widget.has_key(1, 1));
    }

    #[tokio::test]
    async fn test_clear_key_by_id() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        widget.set_key_color_by_id("key0-0", "#ff00ff");
        widget.clear_key_by_id("key0-0");
        assert_eq!(
            key_visual(&widget, "key0-0"),
            (
                EMPTY_KEY_FILL.to_string(),
                EMPTY_KEY_BORDER.to_string(),
                EMPTY_KEY_BORDER.to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_reset_all_keys_is_idempotent() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;
        widget.set_key_color(0, 0, "#ff0000");
        widget.set_key_color(1, 0, "#ffffff");

        widget.reset_all_keys();
        let once = widget.to_svg();
        widget.reset_all_keys();
        assert_eq!(widget.to_svg(), once);
        assert_eq!(widget.get_key_color(0, 0).as_deref(), Some(EMPTY_KEY_FILL));
        assert_eq!(widget.get_key_color(1, 0).as_deref(), Some(EMPTY_KEY_FILL));
    }

    #[tokio::test]
    async fn test_switch_to_valid_layout() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        assert!(widget.set_active_layout("kb-b"));
        assert_eq!(widget.active_layout(), Some("kb-b"));
        assert_eq!(widget.visible_layouts(), vec!["kb-b"]);

        assert!(widget.set_active_layout("kb-a"));
        assert_eq!(widget.visible_layouts(), vec!["kb-a"]);
    }

    #[tokio::test]
    async fn test_switch_to_unknown_layout_uses_fallback() {
        let dir = fixtures::fixture_dir(TWO_LAYOUT_SVG);
        let mut widget = KeyboardWidget::new("kb", LayoutSource::Directory(dir.path().into()))
            .with_fallback_layout("kb-b");
        widget.load("any", |_| {}).await.unwrap();

        assert!(!widget.set_active_layout("kb-zz"));
        assert_eq!(widget.active_layout(), Some("kb-b"));
        assert_eq!(widget.visible_layouts(), vec!["kb-b"]);
    }

    #[tokio::test]
    async fn test_switch_with_missing_fallback_keeps_current() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;
        widget.set_key_color(0, 0, "#ff0000");

        // Default fallback kb-gb is not in the fixture.
        assert!(!widget.set_active_layout("kb-zz"));
        assert_eq!(widget.active_layout(), Some("kb-a"));
        assert_eq!(widget.visible_layouts(), vec!["kb-a"]);
        assert_eq!(widget.get_key_color(0, 0).as_deref(), Some(EMPTY_KEY_FILL));
    }

    #[tokio::test]
    async fn test_try_set_active_layout_is_strict() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;
        widget.set_key_color(0, 0, "#ff0000");

        let err = widget.try_set_active_layout("kb-zz").unwrap_err();
        assert!(matches!(err, WidgetError::UnknownLayout { .. }));
        assert_eq!(widget.active_layout(), Some("kb-a"));
        assert_eq!(widget.get_key_color(0, 0).as_deref(), Some("#ff0000"));

        assert_eq!(widget.try_set_active_layout("kb-b"), Ok(()));
        assert_eq!(widget.visible_layouts(), vec!["kb-b"]);
    }

    #[test]
    fn test_unloaded_widget_ignores_operations() {
        let mut widget = KeyboardWidget::new("kb", LayoutSource::Embedded);

        assert!(!widget.set_active_layout("kb-gb"));
        assert_eq!(widget.try_set_active_layout("kb-gb"), Err(WidgetError::NotLoaded));
        widget.set_key_color(0, 0, "#fff");
        widget.set_led_state(Led::CapsLock, true);
        assert_eq!(widget.active_layout(), None);
        assert_eq!(widget.led_state(Led::CapsLock), None);
        assert_eq!(widget.to_svg(), None);
    }

    #[tokio::test]
    async fn test_enable_disable_key() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;
        widget.set_key_color(0, 0, "#ff0000");

        assert!(widget.is_key_enabled(0, 0));
        widget.disable_key(0, 0);
        assert!(!widget.is_key_enabled(0, 0));
        assert_eq!(widget.get_key_color(0, 0).as_deref(), Some("#ff0000"));

        widget.enable_key(0, 0);
        assert!(widget.is_key_enabled(0, 0));
    }

    #[tokio::test]
    async fn test_led_toggles() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;

        widget.set_caps_lock(true);
        assert_eq!(widget.led_state(Led::CapsLock), Some(true));
        widget.set_caps_lock(false);
        assert_eq!(widget.led_state(Led::CapsLock), Some(false));

        widget.set_macro_led(true);
        assert_eq!(widget.led_state(Led::Macro), Some(true));

        // The fixture does not draw a game mode LED.
        widget.set_game_mode(true);
        assert_eq!(widget.led_state(Led::GameMode), None);
    }

    #[tokio::test]
    async fn test_effect_modes_other_than_none_are_noops() {
        let (_dir, mut widget) = fixtures::load_fixture(TWO_LAYOUT_SVG).await;
        let before = widget.to_svg();

        widget.set_effect_mode(EffectMode::Wave);
        widget.set_effect_mode(EffectMode::Static);
        assert_eq!(widget.to_svg(), before);
    }
}
