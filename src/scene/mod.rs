// SPDX-License-Identifier: GPL-3.0-only

//! Mutable scene graph for layout graphics.
//!
//! A [`Scene`] owns the element tree of one SVG document and exposes the
//! handful of operations the keyboard widget needs: lookup by id, class or
//! tag name (globally or below a given node), attribute reads and writes,
//! visibility toggling and serialization back to SVG text.
//!
//! # Example
//!
//! ```rust,ignore
//! use chromakeys::scene::Scene;
//!
//! let mut scene = Scene::parse(r#"<svg xmlns="http://www.w3.org/2000/svg">
//!     <g id="kb-gb" class="kblayout"><g id="key0-0" class="key"><rect/></g></g>
//! </svg>"#)?;
//!
//! let layout = scene.find_by_id("kb-gb").unwrap();
//! for key in scene.select_class(layout, "key") {
//!     for shape in scene.select_tags(key, &["rect"]) {
//!         scene.set_attr(shape, "fill", "#ff0000");
//!     }
//! }
//! println!("{}", scene.to_svg_string());
//! ```

pub mod parser;
pub mod types;
mod writer;

pub use parser::parse_scene;
pub use types::{Attribute, NodeId, NodeKind, SceneError};

use types::NodeData;

/// An owned, mutable SVG element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Scene {
    pub(crate) fn from_parts(nodes: Vec<NodeData>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// Parses SVG text into a scene. See [`parse_scene`].
    pub fn parse(text: &str) -> Result<Self, SceneError> {
        parse_scene(text)
    }

    /// Returns the `<svg>` root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    /// Returns the payload of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    /// Returns the tag name of an element, or `None` for text nodes.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Returns the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Returns the attributes of an element in document order.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. }) => attributes.as_slice(),
            _ => &[],
        }
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, replacing any previous value.
    ///
    /// Setting an attribute on a text node does nothing.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(NodeData {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(id.0)
        else {
            return;
        };

        let value = value.into();
        match attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => attributes.push(Attribute::new(name, value)),
        }
    }

    /// Removes an attribute and returns its previous value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let Some(NodeData {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(id.0)
        else {
            return None;
        };

        let index = attributes.iter().position(|a| a.name == name)?;
        Some(attributes.remove(index).value)
    }

    /// Returns true if the element's `class` list contains `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    /// Returns false when the element is hidden with a `display:none` style
    /// declaration, or with `display="none"` when the style sets no display.
    #[must_use]
    pub fn is_displayed(&self, id: NodeId) -> bool {
        let display = self
            .attr(id, "style")
            .and_then(|style| style_property(style, "display"))
            .or_else(|| self.attr(id, "display").map(str::trim));
        display != Some("none")
    }

    /// Shows (`display="inline"`) or hides (`display="none"`) an element.
    ///
    /// A `display` declaration in the element's `style` would override the
    /// attribute, so it is removed.
    pub fn set_display(&mut self, id: NodeId, visible: bool) {
        if let Some(style) = self.attr(id, "style") {
            if style_property(style, "display").is_some() {
                let stripped = strip_style_property(style, "display");
                if stripped.is_empty() {
                    self.remove_attr(id, "style");
                } else {
                    self.set_attr(id, "style", stripped);
                }
            }
        }
        self.set_attr(id, "display", if visible { "inline" } else { "none" });
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Iterates over the elements below `scope` in document order,
    /// excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            while let Some(id) = stack.pop() {
                stack.extend(self.children(id).iter().rev().copied());
                if self.tag(id).is_some() {
                    return Some(id);
                }
            }
            None
        })
    }

    /// Finds an element anywhere in the document by its `id` attribute.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        if self.attr(self.root, "id") == Some(id) {
            return Some(self.root);
        }
        self.find_by_id_within(self.root, id)
    }

    /// Finds an element below `scope` by its `id` attribute.
    #[must_use]
    pub fn find_by_id_within(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(scope).find(|&n| self.attr(n, "id") == Some(id))
    }

    /// Returns every element below `scope` carrying `class`.
    #[must_use]
    pub fn select_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// Returns every element below `scope` whose tag is one of `tags`.
    #[must_use]
    pub fn select_tags(&self, scope: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| self.tag(n).is_some_and(|t| tags.contains(&t)))
            .collect()
    }

    /// Concatenates the text nodes below an element.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(NodeKind::Text(text)) = self.kind(current) {
                out.push_str(text);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Serializes the scene back to SVG text.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        writer::write_scene(self)
    }
}

/// Returns the value of a declaration in an inline `style` attribute. The
/// last declaration of a repeated property applies.
fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style.split(';').rev().find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        (name.trim() == property).then(|| value.trim())
    })
}

/// Rewrites an inline `style` attribute without the given declaration.
fn strip_style_property(style: &str, property: &str) -> String {
    style
        .split(';')
        .filter(|decl| {
            let name = decl.split_once(':').map_or(decl.trim(), |(n, _)| n.trim());
            !name.is_empty() && name != property
        })
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(";")
}

// ============================================================================
// Tests
// ============================================================================
