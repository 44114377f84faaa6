// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for the scene graph.
//!
//! Nodes live in an arena owned by [`Scene`](super::Scene) and are addressed
//! by [`NodeId`]. Element attributes keep their document order so a parsed
//! graphic serializes back close to how it was written.

use std::fmt;

// ============================================================================
// Node Types
// ============================================================================

/// Handle to a node inside a [`Scene`](super::Scene).
///
/// A `NodeId` is only meaningful for the scene that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A single element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name, including a namespace prefix such as `xlink:` when present
    pub name: String,
    /// Attribute value, unescaped
    pub value: String,
}

impl Attribute {
    /// Creates a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payload of a scene node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element such as `<g>`, `<rect>` or `<text>`
    Element {
        /// Qualified tag name
        tag: String,
        /// Attributes in document order
        attributes: Vec<Attribute>,
    },
    /// Character data inside an element
    Text(String),
}

/// Arena entry: node payload plus tree links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

// ============================================================================
// Error Handling Types
// ============================================================================

/// Error produced when a graphic cannot be turned into a scene.
#[derive(Debug)]
pub enum SceneError {
    /// The document is not well-formed XML
    Xml {
        /// The underlying parser error
        source: roxmltree::Error,
        /// Line where the error was detected (1-based)
        line: u32,
        /// Column where the error was detected (1-based)
        column: u32,
    },

    /// The document parsed but its root is not an `<svg>` element
    NotSvg {
        /// Tag name found at the root
        root_tag: String,
    },
}

impl SceneError {
    /// Wraps an XML parser error, keeping its position.
    pub fn xml(source: roxmltree::Error) -> Self {
        let pos = source.pos();
        Self::Xml {
            source,
            line: pos.row,
            column: pos.col,
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Xml {
                source,
                line,
                column,
            } => write!(
                f,
                "Malformed graphic at line {}, column {}: {}",
                line, column, source
            ),
            SceneError::NotSvg { root_tag } => {
                write!(f, "Expected an <svg> root element, found <{}>", root_tag)
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Xml { source, .. } => Some(source),
            SceneError::NotSvg { .. } => None,
        }
    }
}

impl From<roxmltree::Error> for SceneError {
    fn from(err: roxmltree::Error) -> Self {
        Self::xml(err)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_error_display_includes_position() {
        let err = roxmltree::Document::parse("<svg><g></svg>").unwrap_err();
        let scene_err = SceneError::from(err);

        let display_str = format!("{}", scene_err);
        assert!(display_str.contains("Malformed graphic at line 1"));
        assert!(std::error::Error::source(&scene_err).is_some());
    }

    #[test]
    fn test_not_svg_display() {
        let err = SceneError::NotSvg {
            root_tag: "html".into(),
        };
        assert_eq!(
            format!("{}", err),
            "Expected an <svg> root element, found <html>"
        );
    }
}
