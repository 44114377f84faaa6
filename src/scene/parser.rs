// SPDX-License-Identifier: GPL-3.0-only

//! Conversion of SVG text into a mutable [`Scene`].
//!
//! `roxmltree` produces a read-only document; this module copies the element
//! tree into the scene arena so attributes can be rewritten afterwards.
//! Comments, processing instructions and whitespace-only text are dropped.

use crate::scene::types::{Attribute, NodeData, NodeId, NodeKind, SceneError};
use crate::scene::Scene;
use std::collections::HashMap;

/// Namespace prefixes used when a document does not declare its own.
const KNOWN_NAMESPACES: &[(&str, &str)] = &[
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
    ("sodipodi", "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"),
    ("inkscape", "http://www.inkscape.org/namespaces/inkscape"),
];

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Parses an SVG document into a scene.
///
/// Documents exported by drawing tools often carry a DOCTYPE, so DTDs are
/// accepted. The root element must be `<svg>`.
pub fn parse_scene(text: &str) -> Result<Scene, SceneError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options)?;
    let root = document.root_element();

    if root.tag_name().name() != "svg" {
        return Err(SceneError::NotSvg {
            root_tag: root.tag_name().name().to_string(),
        });
    }

    let mut prefixes: HashMap<String, String> = KNOWN_NAMESPACES
        .iter()
        .map(|(prefix, uri)| (uri.to_string(), prefix.to_string()))
        .collect();

    // Declarations on the root win over the built-in table and are written
    // back out as xmlns attributes.
    let mut declarations = Vec::new();
    for ns in root.namespaces() {
        match ns.name() {
            Some(prefix) => {
                if prefix != "xml" {
                    declarations.push(Attribute::new(format!("xmlns:{}", prefix), ns.uri()));
                }
                prefixes.insert(ns.uri().to_string(), prefix.to_string());
            }
            None => declarations.push(Attribute::new("xmlns", ns.uri())),
        }
    }
    if !declarations.iter().any(|a| a.name == "xmlns") {
        declarations.insert(0, Attribute::new("xmlns", SVG_NAMESPACE));
    }

    let mut builder = Builder {
        nodes: Vec::new(),
        prefixes,
    };
    let root_id = builder.push_element(root, None);
    if let NodeKind::Element { attributes, .. } = &mut builder.nodes[root_id.0].kind {
        let mut merged = declarations;
        merged.append(attributes);
        *attributes = merged;
    }

    Ok(Scene::from_parts(builder.nodes, root_id))
}

struct Builder {
    nodes: Vec<NodeData>,
    prefixes: HashMap<String, String>,
}

impl Builder {
    fn qualify(&self, namespace: Option<&str>, local: &str) -> String {
        match namespace {
            Some(uri) if uri != SVG_NAMESPACE => match self.prefixes.get(uri) {
                Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
                _ => local.to_string(),
            },
            _ => local.to_string(),
        }
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn push_element(&mut self, node: roxmltree::Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let tag = self.qualify(node.tag_name().namespace(), node.tag_name().name());
        let attributes = node
            .attributes()
            .map(|attr| Attribute::new(self.qualify(attr.namespace(), attr.name()), attr.value()))
            .collect();

        let id = self.push_node(NodeKind::Element { tag, attributes }, parent);

        for child in node.children() {
            if child.is_element() {
                self.push_element(child, Some(id));
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    if !text.trim().is_empty() {
                        self.push_node(NodeKind::Text(text.to_string()), Some(id));
                    }
                }
            }
        }

        id
    }
}

// ============================================================================
// Tests
// ============================================================================
