// SPDX-License-Identifier: GPL-3.0-only

//! Serialization of a [`Scene`] back to SVG text.

use crate::scene::types::NodeKind;
use crate::scene::{NodeId, Scene};

pub(crate) fn write_scene(scene: &Scene) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_node(scene, scene.root(), Some(0), &mut out);
    out
}

/// Writes `id` and its subtree. `depth` is `None` inside mixed content,
/// where added whitespace would change the rendered text.
fn write_node(scene: &Scene, id: NodeId, depth: Option<usize>, out: &mut String) {
    match scene.kind(id) {
        Some(NodeKind::Text(text)) => out.push_str(&escape(text, false)),
        Some(NodeKind::Element { tag, attributes }) => {
            if let Some(depth) = depth {
                indent(depth, out);
            }
            out.push('<');
            out.push_str(tag);
            for attr in attributes {
                out.push_str(&format!(" {}=\"{}\"", attr.name, escape(&attr.value, true)));
            }

            let children = scene.children(id);
            if children.is_empty() {
                out.push_str("/>");
                if depth.is_some() {
                    out.push('\n');
                }
                return;
            }

            let has_text = children
                .iter()
                .any(|&c| matches!(scene.kind(c), Some(NodeKind::Text(_))));
            out.push('>');
            match depth {
                Some(depth) if !has_text => {
                    out.push('\n');
                    for &child in children {
                        write_node(scene, child, Some(depth + 1), out);
                    }
                    indent(depth, out);
                }
                _ => {
                    for &child in children {
                        write_node(scene, child, None, out);
                    }
                }
            }
            out.push_str(&format!("</{}>", tag));
            if depth.is_some() {
                out.push('\n');
            }
        }
        None => {}
    }
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
