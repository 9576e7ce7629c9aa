//! Display tree for interactively viewing extracted data.
//!
//! Each node carries the text a "copy" action should place on the
//! clipboard, so surfaces never have to re-derive it from the tree.

use serde::Serialize;

use crate::document::DocumentRecord;
use crate::value::StructuredValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Leaf,
    Section,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    /// Raw object key, as used in flattened paths.
    pub key: String,
    /// Key with underscores shown as spaces.
    pub label: String,
    pub depth: usize,
    pub kind: NodeKind,
    pub copy_payload: String,
    /// Only sections have children; lists are not expanded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DisplayNode>,
}

/// Build display nodes for the entries of an object value.
///
/// Non-object values have no entries and render to nothing.
pub fn render(value: &StructuredValue, depth: usize) -> Vec<DisplayNode> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    map.iter()
        .map(|(key, child)| {
            let (kind, copy_payload, children) = match child {
                StructuredValue::Object(_) => (
                    NodeKind::Section,
                    child.to_compact_json(),
                    render(child, depth + 1),
                ),
                StructuredValue::List(_) => (NodeKind::List, child.to_pretty_json(), Vec::new()),
                StructuredValue::Scalar(s) => (NodeKind::Leaf, s.printable(), Vec::new()),
            };
            DisplayNode {
                key: key.clone(),
                label: key.replace('_', " "),
                depth,
                kind,
                copy_payload,
                children,
            }
        })
        .collect()
}

/// Render a record's extraction; a record without one renders to nothing.
pub fn render_record(record: &DocumentRecord) -> Vec<DisplayNode> {
    record
        .extracted_data
        .as_ref()
        .map(|data| render(data, 0))
        .unwrap_or_default()
}

/// Find the node at a dotted key path such as `vendor.vendor_name`.
pub fn find<'a>(nodes: &'a [DisplayNode], path: &str) -> Option<&'a DisplayNode> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut node = nodes.iter().find(|n| n.key == first)?;
    for segment in segments {
        node = node.children.iter().find(|n| n.key == segment)?;
    }
    Some(node)
}

/// Depth-first walk over a forest of nodes, parents before children.
pub fn walk(nodes: &[DisplayNode]) -> Walk<'_> {
    Walk {
        stack: nodes.iter().rev().collect(),
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a DisplayNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DisplayNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
