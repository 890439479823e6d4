//! Loading trees from the JSON document format.
//!
//! Each node is an object whose `"type"` is one of `document`, `element`,
//! `text` or `comment`:
//!
//! ```text
//! { "type": "element", "tagName": "div",
//!   "attributes": { "class": "item" },
//!   "children": [ { "type": "text", "content": "hello" } ] }
//! ```
//!
//! The top-level value may be a document node or a single element, which is
//! then wrapped in a fresh document. Nodes of any other type are skipped with
//! a warning.

use std::collections::BTreeMap;
use std::io::Read;

use quarry_common::warning::warn_once;
use serde::Deserialize;
use thiserror::Error;

use crate::{DomTree, ElementData, NodeId, NodeType};

/// Errors raised while loading a JSON document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input is not valid JSON or does not have the node shape.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A node is missing a field its type requires.
    #[error("{node_type} node is missing required field '{field}'")]
    MissingField {
        /// The `"type"` of the offending node.
        node_type: &'static str,
        /// The missing field name.
        field: &'static str,
    },

    /// A document node appeared below the top level.
    #[error("document nodes may only appear at the top level")]
    NestedDocument,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "tagName")]
    tag_name: Option<String>,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    content: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
}

impl DomTree {
    /// Parse a tree from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the JSON is malformed or a node lacks a
    /// required field.
    pub fn from_json_str(source: &str) -> Result<Self, DocumentError> {
        let raw: RawNode = serde_json::from_str(source)?;
        Self::from_raw(raw)
    }

    /// Parse a tree from a JSON reader.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the JSON is malformed or a node lacks a
    /// required field.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, DocumentError> {
        let raw: RawNode = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawNode) -> Result<Self, DocumentError> {
        let mut tree = Self::new();
        if raw.kind == "document" {
            for child in raw.children {
                tree.load_node(NodeId::ROOT, child)?;
            }
        } else {
            tree.load_node(NodeId::ROOT, raw)?;
        }
        Ok(tree)
    }

    fn load_node(&mut self, parent: NodeId, raw: RawNode) -> Result<(), DocumentError> {
        let node_type = match raw.kind.as_str() {
            "element" => {
                let tag_name = raw.tag_name.ok_or(DocumentError::MissingField {
                    node_type: "element",
                    field: "tagName",
                })?;
                NodeType::Element(ElementData {
                    tag_name,
                    attrs: raw.attributes.into_iter().collect(),
                })
            }
            "text" => NodeType::Text(raw.content.ok_or(DocumentError::MissingField {
                node_type: "text",
                field: "content",
            })?),
            "comment" => NodeType::Comment(raw.content.unwrap_or_default()),
            "document" => return Err(DocumentError::NestedDocument),
            other => {
                warn_once("DOM", &format!("skipping node of unsupported type '{other}'"));
                return Ok(());
            }
        };

        let id = self.alloc(node_type);
        self.append_child(parent, id);
        for child in raw.children {
            self.load_node(id, child)?;
        }
        Ok(())
    }
}
