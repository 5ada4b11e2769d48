// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading a tree from nested JSON records.

use kurbo::{Point, Rect, Size};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{NodeData, NodeId, Tree, TreeError};

/// A control-point id as authored: either a number or a string.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ControlPointId {
    /// Numeric id.
    Number(i64),
    /// String id.
    Text(String),
}

impl ControlPointId {
    fn into_key(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// One record of the nested tree input.
///
/// ```json
/// {
///   "name": "root",
///   "position": [[10, 20], [40, 60]],
///   "children": [
///     { "name": "child", "controlPoints": [1, 2, "3a"], "position": [[0, 0], [5, 5]] }
///   ]
/// }
/// ```
///
/// Hidden children may be given as `_children` instead of `children`, but not both.
/// Unrecognized fields are kept in [`NodeData::extra`].
#[derive(Clone, Debug, Deserialize)]
pub struct TreeInput {
    /// Node label.
    pub name: String,
    /// Visible children.
    #[serde(default)]
    pub children: Option<Vec<TreeInput>>,
    /// Hidden children.
    #[serde(default, rename = "_children")]
    pub collapsed_children: Option<Vec<TreeInput>>,
    /// Control points of the edge into this node.
    #[serde(default, rename = "controlPoints")]
    pub control_points: Vec<ControlPointId>,
    /// Ancient box as `[[x, y], [width, height]]` at canonical size.
    #[serde(default)]
    pub position: Option<[[f64; 2]; 2]>,
    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tree {
    /// Parse nested JSON records into a tree.
    ///
    /// ```
    /// use lineage_tree::{ExpansionState, Tree};
    ///
    /// let tree = Tree::from_json_str(r#"{
    ///     "name": "root",
    ///     "_children": [{ "name": "a", "controlPoints": [1, 2] }]
    /// }"#).unwrap();
    /// let root = tree.root().unwrap();
    /// assert_eq!(tree.state(root), Some(ExpansionState::Collapsed));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, TreeError> {
        let input: TreeInput = serde_json::from_str(json)
            .map_err(|e| TreeError::MalformedTreeInput(e.to_string()))?;
        Self::from_input(input)
    }

    /// Build a tree from an already parsed record.
    pub fn from_input(input: TreeInput) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        tree.insert_input(None, input)?;
        log::debug!("loaded tree with {} nodes", tree.len());
        Ok(tree)
    }

    /// Insert `input` and its descendants under `parent`.
    pub fn insert_input(
        &mut self,
        parent: Option<NodeId>,
        input: TreeInput,
    ) -> Result<NodeId, TreeError> {
        let TreeInput {
            name,
            children,
            collapsed_children,
            control_points,
            position,
            extra,
        } = input;
        let children = children.unwrap_or_default();
        let collapsed_children = collapsed_children.unwrap_or_default();
        if !children.is_empty() && !collapsed_children.is_empty() {
            return Err(TreeError::MalformedTreeInput(format!(
                "`{name}` has both `children` and `_children`"
            )));
        }
        if position.is_none() {
            log::debug!("`{name}` has no ancient position");
        }
        let position = position.map_or(Rect::ZERO, |[[x, y], [w, h]]| {
            Rect::from_origin_size(Point::new(x, y), Size::new(w, h))
        });
        let data = NodeData {
            name,
            control_points: control_points
                .into_iter()
                .map(ControlPointId::into_key)
                .collect(),
            position,
            extra,
        };
        let id = self.insert(parent, data)?;
        let collapsed = !collapsed_children.is_empty();
        for child in children.into_iter().chain(collapsed_children) {
            self.insert_input(Some(id), child)?;
        }
        if collapsed {
            self.collapse(id)?;
        }
        Ok(id)
    }
}
