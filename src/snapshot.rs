//! Serializable dump of a tree's computed layout.

use serde::Serialize;

use crate::foundation::core::{Autoresize, Point, Size};
use crate::foundation::error::ReflowResult;
use crate::subject::protocol::Bound;
use crate::tree::ControlTree;

/// Layout of one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeLayout {
    /// Dotted node name, e.g. `SongEdit.song.url`.
    pub path: String,
    /// Position in the container's coordinates.
    pub pos: Point,
    /// Outer size.
    pub size: Size,
    /// Edges tracking the container.
    pub autoresize: Autoresize,
    /// Displayed text, or the type name of a nested subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Row count of a displayed table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}

/// Every node of a tree in depth-first attribute order, root first.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    /// Node layouts.
    pub nodes: Vec<NodeLayout>,
}

impl LayoutSnapshot {
    /// Layout of the node at `path`.
    pub fn find(&self, path: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|n| n.path == path)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ReflowResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| anyhow::Error::new(e).into())
    }
}

impl ControlTree {
    /// Capture the current layout of the whole tree.
    pub fn snapshot(&self) -> LayoutSnapshot {
        let mut nodes = Vec::with_capacity(self.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            let value = match node.subject() {
                Bound::Object(_) => node.subject().upgrade().map(|s| s.type_name().to_owned()),
                bound => bound.as_text().map(str::to_owned),
            };
            nodes.push(NodeLayout {
                path: self.path_name(id),
                pos: node.pos(),
                size: node.size(),
                autoresize: node.autoresize(),
                value,
                rows: node.subject().as_table().map(<[_]>::len),
            });
            stack.extend(node.children().rev().map(|(_, c)| c));
        }
        LayoutSnapshot { nodes }
    }
}

#[cfg(test)]
#[path = "../tests/unit/snapshot.rs"]
mod tests;
