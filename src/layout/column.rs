use crate::foundation::core::Size;
use crate::foundation::error::{ReflowError, ReflowResult};
use crate::tree::ControlTree;
use crate::tree::id::NodeId;

impl ControlTree {
    /// Row heads of `container`, top to bottom.
    pub(crate) fn rows(&self, container: NodeId) -> ReflowResult<Vec<NodeId>> {
        let mut heads = Vec::new();
        let mut cur = self.node(container)?.first_child;
        while let Some(head) = cur {
            heads.push(head);
            cur = self.node(head)?.bottom;
        }
        Ok(heads)
    }

    /// Vertical extent `(top, bottom)` of the row headed by `head`.
    pub(crate) fn row_extent(&self, head: NodeId) -> ReflowResult<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for id in self.row_members(head)? {
            let node = self.node(id)?;
            let (top, bottom) = (node.pos.y, node.pos.y + node.size.height);
            extent = Some(match extent {
                Some((t, b)) => (t.min(top), b.max(bottom)),
                None => (top, bottom),
            });
        }
        extent.ok_or_else(|| ReflowError::degenerate("row without members"))
    }

    /// Lay out the rows of `container`.
    ///
    /// A container that does not track its parent's height shrinks to its
    /// last row. Otherwise one row (the first whose head asks for variable
    /// height, else the last) stretches to the bottom margin and the rows
    /// below it are pinned to the bottom edge.
    pub fn layout(&mut self, container: NodeId) -> ReflowResult<()> {
        let heads = self.rows(container)?;
        let Some(&last) = heads.last() else {
            return Ok(());
        };
        let (outer, space, inner, autoresize) = {
            let node = self.node(container)?;
            (
                node.outer_space,
                node.default_space,
                node.inner_size(),
                node.autoresize,
            )
        };

        if !autoresize.height {
            let (_, bottom) = self.row_extent(last)?;
            return self.set_size(container, Size::new(inner.width, bottom));
        }

        let mut variable = Vec::with_capacity(heads.len());
        for &head in &heads {
            for id in self.row_members(head)? {
                let node = self.node_mut(id)?;
                node.autoresize.y = false;
                node.autoresize.height = false;
            }
            let node = self.node(head)?;
            variable.push(node.attr.as_deref().is_some_and(|a| a.hints().variable_height));
        }
        let stretch = variable.iter().position(|v| *v).unwrap_or(heads.len() - 1);

        let mut cursor = inner.height - outer.y;
        for i in (stretch..heads.len()).rev() {
            let head = heads[i];
            if i == stretch {
                let node = self.node(head)?;
                let height = cursor - node.pos.y;
                let width = node.size.width;
                self.set_size(head, Size::new(width, height))?;
                self.node_mut(head)?.autoresize.height = true;
                return self.layout(head);
            }
            let (top, bottom) = self.row_extent(head)?;
            let height = bottom - top;
            let delta = cursor - height - top;
            for id in self.row_members(head)? {
                let node = self.node_mut(id)?;
                node.pos.y += delta;
                node.autoresize.y = true;
            }
            cursor -= height + space.y;
        }
        Ok(())
    }
}
