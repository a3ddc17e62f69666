use crate::foundation::core::{Size, Vec2};
use crate::foundation::error::ReflowResult;
use crate::tree::ControlTree;
use crate::tree::id::NodeId;

impl ControlTree {
    /// Resize `id` and move or grow its descendants according to their
    /// autoresize flags, then push the new frames into the widgets.
    pub fn resize(&mut self, id: NodeId, size: Size) -> ReflowResult<()> {
        self.set_size(id, size)?;
        self.commit_frames(id);
        Ok(())
    }

    pub(crate) fn set_size(&mut self, id: NodeId, size: Size) -> ReflowResult<()> {
        let node = self.node_mut(id)?;
        let delta = Vec2::new(size.width - node.size.width, size.height - node.size.height);
        node.size = size;
        if delta == Vec2::ZERO {
            return Ok(());
        }
        self.follow_parent_resize(id, delta)
    }

    fn follow_parent_resize(&mut self, container: NodeId, delta: Vec2) -> ReflowResult<()> {
        let children: Vec<NodeId> = self
            .node(container)?
            .children
            .iter()
            .map(|(_, c)| *c)
            .collect();
        for child in children {
            let node = self.node_mut(child)?;
            let flags = node.autoresize;
            if flags.x {
                node.pos.x += delta.x;
            }
            if flags.y {
                node.pos.y += delta.y;
            }
            let grow = Vec2::new(
                if flags.width { delta.x } else { 0.0 },
                if flags.height { delta.y } else { 0.0 },
            );
            if grow != Vec2::ZERO {
                let size = Size::new(node.size.width + grow.x, node.size.height + grow.y);
                self.set_size(child, size)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resize.rs"]
mod tests;
