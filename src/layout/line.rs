use crate::foundation::core::Size;
use crate::foundation::error::{ReflowError, ReflowResult};
use crate::tree::ControlTree;
use crate::tree::id::NodeId;

impl ControlTree {
    /// Members of the row containing `member`, left to right.
    pub(crate) fn row_members(&self, member: NodeId) -> ReflowResult<Vec<NodeId>> {
        let mut start = member;
        while let Some(left) = self.node(start)?.left {
            start = left;
        }
        let mut members = vec![start];
        let mut cur = start;
        while let Some(right) = self.node(cur)?.right {
            members.push(right);
            cur = right;
        }
        Ok(members)
    }

    /// Lay out the row containing `member`.
    ///
    /// Members are packed from the container's left margin and centered on the
    /// tallest one. The first member asking for variable width (or else the
    /// last member, unless it opted out) then takes the remaining width up to
    /// the right margin; members after it are pinned to the right edge.
    pub fn layout_line(&mut self, member: NodeId) -> ReflowResult<()> {
        let parent_id = self.node(member)?.parent.ok_or_else(|| {
            ReflowError::validation("the root container is not part of a row")
        })?;
        let members = self.row_members(member)?;
        if members.is_empty() {
            return Err(ReflowError::degenerate(format!(
                "empty row in {}",
                self.path_name(parent_id)
            )));
        }

        let (outer, inner) = {
            let parent = self.node(parent_id)?;
            (parent.outer_space, parent.inner_size())
        };
        let mut gaps = Vec::with_capacity(members.len());
        let mut stretch = Vec::with_capacity(members.len());
        let mut min_y = f64::INFINITY;
        let mut max_h = 0.0_f64;
        for &id in &members {
            let parent = self.node(parent_id)?;
            let node = self.node(id)?;
            gaps.push(node.gap(parent).x);
            stretch.push(node.attr.as_deref().and_then(|a| a.hints().variable_width));
            min_y = min_y.min(node.pos.y);
            max_h = max_h.max(node.size.height);
        }

        // A member's own gap separates it from the member on its right.
        let mut x = outer.x;
        for (&id, gap) in members.iter().zip(&gaps) {
            let node = self.node_mut(id)?;
            node.pos.x = x;
            node.pos.y = min_y + (max_h - node.size.height) / 2.0;
            node.autoresize.x = false;
            node.autoresize.width = false;
            x += node.size.width + gap;
        }

        let last = members.len() - 1;
        let target = stretch
            .iter()
            .position(|s| *s == Some(true))
            .or_else(|| (stretch[last] != Some(false)).then_some(last));
        let Some(target) = target else {
            return Ok(());
        };

        let mut cursor = inner.width - outer.x;
        for i in (target..members.len()).rev() {
            let id = members[i];
            if i == target {
                let node = self.node(id)?;
                let width = cursor - node.pos.x;
                let height = node.size.height;
                self.set_size(id, Size::new(width, height))?;
                self.node_mut(id)?.autoresize.width = true;
                break;
            }
            let node = self.node_mut(id)?;
            node.pos.x = cursor - node.size.width;
            node.autoresize.x = true;
            cursor = node.pos.x - gaps[i - 1];
        }
        Ok(())
    }
}
