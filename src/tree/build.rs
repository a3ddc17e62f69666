use std::collections::HashSet;
use std::sync::Arc;

use crate::event::bus::{Subscription, UpdateEvent};
use crate::event::queue::{UiQueue, UiRequest};
use crate::foundation::core::{Point, Size};
use crate::foundation::error::{ReflowError, ReflowResult};
use crate::subject::attr::{AttrDescriptor, RefreshCause};
use crate::subject::protocol::Bound;
use crate::tree::ControlTree;
use crate::tree::id::NodeId;
use crate::tree::node::ControlNode;

// Keeps an existing subscription when it already targets `event`.
fn resubscribe(
    slot: &mut Option<Subscription>,
    event: Option<UpdateEvent>,
    queue: &UiQueue,
    request: UiRequest,
) {
    match event {
        Some(event) if slot.as_ref().is_some_and(|s| s.is_for(&event)) => {}
        Some(event) => *slot = Some(event.register(queue.poster(request))),
        None => *slot = None,
    }
}

impl ControlTree {
    /// Discard the children of `container` and rebuild them from its subject's
    /// attributes.
    ///
    /// Returns the content box `(max_x + outer_space.x, max_y + outer_space.y)`
    /// measured before any stretching; a subject without attributes yields
    /// `outer_space` and performs no layout.
    #[tracing::instrument(skip(self))]
    pub fn build_children(&mut self, container: NodeId) -> ReflowResult<Size> {
        let size = self.build_children_inner(container)?;
        self.commit_frames(container);
        Ok(size)
    }

    pub(crate) fn build_children_inner(&mut self, container: NodeId) -> ReflowResult<Size> {
        self.discard_children(container)?;
        self.update_subject(container)?;

        let (outer, subject) = {
            let node = self.node(container)?;
            (node.outer_space, node.subject.upgrade())
        };
        self.node_mut(container)?.built_for = subject.as_ref().map(Arc::downgrade);

        let attrs: Vec<Arc<AttrDescriptor>> = subject
            .as_ref()
            .map(|s| s.attributes().to_vec())
            .unwrap_or_default();
        if attrs.is_empty() {
            return Ok(Size::new(outer.x, outer.y));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = attrs.iter().find(|a| !seen.insert(a.name())) {
            return Err(ReflowError::validation(format!(
                "duplicate attribute '{}' on {}",
                dup.name(),
                self.path_name(container)
            )));
        }

        let mut prev: Option<NodeId> = None;
        let mut row_head: Option<NodeId> = None;
        let (mut max_x, mut max_y) = (0.0_f64, 0.0_f64);
        for attr in &attrs {
            self.update_subject(container)?;
            let child = self.create_control(container, attr)?;
            let (size, gap) = {
                let parent = self.node(container)?;
                let node = self.node(child)?;
                (node.size, node.gap(parent))
            };

            let pos = match (prev, row_head) {
                (Some(prev), _) if attr.hints().align_right => {
                    let (left, after) = {
                        let parent = self.node(container)?;
                        let node = self.node(prev)?;
                        (node.frame(), node.gap(parent).x)
                    };
                    self.node_mut(prev)?.right = Some(child);
                    self.node_mut(child)?.left = Some(prev);
                    Point::new(left.x1 + after, left.y0)
                }
                (Some(prev), Some(head)) => {
                    self.layout_line(prev)?;
                    self.node_mut(head)?.bottom = Some(child);
                    self.node_mut(child)?.top = Some(head);
                    row_head = Some(child);
                    Point::new(outer.x, max_y + gap.y)
                }
                _ => {
                    self.node_mut(container)?.first_child = Some(child);
                    row_head = Some(child);
                    Point::new(outer.x, outer.y)
                }
            };
            self.node_mut(child)?.pos = pos;
            max_x = max_x.max(pos.x + size.width);
            max_y = max_y.max(pos.y + size.height);

            self.refresh_inner(child, RefreshCause::Initial)?;
            prev = Some(child);
        }

        if let Some(last) = prev {
            self.layout_line(last)?;
        }
        self.layout(container)?;
        Ok(Size::new(max_x + outer.x, max_y + outer.y))
    }

    fn create_control(
        &mut self,
        container: NodeId,
        attr: &Arc<AttrDescriptor>,
    ) -> ReflowResult<NodeId> {
        let widget = self.factory.materialize(attr, self.node(container)?)?;
        let mut node = ControlNode::new(
            Some(container),
            Some(Arc::clone(attr)),
            self.config().outer_space,
            self.config().default_space,
        );
        node.size = widget.intrinsic_size();
        node.widget = Some(widget);

        let id = self.alloc(node);
        self.node_mut(container)?
            .children
            .push((attr.name().to_owned(), id));
        self.update_subject(id)?;
        if attr.is_container() {
            let content = self.build_children_inner(id)?;
            self.fit_container(id, content)?;
        }
        Ok(id)
    }

    fn discard_children(&mut self, container: NodeId) -> ReflowResult<()> {
        let node = self.node_mut(container)?;
        let children = std::mem::take(&mut node.children);
        node.first_child = None;
        node.built_for = None;
        for (_, child) in children {
            self.release_subtree(child);
        }
        Ok(())
    }

    // Grow to the content box, never below the widget's natural size.
    fn fit_container(&mut self, id: NodeId, content: Size) -> ReflowResult<()> {
        let node = self.node(id)?;
        let intrinsic = node
            .widget
            .as_ref()
            .map_or(node.size, |w| w.intrinsic_size());
        let fitted = Size::new(
            intrinsic.width.max(content.width),
            intrinsic.height.max(content.height),
        );
        self.set_size(id, fitted)
    }

    /// Rebuild a container in place and re-run the layout it takes part in.
    pub(crate) fn rebuild(&mut self, id: NodeId) -> ReflowResult<()> {
        tracing::debug!(path = %self.path_name(id), "rebuilding children");
        let content = self.build_children_inner(id)?;
        if let Some(parent) = self.node(id)?.parent {
            self.fit_container(id, content)?;
            self.layout_line(id)?;
            self.layout(parent)?;
        }
        Ok(())
    }

    /// Re-resolve the value bound to `id` and keep its subscriptions pointed at
    /// the current events.
    pub(crate) fn update_subject(&mut self, id: NodeId) -> ReflowResult<()> {
        let (parent, attr) = {
            let node = self.node(id)?;
            (node.parent, node.attr.clone())
        };
        let queue = self.queue.clone();
        let bound = match (parent, attr) {
            (Some(parent), Some(attr)) => {
                let owner = self.node(parent)?.subject.upgrade().ok_or_else(|| {
                    ReflowError::attribute(format!(
                        "subject owning '{}' is gone",
                        self.path_name(id)
                    ))
                })?;
                let value = attr.get(owner.as_ref())?;
                let attr_event = attr.update_event(owner.as_ref())?;
                resubscribe(
                    &mut self.node_mut(id)?.attr_subscription,
                    attr_event,
                    &queue,
                    UiRequest::Refresh(id),
                );
                Bound::from(value)
            }
            _ => Bound::Object(Arc::downgrade(self.root_subject())),
        };

        let subject_event = bound.upgrade().and_then(|s| s.update_event());
        let node = self.node_mut(id)?;
        node.subject = bound;
        resubscribe(
            &mut node.subject_subscription,
            subject_event,
            &queue,
            UiRequest::Refresh(id),
        );
        Ok(())
    }
}
