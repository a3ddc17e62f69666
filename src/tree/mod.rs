//! The control tree: a generational arena of [`ControlNode`]s plus the queue
//! connecting model-side events to the UI thread.

pub(crate) mod build;
pub(crate) mod id;
pub(crate) mod node;
pub(crate) mod refresh;

use std::fmt;
use std::sync::Arc;

use crate::event::queue::{UiQueue, UiReceiver, UiWaker, ui_queue};
use crate::foundation::core::{LayoutConfig, Size};
use crate::foundation::error::{ReflowError, ReflowResult};
use crate::subject::protocol::{Bound, Subject};
use crate::tree::id::NodeId;
use crate::tree::node::ControlNode;
use crate::widget::WidgetFactory;

struct Slot {
    generation: u32,
    node: Option<ControlNode>,
}

/// Owner of every control node of one window.
///
/// The tree lives on the UI thread. Subjects may change on any thread; their
/// events only post [`UiRequest`](crate::UiRequest)s which are executed by
/// [`ControlTree::run_pending`].
pub struct ControlTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    // The tree keeps its root subject alive; everything below is held weakly.
    root_subject: Arc<dyn Subject>,
    config: LayoutConfig,
    pub(crate) factory: Box<dyn WidgetFactory>,
    pub(crate) queue: UiQueue,
    inbox: UiReceiver,
}

impl ControlTree {
    /// Create a tree whose root container has `size` and binds `root_subject`.
    ///
    /// The root's children are not built yet; call
    /// [`build_children`](Self::build_children) with [`root`](Self::root).
    pub fn new(
        root_subject: Arc<dyn Subject>,
        size: Size,
        config: LayoutConfig,
        factory: impl WidgetFactory + 'static,
        waker: Arc<dyn UiWaker>,
    ) -> ReflowResult<Self> {
        config.validate()?;
        let (queue, inbox) = ui_queue(waker);
        let mut root = ControlNode::new(None, None, config.outer_space, config.default_space);
        root.size = size;
        root.autoresize = config.root_autoresize;
        root.subject = Bound::Object(Arc::downgrade(&root_subject));

        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 0),
            root_subject,
            config,
            factory: Box::new(factory),
            queue,
            inbox,
        };
        tree.root = tree.alloc(root);
        Ok(tree)
    }

    /// Handle of the root container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The subject bound to the root.
    pub fn root_subject(&self) -> &Arc<dyn Subject> {
        &self.root_subject
    }

    /// Layout configuration the tree was created with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Posting side of the tree's UI queue.
    pub fn queue(&self) -> &UiQueue {
        &self.queue
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Whether the tree holds no nodes (never true once constructed).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Node for `id`, or `None` when the handle is stale.
    pub fn get(&self, id: NodeId) -> Option<&ControlNode> {
        self.slots
            .get(id.idx as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    /// Node for `id`; a stale handle is a validation error.
    pub fn node(&self, id: NodeId) -> ReflowResult<&ControlNode> {
        self.get(id)
            .ok_or_else(|| ReflowError::validation(format!("stale node handle {id:?}")))
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ControlNode> {
        self.slots
            .get_mut(id.idx as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> ReflowResult<&mut ControlNode> {
        self.get_mut(id)
            .ok_or_else(|| ReflowError::validation(format!("stale node handle {id:?}")))
    }

    /// Child of `container` bound to attribute `name`.
    pub fn child(&self, container: NodeId, name: &str) -> Option<NodeId> {
        self.get(container)?.child(name)
    }

    /// Resolve a dotted path below the root, e.g. `"song.url"`.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        path.split('.')
            .filter(|s| !s.is_empty())
            .try_fold(self.root, |id, name| self.child(id, name))
    }

    /// Dotted name of a node, starting with the root subject's type name.
    pub fn path_name(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut cur = self.get(id);
        while let Some(node) = cur {
            match node.name() {
                Some(name) => parts.push(name),
                None => parts.push(self.root_subject.type_name()),
            }
            cur = node.parent.and_then(|p| self.get(p));
        }
        parts.reverse();
        parts.join(".")
    }

    pub(crate) fn alloc(&mut self, node: ControlNode) -> NodeId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.node = Some(node);
            return NodeId::new(idx, slot.generation);
        }
        let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(idx, 0)
    }

    /// Free `id` and everything below it. Dropping the nodes drops their
    /// subscriptions and widgets.
    pub(crate) fn release_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.idx as usize)
                .filter(|s| s.generation == id.generation)
            else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.idx);
            stack.extend(node.children.iter().map(|(_, c)| *c));
        }
    }

    /// Push every frame below (and including) `id` into its widget.
    pub(crate) fn commit_frames(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get_mut(id) else {
                continue;
            };
            let frame = node.frame();
            if let Some(widget) = node.widget.as_mut() {
                widget.set_frame(frame);
            }
            stack.extend(node.children.iter().map(|(_, c)| *c));
        }
    }
}

impl fmt::Debug for ControlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlTree")
            .field("root", &self.root)
            .field("subject", &self.root_subject.type_name())
            .field("nodes", &self.len())
            .field("config", &self.config)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/mod.rs"]
mod tests;
