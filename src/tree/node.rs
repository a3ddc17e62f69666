//! A single control in the tree.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::event::bus::Subscription;
use crate::foundation::core::{Autoresize, Point, Rect, Size, Vec2};
use crate::subject::attr::AttrDescriptor;
use crate::subject::protocol::{Bound, Subject};
use crate::tree::id::NodeId;
use crate::widget::Widget;

/// One control: layout state, links to its neighbours and its bound value.
///
/// Nodes are owned by the [`ControlTree`](crate::ControlTree) arena; every link
/// here is a plain [`NodeId`].
pub struct ControlNode {
    pub(crate) parent: Option<NodeId>,
    pub(crate) attr: Option<Arc<AttrDescriptor>>,
    pub(crate) subject: Bound,
    pub(crate) pos: Point,
    pub(crate) size: Size,
    pub(crate) autoresize: Autoresize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) top: Option<NodeId>,
    pub(crate) bottom: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) children: Vec<(String, NodeId)>,
    pub(crate) outer_space: Vec2,
    pub(crate) default_space: Vec2,
    pub(crate) widget: Option<Box<dyn Widget>>,
    pub(crate) subject_subscription: Option<Subscription>,
    pub(crate) attr_subscription: Option<Subscription>,
    // Subject the current children were built for.
    pub(crate) built_for: Option<Weak<dyn Subject>>,
}

impl ControlNode {
    pub(crate) fn new(
        parent: Option<NodeId>,
        attr: Option<Arc<AttrDescriptor>>,
        outer_space: Vec2,
        default_space: Vec2,
    ) -> Self {
        Self {
            parent,
            attr,
            subject: Bound::Unresolved,
            pos: Point::ZERO,
            size: Size::ZERO,
            autoresize: Autoresize::NONE,
            left: None,
            right: None,
            top: None,
            bottom: None,
            first_child: None,
            children: Vec::new(),
            outer_space,
            default_space,
            widget: None,
            subject_subscription: None,
            attr_subscription: None,
            built_for: None,
        }
    }

    /// Owning container; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Descriptor this node was built from; `None` for the root.
    pub fn attr(&self) -> Option<&Arc<AttrDescriptor>> {
        self.attr.as_ref()
    }

    /// Attribute name, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.attr.as_deref().map(AttrDescriptor::name)
    }

    /// Currently bound value.
    pub fn subject(&self) -> &Bound {
        &self.subject
    }

    /// Top-left corner in the container's coordinates.
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Outer size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Size available to children (the node has no border).
    pub fn inner_size(&self) -> Size {
        self.size
    }

    /// `pos` and `size` as a rectangle.
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size(self.pos, self.size)
    }

    /// Edges that follow a resize of the container.
    pub fn autoresize(&self) -> Autoresize {
        self.autoresize
    }

    /// Previous node in the same row.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Next node in the same row.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Head of the previous row (row heads only).
    pub fn top(&self) -> Option<NodeId> {
        self.top
    }

    /// Head of the next row (row heads only).
    pub fn bottom(&self) -> Option<NodeId> {
        self.bottom
    }

    /// Head of the first row.
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    /// Children in attribute order.
    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = (&str, NodeId)> + ExactSizeIterator + '_ {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Child bound to attribute `name`.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    /// Margin between border and content.
    pub fn outer_space(&self) -> Vec2 {
        self.outer_space
    }

    /// Gap between neighbouring children.
    pub fn default_space(&self) -> Vec2 {
        self.default_space
    }

    /// The materialized widget, if any.
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }

    /// The widget downcast to its concrete backend type.
    pub fn widget_as<W: Widget>(&self) -> Option<&W> {
        let any: &dyn Any = self.widget.as_deref()?;
        any.downcast_ref::<W>()
    }

    /// Whether this node subscribes to its bound subject's event.
    pub fn is_subscribed(&self) -> bool {
        self.subject_subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub(crate) fn gap(&self, parent: &ControlNode) -> Vec2 {
        let hints = self.attr.as_deref().map(|a| *a.hints()).unwrap_or_default();
        Vec2::new(
            hints.space_x.unwrap_or(parent.default_space.x),
            hints.space_y.unwrap_or(parent.default_space.y),
        )
    }
}

impl fmt::Debug for ControlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlNode")
            .field("name", &self.name())
            .field("parent", &self.parent)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("autoresize", &self.autoresize)
            .field("subject", &self.subject)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
