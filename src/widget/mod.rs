//! Boundary to the native widget backend.

pub(crate) mod headless;

use std::any::Any;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::ReflowResult;
use crate::subject::attr::AttrDescriptor;
use crate::subject::protocol::Bound;
use crate::tree::node::ControlNode;

/// A materialized control as seen by the tree.
///
/// Widgets live on the UI thread only and are never shared across threads.
pub trait Widget: Any {
    /// Natural size of the widget before layout.
    fn intrinsic_size(&self) -> Size;

    /// Display the node's current value.
    fn set_content(&mut self, value: &Bound);

    /// Apply the container-local frame computed by layout.
    fn set_frame(&mut self, frame: Rect) {
        let _ = frame;
    }
}

/// Creates widgets for attribute descriptors.
pub trait WidgetFactory {
    /// Materialize the widget for `attr`, placed inside `parent`.
    fn materialize(&self, attr: &AttrDescriptor, parent: &ControlNode)
    -> ReflowResult<Box<dyn Widget>>;
}
