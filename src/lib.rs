//! reflow binds live model objects ("subjects") to trees of controls.
//!
//! A subject declares its bindable attributes once per type. [`ControlTree`]
//! turns that list into control nodes, lays them out in rows and columns with a
//! single stretch element per axis, and keeps the displayed values in sync with
//! the model through [`UpdateEvent`]s that may fire on any thread.
//!
//! # Flow
//!
//! 1. **Build**: [`ControlTree::build_children`] creates one node per attribute,
//!    recursing into nested subjects.
//! 2. **Layout**: [`ControlTree::layout_line`] packs and stretches a row,
//!    [`ControlTree::layout`] stacks the rows of a container.
//! 3. **Propagate**: subject events post [`UiRequest`]s to a coalescing
//!    [`UiQueue`]; the UI thread drains them with [`ControlTree::run_pending`].
//!
//! Native widgets are supplied through [`WidgetFactory`]; [`HeadlessFactory`]
//! records what the tree pushes and serves tests and the demo binary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod event;
mod foundation;
mod layout;
mod snapshot;
mod subject;
mod tree;
mod widget;

/// Reference subject: a song editor over an explicit application context.
pub mod song;

pub use event::bus::{Subscription, UpdateEvent};
pub use event::queue::{UiQueue, UiReceiver, UiRequest, UiWaker, ui_queue};
pub use foundation::core::{Autoresize, LayoutConfig, Point, Rect, Size, Vec2};
pub use foundation::error::{ReflowError, ReflowResult};
pub use snapshot::{LayoutSnapshot, NodeLayout};
pub use subject::attr::{AttrBuilder, AttrDescriptor, Capability, LayoutHints, RefreshCause};
pub use subject::protocol::{AttrValue, Bound, Subject, TableRow};
pub use tree::ControlTree;
pub use tree::id::NodeId;
pub use tree::node::ControlNode;
pub use widget::headless::{HeadlessFactory, HeadlessWidget};
pub use widget::{Widget, WidgetFactory};
