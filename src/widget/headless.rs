use std::collections::HashMap;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::ReflowResult;
use crate::subject::attr::{AttrDescriptor, Capability};
use crate::subject::protocol::Bound;
use crate::tree::node::ControlNode;
use crate::widget::{Widget, WidgetFactory};

/// Widget backend without a display, used by tests and the demo binary.
///
/// Sizes default per capability and can be overridden per attribute name.
#[derive(Clone, Debug, Default)]
pub struct HeadlessFactory {
    sizes: HashMap<String, Size>,
}

impl HeadlessFactory {
    /// Factory with capability default sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the intrinsic size of every widget created for attribute `name`.
    #[must_use]
    pub fn with_size(mut self, name: impl Into<String>, size: Size) -> Self {
        self.sizes.insert(name.into(), size);
        self
    }

    /// Default intrinsic size for a capability.
    pub fn default_size(capability: &Capability) -> Size {
        match capability {
            Capability::EditableText => Size::new(120.0, 22.0),
            Capability::Text => Size::new(80.0, 17.0),
            Capability::Table { .. } => Size::new(200.0, 100.0),
            Capability::Object => Size::new(80.0, 80.0),
        }
    }
}

impl WidgetFactory for HeadlessFactory {
    fn materialize(
        &self,
        attr: &AttrDescriptor,
        _parent: &ControlNode,
    ) -> ReflowResult<Box<dyn Widget>> {
        let size = self
            .sizes
            .get(attr.name())
            .copied()
            .unwrap_or_else(|| Self::default_size(attr.capability()));
        Ok(Box::new(HeadlessWidget::new(size)))
    }
}

/// Records what the tree pushed into it.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessWidget {
    intrinsic: Size,
    text: Option<String>,
    rows: usize,
    frame: Rect,
    updates: usize,
}

impl HeadlessWidget {
    /// Widget with the given intrinsic size and no content.
    pub fn new(intrinsic: Size) -> Self {
        Self {
            intrinsic,
            text: None,
            rows: 0,
            frame: Rect::ZERO,
            updates: 0,
        }
    }

    /// Last displayed text; nested objects show their type name.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Row count of the last displayed table.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Last frame applied by the tree.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// How many times content was pushed.
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl Widget for HeadlessWidget {
    fn intrinsic_size(&self) -> Size {
        self.intrinsic
    }

    fn set_content(&mut self, value: &Bound) {
        self.updates += 1;
        self.rows = value.as_table().map_or(0, <[_]>::len);
        self.text = match value {
            Bound::Unresolved => None,
            Bound::Object(_) => value.upgrade().map(|s| s.type_name().to_owned()),
            Bound::Value(_) => value.as_text().map(str::to_owned),
        };
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/headless.rs"]
mod tests;
