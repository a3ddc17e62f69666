//! Attribute descriptors: static metadata plus typed accessors for one field.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::event::bus::UpdateEvent;
use crate::foundation::error::{ReflowError, ReflowResult};
use crate::subject::protocol::{AttrValue, Subject};

/// Kind of control an attribute is rendered as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Nested subject shown as a container of its own attributes.
    Object,
    /// Read-only text.
    Text,
    /// Single-line editable text.
    EditableText,
    /// Table with the given column keys.
    Table {
        /// Column keys in display order.
        keys: Vec<String>,
    },
}

/// Per-attribute layout overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutHints {
    /// Horizontal gap after this control; container default when unset.
    pub space_x: Option<f64>,
    /// Vertical gap above this control's row; container default when unset.
    pub space_y: Option<f64>,
    /// Place this control to the right of the previous one instead of below.
    pub align_right: bool,
    /// `Some(true)` claims the row's slack, `Some(false)` refuses it.
    pub variable_width: Option<bool>,
    /// Claim the column's vertical slack.
    pub variable_height: bool,
}

/// Why a refresh runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshCause {
    /// First population of a container's content right after it was built.
    Initial,
    /// A subject announced a change.
    Update,
}

type Getter = Arc<dyn Fn(&dyn Subject) -> ReflowResult<AttrValue> + Send + Sync>;
type Setter = Arc<dyn Fn(&dyn Subject, AttrValue) -> ReflowResult<()> + Send + Sync>;
type EventAccessor = Arc<dyn Fn(&dyn Subject) -> ReflowResult<Option<UpdateEvent>> + Send + Sync>;
type UpdateHandler =
    Arc<dyn Fn(&dyn Subject, &AttrDescriptor, RefreshCause) -> ReflowResult<()> + Send + Sync>;

/// Immutable description of one bindable attribute of a subject type.
pub struct AttrDescriptor {
    name: String,
    capability: Capability,
    hints: LayoutHints,
    getter: Getter,
    setter: Option<Setter>,
    update_event: Option<EventAccessor>,
    update_handler: Option<UpdateHandler>,
}

fn downcast<'a, S: Subject>(subject: &'a dyn Subject, attr: &str) -> ReflowResult<&'a S> {
    let any: &dyn Any = subject;
    any.downcast_ref::<S>().ok_or_else(|| {
        ReflowError::attribute(format!(
            "attribute '{attr}' of {} cannot be read from {}",
            std::any::type_name::<S>(),
            subject.type_name()
        ))
    })
}

impl AttrDescriptor {
    /// Start declaring attribute `name` of subject type `S`, read through `get`.
    pub fn builder<S: Subject>(
        name: impl Into<String>,
        capability: Capability,
        get: impl Fn(&S) -> anyhow::Result<AttrValue> + Send + Sync + 'static,
    ) -> AttrBuilder<S> {
        let name = name.into();
        let attr = name.clone();
        let getter: Getter = Arc::new(move |subject: &dyn Subject| -> ReflowResult<AttrValue> {
            let subject = downcast::<S>(subject, &attr)?;
            get(subject).map_err(|e| ReflowError::attribute(format!("get '{attr}': {e:#}")))
        });
        AttrBuilder {
            name,
            capability,
            hints: LayoutHints::default(),
            getter,
            setter: None,
            update_event: None,
            update_handler: None,
            _subject: PhantomData,
        }
    }

    /// Attribute name, unique within its subject type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control kind.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Layout overrides.
    pub fn hints(&self) -> &LayoutHints {
        &self.hints
    }

    /// Whether the control is a container of a nested subject.
    pub fn is_container(&self) -> bool {
        self.capability == Capability::Object
    }

    /// Whether the attribute is two-way bound.
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Whether the attribute has its own update event.
    pub fn has_update_event(&self) -> bool {
        self.update_event.is_some()
    }

    /// Whether a custom update handler is declared.
    pub fn has_update_handler(&self) -> bool {
        self.update_handler.is_some()
    }

    /// Read the current value from `subject`.
    pub fn get(&self, subject: &dyn Subject) -> ReflowResult<AttrValue> {
        (self.getter)(subject)
    }

    /// Write `value` into `subject`; read-only attributes are rejected.
    pub fn set(&self, subject: &dyn Subject, value: AttrValue) -> ReflowResult<()> {
        let setter = self.setter.as_ref().ok_or_else(|| {
            ReflowError::validation(format!("attribute '{}' is read-only", self.name))
        })?;
        setter(subject, value)
    }

    /// The attribute's own update event on `subject`, if declared and available.
    pub fn update_event(&self, subject: &dyn Subject) -> ReflowResult<Option<UpdateEvent>> {
        match &self.update_event {
            Some(accessor) => accessor(subject),
            None => Ok(None),
        }
    }

    /// Run the custom update handler, if any, against the owning subject.
    pub fn run_update_handler(
        &self,
        subject: &dyn Subject,
        cause: RefreshCause,
    ) -> ReflowResult<()> {
        match &self.update_handler {
            Some(handler) => handler(subject, self, cause),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for AttrDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrDescriptor")
            .field("name", &self.name)
            .field("capability", &self.capability)
            .field("hints", &self.hints)
            .field("writable", &self.is_writable())
            .field("update_event", &self.has_update_event())
            .field("update_handler", &self.has_update_handler())
            .finish()
    }
}

/// Typed builder for an [`AttrDescriptor`] declared on subject type `S`.
pub struct AttrBuilder<S> {
    name: String,
    capability: Capability,
    hints: LayoutHints,
    getter: Getter,
    setter: Option<Setter>,
    update_event: Option<EventAccessor>,
    update_handler: Option<UpdateHandler>,
    _subject: PhantomData<fn(&S)>,
}

impl<S: Subject> AttrBuilder<S> {
    /// Make the attribute two-way bound.
    pub fn set(
        mut self,
        set: impl Fn(&S, AttrValue) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        let attr = self.name.clone();
        self.setter = Some(Arc::new(
            move |subject: &dyn Subject, value: AttrValue| -> ReflowResult<()> {
                let subject = downcast::<S>(subject, &attr)?;
                set(subject, value)
                    .map_err(|e| ReflowError::attribute(format!("set '{attr}': {e:#}")))
            },
        ));
        self
    }

    /// Declare the event announcing changes of this attribute.
    pub fn update_event(
        mut self,
        event: impl Fn(&S) -> Option<UpdateEvent> + Send + Sync + 'static,
    ) -> Self {
        let attr = self.name.clone();
        self.update_event = Some(Arc::new(move |subject: &dyn Subject| -> ReflowResult<_> {
            Ok(event(downcast::<S>(subject, &attr)?))
        }));
        self
    }

    /// Declare a custom handler run on every refresh of the owning container.
    pub fn on_update(
        mut self,
        handler: impl Fn(&S, &AttrDescriptor, RefreshCause) -> anyhow::Result<()>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.update_handler = Some(Arc::new(
            move |subject: &dyn Subject,
                  attr: &AttrDescriptor,
                  cause: RefreshCause|
                  -> ReflowResult<()> {
                let subject = downcast::<S>(subject, attr.name())?;
                handler(subject, attr, cause)
                    .map_err(|e| ReflowError::handler(format!("'{}': {e:#}", attr.name())))
            },
        ));
        self
    }

    /// Horizontal gap override.
    pub fn space_x(mut self, space: f64) -> Self {
        self.hints.space_x = Some(space);
        self
    }

    /// Vertical gap override.
    pub fn space_y(mut self, space: f64) -> Self {
        self.hints.space_y = Some(space);
        self
    }

    /// Continue the current row instead of starting a new one.
    pub fn align_right(mut self) -> Self {
        self.hints.align_right = true;
        self
    }

    /// Claim (`true`) or explicitly refuse (`false`) the row's horizontal slack.
    pub fn variable_width(mut self, variable: bool) -> Self {
        self.hints.variable_width = Some(variable);
        self
    }

    /// Claim the column's vertical slack.
    pub fn variable_height(mut self) -> Self {
        self.hints.variable_height = true;
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Arc<AttrDescriptor> {
        Arc::new(AttrDescriptor {
            name: self.name,
            capability: self.capability,
            hints: self.hints,
            getter: self.getter,
            setter: self.setter,
            update_event: self.update_event,
            update_handler: self.update_handler,
        })
    }
}

impl<S> fmt::Debug for AttrBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrBuilder")
            .field("name", &self.name)
            .field("capability", &self.capability)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/subject/attr.rs"]
mod tests;
