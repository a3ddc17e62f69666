//! The subject descriptor protocol consumed by the tree builder.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::event::bus::UpdateEvent;
use crate::subject::attr::AttrDescriptor;

/// A live model object whose declared attributes can be bound to controls.
///
/// Implementations declare their attribute list once per type (typically in a
/// `static OnceLock`) and hand out the same slice on every call.
pub trait Subject: Any + Send + Sync {
    /// Type name used as the first segment of node paths.
    fn type_name(&self) -> &'static str;

    /// Bindable attributes in declaration order.
    fn attributes(&self) -> &[Arc<AttrDescriptor>];

    /// Subject-wide update event, if the subject announces its own changes.
    fn update_event(&self) -> Option<UpdateEvent> {
        None
    }
}

/// One table row, keyed by column name.
pub type TableRow = BTreeMap<String, String>;

/// Current value of an attribute as produced by its getter.
#[derive(Clone, Default)]
pub enum AttrValue {
    /// No value (e.g. an optional object that is unset).
    #[default]
    Empty,
    /// Plain or editable text.
    Text(String),
    /// Rows of a key/value table.
    Table(Vec<TableRow>),
    /// A nested subject, displayed as a container.
    Object(Arc<dyn Subject>),
}

impl AttrValue {
    /// Build a [`AttrValue::Text`] value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Build a [`AttrValue::Object`] value.
    pub fn object<S: Subject>(subject: Arc<S>) -> Self {
        Self::Object(subject)
    }

    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Table payload, if any.
    pub fn as_table(&self) -> Option<&[TableRow]> {
        match self {
            Self::Table(rows) => Some(rows),
            _ => None,
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Table(rows) => f.debug_tuple("Table").field(rows).finish(),
            Self::Object(s) => f.debug_tuple("Object").field(&s.type_name()).finish(),
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Table(a), Self::Table(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

/// What a control node currently displays.
///
/// Nested subjects are held weakly: the model owns them, the tree only observes.
#[derive(Clone, Default)]
pub enum Bound {
    /// Not resolved yet.
    #[default]
    Unresolved,
    /// A nested subject.
    Object(Weak<dyn Subject>),
    /// A plain value.
    Value(AttrValue),
}

impl Bound {
    /// Strong reference to the bound subject, if it is an object that is still alive.
    pub fn upgrade(&self) -> Option<Arc<dyn Subject>> {
        match self {
            Self::Object(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// Text payload, if the node displays text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Value(v) => v.as_text(),
            _ => None,
        }
    }

    /// Table payload, if the node displays a table.
    pub fn as_table(&self) -> Option<&[TableRow]> {
        match self {
            Self::Value(v) => v.as_table(),
            _ => None,
        }
    }
}

impl From<AttrValue> for Bound {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Object(subject) => Self::Object(Arc::downgrade(&subject)),
            other => Self::Value(other),
        }
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => f.write_str("Unresolved"),
            Self::Object(weak) => match weak.upgrade() {
                Some(s) => f.debug_tuple("Object").field(&s.type_name()).finish(),
                None => f.write_str("Object(<dropped>)"),
            },
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

/// Whether `current` is a different object than the one `previous` was taken from.
pub(crate) fn identity_changed(
    previous: Option<&Weak<dyn Subject>>,
    current: Option<&Arc<dyn Subject>>,
) -> bool {
    match (previous, current) {
        (None, None) => false,
        (Some(prev), Some(cur)) => prev
            .upgrade()
            .is_none_or(|prev| !std::ptr::addr_eq(Arc::as_ptr(&prev), Arc::as_ptr(cur))),
        _ => true,
    }
}
