use super::*;

use std::sync::{Mutex, OnceLock};

struct Probe {
    label: Mutex<String>,
    event: UpdateEvent,
}

impl Probe {
    fn new(label: &str) -> Self {
        Self {
            label: Mutex::new(label.to_owned()),
            event: UpdateEvent::new(),
        }
    }
}

fn probe_attrs() -> &'static [Arc<AttrDescriptor>] {
    static ATTRS: OnceLock<Vec<Arc<AttrDescriptor>>> = OnceLock::new();
    ATTRS.get_or_init(|| {
        vec![
            AttrDescriptor::builder::<Probe>("label", Capability::EditableText, |p| {
                Ok(AttrValue::text(p.label.lock().unwrap().clone()))
            })
            .set(|p, v| {
                let text = v.as_text().ok_or_else(|| anyhow::anyhow!("expected text"))?;
                *p.label.lock().unwrap() = text.to_owned();
                Ok(())
            })
            .update_event(|p| Some(p.event.clone()))
            .space_x(3.0)
            .variable_width(true)
            .build(),
            AttrDescriptor::builder::<Probe>("broken", Capability::Text, |_| {
                Err(anyhow::anyhow!("boom"))
            })
            .on_update(|_, _, cause| match cause {
                RefreshCause::Initial => Ok(()),
                RefreshCause::Update => Err(anyhow::anyhow!("refused")),
            })
            .align_right()
            .build(),
        ]
    })
}

impl Subject for Probe {
    fn type_name(&self) -> &'static str {
        "Probe"
    }

    fn attributes(&self) -> &[Arc<AttrDescriptor>] {
        probe_attrs()
    }
}

struct Other;

impl Subject for Other {
    fn type_name(&self) -> &'static str {
        "Other"
    }

    fn attributes(&self) -> &[Arc<AttrDescriptor>] {
        &[]
    }
}

#[test]
fn getter_and_setter_round_through_the_subject() {
    let probe = Probe::new("a");
    let label = &probe.attributes()[0];

    assert!(label.is_writable());
    assert_eq!(label.get(&probe).unwrap(), AttrValue::text("a"));
    label.set(&probe, AttrValue::text("b")).unwrap();
    assert_eq!(*probe.label.lock().unwrap(), "b");
}

#[test]
fn hints_are_recorded() {
    let attrs = probe_attrs();
    assert_eq!(attrs[0].hints().space_x, Some(3.0));
    assert_eq!(attrs[0].hints().variable_width, Some(true));
    assert!(!attrs[0].hints().align_right);
    assert!(attrs[1].hints().align_right);
    assert_eq!(attrs[1].hints().variable_width, None);
}

#[test]
fn read_only_attribute_rejects_writes() {
    let probe = Probe::new("a");
    let broken = &probe.attributes()[1];
    let err = broken.set(&probe, AttrValue::text("x")).unwrap_err();
    assert!(matches!(err, ReflowError::Validation(_)));
}

#[test]
fn getter_failure_is_an_attribute_error() {
    let probe = Probe::new("a");
    let err = probe.attributes()[1].get(&probe).unwrap_err();
    assert!(matches!(err, ReflowError::AttributeResolution(_)));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn wrong_subject_type_is_reported() {
    let err = probe_attrs()[0].get(&Other).unwrap_err();
    assert!(matches!(err, ReflowError::AttributeResolution(_)));
    assert!(err.to_string().contains("Other"));
}

#[test]
fn update_event_resolves_against_the_subject() {
    let probe = Probe::new("a");
    let attrs = probe.attributes();
    let ev = attrs[0].update_event(&probe).unwrap().unwrap();
    assert!(ev.same_event(&probe.event));
    assert!(attrs[1].update_event(&probe).unwrap().is_none());
}

#[test]
fn update_handler_errors_map_to_handler_errors() {
    let probe = Probe::new("a");
    let attrs = probe.attributes();
    assert!(!attrs[0].has_update_handler());
    attrs[0].run_update_handler(&probe, RefreshCause::Update).unwrap();

    attrs[1].run_update_handler(&probe, RefreshCause::Initial).unwrap();
    let err = attrs[1]
        .run_update_handler(&probe, RefreshCause::Update)
        .unwrap_err();
    assert!(matches!(err, ReflowError::Handler(_)));
    assert!(err.to_string().contains("broken"));
}

#[test]
fn debug_lists_flags_not_closures() {
    let s = format!("{:?}", probe_attrs()[0]);
    assert!(s.contains("label"));
    assert!(s.contains("writable: true"));
}
