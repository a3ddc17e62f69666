use super::*;

use crate::foundation::core::Vec2;
use crate::subject::attr::{AttrDescriptor, Capability};
use crate::subject::protocol::AttrValue;
use crate::widget::headless::{HeadlessFactory, HeadlessWidget};

struct Panel {
    attrs: Vec<Arc<AttrDescriptor>>,
    inner: Option<Arc<Panel>>,
}

impl Subject for Panel {
    fn type_name(&self) -> &'static str {
        "Panel"
    }

    fn attributes(&self) -> &[Arc<AttrDescriptor>] {
        &self.attrs
    }
}

fn text(name: &'static str) -> Arc<AttrDescriptor> {
    AttrDescriptor::builder::<Panel>(name, Capability::Text, move |_| {
        Ok(AttrValue::text(name.to_uppercase()))
    })
    .build()
}

fn nested() -> Arc<Panel> {
    let inner = Arc::new(Panel {
        attrs: vec![text("x"), text("y")],
        inner: None,
    });
    Arc::new(Panel {
        attrs: vec![
            text("a"),
            AttrDescriptor::builder::<Panel>("inner", Capability::Object, |p| {
                Ok(p.inner.clone().map_or(AttrValue::Empty, AttrValue::object))
            })
            .build(),
        ],
        inner: Some(inner),
    })
}

fn new_tree(root: Arc<Panel>) -> ControlTree {
    ControlTree::new(
        root,
        Size::new(400.0, 300.0),
        LayoutConfig::default(),
        HeadlessFactory::new(),
        Arc::new(|| {}),
    )
    .unwrap()
}

#[test]
fn new_tree_holds_only_the_root() {
    let tree = new_tree(nested());
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.size(), Size::new(400.0, 300.0));
    assert!(root.parent().is_none());
    assert!(root.name().is_none());
    assert_eq!(tree.path_name(tree.root()), "Panel");
}

#[test]
fn invalid_config_is_rejected() {
    let config = LayoutConfig {
        outer_space: Vec2::new(-1.0, 8.0),
        ..LayoutConfig::default()
    };
    let err = ControlTree::new(
        nested(),
        Size::new(10.0, 10.0),
        config,
        HeadlessFactory::new(),
        Arc::new(|| {}),
    )
    .unwrap_err();
    assert!(matches!(err, ReflowError::Validation(_)));
}

#[test]
fn nested_objects_are_built_recursively() {
    let mut tree = new_tree(nested());
    tree.build_children(tree.root()).unwrap();
    assert_eq!(tree.len(), 5);

    let y = tree.find("inner.y").unwrap();
    assert_eq!(tree.path_name(y), "Panel.inner.y");
    let widget = tree.node(y).unwrap().widget_as::<HeadlessWidget>().unwrap();
    assert_eq!(widget.text(), Some("Y"));

    let inner = tree.node(tree.find("inner").unwrap()).unwrap();
    assert_eq!(inner.children().map(|(n, _)| n).collect::<Vec<_>>(), ["x", "y"]);
    assert_eq!(inner.subject().upgrade().unwrap().type_name(), "Panel");
}

#[test]
fn rebuilding_invalidates_old_handles() {
    let mut tree = new_tree(nested());
    tree.build_children(tree.root()).unwrap();
    let old = tree.find("inner.x").unwrap();

    tree.build_children(tree.root()).unwrap();
    assert_eq!(tree.len(), 5);
    assert!(!tree.contains(old));
    assert!(matches!(tree.node(old), Err(ReflowError::Validation(_))));

    let new = tree.find("inner.x").unwrap();
    assert_ne!(new, old);
}

#[test]
fn slots_are_reused_with_a_new_generation() {
    let mut tree = new_tree(nested());
    tree.build_children(tree.root()).unwrap();
    let old = tree.find("a").unwrap();
    tree.build_children(tree.root()).unwrap();

    let slot = &tree.slots[old.index() as usize];
    assert!(slot.node.is_some());
    assert_eq!(slot.generation, old.generation() + 1);
}

#[test]
fn duplicate_attribute_names_are_rejected() {
    let root = Arc::new(Panel {
        attrs: vec![text("a"), text("a")],
        inner: None,
    });
    let mut tree = new_tree(root);
    let err = tree.build_children(tree.root()).unwrap_err();
    assert!(err.to_string().contains("duplicate attribute 'a'"));
}

#[test]
fn subject_without_attributes_returns_the_margin() {
    let root = Arc::new(Panel {
        attrs: Vec::new(),
        inner: None,
    });
    let mut tree = new_tree(root);
    let size = tree.build_children(tree.root()).unwrap();
    assert_eq!(size, Size::new(8.0, 8.0));
    assert_eq!(tree.node(tree.root()).unwrap().size(), Size::new(400.0, 300.0));
}

#[test]
fn root_is_not_editable() {
    let mut tree = new_tree(nested());
    let err = tree
        .commit_edit(tree.root(), AttrValue::text("x"))
        .unwrap_err();
    assert!(matches!(err, ReflowError::Validation(_)));
}
