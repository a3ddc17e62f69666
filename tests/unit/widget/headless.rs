use super::*;

use crate::subject::protocol::AttrValue;

#[test]
fn capability_defaults() {
    assert_eq!(
        HeadlessFactory::default_size(&Capability::EditableText),
        Size::new(120.0, 22.0)
    );
    assert_eq!(
        HeadlessFactory::default_size(&Capability::Table { keys: Vec::new() }),
        Size::new(200.0, 100.0)
    );
}

#[test]
fn content_and_frame_are_recorded() {
    let mut w = HeadlessWidget::new(Size::new(10.0, 5.0));
    assert_eq!(w.intrinsic_size(), Size::new(10.0, 5.0));
    assert_eq!(w.text(), None);

    w.set_content(&Bound::from(AttrValue::text("hello")));
    assert_eq!(w.text(), Some("hello"));
    assert_eq!(w.rows(), 0);

    let row = [("key".to_owned(), "k".to_owned())].into_iter().collect();
    w.set_content(&Bound::from(AttrValue::Table(vec![row])));
    assert_eq!(w.text(), None);
    assert_eq!(w.rows(), 1);
    assert_eq!(w.updates(), 2);

    let frame = Rect::new(1.0, 2.0, 11.0, 7.0);
    w.set_frame(frame);
    assert_eq!(w.frame(), frame);
}
