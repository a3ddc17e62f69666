use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::song::model::SongData;

fn song() -> Arc<Song> {
    Song::new(SongData {
        url: "file:///s.mp3".into(),
        artist: "Can".into(),
        title: "Vitamin C".into(),
        rating: None,
        tags: [("krautrock".to_owned(), 1.0)].into_iter().collect(),
        metadata: [("year".to_owned(), "1972".to_owned())].into_iter().collect(),
    })
}

fn attr<'a>(edit: &'a SongEdit, name: &str) -> &'a Arc<AttrDescriptor> {
    edit.attributes().iter().find(|a| a.name() == name).unwrap()
}

#[test]
fn attributes_are_declared_in_order() {
    let edit = SongEdit::new(AppContext::new());
    let names: Vec<_> = edit.attributes().iter().map(|a| a.name()).collect();
    assert_eq!(names, ["song", "artist", "title", "metadata"]);
    assert!(attr(&edit, "song").is_container());
    assert!(attr(&edit, "title").is_writable());
    assert!(!attr(&edit, "metadata").is_writable());
    assert!(attr(&edit, "metadata").hints().variable_height);
}

#[test]
fn without_a_song_values_are_empty() {
    let edit = SongEdit::new(AppContext::new());
    assert_eq!(attr(&edit, "song").get(edit.as_ref()).unwrap(), AttrValue::Empty);
    assert_eq!(
        attr(&edit, "artist").get(edit.as_ref()).unwrap(),
        AttrValue::text("")
    );
    assert!(edit.metadata().is_empty());
    assert!(
        attr(&edit, "metadata")
            .update_event(edit.as_ref())
            .unwrap()
            .is_none()
    );
}

#[test]
fn selection_falls_back_to_the_playing_song() {
    let ctx = AppContext::new();
    let edit = SongEdit::new(Arc::clone(&ctx));
    let playing = song();
    ctx.set_current_song(Some(Arc::clone(&playing)));
    assert!(Arc::ptr_eq(&edit.song().unwrap(), &playing));

    let picked = song();
    ctx.set_cur_selected_song(Some(Arc::clone(&picked)));
    assert!(Arc::ptr_eq(&edit.song().unwrap(), &picked));
}

#[test]
fn selection_changes_are_forwarded() {
    let ctx = AppContext::new();
    let edit = SongEdit::new(Arc::clone(&ctx));
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    let _sub = Subject::update_event(edit.as_ref())
        .unwrap()
        .register(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

    ctx.set_current_song(Some(song()));
    ctx.set_cur_selected_song(Some(song()));
    // Hidden behind the explicit selection.
    ctx.set_current_song(Some(song()));
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    drop(edit);
    assert_eq!(ctx.selection_event().handler_count(), 0);
}

#[test]
fn edits_write_through_and_ignore_empty_text() {
    let ctx = AppContext::new();
    let s = song();
    ctx.set_cur_selected_song(Some(Arc::clone(&s)));
    let edit = SongEdit::new(ctx);

    let title = attr(&edit, "title");
    title.set(edit.as_ref(), AttrValue::text("Mushroom")).unwrap();
    assert_eq!(s.title(), "Mushroom");
    title.set(edit.as_ref(), AttrValue::text("")).unwrap();
    assert_eq!(s.title(), "Mushroom");
    assert!(title.set(edit.as_ref(), AttrValue::Empty).is_err());
}

#[test]
fn edits_without_a_song_fail() {
    let edit = SongEdit::new(AppContext::new());
    let err = attr(&edit, "artist")
        .set(edit.as_ref(), AttrValue::text("x"))
        .unwrap_err();
    assert!(err.to_string().contains("no song selected"));
}

#[test]
fn metadata_merges_song_fields() {
    let ctx = AppContext::new();
    let s = song();
    s.set_rating(Some(0.75));
    ctx.set_current_song(Some(Arc::clone(&s)));
    let edit = SongEdit::new(ctx);

    let rows = edit.metadata();
    let pairs: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r["key"].as_str(), r["value"].as_str()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("artist", "Can"),
            ("rating", "0.75"),
            ("tags", "krautrock"),
            ("title", "Vitamin C"),
            ("url", "file:///s.mp3"),
            ("year", "1972"),
        ]
    );
    let ev = attr(&edit, "metadata")
        .update_event(edit.as_ref())
        .unwrap()
        .unwrap();
    assert!(ev.same_event(s.update_event()));
}
