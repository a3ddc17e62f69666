use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn tags_render_plain_or_weighted() {
    let tags: BTreeMap<String, f64> = [
        ("rock".to_owned(), 1.0),
        ("chill".to_owned(), 0.5),
        ("live".to_owned(), 2.0),
    ]
    .into_iter()
    .collect();
    assert_eq!(tags_to_text(&tags), "chill:0.5 live rock");
    assert_eq!(tags_to_text(&BTreeMap::new()), "");
}

#[test]
fn every_setter_pushes_the_event() {
    let song = Song::new(SongData::default());
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    let _sub = song.update_event().register(move || {
        h.fetch_add(1, Ordering::SeqCst);
    });

    song.set_artist("Nina Simone");
    song.set_title("Sinnerman");
    song.set_rating(Some(0.8));
    song.set_tag("jazz", 1.0);
    song.set_metadata("album", "Pastel Blues");

    assert_eq!(hits.load(Ordering::SeqCst), 5);
    let data = song.data();
    assert_eq!(data.artist, "Nina Simone");
    assert_eq!(data.title, "Sinnerman");
    assert_eq!(data.rating, Some(0.8));
    assert_eq!(data.metadata["album"], "Pastel Blues");
}

#[test]
fn song_attributes_read_current_state() {
    let song = Song::new(SongData {
        url: "file:///a.flac".into(),
        rating: Some(0.5),
        ..SongData::default()
    });
    let attrs = song.attributes();
    assert_eq!(
        attrs.iter().map(|a| a.name()).collect::<Vec<_>>(),
        ["url", "rating"]
    );
    assert_eq!(
        attrs[0].get(song.as_ref()).unwrap(),
        AttrValue::text("file:///a.flac")
    );
    assert_eq!(attrs[1].get(song.as_ref()).unwrap(), AttrValue::text("0.50"));
    assert!(attrs[1].hints().align_right);
    assert!(Subject::update_event(song.as_ref()).is_some());
}
