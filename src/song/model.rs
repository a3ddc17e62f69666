use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard};

use crate::event::bus::UpdateEvent;
use crate::subject::attr::{AttrDescriptor, Capability};
use crate::subject::protocol::{AttrValue, Subject};

/// Plain song fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongData {
    /// Location of the media file.
    pub url: String,
    /// Artist name.
    pub artist: String,
    /// Track title.
    pub title: String,
    /// Rating in `0.0..=1.0`, if rated.
    pub rating: Option<f64>,
    /// Tag weights; a weight of 1 or more is a plain tag.
    pub tags: BTreeMap<String, f64>,
    /// Free-form metadata read from the file.
    pub metadata: BTreeMap<String, String>,
}

/// A song shared between the player and the UI.
///
/// Every setter announces the change through [`Song::update_event`], on
/// whatever thread it runs.
#[derive(Debug)]
pub struct Song {
    data: RwLock<SongData>,
    event: UpdateEvent,
}

impl Song {
    /// Wrap `data` in a shared song.
    pub fn new(data: SongData) -> Arc<Self> {
        Arc::new(Self {
            data: RwLock::new(data),
            event: UpdateEvent::new(),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, SongData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut SongData)) {
        {
            let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut *data);
        }
        self.event.push();
    }

    /// Copy of all fields.
    pub fn data(&self) -> SongData {
        self.read().clone()
    }

    /// Media location.
    pub fn url(&self) -> String {
        self.read().url.clone()
    }

    /// Artist name.
    pub fn artist(&self) -> String {
        self.read().artist.clone()
    }

    /// Track title.
    pub fn title(&self) -> String {
        self.read().title.clone()
    }

    /// Rating, if rated.
    pub fn rating(&self) -> Option<f64> {
        self.read().rating
    }

    /// Set the artist and announce it.
    pub fn set_artist(&self, artist: impl Into<String>) {
        let artist = artist.into();
        self.update(|d| d.artist = artist);
    }

    /// Set the title and announce it.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.update(|d| d.title = title);
    }

    /// Set or clear the rating and announce it.
    pub fn set_rating(&self, rating: Option<f64>) {
        self.update(|d| d.rating = rating);
    }

    /// Set one tag weight and announce it.
    pub fn set_tag(&self, tag: impl Into<String>, weight: f64) {
        let tag = tag.into();
        self.update(|d| {
            d.tags.insert(tag, weight);
        });
    }

    /// Set one metadata entry and announce it.
    pub fn set_metadata(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        self.update(|d| {
            d.metadata.insert(key, value);
        });
    }

    /// Event pushed after every change.
    pub fn update_event(&self) -> &UpdateEvent {
        &self.event
    }
}

/// Render tags as space-separated text: `tag` for weights of 1 or more,
/// `tag:weight` otherwise, in tag order.
pub fn tags_to_text(tags: &BTreeMap<String, f64>) -> String {
    tags.iter()
        .map(|(tag, weight)| {
            if *weight >= 1.0 {
                tag.clone()
            } else {
                format!("{tag}:{weight}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn song_attrs() -> &'static [Arc<AttrDescriptor>] {
    static ATTRS: OnceLock<Vec<Arc<AttrDescriptor>>> = OnceLock::new();
    ATTRS.get_or_init(|| {
        vec![
            AttrDescriptor::builder::<Song>("url", Capability::Text, |s| {
                Ok(AttrValue::text(s.url()))
            })
            .variable_width(true)
            .build(),
            AttrDescriptor::builder::<Song>("rating", Capability::Text, |s| {
                Ok(AttrValue::text(
                    s.rating().map(|r| format!("{r:.2}")).unwrap_or_default(),
                ))
            })
            .align_right()
            .build(),
        ]
    })
}

impl Subject for Song {
    fn type_name(&self) -> &'static str {
        "Song"
    }

    fn attributes(&self) -> &[Arc<AttrDescriptor>] {
        song_attrs()
    }

    fn update_event(&self) -> Option<UpdateEvent> {
        Some(self.event.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/song/model.rs"]
mod tests;
