use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use anyhow::{Context as _, bail};

use crate::event::bus::{Subscription, UpdateEvent};
use crate::song::context::AppContext;
use crate::song::model::{Song, tags_to_text};
use crate::subject::attr::{AttrDescriptor, Capability};
use crate::subject::protocol::{AttrValue, Subject, TableRow};

/// Editor panel for the context's selected song.
#[derive(Debug)]
pub struct SongEdit {
    ctx: Arc<AppContext>,
    event: UpdateEvent,
    _forward: Subscription,
}

impl SongEdit {
    /// Editor following `ctx`'s selection.
    pub fn new(ctx: Arc<AppContext>) -> Arc<Self> {
        let event = UpdateEvent::new();
        let forward = ctx.selection_event().register({
            let event = event.clone();
            move || event.push()
        });
        Arc::new(Self {
            ctx,
            event,
            _forward: forward,
        })
    }

    /// Context the editor follows.
    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    /// Song being edited.
    pub fn song(&self) -> Option<Arc<Song>> {
        self.ctx.cur_selected_song()
    }

    fn song_event(&self) -> Option<UpdateEvent> {
        self.song().map(|s| s.update_event().clone())
    }

    /// Key/value rows describing the song; empty without a song.
    pub fn metadata(&self) -> Vec<TableRow> {
        let Some(song) = self.song() else {
            return Vec::new();
        };
        let data = song.data();
        let mut fields: BTreeMap<String, String> = data.metadata.clone();
        fields.insert("artist".into(), data.artist);
        fields.insert("title".into(), data.title);
        fields.insert("url".into(), data.url);
        if let Some(rating) = data.rating {
            fields.insert("rating".into(), rating.to_string());
        }
        if !data.tags.is_empty() {
            fields.insert("tags".into(), tags_to_text(&data.tags));
        }
        fields
            .into_iter()
            .map(|(key, value)| {
                TableRow::from([("key".to_owned(), key), ("value".to_owned(), value)])
            })
            .collect()
    }
}

fn edited_text(value: &AttrValue) -> anyhow::Result<Option<&str>> {
    let text = value.as_text().context("expected a text value")?;
    Ok((!text.is_empty()).then_some(text))
}

fn song_text(
    name: &'static str,
    get: fn(&Song) -> String,
    set: fn(&Song, String),
) -> Arc<AttrDescriptor> {
    AttrDescriptor::builder::<SongEdit>(name, Capability::EditableText, move |e| {
        Ok(AttrValue::text(e.song().map(|s| get(&s)).unwrap_or_default()))
    })
    .set(move |e, value| {
        // Clearing the field keeps the stored value.
        let Some(text) = edited_text(&value)? else {
            return Ok(());
        };
        let Some(song) = e.song() else {
            bail!("no song selected");
        };
        set(&song, text.to_owned());
        Ok(())
    })
    .update_event(SongEdit::song_event)
    .build()
}

fn edit_attrs() -> &'static [Arc<AttrDescriptor>] {
    static ATTRS: OnceLock<Vec<Arc<AttrDescriptor>>> = OnceLock::new();
    ATTRS.get_or_init(|| {
        vec![
            AttrDescriptor::builder::<SongEdit>("song", Capability::Object, |e| {
                Ok(e.song().map_or(AttrValue::Empty, AttrValue::object))
            })
            .build(),
            song_text("artist", Song::artist, |s, v| s.set_artist(v)),
            song_text("title", Song::title, |s, v| s.set_title(v)),
            AttrDescriptor::builder::<SongEdit>(
                "metadata",
                Capability::Table {
                    keys: vec!["key".into(), "value".into()],
                },
                |e| Ok(AttrValue::Table(e.metadata())),
            )
            .variable_height()
            .update_event(SongEdit::song_event)
            .build(),
        ]
    })
}

impl Subject for SongEdit {
    fn type_name(&self) -> &'static str {
        "SongEdit"
    }

    fn attributes(&self) -> &[Arc<AttrDescriptor>] {
        edit_attrs()
    }

    fn update_event(&self) -> Option<UpdateEvent> {
        Some(self.event.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/song/edit.rs"]
mod tests;
