use std::sync::{Arc, PoisonError, RwLock};

use crate::event::bus::UpdateEvent;
use crate::song::model::Song;

#[derive(Debug, Default)]
struct Selection {
    current: Option<Arc<Song>>,
    selected: Option<Arc<Song>>,
}

/// Application state shared by the panels of one window.
///
/// The selected song falls back to the currently playing one until a song is
/// selected explicitly.
#[derive(Debug, Default)]
pub struct AppContext {
    selection: RwLock<Selection>,
    selection_event: UpdateEvent,
}

impl AppContext {
    /// Empty context.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The explicitly selected song, else the playing one.
    pub fn cur_selected_song(&self) -> Option<Arc<Song>> {
        let selection = self.selection.read().unwrap_or_else(PoisonError::into_inner);
        selection
            .selected
            .clone()
            .or_else(|| selection.current.clone())
    }

    /// Select `song` explicitly (or clear the selection) and announce it.
    pub fn set_cur_selected_song(&self, song: Option<Arc<Song>>) {
        self.selection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .selected = song;
        self.selection_event.push();
    }

    /// Change the playing song; announced only while nothing is selected.
    pub fn set_current_song(&self, song: Option<Arc<Song>>) {
        let visible = {
            let mut selection = self.selection.write().unwrap_or_else(PoisonError::into_inner);
            selection.current = song;
            selection.selected.is_none()
        };
        if visible {
            self.selection_event.push();
        }
    }

    /// Event pushed whenever [`cur_selected_song`](Self::cur_selected_song) may
    /// have changed.
    pub fn selection_event(&self) -> &UpdateEvent {
        &self.selection_event
    }
}
