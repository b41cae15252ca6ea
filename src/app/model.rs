use rand::seq::SliceRandom;

use crate::library::{self, Track, format_duration};
use crate::player::SharedPlayer;

pub struct App {
    library: Vec<Track>,
    /// Indices into `library`, in display order. This is the filtered view
    /// that all navigation operates on.
    view: Vec<usize>,
    query: String,
    filter_mode: bool,
    shuffle: bool,
    /// Cursor position within `view`.
    selected: usize,
    player: SharedPlayer,
    pub library_root: Option<String>,
}

impl App {
    pub fn new(library: Vec<Track>, player: SharedPlayer) -> Self {
        let mut app = Self {
            library,
            view: Vec::new(),
            query: String::new(),
            filter_mode: false,
            shuffle: false,
            selected: 0,
            player,
            library_root: None,
        };
        app.refresh_view();
        app
    }

    pub fn library(&self) -> &[Track] {
        &self.library
    }

    pub fn view(&self) -> &[usize] {
        &self.view
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter_mode(&self) -> bool {
        self.filter_mode
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn player(&self) -> &SharedPlayer {
        &self.player
    }

    /// Replace the library wholesale (startup and rescans) and rebuild the
    /// view from scratch.
    pub fn set_library(&mut self, library: Vec<Track>) {
        self.library = library;
        self.selected = 0;
        self.refresh_view();
    }

    /// Recompute the view from the current query and shuffle flag, then
    /// re-resolve the player's notion of "where the current track sits" by
    /// path. Indices from the previous view are never reused.
    pub fn refresh_view(&mut self) {
        self.view = library::filter_indices(&self.library, &self.query);
        if self.shuffle {
            self.view.shuffle(&mut rand::rng());
        }
        if let Ok(mut player) = self.player.lock() {
            player.resync_view(&self.library, &self.view);
        }
        if self.selected >= self.view.len() {
            self.selected = self.view.len().saturating_sub(1);
        }
    }

    /// Track at view position `pos`, if any.
    pub fn track_at(&self, pos: usize) -> Option<&Track> {
        self.view.get(pos).and_then(|&i| self.library.get(i))
    }

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
    }

    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh_view();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.refresh_view();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.refresh_view();
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.refresh_view();
    }

    pub fn cursor_next(&mut self) {
        if self.selected + 1 < self.view.len() {
            self.selected += 1;
        }
    }

    pub fn cursor_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn play_selected(&mut self) {
        self.play_at(self.selected);
    }

    fn play_at(&mut self, pos: usize) {
        let Some(track) = self.track_at(pos).cloned() else {
            return;
        };
        if let Ok(mut player) = self.player.lock() {
            player.play(&track, Some(pos));
        }
        self.selected = pos;
    }

    /// Advance to the next track in the view, wrapping from the last entry
    /// back to the first. When the current track no longer resolves into the
    /// view, start from the top.
    pub fn next(&mut self) {
        if self.view.is_empty() {
            return;
        }
        let pos = match self.current_pos() {
            Some(i) if i + 1 < self.view.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.play_at(pos);
    }

    /// Step to the previous track, wrapping from the first entry to the last.
    pub fn previous(&mut self) {
        if self.view.is_empty() {
            return;
        }
        let pos = match self.current_pos() {
            Some(0) | None => self.view.len() - 1,
            Some(i) => i - 1,
        };
        self.play_at(pos);
    }

    fn current_pos(&self) -> Option<usize> {
        self.player.lock().ok().and_then(|p| p.current_index())
    }

    /// Play/pause toggle, seeded with the first view entry when nothing was
    /// ever played.
    pub fn toggle_playback(&mut self) {
        let fallback = self.track_at(0).cloned();
        if let Ok(mut player) = self.player.lock() {
            player.toggle(fallback.as_ref().map(|t| (t, 0)));
        }
    }

    pub fn stop(&mut self) {
        if let Ok(mut player) = self.player.lock() {
            player.stop();
        }
    }

    /// Nudge the volume and return the new setting.
    pub fn adjust_volume(&mut self, delta: i32) -> u8 {
        let Ok(mut player) = self.player.lock() else {
            return 0;
        };
        let next = player.volume() as i32 + delta;
        player.set_volume(next);
        player.volume()
    }

    /// One-line library summary, e.g. "Library (42 tracks, 154:02)".
    pub fn summary(&self) -> String {
        let total: u64 = self
            .view
            .iter()
            .filter_map(|&i| self.library.get(i))
            .map(|t| t.duration_secs())
            .sum();
        format!(
            "Library ({} tracks, {})",
            self.view.len(),
            format_duration(total)
        )
    }
}
