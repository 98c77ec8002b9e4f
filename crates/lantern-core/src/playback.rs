//! Mediated audio playback.
//!
//! The coordinator owns every registered track handle and is the only place
//! that starts or pauses them, which keeps at most one track playing. One
//! track is the ambient soundtrack: it autoplays once when the host signals
//! that playback may start, and loops from a non-zero offset.

use crate::config::EngineConfig;
use crate::constants::{AMBIENT_TRACK_ID, TRACK_VOLUME};
use crate::error::PlaybackRefused;
use fnv::FnvHashMap;

/// Platform audio element as seen by the coordinator.
pub trait Playable {
    /// Ask the element to start. `Err` means the host refused (for example
    /// an autoplay policy); it is never a fault.
    fn play(&self) -> Result<(), PlaybackRefused>;
    fn pause(&self);
    fn position_sec(&self) -> f64;
    fn set_position_sec(&self, seconds: f64);
    fn set_volume(&self, volume: f64);
    fn set_looping(&self, looping: bool);
    fn set_muted(&self, muted: bool);
}

pub struct TrackHandle {
    pub id: String,
    pub playable: Box<dyn Playable>,
    pub start_offset_sec: f64,
    pub looping: bool,
    pub volume: f64,
}

impl TrackHandle {
    pub fn new(id: impl Into<String>, playable: impl Playable + 'static) -> Self {
        Self {
            id: id.into(),
            playable: Box::new(playable),
            start_offset_sec: 0.0,
            looping: false,
            volume: TRACK_VOLUME,
        }
    }

    /// The ambient soundtrack: looping, skipping its intro, quiet.
    pub fn ambient(playable: impl Playable + 'static, config: &EngineConfig) -> Self {
        Self::new(AMBIENT_TRACK_ID, playable)
            .with_start_offset(config.ambient_start_offset_sec)
            .with_looping(true)
            .with_volume(config.ambient_volume)
    }

    pub fn with_start_offset(mut self, seconds: f64) -> Self {
        self.start_offset_sec = seconds.max(0.0);
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Offset loops are driven by the coordinator on `ended`; plain loops can
    /// use the element's own loop flag.
    fn native_loop(&self) -> bool {
        self.looping && self.start_offset_sec <= 0.0
    }
}

impl std::fmt::Debug for TrackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackHandle")
            .field("id", &self.id)
            .field("start_offset_sec", &self.start_offset_sec)
            .field("looping", &self.looping)
            .field("volume", &self.volume)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// One-shot ambient autoplay progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AutoplayState {
    #[default]
    NotAttempted,
    /// Waiting out the settle delay.
    Scheduled,
    Attempting,
    Playing,
    Blocked,
}

impl AutoplayState {
    pub fn attempted(self) -> bool {
        matches!(
            self,
            AutoplayState::Attempting | AutoplayState::Playing | AutoplayState::Blocked
        )
    }
}

struct TrackEntry {
    handle: TrackHandle,
    state: TrackState,
}

pub struct PlaybackCoordinator {
    entries: Vec<TrackEntry>,
    index: FnvHashMap<String, usize>,
    currently_playing: Option<String>,
    ambient_id: String,
    autoplay_delay_ms: u32,
    autoplay: AutoplayState,
    muted: bool,
}

impl PlaybackCoordinator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            entries: Vec::new(),
            index: FnvHashMap::default(),
            currently_playing: None,
            ambient_id: AMBIENT_TRACK_ID.to_string(),
            autoplay_delay_ms: config.autoplay_delay_ms,
            autoplay: AutoplayState::NotAttempted,
            muted: false,
        }
    }

    pub fn ambient_id(&self) -> &str {
        &self.ambient_id
    }

    /// Register (or replace) a track. Element flags are applied; nothing is
    /// started or paused.
    pub fn register(&mut self, handle: TrackHandle) {
        handle.playable.set_volume(handle.volume);
        handle.playable.set_looping(handle.native_loop());
        handle.playable.set_muted(self.muted);

        let id = handle.id.clone();
        let entry = TrackEntry {
            handle,
            state: TrackState::Idle,
        };
        match self.index.get(&id) {
            Some(&i) => {
                self.entries[i] = entry;
                if self.currently_playing.as_deref() == Some(id.as_str()) {
                    self.currently_playing = None;
                }
                log::debug!("[audio] replaced track {}", id);
            }
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push(entry);
                log::debug!("[audio] registered track {}", id);
            }
        }
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(i) = self.index.remove(id) else {
            return false;
        };
        self.entries.swap_remove(i);
        if let Some(moved) = self.entries.get(i) {
            self.index.insert(moved.handle.id.clone(), i);
        }
        if self.currently_playing.as_deref() == Some(id) {
            self.currently_playing = None;
        }
        true
    }

    /// Pause every other playing track, then try to start `id`. Returns
    /// whether the start was accepted; a refusal leaves `currently_playing`
    /// untouched.
    ///
    /// Other tracks are paused before the start is attempted, so after a
    /// refusal `currently_playing` may name a track that is now Paused. A
    /// `toggle` on that id then pauses it rather than starting it; callers
    /// that want one-click resume should `play` it directly.
    pub fn play(&mut self, id: &str) -> bool {
        let Some(&target) = self.index.get(id) else {
            log::debug!("[audio] play ignored for unknown track {}", id);
            return false;
        };
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if i != target && entry.state == TrackState::Playing {
                entry.handle.playable.pause();
                entry.state = TrackState::Paused;
            }
        }

        let entry = &mut self.entries[target];
        match entry.handle.playable.play() {
            Ok(()) => {
                entry.state = TrackState::Playing;
                self.currently_playing = Some(id.to_string());
                log::info!("[audio] playing {}", id);
                true
            }
            Err(e) => {
                log::info!("[audio] {} did not start: {}", id, e);
                false
            }
        }
    }

    /// Pause `id` unconditionally; clears `currently_playing` only if it
    /// names this track.
    pub fn pause(&mut self, id: &str) {
        let Some(&i) = self.index.get(id) else {
            return;
        };
        let entry = &mut self.entries[i];
        entry.handle.playable.pause();
        if entry.state == TrackState::Playing {
            entry.state = TrackState::Paused;
        }
        if self.currently_playing.as_deref() == Some(id) {
            self.currently_playing = None;
        }
    }

    /// Explicit stop: pause, rewind to the start offset, back to `Idle`.
    pub fn stop(&mut self, id: &str) {
        let Some(&i) = self.index.get(id) else {
            return;
        };
        let entry = &mut self.entries[i];
        entry.handle.playable.pause();
        entry
            .handle
            .playable
            .set_position_sec(entry.handle.start_offset_sec);
        entry.state = TrackState::Idle;
        if self.currently_playing.as_deref() == Some(id) {
            self.currently_playing = None;
        }
    }

    /// Button behavior: pause the current track, otherwise start it. Tracks
    /// with a start offset never resume inside their skipped intro. Returns
    /// whether `id` is playing afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.currently_playing.as_deref() == Some(id) {
            self.pause(id);
            return false;
        }
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let handle = &self.entries[i].handle;
        if handle.start_offset_sec > 0.0
            && handle.playable.position_sec() < handle.start_offset_sec
        {
            handle.playable.set_position_sec(handle.start_offset_sec);
        }
        self.play(id)
    }

    /// Natural end of `id`. Looping tracks rewind to their offset and resume
    /// if they are still current; others go back to `Idle`.
    pub fn on_ended(&mut self, id: &str) {
        let Some(&i) = self.index.get(id) else {
            return;
        };
        let is_current = self.currently_playing.as_deref() == Some(id);
        let entry = &mut self.entries[i];

        if !entry.handle.looping {
            entry.state = TrackState::Idle;
            if is_current {
                self.currently_playing = None;
            }
            return;
        }

        entry
            .handle
            .playable
            .set_position_sec(entry.handle.start_offset_sec);
        if !is_current {
            return;
        }
        match entry.handle.playable.play() {
            Ok(()) => {
                entry.state = TrackState::Playing;
                log::debug!("[audio] {} looped from {:.1}s", id, entry.handle.start_offset_sec);
            }
            Err(e) => {
                log::info!("[audio] {} could not loop: {}", id, e);
                entry.state = TrackState::Paused;
                self.currently_playing = None;
            }
        }
    }

    /// A start that was accepted synchronously was later refused by the host.
    pub fn start_rejected(&mut self, id: &str) {
        let Some(&i) = self.index.get(id) else {
            return;
        };
        let entry = &mut self.entries[i];
        if entry.state == TrackState::Playing {
            entry.state = TrackState::Paused;
        }
        if self.currently_playing.as_deref() == Some(id) {
            self.currently_playing = None;
        }
        if id == self.ambient_id
            && matches!(
                self.autoplay,
                AutoplayState::Attempting | AutoplayState::Playing
            )
        {
            self.autoplay = AutoplayState::Blocked;
        }
        log::info!("[audio] start of {} rejected by host", id);
    }

    /// External "may play" signal. Returns the settle delay to wait before
    /// calling [`run_autoplay`](Self::run_autoplay), or `None` if autoplay was
    /// already scheduled or attempted, or the ambient track is not registered.
    pub fn signal_may_play(&mut self) -> Option<u32> {
        if self.autoplay != AutoplayState::NotAttempted {
            return None;
        }
        if !self.index.contains_key(&self.ambient_id) {
            log::debug!("[audio] may-play signal before ambient track registered");
            return None;
        }
        self.autoplay = AutoplayState::Scheduled;
        Some(self.autoplay_delay_ms)
    }

    /// The single autoplay attempt. Success and refusal both latch.
    pub fn run_autoplay(&mut self) -> AutoplayState {
        if self.autoplay != AutoplayState::Scheduled {
            return self.autoplay;
        }
        self.autoplay = AutoplayState::Attempting;

        let ambient_id = self.ambient_id.clone();
        let Some(&i) = self.index.get(&ambient_id) else {
            self.autoplay = AutoplayState::Blocked;
            return self.autoplay;
        };
        let handle = &self.entries[i].handle;
        handle.playable.set_position_sec(handle.start_offset_sec);
        handle.playable.set_volume(handle.volume);

        let started = self.play(&ambient_id);
        // start_rejected may already have run if the host refused synchronously
        if self.autoplay == AutoplayState::Attempting {
            self.autoplay = if started {
                AutoplayState::Playing
            } else {
                AutoplayState::Blocked
            };
        }
        log::info!("[audio] ambient autoplay -> {:?}", self.autoplay);
        self.autoplay
    }

    /// Teardown before the settle delay elapsed.
    pub fn cancel_autoplay(&mut self) -> bool {
        if self.autoplay == AutoplayState::Scheduled {
            self.autoplay = AutoplayState::NotAttempted;
            return true;
        }
        false
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for entry in &self.entries {
            entry.handle.playable.set_muted(muted);
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn currently_playing(&self) -> Option<&str> {
        self.currently_playing.as_deref()
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.currently_playing.as_deref() == Some(id)
    }

    pub fn state(&self, id: &str) -> Option<TrackState> {
        self.index.get(id).map(|&i| self.entries[i].state)
    }

    pub fn playing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == TrackState::Playing)
            .count()
    }

    /// Per-track states, for play/pause iconography.
    pub fn snapshot(&self) -> Vec<(String, TrackState)> {
        self.entries
            .iter()
            .map(|e| (e.handle.id.clone(), e.state))
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
