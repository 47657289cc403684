//! Playback session: the single owner of everything the player shows.
//!
//! The session bridges user intents (buttons, keys, drag gestures) to the
//! media backend and consumes the backend's notifications in order. Loop
//! decisions come from [`RepeatController`], marker edits go through
//! [`LoopRegion`] and are mirrored into the selected [`MarkerSlots`] entry.
//!
//! Without loaded media (`duration == 0`) every transport and region action is
//! inert; volume, speed and repeat mode can still be changed.

use log::{debug, info, warn};

use crate::config::Config;
use crate::constants::{
    DEFAULT_MAX_FILES, DEFAULT_STEP_SECONDS, PLACEHOLDER_DURATION, SPEED_MAX, SPEED_MIN,
    VOLUME_MAX,
};
use crate::drag::{Bounds, DragController, DragTarget, DragValue, Pointer};
use crate::error::{SessionError, SessionResult};
use crate::media::{MediaBackend, MediaEvent, MediaFile};
use crate::playlist::{Playlist, PlaylistEntry};
use crate::region::{LoopRegion, Marker};
use crate::repeat::{LoopAction, RepeatController, RepeatMode};
use crate::slots::{MarkerSlots, SlotIndex};

/// Settings a session starts with
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub volume: u8,
    pub speed: f32,
    pub step_seconds: f32,
    pub max_files: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            volume: VOLUME_MAX,
            speed: 1.0,
            step_seconds: DEFAULT_STEP_SECONDS,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            volume: config.default_volume,
            speed: config.default_speed,
            step_seconds: config.step_seconds,
            max_files: config.max_files,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user that does not interrupt the session
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

pub struct Session<B: MediaBackend> {
    backend: B,
    playlist: Playlist,
    position: f32,
    duration: f32,
    is_playing: bool,
    volume: u8,
    speed: f32,
    step_seconds: f32,
    region: LoopRegion,
    repeat: RepeatController,
    slots: MarkerSlots,
    drag: DragController,
    notice: Option<Notice>,
    // Set by a seek until the backend reports a position again
    seek_pending: bool,
}

fn round_speed(speed: f32) -> f32 {
    ((speed * 10.0).round() / 10.0).clamp(SPEED_MIN, SPEED_MAX)
}

impl<B: MediaBackend> Session<B> {
    pub fn new(backend: B, options: SessionOptions) -> Self {
        Self {
            backend,
            playlist: Playlist::new(options.max_files),
            position: 0.0,
            duration: 0.0,
            is_playing: false,
            volume: options.volume.min(VOLUME_MAX),
            speed: round_speed(options.speed),
            step_seconds: options.step_seconds,
            region: LoopRegion::full(0.0),
            repeat: RepeatController::new(),
            slots: MarkerSlots::new(),
            drag: DragController::new(),
            notice: None,
            seek_pending: false,
        }
    }

    // ----- state -----

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn has_media(&self) -> bool {
        self.duration > 0.0
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn region(&self) -> LoopRegion {
        self.region
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat.mode()
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat.count()
    }

    pub fn slots(&self) -> &MarkerSlots {
        &self.slots
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_file(&self) -> Option<&MediaFile> {
        self.playlist.current().map(|entry| &entry.file)
    }

    pub fn dragging(&self) -> Option<DragTarget> {
        self.drag.active()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Track length for drawing; a placeholder while nothing is loaded.
    pub fn display_duration(&self) -> f32 {
        if self.has_media() {
            self.duration
        } else {
            PLACEHOLDER_DURATION
        }
    }

    /// Marker positions for drawing; `0` and the placeholder while nothing is loaded.
    pub fn display_region(&self) -> LoopRegion {
        if self.has_media() {
            self.region
        } else {
            LoopRegion::full(PLACEHOLDER_DURATION)
        }
    }

    /// Playhead as a fraction of the track.
    pub fn progress(&self) -> f32 {
        if self.has_media() {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
        });
    }

    fn move_playhead(&mut self, seconds: f32) {
        self.position = seconds;
        self.seek_pending = true;
        self.backend.seek(seconds);
    }

    fn report_failure(&mut self, message: String) {
        warn!("Playback failure: {message}");
        self.backend.pause();
        self.is_playing = false;
        self.notify(NoticeLevel::Error, message);
    }

    // ----- files -----

    /// Upload a file. The first file becomes the current one.
    pub fn add_file(&mut self, file: MediaFile) -> SessionResult<usize> {
        if let Err(e) = self.playlist.ensure_room() {
            warn!("Rejected {}: {e}", file.name);
            self.notify(NoticeLevel::Warning, e.to_string());
            return Err(e);
        }

        let handle = match self.backend.open(&file) {
            Ok(handle) => handle,
            Err(e) => {
                let message = format!("Could not open {}: {e}", file.name);
                self.notify(NoticeLevel::Error, message.clone());
                return Err(SessionError::Backend(message));
            }
        };

        info!("Added {} ({} bytes)", file.name, file.size);
        let index = self.playlist.push(PlaylistEntry { file, handle })?;
        if self.playlist.current_index() == Some(index) {
            self.load_current();
        }
        Ok(index)
    }

    /// Swap the file at `index`, releasing the previous handle.
    pub fn replace_file(&mut self, index: usize, file: MediaFile) -> SessionResult<()> {
        if self.playlist.get(index).is_none() {
            return Err(SessionError::NoSuchFile(index));
        }

        let handle = match self.backend.open(&file) {
            Ok(handle) => handle,
            Err(e) => {
                let message = format!("Could not open {}: {e}", file.name);
                self.notify(NoticeLevel::Error, message.clone());
                return Err(SessionError::Backend(message));
            }
        };

        info!("Replaced file {} with {}", index + 1, file.name);
        let old = self.playlist.replace(index, PlaylistEntry { file, handle })?;
        self.backend.release(old.handle);
        if self.playlist.current_index() == Some(index) {
            self.load_current();
        }
        Ok(())
    }

    pub fn remove_file(&mut self, index: usize) -> SessionResult<()> {
        let was_current = self.playlist.current_index() == Some(index);
        let removed = self.playlist.remove(index)?;
        info!("Removed {}", removed.file.name);
        if was_current {
            self.backend.pause();
        }
        self.backend.release(removed.handle);
        if was_current {
            self.load_current();
        }
        Ok(())
    }

    /// Load the current playlist entry, stopped at position 0.
    fn load_current(&mut self) {
        self.backend.pause();
        self.is_playing = false;
        self.position = 0.0;
        self.seek_pending = false;
        self.duration = 0.0;
        self.region = LoopRegion::full(0.0);
        self.repeat.on_region_changed();
        self.drag.end();

        let result = match self.playlist.current() {
            Some(entry) => {
                debug!("Loading {}", entry.file.name);
                self.backend.load(&entry.handle)
            }
            None => return,
        };
        if let Err(e) = result {
            self.report_failure(format!("Could not load file: {e}"));
        }
    }

    pub fn skip_next(&mut self) {
        if let Some(index) = self.playlist.next_index() {
            self.switch_to(index);
        }
    }

    pub fn skip_previous(&mut self) {
        if let Some(index) = self.playlist.prev_index() {
            self.switch_to(index);
        }
    }

    fn switch_to(&mut self, index: usize) {
        self.backend.pause();
        if self.playlist.set_current(index).is_ok() {
            info!("Switched to file {}", index + 1);
            self.load_current();
        }
    }

    // ----- backend notifications -----

    /// Drain and apply the backend's pending notifications in order.
    pub fn pump(&mut self) {
        for event in self.backend.poll_events() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataReady { duration } => {
                self.duration = duration.max(0.0);
                self.position = 0.0;
                self.region = LoopRegion::full(self.duration);
                self.repeat.on_region_changed();
                self.backend.set_volume(self.volume as f32 / VOLUME_MAX as f32);
                self.backend.set_speed(self.speed);
                info!("Media ready, duration {:.1}s", self.duration);
            }
            MediaEvent::PositionAdvanced(position) => {
                if !self.has_media() {
                    return;
                }
                self.position = position.clamp(0.0, self.duration);
                self.seek_pending = false;
                if self.is_playing {
                    self.apply_loop_decision();
                }
            }
            MediaEvent::Ended => self.handle_ended(),
            MediaEvent::Failed(message) => self.report_failure(message),
        }
    }

    fn handle_ended(&mut self) {
        if !self.has_media() {
            self.is_playing = false;
            return;
        }
        // Emitted before a seek the backend has not reported back yet
        if self.seek_pending {
            debug!("Ignoring stale end-of-media at {:.1}s", self.position);
            return;
        }
        self.position = self.duration;
        let rewound = self.is_playing
            && matches!(self.apply_loop_decision(), LoopAction::Rewind { .. });
        if !rewound {
            self.is_playing = false;
        }
    }

    fn apply_loop_decision(&mut self) -> LoopAction {
        let action = self.repeat.on_position(self.position, &self.region);
        match action {
            LoopAction::Continue => {}
            LoopAction::Rewind { to } => {
                debug!("Loop back to {to:.1}s");
                self.move_playhead(to);
            }
            LoopAction::Stop { at } => {
                debug!("Loop stopped at {at:.1}s");
                self.backend.pause();
                self.is_playing = false;
                self.move_playhead(at);
            }
        }
        action
    }

    // ----- transport -----

    pub fn play(&mut self) {
        if !self.has_media() {
            debug!("Play ignored: no media");
            return;
        }
        if !self.region.contains(self.position) {
            self.move_playhead(self.region.a);
        }
        self.backend.play();
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        if !self.has_media() {
            return;
        }
        self.backend.pause();
        self.is_playing = false;
    }

    pub fn toggle_playback(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move the playhead, clamped into the loop region.
    pub fn seek(&mut self, seconds: f32) {
        if !self.has_media() {
            return;
        }
        let target = self.region.clamp(seconds.clamp(0.0, self.duration));
        self.move_playhead(target);
    }

    pub fn step_forward(&mut self) {
        self.seek(self.position + self.step_seconds);
    }

    pub fn step_back(&mut self) {
        self.seek(self.position - self.step_seconds);
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(VOLUME_MAX);
        self.backend.set_volume(self.volume as f32 / VOLUME_MAX as f32);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = round_speed(speed);
        self.backend.set_speed(self.speed);
    }

    // ----- loop region -----

    pub fn select_repeat(&mut self, mode: RepeatMode) {
        self.repeat.select(mode);
    }

    /// Apply a user edit of the region.
    fn set_region(&mut self, region: LoopRegion) {
        if region == self.region {
            return;
        }
        self.region = region;
        self.repeat.on_region_changed();
        self.slots.record(region);
    }

    /// Select the whole track ("ALL").
    pub fn select_all(&mut self) {
        if !self.has_media() {
            return;
        }
        self.set_region(LoopRegion::full(self.duration));
    }

    /// Put a marker at the playhead, keeping the minimum separation.
    pub fn set_marker_here(&mut self, marker: Marker) {
        if !self.has_media() {
            return;
        }
        let mut region = self.region;
        region.drag(marker, self.position);
        info!("Marker {marker:?} set at {:.1}s", self.position);
        self.set_region(region.clamped_to(self.duration));
    }

    pub fn set_marker_a_here(&mut self) {
        self.set_marker_here(Marker::A);
    }

    pub fn set_marker_b_here(&mut self) {
        self.set_marker_here(Marker::B);
    }

    pub fn drag_marker(&mut self, marker: Marker, seconds: f32) {
        if !self.has_media() {
            return;
        }
        let mut region = self.region;
        region.drag(marker, seconds.clamp(0.0, self.duration));
        self.set_region(region.clamped_to(self.duration));
    }

    /// Select a marker slot (1-5), recalling its region if it holds one.
    pub fn select_slot(&mut self, number: usize) -> SessionResult<()> {
        let index = SlotIndex::new(number)?;
        if !self.has_media() {
            return Ok(());
        }
        if let Some(saved) = self.slots.select(index, self.region) {
            self.set_region(saved.clamped_to(self.duration));
        }
        Ok(())
    }

    /// Forget the region saved in a slot.
    pub fn clear_slot(&mut self, number: usize) -> SessionResult<()> {
        let index = SlotIndex::new(number)?;
        self.slots.clear(index);
        info!("Cleared slot {number}");
        Ok(())
    }

    // ----- drag gestures -----

    /// Start a drag gesture. Returns whether the gesture began.
    pub fn begin_drag(&mut self, target: DragTarget, bounds: Bounds, pointer: Pointer) -> bool {
        let needs_media = !matches!(target, DragTarget::Volume | DragTarget::Speed);
        if needs_media && !self.has_media() {
            return false;
        }
        match self.drag.begin(target, bounds, pointer, self.duration) {
            Some(value) => {
                self.apply_drag(value);
                true
            }
            None => false,
        }
    }

    pub fn drag_to(&mut self, pointer: Pointer) {
        if let Some(value) = self.drag.update(pointer, self.duration) {
            self.apply_drag(value);
        }
    }

    pub fn rebind_drag(&mut self, target: DragTarget, bounds: Bounds) {
        self.drag.rebind(target, bounds);
    }

    pub fn end_drag(&mut self) -> Option<DragTarget> {
        self.drag.end()
    }

    fn apply_drag(&mut self, value: DragValue) {
        match value {
            DragValue::Volume(volume) => self.set_volume(volume),
            DragValue::Speed(speed) => self.set_speed(speed),
            DragValue::MarkerA(seconds) => self.drag_marker(Marker::A, seconds),
            DragValue::MarkerB(seconds) => self.drag_marker(Marker::B, seconds),
            DragValue::Seek(seconds) => self.seek(seconds),
        }
    }
}

impl<B: MediaBackend> Drop for Session<B> {
    fn drop(&mut self) {
        for entry in self.playlist.drain() {
            self.backend.release(entry.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaHandle;
    use std::cell::Cell;
    use std::error::Error;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Open(String),
        Release,
        Load,
        Play,
        Pause,
        Seek(f32),
        Volume(f32),
        Speed(f32),
    }

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        events: Vec<MediaEvent>,
        fail_open: bool,
        released: Rc<Cell<usize>>,
    }

    impl RecordingBackend {
        fn seeks(&self) -> Vec<f32> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Seek(s) => Some(*s),
                    _ => None,
                })
                .collect()
        }
    }

    impl MediaBackend for RecordingBackend {
        fn open(&mut self, file: &MediaFile) -> Result<MediaHandle, Box<dyn Error>> {
            if self.fail_open {
                return Err("unsupported format".into());
            }
            self.calls.push(Call::Open(file.name.clone()));
            Ok(MediaHandle::new())
        }

        fn release(&mut self, _handle: MediaHandle) {
            self.calls.push(Call::Release);
            self.released.set(self.released.get() + 1);
        }

        fn load(&mut self, _handle: &MediaHandle) -> Result<(), Box<dyn Error>> {
            self.calls.push(Call::Load);
            Ok(())
        }

        fn play(&mut self) {
            self.calls.push(Call::Play);
        }

        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }

        fn seek(&mut self, seconds: f32) {
            self.calls.push(Call::Seek(seconds));
        }

        fn set_volume(&mut self, volume: f32) {
            self.calls.push(Call::Volume(volume));
        }

        fn set_speed(&mut self, speed: f32) {
            self.calls.push(Call::Speed(speed));
        }

        fn poll_events(&mut self) -> Vec<MediaEvent> {
            std::mem::take(&mut self.events)
        }
    }

    fn file(name: &str) -> MediaFile {
        MediaFile::new(name, 1024, format!("/tmp/{name}"))
    }

    fn loaded(duration: f32) -> Session<RecordingBackend> {
        let mut session = Session::new(RecordingBackend::default(), SessionOptions::default());
        session.add_file(file("lesson.wav")).unwrap();
        session.handle_event(MediaEvent::MetadataReady { duration });
        session
    }

    #[test]
    fn test_new_session_is_inert() {
        let mut session = Session::new(RecordingBackend::default(), SessionOptions::default());
        session.play();
        session.seek(10.0);
        session.step_forward();
        session.select_all();
        session.set_marker_a_here();
        session.skip_next();

        assert!(!session.is_playing());
        assert_eq!(session.position(), 0.0);
        assert!(session.backend().calls.is_empty());
        assert_eq!(session.display_region(), LoopRegion { a: 0.0, b: 100.0 });
        assert_eq!(session.display_duration(), 100.0);
    }

    #[test]
    fn test_metadata_sets_full_region_and_applies_settings() {
        let session = loaded(120.0);
        assert_eq!(session.duration(), 120.0);
        assert_eq!(session.region(), LoopRegion { a: 0.0, b: 120.0 });
        assert!(session.backend().calls.contains(&Call::Volume(1.0)));
        assert!(session.backend().calls.contains(&Call::Speed(1.0)));
    }

    #[test]
    fn test_play_outside_region_seeks_to_a() {
        let mut session = loaded(100.0);
        session.drag_marker(Marker::A, 10.0);
        session.drag_marker(Marker::B, 20.0);
        session.handle_event(MediaEvent::PositionAdvanced(50.0));

        session.play();
        assert!(session.is_playing());
        assert_eq!(session.position(), 10.0);
        assert_eq!(session.backend().seeks().last(), Some(&10.0));
    }

    #[test]
    fn test_off_mode_stops_at_b() {
        let mut session = loaded(100.0);
        session.drag_marker(Marker::B, 20.0);
        session.play();

        session.handle_event(MediaEvent::PositionAdvanced(20.2));
        assert!(!session.is_playing());
        assert_eq!(session.position(), 20.0);
    }

    #[test]
    fn test_paused_position_reports_do_not_loop() {
        let mut session = loaded(100.0);
        session.select_repeat(RepeatMode::X5);
        session.drag_marker(Marker::B, 20.0);
        session.handle_event(MediaEvent::PositionAdvanced(20.0));
        assert_eq!(session.repeat_count(), 0);
    }

    #[test]
    fn test_seek_clamps_into_region() {
        let mut session = loaded(100.0);
        session.drag_marker(Marker::A, 10.0);
        session.drag_marker(Marker::B, 20.0);

        session.seek(5.0);
        assert_eq!(session.position(), 10.0);
        session.seek(90.0);
        assert_eq!(session.position(), 20.0);

        session.seek(15.0);
        session.step_forward();
        assert_eq!(session.position(), 20.0);
        session.step_back();
        assert_eq!(session.position(), 15.0);
        session.step_back();
        assert_eq!(session.position(), 10.0);
    }

    #[test]
    fn test_quick_set_keeps_separation() {
        let mut session = loaded(100.0);
        session.drag_marker(Marker::B, 20.0);
        session.handle_event(MediaEvent::PositionAdvanced(20.0));

        session.set_marker_a_here();
        assert_eq!(session.region().a, 19.0);
        assert_eq!(session.region().b, 20.0);
    }

    #[test]
    fn test_select_all_keeps_repeat_mode() {
        let mut session = loaded(100.0);
        session.select_repeat(RepeatMode::Infinite);
        session.drag_marker(Marker::A, 30.0);
        session.select_all();
        assert_eq!(session.region(), LoopRegion::full(100.0));
        assert_eq!(session.repeat_mode(), RepeatMode::Infinite);
    }

    #[test]
    fn test_end_of_media_stops_playback() {
        let mut session = loaded(30.0);
        session.play();
        session.handle_event(MediaEvent::PositionAdvanced(29.0));
        session.handle_event(MediaEvent::Ended);
        assert!(!session.is_playing());
        assert_eq!(session.position(), 30.0);
    }

    #[test]
    fn test_end_of_media_after_rewind_is_ignored() {
        let mut session = loaded(30.0);
        session.select_repeat(RepeatMode::Infinite);
        session.drag_marker(Marker::A, 10.0);
        session.play();

        session.backend_mut().events = vec![MediaEvent::PositionAdvanced(30.0), MediaEvent::Ended];
        session.pump();
        assert!(session.is_playing());
        assert_eq!(session.position(), 10.0);
    }

    #[test]
    fn test_failure_is_a_notice() {
        let mut session = loaded(30.0);
        session.play();
        session.handle_event(MediaEvent::Failed("decoder error".to_string()));

        assert!(!session.is_playing());
        assert_eq!(session.duration(), 30.0);
        let notice = session.take_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_open_failure_leaves_playlist_unchanged() {
        let mut session = Session::new(
            RecordingBackend {
                fail_open: true,
                ..Default::default()
            },
            SessionOptions::default(),
        );
        assert!(matches!(
            session.add_file(file("broken.mp4")),
            Err(SessionError::Backend(_))
        ));
        assert!(session.playlist().is_empty());
        assert!(session.notice().is_some());
    }

    #[test]
    fn test_replace_releases_old_handle() {
        let mut session = loaded(60.0);
        session.replace_file(0, file("other.wav")).unwrap();
        let calls = &session.backend().calls;
        assert_eq!(calls.iter().filter(|c| **c == Call::Release).count(), 1);
        assert_eq!(session.current_file().unwrap().name, "other.wav");
        assert_eq!(session.duration(), 0.0);
    }

    #[test]
    fn test_remove_current_file_unloads() {
        let mut session = loaded(60.0);
        session.remove_file(0).unwrap();
        assert!(!session.has_media());
        assert!(session.current_file().is_none());
        assert!(session.remove_file(0).is_err());
    }

    #[test]
    fn test_volume_and_speed_clamp() {
        let mut session = Session::new(RecordingBackend::default(), SessionOptions::default());
        session.set_volume(250);
        assert_eq!(session.volume(), 100);
        session.set_speed(7.0);
        assert_eq!(session.speed(), 3.0);
        session.set_speed(0.1);
        assert_eq!(session.speed(), 0.5);
        session.set_speed(1.26);
        assert_eq!(session.speed(), 1.3);
    }

    #[test]
    fn test_seek_drag_requires_media() {
        let mut session = Session::new(RecordingBackend::default(), SessionOptions::default());
        let track = Bounds::new(0.0, 0.0, 100.0, 1.0);
        assert!(!session.begin_drag(DragTarget::Seek, track, Pointer::new(50.0, 0.0)));

        let gauge = Bounds::new(0.0, 0.0, 1.0, 10.0);
        assert!(session.begin_drag(DragTarget::Volume, gauge, Pointer::new(0.0, 5.0)));
        assert_eq!(session.volume(), 50);
    }

    #[test]
    fn test_cleared_slot_is_claimed_again() {
        let mut session = loaded(100.0);
        session.select_slot(1).unwrap();
        session.drag_marker(Marker::A, 30.0);
        session.clear_slot(1).unwrap();
        assert!(session.slots().selected().is_none());

        session.select_all();
        session.select_slot(1).unwrap();
        assert_eq!(session.region(), LoopRegion::full(100.0));
        assert!(session.clear_slot(0).is_err());
    }

    #[test]
    fn test_dropping_session_releases_handles() {
        let released = Rc::new(Cell::new(0));
        let backend = RecordingBackend {
            released: Rc::clone(&released),
            ..Default::default()
        };
        let mut session = Session::new(backend, SessionOptions::default());
        session.add_file(file("first.wav")).unwrap();
        session.add_file(file("second.wav")).unwrap();
        assert_eq!(released.get(), 0);

        drop(session);
        assert_eq!(released.get(), 2);
    }
}
