use abrepeat::media::{MediaBackend, MediaEvent, MediaFile, MediaHandle};
use abrepeat::session::{Session, SessionOptions};
use std::error::Error;

/// Backend that only records what the session asked it to do
#[derive(Debug, Default)]
pub struct MockBackend {
    pub seeks: Vec<f32>,
    pub playing: bool,
    pub volume: f32,
    pub speed: f32,
    pub loads: usize,
    pub releases: usize,
}

impl MediaBackend for MockBackend {
    fn open(&mut self, _file: &MediaFile) -> Result<MediaHandle, Box<dyn Error>> {
        Ok(MediaHandle::new())
    }

    fn release(&mut self, _handle: MediaHandle) {
        self.releases += 1;
    }

    fn load(&mut self, _handle: &MediaHandle) -> Result<(), Box<dyn Error>> {
        self.loads += 1;
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f32) {
        self.seeks.push(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        Vec::new()
    }
}

pub fn file(name: &str) -> MediaFile {
    MediaFile::new(name, 4096, format!("/media/{name}"))
}

/// Session with one file of `duration` seconds loaded
pub fn loaded_session(duration: f32) -> Session<MockBackend> {
    let mut session = Session::new(MockBackend::default(), SessionOptions::default());
    session.add_file(file("lesson.wav")).unwrap();
    session.handle_event(MediaEvent::MetadataReady { duration });
    session
}
