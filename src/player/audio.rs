//! Audio collaborator for the terminal player.
//!
//! Files are decoded up front (WAV with hound, FLAC with claxon) into
//! interleaved `f32` buffers. Playback runs through a rodio [`Sink`] fed by a
//! [`BufferSource`] whose read cursor is shared with the backend, so seeking
//! is a single atomic store and the playhead can be reported without asking
//! rodio.

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use uuid::Uuid;

use abrepeat::constants::AUDIO_EXTENSIONS;
use abrepeat::media::{MediaBackend, MediaEvent, MediaFile, MediaHandle};

/// Interleaved samples of a whole file
#[derive(Debug)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Sample index of the frame at `seconds`, clamped to the buffer.
    fn sample_index_at(&self, seconds: f32) -> usize {
        let frame = (seconds.max(0.0) * self.sample_rate as f32) as usize;
        (frame * self.channels.max(1) as usize).min(self.samples.len())
    }

    fn seconds_at(&self, sample_index: usize) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        let frame = sample_index.min(self.samples.len()) / self.channels.max(1) as usize;
        frame as f32 / self.sample_rate as f32
    }
}

pub fn decode_file(path: &Path) -> Result<DecodedAudio, Box<dyn Error>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(format!("Unsupported audio format: {ext}").into());
    }

    let audio = match ext.as_str() {
        "wav" => {
            let file = BufReader::new(File::open(path)?);
            decode_wav(hound::WavReader::new(file)?)?
        }
        _ => decode_flac(claxon::FlacReader::open(path)?)?,
    };

    if audio.channels == 0 || audio.sample_rate == 0 {
        return Err(format!("{} has no playable audio", path.display()).into());
    }

    log::info!(
        "Decoded {}: {} Hz, {} channels, {:.1}s",
        path.display(),
        audio.sample_rate,
        audio.channels,
        audio.duration_secs()
    );
    Ok(audio)
}

fn decode_wav<R: Read>(mut reader: hound::WavReader<R>) -> Result<DecodedAudio, Box<dyn Error>> {
    let spec = reader.spec();

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => {
            let samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            samples?
        }
        hound::SampleFormat::Int => match spec.bits_per_sample {
            8 => {
                let samples: Result<Vec<i8>, _> = reader.samples().collect();
                samples?.into_iter().map(|s| s as f32 / 128.0).collect()
            }
            16 => {
                let samples: Result<Vec<i16>, _> = reader.samples().collect();
                samples?.into_iter().map(|s| s as f32 / 32768.0).collect()
            }
            24 | 32 => {
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
                let samples: Result<Vec<i32>, _> = reader.samples().collect();
                samples?.into_iter().map(|s| s as f32 / scale).collect()
            }
            bits => return Err(format!("Unsupported bit depth: {bits}").into()),
        },
    };

    Ok(DecodedAudio {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}

fn decode_flac<R: Read>(mut reader: claxon::FlacReader<R>) -> Result<DecodedAudio, Box<dyn Error>> {
    let info = reader.streaminfo();
    let scale = (1u64 << (info.bits_per_sample.max(1) - 1)) as f32;

    let mut samples = Vec::new();
    for sample in reader.samples() {
        samples.push(sample? as f32 / scale);
    }

    Ok(DecodedAudio {
        samples,
        channels: info.channels as u16,
        sample_rate: info.sample_rate,
    })
}

/// Reads a shared buffer from a cursor the backend can move at any time
pub struct BufferSource {
    audio: Arc<DecodedAudio>,
    cursor: Arc<AtomicUsize>,
}

impl BufferSource {
    pub fn new(audio: Arc<DecodedAudio>, cursor: Arc<AtomicUsize>) -> Self {
        Self { audio, cursor }
    }
}

impl Iterator for BufferSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.audio.samples.len();
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        if index >= len {
            self.cursor.store(len, Ordering::Relaxed);
            return None;
        }
        Some(self.audio.samples[index])
    }
}

impl Source for BufferSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.audio.channels
    }

    fn sample_rate(&self) -> u32 {
        self.audio.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(self.audio.duration_secs()))
    }
}

pub struct RodioBackend {
    stream: OutputStream,
    sink: Sink,
    opened: HashMap<Uuid, Arc<DecodedAudio>>,
    current: Option<Arc<DecodedAudio>>,
    cursor: Arc<AtomicUsize>,
    volume: f32,
    speed: f32,
    playing: bool,
    last_reported: Option<usize>,
    ended_reported: bool,
    events: Vec<MediaEvent>,
}

impl RodioBackend {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();

        Ok(Self {
            stream,
            sink,
            opened: HashMap::new(),
            current: None,
            cursor: Arc::new(AtomicUsize::new(0)),
            volume: 1.0,
            speed: 1.0,
            playing: false,
            last_reported: None,
            ended_reported: false,
            events: Vec::new(),
        })
    }

    /// Queue the current buffer again after rodio dropped a drained source.
    fn ensure_source(&mut self) {
        if let Some(audio) = &self.current
            && self.sink.empty()
        {
            self.sink
                .append(BufferSource::new(Arc::clone(audio), Arc::clone(&self.cursor)));
        }
    }
}

impl MediaBackend for RodioBackend {
    fn open(&mut self, file: &MediaFile) -> Result<MediaHandle, Box<dyn Error>> {
        let audio = decode_file(&file.path)?;
        let handle = MediaHandle::new();
        self.opened.insert(handle.id(), Arc::new(audio));
        Ok(handle)
    }

    fn release(&mut self, handle: MediaHandle) {
        if let Some(audio) = self.opened.remove(&handle.id())
            && let Some(current) = &self.current
            && Arc::ptr_eq(&audio, current)
        {
            // Dropping the sink detaches the source from the mixer
            self.sink = Sink::connect_new(self.stream.mixer());
            self.sink.pause();
            self.current = None;
            self.playing = false;
            self.last_reported = None;
        }
        log::debug!("Released media {}", handle.id());
    }

    fn load(&mut self, handle: &MediaHandle) -> Result<(), Box<dyn Error>> {
        let audio = self
            .opened
            .get(&handle.id())
            .cloned()
            .ok_or("Unknown media handle")?;

        self.sink = Sink::connect_new(self.stream.mixer());
        self.sink.pause();
        self.sink.set_volume(self.volume);
        self.sink.set_speed(self.speed);

        self.cursor = Arc::new(AtomicUsize::new(0));
        self.sink
            .append(BufferSource::new(Arc::clone(&audio), Arc::clone(&self.cursor)));

        self.events.push(MediaEvent::MetadataReady {
            duration: audio.duration_secs(),
        });
        self.current = Some(audio);
        self.playing = false;
        self.last_reported = None;
        self.ended_reported = false;
        Ok(())
    }

    fn play(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.ensure_source();
        self.sink.play();
        self.playing = true;
        self.ended_reported = false;
    }

    fn pause(&mut self) {
        self.sink.pause();
        self.playing = false;
    }

    fn seek(&mut self, seconds: f32) {
        let Some(audio) = &self.current else {
            return;
        };
        let index = audio.sample_index_at(seconds);
        self.cursor.store(index, Ordering::Relaxed);
        self.last_reported = None;
        self.ended_reported = false;
        self.ensure_source();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.sink.set_speed(speed);
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        if let Some(audio) = &self.current {
            let index = self.cursor.load(Ordering::Relaxed).min(audio.samples.len());
            let frame = index / audio.channels.max(1) as usize;
            if self.last_reported != Some(frame) {
                self.last_reported = Some(frame);
                self.events
                    .push(MediaEvent::PositionAdvanced(audio.seconds_at(index)));
            }
            if self.playing && !self.ended_reported && self.sink.empty() {
                // A later seek clears the flag and revives the sink
                self.ended_reported = true;
                self.events.push(MediaEvent::Ended);
            }
        }
        std::mem::take(&mut self.events)
    }
}
