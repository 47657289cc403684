//! Project-wide constants used across multiple modules.
//!
//! This module centralizes constant definitions to avoid duplication and ensure
//! consistency across the codebase.

/// Number of save/recall marker slots
pub const SLOT_COUNT: usize = 5;

/// Minimum distance in seconds between marker A and marker B
pub const MIN_MARKER_SEPARATION: f32 = 1.0;

/// Upper end of the volume domain (percent)
pub const VOLUME_MAX: u8 = 100;

/// Playback speed domain (multiplier)
pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_MAX: f32 = 3.0;

/// Duration shown on the progress track while no media is loaded
pub const PLACEHOLDER_DURATION: f32 = 100.0;

/// Default cap on concurrently loaded files
pub const DEFAULT_MAX_FILES: usize = 2;

/// Upper bound on `max_files`; every loaded file is decoded into memory
pub const MAX_FILES_LIMIT: usize = 16;

/// Default step for fast-forward / rewind, in seconds
pub const DEFAULT_STEP_SECONDS: f32 = 5.0;

/// Supported audio file extensions for the terminal player
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac"];

/// Rotating hints shown in the tips banner
pub const TIPS: &[&str] = &[
    "Drag markers A and B to set a repeat section",
    "Use buttons 1-5 to save and recall sections",
    "Tap x5 or x10 to repeat the section multiple times",
    "Tap Inf for infinite loop playback",
    "Tap ALL to select the entire track",
    "Tap A or B to set a marker at the current position",
    "Drag Volume and Speed controls to adjust",
];
