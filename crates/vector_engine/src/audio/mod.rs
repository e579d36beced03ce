//! Audio playback seam
//!
//! The engine only starts sounds by path. Mixing and streaming belong to
//! whatever backend the platform layer installs.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Audio errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// Sound file does not exist
    #[error("Sound not found: {0:?}")]
    NotFound(PathBuf),

    /// Backend could not start playback
    #[error("Playback failed: {0}")]
    Playback(String),
}

/// Platform audio output
pub trait AudioBackend {
    /// Start playing a sound file
    fn play(&mut self, path: &Path, looping: bool) -> Result<(), AudioError>;

    /// Stop every playing sound
    fn stop_all(&mut self);
}

/// Backend that checks the file exists and plays nothing
#[derive(Debug, Default)]
pub struct NullAudioBackend {
    started: usize,
}

impl NullAudioBackend {
    /// Create a silent backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Sounds accepted since creation
    pub fn started(&self) -> usize {
        self.started
    }
}

impl AudioBackend for NullAudioBackend {
    fn play(&mut self, path: &Path, looping: bool) -> Result<(), AudioError> {
        if !path.is_file() {
            return Err(AudioError::NotFound(path.to_path_buf()));
        }
        self.started += 1;
        log::debug!("Playing {:?} (looping: {})", path, looping);
        Ok(())
    }

    fn stop_all(&mut self) {}
}
