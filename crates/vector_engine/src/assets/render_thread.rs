//! Dedicated GPU thread
//!
//! GPU resources may only be created on the thread that owns the device.
//! Callers submit closures over a channel and block on a per-job
//! [`Completion`] until the device thread replies.
//!
//! ```text
//! caller thread                    render thread
//!   submit(job) ── jobs channel ──▶  job(&mut device)
//!   completion.wait() ◀── reply ──   send(result)
//! ```

use std::thread::JoinHandle;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use thiserror::Error;

use crate::assets::texture::{DecodedImage, TextureHandle};

/// GPU vertex buffer name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// GPU errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// Pixel data does not match the declared size
    #[error("Texture data is {len} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidTextureData {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Bytes supplied
        len: usize,
        /// Bytes required
        expected: usize,
    },

    /// Zero-sized upload
    #[error("Cannot create an empty {0}")]
    Empty(&'static str),

    /// The render thread is gone
    #[error("Render thread disconnected")]
    Disconnected,
}

/// Device that creates GPU resources; lives on the render thread
pub trait GpuDevice: Send + 'static {
    /// Create a 2D RGBA8 texture
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureHandle, GpuError>;

    /// Create a vertex buffer
    fn create_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle, GpuError>;
}

/// Device that validates uploads and hands out names without a GPU
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    next_name: u32,
    bytes_uploaded: usize,
}

impl HeadlessDevice {
    /// Create a headless device
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes accepted so far
    pub fn bytes_uploaded(&self) -> usize {
        self.bytes_uploaded
    }

    fn allocate(&mut self, len: usize) -> u32 {
        self.next_name += 1;
        self.bytes_uploaded += len;
        self.next_name
    }
}

impl GpuDevice for HeadlessDevice {
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureHandle, GpuError> {
        let expected = width as usize * height as usize * 4;
        if expected == 0 {
            return Err(GpuError::Empty("texture"));
        }
        if rgba.len() != expected {
            return Err(GpuError::InvalidTextureData {
                width,
                height,
                len: rgba.len(),
                expected,
            });
        }
        Ok(TextureHandle(self.allocate(rgba.len())))
    }

    fn create_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle, GpuError> {
        if bytes.is_empty() {
            return Err(GpuError::Empty("buffer"));
        }
        Ok(BufferHandle(self.allocate(bytes.len())))
    }
}

type Job = Box<dyn FnOnce(&mut dyn GpuDevice) + Send>;

/// Result of a submitted job
///
/// The device thread sends exactly one value; dropping the completion
/// discards it.
#[derive(Debug)]
pub struct Completion<T> {
    receiver: Receiver<T>,
}

impl<T> Completion<T> {
    /// Block until the job has run
    pub fn wait(self) -> Result<T, GpuError> {
        self.receiver.recv().map_err(|_| GpuError::Disconnected)
    }

    /// Take the result if the job already ran
    pub fn try_take(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

/// Thread owning a [`GpuDevice`]
pub struct RenderThread {
    jobs: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Start the thread; the device moves onto it
    pub fn spawn(mut device: impl GpuDevice) -> std::io::Result<Self> {
        let (jobs, queue): (Sender<Job>, Receiver<Job>) = unbounded();
        let handle = std::thread::Builder::new()
            .name("render".to_string())
            .spawn(move || {
                log::info!("Render thread started");
                for job in queue {
                    job(&mut device);
                }
                log::info!("Render thread stopped");
            })?;

        Ok(Self {
            jobs: Some(jobs),
            handle: Some(handle),
        })
    }

    /// Start a thread around a [`HeadlessDevice`]
    pub fn headless() -> std::io::Result<Self> {
        Self::spawn(HeadlessDevice::new())
    }

    /// Queue a job on the device thread
    pub fn submit<T, F>(&self, work: F) -> Completion<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn GpuDevice) -> T + Send + 'static,
    {
        let (reply, receiver) = bounded(1);
        let job: Job = Box::new(move |device| {
            // The caller may have dropped its completion
            let _ = reply.send(work(device));
        });
        if let Some(jobs) = &self.jobs {
            if jobs.send(job).is_err() {
                log::error!("Render thread is gone, job dropped");
            }
        }
        Completion { receiver }
    }

    /// Upload an image as a texture
    pub fn upload_texture(&self, image: DecodedImage) -> Completion<Result<TextureHandle, GpuError>> {
        self.submit(move |device| device.create_texture(image.width, image.height, &image.pixels))
    }

    /// Upload raw vertex bytes
    pub fn upload_buffer(&self, bytes: Vec<u8>) -> Completion<Result<BufferHandle, GpuError>> {
        self.submit(move |device| device.create_buffer(&bytes))
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        // Closing the channel ends the thread's job loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Render thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for RenderThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderThread")
            .field("running", &self.jobs.is_some())
            .finish()
    }
}
