//! Cached asset access with graceful degradation
//!
//! Assets live under one root directory:
//!
//! ```text
//! <root>/shaders/   shader sources
//! <root>/textures/  images
//! <root>/meshes/    mesh text files
//! <root>/sounds/    audio files
//! ```
//!
//! Every load is cached by its path relative to the subdirectory. Failures
//! are logged and replaced: shaders by empty text, meshes by an empty mesh,
//! textures by the configured default texture (or a built-in white pixel
//! when even that is missing). Failed textures are not cached, so a later
//! call retries the file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::assets::mesh::Mesh;
use crate::assets::mesh_loader::MeshLoader;
use crate::assets::render_thread::RenderThread;
use crate::assets::texture::{DecodedImage, Texture};
use crate::assets::AssetError;
use crate::audio::AudioBackend;
use crate::core::config::AssetConfig;

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Asset loader and cache
pub struct ResourceSystem {
    config: AssetConfig,
    render_thread: Option<RenderThread>,
    audio: Box<dyn AudioBackend>,
    shaders: HashMap<String, String>,
    meshes: HashMap<String, Rc<Mesh>>,
    textures: HashMap<String, Texture>,
    builtin_white: Option<Texture>,
}

impl ResourceSystem {
    /// Create a resource system
    ///
    /// Without a render thread, textures and meshes are loaded but never
    /// uploaded.
    pub fn new(
        config: AssetConfig,
        render_thread: Option<RenderThread>,
        audio: Box<dyn AudioBackend>,
    ) -> Self {
        Self {
            config,
            render_thread,
            audio,
            shaders: HashMap::new(),
            meshes: HashMap::new(),
            textures: HashMap::new(),
            builtin_white: None,
        }
    }

    /// Asset settings
    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Render thread used for uploads
    pub fn render_thread(&self) -> Option<&RenderThread> {
        self.render_thread.as_ref()
    }

    fn asset_path(&self, kind: &str, path: &str) -> PathBuf {
        self.config.root.join(kind).join(path)
    }

    /// Shader source text; empty if the file cannot be read
    pub fn load_shader(&mut self, path: &str) -> String {
        if let Some(text) = self.shaders.get(path) {
            return text.clone();
        }

        let full_path = self.asset_path("shaders", path);
        let text = std::fs::read_to_string(&full_path).unwrap_or_else(|e| {
            log::error!("Could not load shader {:?}: {}", full_path, e);
            String::new()
        });
        self.shaders.insert(path.to_string(), text.clone());
        text
    }

    /// Texture by path, falling back to the default texture
    pub fn get_texture(&mut self, path: &str) -> Texture {
        if let Some(texture) = self.textures.get(path) {
            return texture.clone();
        }

        match self.load_texture(path) {
            Ok(texture) => {
                self.textures.insert(path.to_string(), texture.clone());
                texture
            }
            Err(e) if path == self.config.default_texture => {
                log::error!("Could not load default texture '{}': {}", path, e);
                self.builtin_white()
            }
            Err(e) => {
                log::warn!("Could not load texture '{}': {}, using default", path, e);
                self.default_texture()
            }
        }
    }

    /// The configured default texture
    pub fn default_texture(&mut self) -> Texture {
        let path = self.config.default_texture.clone();
        self.get_texture(&path)
    }

    fn load_texture(&self, path: &str) -> Result<Texture, AssetError> {
        let image = DecodedImage::from_file(self.asset_path("textures", path))?;
        self.upload_texture(image)
    }

    fn upload_texture(&self, image: DecodedImage) -> Result<Texture, AssetError> {
        let (width, height) = (image.width, image.height);
        let handle = match &self.render_thread {
            Some(thread) => Some(thread.upload_texture(image).wait()??),
            None => None,
        };
        Ok(Texture::new(handle, width, height))
    }

    fn builtin_white(&mut self) -> Texture {
        if let Some(texture) = &self.builtin_white {
            return texture.clone();
        }
        let texture = self
            .upload_texture(DecodedImage::solid(1, 1, WHITE))
            .unwrap_or_else(|e| {
                log::error!("Could not upload built-in texture: {}", e);
                Texture::new(None, 1, 1)
            });
        self.builtin_white = Some(texture.clone());
        texture
    }

    /// Mesh by path; empty if the file cannot be read or parsed
    ///
    /// The interleaved vertex stream is uploaded when a render thread is
    /// attached.
    pub fn load_mesh(&mut self, path: &str) -> Rc<Mesh> {
        if let Some(mesh) = self.meshes.get(path) {
            return Rc::clone(mesh);
        }

        let full_path = self.asset_path("meshes", path);
        // No partial meshes: any IO or parse error yields an empty one
        let mut mesh = MeshLoader::load(&full_path).unwrap_or_else(|e| {
            log::error!("Could not load mesh {:?}: {}", full_path, e);
            Mesh::empty()
        });

        if let (Some(thread), false) = (&self.render_thread, mesh.is_empty()) {
            let bytes: Vec<u8> = bytemuck::cast_slice(&mesh.interleaved()).to_vec();
            match thread.upload_buffer(bytes).wait().and_then(std::convert::identity) {
                Ok(handle) => mesh.set_vertex_buffer(handle),
                Err(e) => log::error!("Could not upload mesh '{}': {}", path, e),
            }
        }

        let mesh = Rc::new(mesh);
        self.meshes.insert(path.to_string(), Rc::clone(&mesh));
        mesh
    }

    /// Start a sound; failures are logged
    pub fn play_sound(&mut self, path: &str, looping: bool) {
        let full_path = self.asset_path("sounds", path);
        if let Err(e) = self.audio.play(&full_path, looping) {
            log::error!("Could not play sound {:?}: {}", full_path, e);
        }
    }

    /// Stop all sounds
    pub fn stop_sounds(&mut self) {
        self.audio.stop_all();
    }

    /// Number of cached shaders, textures and meshes
    pub fn cached_counts(&self) -> (usize, usize, usize) {
        (self.shaders.len(), self.textures.len(), self.meshes.len())
    }
}

impl std::fmt::Debug for ResourceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSystem")
            .field("root", &self.config.root)
            .field("render_thread", &self.render_thread)
            .field("shaders", &self.shaders.len())
            .field("textures", &self.textures.len())
            .field("meshes", &self.meshes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, NullAudioBackend};
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    struct RecordingAudio {
        played: Rc<RefCell<Vec<(PathBuf, bool)>>>,
    }

    impl AudioBackend for RecordingAudio {
        fn play(&mut self, path: &Path, looping: bool) -> Result<(), AudioError> {
            self.played.borrow_mut().push((path.to_path_buf(), looping));
            Ok(())
        }

        fn stop_all(&mut self) {
            self.played.borrow_mut().clear();
        }
    }

    fn asset_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for kind in ["shaders", "textures", "meshes", "sounds"] {
            std::fs::create_dir(dir.path().join(kind)).unwrap();
        }
        dir
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
            .save(dir.join("textures").join(name))
            .unwrap();
    }

    fn resources(dir: &TempDir, render_thread: Option<RenderThread>) -> ResourceSystem {
        let config = AssetConfig {
            root: dir.path().to_path_buf(),
            ..AssetConfig::default()
        };
        ResourceSystem::new(config, render_thread, Box::new(NullAudioBackend::new()))
    }

    #[test]
    fn test_shader_text_is_cached() {
        let dir = asset_dir();
        let path = dir.path().join("shaders/gui.vert");
        std::fs::write(&path, "attribute vec3 a_position;\nvoid main() {}\n").unwrap();

        let mut resources = resources(&dir, None);
        let first = resources.load_shader("gui.vert");
        assert!(first.contains("a_position;\nvoid"));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(resources.load_shader("gui.vert"), first);
    }

    #[test]
    fn test_missing_shader_is_empty() {
        let dir = asset_dir();
        let mut resources = resources(&dir, None);
        assert_eq!(resources.load_shader("missing.frag"), "");
        assert_eq!(resources.cached_counts().0, 1);
    }

    #[test]
    fn test_texture_upload_and_cache() {
        let dir = asset_dir();
        write_png(dir.path(), "brick.png", 4, 2);

        let mut resources = resources(&dir, Some(RenderThread::headless().unwrap()));
        let texture = resources.get_texture("brick.png");
        assert_eq!((texture.width(), texture.height()), (4, 2));
        assert!(texture.handle().is_some());
        assert_eq!(resources.get_texture("brick.png"), texture);
        assert_eq!(resources.cached_counts().1, 1);
    }

    #[test]
    fn test_missing_texture_falls_back_to_default() {
        let dir = asset_dir();
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255]))
            .save_with_format(dir.path().join("textures/white1x1.bmp"), image::ImageFormat::Bmp)
            .unwrap();

        let mut resources = resources(&dir, None);
        let texture = resources.get_texture("nope.png");
        assert_eq!(texture, resources.default_texture());
        assert_eq!((texture.width(), texture.height()), (2, 2));
    }

    #[test]
    fn test_missing_default_uses_builtin_white() {
        let dir = asset_dir();
        let mut resources = resources(&dir, Some(RenderThread::headless().unwrap()));

        let texture = resources.get_texture("nope.png");
        assert_eq!((texture.width(), texture.height()), (1, 1));
        assert!(texture.handle().is_some());
        assert_eq!(resources.get_texture("other.png"), texture);
        assert_eq!(resources.cached_counts().1, 0);
    }

    #[test]
    fn test_mesh_load_uploads_buffer() {
        let dir = asset_dir();
        std::fs::write(dir.path().join("meshes/tri.mesh"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mut resources = resources(&dir, Some(RenderThread::headless().unwrap()));
        let mesh = resources.load_mesh("tri.mesh");
        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.vertex_buffer().is_some());
        assert!(Rc::ptr_eq(&mesh, &resources.load_mesh("tri.mesh")));
    }

    #[test]
    fn test_broken_mesh_is_empty() {
        let dir = asset_dir();
        std::fs::write(dir.path().join("meshes/bad.mesh"), "v 0 0 0\nf 1 2 3\n").unwrap();

        let mut resources = resources(&dir, Some(RenderThread::headless().unwrap()));
        assert!(resources.load_mesh("bad.mesh").is_empty());
        assert!(resources.load_mesh("missing.mesh").is_empty());
        assert!(resources.load_mesh("bad.mesh").vertex_buffer().is_none());
    }

    #[test]
    fn test_play_sound_resolves_under_sounds() {
        let dir = asset_dir();
        let played = Rc::new(RefCell::new(Vec::new()));
        let audio = RecordingAudio { played: Rc::clone(&played) };
        let config = AssetConfig {
            root: dir.path().to_path_buf(),
            ..AssetConfig::default()
        };
        let mut resources = ResourceSystem::new(config, None, Box::new(audio));

        resources.play_sound("jump.wav", true);
        assert_eq!(*played.borrow(), vec![(dir.path().join("sounds/jump.wav"), true)]);

        resources.stop_sounds();
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_play_missing_sound_is_logged_not_fatal() {
        let dir = asset_dir();
        let mut resources = resources(&dir, None);
        resources.play_sound("missing.wav", false);
    }
}
