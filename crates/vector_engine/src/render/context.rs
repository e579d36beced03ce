//! Shader table owned by the engine

use std::collections::HashMap;

use crate::assets::ResourceSystem;
use crate::render::shader::{ShaderKind, ShaderProgram};

/// Every shader program, loaded once per engine
///
/// Passed to whatever needs a program instead of living in a global.
#[derive(Debug, Clone)]
pub struct RenderingContext {
    programs: HashMap<ShaderKind, ShaderProgram>,
}

impl RenderingContext {
    /// Load every [`ShaderKind`]
    ///
    /// Programs with missing source are kept and reported with a warning.
    pub fn new(resources: &mut ResourceSystem) -> Self {
        let programs: HashMap<_, _> = ShaderKind::ALL
            .into_iter()
            .map(|kind| (kind, ShaderProgram::load(kind, resources)))
            .collect();

        for program in programs.values().filter(|program| !program.is_complete()) {
            log::warn!("Shader '{}' is missing source", program.kind().file_stem());
        }
        log::info!("Rendering context ready with {} shaders", programs.len());

        Self { programs }
    }

    /// Program for `kind`
    pub fn shader(&self, kind: ShaderKind) -> Option<&ShaderProgram> {
        self.programs.get(&kind)
    }

    /// Number of loaded programs
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// True if no programs are loaded
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
