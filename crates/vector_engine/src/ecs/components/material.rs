//! Material component

use crate::assets::Texture;
use crate::ecs::{Component, ComponentTag};
use crate::foundation::math::Vec4;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Colour {
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Build from components
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Components scaled to `0.0..=1.0` for shader uniforms
    pub fn normalize(self) -> Vec4 {
        Vec4::new(
            f32::from(self.r),
            f32::from(self.g),
            f32::from(self.b),
            f32::from(self.a),
        ) / 255.0
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Surface colour and texture
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialComponent {
    colour: Colour,
    texture: Texture,
}

impl Component for MaterialComponent {
    fn tag(&self) -> ComponentTag {
        Self::TAG
    }
}

impl MaterialComponent {
    /// Component tag
    pub const TAG: ComponentTag = ComponentTag::new("Material");

    /// Create a material
    pub fn new(colour: Colour, texture: Texture) -> Self {
        Self { colour, texture }
    }

    /// Material colour
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Replace the colour
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    /// Material texture
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Replace the texture
    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize() {
        let colour = Colour::rgba(255, 0, 51, 255);
        assert_relative_eq!(colour.normalize(), Vec4::new(1.0, 0.0, 0.2, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(Colour::default(), Colour::WHITE);
        assert_relative_eq!(Colour::WHITE.normalize(), Vec4::new(1.0, 1.0, 1.0, 1.0));
    }
}
