use glam::{Vec3, Vec4};

/// An sRGB colour as written in hex (`0xRRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const WHITE: Color = Color::from_hex(0xffffff);

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Linear-light components, which is what the shaders work in.
    pub fn to_linear(self) -> Vec3 {
        Vec3::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    pub fn to_linear_rgba(self, alpha: f32) -> Vec4 {
        self.to_linear().extend(alpha)
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        let linear = self.to_linear();
        wgpu::Color {
            r: linear.x as f64,
            g: linear.y as f64,
            b: linear.z as f64,
            a: 1.0,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

/// Shininess used when a lit material doesn't specify one.
pub const DEFAULT_SHININESS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Blinn-Phong lit surface. Blended when `opacity < 1`.
    Phong {
        color: Color,
        shininess: f32,
        opacity: f32,
    },
    /// Unlit, constant-colour lines.
    LineBasic { color: Color },
}

impl Material {
    pub fn phong(hex: u32) -> Self {
        Material::Phong {
            color: Color::from_hex(hex),
            shininess: DEFAULT_SHININESS,
            opacity: 1.0,
        }
    }

    pub fn phong_shiny(hex: u32, shininess: f32) -> Self {
        Material::Phong {
            color: Color::from_hex(hex),
            shininess,
            opacity: 1.0,
        }
    }

    pub fn phong_transparent(hex: u32, opacity: f32) -> Self {
        Material::Phong {
            color: Color::from_hex(hex),
            shininess: DEFAULT_SHININESS,
            opacity,
        }
    }

    pub fn line(hex: u32) -> Self {
        Material::LineBasic {
            color: Color::from_hex(hex),
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Material::Phong { opacity, .. } if *opacity < 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_conversion_keeps_extremes() {
        assert_eq!(Color::BLACK.to_linear(), Vec3::ZERO);
        assert!((Color::WHITE.to_linear() - Vec3::ONE).length() < 1e-5);

        let mid = Color::from_hex(0x808080).to_linear();
        assert!((mid.x - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn only_partial_opacity_is_transparent() {
        assert!(Material::phong_transparent(0xffffff, 0.9).is_transparent());
        assert!(!Material::phong(0xffffff).is_transparent());
        assert!(!Material::line(0xffffff).is_transparent());
    }
}
