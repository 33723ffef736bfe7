//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Color from 8-bit sRGB channels
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    rgba(r, g, b, 1.0)
}

/// Color from 8-bit sRGB channels plus alpha
pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Colors for game elements
pub mod colors {
    use super::{rgb, rgba};

    pub const SKY_TOP: [f32; 4] = rgb(0x87, 0xCE, 0xEB);
    pub const SKY_BOTTOM: [f32; 4] = rgb(0xBF, 0xEF, 0xFF);
    pub const HILLS: [f32; 4] = rgb(0x7E, 0xC8, 0x50);
    pub const GROUND: [f32; 4] = rgb(0xD2, 0xB4, 0x8C);
    pub const GROUND_STRIPE: [f32; 4] = rgba(0, 0, 0, 0.07);

    pub const PIPE: [f32; 4] = rgb(0x1E, 0x7E, 0x34);
    pub const PIPE_OUTLINE: [f32; 4] = rgba(0, 0, 0, 0.35);
    pub const PIPE_CAP: [f32; 4] = rgb(0x14, 0x55, 0x23);

    pub const BIRD_BODY: [f32; 4] = rgb(0xFF, 0xD1, 0x66);
    pub const BIRD_OUTLINE: [f32; 4] = rgb(0xA6, 0x6F, 0x00);
    pub const BIRD_WING: [f32; 4] = rgb(0xFF, 0xB7, 0x03);
    pub const BIRD_EYE: [f32; 4] = rgb(0xFF, 0xFF, 0xFF);
    pub const BIRD_PUPIL: [f32; 4] = rgb(0x22, 0x22, 0x22);
    pub const BIRD_BEAK: [f32; 4] = rgb(0xFF, 0x6B, 0x6B);

    /// Letterbox bars around the logical surface
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
