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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.16, 0.22, 0.38, 1.0];
    pub const BOARD: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SPLASH: [f32; 4] = [0.95, 0.78, 0.35, 1.0];
    pub const SPLASH_ACCENT: [f32; 4] = [0.12, 0.12, 0.3, 1.0];
    pub const TILE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const NUMBER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const START_RING: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GAME_OVER_TINT: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
    pub const MISSED_NUMBER: [f32; 4] = [1.0, 0.35, 0.3, 1.0];

    /// Black with the given opacity (fade overlay)
    pub const fn black(alpha: f32) -> [f32; 4] {
        [0.0, 0.0, 0.0, alpha]
    }
}
