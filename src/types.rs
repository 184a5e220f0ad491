//! Vertex types uploaded to the GPU.

use bytemuck::{Pod, Zeroable};

/// A cube vertex: object-space position and outward face normal.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A label vertex in window pixel space (origin bottom-left).
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct LabelVertex {
    pub position: [f32; 2],
}

/// Vertex attribute slot for `a_position`.
pub const POSITION_ATTRIB: u32 = 0;
/// Vertex attribute slot for `a_normal`.
pub const NORMAL_ATTRIB: u32 = 1;
