//! Eight Phong-lit cubes in a 2×4 grid, one per specular exponent
//! (2 through 256), each labelled with its exponent in seven-segment digits.
//!
//! Rendering goes through OpenGL via [glow]; windows and contexts come from
//! [glfw]. The crate negotiates the newest context it can get and compiles
//! one of three GLSL dialects to match:
//!
//! | Context              | Dialect   | Attribute locations       |
//! |----------------------|-----------|---------------------------|
//! | 3.3 core / compat    | GLSL 3.30 | `layout(location = N)`    |
//! | 3.0 compat           | GLSL 1.30 | bound before linking      |
//! | 2.1 compat           | GLSL 1.20 | bound before linking      |
//!
//! All three dialects share the same lighting text, so every tier produces
//! the same image. Labels are built from rectangles by [`glyph`]; there is no
//! font or texture.
//!
//! # Safety
//!
//! [`render::SceneRenderer`] and [`shaders::compile_program`] issue raw GL
//! calls and require a valid, current OpenGL context.
//!
//! [glow]: https://docs.rs/glow
//! [glfw]: https://docs.rs/glfw

pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod glyph;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod shaders;
pub mod tier;
pub mod types;

pub use error::{Error, Result};
pub use render::SceneRenderer;
