//! The renderer: owns GL objects, draws the cube grid and then the label
//! overlay every frame.

use std::collections::HashSet;
use std::sync::Arc;

use glam::{Mat3, Mat4, Vec3};
use glow::HasContext;

use crate::{
    error::{Error, Result},
    glyph,
    mesh::{CUBE_VERTEX_COUNT, CUBE_VERTICES},
    scene::{self, Camera, CubeInstance, BACKGROUND, CUBE_MATERIAL, LABEL_COLOR, LIGHT},
    shaders::{self, ShaderSet},
    types::{CubeVertex, LabelVertex, NORMAL_ATTRIB, POSITION_ATTRIB},
};

/// Convert a vertex count or byte size to the `i32` GL expects.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. Every buffer here is a few kilobytes.
fn gl_int(value: usize) -> i32 {
    i32::try_from(value).expect("value exceeds i32::MAX")
}

/// Whether vertex array objects can be created on a context of this major
/// version with these extensions.
fn supports_vertex_arrays(major: u32, extensions: &HashSet<String>) -> bool {
    major >= 3 || extensions.contains("GL_ARB_vertex_array_object")
}

unsafe fn uniform(
    gl: &glow::Context,
    program: glow::Program,
    name: &'static str,
) -> Result<glow::UniformLocation> {
    let location = unsafe { gl.get_uniform_location(program, name) };
    location.ok_or(Error::MissingUniform(name))
}

/// Cached uniform locations for the lit-cube program.
struct LitUniforms {
    model: glow::UniformLocation,
    view: glow::UniformLocation,
    projection: glow::UniformLocation,
    normal_matrix: glow::UniformLocation,
    view_pos: glow::UniformLocation,
    material_ambient: glow::UniformLocation,
    material_diffuse: glow::UniformLocation,
    material_specular: glow::UniformLocation,
    /// `u_material.shininess`, the only per-cube material value.
    material_shininess: glow::UniformLocation,
    /// `u_light.position`, rewritten per cube.
    light_position: glow::UniformLocation,
    light_ambient: glow::UniformLocation,
    light_diffuse: glow::UniformLocation,
    light_specular: glow::UniformLocation,
}

impl LitUniforms {
    unsafe fn locate(gl: &glow::Context, program: glow::Program) -> Result<Self> {
        unsafe {
            Ok(Self {
                model: uniform(gl, program, "u_model")?,
                view: uniform(gl, program, "u_view")?,
                projection: uniform(gl, program, "u_projection")?,
                normal_matrix: uniform(gl, program, "u_normal_matrix")?,
                view_pos: uniform(gl, program, "u_view_pos")?,
                material_ambient: uniform(gl, program, "u_material.ambient")?,
                material_diffuse: uniform(gl, program, "u_material.diffuse")?,
                material_specular: uniform(gl, program, "u_material.specular")?,
                material_shininess: uniform(gl, program, "u_material.shininess")?,
                light_position: uniform(gl, program, "u_light.position")?,
                light_ambient: uniform(gl, program, "u_light.ambient")?,
                light_diffuse: uniform(gl, program, "u_light.diffuse")?,
                light_specular: uniform(gl, program, "u_light.specular")?,
            })
        }
    }
}

/// Cached uniform locations for the overlay program.
struct OverlayUniforms {
    /// `u_ortho` — pixel-space projection.
    ortho: glow::UniformLocation,
    /// `u_color` — label fill.
    color: glow::UniformLocation,
}

/// Vertex buffer plus the attribute layout needed to draw from it.
///
/// On contexts without vertex array objects the layout is re-specified every
/// time the buffer is bound.
struct VertexStream {
    vao: Option<glow::VertexArray>,
    vbo: glow::Buffer,
    /// `(attribute, component count, byte offset)`.
    attributes: &'static [(u32, i32, i32)],
    stride: i32,
}

impl VertexStream {
    unsafe fn new(
        gl: &glow::Context,
        use_vao: bool,
        attributes: &'static [(u32, i32, i32)],
        stride: usize,
    ) -> Result<Self> {
        unsafe {
            let vbo = gl.create_buffer()?;
            let vao = if use_vao {
                Some(gl.create_vertex_array()?)
            } else {
                None
            };
            let stream = Self {
                vao,
                vbo,
                attributes,
                stride: gl_int(stride),
            };
            if let Some(vao) = vao {
                gl.bind_vertex_array(Some(vao));
                stream.specify_layout(gl);
                gl.bind_vertex_array(None);
            }
            Ok(stream)
        }
    }

    unsafe fn specify_layout(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            for &(index, size, offset) in self.attributes {
                gl.enable_vertex_attrib_array(index);
                gl.vertex_attrib_pointer_f32(index, size, glow::FLOAT, false, self.stride, offset);
            }
        }
    }

    unsafe fn bind(&self, gl: &glow::Context) {
        unsafe {
            match self.vao {
                Some(vao) => {
                    gl.bind_vertex_array(Some(vao));
                    gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
                }
                None => self.specify_layout(gl),
            }
        }
    }

    unsafe fn unbind(&self, gl: &glow::Context) {
        unsafe {
            if self.vao.is_some() {
                gl.bind_vertex_array(None);
            } else {
                for &(index, _, _) in self.attributes {
                    gl.disable_vertex_attrib_array(index);
                }
            }
        }
    }

    unsafe fn destroy(&self, gl: &glow::Context) {
        unsafe {
            if let Some(vao) = self.vao {
                gl.delete_vertex_array(vao);
            }
            gl.delete_buffer(self.vbo);
        }
    }
}

const CUBE_ATTRIBUTES: &[(u32, i32, i32)] =
    &[(POSITION_ATTRIB, 3, 0), (NORMAL_ATTRIB, 3, 3 * 4)];
const LABEL_ATTRIBUTES: &[(u32, i32, i32)] = &[(POSITION_ATTRIB, 2, 0)];

/// Draws the eight lit cubes and their seven-segment labels.
///
/// Both programs are compiled once in [`new`](Self::new); per frame the only
/// GL writes are uniforms and the label buffer, which is re-filled and drawn
/// once per label in strict upload-then-draw order.
///
/// # Example
///
/// ```no_run
/// # use specular_grid::{render::SceneRenderer, shaders::ShaderSet, tier::Dialect};
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>) -> specular_grid::error::Result<()> {
/// let shaders = ShaderSet::builtin(Dialect::Glsl330);
/// let renderer = unsafe { SceneRenderer::new(gl, &shaders, [1280, 720]) }?;
/// unsafe { renderer.render([1280, 720]) };
/// unsafe { renderer.destroy() };
/// # Ok(())
/// # }
/// ```
pub struct SceneRenderer {
    gl: Arc<glow::Context>,

    lit_program: glow::Program,
    lit_uniforms: LitUniforms,

    overlay_program: glow::Program,
    overlay_uniforms: OverlayUniforms,

    /// Static cube mesh.
    cube: VertexStream,
    /// Dynamic label buffer, resized on every upload.
    labels: VertexStream,

    /// Cube-relative light offset shared by every cube.
    light_offset: Vec3,
    /// Pixel-space projection for the overlay, fixed to the logical window.
    overlay_projection: Mat4,
}

impl SceneRenderer {
    /// Compile both programs, upload the cube mesh and set every uniform that
    /// stays constant for the life of the renderer.
    ///
    /// `window_size` is the logical window size the overlay is laid out in.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid. The caller must call
    /// [`destroy`](Self::destroy) before the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if compilation, linking, uniform lookup or GL object
    /// creation fails.
    pub unsafe fn new(
        gl: Arc<glow::Context>,
        shader_set: &ShaderSet,
        window_size: [u32; 2],
    ) -> Result<Self> {
        let lit_program = unsafe { shaders::compile_program(&gl, &shader_set.lit)? };
        let overlay_program = unsafe { shaders::compile_program(&gl, &shader_set.overlay)? };
        log::debug!("compiled lit and overlay programs ({})", shader_set.dialect);

        let lit_uniforms = unsafe { LitUniforms::locate(&gl, lit_program)? };
        let overlay_uniforms = unsafe {
            OverlayUniforms {
                ortho: uniform(&gl, overlay_program, "u_ortho")?,
                color: uniform(&gl, overlay_program, "u_color")?,
            }
        };

        let use_vao = supports_vertex_arrays(gl.version().major, gl.supported_extensions());
        log::debug!("vertex array objects: {use_vao}");

        let (cube, labels) = unsafe {
            let cube = VertexStream::new(
                &gl,
                use_vao,
                CUBE_ATTRIBUTES,
                std::mem::size_of::<CubeVertex>(),
            )?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(cube.vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&CUBE_VERTICES),
                glow::STATIC_DRAW,
            );

            let labels = VertexStream::new(
                &gl,
                use_vao,
                LABEL_ATTRIBUTES,
                std::mem::size_of::<LabelVertex>(),
            )?;
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            (cube, labels)
        };

        let renderer = Self {
            gl,
            lit_program,
            lit_uniforms,
            overlay_program,
            overlay_uniforms,
            cube,
            labels,
            light_offset: scene::light_offset(),
            overlay_projection: scene::overlay_projection(window_size),
        };
        unsafe { renderer.set_constant_uniforms() };
        Ok(renderer)
    }

    /// Camera, material and light colors: identical for every cube.
    unsafe fn set_constant_uniforms(&self) {
        let gl = &self.gl;
        let u = &self.lit_uniforms;
        let camera = Camera::new();

        unsafe {
            gl.use_program(Some(self.lit_program));
            gl.uniform_matrix_4_f32_slice(Some(&u.view), false, &camera.view.to_cols_array());
            gl.uniform_matrix_4_f32_slice(
                Some(&u.projection),
                false,
                &camera.projection.to_cols_array(),
            );
            set_vec3(gl, &u.view_pos, camera.eye);

            set_vec3(gl, &u.material_ambient, CUBE_MATERIAL.ambient);
            set_vec3(gl, &u.material_diffuse, CUBE_MATERIAL.diffuse);
            set_vec3(gl, &u.material_specular, CUBE_MATERIAL.specular);

            set_vec3(gl, &u.light_ambient, LIGHT.ambient);
            set_vec3(gl, &u.light_diffuse, LIGHT.diffuse);
            set_vec3(gl, &u.light_specular, LIGHT.specular);

            gl.use_program(Some(self.overlay_program));
            gl.uniform_matrix_4_f32_slice(
                Some(&self.overlay_uniforms.ortho),
                false,
                &self.overlay_projection.to_cols_array(),
            );
            let [r, g, b] = LABEL_COLOR;
            gl.uniform_3_f32(Some(&self.overlay_uniforms.color), r, g, b);
            gl.use_program(None);
        }
    }

    /// Draw one frame into the default framebuffer.
    ///
    /// `framebuffer_size` is the drawable size in pixels, which may exceed
    /// the logical window size on high-DPI displays.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn render(&self, [width, height]: [u32; 2]) {
        let gl = &self.gl;
        let [r, g, b] = BACKGROUND;

        unsafe {
            gl.viewport(
                0,
                0,
                i32::try_from(width).unwrap_or(i32::MAX),
                i32::try_from(height).unwrap_or(i32::MAX),
            );
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            self.draw_cubes();

            // The overlay is drawn last and always on top.
            gl.disable(glow::DEPTH_TEST);
            self.draw_labels();
            gl.enable(glow::DEPTH_TEST);
        }
    }

    unsafe fn draw_cubes(&self) {
        let gl = &self.gl;
        let u = &self.lit_uniforms;

        unsafe {
            gl.use_program(Some(self.lit_program));
            self.cube.bind(gl);

            for cube in CubeInstance::all() {
                set_vec3(gl, &u.light_position, cube.light_position(self.light_offset));
                let model = cube.model_matrix();
                let normal: Mat3 = cube.normal_matrix();
                gl.uniform_matrix_4_f32_slice(Some(&u.model), false, &model.to_cols_array());
                gl.uniform_matrix_3_f32_slice(
                    Some(&u.normal_matrix),
                    false,
                    &normal.to_cols_array(),
                );
                gl.uniform_1_f32(Some(&u.material_shininess), cube.shininess);
                gl.draw_arrays(glow::TRIANGLES, 0, gl_int(CUBE_VERTEX_COUNT));
            }

            self.cube.unbind(gl);
        }
    }

    /// Upload and draw each label in turn through the one dynamic buffer.
    unsafe fn draw_labels(&self) {
        let gl = &self.gl;

        unsafe {
            gl.use_program(Some(self.overlay_program));
            self.labels.bind(gl);

            for cube in CubeInstance::all() {
                let layout = cube.label_layout();
                let vertices = glyph::render_number(layout.origin, layout.size, cube.label);
                if vertices.is_empty() {
                    continue;
                }
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&vertices),
                    glow::DYNAMIC_DRAW,
                );
                gl.draw_arrays(glow::TRIANGLES, 0, gl_int(vertices.len()));
            }

            self.labels.unbind(gl);
        }
    }

    /// Clean up all GL resources owned by this renderer.
    ///
    /// # Safety
    ///
    /// Must be called with the same GL context that was used to create the
    /// renderer, and must be called exactly once.
    pub unsafe fn destroy(&self) {
        let gl = &self.gl;
        unsafe {
            gl.use_program(None);
            self.cube.destroy(gl);
            self.labels.destroy(gl);
            gl.delete_program(self.lit_program);
            gl.delete_program(self.overlay_program);
        }
    }
}

unsafe fn set_vec3(gl: &glow::Context, location: &glow::UniformLocation, v: Vec3) {
    unsafe { gl.uniform_3_f32(Some(location), v.x, v.y, v.z) };
}
