//! GLSL sources for the lit-cube and label-overlay programs, and the
//! compile/link helpers.
//!
//! Each program is written once as dialect-neutral text. Only the
//! declarations differ between dialects (input/output qualifiers, layout
//! locations, the fragment output), so the lighting arithmetic is
//! byte-identical in every variant.

use std::fs;
use std::path::{Path, PathBuf};

use glow::HasContext;

use crate::error::{Error, Result};
use crate::tier::Dialect;
use crate::types::{NORMAL_ATTRIB, POSITION_ATTRIB};

/// Attribute names bound explicitly when a dialect lacks layout qualifiers.
pub const ATTRIBUTE_BINDINGS: [(u32, &str); 2] =
    [(POSITION_ATTRIB, "a_position"), (NORMAL_ATTRIB, "a_normal")];

const LIT_VERTEX_MAIN: &str = "\
uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform mat3 u_normal_matrix;

void main() {
    v_world_pos = vec3(u_model * vec4(a_position, 1.0));
    v_normal = u_normal_matrix * a_normal;
    gl_Position = u_projection * u_view * vec4(v_world_pos, 1.0);
}
";

const LIT_FRAGMENT_UNIFORMS: &str = "\
struct Material {
    vec3 ambient;
    vec3 diffuse;
    vec3 specular;
    float shininess;
};

struct Light {
    vec3 position;
    vec3 ambient;
    vec3 diffuse;
    vec3 specular;
};

uniform Material u_material;
uniform Light u_light;
uniform vec3 u_view_pos;
";

/// Phong reflectance. Every dialect embeds this text unchanged.
pub const LIGHTING_BODY: &str = "\
    vec3 n = normalize(v_normal);
    vec3 l = normalize(u_light.position - v_world_pos);
    vec3 v = normalize(u_view_pos - v_world_pos);
    float diff = max(dot(n, l), 0.0);
    vec3 r = reflect(-l, n);
    float spec = pow(max(dot(v, r), 0.0), u_material.shininess);
    vec3 color = u_light.ambient * u_material.ambient
        + u_light.diffuse * (diff * u_material.diffuse)
        + u_light.specular * (spec * u_material.specular);
";

const OVERLAY_VERTEX_MAIN: &str = "\
uniform mat4 u_ortho;

void main() {
    gl_Position = u_ortho * vec4(a_position, 0.0, 1.0);
}
";

/// Vertex and fragment source for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub vertex: String,
    pub fragment: String,
    /// Bind [`ATTRIBUTE_BINDINGS`] before linking.
    pub bind_attributes: bool,
}

/// The two programs the renderer needs, for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSet {
    pub dialect: Dialect,
    /// Phong-lit cube program.
    pub lit: ProgramSource,
    /// Flat-color 2D label program.
    pub overlay: ProgramSource,
}

impl ShaderSet {
    /// The built-in sources rendered for `dialect`.
    #[must_use]
    pub fn builtin(dialect: Dialect) -> Self {
        let glsl = Glsl(dialect);
        Self {
            dialect,
            lit: glsl.lit_program(),
            overlay: glsl.overlay_program(),
        }
    }

    /// Load sources from `<dir>/<dialect tag>/{lit,overlay}.{vert,frag}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShaderFile`] naming the first file that cannot be read.
    pub fn from_dir(dir: &Path, dialect: Dialect) -> Result<Self> {
        let base = dir.join(dialect.tag());
        let bind_attributes = !dialect.has_layout_qualifiers();
        let load = |name: &str| -> Result<String> {
            let path: PathBuf = base.join(name);
            fs::read_to_string(&path).map_err(|source| Error::ShaderFile { path, source })
        };
        Ok(Self {
            dialect,
            lit: ProgramSource {
                vertex: load("lit.vert")?,
                fragment: load("lit.frag")?,
                bind_attributes,
            },
            overlay: ProgramSource {
                vertex: load("overlay.vert")?,
                fragment: load("overlay.frag")?,
                bind_attributes,
            },
        })
    }
}

/// Renders declarations in one dialect's syntax.
struct Glsl(Dialect);

impl Glsl {
    fn header(&self) -> String {
        match self.0 {
            Dialect::Glsl330 => "#version 330 core\n\n".to_owned(),
            d => format!("#version {}\n\n", d.version()),
        }
    }

    fn attribute(&self, location: u32, ty: &str, name: &str) -> String {
        match self.0 {
            Dialect::Glsl330 => format!("layout(location = {location}) in {ty} {name};\n"),
            Dialect::Glsl130 => format!("in {ty} {name};\n"),
            Dialect::Glsl120 => format!("attribute {ty} {name};\n"),
        }
    }

    fn varying(&self, stage_out: bool, ty: &str, name: &str) -> String {
        let qualifier = match (self.0, stage_out) {
            (Dialect::Glsl120, _) => "varying",
            (_, true) => "out",
            (_, false) => "in",
        };
        format!("{qualifier} {ty} {name};\n")
    }

    /// Fragment output declaration and the name to assign the color to.
    fn fragment_output(&self) -> (&'static str, &'static str) {
        if self.0.has_fragment_outputs() {
            ("out vec4 frag_color;\n", "frag_color")
        } else {
            ("", "gl_FragColor")
        }
    }

    fn bind_attributes(&self) -> bool {
        !self.0.has_layout_qualifiers()
    }

    /// # Uniforms
    ///
    /// | Name                 | Type       | Description                     |
    /// |----------------------|------------|---------------------------------|
    /// | `u_model`            | `mat4`     | Per-cube model matrix           |
    /// | `u_view`             | `mat4`     | Camera view matrix              |
    /// | `u_projection`       | `mat4`     | Projection matrix               |
    /// | `u_normal_matrix`    | `mat3`     | Inverse-transpose of model 3×3  |
    /// | `u_view_pos`         | `vec3`     | Eye position in world space     |
    /// | `u_material.*`       | `Material` | ambient/diffuse/specular/shininess |
    /// | `u_light.*`          | `Light`    | position/ambient/diffuse/specular  |
    fn lit_program(&self) -> ProgramSource {
        let mut vertex = self.header();
        vertex += &self.attribute(POSITION_ATTRIB, "vec3", "a_position");
        vertex += &self.attribute(NORMAL_ATTRIB, "vec3", "a_normal");
        vertex += &self.varying(true, "vec3", "v_world_pos");
        vertex += &self.varying(true, "vec3", "v_normal");
        vertex.push('\n');
        vertex += LIT_VERTEX_MAIN;

        let (output_decl, target) = self.fragment_output();
        let mut fragment = self.header();
        fragment += LIT_FRAGMENT_UNIFORMS;
        fragment += &self.varying(false, "vec3", "v_world_pos");
        fragment += &self.varying(false, "vec3", "v_normal");
        fragment += output_decl;
        fragment += "\nvoid main() {\n";
        fragment += LIGHTING_BODY;
        fragment += &format!("    {target} = vec4(color, 1.0);\n}}\n");

        ProgramSource {
            vertex,
            fragment,
            bind_attributes: self.bind_attributes(),
        }
    }

    /// # Uniforms
    ///
    /// | Name      | Type   | Description                         |
    /// |-----------|--------|-------------------------------------|
    /// | `u_ortho` | `mat4` | Pixel-space orthographic projection |
    /// | `u_color` | `vec3` | Label color                         |
    fn overlay_program(&self) -> ProgramSource {
        let mut vertex = self.header();
        vertex += &self.attribute(POSITION_ATTRIB, "vec2", "a_position");
        vertex.push('\n');
        vertex += OVERLAY_VERTEX_MAIN;

        let (output_decl, target) = self.fragment_output();
        let mut fragment = self.header();
        fragment += "uniform vec3 u_color;\n";
        fragment += output_decl;
        fragment += &format!("\nvoid main() {{\n    {target} = vec4(u_color, 1.0);\n}}\n");

        ProgramSource {
            vertex,
            fragment,
            bind_attributes: self.bind_attributes(),
        }
    }
}

/// Compile and link a shader program.
///
/// When [`ProgramSource::bind_attributes`] is set, the attribute locations in
/// [`ATTRIBUTE_BINDINGS`] are bound before linking. The shader objects are
/// detached and deleted after a successful link, so only the program handle
/// needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`Error::ShaderCompile`] or [`Error::ProgramLink`] carrying the
/// driver's diagnostic log verbatim.
pub unsafe fn compile_program(gl: &glow::Context, source: &ProgramSource) -> Result<glow::Program> {
    let program = unsafe { gl.create_program() }?;

    let vs = match unsafe { compile_shader(gl, glow::VERTEX_SHADER, &source.vertex) } {
        Ok(vs) => vs,
        Err(err) => {
            unsafe { gl.delete_program(program) };
            return Err(err);
        }
    };
    let fs = match unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, &source.fragment) } {
        Ok(fs) => fs,
        Err(err) => {
            unsafe {
                gl.delete_shader(vs);
                gl.delete_program(program);
            }
            return Err(err);
        }
    };

    unsafe {
        if source.bind_attributes {
            for (index, name) in ATTRIBUTE_BINDINGS {
                gl.bind_attrib_location(program, index, name);
            }
        }

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(Error::ProgramLink { log });
        }

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
    }

    Ok(program)
}

/// Compile a single shader stage (vertex or fragment) from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(gl: &glow::Context, shader_type: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(shader_type)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            let stage = if shader_type == glow::VERTEX_SHADER {
                "vertex"
            } else {
                "fragment"
            };
            return Err(Error::ShaderCompile { stage, log });
        }

        Ok(shader)
    }
}
