//! Process lifecycle: window system init, context negotiation, GL loading,
//! and the blocking render loop.

use std::sync::Arc;

use glfw::Context as _;
use glow::HasContext;

use crate::{
    config::{Config, ShaderSource},
    context::{self, GlfwFactory, GlfwSurface, Negotiated},
    error::{Error, Result},
    render::SceneRenderer,
    shaders::ShaderSet,
};

/// Entry points that must resolve before anything is drawn.
const REQUIRED_GL_FUNCTIONS: [&str; 4] = [
    "glGetString",
    "glCreateShader",
    "glBufferData",
    "glDrawArrays",
];

fn log_glfw_error(err: glfw::Error, description: String) {
    // Rejected context attempts land here too, so this stays below `error`.
    log::warn!("GLFW {err:?}: {description}");
}

/// Resolve GL entry points through the window's current context.
///
/// # Safety
///
/// `window`'s context must be current on this thread.
unsafe fn load_gl(window: &mut glfw::PWindow) -> Result<glow::Context> {
    for name in REQUIRED_GL_FUNCTIONS {
        if window.get_proc_address(name).is_null() {
            return Err(Error::GlLoad(name));
        }
    }
    let gl = unsafe {
        glow::Context::from_loader_function(|name| {
            window.get_proc_address(name)
        })
    };
    Ok(gl)
}

/// Open the window, render until it is closed, then release everything.
///
/// # Errors
///
/// Any startup failure: window system, context negotiation, GL loading,
/// shader loading, compilation or linking.
pub fn run(config: &Config) -> Result<()> {
    let mut glfw =
        glfw::init(log_glfw_error).map_err(|err| Error::WindowSystem(format!("{err:?}")))?;

    let Negotiated {
        surface: GlfwSurface { mut window, events },
        attempt,
        dialect,
    } = context::negotiate(
        &mut GlfwFactory::new(&mut glfw),
        config.window_size,
        &config.title,
    )?;

    window.make_current();
    glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

    let gl = unsafe { load_gl(&mut window)? };
    unsafe {
        log::info!(
            "{attempt}: {} / GLSL {} on {}",
            gl.get_parameter_string(glow::VERSION),
            gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
            gl.get_parameter_string(glow::RENDERER),
        );
        // Discard anything left over from context creation.
        gl.get_error();
    }

    let shaders = match &config.shaders {
        ShaderSource::Builtin => ShaderSet::builtin(dialect),
        ShaderSource::Directory(dir) => {
            log::info!("loading {dialect} shaders from {}", dir.display());
            ShaderSet::from_dir(dir, dialect)?
        }
    };

    let renderer = unsafe { SceneRenderer::new(Arc::new(gl), &shaders, config.window_size)? };

    while !window.should_close() {
        glfw.poll_events();
        // Only the close request matters, and `should_close` already sees it.
        for _ in glfw::flush_messages(&events) {}

        let (width, height) = window.get_framebuffer_size();
        let size = [
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
        ];
        unsafe { renderer.render(size) };
        window.swap_buffers();
    }

    unsafe { renderer.destroy() };
    log::info!("window closed");
    Ok(())
}
