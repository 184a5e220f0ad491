//! Context negotiation: walk [`CONTEXT_ATTEMPTS`] against the window system
//! until one produces a drawable surface.

use crate::error::{Error, Result};
use crate::tier::{ContextAttempt, Dialect, CONTEXT_ATTEMPTS};

/// A window system that can try to create a window with a GL context for a
/// single [`ContextAttempt`].
///
/// Implementations reset any global hint state before each attempt, so one
/// failed attempt never leaks hints into the next.
pub trait SurfaceFactory {
    /// The window (plus whatever travels with it) handed back on success.
    type Surface;

    /// Try once. `None` means the driver rejected this version/profile.
    fn try_create(
        &mut self,
        attempt: &ContextAttempt,
        size: [u32; 2],
        title: &str,
    ) -> Option<Self::Surface>;
}

/// The outcome of a successful negotiation.
#[derive(Debug)]
pub struct Negotiated<S> {
    /// The created window.
    pub surface: S,
    /// The attempt that succeeded.
    pub attempt: ContextAttempt,
    /// Shading-language dialect for that attempt.
    pub dialect: Dialect,
}

/// Try each entry of [`CONTEXT_ATTEMPTS`] exactly once, in order.
///
/// # Errors
///
/// Returns [`Error::NoContext`] if every attempt fails.
pub fn negotiate<F: SurfaceFactory>(
    factory: &mut F,
    size: [u32; 2],
    title: &str,
) -> Result<Negotiated<F::Surface>> {
    negotiate_with(factory, &CONTEXT_ATTEMPTS, size, title)
}

/// [`negotiate`] over an explicit attempt list.
///
/// Attempts whose GLSL level maps to no shipped dialect are skipped without
/// touching the window system.
///
/// # Errors
///
/// Returns [`Error::NoContext`] if every attempt fails.
pub fn negotiate_with<F: SurfaceFactory>(
    factory: &mut F,
    attempts: &[ContextAttempt],
    size: [u32; 2],
    title: &str,
) -> Result<Negotiated<F::Surface>> {
    for attempt in attempts {
        let Some(dialect) = attempt.dialect() else {
            log::warn!("skipping {attempt}: GLSL {} has no shader variant", attempt.glsl);
            continue;
        };
        log::debug!("trying {attempt}");
        if let Some(surface) = factory.try_create(attempt, size, title) {
            log::info!("negotiated {attempt} ({dialect})");
            return Ok(Negotiated {
                surface,
                attempt: *attempt,
                dialect,
            });
        }
        log::debug!("{attempt} rejected");
    }
    Err(Error::NoContext {
        attempts: attempts.len(),
    })
}

/// A GLFW window together with its event receiver.
pub struct GlfwSurface {
    /// The window owning the GL context.
    pub window: glfw::PWindow,
    /// Event stream for [`window`](Self::window).
    pub events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// [`SurfaceFactory`] backed by GLFW window hints.
pub struct GlfwFactory<'a> {
    glfw: &'a mut glfw::Glfw,
}

impl<'a> GlfwFactory<'a> {
    /// Wrap an initialized GLFW instance.
    pub fn new(glfw: &'a mut glfw::Glfw) -> Self {
        Self { glfw }
    }
}

impl SurfaceFactory for GlfwFactory<'_> {
    type Surface = GlfwSurface;

    fn try_create(
        &mut self,
        attempt: &ContextAttempt,
        [width, height]: [u32; 2],
        title: &str,
    ) -> Option<GlfwSurface> {
        use glfw::WindowHint;

        self.glfw.default_window_hints();
        self.glfw
            .window_hint(WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        self.glfw
            .window_hint(WindowHint::ContextVersionMajor(attempt.major));
        self.glfw
            .window_hint(WindowHint::ContextVersionMinor(attempt.minor));
        if attempt.core_profile {
            self.glfw
                .window_hint(WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        }
        self.glfw.window_hint(WindowHint::DepthBits(Some(24)));
        self.glfw.window_hint(WindowHint::StencilBits(Some(8)));
        self.glfw.window_hint(WindowHint::Samples(Some(0)));

        let (window, events) =
            self.glfw
                .create_window(width, height, title, glfw::WindowMode::Windowed)?;
        Some(GlfwSurface { window, events })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Succeeds only for attempts whose GLSL level is in `accept`.
    struct FakeFactory {
        accept: Vec<u32>,
        seen: Vec<ContextAttempt>,
    }

    impl FakeFactory {
        fn accepting(accept: &[u32]) -> Self {
            Self {
                accept: accept.to_vec(),
                seen: Vec::new(),
            }
        }
    }

    impl SurfaceFactory for FakeFactory {
        type Surface = (u32, u32);

        fn try_create(
            &mut self,
            attempt: &ContextAttempt,
            _size: [u32; 2],
            _title: &str,
        ) -> Option<(u32, u32)> {
            self.seen.push(*attempt);
            self.accept
                .contains(&attempt.glsl)
                .then_some((attempt.major, attempt.minor))
        }
    }

    #[test]
    fn first_success_wins() {
        let mut factory = FakeFactory::accepting(&[330, 130, 120]);
        let negotiated = negotiate(&mut factory, [1280, 720], "t").unwrap();
        assert_eq!(negotiated.attempt, CONTEXT_ATTEMPTS[0]);
        assert_eq!(negotiated.dialect, Dialect::Glsl330);
        assert_eq!(factory.seen.len(), 1);
    }

    #[test]
    fn falls_back_in_order_to_oldest_tier() {
        let mut factory = FakeFactory::accepting(&[120]);
        let negotiated = negotiate(&mut factory, [1280, 720], "t").unwrap();
        assert_eq!(factory.seen, CONTEXT_ATTEMPTS);
        assert_eq!(negotiated.attempt, CONTEXT_ATTEMPTS[3]);
        assert_eq!(negotiated.dialect, Dialect::Glsl120);
        assert_eq!(negotiated.surface, (2, 1));
    }

    #[test]
    fn middle_tier_stops_the_walk() {
        let mut factory = FakeFactory::accepting(&[130]);
        let negotiated = negotiate(&mut factory, [1280, 720], "t").unwrap();
        assert_eq!(factory.seen, CONTEXT_ATTEMPTS[..3]);
        assert_eq!(negotiated.dialect, Dialect::Glsl130);
    }

    #[test]
    fn exhausting_the_list_is_an_error() {
        let mut factory = FakeFactory::accepting(&[]);
        let err = negotiate(&mut factory, [1280, 720], "t").unwrap_err();
        assert!(matches!(err, Error::NoContext { attempts: 4 }));
        assert_eq!(factory.seen, CONTEXT_ATTEMPTS);
    }

    #[test]
    fn attempts_without_a_dialect_are_never_tried() {
        let legacy = ContextAttempt {
            major: 1,
            minor: 5,
            core_profile: false,
            glsl: 100,
        };
        let mut factory = FakeFactory::accepting(&[100, 120]);
        let attempts = [legacy, CONTEXT_ATTEMPTS[3]];
        let negotiated = negotiate_with(&mut factory, &attempts, [1, 1], "t").unwrap();
        assert_eq!(factory.seen, [CONTEXT_ATTEMPTS[3]]);
        assert_eq!(negotiated.dialect, Dialect::Glsl120);
    }
}
