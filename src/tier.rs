//! Capability tiers: the GL version/profile combinations we are willing to
//! run on and the shading-language dialect each one maps to.

use std::fmt;

/// Shading-language dialect, ordered from oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dialect {
    /// GLSL 1.20: `attribute`/`varying`, implicit `gl_FragColor`.
    Glsl120,
    /// GLSL 1.30: `in`/`out`, explicit fragment output, no layout qualifiers.
    Glsl130,
    /// GLSL 3.30 core: `layout(location = N)` on vertex inputs.
    Glsl330,
}

impl Dialect {
    /// All dialects, newest first.
    pub const ALL: [Dialect; 3] = [Dialect::Glsl330, Dialect::Glsl130, Dialect::Glsl120];

    /// The `#version` number.
    #[must_use]
    pub fn version(self) -> u32 {
        match self {
            Dialect::Glsl120 => 120,
            Dialect::Glsl130 => 130,
            Dialect::Glsl330 => 330,
        }
    }

    /// Short name, used for shader directory lookup.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Dialect::Glsl120 => "glsl120",
            Dialect::Glsl130 => "glsl130",
            Dialect::Glsl330 => "glsl330",
        }
    }

    /// Whether vertex inputs can carry `layout(location = N)`.
    #[must_use]
    pub fn has_layout_qualifiers(self) -> bool {
        self >= Dialect::Glsl330
    }

    /// Whether the fragment stage declares its own output variable instead of
    /// writing `gl_FragColor`.
    #[must_use]
    pub fn has_fragment_outputs(self) -> bool {
        self >= Dialect::Glsl130
    }

    /// The newest dialect whose version does not exceed `max_version`.
    #[must_use]
    pub fn for_glsl_version(max_version: u32) -> Option<Dialect> {
        Self::ALL.into_iter().find(|d| d.version() <= max_version)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GLSL {}", self.version())
    }
}

/// One entry in the context negotiation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAttempt {
    /// Requested GL major version.
    pub major: u32,
    /// Requested GL minor version.
    pub minor: u32,
    /// Request a core profile (otherwise the driver default).
    pub core_profile: bool,
    /// Highest GLSL version guaranteed by this GL version.
    pub glsl: u32,
}

impl ContextAttempt {
    /// The dialect to compile against if this attempt succeeds.
    ///
    /// Every entry in [`CONTEXT_ATTEMPTS`] maps to a dialect; a hand-built
    /// attempt below GLSL 1.20 does not.
    #[must_use]
    pub fn dialect(&self) -> Option<Dialect> {
        Dialect::for_glsl_version(self.glsl)
    }
}

impl fmt::Display for ContextAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = if self.core_profile { "core" } else { "compat" };
        write!(f, "OpenGL {}.{} {profile}", self.major, self.minor)
    }
}

/// Negotiation order, most capable first.
pub const CONTEXT_ATTEMPTS: [ContextAttempt; 4] = [
    ContextAttempt { major: 3, minor: 3, core_profile: true, glsl: 330 },
    ContextAttempt { major: 3, minor: 3, core_profile: false, glsl: 330 },
    ContextAttempt { major: 3, minor: 0, core_profile: false, glsl: 130 },
    ContextAttempt { major: 2, minor: 1, core_profile: false, glsl: 120 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_picks_newest_not_exceeding() {
        assert_eq!(Dialect::for_glsl_version(330), Some(Dialect::Glsl330));
        assert_eq!(Dialect::for_glsl_version(450), Some(Dialect::Glsl330));
        assert_eq!(Dialect::for_glsl_version(150), Some(Dialect::Glsl130));
        assert_eq!(Dialect::for_glsl_version(130), Some(Dialect::Glsl130));
        assert_eq!(Dialect::for_glsl_version(120), Some(Dialect::Glsl120));
        assert_eq!(Dialect::for_glsl_version(110), None);
    }

    #[test]
    fn attempts_are_ordered_most_capable_first() {
        let dialects: Vec<_> = CONTEXT_ATTEMPTS.iter().map(|a| a.dialect()).collect();
        assert_eq!(
            dialects,
            [
                Some(Dialect::Glsl330),
                Some(Dialect::Glsl330),
                Some(Dialect::Glsl130),
                Some(Dialect::Glsl120),
            ]
        );
        assert!(CONTEXT_ATTEMPTS[0].core_profile);
        assert!(CONTEXT_ATTEMPTS[1..].iter().all(|a| !a.core_profile));
    }

    #[test]
    fn only_glsl330_has_layout_qualifiers() {
        assert!(Dialect::Glsl330.has_layout_qualifiers());
        assert!(!Dialect::Glsl130.has_layout_qualifiers());
        assert!(!Dialect::Glsl120.has_layout_qualifiers());
        assert!(Dialect::Glsl130.has_fragment_outputs());
        assert!(!Dialect::Glsl120.has_fragment_outputs());
    }

    #[test]
    fn attempt_display() {
        assert_eq!(CONTEXT_ATTEMPTS[0].to_string(), "OpenGL 3.3 core");
        assert_eq!(CONTEXT_ATTEMPTS[3].to_string(), "OpenGL 2.1 compat");
    }
}
