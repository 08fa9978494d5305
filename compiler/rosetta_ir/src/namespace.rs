//! Global library namespaces.

use std::fmt;

/// Namespace of a global library call such as `io.read_file` or `math.sin`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Namespace {
    /// Bare global functions (`exit`, `wat`).
    Global,
    Io,
    Http,
    Math,
    Regexp,
    /// Process arguments and environment.
    System,
}

impl Namespace {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Io => "io",
            Self::Http => "http",
            Self::Math => "math",
            Self::Regexp => "regexp",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
