/// OpenGL version and profile negotiated at `initialise`

use std::fmt;
use crate::error::{ErrorKind, Result};
use crate::orion_bail;

/// Validated OpenGL version, encoded as `major * 100 + minor * 10`
/// (`460` is 4.6). `121` stands for 1.2.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlVersion(u32);

impl GlVersion {
    /// Oldest supported version (1.1)
    pub const MIN: GlVersion = GlVersion(110);
    /// Newest supported version (4.6)
    pub const MAX: GlVersion = GlVersion(460);

    /// Validate an encoded version number
    ///
    /// Checks run in a fixed order so that a given bad value always yields
    /// the same error: malformed encoding, zero, above 4.6, below 1.1, then
    /// the gaps between real releases (1.6-1.9, 2.2-2.9, 3.4-3.9).
    pub fn parse(version: u32) -> Result<Self> {
        if version % 10 != 0 && version != 121 {
            orion_bail!(ErrorKind::GlInvalidVersion, "initialise: {} is not a valid version encoding", version);
        }
        if version == 0 {
            orion_bail!(ErrorKind::NullReceived, "initialise: version is 0");
        }
        if version > Self::MAX.0 {
            orion_bail!(ErrorKind::GlAboveMax, "initialise: {}", version);
        }
        if version < Self::MIN.0 {
            orion_bail!(ErrorKind::GlBelowMin, "initialise: {}", version);
        }
        if (151..200).contains(&version)
            || (211..300).contains(&version)
            || (331..400).contains(&version)
        {
            orion_bail!(ErrorKind::GlInvalidVersion, "initialise: OpenGL {} was never released", version);
        }
        Ok(Self(version))
    }

    /// Const constructor for versions known to be valid (internal tables)
    pub(crate) const fn from_raw_unchecked(version: u32) -> Self {
        Self(version)
    }

    /// Encoded value
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Major version number
    pub fn major(self) -> u32 {
        self.0 / 100
    }

    /// Minor version number
    pub fn minor(self) -> u32 {
        (self.0 / 10) % 10
    }

    /// Whether direct state access (4.5+) is available
    pub fn has_dsa(self) -> bool {
        self.0 >= 450
    }

    /// Whether the debug output extension is core (4.3+)
    pub fn has_debug_output(self) -> bool {
        self.0 >= 430
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 121 {
            write!(f, "1.2.1")
        } else {
            write!(f, "{}.{}", self.major(), self.minor())
        }
    }
}

/// OpenGL context profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlProfile {
    /// Core profile (deprecated functionality removed)
    Core,
    /// Compatibility profile
    Compatibility,
    /// No specific profile requested
    Any,
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
