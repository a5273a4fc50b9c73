//! Error types for Orion GL
//!
//! Every failure the library can raise maps onto one entry of a fixed
//! taxonomy ([`ErrorKind`]). The taxonomy owns the code, the human message
//! and the label; nothing else in the crate spells them out.

use std::fmt;

/// Result type for Orion GL operations
pub type Result<T> = std::result::Result<T, Error>;

/// The fixed error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A call-once function was called a second time
    MultipleCalls,
    /// Malformed or nonexistent OpenGL version
    GlInvalidVersion,
    /// OpenGL version newer than 4.6
    GlAboveMax,
    /// OpenGL version older than 1.1
    GlBelowMin,
    /// Library used before `initialise`
    NotInitialised,
    /// A required argument was null
    NullReceived,
    /// The windowing/integration layer reported an unrecoverable error
    GlfwFail,
    /// The operation needs a newer OpenGL version than the one negotiated
    GlVersionTooLow,
    /// The graphics backend could not be loaded or failed to allocate
    GlFail,
    /// A debug context was enabled twice
    MultipleDebug,
    /// A required operation was refused
    AccessDenied,
    /// A resource that does not exist (anymore) was accessed
    AccessPhantom,
    /// An enum value outside the supported set
    UnsupportedType,
    /// An invalid usage given to a buffer
    BufferInvalid,
}

impl ErrorKind {
    /// All taxonomy entries, in code order.
    pub const ALL: [ErrorKind; 14] = [
        ErrorKind::MultipleCalls,
        ErrorKind::GlInvalidVersion,
        ErrorKind::GlAboveMax,
        ErrorKind::GlBelowMin,
        ErrorKind::NotInitialised,
        ErrorKind::NullReceived,
        ErrorKind::GlfwFail,
        ErrorKind::GlVersionTooLow,
        ErrorKind::GlFail,
        ErrorKind::MultipleDebug,
        ErrorKind::AccessDenied,
        ErrorKind::AccessPhantom,
        ErrorKind::UnsupportedType,
        ErrorKind::BufferInvalid,
    ];

    fn entry(self) -> (u16, &'static str, &'static str) {
        match self {
            ErrorKind::MultipleCalls => (
                0x001,
                "Illegal call of function that has already been called; this function can not be called more than once.",
                "ORERR_MULTIPLE_CALLS",
            ),
            ErrorKind::GlInvalidVersion => (
                0x002,
                "Attempted to load invalid OpenGL version.",
                "ORERR_GL_INVALID_VERS",
            ),
            ErrorKind::GlAboveMax => (
                0x003,
                "Attempted to load invalid OpenGL version; maximum OpenGL version supported by Orion is 4.6.",
                "ORERR_GL_ABOVE_MAX",
            ),
            ErrorKind::GlBelowMin => (
                0x004,
                "Attempted to load invalid OpenGL version; versions earlier than 1.1 are not supported by Orion.",
                "ORERR_GL_BELOW_MIN",
            ),
            ErrorKind::NotInitialised => (
                0x005,
                "A function was called that requires Orion to be initialised, but Orion has not been initialised!",
                "ORERR_NOT_INIT",
            ),
            ErrorKind::NullReceived => (
                0x006,
                "A function received NULL but it was not able to accept this argument.",
                "ORERR_NULL_RECIEVED",
            ),
            ErrorKind::GlfwFail => (
                0x007,
                "The windowing layer sent an error and Orion failed to recover.",
                "ORERR_GLFW_FAIL",
            ),
            ErrorKind::GlVersionTooLow => (
                0x008,
                "A function was called that requires OpenGL to be of a higher version than was specified.",
                "ORERR_GL_VERS_TOO_LOW",
            ),
            ErrorKind::GlFail => (
                0x009,
                "Failed to load OpenGL.",
                "ORERR_GL_FAIL",
            ),
            ErrorKind::MultipleDebug => (
                0x00A,
                "Illegal attempt to enable a debug context after a debug context has already been enabled.",
                "ORERR_MULTIPLE_DEBUG",
            ),
            ErrorKind::AccessDenied => (
                0x00B,
                "Couldn't execute a necessary function; access denied.",
                "ORERR_ACCESS_DENIED",
            ),
            ErrorKind::AccessPhantom => (
                0x00C,
                "Attempted to access resource that didn't exist.",
                "ORERR_ACCESS_PHANTOM",
            ),
            ErrorKind::UnsupportedType => (
                0x00D,
                "Unsupported type given to function",
                "ORERR_UNSUPPORTED_TYPE",
            ),
            ErrorKind::BufferInvalid => (
                0x00E,
                "Invalid type given to buffer",
                "ORERR_BUFFER_INVALID",
            ),
        }
    }

    /// Numeric code
    pub fn code(self) -> u16 {
        self.entry().0
    }

    /// Fixed human-readable message
    pub fn message(self) -> &'static str {
        self.entry().1
    }

    /// Label (e.g. `ORERR_NOT_INIT`)
    pub fn label(self) -> &'static str {
        self.entry().2
    }
}

/// Orion GL error
///
/// `context` names the failing call and, when useful, extra detail
/// (e.g. `"create_buffer: target ShaderStorage needs OpenGL 4.3"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    context: String,
}

impl Error {
    /// Create a new error of the given kind
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }

    /// Taxonomy entry of this error
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Failing call and detail
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Shorthand for `self.kind().code()`
    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    /// Shorthand for `self.kind().label()`
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error code 0x{:03X} ({}) in `{}`: {}",
            self.kind.code(),
            self.kind.label(),
            self.context,
            self.kind.message()
        )
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error`] from a kind and a formatted context
///
/// # Example
///
/// ```
/// use orion_gl::orion_err;
/// use orion_gl::orion::ErrorKind;
///
/// let err = orion_err!(ErrorKind::AccessPhantom, "bind_buffer: key {}", 3);
/// assert_eq!(err.kind(), ErrorKind::AccessPhantom);
/// ```
#[macro_export]
macro_rules! orion_err {
    ($kind:expr, $($arg:tt)*) => {
        $crate::orion::Error::new($kind, format!($($arg)*))
    };
}

/// Return early with an [`Error`] built like [`orion_err!`]
#[macro_export]
macro_rules! orion_bail {
    ($kind:expr, $($arg:tt)*) => {
        return Err($crate::orion_err!($kind, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
