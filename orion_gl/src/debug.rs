//! Debug output filtering
//!
//! The backend reports debug events with raw API ids. A [`DebugFilter`],
//! configured once per context, decides which of them reach the
//! application's debug-message callback. Dropped events vanish silently;
//! nothing here is ever fatal.

use std::sync::Arc;
use rustc_hash::FxHashSet;

/// API value meaning "any source/type/severity"
pub const DONT_CARE: u32 = 0x1100;

/// Callback a backend invokes for every debug event
pub type DebugHook = Arc<dyn Fn(&DebugMessage) + Send + Sync>;

/// Origin of a debug message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugSource {
    Api,
    WindowSystem,
    ShaderCompiler,
    ThirdParty,
    Application,
    Other,
}

impl DebugSource {
    /// API enum value
    pub fn as_raw(self) -> u32 {
        match self {
            DebugSource::Api => 0x8246,
            DebugSource::WindowSystem => 0x8247,
            DebugSource::ShaderCompiler => 0x8248,
            DebugSource::ThirdParty => 0x8249,
            DebugSource::Application => 0x824A,
            DebugSource::Other => 0x824B,
        }
    }

    /// Map an API enum value back, `None` if unknown
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x8246 => Some(DebugSource::Api),
            0x8247 => Some(DebugSource::WindowSystem),
            0x8248 => Some(DebugSource::ShaderCompiler),
            0x8249 => Some(DebugSource::ThirdParty),
            0x824A => Some(DebugSource::Application),
            0x824B => Some(DebugSource::Other),
            _ => None,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            DebugSource::Api => "API",
            DebugSource::WindowSystem => "WINDOW_SYSTEM",
            DebugSource::ShaderCompiler => "SHADER_COMPILER",
            DebugSource::ThirdParty => "THIRD_PARTY",
            DebugSource::Application => "APPLICATION",
            DebugSource::Other => "OTHER",
        }
    }
}

/// Category of a debug message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugType {
    Error,
    DeprecatedBehaviour,
    UndefinedBehaviour,
    Portability,
    Performance,
    Marker,
    PushGroup,
    PopGroup,
    Other,
}

impl DebugType {
    /// API enum value
    pub fn as_raw(self) -> u32 {
        match self {
            DebugType::Error => 0x824C,
            DebugType::DeprecatedBehaviour => 0x824D,
            DebugType::UndefinedBehaviour => 0x824E,
            DebugType::Portability => 0x824F,
            DebugType::Performance => 0x8250,
            DebugType::Other => 0x8251,
            DebugType::Marker => 0x8268,
            DebugType::PushGroup => 0x8269,
            DebugType::PopGroup => 0x826A,
        }
    }

    /// Map an API enum value back, `None` if unknown
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x824C => Some(DebugType::Error),
            0x824D => Some(DebugType::DeprecatedBehaviour),
            0x824E => Some(DebugType::UndefinedBehaviour),
            0x824F => Some(DebugType::Portability),
            0x8250 => Some(DebugType::Performance),
            0x8251 => Some(DebugType::Other),
            0x8268 => Some(DebugType::Marker),
            0x8269 => Some(DebugType::PushGroup),
            0x826A => Some(DebugType::PopGroup),
            _ => None,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            DebugType::Error => "ERROR",
            DebugType::DeprecatedBehaviour => "DEPRECATED_BEHAVIOUR",
            DebugType::UndefinedBehaviour => "UNDEFINED_BEHAVIOUR",
            DebugType::Portability => "PORTABILITY",
            DebugType::Performance => "PERFORMANCE",
            DebugType::Marker => "MARKER",
            DebugType::PushGroup => "PUSH_GROUP",
            DebugType::PopGroup => "POP_GROUP",
            DebugType::Other => "OTHER",
        }
    }
}

/// Severity of a debug message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugSeverity {
    High,
    Medium,
    Low,
    Notification,
}

impl DebugSeverity {
    /// API enum value
    pub fn as_raw(self) -> u32 {
        match self {
            DebugSeverity::High => 0x9146,
            DebugSeverity::Medium => 0x9147,
            DebugSeverity::Low => 0x9148,
            DebugSeverity::Notification => 0x826B,
        }
    }

    /// Map an API enum value back, `None` if unknown
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x9146 => Some(DebugSeverity::High),
            0x9147 => Some(DebugSeverity::Medium),
            0x9148 => Some(DebugSeverity::Low),
            0x826B => Some(DebugSeverity::Notification),
            _ => None,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            DebugSeverity::High => "HIGH",
            DebugSeverity::Medium => "MEDIUM",
            DebugSeverity::Low => "LOW",
            DebugSeverity::Notification => "NOTIFICATION",
        }
    }
}

/// One debug event as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugMessage {
    /// Raw source id
    pub source: u32,
    /// Raw type id
    pub kind: u32,
    /// Implementation-defined message id
    pub id: u32,
    /// Raw severity id
    pub severity: u32,
    /// Message text
    pub text: String,
}

impl DebugMessage {
    /// Typed source, `None` for ids outside the API set
    pub fn source(&self) -> Option<DebugSource> {
        DebugSource::from_raw(self.source)
    }

    /// Typed category
    pub fn kind(&self) -> Option<DebugType> {
        DebugType::from_raw(self.kind)
    }

    /// Typed severity
    pub fn severity(&self) -> Option<DebugSeverity> {
        DebugSeverity::from_raw(self.severity)
    }
}

/// Filter criteria passed to `enable_debug_context`
///
/// `None` criteria match anything.
#[derive(Debug, Clone, Default)]
pub struct DebugFilterConfig {
    pub source: Option<DebugSource>,
    pub kind: Option<DebugType>,
    pub severity: Option<DebugSeverity>,
    /// When false, nothing is forwarded
    pub enabled: bool,
    /// Message ids that are never forwarded
    pub suppressed_ids: Vec<u32>,
}

/// Write-once debug filter
#[derive(Debug, Clone)]
pub struct DebugFilter {
    source: Option<DebugSource>,
    kind: Option<DebugType>,
    severity: Option<DebugSeverity>,
    enabled: bool,
    suppressed_ids: FxHashSet<u32>,
}

impl DebugFilter {
    /// Freeze a configuration into a filter
    pub fn new(config: DebugFilterConfig) -> Self {
        Self {
            source: config.source,
            kind: config.kind,
            severity: config.severity,
            enabled: config.enabled,
            suppressed_ids: config.suppressed_ids.into_iter().collect(),
        }
    }

    /// Whether `message` must reach the debug-message callback
    pub fn accepts(&self, message: &DebugMessage) -> bool {
        self.enabled
            && self.source.map_or(true, |s| s.as_raw() == message.source)
            && self.kind.map_or(true, |k| k.as_raw() == message.kind)
            && self.severity.map_or(true, |s| s.as_raw() == message.severity)
            && !self.suppressed_ids.contains(&message.id)
    }

    /// Raw source criterion (`DONT_CARE` when unset)
    pub fn raw_source(&self) -> u32 {
        self.source.map_or(DONT_CARE, DebugSource::as_raw)
    }

    /// Raw type criterion (`DONT_CARE` when unset)
    pub fn raw_kind(&self) -> u32 {
        self.kind.map_or(DONT_CARE, DebugType::as_raw)
    }

    /// Raw severity criterion (`DONT_CARE` when unset)
    pub fn raw_severity(&self) -> u32 {
        self.severity.map_or(DONT_CARE, DebugSeverity::as_raw)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Suppressed ids, sorted
    pub fn suppressed_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.suppressed_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_suppressed(&self, id: u32) -> bool {
        self.suppressed_ids.contains(&id)
    }
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
