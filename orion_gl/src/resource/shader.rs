/// Managed shader program, shader stages and compile outcomes.
///
/// A Shader is a program object assembled from compiled stages. Stage
/// compilation is the one soft-fail path of the library: a bad source
/// yields a [`CompileOutcome::Failed`] carrying the backend's info log
/// instead of an error, and the caller decides what to assemble instead.

use crate::backend::{BackendHandle, INVALID_HANDLE};
use crate::error::{Error, ErrorKind};
use crate::resource::uniform::UniformCache;
use crate::version::GlVersion;

// ===== SHADER STAGE =====

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    /// API enum value
    pub fn as_raw(self) -> u32 {
        match self {
            ShaderStage::Vertex => 0x8B31,
            ShaderStage::Fragment => 0x8B30,
            ShaderStage::Geometry => 0x8DD9,
            ShaderStage::TessControl => 0x8E88,
            ShaderStage::TessEvaluation => 0x8E87,
            ShaderStage::Compute => 0x91B9,
        }
    }

    /// Oldest OpenGL version exposing this stage
    pub fn min_version(self) -> GlVersion {
        let raw = match self {
            ShaderStage::Vertex | ShaderStage::Fragment => 200,
            ShaderStage::Geometry => 320,
            ShaderStage::TessControl | ShaderStage::TessEvaluation => 400,
            ShaderStage::Compute => 430,
        };
        GlVersion::from_raw_unchecked(raw)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Compute => "compute",
        }
    }
}

impl TryFrom<u32> for ShaderStage {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Error> {
        Ok(match raw {
            0x8B31 => ShaderStage::Vertex,
            0x8B30 => ShaderStage::Fragment,
            0x8DD9 => ShaderStage::Geometry,
            0x8E88 => ShaderStage::TessControl,
            0x8E87 => ShaderStage::TessEvaluation,
            0x91B9 => ShaderStage::Compute,
            _ => {
                return Err(Error::new(
                    ErrorKind::UnsupportedType,
                    format!("ShaderStage: unknown stage 0x{:04X}", raw),
                ))
            }
        })
    }
}

// ===== COMPILE OUTCOME =====

/// A successfully compiled stage object, not yet attached to a program
///
/// Not `Clone`: it is consumed by `add_compiled_stage` or `discard_stage`.
#[derive(Debug, PartialEq, Eq)]
pub struct CompiledStage {
    stage: ShaderStage,
    handle: BackendHandle,
}

impl CompiledStage {
    pub(crate) fn new(stage: ShaderStage, handle: BackendHandle) -> Self {
        Self { stage, handle }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn handle(&self) -> BackendHandle {
        self.handle
    }
}

/// Compilation failure; the stage object has already been released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    pub stage: ShaderStage,
    /// Backend info log
    pub log: String,
}

/// Result of compiling one stage
#[derive(Debug, PartialEq, Eq)]
pub enum CompileOutcome {
    Compiled(CompiledStage),
    Failed(CompileFailure),
}

impl CompileOutcome {
    pub fn is_compiled(&self) -> bool {
        matches!(self, CompileOutcome::Compiled(_))
    }

    /// The compiled stage, `None` on failure
    pub fn compiled(self) -> Option<CompiledStage> {
        match self {
            CompileOutcome::Compiled(stage) => Some(stage),
            CompileOutcome::Failed(_) => None,
        }
    }
}

// ===== SHADER =====

/// Managed program object
#[derive(Debug)]
pub struct Shader {
    handle: BackendHandle,
    uniform_cache: UniformCache,
    linked: bool,
    attached_stages: Vec<ShaderStage>,
}

impl Shader {
    pub(crate) fn new(handle: BackendHandle) -> Self {
        Self {
            handle,
            uniform_cache: UniformCache::new(),
            linked: false,
            attached_stages: Vec::new(),
        }
    }

    /// Program objects arrived with OpenGL 2.0
    pub fn min_version() -> GlVersion {
        GlVersion::from_raw_unchecked(200)
    }

    pub fn handle(&self) -> BackendHandle {
        self.handle
    }

    /// Whether the last link succeeded
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Stages attached so far, in attach order
    pub fn attached_stages(&self) -> &[ShaderStage] {
        &self.attached_stages
    }

    pub fn uniform_cache(&self) -> &UniformCache {
        &self.uniform_cache
    }

    pub(crate) fn uniform_cache_mut(&mut self) -> &mut UniformCache {
        &mut self.uniform_cache
    }

    /// Relinking is refused once a uniform location has been served
    pub(crate) fn can_relink(&self) -> bool {
        self.uniform_cache.is_empty()
    }

    pub(crate) fn record_link(&mut self, stage: ShaderStage, linked: bool) {
        self.attached_stages.push(stage);
        self.linked = linked;
    }

    pub(crate) fn take_handle(&mut self) -> BackendHandle {
        std::mem::replace(&mut self.handle, INVALID_HANDLE)
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
