/// Managed GPU buffer.
///
/// A Buffer owns one backend buffer handle, remembers the target it was
/// created for and the size of its data store so uploads can reuse the
/// existing allocation when the size does not change.

use crate::backend::{BackendHandle, INVALID_HANDLE};
use crate::error::{Error, ErrorKind};
use crate::version::GlVersion;

// ===== BUFFER TARGET =====

/// Binding point a buffer is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    AtomicCounter,
    CopyRead,
    CopyWrite,
    DispatchIndirect,
    DrawIndirect,
    ElementArray,
    PixelPack,
    PixelUnpack,
    Query,
    ShaderStorage,
    Texture,
    TransformFeedback,
    Uniform,
}

impl BufferTarget {
    /// API enum value
    pub fn as_raw(self) -> u32 {
        match self {
            BufferTarget::Array => 0x8892,
            BufferTarget::AtomicCounter => 0x92C0,
            BufferTarget::CopyRead => 0x8F36,
            BufferTarget::CopyWrite => 0x8F37,
            BufferTarget::DispatchIndirect => 0x90EE,
            BufferTarget::DrawIndirect => 0x8F3F,
            BufferTarget::ElementArray => 0x8893,
            BufferTarget::PixelPack => 0x88EB,
            BufferTarget::PixelUnpack => 0x88EC,
            BufferTarget::Query => 0x9192,
            BufferTarget::ShaderStorage => 0x90D2,
            BufferTarget::Texture => 0x8C2A,
            BufferTarget::TransformFeedback => 0x8C8E,
            BufferTarget::Uniform => 0x8A11,
        }
    }

    /// Oldest OpenGL version exposing this target
    pub fn min_version(self) -> GlVersion {
        let raw = match self {
            BufferTarget::CopyRead
            | BufferTarget::CopyWrite
            | BufferTarget::Uniform
            | BufferTarget::Texture => 310,
            BufferTarget::AtomicCounter => 420,
            BufferTarget::DispatchIndirect | BufferTarget::ShaderStorage => 430,
            BufferTarget::Query => 440,
            BufferTarget::DrawIndirect => 400,
            BufferTarget::TransformFeedback => 300,
            BufferTarget::Array
            | BufferTarget::ElementArray
            | BufferTarget::PixelPack
            | BufferTarget::PixelUnpack => 200,
        };
        GlVersion::from_raw_unchecked(raw)
    }
}

impl TryFrom<u32> for BufferTarget {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Error> {
        Ok(match raw {
            0x8892 => BufferTarget::Array,
            0x92C0 => BufferTarget::AtomicCounter,
            0x8F36 => BufferTarget::CopyRead,
            0x8F37 => BufferTarget::CopyWrite,
            0x90EE => BufferTarget::DispatchIndirect,
            0x8F3F => BufferTarget::DrawIndirect,
            0x8893 => BufferTarget::ElementArray,
            0x88EB => BufferTarget::PixelPack,
            0x88EC => BufferTarget::PixelUnpack,
            0x9192 => BufferTarget::Query,
            0x90D2 => BufferTarget::ShaderStorage,
            0x8C2A => BufferTarget::Texture,
            0x8C8E => BufferTarget::TransformFeedback,
            0x8A11 => BufferTarget::Uniform,
            _ => {
                return Err(Error::new(
                    ErrorKind::UnsupportedType,
                    format!("BufferTarget: unknown target 0x{:04X}", raw),
                ))
            }
        })
    }
}

// ===== BUFFER USAGE =====

/// Expected access pattern of a buffer's data store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StreamDraw,
    StreamRead,
    StreamCopy,
    StaticDraw,
    StaticRead,
    StaticCopy,
    DynamicDraw,
    DynamicRead,
    DynamicCopy,
}

impl BufferUsage {
    /// API enum value
    pub fn as_raw(self) -> u32 {
        match self {
            BufferUsage::StreamDraw => 0x88E0,
            BufferUsage::StreamRead => 0x88E1,
            BufferUsage::StreamCopy => 0x88E2,
            BufferUsage::StaticDraw => 0x88E4,
            BufferUsage::StaticRead => 0x88E5,
            BufferUsage::StaticCopy => 0x88E6,
            BufferUsage::DynamicDraw => 0x88E8,
            BufferUsage::DynamicRead => 0x88E9,
            BufferUsage::DynamicCopy => 0x88EA,
        }
    }
}

impl TryFrom<u32> for BufferUsage {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Error> {
        Ok(match raw {
            0x88E0 => BufferUsage::StreamDraw,
            0x88E1 => BufferUsage::StreamRead,
            0x88E2 => BufferUsage::StreamCopy,
            0x88E4 => BufferUsage::StaticDraw,
            0x88E5 => BufferUsage::StaticRead,
            0x88E6 => BufferUsage::StaticCopy,
            0x88E8 => BufferUsage::DynamicDraw,
            0x88E9 => BufferUsage::DynamicRead,
            0x88EA => BufferUsage::DynamicCopy,
            _ => {
                return Err(Error::new(
                    ErrorKind::BufferInvalid,
                    format!("BufferUsage: unknown usage 0x{:04X}", raw),
                ))
            }
        })
    }
}

// ===== UPLOAD PLAN =====

/// How a data upload reaches the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Allocate a new data store
    Full,
    /// Overwrite the existing store from offset 0
    Sub,
}

// ===== BUFFER =====

/// Managed buffer object
#[derive(Debug)]
pub struct Buffer {
    handle: BackendHandle,
    target: BufferTarget,
    usage: Option<BufferUsage>,
    data_size: Option<usize>,
}

impl Buffer {
    pub(crate) fn new(handle: BackendHandle, target: BufferTarget) -> Self {
        Self {
            handle,
            target,
            usage: None,
            data_size: None,
        }
    }

    pub fn handle(&self) -> BackendHandle {
        self.handle
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// Usage of the last upload
    pub fn usage(&self) -> Option<BufferUsage> {
        self.usage
    }

    /// Size of the allocated data store, `None` if nothing was uploaded yet
    pub fn data_size(&self) -> Option<usize> {
        self.data_size
    }

    /// Decide how an upload of `len` bytes must be performed
    pub(crate) fn plan_upload(&self, len: usize) -> UploadKind {
        match self.data_size {
            Some(size) if size == len => UploadKind::Sub,
            _ => UploadKind::Full,
        }
    }

    pub(crate) fn record_upload(&mut self, len: usize, usage: BufferUsage) {
        self.data_size = Some(len);
        self.usage = Some(usage);
    }

    /// Invalidate the handle and hand back the one to release
    pub(crate) fn take_handle(&mut self) -> BackendHandle {
        std::mem::replace(&mut self.handle, INVALID_HANDLE)
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
