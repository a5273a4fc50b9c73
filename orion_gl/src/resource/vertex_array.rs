/// Managed vertex array and vertex attribute layout.

use crate::backend::{BackendHandle, INVALID_HANDLE};
use crate::error::{Error, ErrorKind, Result};
use crate::orion_bail;
use crate::version::GlVersion;

// ===== ATTRIBUTE TYPE =====

/// Component type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
    Double,
    HalfFloat,
    Fixed,
}

impl VertexAttribType {
    /// API enum value
    pub fn as_raw(self) -> u32 {
        match self {
            VertexAttribType::Byte => 0x1400,
            VertexAttribType::UnsignedByte => 0x1401,
            VertexAttribType::Short => 0x1402,
            VertexAttribType::UnsignedShort => 0x1403,
            VertexAttribType::Int => 0x1404,
            VertexAttribType::UnsignedInt => 0x1405,
            VertexAttribType::Float => 0x1406,
            VertexAttribType::Double => 0x140A,
            VertexAttribType::HalfFloat => 0x140B,
            VertexAttribType::Fixed => 0x140C,
        }
    }

    /// Size of one component in bytes
    pub fn size_bytes(self) -> usize {
        match self {
            VertexAttribType::Byte | VertexAttribType::UnsignedByte => 1,
            VertexAttribType::Short
            | VertexAttribType::UnsignedShort
            | VertexAttribType::HalfFloat => 2,
            VertexAttribType::Int
            | VertexAttribType::UnsignedInt
            | VertexAttribType::Float
            | VertexAttribType::Fixed => 4,
            VertexAttribType::Double => 8,
        }
    }
}

impl TryFrom<u32> for VertexAttribType {
    type Error = Error;

    fn try_from(raw: u32) -> std::result::Result<Self, Error> {
        Ok(match raw {
            0x1400 => VertexAttribType::Byte,
            0x1401 => VertexAttribType::UnsignedByte,
            0x1402 => VertexAttribType::Short,
            0x1403 => VertexAttribType::UnsignedShort,
            0x1404 => VertexAttribType::Int,
            0x1405 => VertexAttribType::UnsignedInt,
            0x1406 => VertexAttribType::Float,
            0x140A => VertexAttribType::Double,
            0x140B => VertexAttribType::HalfFloat,
            0x140C => VertexAttribType::Fixed,
            _ => {
                return Err(Error::new(
                    ErrorKind::UnsupportedType,
                    format!("VertexAttribType: unknown type 0x{:04X}", raw),
                ))
            }
        })
    }
}

// ===== ATTRIBUTE =====

/// Layout of one vertex attribute inside a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location
    pub index: u32,
    /// Components per vertex (1..=4)
    pub size: u32,
    pub kind: VertexAttribType,
    /// Map integer data to [0, 1] / [-1, 1]
    pub normalised: bool,
    /// Byte distance between consecutive vertices (0 = tightly packed)
    pub stride: u32,
    /// Byte offset of the first component
    pub offset: u32,
}

impl VertexAttribute {
    /// Tightly packed float attribute
    pub fn float(index: u32, size: u32) -> Self {
        Self {
            index,
            size,
            kind: VertexAttribType::Float,
            normalised: false,
            stride: 0,
            offset: 0,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(1..=4).contains(&self.size) {
            orion_bail!(
                ErrorKind::UnsupportedType,
                "specify_vertex_data: attribute {} has {} components (1 to 4 allowed)",
                self.index,
                self.size
            );
        }
        Ok(())
    }
}

// ===== VERTEX ARRAY =====

/// Managed vertex array object
#[derive(Debug)]
pub struct VertexArray {
    handle: BackendHandle,
}

impl VertexArray {
    pub(crate) fn new(handle: BackendHandle) -> Self {
        Self { handle }
    }

    /// Vertex array objects arrived with OpenGL 3.0
    pub fn min_version() -> GlVersion {
        GlVersion::from_raw_unchecked(300)
    }

    pub fn handle(&self) -> BackendHandle {
        self.handle
    }

    pub(crate) fn take_handle(&mut self) -> BackendHandle {
        std::mem::replace(&mut self.handle, INVALID_HANDLE)
    }
}

#[cfg(test)]
#[path = "vertex_array_tests.rs"]
mod tests;
