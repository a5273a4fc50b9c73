/// Uniform values and the per-shader uniform location cache.

use glam::{IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::error::{ErrorKind, Result};
use crate::orion_bail;

// ===== LOCATION =====

/// Result of resolving a uniform name against a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformLocation {
    /// Active uniform at this location
    Found(i32),
    /// Queried; the program has no such active uniform
    Absent,
}

impl UniformLocation {
    pub fn location(self) -> Option<i32> {
        match self {
            UniformLocation::Found(location) => Some(location),
            UniformLocation::Absent => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, UniformLocation::Found(_))
    }
}

/// Name → location cache of one shader
///
/// A name missing from the map has never been queried.
#[derive(Debug, Default)]
pub struct UniformCache {
    entries: FxHashMap<String, UniformLocation>,
}

impl UniformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result, `None` if `name` was never queried
    pub fn get(&self, name: &str) -> Option<UniformLocation> {
        self.entries.get(name).copied()
    }

    pub(crate) fn insert(&mut self, name: &str, location: UniformLocation) {
        self.entries.insert(name.to_string(), location);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===== VALUES =====

/// Shape of a non-square matrix uniform (columns x rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixShape {
    Mat2x3,
    Mat3x2,
    Mat2x4,
    Mat4x2,
    Mat3x4,
    Mat4x3,
}

impl MatrixShape {
    pub fn columns(self) -> usize {
        match self {
            MatrixShape::Mat2x3 | MatrixShape::Mat2x4 => 2,
            MatrixShape::Mat3x2 | MatrixShape::Mat3x4 => 3,
            MatrixShape::Mat4x2 | MatrixShape::Mat4x3 => 4,
        }
    }

    pub fn rows(self) -> usize {
        match self {
            MatrixShape::Mat3x2 | MatrixShape::Mat4x2 => 2,
            MatrixShape::Mat2x3 | MatrixShape::Mat4x3 => 3,
            MatrixShape::Mat2x4 | MatrixShape::Mat3x4 => 4,
        }
    }

    /// Number of floats in one matrix
    pub fn len(self) -> usize {
        self.columns() * self.rows()
    }
}

/// Value written to a uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    UInt(u32),
    Float(f32),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    UVec2(UVec2),
    UVec3(UVec3),
    UVec4(UVec4),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2 { value: Mat2, transpose: bool },
    Mat3 { value: Mat3, transpose: bool },
    Mat4 { value: Mat4, transpose: bool },
    /// Non-square matrix, column-major
    Matrix {
        shape: MatrixShape,
        transpose: bool,
        values: Vec<f32>,
    },
}

impl UniformValue {
    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        if let UniformValue::Matrix { shape, values, .. } = self {
            if values.len() != shape.len() {
                orion_bail!(
                    ErrorKind::UnsupportedType,
                    "set_uniform: \"{}\" is {:?} and needs {} floats, got {}",
                    name,
                    shape,
                    shape.len(),
                    values.len()
                );
            }
        }
        Ok(())
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<u32> for UniformValue {
    fn from(value: u32) -> Self {
        UniformValue::UInt(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4 { value, transpose: false }
    }
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
