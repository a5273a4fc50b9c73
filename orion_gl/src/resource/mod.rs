//! Managed resources
//!
//! Buffers, vertex arrays and shader programs wrapping backend handles,
//! plus the registry that owns them.

pub mod buffer;
pub mod vertex_array;
pub mod shader;
pub mod uniform;
mod registry;

pub use buffer::{Buffer, BufferTarget, BufferUsage, UploadKind};
pub use vertex_array::{VertexArray, VertexAttribType, VertexAttribute};
pub use shader::{CompileFailure, CompileOutcome, CompiledStage, Shader, ShaderStage};
pub use uniform::{MatrixShape, UniformCache, UniformLocation, UniformValue};
pub use registry::{BufferKey, Registry, Resource, ResourceKey, ShaderKey, VertexArrayKey};
