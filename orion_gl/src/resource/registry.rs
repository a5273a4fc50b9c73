/// Registry of every live managed resource.
///
/// The registry is the ownership root: a resource lives in exactly one slot
/// from creation until it is freed or swept at teardown. Keys carry a
/// generation, so a key whose resource has been freed is detected instead of
/// aliasing a newer resource.

use slotmap::{new_key_type, Key, SlotMap};

use crate::error::{Error, ErrorKind, Result};
use crate::{orion_bail, orion_err};
use crate::resource::buffer::Buffer;
use crate::resource::shader::Shader;
use crate::resource::vertex_array::VertexArray;

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Generation-checked key of a registry slot.
    ///
    /// The default key is null and never refers to a resource.
    pub struct ResourceKey;
}

/// Key of a managed [`Buffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BufferKey(ResourceKey);

/// Key of a managed [`VertexArray`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexArrayKey(ResourceKey);

/// Key of a managed [`Shader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderKey(ResourceKey);

impl BufferKey {
    pub fn raw(self) -> ResourceKey {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl VertexArrayKey {
    pub fn raw(self) -> ResourceKey {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl ShaderKey {
    pub fn raw(self) -> ResourceKey {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

// ===== RESOURCE =====

/// Closed set of managed resource kinds
#[derive(Debug)]
pub enum Resource {
    Buffer(Buffer),
    VertexArray(VertexArray),
    Shader(Shader),
}

impl Resource {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Resource::Buffer(_) => "buffer",
            Resource::VertexArray(_) => "vertex array",
            Resource::Shader(_) => "shader",
        }
    }
}

// ===== REGISTRY =====

#[derive(Debug, Default)]
pub struct Registry {
    slots: SlotMap<ResourceKey, Resource>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, key: ResourceKey) -> bool {
        self.slots.contains_key(key)
    }

    pub(crate) fn insert_buffer(&mut self, buffer: Buffer) -> BufferKey {
        BufferKey(self.slots.insert(Resource::Buffer(buffer)))
    }

    pub(crate) fn insert_vertex_array(&mut self, vertex_array: VertexArray) -> VertexArrayKey {
        VertexArrayKey(self.slots.insert(Resource::VertexArray(vertex_array)))
    }

    pub(crate) fn insert_shader(&mut self, shader: Shader) -> ShaderKey {
        ShaderKey(self.slots.insert(Resource::Shader(shader)))
    }

    /// Resolve a key: null → `NullReceived`, stale or never issued → `AccessPhantom`
    fn slot(&self, key: ResourceKey, call: &str) -> Result<&Resource> {
        if key.is_null() {
            orion_bail!(ErrorKind::NullReceived, "{}: null resource key", call);
        }
        self.slots.get(key).ok_or_else(|| phantom(call))
    }

    fn slot_mut(&mut self, key: ResourceKey, call: &str) -> Result<&mut Resource> {
        if key.is_null() {
            orion_bail!(ErrorKind::NullReceived, "{}: null resource key", call);
        }
        self.slots.get_mut(key).ok_or_else(|| phantom(call))
    }

    pub fn buffer(&self, key: BufferKey, call: &str) -> Result<&Buffer> {
        match self.slot(key.0, call)? {
            Resource::Buffer(buffer) => Ok(buffer),
            other => Err(wrong_kind(call, other)),
        }
    }

    pub fn vertex_array(&self, key: VertexArrayKey, call: &str) -> Result<&VertexArray> {
        match self.slot(key.0, call)? {
            Resource::VertexArray(vertex_array) => Ok(vertex_array),
            other => Err(wrong_kind(call, other)),
        }
    }

    pub fn shader(&self, key: ShaderKey, call: &str) -> Result<&Shader> {
        match self.slot(key.0, call)? {
            Resource::Shader(shader) => Ok(shader),
            other => Err(wrong_kind(call, other)),
        }
    }

    pub(crate) fn buffer_mut(&mut self, key: BufferKey, call: &str) -> Result<&mut Buffer> {
        match self.slot_mut(key.0, call)? {
            Resource::Buffer(buffer) => Ok(buffer),
            other => Err(wrong_kind(call, other)),
        }
    }

    pub(crate) fn vertex_array_mut(&mut self, key: VertexArrayKey, call: &str) -> Result<&mut VertexArray> {
        match self.slot_mut(key.0, call)? {
            Resource::VertexArray(vertex_array) => Ok(vertex_array),
            other => Err(wrong_kind(call, other)),
        }
    }

    pub(crate) fn shader_mut(&mut self, key: ShaderKey, call: &str) -> Result<&mut Shader> {
        match self.slot_mut(key.0, call)? {
            Resource::Shader(shader) => Ok(shader),
            other => Err(wrong_kind(call, other)),
        }
    }

    /// Remove a resource, resolving the key like the accessors do
    pub(crate) fn remove(&mut self, key: ResourceKey, call: &str) -> Result<Resource> {
        self.slot(key, call)?;
        self.slots.remove(key).ok_or_else(|| phantom(call))
    }

    /// Empty the registry, yielding every live resource once
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Resource> + '_ {
        self.slots.drain().map(|(_, resource)| resource)
    }
}

fn phantom(call: &str) -> Error {
    orion_err!(ErrorKind::AccessPhantom, "{}: resource was freed or never created", call)
}

fn wrong_kind(call: &str, found: &Resource) -> Error {
    orion_err!(ErrorKind::AccessPhantom, "{}: key refers to a {}", call, found.kind_name())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
