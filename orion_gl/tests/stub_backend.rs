#![allow(dead_code)]
//! Stub graphics backend shared by the integration tests
//!
//! Counts calls by name and hands out sequential handles. Compilation fails
//! for any source without a `main` entry point; uniform queries answer from
//! a fixed table.

use orion_gl::orion::debug::{DebugFilter, DebugHook, DebugMessage};
use orion_gl::orion::resource::{BufferTarget, BufferUsage, ShaderStage, UniformValue, VertexAttribute};
use orion_gl::orion::{
    BackendHandle, BackendResult, GlProfile, GraphicsBackend, Orion, OrionConfig, ProcLoader, INVALID_HANDLE,
};
use std::collections::{HashMap, HashSet};
use std::ffi::c_void;

#[derive(Default)]
pub struct StubBackend {
    pub counts: HashMap<&'static str, usize>,
    pub uploads: Vec<(BackendHandle, usize)>,
    pub uniforms: HashMap<String, i32>,
    pub hook: Option<DebugHook>,
    live: HashSet<BackendHandle>,
    next: BackendHandle,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            next: 1,
            ..Default::default()
        }
    }

    pub fn with_uniform(mut self, name: &str, location: i32) -> Self {
        self.uniforms.insert(name.to_string(), location);
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.counts.get(call).copied().unwrap_or(0)
    }

    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn emit(&self, message: &DebugMessage) {
        if let Some(hook) = &self.hook {
            hook(message);
        }
    }

    fn hit(&mut self, call: &'static str) {
        *self.counts.entry(call).or_insert(0) += 1;
    }

    fn alloc(&mut self, call: &'static str) -> BackendResult<BackendHandle> {
        self.hit(call);
        let handle = self.next;
        self.next += 1;
        self.live.insert(handle);
        Ok(handle)
    }

    fn free(&mut self, call: &'static str, handle: BackendHandle) {
        self.hit(call);
        self.live.remove(&handle);
    }
}

impl GraphicsBackend for StubBackend {
    fn load(&mut self, loader: ProcLoader<'_>) -> bool {
        self.hit("load");
        // A real loader would be asked for every entry point
        let _ = loader("glGetString");
        true
    }

    fn create_buffer(&mut self, _target: BufferTarget) -> BackendResult<BackendHandle> {
        self.alloc("create_buffer")
    }

    fn delete_buffer(&mut self, handle: BackendHandle) {
        self.free("delete_buffer", handle);
    }

    fn bind_buffer(&mut self, _target: BufferTarget, _handle: BackendHandle) {
        self.hit("bind_buffer");
    }

    fn buffer_data(&mut self, _target: BufferTarget, handle: BackendHandle, data: &[u8], _usage: BufferUsage) {
        self.hit("buffer_data");
        self.uploads.push((handle, data.len()));
    }

    fn buffer_sub_data(&mut self, _target: BufferTarget, handle: BackendHandle, _offset: usize, data: &[u8]) {
        self.hit("buffer_sub_data");
        self.uploads.push((handle, data.len()));
    }

    fn bound_buffer(&mut self, _target: BufferTarget) -> BackendHandle {
        self.hit("bound_buffer");
        INVALID_HANDLE
    }

    fn named_buffer_data(&mut self, handle: BackendHandle, data: &[u8], _usage: BufferUsage) {
        self.hit("named_buffer_data");
        self.uploads.push((handle, data.len()));
    }

    fn named_buffer_sub_data(&mut self, handle: BackendHandle, _offset: usize, data: &[u8]) {
        self.hit("named_buffer_sub_data");
        self.uploads.push((handle, data.len()));
    }

    fn create_vertex_array(&mut self) -> BackendResult<BackendHandle> {
        self.alloc("create_vertex_array")
    }

    fn delete_vertex_array(&mut self, handle: BackendHandle) {
        self.free("delete_vertex_array", handle);
    }

    fn bind_vertex_array(&mut self, _handle: BackendHandle) {
        self.hit("bind_vertex_array");
    }

    fn vertex_attrib_pointer(&mut self, _vertex_array: BackendHandle, _buffer: BackendHandle, _attribute: &VertexAttribute) {
        self.hit("vertex_attrib_pointer");
    }

    fn create_program(&mut self) -> BackendResult<BackendHandle> {
        self.alloc("create_program")
    }

    fn delete_program(&mut self, handle: BackendHandle) {
        self.free("delete_program", handle);
    }

    fn use_program(&mut self, _handle: BackendHandle) {
        self.hit("use_program");
    }

    fn create_stage(&mut self, _stage: ShaderStage) -> BackendResult<BackendHandle> {
        self.alloc("create_stage")
    }

    fn compile_stage(&mut self, _handle: BackendHandle, source: &str) -> BackendResult<()> {
        self.hit("compile_stage");
        if source.contains("main(") {
            Ok(())
        } else {
            Err("ERROR: 0:1: 'main' : function not found".to_string())
        }
    }

    fn delete_stage(&mut self, handle: BackendHandle) {
        self.free("delete_stage", handle);
    }

    fn attach_stage(&mut self, _program: BackendHandle, _stage: BackendHandle) {
        self.hit("attach_stage");
    }

    fn link_program(&mut self, _program: BackendHandle) -> BackendResult<()> {
        self.hit("link_program");
        Ok(())
    }

    fn uniform_location(&mut self, _program: BackendHandle, name: &str) -> Option<i32> {
        self.hit("uniform_location");
        self.uniforms.get(name).copied()
    }

    fn set_uniform(&mut self, _program: BackendHandle, _location: i32, _value: &UniformValue) {
        self.hit("set_uniform");
    }

    fn install_debug_hook(&mut self, _filter: &DebugFilter, hook: DebugHook) {
        self.hit("install_debug_hook");
        self.hook = Some(hook);
    }
}

pub fn stub_loader(_name: &str) -> *const c_void {
    std::ptr::null()
}

/// Context initialised at `version` with the stub loaded, errors propagated
pub fn ready_orion(backend: StubBackend, version: u32) -> Orion<StubBackend> {
    let mut orion = Orion::with_config(backend, OrionConfig::propagating());
    orion.initialise(version, GlProfile::Core).unwrap();
    orion.load_backend(&mut stub_loader).unwrap();
    orion
}
