/// Mock graphics backend for unit tests (no GL context required)
///
/// Records every call as a string and keeps just enough state to answer
/// queries: live handles, known uniform names and the installed debug hook.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::backend::{BackendHandle, BackendResult, GraphicsBackend, ProcLoader, INVALID_HANDLE};
use crate::debug::{DebugFilter, DebugHook, DebugMessage};
use crate::resource::{BufferTarget, BufferUsage, ShaderStage, UniformValue, VertexAttribute};

pub struct MockBackend {
    /// Recorded calls, in order
    pub calls: Vec<String>,
    /// Value returned by `load`
    pub load_ok: bool,
    /// Make every `create_*` call fail
    pub fail_allocation: bool,
    /// Make every `link_program` call fail
    pub fail_link: bool,
    /// Active uniforms answered by `uniform_location`
    pub uniforms: FxHashMap<String, i32>,
    pub debug_hook: Option<DebugHook>,
    pub debug_filter: Option<DebugFilter>,
    /// Buffer bound at each target, as `bind_buffer` left it
    pub bound: FxHashMap<BufferTarget, BackendHandle>,
    next_handle: BackendHandle,
    live: FxHashSet<BackendHandle>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            load_ok: true,
            fail_allocation: false,
            fail_link: false,
            uniforms: FxHashMap::default(),
            debug_hook: None,
            debug_filter: None,
            bound: FxHashMap::default(),
            next_handle: 1,
            live: FxHashSet::default(),
        }
    }

    /// Known active uniform
    pub fn with_uniform(mut self, name: &str, location: i32) -> Self {
        self.uniforms.insert(name.to_string(), location);
        self
    }

    /// Number of recorded calls starting with `prefix`
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Number of allocated handles not yet released
    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: BackendHandle) -> bool {
        self.live.contains(&handle)
    }

    /// Deliver a debug event as the driver would
    pub fn emit_debug(&self, message: &DebugMessage) {
        if let Some(hook) = &self.debug_hook {
            hook(message);
        }
    }

    fn allocate(&mut self, what: &str) -> BackendResult<BackendHandle> {
        if self.fail_allocation {
            self.calls.push(format!("{} failed", what));
            return Err(format!("mock: out of {} objects", what));
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.insert(handle);
        self.calls.push(format!("{} -> {}", what, handle));
        Ok(handle)
    }

    fn release(&mut self, what: &str, handle: BackendHandle) {
        self.live.remove(&handle);
        self.calls.push(format!("{} {}", what, handle));
    }
}

impl GraphicsBackend for MockBackend {
    fn load(&mut self, _loader: ProcLoader<'_>) -> bool {
        self.calls.push("load".to_string());
        self.load_ok
    }

    fn create_buffer(&mut self, target: BufferTarget) -> BackendResult<BackendHandle> {
        self.allocate(&format!("create_buffer {:?}", target))
    }

    fn delete_buffer(&mut self, handle: BackendHandle) {
        self.release("delete_buffer", handle);
    }

    fn bind_buffer(&mut self, target: BufferTarget, handle: BackendHandle) {
        self.calls.push(format!("bind_buffer {:?} {}", target, handle));
        self.bound.insert(target, handle);
    }

    fn bound_buffer(&mut self, target: BufferTarget) -> BackendHandle {
        self.calls.push(format!("bound_buffer {:?}", target));
        self.bound.get(&target).copied().unwrap_or(INVALID_HANDLE)
    }

    fn buffer_data(&mut self, target: BufferTarget, handle: BackendHandle, data: &[u8], usage: BufferUsage) {
        self.calls.push(format!("buffer_data {:?} {} {} {:?}", target, handle, data.len(), usage));
    }

    fn buffer_sub_data(&mut self, target: BufferTarget, handle: BackendHandle, offset: usize, data: &[u8]) {
        self.calls.push(format!("buffer_sub_data {:?} {} {} {}", target, handle, offset, data.len()));
    }

    fn named_buffer_data(&mut self, handle: BackendHandle, data: &[u8], usage: BufferUsage) {
        self.calls.push(format!("named_buffer_data {} {} {:?}", handle, data.len(), usage));
    }

    fn named_buffer_sub_data(&mut self, handle: BackendHandle, offset: usize, data: &[u8]) {
        self.calls.push(format!("named_buffer_sub_data {} {} {}", handle, offset, data.len()));
    }

    fn create_vertex_array(&mut self) -> BackendResult<BackendHandle> {
        self.allocate("create_vertex_array")
    }

    fn delete_vertex_array(&mut self, handle: BackendHandle) {
        self.release("delete_vertex_array", handle);
    }

    fn bind_vertex_array(&mut self, handle: BackendHandle) {
        self.calls.push(format!("bind_vertex_array {}", handle));
    }

    fn vertex_attrib_pointer(&mut self, vertex_array: BackendHandle, buffer: BackendHandle, attribute: &VertexAttribute) {
        self.calls.push(format!(
            "vertex_attrib_pointer {} {} {} {}",
            vertex_array, buffer, attribute.index, attribute.size
        ));
    }

    fn create_program(&mut self) -> BackendResult<BackendHandle> {
        self.allocate("create_program")
    }

    fn delete_program(&mut self, handle: BackendHandle) {
        self.release("delete_program", handle);
    }

    fn use_program(&mut self, handle: BackendHandle) {
        self.calls.push(format!("use_program {}", handle));
    }

    fn create_stage(&mut self, stage: ShaderStage) -> BackendResult<BackendHandle> {
        self.allocate(&format!("create_stage {:?}", stage))
    }

    fn compile_stage(&mut self, handle: BackendHandle, source: &str) -> BackendResult<()> {
        self.calls.push(format!("compile_stage {}", handle));
        if source.contains("void main") {
            Ok(())
        } else {
            Err("0:1: error: missing entry point".to_string())
        }
    }

    fn delete_stage(&mut self, handle: BackendHandle) {
        self.release("delete_stage", handle);
    }

    fn attach_stage(&mut self, program: BackendHandle, stage: BackendHandle) {
        self.calls.push(format!("attach_stage {} {}", program, stage));
    }

    fn link_program(&mut self, program: BackendHandle) -> BackendResult<()> {
        self.calls.push(format!("link_program {}", program));
        if self.fail_link {
            Err("link error: unresolved varyings".to_string())
        } else {
            Ok(())
        }
    }

    fn uniform_location(&mut self, program: BackendHandle, name: &str) -> Option<i32> {
        self.calls.push(format!("uniform_location {} {}", program, name));
        self.uniforms.get(name).copied()
    }

    fn set_uniform(&mut self, program: BackendHandle, location: i32, value: &UniformValue) {
        self.calls.push(format!("set_uniform {} {} {:?}", program, location, value));
    }

    fn install_debug_hook(&mut self, filter: &DebugFilter, hook: DebugHook) {
        self.calls.push("install_debug_hook".to_string());
        self.debug_filter = Some(filter.clone());
        self.debug_hook = Some(hook);
    }
}
