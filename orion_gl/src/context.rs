/// Orion context - the facade owning process state, registry and backend
///
/// Every public operation validates its preconditions in the same order
/// (initialised, backend loaded, key) and hands any failure to the
/// [`ErrorReporter`], which aborts or propagates according to the
/// configured [`FatalPolicy`](crate::reporter::FatalPolicy).

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::backend::{BackendHandle, GraphicsBackend, ProcLoader};
use crate::config::OrionConfig;
use crate::debug::{DebugFilter, DebugFilterConfig, DebugHook, DebugMessage};
use crate::error::{ErrorKind, Result};
use crate::reporter::{Callbacks, DebugMessageCallback, ErrorReporter, IntegrationErrorCallback};
use crate::resource::{
    Buffer, BufferKey, BufferTarget, BufferUsage, CompileFailure, CompileOutcome, CompiledStage,
    Registry, Resource, Shader, ShaderKey, ShaderStage, UniformLocation, UniformValue, UploadKind,
    VertexArray, VertexArrayKey, VertexAttribute,
};
use crate::version::{GlProfile, GlVersion};
use crate::{orion_bail, orion_debug, orion_err, orion_info};

const SOURCE: &str = "orion::Orion";

/// Orion context
///
/// Owns the graphics backend, the resource registry and every piece of
/// state set up by [`initialise`](Orion::initialise).
///
/// # Example
///
/// ```ignore
/// use orion_gl::orion::{Orion, OrionConfig, GlProfile, BufferTarget, BufferUsage};
///
/// let mut orion = Orion::with_config(backend, OrionConfig::default());
/// orion.initialise(460, GlProfile::Core)?;
/// orion.load_backend(&mut |name| window.get_proc_address(name))?;
///
/// let vbo = orion.create_buffer(BufferTarget::Array)?;
/// orion.set_buffer_data(vbo, &vertices, BufferUsage::StaticDraw)?;
///
/// orion.terminate()?;
/// ```
pub struct Orion<B: GraphicsBackend> {
    backend: B,
    config: OrionConfig,
    reporter: ErrorReporter,
    initialised: bool,
    backend_loaded: bool,
    version: Option<GlVersion>,
    profile: Option<GlProfile>,
    executable_dir: Option<PathBuf>,
    registry: Registry,
    callbacks: Arc<RwLock<Callbacks>>,
    debug_filter: Option<Arc<DebugFilter>>,
}

impl<B: GraphicsBackend> Orion<B> {
    /// Uninitialised context with the default configuration
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, OrionConfig::default())
    }

    /// Uninitialised context
    pub fn with_config(backend: B, config: OrionConfig) -> Self {
        Self {
            backend,
            reporter: ErrorReporter::new(config.fatal_policy),
            config,
            initialised: false,
            backend_loaded: false,
            version: None,
            profile: None,
            executable_dir: None,
            registry: Registry::new(),
            callbacks: Arc::new(RwLock::new(Callbacks::default())),
            debug_filter: None,
        }
    }

    // ===== ACCESSORS =====

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &OrionConfig {
        &self.config
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn is_backend_loaded(&self) -> bool {
        self.backend_loaded
    }

    /// Version negotiated at `initialise`
    pub fn version(&self) -> Option<GlVersion> {
        self.version
    }

    pub fn profile(&self) -> Option<GlProfile> {
        self.profile
    }

    /// Directory shader files are resolved against
    pub fn executable_dir(&self) -> Option<&Path> {
        self.executable_dir.as_deref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Filter installed by `enable_debug_context`
    pub fn debug_filter(&self) -> Option<&DebugFilter> {
        self.debug_filter.as_deref()
    }

    // ===== PRECONDITIONS =====

    /// Route a failure through the reporter
    fn escalate<T>(&self, result: Result<T>) -> Result<T> {
        result.map_err(|error| self.reporter.throw_error(error))
    }

    fn require_initialised(&self, call: &str) -> Result<GlVersion> {
        match (self.initialised, self.version) {
            (true, Some(version)) => Ok(version),
            _ => orion_bail!(ErrorKind::NotInitialised, "{}", call),
        }
    }

    fn require_backend(&self, call: &str) -> Result<GlVersion> {
        let version = self.require_initialised(call)?;
        if !self.backend_loaded {
            orion_bail!(ErrorKind::GlFail, "{}: backend functions have not been loaded", call);
        }
        Ok(version)
    }

    // ========================================================================
    // Init / teardown
    // ========================================================================

    /// Validate and record the OpenGL version, install default callbacks and
    /// resolve the executable directory. The backend is not touched.
    pub fn initialise(&mut self, version: u32, profile: GlProfile) -> Result<()> {
        let result = self.initialise_inner(version, profile);
        self.escalate(result)
    }

    fn initialise_inner(&mut self, version: u32, profile: GlProfile) -> Result<()> {
        if self.initialised {
            orion_bail!(ErrorKind::MultipleCalls, "initialise");
        }
        let version = GlVersion::parse(version)?;
        let executable_dir = self.resolve_executable_dir()?;

        self.version = Some(version);
        self.profile = Some(profile);
        self.executable_dir = Some(executable_dir);
        self.reset_callbacks();
        self.initialised = true;

        orion_info!(
            SOURCE,
            "{} initialised with OpenGL {} ({:?} profile)",
            self.config.app_name,
            version,
            profile
        );
        Ok(())
    }

    fn resolve_executable_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config.resource_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe()
            .map_err(|e| orion_err!(ErrorKind::AccessDenied, "initialise: cannot resolve executable path: {}", e))?;
        match exe.parent() {
            Some(dir) => Ok(dir.to_path_buf()),
            None => orion_bail!(ErrorKind::AccessDenied, "initialise: executable path {} has no parent", exe.display()),
        }
    }

    /// Bind backend function pointers; may be called again to rebind
    pub fn load_backend(&mut self, loader: ProcLoader<'_>) -> Result<()> {
        let result = self.load_backend_inner(loader);
        self.escalate(result)
    }

    fn load_backend_inner(&mut self, loader: ProcLoader<'_>) -> Result<()> {
        self.require_initialised("load_backend")?;
        if !self.backend.load(loader) {
            self.backend_loaded = false;
            orion_bail!(ErrorKind::GlFail, "load_backend: loader did not yield a usable function set");
        }
        self.backend_loaded = true;
        orion_debug!(SOURCE, "Backend functions loaded");
        Ok(())
    }

    /// Release every live resource and reset the context
    ///
    /// The graphics context must still be current.
    pub fn terminate(&mut self) -> Result<()> {
        let result = self.terminate_inner();
        self.escalate(result)
    }

    fn terminate_inner(&mut self) -> Result<()> {
        self.require_initialised("terminate")?;

        let count = self.registry.len();
        for resource in self.registry.drain() {
            release(&mut self.backend, resource);
        }
        orion_debug!(SOURCE, "Registry swept, {} resource(s) released", count);

        self.executable_dir = None;
        self.version = None;
        self.profile = None;
        self.debug_filter = None;
        self.backend_loaded = false;
        self.reset_callbacks();
        self.initialised = false;

        orion_info!(SOURCE, "{} terminated", self.config.app_name);
        Ok(())
    }

    // ========================================================================
    // Callbacks
    // ========================================================================

    fn reset_callbacks(&mut self) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            *callbacks = Callbacks::default();
        }
    }

    /// Replace the callback receiving filtered debug messages
    pub fn set_debug_message_callback<C: DebugMessageCallback + 'static>(&mut self, callback: C) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.debug = Arc::new(callback);
        }
    }

    /// Replace the callback receiving windowing-layer errors
    pub fn set_integration_error_callback<C: IntegrationErrorCallback + 'static>(&mut self, callback: C) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.integration = Arc::new(callback);
        }
    }

    /// Hand a windowing-layer error to the integration callback
    ///
    /// An `Err` from the callback is fatal.
    pub fn report_integration_error(&self, code: i32, message: &str) -> Result<()> {
        let callback = match self.callbacks.read() {
            Ok(callbacks) => Arc::clone(&callbacks.integration),
            Err(_) => return Ok(()),
        };
        let result = callback.on_error(code, message);
        self.escalate(result)
    }

    // ========================================================================
    // Debug output
    // ========================================================================

    /// Install the write-once debug filter and hook the backend's debug output
    pub fn enable_debug_context(&mut self, config: DebugFilterConfig) -> Result<()> {
        let result = self.enable_debug_context_inner(config);
        self.escalate(result)
    }

    fn enable_debug_context_inner(&mut self, config: DebugFilterConfig) -> Result<()> {
        const CALL: &str = "enable_debug_context";
        let version = self.require_backend(CALL)?;
        if self.debug_filter.is_some() {
            orion_bail!(ErrorKind::MultipleDebug, "{}", CALL);
        }
        if !version.has_debug_output() {
            orion_bail!(ErrorKind::GlVersionTooLow, "{}: debug output needs OpenGL 4.3, context is {}", CALL, version);
        }

        let filter = Arc::new(DebugFilter::new(config));
        let hook_filter = Arc::clone(&filter);
        let callbacks = Arc::clone(&self.callbacks);
        let hook: DebugHook = Arc::new(move |message: &DebugMessage| {
            if !hook_filter.accepts(message) {
                return;
            }
            let callback = match callbacks.read() {
                Ok(callbacks) => Arc::clone(&callbacks.debug),
                Err(_) => return,
            };
            callback.on_message(message);
        });

        self.backend.install_debug_hook(&filter, hook);
        self.debug_filter = Some(filter);
        orion_debug!(SOURCE, "Debug context enabled");
        Ok(())
    }

    // ========================================================================
    // Buffers
    // ========================================================================

    /// Create a buffer for `target`
    pub fn create_buffer(&mut self, target: BufferTarget) -> Result<BufferKey> {
        let result = self.create_buffer_inner(target);
        self.escalate(result)
    }

    /// Create a buffer from a raw API target value
    pub fn create_buffer_raw(&mut self, target: u32) -> Result<BufferKey> {
        let result = BufferTarget::try_from(target).and_then(|t| self.create_buffer_inner(t));
        self.escalate(result)
    }

    fn create_buffer_inner(&mut self, target: BufferTarget) -> Result<BufferKey> {
        const CALL: &str = "create_buffer";
        let version = self.require_backend(CALL)?;
        if target.min_version() > version {
            orion_bail!(
                ErrorKind::GlVersionTooLow,
                "{}: target {:?} needs OpenGL {}, context is {}",
                CALL,
                target,
                target.min_version(),
                version
            );
        }
        let handle = self
            .backend
            .create_buffer(target)
            .map_err(|e| orion_err!(ErrorKind::GlFail, "{}: {}", CALL, e))?;
        let key = self.registry.insert_buffer(Buffer::new(handle, target));
        orion_debug!(SOURCE, "Created {:?} buffer (handle {})", target, handle);
        Ok(key)
    }

    /// Bind a buffer to the target it was created for
    pub fn bind_buffer(&mut self, key: BufferKey) -> Result<()> {
        let result = self.bind_buffer_inner(key);
        self.escalate(result)
    }

    fn bind_buffer_inner(&mut self, key: BufferKey) -> Result<()> {
        const CALL: &str = "bind_buffer";
        self.require_backend(CALL)?;
        let buffer = self.registry.buffer_mut(key, CALL)?;
        self.backend.bind_buffer(buffer.target(), buffer.handle());
        Ok(())
    }

    /// Backend handle of a buffer
    pub fn buffer_handle(&self, key: BufferKey) -> Result<BackendHandle> {
        let result = self.require_backend("buffer_handle")
            .and_then(|_| self.registry.buffer(key, "buffer_handle").map(|b| b.handle()));
        self.escalate(result)
    }

    /// Target a buffer was created for
    pub fn buffer_target(&self, key: BufferKey) -> Result<BufferTarget> {
        let result = self.require_backend("buffer_target")
            .and_then(|_| self.registry.buffer(key, "buffer_target").map(|b| b.target()));
        self.escalate(result)
    }

    /// Upload `data`, reallocating the store only when the size changes
    pub fn set_buffer_data(&mut self, key: BufferKey, data: &[u8], usage: BufferUsage) -> Result<()> {
        let result = self.set_buffer_data_inner(key, data, usage);
        self.escalate(result)
    }

    /// Upload `data` with a raw API usage value; an unknown usage uploads nothing
    pub fn set_buffer_data_raw(&mut self, key: BufferKey, data: &[u8], usage: u32) -> Result<()> {
        let result = BufferUsage::try_from(usage).and_then(|u| self.set_buffer_data_inner(key, data, u));
        self.escalate(result)
    }

    /// Upload a slice of plain-old-data values
    pub fn set_buffer_data_pod<T: bytemuck::Pod>(&mut self, key: BufferKey, data: &[T], usage: BufferUsage) -> Result<()> {
        self.set_buffer_data(key, bytemuck::cast_slice(data), usage)
    }

    fn set_buffer_data_inner(&mut self, key: BufferKey, data: &[u8], usage: BufferUsage) -> Result<()> {
        const CALL: &str = "set_buffer_data";
        let version = self.require_backend(CALL)?;
        let buffer = self.registry.buffer_mut(key, CALL)?;
        let (target, handle) = (buffer.target(), buffer.handle());
        let upload = buffer.plan_upload(data.len());

        if version.has_dsa() {
            match upload {
                UploadKind::Full => self.backend.named_buffer_data(handle, data, usage),
                UploadKind::Sub => self.backend.named_buffer_sub_data(handle, 0, data),
            }
        } else {
            // Whatever was bound at `target` is bound again afterwards
            let previous = self.backend.bound_buffer(target);
            self.backend.bind_buffer(target, handle);
            match upload {
                UploadKind::Full => self.backend.buffer_data(target, handle, data, usage),
                UploadKind::Sub => self.backend.buffer_sub_data(target, handle, 0, data),
            }
            self.backend.bind_buffer(target, previous);
        }
        buffer.record_upload(data.len(), usage);
        Ok(())
    }

    /// Release a buffer; its key is dead afterwards
    pub fn free_buffer(&mut self, key: BufferKey) -> Result<()> {
        let result = self.free_buffer_inner(key);
        self.escalate(result)
    }

    fn free_buffer_inner(&mut self, key: BufferKey) -> Result<()> {
        const CALL: &str = "free_buffer";
        self.require_backend(CALL)?;
        self.registry.buffer_mut(key, CALL)?;
        let resource = self.registry.remove(key.raw(), CALL)?;
        release(&mut self.backend, resource);
        Ok(())
    }

    // ========================================================================
    // Vertex arrays
    // ========================================================================

    pub fn create_vertex_array(&mut self) -> Result<VertexArrayKey> {
        let result = self.create_vertex_array_inner();
        self.escalate(result)
    }

    fn create_vertex_array_inner(&mut self) -> Result<VertexArrayKey> {
        const CALL: &str = "create_vertex_array";
        let version = self.require_backend(CALL)?;
        if VertexArray::min_version() > version {
            orion_bail!(
                ErrorKind::GlVersionTooLow,
                "{}: vertex arrays need OpenGL {}, context is {}",
                CALL,
                VertexArray::min_version(),
                version
            );
        }
        let handle = self
            .backend
            .create_vertex_array()
            .map_err(|e| orion_err!(ErrorKind::GlFail, "{}: {}", CALL, e))?;
        orion_debug!(SOURCE, "Created vertex array (handle {})", handle);
        Ok(self.registry.insert_vertex_array(VertexArray::new(handle)))
    }

    pub fn bind_vertex_array(&mut self, key: VertexArrayKey) -> Result<()> {
        let result = self.require_backend("bind_vertex_array").and_then(|_| {
            let handle = self.registry.vertex_array_mut(key, "bind_vertex_array")?.handle();
            self.backend.bind_vertex_array(handle);
            Ok(())
        });
        self.escalate(result)
    }

    pub fn vertex_array_handle(&self, key: VertexArrayKey) -> Result<BackendHandle> {
        let result = self.require_backend("vertex_array_handle")
            .and_then(|_| self.registry.vertex_array(key, "vertex_array_handle").map(|v| v.handle()));
        self.escalate(result)
    }

    /// Describe one attribute of `vertex_array`, sourced from `buffer`
    ///
    /// Before OpenGL 4.5 the buffer must be an `Array` buffer; any other
    /// target is reported as a warning and nothing is specified.
    pub fn specify_vertex_data(&mut self, vertex_array: VertexArrayKey, buffer: BufferKey, attribute: VertexAttribute) -> Result<()> {
        let result = self.specify_vertex_data_inner(vertex_array, buffer, attribute);
        self.escalate(result)
    }

    fn specify_vertex_data_inner(&mut self, vertex_array: VertexArrayKey, buffer: BufferKey, attribute: VertexAttribute) -> Result<()> {
        const CALL: &str = "specify_vertex_data";
        let version = self.require_backend(CALL)?;
        let va_handle = self.registry.vertex_array_mut(vertex_array, CALL)?.handle();
        let source = self.registry.buffer_mut(buffer, CALL)?;
        let (target, buffer_handle) = (source.target(), source.handle());
        attribute.validate()?;

        if !version.has_dsa() && target != BufferTarget::Array {
            self.reporter.throw_warning(&orion_err!(
                ErrorKind::BufferInvalid,
                "{}: buffer has target {:?}, only Array buffers can source vertex data before OpenGL 4.5",
                CALL,
                target
            ));
            return Ok(());
        }

        self.backend.vertex_attrib_pointer(va_handle, buffer_handle, &attribute);
        Ok(())
    }

    pub fn free_vertex_array(&mut self, key: VertexArrayKey) -> Result<()> {
        let result = self.require_backend("free_vertex_array").and_then(|_| {
            self.registry.vertex_array_mut(key, "free_vertex_array")?;
            let resource = self.registry.remove(key.raw(), "free_vertex_array")?;
            release(&mut self.backend, resource);
            Ok(())
        });
        self.escalate(result)
    }

    // ========================================================================
    // Shaders
    // ========================================================================

    /// Create an empty program
    pub fn create_shader(&mut self) -> Result<ShaderKey> {
        let result = self.create_shader_inner();
        self.escalate(result)
    }

    fn create_shader_inner(&mut self) -> Result<ShaderKey> {
        const CALL: &str = "create_shader";
        let version = self.require_backend(CALL)?;
        if Shader::min_version() > version {
            orion_bail!(
                ErrorKind::GlVersionTooLow,
                "{}: shader programs need OpenGL {}, context is {}",
                CALL,
                Shader::min_version(),
                version
            );
        }
        let handle = self
            .backend
            .create_program()
            .map_err(|e| orion_err!(ErrorKind::GlFail, "{}: {}", CALL, e))?;
        orion_debug!(SOURCE, "Created shader (handle {})", handle);
        Ok(self.registry.insert_shader(Shader::new(handle)))
    }

    /// Make a program current
    pub fn bind_shader(&mut self, key: ShaderKey) -> Result<()> {
        let result = self.require_backend("bind_shader").and_then(|_| {
            let handle = self.registry.shader_mut(key, "bind_shader")?.handle();
            self.backend.use_program(handle);
            Ok(())
        });
        self.escalate(result)
    }

    pub fn shader_handle(&self, key: ShaderKey) -> Result<BackendHandle> {
        let result = self.require_backend("shader_handle")
            .and_then(|_| self.registry.shader(key, "shader_handle").map(|s| s.handle()));
        self.escalate(result)
    }

    /// Whether the last link of the program succeeded
    pub fn is_shader_linked(&self, key: ShaderKey) -> Result<bool> {
        let result = self.require_backend("is_shader_linked")
            .and_then(|_| self.registry.shader(key, "is_shader_linked").map(|s| s.is_linked()));
        self.escalate(result)
    }

    pub fn free_shader(&mut self, key: ShaderKey) -> Result<()> {
        let result = self.require_backend("free_shader").and_then(|_| {
            self.registry.shader_mut(key, "free_shader")?;
            let resource = self.registry.remove(key.raw(), "free_shader")?;
            release(&mut self.backend, resource);
            Ok(())
        });
        self.escalate(result)
    }

    /// Compile one stage without attaching it anywhere
    ///
    /// A compile error is not fatal: it comes back as
    /// [`CompileOutcome::Failed`] with the info log, and the stage object is
    /// already released.
    pub fn compile_shader_stage(&mut self, stage: ShaderStage, source: &str) -> Result<CompileOutcome> {
        let result = self.compile_shader_stage_inner(stage, source);
        self.escalate(result)
    }

    fn compile_shader_stage_inner(&mut self, stage: ShaderStage, source: &str) -> Result<CompileOutcome> {
        const CALL: &str = "compile_shader_stage";
        let version = self.require_backend(CALL)?;
        if stage.min_version() > version {
            orion_bail!(
                ErrorKind::GlVersionTooLow,
                "{}: {} stage needs OpenGL {}, context is {}",
                CALL,
                stage.name(),
                stage.min_version(),
                version
            );
        }

        let handle = self
            .backend
            .create_stage(stage)
            .map_err(|e| orion_err!(ErrorKind::GlFail, "{}: {}", CALL, e))?;

        match self.backend.compile_stage(handle, source) {
            Ok(()) => Ok(CompileOutcome::Compiled(CompiledStage::new(stage, handle))),
            Err(log) => {
                self.backend.delete_stage(handle);
                Ok(CompileOutcome::Failed(CompileFailure { stage, log }))
            }
        }
    }

    /// Attach a compiled stage, relink and release the stage object
    ///
    /// A link failure is a warning; the shader is then reported unlinked.
    pub fn add_compiled_stage(&mut self, shader: ShaderKey, stage: CompiledStage) -> Result<()> {
        let result = self.add_compiled_stage_inner(shader, stage, "add_compiled_stage");
        self.escalate(result)
    }

    fn add_compiled_stage_inner(&mut self, shader: ShaderKey, stage: CompiledStage, call: &str) -> Result<()> {
        self.require_backend(call)?;
        let program = match self.registry.shader_mut(shader, call) {
            Ok(program) => program,
            Err(error) => {
                self.backend.delete_stage(stage.handle());
                return Err(error);
            }
        };
        if !program.can_relink() {
            self.backend.delete_stage(stage.handle());
            orion_bail!(
                ErrorKind::AccessDenied,
                "{}: relinking a shader whose uniform locations were already resolved is not supported",
                call
            );
        }

        let handle = program.handle();
        self.backend.attach_stage(handle, stage.handle());
        let link = self.backend.link_program(handle);
        self.backend.delete_stage(stage.handle());
        program.record_link(stage.stage(), link.is_ok());

        if let Err(log) = link {
            self.reporter.throw_warning(&orion_err!(
                ErrorKind::GlFail,
                "{}: linking after adding the {} stage failed: {}",
                call,
                stage.stage().name(),
                log
            ));
        }
        Ok(())
    }

    /// Release a compiled stage that will not be used
    pub fn discard_stage(&mut self, stage: CompiledStage) -> Result<()> {
        let result = self.require_backend("discard_stage").map(|_| {
            self.backend.delete_stage(stage.handle());
        });
        self.escalate(result)
    }

    /// Compile `source` and add it to `shader`
    ///
    /// Returns `false` (after a warning carrying the info log) when the
    /// source does not compile; the shader is left unchanged.
    pub fn add_shader_source(&mut self, shader: ShaderKey, stage: ShaderStage, source: &str) -> Result<bool> {
        let result = self.add_shader_source_inner(shader, stage, source);
        self.escalate(result)
    }

    fn add_shader_source_inner(&mut self, shader: ShaderKey, stage: ShaderStage, source: &str) -> Result<bool> {
        const CALL: &str = "add_shader_source";
        self.require_backend(CALL)?;
        self.registry.shader_mut(shader, CALL)?;

        match self.compile_shader_stage_inner(stage, source)? {
            CompileOutcome::Compiled(compiled) => {
                self.add_compiled_stage_inner(shader, compiled, CALL)?;
                Ok(true)
            }
            CompileOutcome::Failed(failure) => {
                self.reporter.throw_warning(&orion_err!(
                    ErrorKind::GlFail,
                    "{}: {} stage failed to compile: {}",
                    CALL,
                    failure.stage.name(),
                    failure.log
                ));
                Ok(false)
            }
        }
    }

    /// Read a shader source file relative to the executable directory
    pub fn parse_shader(&self, path: impl AsRef<Path>) -> Result<String> {
        let result = self.parse_shader_inner(path.as_ref());
        self.escalate(result)
    }

    fn parse_shader_inner(&self, path: &Path) -> Result<String> {
        const CALL: &str = "parse_shader";
        self.require_initialised(CALL)?;
        let full_path = match &self.executable_dir {
            Some(dir) => dir.join(path),
            None => orion_bail!(ErrorKind::NotInitialised, "{}", CALL),
        };
        std::fs::read_to_string(&full_path).map_err(|e| {
            let kind = match e.kind() {
                std::io::ErrorKind::NotFound => ErrorKind::AccessPhantom,
                _ => ErrorKind::AccessDenied,
            };
            orion_err!(kind, "{}: {}: {}", CALL, full_path.display(), e)
        })
    }

    // ========================================================================
    // Uniforms
    // ========================================================================

    /// Location of uniform `name`, queried from the backend once and cached
    pub fn uniform_location(&mut self, shader: ShaderKey, name: &str) -> Result<UniformLocation> {
        let result = self.uniform_location_inner(shader, name, "uniform_location");
        self.escalate(result)
    }

    fn uniform_location_inner(&mut self, shader: ShaderKey, name: &str, call: &str) -> Result<UniformLocation> {
        self.require_backend(call)?;
        let program = self.registry.shader_mut(shader, call)?;
        if let Some(cached) = program.uniform_cache().get(name) {
            return Ok(cached);
        }

        let location = match self.backend.uniform_location(program.handle(), name) {
            Some(location) => UniformLocation::Found(location),
            None => UniformLocation::Absent,
        };
        program.uniform_cache_mut().insert(name, location);
        Ok(location)
    }

    /// Set uniform `name`; a name the program does not have is a warning
    pub fn set_uniform(&mut self, shader: ShaderKey, name: &str, value: impl Into<UniformValue>) -> Result<()> {
        let result = self.set_uniform_inner(shader, name, value.into());
        self.escalate(result)
    }

    fn set_uniform_inner(&mut self, shader: ShaderKey, name: &str, value: UniformValue) -> Result<()> {
        const CALL: &str = "set_uniform";
        self.require_backend(CALL)?;
        value.validate(name)?;

        match self.uniform_location_inner(shader, name, CALL)? {
            UniformLocation::Found(location) => {
                let handle = self.registry.shader_mut(shader, CALL)?.handle();
                self.backend.set_uniform(handle, location, &value);
            }
            UniformLocation::Absent => {
                self.reporter.throw_warning(&orion_err!(
                    ErrorKind::AccessPhantom,
                    "{}: shader has no active uniform \"{}\"",
                    CALL,
                    name
                ));
            }
        }
        Ok(())
    }
}

impl<B: GraphicsBackend> Drop for Orion<B> {
    fn drop(&mut self) {
        if self.initialised && !self.registry.is_empty() {
            crate::orion_warn!(
                SOURCE,
                "Context dropped without terminate, {} resource(s) not released",
                self.registry.len()
            );
        }
    }
}

/// Invalidate a resource's handle and release it on the backend
fn release<B: GraphicsBackend>(backend: &mut B, resource: Resource) {
    match resource {
        Resource::Buffer(mut buffer) => {
            let handle = buffer.take_handle();
            backend.delete_buffer(handle);
            orion_debug!(SOURCE, "Released buffer (handle {})", handle);
        }
        Resource::VertexArray(mut vertex_array) => {
            let handle = vertex_array.take_handle();
            backend.delete_vertex_array(handle);
            orion_debug!(SOURCE, "Released vertex array (handle {})", handle);
        }
        Resource::Shader(mut shader) => {
            let handle = shader.take_handle();
            backend.delete_program(handle);
            orion_debug!(SOURCE, "Released shader (handle {})", handle);
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
