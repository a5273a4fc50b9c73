/// glow-backed GraphicsBackend implementation
///
/// Handles cross the trait boundary as plain `u32`s and are turned back into
/// glow's native handle types on every call. The GL context is created by
/// `load`; before that every call is a no-op and every allocation fails.

use std::num::NonZeroU32;

use glow::HasContext;
use orion_gl::orion::debug::{DebugFilter, DebugHook, DebugMessage, DONT_CARE};
use orion_gl::orion::resource::{
    BufferTarget, BufferUsage, MatrixShape, ShaderStage, UniformValue, VertexAttribType, VertexAttribute,
};
use orion_gl::orion::{BackendHandle, BackendResult, GraphicsBackend, ProcLoader, INVALID_HANDLE};
use orion_gl::{orion_debug, orion_info, orion_warn};

/// Called by glow while building the context; everything else is
/// version-dependent and gated by Orion
const VERSION_ENTRY_POINT: &str = "glGetString";

/// OpenGL backend driven through `glow`
pub struct GlowBackend {
    gl: Option<glow::Context>,
    /// Context exposes direct state access (desktop 4.5+)
    dsa: bool,
}

impl GlowBackend {
    pub fn new() -> Self {
        Self { gl: None, dsa: false }
    }

    /// Loaded context, if any
    pub fn context(&self) -> Option<&glow::Context> {
        self.gl.as_ref()
    }

    fn loaded(&self) -> BackendResult<&glow::Context> {
        self.gl.as_ref().ok_or_else(|| "OpenGL functions are not loaded".to_string())
    }
}

impl Default for GlowBackend {
    fn default() -> Self {
        Self::new()
    }
}

// ===== HANDLE CONVERSION =====

fn native_buffer(handle: BackendHandle) -> Option<glow::Buffer> {
    NonZeroU32::new(handle).map(glow::NativeBuffer)
}

fn native_vertex_array(handle: BackendHandle) -> Option<glow::VertexArray> {
    NonZeroU32::new(handle).map(glow::NativeVertexArray)
}

fn native_program(handle: BackendHandle) -> Option<glow::Program> {
    NonZeroU32::new(handle).map(glow::NativeProgram)
}

fn native_shader(handle: BackendHandle) -> Option<glow::Shader> {
    NonZeroU32::new(handle).map(glow::NativeShader)
}

fn raw_handle(handle: NonZeroU32) -> BackendHandle {
    handle.get()
}

/// Object name read back through `glGetIntegerv`
fn queried_handle(value: i32) -> BackendHandle {
    BackendHandle::try_from(value).unwrap_or(INVALID_HANDLE)
}

/// `glGetIntegerv` parameter holding the buffer bound to `target`
fn binding_query(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER_BINDING,
        BufferTarget::AtomicCounter => glow::ATOMIC_COUNTER_BUFFER_BINDING,
        BufferTarget::CopyRead => glow::COPY_READ_BUFFER_BINDING,
        BufferTarget::CopyWrite => glow::COPY_WRITE_BUFFER_BINDING,
        BufferTarget::DispatchIndirect => glow::DISPATCH_INDIRECT_BUFFER_BINDING,
        BufferTarget::DrawIndirect => glow::DRAW_INDIRECT_BUFFER_BINDING,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER_BINDING,
        BufferTarget::PixelPack => glow::PIXEL_PACK_BUFFER_BINDING,
        BufferTarget::PixelUnpack => glow::PIXEL_UNPACK_BUFFER_BINDING,
        BufferTarget::Query => glow::QUERY_BUFFER_BINDING,
        BufferTarget::ShaderStorage => glow::SHADER_STORAGE_BUFFER_BINDING,
        BufferTarget::Texture => glow::TEXTURE_BUFFER_BINDING,
        BufferTarget::TransformFeedback => glow::TRANSFORM_FEEDBACK_BUFFER_BINDING,
        BufferTarget::Uniform => glow::UNIFORM_BUFFER_BINDING,
    }
}

fn has_dsa(version: &glow::Version) -> bool {
    !version.is_embedded && (version.major, version.minor) >= (4, 5)
}

/// Loader can build a context
fn can_query_version(loader: ProcLoader<'_>) -> bool {
    !loader(VERSION_ENTRY_POINT).is_null()
}

/// Attribute types read through `glVertexAttribLPointer`
fn is_double(kind: VertexAttribType) -> bool {
    kind == VertexAttribType::Double
}

impl GraphicsBackend for GlowBackend {
    fn load(&mut self, loader: ProcLoader<'_>) -> bool {
        if !can_query_version(&mut *loader) {
            orion_warn!("orion::glow", "Entry point {} could not be loaded", VERSION_ENTRY_POINT);
            return false;
        }

        // SAFETY: glGetString resolved, which is all glow calls while
        // building the context; missing entry points stay unloaded.
        let gl = unsafe { glow::Context::from_loader_function(|name| loader(name)) };
        let version = gl.version();
        orion_info!(
            "orion::glow",
            "OpenGL {}.{} loaded ({})",
            version.major,
            version.minor,
            version.vendor_info
        );
        self.dsa = has_dsa(version);
        self.gl = Some(gl);
        true
    }

    // ===== BUFFERS =====

    fn create_buffer(&mut self, _target: BufferTarget) -> BackendResult<BackendHandle> {
        let gl = self.loaded()?;
        // Named calls need an initialised object, which glCreateBuffers gives
        let buffer = unsafe {
            if self.dsa {
                gl.create_named_buffer()?
            } else {
                gl.create_buffer()?
            }
        };
        Ok(raw_handle(buffer.0))
    }

    fn delete_buffer(&mut self, handle: BackendHandle) {
        if let (Some(gl), Some(buffer)) = (&self.gl, native_buffer(handle)) {
            unsafe { gl.delete_buffer(buffer) };
        }
    }

    fn bind_buffer(&mut self, target: BufferTarget, handle: BackendHandle) {
        if let Some(gl) = &self.gl {
            unsafe { gl.bind_buffer(target.as_raw(), native_buffer(handle)) };
        }
    }

    fn bound_buffer(&mut self, target: BufferTarget) -> BackendHandle {
        match &self.gl {
            Some(gl) => queried_handle(unsafe { gl.get_parameter_i32(binding_query(target)) }),
            None => INVALID_HANDLE,
        }
    }

    fn buffer_data(&mut self, target: BufferTarget, _handle: BackendHandle, data: &[u8], usage: BufferUsage) {
        if let Some(gl) = &self.gl {
            unsafe { gl.buffer_data_u8_slice(target.as_raw(), data, usage.as_raw()) };
        }
    }

    fn buffer_sub_data(&mut self, target: BufferTarget, _handle: BackendHandle, offset: usize, data: &[u8]) {
        if let Some(gl) = &self.gl {
            unsafe { gl.buffer_sub_data_u8_slice(target.as_raw(), offset as i32, data) };
        }
    }

    fn named_buffer_data(&mut self, handle: BackendHandle, data: &[u8], usage: BufferUsage) {
        if let (Some(gl), Some(buffer)) = (&self.gl, native_buffer(handle)) {
            unsafe { gl.named_buffer_data_u8_slice(buffer, data, usage.as_raw()) };
        }
    }

    fn named_buffer_sub_data(&mut self, handle: BackendHandle, offset: usize, data: &[u8]) {
        if let (Some(gl), Some(buffer)) = (&self.gl, native_buffer(handle)) {
            unsafe { gl.named_buffer_sub_data_u8_slice(buffer, offset as i32, data) };
        }
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> BackendResult<BackendHandle> {
        let gl = self.loaded()?;
        let vertex_array = unsafe { gl.create_vertex_array()? };
        Ok(raw_handle(vertex_array.0))
    }

    fn delete_vertex_array(&mut self, handle: BackendHandle) {
        if let (Some(gl), Some(vertex_array)) = (&self.gl, native_vertex_array(handle)) {
            unsafe { gl.delete_vertex_array(vertex_array) };
        }
    }

    fn bind_vertex_array(&mut self, handle: BackendHandle) {
        if let Some(gl) = &self.gl {
            unsafe { gl.bind_vertex_array(native_vertex_array(handle)) };
        }
    }

    fn vertex_attrib_pointer(&mut self, vertex_array: BackendHandle, buffer: BackendHandle, attribute: &VertexAttribute) {
        let Some(gl) = &self.gl else { return };
        let size = attribute.size as i32;
        let stride = attribute.stride as i32;
        let offset = attribute.offset as i32;

        // Any buffer object may be bound to ARRAY_BUFFER to source attributes
        unsafe {
            gl.bind_vertex_array(native_vertex_array(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, native_buffer(buffer));
            if is_double(attribute.kind) {
                gl.vertex_attrib_pointer_f64(attribute.index, size, attribute.kind.as_raw(), stride, offset);
            } else {
                gl.vertex_attrib_pointer_f32(
                    attribute.index,
                    size,
                    attribute.kind.as_raw(),
                    attribute.normalised,
                    stride,
                    offset,
                );
            }
            gl.enable_vertex_attrib_array(attribute.index);
        }
    }

    // ===== SHADERS =====

    fn create_program(&mut self) -> BackendResult<BackendHandle> {
        let gl = self.loaded()?;
        let program = unsafe { gl.create_program()? };
        Ok(raw_handle(program.0))
    }

    fn delete_program(&mut self, handle: BackendHandle) {
        if let (Some(gl), Some(program)) = (&self.gl, native_program(handle)) {
            unsafe { gl.delete_program(program) };
        }
    }

    fn use_program(&mut self, handle: BackendHandle) {
        if let Some(gl) = &self.gl {
            unsafe { gl.use_program(native_program(handle)) };
        }
    }

    fn create_stage(&mut self, stage: ShaderStage) -> BackendResult<BackendHandle> {
        let gl = self.loaded()?;
        let shader = unsafe { gl.create_shader(stage.as_raw())? };
        Ok(raw_handle(shader.0))
    }

    fn compile_stage(&mut self, handle: BackendHandle, source: &str) -> BackendResult<()> {
        let gl = self.loaded()?;
        let shader = native_shader(handle).ok_or_else(|| "invalid shader handle".to_string())?;
        unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if gl.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(gl.get_shader_info_log(shader))
            }
        }
    }

    fn delete_stage(&mut self, handle: BackendHandle) {
        if let (Some(gl), Some(shader)) = (&self.gl, native_shader(handle)) {
            unsafe { gl.delete_shader(shader) };
        }
    }

    fn attach_stage(&mut self, program: BackendHandle, stage: BackendHandle) {
        if let (Some(gl), Some(program), Some(shader)) = (&self.gl, native_program(program), native_shader(stage)) {
            unsafe { gl.attach_shader(program, shader) };
        }
    }

    fn link_program(&mut self, program: BackendHandle) -> BackendResult<()> {
        let gl = self.loaded()?;
        let program = native_program(program).ok_or_else(|| "invalid program handle".to_string())?;
        unsafe {
            gl.link_program(program);
            if gl.get_program_link_status(program) {
                Ok(())
            } else {
                Err(gl.get_program_info_log(program))
            }
        }
    }

    fn uniform_location(&mut self, program: BackendHandle, name: &str) -> Option<i32> {
        let gl = self.gl.as_ref()?;
        let program = native_program(program)?;
        let location = unsafe { gl.get_uniform_location(program, name)? };
        Some(location.0 as i32)
    }

    fn set_uniform(&mut self, program: BackendHandle, location: i32, value: &UniformValue) {
        let Some(gl) = &self.gl else { return };
        if location < 0 || program == INVALID_HANDLE {
            return;
        }
        let loc = glow::NativeUniformLocation(location as u32);
        let loc = Some(&loc);

        unsafe {
            // The application's current program is put back afterwards
            let previous = queried_handle(gl.get_parameter_i32(glow::CURRENT_PROGRAM));
            if previous != program {
                gl.use_program(native_program(program));
            }
            match value {
                UniformValue::Int(v) => gl.uniform_1_i32(loc, *v),
                UniformValue::UInt(v) => gl.uniform_1_u32(loc, *v),
                UniformValue::Float(v) => gl.uniform_1_f32(loc, *v),
                UniformValue::IVec2(v) => gl.uniform_2_i32(loc, v.x, v.y),
                UniformValue::IVec3(v) => gl.uniform_3_i32(loc, v.x, v.y, v.z),
                UniformValue::IVec4(v) => gl.uniform_4_i32(loc, v.x, v.y, v.z, v.w),
                UniformValue::UVec2(v) => gl.uniform_2_u32(loc, v.x, v.y),
                UniformValue::UVec3(v) => gl.uniform_3_u32(loc, v.x, v.y, v.z),
                UniformValue::UVec4(v) => gl.uniform_4_u32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Vec2(v) => gl.uniform_2_f32(loc, v.x, v.y),
                UniformValue::Vec3(v) => gl.uniform_3_f32(loc, v.x, v.y, v.z),
                UniformValue::Vec4(v) => gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w),
                UniformValue::Mat2 { value, transpose } => {
                    gl.uniform_matrix_2_f32_slice(loc, *transpose, &value.to_cols_array())
                }
                UniformValue::Mat3 { value, transpose } => {
                    gl.uniform_matrix_3_f32_slice(loc, *transpose, &value.to_cols_array())
                }
                UniformValue::Mat4 { value, transpose } => {
                    gl.uniform_matrix_4_f32_slice(loc, *transpose, &value.to_cols_array())
                }
                UniformValue::Matrix { shape, transpose, values } => match shape {
                    MatrixShape::Mat2x3 => gl.uniform_matrix_2x3_f32_slice(loc, *transpose, values),
                    MatrixShape::Mat3x2 => gl.uniform_matrix_3x2_f32_slice(loc, *transpose, values),
                    MatrixShape::Mat2x4 => gl.uniform_matrix_2x4_f32_slice(loc, *transpose, values),
                    MatrixShape::Mat4x2 => gl.uniform_matrix_4x2_f32_slice(loc, *transpose, values),
                    MatrixShape::Mat3x4 => gl.uniform_matrix_3x4_f32_slice(loc, *transpose, values),
                    MatrixShape::Mat4x3 => gl.uniform_matrix_4x3_f32_slice(loc, *transpose, values),
                },
            }
            if previous != program {
                gl.use_program(native_program(previous));
            }
        }
    }

    // ===== DEBUG OUTPUT =====

    fn install_debug_hook(&mut self, filter: &DebugFilter, hook: DebugHook) {
        let Some(gl) = self.gl.as_mut() else { return };

        unsafe {
            gl.enable(glow::DEBUG_OUTPUT);
            #[cfg(feature = "synchronous-debug")]
            gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);

            // Mute everything, then unmute what the filter can accept
            gl.debug_message_control(DONT_CARE, DONT_CARE, DONT_CARE, &[], false);
            if filter.enabled() {
                gl.debug_message_control(filter.raw_source(), filter.raw_kind(), filter.raw_severity(), &[], true);
            }

            gl.debug_message_callback(move |source, kind, id, severity, text| {
                hook(&DebugMessage {
                    source,
                    kind,
                    id,
                    severity,
                    text: text.to_string(),
                });
            });
        }
        orion_debug!("orion::glow", "Debug output hook installed");
    }
}

#[cfg(test)]
#[path = "glow_backend_tests.rs"]
mod tests;
