/// Tests for Shader, ShaderStage and CompileOutcome

use super::*;
use crate::resource::uniform::UniformLocation;

#[test]
fn test_stage_conversion() {
    assert_eq!(ShaderStage::try_from(0x8B31).unwrap(), ShaderStage::Vertex);
    assert_eq!(ShaderStage::try_from(0x91B9).unwrap(), ShaderStage::Compute);
    assert_eq!(ShaderStage::Geometry.as_raw(), 0x8DD9);

    let err = ShaderStage::try_from(0x8B32).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);
}

#[test]
fn test_stage_min_versions() {
    assert_eq!(ShaderStage::Vertex.min_version().raw(), 200);
    assert_eq!(ShaderStage::Geometry.min_version().raw(), 320);
    assert_eq!(ShaderStage::TessControl.min_version().raw(), 400);
    assert_eq!(ShaderStage::Compute.min_version().raw(), 430);
    assert_eq!(Shader::min_version().raw(), 200);
}

#[test]
fn test_compile_outcome_accessors() {
    let ok = CompileOutcome::Compiled(CompiledStage::new(ShaderStage::Fragment, 9));
    assert!(ok.is_compiled());
    let stage = ok.compiled().unwrap();
    assert_eq!(stage.stage(), ShaderStage::Fragment);
    assert_eq!(stage.handle(), 9);

    let failed = CompileOutcome::Failed(CompileFailure {
        stage: ShaderStage::Vertex,
        log: "0:1: syntax error".to_string(),
    });
    assert!(!failed.is_compiled());
    assert!(failed.compiled().is_none());
}

#[test]
fn test_shader_link_bookkeeping() {
    let mut shader = Shader::new(4);
    assert!(!shader.is_linked());
    assert!(shader.can_relink());

    shader.record_link(ShaderStage::Vertex, false);
    shader.record_link(ShaderStage::Fragment, true);
    assert!(shader.is_linked());
    assert_eq!(shader.attached_stages(), &[ShaderStage::Vertex, ShaderStage::Fragment]);

    shader.uniform_cache_mut().insert("model", UniformLocation::Found(0));
    assert!(!shader.can_relink());

    assert_eq!(shader.take_handle(), 4);
    assert_eq!(shader.handle(), INVALID_HANDLE);
}
