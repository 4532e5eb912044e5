// winit allows one event loop per process, so this lives in its own test binary.
#[cfg(feature = "integration-tests")]
use block_ngin::{Config, ShaderError, run};

#[test]
#[cfg(feature = "integration-tests")]
fn should_report_pipeline_rejected_by_gpu_as_link_error() {
    let config = Config {
        vertex_shader: concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/shaders/unbound_group.vert.wgsl"
        )
        .into(),
        fragment_shader: concat!(env!("CARGO_MANIFEST_DIR"), "/assets/shaders/shader.frag.wgsl")
            .into(),
        capture_cursor: false,
        exit_after_frames: Some(1),
        ..Default::default()
    };
    let err = run(config).unwrap_err();
    match err.downcast_ref::<ShaderError>() {
        Some(ShaderError::Link { log }) => assert!(!log.is_empty()),
        other => panic!("expected a link error, got {other:?} from {err:#}"),
    }
}
