// winit allows one event loop per process, so this lives in its own test binary.
#[cfg(feature = "integration-tests")]
use block_ngin::{Config, Geometry, ShaderError, run};

#[test]
#[cfg(feature = "integration-tests")]
fn should_fail_before_first_frame_on_broken_shader() {
    let config = Config {
        fragment_shader: concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/shaders/syntax_error.frag.wgsl"
        )
        .into(),
        geometry: Geometry::Triangle,
        capture_cursor: false,
        exit_after_frames: Some(1),
        ..Default::default()
    };
    let err = run(config).unwrap_err();
    assert!(
        err.downcast_ref::<ShaderError>().is_some(),
        "{err:#}"
    );
}
