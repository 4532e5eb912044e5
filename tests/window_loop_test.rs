#[cfg(feature = "integration-tests")]
use block_ngin::{Config, run};

#[test]
#[cfg(feature = "integration-tests")]
fn should_stop_after_frame_limit() {
    let config = Config {
        vertex_shader: concat!(env!("CARGO_MANIFEST_DIR"), "/assets/shaders/shader.vert.wgsl").into(),
        fragment_shader: concat!(env!("CARGO_MANIFEST_DIR"), "/assets/shaders/shader.frag.wgsl")
            .into(),
        capture_cursor: false,
        exit_after_frames: Some(3),
        ..Default::default()
    };
    let stats = run(config).expect("loop runs");
    assert_eq!(stats.frames, 3);
}
