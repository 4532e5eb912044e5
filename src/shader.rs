//! Shader programs built from a pair of WGSL files.
//!
//! Building a program mirrors what a GL driver does with a vertex/fragment
//! pair, but every phase reports its own error:
//!
//! 1. **read**: both files are read fully into memory ([`ShaderError::Read`])
//! 2. **compile**: each file is parsed and validated as one stage and must
//!    expose that stage's entry point ([`ShaderError::Compile`])
//! 3. **link**: every value the fragment stage reads must be written by the
//!    vertex stage with the same type and interpolation ([`ShaderError::Link`])
//!
//! Steps 1 to 3 run on the CPU through [`ShaderProgram::load`], so broken
//! shaders are caught before any GPU object exists. [`Shader::from_files`]
//! then checks the vertex inputs against the vertex buffer layouts and turns
//! the program into a `wgpu::RenderPipeline`. Validation errors raised while
//! building the pipeline are caught in an error scope and also reported as
//! [`ShaderError::Link`].

use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use naga::{
    Binding, Handle, Interpolation, Module, Sampling, ScalarKind, Type, TypeInner,
    valid::{Capabilities, ValidationFlags, Validator},
};
use thiserror::Error;

use crate::{
    context::Context, data_structures::texture::Texture, pipelines::basic::mk_render_pipeline,
    resources,
};

/// Diagnostic logs are cut to this many bytes.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Name of the function a stage must define.
    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }

    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read {stage} shader {}: {source}", path.display())]
    Read {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader {label} failed to compile:\n{log}")]
    Compile {
        stage: ShaderStage,
        label: String,
        log: String,
    },
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },
}

/// A user-defined value passed between stages.
///
/// Float values without an `@interpolate` attribute carry WGSL's default of
/// `perspective, center`, integers are always `flat`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceVar {
    pub name: Option<String>,
    pub ty: TypeInner,
    pub interpolation: Option<Interpolation>,
    pub sampling: Option<Sampling>,
}

/// One validated stage and its inter-stage interface, keyed by `@location`.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    pub stage: ShaderStage,
    pub label: String,
    pub source: String,
    pub module: Module,
    pub inputs: BTreeMap<u32, InterfaceVar>,
    pub outputs: BTreeMap<u32, InterfaceVar>,
}

impl CompiledStage {
    pub fn entry_point(&self) -> &'static str {
        self.stage.entry_point()
    }
}

/// A vertex and fragment stage known to fit together.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
}

impl ShaderProgram {
    /// Read, compile and link a program without touching the GPU.
    pub fn load(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();
        let vertex_source = read_source(ShaderStage::Vertex, vertex_path)?;
        let fragment_source = read_source(ShaderStage::Fragment, fragment_path)?;

        let vertex = compile_stage(
            ShaderStage::Vertex,
            &vertex_path.display().to_string(),
            &vertex_source,
        )?;
        let fragment = compile_stage(
            ShaderStage::Fragment,
            &fragment_path.display().to_string(),
            &fragment_source,
        )?;
        link(vertex, fragment)
    }

    /// Locations carried from the vertex to the fragment stage.
    pub fn varyings(&self) -> Vec<u32> {
        self.fragment.inputs.keys().copied().collect()
    }
}

pub fn read_source(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    resources::load_string(path).map_err(|source| ShaderError::Read {
        stage,
        path: path.to_path_buf(),
        source,
    })
}

pub fn compile_stage(
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> Result<CompiledStage, ShaderError> {
    let compile_error = |log: String| ShaderError::Compile {
        stage,
        label: label.to_string(),
        log: truncate_log(log),
    };

    let module =
        naga::front::wgsl::parse_str(source).map_err(|e| compile_error(e.emit_to_string(source)))?;
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| compile_error(error_chain(&e)))?;

    let entry = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga() && ep.name == stage.entry_point())
        .ok_or_else(|| {
            compile_error(format!(
                "no @{} entry point named `{}`",
                stage,
                stage.entry_point()
            ))
        })?;

    let mut inputs = BTreeMap::new();
    for argument in &entry.function.arguments {
        collect_locations(
            &module,
            argument.ty,
            argument.binding.as_ref(),
            argument.name.as_deref(),
            &mut inputs,
        );
    }
    let mut outputs = BTreeMap::new();
    if let Some(result) = &entry.function.result {
        collect_locations(&module, result.ty, result.binding.as_ref(), None, &mut outputs);
    }

    log::debug!(
        "compiled {} stage {} (inputs {:?}, outputs {:?})",
        stage,
        label,
        inputs.keys().collect::<Vec<_>>(),
        outputs.keys().collect::<Vec<_>>()
    );

    Ok(CompiledStage {
        stage,
        label: label.to_string(),
        source: source.to_string(),
        module,
        inputs,
        outputs,
    })
}

/// Check that `fragment` only reads what `vertex` writes.
pub fn link(vertex: CompiledStage, fragment: CompiledStage) -> Result<ShaderProgram, ShaderError> {
    if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
        return Err(ShaderError::Link {
            log: format!(
                "expected a vertex and a fragment stage, got {} and {}",
                vertex.stage, fragment.stage
            ),
        });
    }

    let mut problems = Vec::new();
    for (location, input) in &fragment.inputs {
        match vertex.outputs.get(location) {
            None => problems.push(format!(
                "fragment input {} at @location({}) is not written by the vertex stage",
                describe_name(input),
                location
            )),
            Some(output) if output.ty != input.ty => problems.push(format!(
                "type mismatch at @location({}): vertex writes {}, fragment reads {}",
                location,
                describe_type(&output.ty),
                describe_type(&input.ty)
            )),
            Some(output)
                if (output.interpolation, output.sampling)
                    != (input.interpolation, input.sampling) =>
            {
                problems.push(format!(
                    "interpolation mismatch at @location({}): vertex uses {}, fragment uses {}",
                    location,
                    describe_interpolation(output),
                    describe_interpolation(input)
                ))
            }
            Some(_) => (),
        }
    }

    if !problems.is_empty() {
        return Err(ShaderError::Link {
            log: truncate_log(problems.join("\n")),
        });
    }

    Ok(ShaderProgram { vertex, fragment })
}

/// Check that every vertex input is fed by one of `layouts` with a matching format.
pub fn check_vertex_inputs(
    vertex: &CompiledStage,
    layouts: &[wgpu::VertexBufferLayout<'_>],
) -> Result<(), ShaderError> {
    let provided: BTreeMap<u32, wgpu::VertexFormat> = layouts
        .iter()
        .flat_map(|layout| layout.attributes.iter())
        .map(|attribute| (attribute.shader_location, attribute.format))
        .collect();

    let mut problems = Vec::new();
    for (location, input) in &vertex.inputs {
        match provided.get(location) {
            None => problems.push(format!(
                "vertex input {} at @location({}) is not provided by any vertex buffer",
                describe_name(input),
                location
            )),
            Some(format) => match (format_shape(*format), value_shape(&input.ty)) {
                (Some(given), Some(read)) if given != read => problems.push(format!(
                    "format mismatch at @location({}): buffer provides {:?}, vertex reads {}",
                    location,
                    format,
                    describe_type(&input.ty)
                )),
                _ => (),
            },
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShaderError::Link {
            log: truncate_log(problems.join("\n")),
        })
    }
}

/// Scalar kind and component count of the 32-bit vertex formats.
fn format_shape(format: wgpu::VertexFormat) -> Option<(ScalarKind, u32)> {
    use wgpu::VertexFormat as F;
    Some(match format {
        F::Float32 => (ScalarKind::Float, 1),
        F::Float32x2 => (ScalarKind::Float, 2),
        F::Float32x3 => (ScalarKind::Float, 3),
        F::Float32x4 => (ScalarKind::Float, 4),
        F::Uint32 => (ScalarKind::Uint, 1),
        F::Uint32x2 => (ScalarKind::Uint, 2),
        F::Uint32x3 => (ScalarKind::Uint, 3),
        F::Uint32x4 => (ScalarKind::Uint, 4),
        F::Sint32 => (ScalarKind::Sint, 1),
        F::Sint32x2 => (ScalarKind::Sint, 2),
        F::Sint32x3 => (ScalarKind::Sint, 3),
        F::Sint32x4 => (ScalarKind::Sint, 4),
        _ => return None,
    })
}

fn value_shape(ty: &TypeInner) -> Option<(ScalarKind, u32)> {
    match ty {
        TypeInner::Scalar(scalar) => Some((scalar.kind, 1)),
        TypeInner::Vector { size, scalar } => Some((scalar.kind, *size as u32)),
        _ => None,
    }
}

fn collect_locations(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    name: Option<&str>,
    out: &mut BTreeMap<u32, InterfaceVar>,
) {
    let inner = &module.types[ty].inner;
    match binding {
        Some(Binding::Location {
            location,
            interpolation,
            sampling,
            ..
        }) => {
            let (interpolation, sampling) = match (inner.scalar_kind(), interpolation) {
                (Some(ScalarKind::Float), None) => (
                    Some(Interpolation::Perspective),
                    sampling.or(Some(Sampling::Center)),
                ),
                (Some(ScalarKind::Sint | ScalarKind::Uint), _) => (Some(Interpolation::Flat), None),
                (_, interpolation) => (*interpolation, *sampling),
            };
            out.insert(
                *location,
                InterfaceVar {
                    name: name.map(str::to_string),
                    ty: inner.clone(),
                    interpolation,
                    sampling,
                },
            );
        }
        Some(Binding::BuiltIn(_)) => (),
        None => {
            if let TypeInner::Struct { members, .. } = inner {
                for member in members {
                    collect_locations(
                        module,
                        member.ty,
                        member.binding.as_ref(),
                        member.name.as_deref(),
                        out,
                    );
                }
            }
        }
    }
}

fn describe_name(var: &InterfaceVar) -> String {
    match &var.name {
        Some(name) => format!("`{}`", name),
        None => "(unnamed)".to_string(),
    }
}

fn describe_interpolation(var: &InterfaceVar) -> String {
    match (var.interpolation, var.sampling) {
        (Some(interpolation), Some(sampling)) => format!("{:?}, {:?}", interpolation, sampling),
        (Some(interpolation), None) => format!("{:?}", interpolation),
        (None, _) => "none".to_string(),
    }
    .to_lowercase()
}

fn describe_type(ty: &TypeInner) -> String {
    match ty {
        TypeInner::Scalar(scalar) => format!("{:?}{}", scalar.kind, scalar.width * 8),
        TypeInner::Vector { size, scalar } => {
            format!("vec{}<{:?}{}>", *size as u8, scalar.kind, scalar.width * 8)
        }
        other => format!("{:?}", other),
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut log = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        log.push_str(": ");
        log.push_str(&cause.to_string());
        source = cause.source();
    }
    log
}

/// Cut `log` to [`INFO_LOG_CAPACITY`] bytes without splitting a character.
pub fn truncate_log(mut log: String) -> String {
    if log.len() > INFO_LOG_CAPACITY {
        let mut end = INFO_LOG_CAPACITY;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}

/// A linked program on the GPU.
#[derive(Debug)]
pub struct Shader {
    pub pipeline: wgpu::RenderPipeline,
    pub program: ShaderProgram,
}

impl Shader {
    /// Load the two files and build a pipeline drawing into the surface of `ctx`.
    ///
    /// `bind_group_layouts` and `vertex_layouts` must describe what the WGSL
    /// declares. Anything the GPU rejects while building the pipeline is
    /// returned as [`ShaderError::Link`].
    pub async fn from_files(
        ctx: &Context,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_layouts: &[wgpu::VertexBufferLayout<'_>],
    ) -> Result<Self, ShaderError> {
        let program = ShaderProgram::load(vertex_path, fragment_path)?;
        check_vertex_inputs(&program.vertex, vertex_layouts)?;
        Self::new(ctx, program, bind_group_layouts, vertex_layouts).await
    }

    pub async fn new(
        ctx: &Context,
        program: ShaderProgram,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_layouts: &[wgpu::VertexBufferLayout<'_>],
    ) -> Result<Self, ShaderError> {
        let device = &ctx.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&program.vertex.label),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&program.vertex.source)),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&program.fragment.label),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&program.fragment.source)),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shader Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        let pipeline = mk_render_pipeline(
            device,
            &layout,
            ctx.config.format,
            Some(wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            }),
            Some(Texture::DEPTH_FORMAT),
            vertex_layouts,
            (&vertex, program.vertex.entry_point()),
            (&fragment, program.fragment.entry_point()),
        );

        if let Some(e) = device.pop_error_scope().await {
            return Err(ShaderError::Link {
                log: truncate_log(error_chain(&e)),
            });
        }
        log::info!(
            "linked shader program {} + {}",
            program.vertex.label,
            program.fragment.label
        );

        Ok(Self { pipeline, program })
    }

    /// Make this program current for the following draws.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) colour: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 1.0);
    out.colour = vec3<f32>(1.0, 0.5, 0.2);
    out.uv = position.xy;
    return out;
}
"#;

    const FRAGMENT: &str = r#"
@fragment
fn fs_main(@location(0) colour: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(colour, 1.0);
}
"#;

    fn compile(stage: ShaderStage, source: &str) -> Result<CompiledStage, ShaderError> {
        compile_stage(stage, "inline", source)
    }

    #[test]
    fn compiles_and_records_interface() {
        let vertex = compile(ShaderStage::Vertex, VERTEX).unwrap();
        assert_eq!(vertex.inputs.keys().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(vertex.outputs.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(vertex.outputs[&1].name.as_deref(), Some("uv"));

        let fragment = compile(ShaderStage::Fragment, FRAGMENT).unwrap();
        assert_eq!(fragment.inputs[&0].name.as_deref(), Some("colour"));
    }

    #[test]
    fn links_when_fragment_reads_a_subset() {
        let program = link(
            compile(ShaderStage::Vertex, VERTEX).unwrap(),
            compile(ShaderStage::Fragment, FRAGMENT).unwrap(),
        )
        .unwrap();
        assert_eq!(program.varyings(), vec![0]);
    }

    #[test]
    fn syntax_error_is_a_compile_error() {
        let err = compile(ShaderStage::Fragment, "@fragment fn fs_main( -> {").unwrap_err();
        match err {
            ShaderError::Compile { stage, log, .. } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!log.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn type_error_is_a_compile_error() {
        let source = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return 1.0;
}
"#;
        assert!(matches!(
            compile(ShaderStage::Fragment, source),
            Err(ShaderError::Compile { .. })
        ));
    }

    #[test]
    fn empty_source_does_not_compile() {
        let err = compile(ShaderStage::Vertex, "").unwrap_err();
        match err {
            ShaderError::Compile { log, .. } => assert!(log.contains("vs_main"), "{}", log),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stage_must_match_entry_point() {
        assert!(matches!(
            compile(ShaderStage::Vertex, FRAGMENT),
            Err(ShaderError::Compile { stage: ShaderStage::Vertex, .. })
        ));
    }

    #[test]
    fn missing_varying_fails_to_link() {
        let fragment = r#"
@fragment
fn fs_main(@location(4) shade: f32) -> @location(0) vec4<f32> {
    return vec4<f32>(shade);
}
"#;
        let err = link(
            compile(ShaderStage::Vertex, VERTEX).unwrap(),
            compile(ShaderStage::Fragment, fragment).unwrap(),
        )
        .unwrap_err();
        match err {
            ShaderError::Link { log } => {
                assert!(log.contains("@location(4)"), "{}", log);
                assert!(log.contains("`shade`"), "{}", log);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn mismatched_type_fails_to_link() {
        let fragment = r#"
@fragment
fn fs_main(@location(1) uv: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 1.0);
}
"#;
        let err = link(
            compile(ShaderStage::Vertex, VERTEX).unwrap(),
            compile(ShaderStage::Fragment, fragment).unwrap(),
        )
        .unwrap_err();
        match err {
            ShaderError::Link { log } => {
                assert!(log.contains("vec2<Float32>"), "{}", log);
                assert!(log.contains("vec3<Float32>"), "{}", log);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn flat_output_into_linear_input_fails_to_link() {
        let vertex = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) @interpolate(flat) colour: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 1.0);
    out.colour = position;
    return out;
}
"#;
        let fragment = r#"
@fragment
fn fs_main(@location(0) @interpolate(linear) colour: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(colour, 1.0);
}
"#;
        let err = link(
            compile(ShaderStage::Vertex, vertex).unwrap(),
            compile(ShaderStage::Fragment, fragment).unwrap(),
        )
        .unwrap_err();
        match err {
            ShaderError::Link { log } => {
                assert!(log.contains("interpolation mismatch at @location(0)"), "{}", log);
                assert!(log.contains("vertex uses flat"), "{}", log);
                assert!(log.ends_with("fragment uses linear"), "{}", log);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn spelled_out_default_interpolation_links() {
        let fragment = r#"
@fragment
fn fs_main(
    @location(0) @interpolate(perspective, center) colour: vec3<f32>,
) -> @location(0) vec4<f32> {
    return vec4<f32>(colour, 1.0);
}
"#;
        let program = link(
            compile(ShaderStage::Vertex, VERTEX).unwrap(),
            compile(ShaderStage::Fragment, fragment).unwrap(),
        )
        .unwrap();
        let colour = &program.fragment.inputs[&0];
        assert_eq!(colour.interpolation, Some(Interpolation::Perspective));
        assert_eq!(colour.sampling, Some(Sampling::Center));
    }

    #[test]
    fn integer_varyings_are_flat() {
        let vertex = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) @interpolate(flat) block: u32,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(0.0, 0.0, 0.0, 1.0);
    out.block = index;
    return out;
}
"#;
        let stage = compile(ShaderStage::Vertex, vertex).unwrap();
        assert_eq!(stage.outputs[&0].interpolation, Some(Interpolation::Flat));
        assert_eq!(stage.outputs[&0].sampling, None);
    }

    #[test]
    fn vertex_inputs_must_match_buffer_formats() {
        let vertex = compile(ShaderStage::Vertex, VERTEX).unwrap();
        let attributes = wgpu::vertex_attr_array![0 => Float32x3];
        let layout = wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        };
        check_vertex_inputs(&vertex, &[layout]).unwrap();

        let attributes = wgpu::vertex_attr_array![0 => Float32x2];
        let layout = wgpu::VertexBufferLayout {
            array_stride: 8,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        };
        match check_vertex_inputs(&vertex, &[layout]).unwrap_err() {
            ShaderError::Link { log } => {
                assert!(log.contains("format mismatch at @location(0)"), "{}", log);
                assert!(log.contains("Float32x2"), "{}", log);
                assert!(log.contains("vec3<Float32>"), "{}", log);
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            check_vertex_inputs(&vertex, &[]),
            Err(ShaderError::Link { .. })
        ));
    }

    #[test]
    fn swapped_stages_fail_to_link() {
        let vertex = compile(ShaderStage::Vertex, VERTEX).unwrap();
        assert!(matches!(
            link(vertex.clone(), vertex),
            Err(ShaderError::Link { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_source(ShaderStage::Vertex, Path::new("does/not/exist.wgsl")).unwrap_err();
        assert!(matches!(err, ShaderError::Read { stage: ShaderStage::Vertex, .. }));
        assert!(err.to_string().contains("does/not/exist.wgsl"));
    }

    #[test]
    fn logs_are_truncated_on_char_boundaries() {
        let log = "é".repeat(INFO_LOG_CAPACITY);
        let cut = truncate_log(log);
        assert!(cut.len() <= INFO_LOG_CAPACITY);
        assert_eq!(cut.len(), INFO_LOG_CAPACITY);
        assert_eq!(truncate_log("short".into()), "short");
    }
}
