use wavegrid_kernel::{FRACT_MAX, HASH_SCALE, HASH_WEIGHTS, LAYER2_ANGLE, LAYER2_TIME_SCALE};

/// WGSL body of the point-cloud shader. Kernel constants are prepended by
/// `point_shader_source`.
const POINT_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    viewport: vec2<f32>,
    time: f32,
    point_size: f32,
    freq1: f32,
    amp1: f32,
    speed1: f32,
    freq2: f32,
    amp2: f32,
    speed2: f32,
    _pad0: f32,
    _pad1: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct PointInput {
    @location(0) position: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) height: f32,
};

fn hash(p: vec2<f32>) -> f32 {
    return min(fract(sin(dot(p, HASH_WEIGHTS)) * HASH_SCALE), FRACT_MAX);
}

fn value_noise(p: vec2<f32>) -> f32 {
    let i = floor(p);
    let f = p - i;

    let a = hash(i);
    let b = hash(i + vec2<f32>(1.0, 0.0));
    let c = hash(i + vec2<f32>(0.0, 1.0));
    let d = hash(i + vec2<f32>(1.0, 1.0));

    let u = f * f * (3.0 - 2.0 * f);
    return mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
}

// Columns (cos, sin) and (-sin, cos): counter-clockwise rotation.
fn rotation(angle: f32) -> mat2x2<f32> {
    let c = cos(angle);
    let s = sin(angle);
    return mat2x2<f32>(c, s, -s, c);
}

fn displacement(p: vec2<f32>, t: f32) -> f32 {
    let layer1 = p * uniforms.freq1 + t * uniforms.speed1;
    let layer2 = rotation(LAYER2_ANGLE) * p.yx * uniforms.freq2
        - t * uniforms.speed2 * LAYER2_TIME_SCALE;
    return value_noise(layer1) * uniforms.amp1 + value_noise(layer2) * uniforms.amp2;
}

@vertex
fn vs_points(@builtin(vertex_index) vertex_index: u32, point: PointInput) -> VertexOutput {
    var corners = array<vec2<f32>, 4>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, 1.0),
    );
    let corner = corners[vertex_index];

    let z = displacement(point.position, uniforms.time);
    // The grid plane is laid flat: local (x, y, z) maps to world (x, z, -y).
    let world = vec4<f32>(point.position.x, z, -point.position.y, 1.0);
    let clip = uniforms.view_proj * world;

    // Expand to a point_size-pixel square in screen space.
    let offset = corner * uniforms.point_size / uniforms.viewport * clip.w;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(clip.xy + offset, clip.z, clip.w);
    out.corner = corner;
    out.height = z;
    return out;
}

@fragment
fn fs_points(in: VertexOutput) -> @location(0) vec4<f32> {
    if (dot(in.corner, in.corner) > 1.0) {
        discard;
    }
    let bound = max(uniforms.amp1 + uniforms.amp2, 0.0001);
    let t = clamp(in.height / bound, 0.0, 1.0);
    let low = vec3<f32>(0.10, 0.30, 0.80);
    let high = vec3<f32>(0.65, 0.95, 1.00);
    return vec4<f32>(mix(low, high, t), 1.0);
}
"#;

/// Full WGSL source for the point-cloud pipeline.
///
/// Constants are formatted with `{:?}`, which prints the shortest decimal
/// that parses back to the same `f32`, so CPU and GPU agree bit for bit on
/// the inputs.
pub fn point_shader_source() -> String {
    let mut src = String::new();
    src.push_str(&format!(
        "const HASH_WEIGHTS: vec2<f32> = vec2<f32>({:?}, {:?});\n",
        HASH_WEIGHTS.x, HASH_WEIGHTS.y
    ));
    src.push_str(&format!("const HASH_SCALE: f32 = {HASH_SCALE:?};\n"));
    src.push_str(&format!("const FRACT_MAX: f32 = {FRACT_MAX:?};\n"));
    src.push_str(&format!("const LAYER2_ANGLE: f32 = {LAYER2_ANGLE:?};\n"));
    src.push_str(&format!(
        "const LAYER2_TIME_SCALE: f32 = {LAYER2_TIME_SCALE:?};\n"
    ));
    src.push_str(POINT_SHADER);
    src
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(&point_shader_source()).expect("shader parses")
    }

    #[test]
    fn shader_validates() {
        let module = parse();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).expect("shader validates");
    }

    #[test]
    fn shader_entry_points() {
        let module = parse();
        let names: Vec<(&str, naga::ShaderStage)> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        assert!(names.contains(&("vs_points", naga::ShaderStage::Vertex)));
        assert!(names.contains(&("fs_points", naga::ShaderStage::Fragment)));
    }

    /// Source text of one WGSL function, whitespace collapsed.
    fn function_body(src: &str, name: &str) -> String {
        let start = src
            .find(&format!("fn {name}("))
            .unwrap_or_else(|| panic!("fn {name} missing"));
        let end = start + src[start..].find("\n}\n").expect("function end");
        src[start..end].split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn displacement_follows_kernel_layers() {
        let body = function_body(POINT_SHADER, "displacement");
        // Layer 1 scrolls forward along both axes.
        assert!(body.contains("let layer1 = p * uniforms.freq1 + t * uniforms.speed1;"));
        // Layer 2 swaps axes, rotates, and scrolls backwards at the fixed rate.
        assert!(body.contains(
            "let layer2 = rotation(LAYER2_ANGLE) * p.yx * uniforms.freq2 \
             - t * uniforms.speed2 * LAYER2_TIME_SCALE;"
        ));
        assert!(body.contains(
            "return value_noise(layer1) * uniforms.amp1 + value_noise(layer2) * uniforms.amp2;"
        ));
        assert!(body.contains("fn displacement(p: vec2<f32>, t: f32) -> f32"));
    }

    #[test]
    fn rotation_columns_match_glam() {
        let body = function_body(POINT_SHADER, "rotation");
        assert!(body.contains("return mat2x2<f32>(c, s, -s, c);"));

        // WGSL matrices are column-major, as are glam's: column 0 is (cos, sin).
        let m = wavegrid_kernel::rotation(0.3);
        assert_eq!(m.x_axis.to_array(), [0.3_f32.cos(), 0.3_f32.sin()]);
        assert_eq!(m.y_axis.to_array(), [-0.3_f32.sin(), 0.3_f32.cos()]);
    }

    #[test]
    fn noise_uses_smoothstep_blend() {
        let body = function_body(POINT_SHADER, "value_noise");
        assert!(body.contains("let u = f * f * (3.0 - 2.0 * f);"));
        assert!(body.contains("mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y"));

        let module = parse();
        let (_, displacement) = module
            .functions
            .iter()
            .find(|(_, f)| f.name.as_deref() == Some("displacement"))
            .expect("displacement function");
        assert_eq!(displacement.arguments.len(), 2);
        assert!(displacement.result.is_some());
    }

    #[test]
    fn constants_carry_kernel_values() {
        let src = point_shader_source();
        let line = src
            .lines()
            .find(|l| l.starts_with("const HASH_SCALE"))
            .unwrap();
        let literal = line
            .trim_start_matches("const HASH_SCALE: f32 = ")
            .trim_end_matches(';');
        assert_eq!(literal.parse::<f32>().unwrap(), HASH_SCALE);
        assert!(src.contains(&format!("{LAYER2_TIME_SCALE:?}")));
        assert!(src.contains("fn displacement"));
    }
}
