use crate::camera::OrbitCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use wavegrid_mesh::PointGrid;
use wavegrid_render::FrameState;

/// Mirrors `Uniforms` in the WGSL source, field for field.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    viewport: [f32; 2],
    time: f32,
    point_size: f32,
    freq1: f32,
    amp1: f32,
    speed1: f32,
    freq2: f32,
    amp2: f32,
    speed2: f32,
    _pad: [f32; 2],
}

impl Uniforms {
    fn new(view_proj: Mat4, viewport: [f32; 2], frame: &FrameState) -> Self {
        let p = &frame.params;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            viewport,
            time: frame.time,
            point_size: p.point_size,
            freq1: p.primary.frequency,
            amp1: p.primary.amplitude,
            speed1: p.primary.speed,
            freq2: p.secondary.frequency,
            amp2: p.secondary.amplitude,
            speed2: p.secondary.speed,
            _pad: [0.0; 2],
        }
    }
}

/// One grid point; the quad corners come from the vertex index.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct PointInstance {
    position: [f32; 2],
}

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

/// wgpu renderer for the displaced point grid.
pub struct PointCloudRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    depth_texture: wgpu::TextureView,
    viewport: [f32; 2],
    surface_format: wgpu::TextureFormat,
}

impl PointCloudRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        grid: &PointGrid,
    ) -> Self {
        let viewport = [width.max(1) as f32, height.max(1) as f32];

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(
                Mat4::IDENTITY,
                viewport,
                &FrameState::at(0.0, Default::default()),
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::point_shader_source().into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("point_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_points"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PointInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_points"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let instances: Vec<PointInstance> = grid
            .points()
            .iter()
            .map(|p| PointInstance {
                position: p.to_array(),
            })
            .collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point_instance_buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_count = instances.len() as u32;

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::info!(points = instance_count, "point cloud renderer ready");

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_buffer,
            instance_count,
            depth_texture,
            viewport,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
        self.viewport = [width.max(1) as f32, height.max(1) as f32];
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn point_count(&self) -> u32 {
        self.instance_count
    }

    /// Render one frame of the displaced grid.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        frame: &FrameState,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(
                camera.view_projection(),
                self.viewport,
                frame,
            )),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
            pass.draw(0..4, 0..self.instance_count);
        }

        queue.submit(std::iter::once(encoder.finish()));
        tracing::trace!(frame = frame.frame, time = frame.time, "frame submitted");
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavegrid_common::WaveParams;

    #[test]
    fn uniforms_match_wgsl_layout() {
        // mat4 (64) + vec2 (8) + 10 scalars (40) = 112, a multiple of 16.
        assert_eq!(std::mem::size_of::<Uniforms>(), 112);
        assert_eq!(std::mem::size_of::<PointInstance>(), 8);
    }

    #[test]
    fn uniforms_copy_frame_parameters() {
        let mut params = WaveParams::default();
        params.secondary.speed = 1.25;
        let frame = FrameState {
            frame: 3,
            time: 7.5,
            dt: 0.016,
            params,
        };
        let u = Uniforms::new(Mat4::IDENTITY, [640.0, 480.0], &frame);
        assert_eq!(u.time, 7.5);
        assert_eq!(u.speed2, 1.25);
        assert_eq!(u.point_size, params.point_size);
        assert_eq!(u.viewport, [640.0, 480.0]);
    }
}
