//! GPU presentation layer: surface management and the dot/link pipelines.
//!
//! The simulation stays on the CPU; each frame the app uploads one instance
//! per particle and one per connective edge, and the shaders expand them
//! into quads. Draw order is dots first, then links on top.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::visuals::VisualConfig;

pub(crate) const DOTS_SHADER: &str = include_str!("dots.wgsl");
pub(crate) const LINKS_SHADER: &str = include_str!("links.wgsl");

/// Per-particle instance data.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct DotInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub glow: f32,
}

/// Per-edge instance data.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct LinkInstance {
    pub a: [f32; 2],
    pub b: [f32; 2],
    pub opacity: f32,
    pub _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    surface_size: [f32; 2],
    link_width: f32,
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct StyleUniforms {
    core: [f32; 4],
    base_inner: [f32; 4],
    base_mid: [f32; 4],
    outer_inner: [f32; 4],
    outer_mid: [f32; 4],
    link: [f32; 4],
}

impl StyleUniforms {
    fn from_visuals(visuals: &VisualConfig) -> Self {
        Self {
            core: visuals.core.to_array(),
            base_inner: visuals.base_inner.to_array(),
            base_mid: visuals.base_mid.to_array(),
            outer_inner: visuals.outer_inner.to_array(),
            outer_mid: visuals.outer_mid.to_array(),
            link: visuals.link.to_array(),
        }
    }
}

pub(crate) struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    dot_pipeline: wgpu::RenderPipeline,
    link_pipeline: wgpu::RenderPipeline,
    dot_buffer: wgpu::Buffer,
    link_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    background: wgpu::Color,
    link_width: f32,
    max_dots: u32,
    max_links: u32,
    overflow_reported: bool,
}

impl GpuState {
    pub async fn new(
        window: Arc<Window>,
        visuals: &VisualConfig,
        max_dots: u32,
        max_links: u32,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("dotfield device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            surface_size: [config.width as f32, config.height as f32],
            link_width: visuals.link_width,
            _pad: 0.0,
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let style = StyleUniforms::from_visuals(visuals);
        let style_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Style Buffer"),
            contents: bytemuck::bytes_of(&style),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let dot_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dot Instance Buffer"),
            size: max_dots.max(1) as u64 * std::mem::size_of::<DotInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let link_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Link Instance Buffer"),
            size: max_links.max(1) as u64 * std::mem::size_of::<LinkInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Field Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Field Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: style_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Field Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let dot_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            surface_format,
            "Dot",
            DOTS_SHADER,
            &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<DotInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 8,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32,
                    },
                    wgpu::VertexAttribute {
                        offset: 12,
                        shader_location: 2,
                        format: wgpu::VertexFormat::Float32,
                    },
                ],
            }],
        );

        let link_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            surface_format,
            "Link",
            LINKS_SHADER,
            &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LinkInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 8,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 16,
                        shader_location: 2,
                        format: wgpu::VertexFormat::Float32,
                    },
                ],
            }],
        );

        let background = wgpu::Color {
            r: visuals.background.x as f64,
            g: visuals.background.y as f64,
            b: visuals.background.z as f64,
            a: visuals.background.w as f64,
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            dot_pipeline,
            link_pipeline,
            dot_buffer,
            link_buffer,
            uniform_buffer,
            bind_group,
            background,
            link_width: visuals.link_width,
            max_dots,
            max_links,
            overflow_reported: false,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let uniforms = Uniforms {
                surface_size: [self.config.width as f32, self.config.height as f32],
                link_width: self.link_width,
                _pad: 0.0,
            };
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
    }

    pub fn render(
        &mut self,
        dots: &[DotInstance],
        links: &[LinkInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let num_dots = dots.len().min(self.max_dots as usize);
        let num_links = links.len().min(self.max_links as usize);
        if (num_dots < dots.len() || num_links < links.len()) && !self.overflow_reported {
            self.overflow_reported = true;
            log::warn!(
                "instance buffers full: drawing {num_dots}/{} dots, {num_links}/{} links",
                dots.len(),
                links.len()
            );
        }

        if num_dots > 0 {
            self.queue
                .write_buffer(&self.dot_buffer, 0, bytemuck::cast_slice(&dots[..num_dots]));
        }
        if num_links > 0 {
            self.queue.write_buffer(
                &self.link_buffer,
                0,
                bytemuck::cast_slice(&links[..num_links]),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Field Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);

            render_pass.set_pipeline(&self.dot_pipeline);
            render_pass.set_vertex_buffer(0, self.dot_buffer.slice(..));
            render_pass.draw(0..6, 0..num_dots as u32);

            render_pass.set_pipeline(&self.link_pipeline);
            render_pass.set_vertex_buffer(0, self.link_buffer.slice(..));
            render_pass.draw(0..6, 0..num_links as u32);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    name: &str,
    shader_source: &str,
    buffers: &[wgpu::VertexBufferLayout<'_>],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{name} Shader")),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{name} Pipeline")),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
