//! Textured quad renderer for game sprites.
//!
//! Every frame the caller hands [`SpriteRenderer::prepare`] the list of sprites to draw,
//! back to front. Sprites are uploaded to the GPU the first time their key is seen and
//! kept for as long as they stay on screen; a texture whose key was not drawn in a frame
//! is released at the end of that frame's [`SpriteRenderer::prepare`].
//!
//! Positions are given in the game's logical pixel space
//! ([`SCREEN_WIDTH`] x [`SCREEN_HEIGHT`], origin top-left) and mapped to
//! normalized device coordinates here, so the window's scale factor never
//! reaches the game.

use crate::assets::Sprite;
use crate::game::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::geometry::Rect;
use std::collections::{HashMap, HashSet};
use std::mem;
use wgpu::{
    BindGroup, BindGroupLayout, BufferUsages, ColorTargetState, ColorWrites, Device,
    FragmentState, MultisampleState, PrimitiveState, RenderPass, RenderPipeline,
    SamplerBindingType, ShaderStages, Texture, TextureFormat, VertexAttribute,
    VertexBufferLayout, VertexFormat, VertexState, util::DeviceExt,
};

/// Vertex of a sprite quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct SpriteVertex {
    /// Position in normalized device coordinates.
    position: [f32; 2],
    /// Texture coordinates, (0, 0) at the sprite's top-left pixel.
    uv: [f32; 2],
}

impl SpriteVertex {
    fn desc<'a>() -> VertexBufferLayout<'a> {
        VertexBufferLayout {
            array_stride: mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// One sprite placed on screen.
#[derive(Debug, Clone, Copy)]
pub struct SpriteDraw<'a> {
    /// Pixels to draw, cached on the GPU by [`Sprite::key`].
    pub sprite: &'a Sprite,
    /// Destination in logical screen pixels.
    pub rect: Rect,
}

impl<'a> SpriteDraw<'a> {
    /// Draws `sprite` into `rect`.
    pub fn new(sprite: &'a Sprite, rect: Rect) -> Self {
        Self { sprite, rect }
    }
}

/// Converts a logical screen rectangle to the four corners of a quad, clockwise
/// from the top-left.
fn quad_vertices(rect: Rect) -> [SpriteVertex; 4] {
    let to_ndc = |x: i32, y: i32| {
        [
            x as f32 / SCREEN_WIDTH as f32 * 2.0 - 1.0,
            1.0 - y as f32 / SCREEN_HEIGHT as f32 * 2.0,
        ]
    };
    [
        SpriteVertex {
            position: to_ndc(rect.x, rect.y),
            uv: [0.0, 0.0],
        },
        SpriteVertex {
            position: to_ndc(rect.right(), rect.y),
            uv: [1.0, 0.0],
        },
        SpriteVertex {
            position: to_ndc(rect.right(), rect.bottom()),
            uv: [1.0, 1.0],
        },
        SpriteVertex {
            position: to_ndc(rect.x, rect.bottom()),
            uv: [0.0, 1.0],
        },
    ]
}

/// Two triangles per quad.
fn quad_indices(quad: u32) -> [u32; 6] {
    let base = quad * 4;
    [base, base + 1, base + 2, base, base + 2, base + 3]
}

struct CachedTexture {
    _texture: Texture,
    bind_group: BindGroup,
}

/// Draws sprites as alpha-blended textured quads in submission order.
pub struct SpriteRenderer {
    render_pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: HashMap<String, CachedTexture>,
    /// Texture key of each quad in the current buffers, in draw order.
    batch: Vec<String>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
}

impl SpriteRenderer {
    /// Builds the sprite pipeline for a render target of `surface_format`.
    pub fn new(device: &Device, surface_format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Sprite Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SpriteVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Pixel art: no smoothing between texels.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            render_pipeline,
            bind_group_layout,
            sampler,
            textures: HashMap::new(),
            batch: Vec::new(),
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    /// Uploads any new sprites and rebuilds the quad buffers for `draws`.
    ///
    /// Sprites with an empty rectangle are skipped.
    pub fn prepare(&mut self, device: &Device, queue: &wgpu::Queue, draws: &[SpriteDraw<'_>]) {
        let mut vertices = Vec::with_capacity(draws.len() * 4);
        let mut indices = Vec::with_capacity(draws.len() * 6);
        let mut used = HashSet::with_capacity(draws.len());
        self.batch.clear();

        for draw in draws {
            if draw.rect.width <= 0 || draw.rect.height <= 0 {
                continue;
            }
            let key = draw.sprite.key();
            if !self.textures.contains_key(key) {
                let texture = self.upload(device, queue, draw.sprite);
                self.textures.insert(key.to_string(), texture);
                log::trace!("uploaded sprite texture {key}");
            }
            used.insert(key);

            indices.extend_from_slice(&quad_indices(self.batch.len() as u32));
            vertices.extend_from_slice(&quad_vertices(draw.rect));
            self.batch.push(key.to_string());
        }

        self.textures.retain(|key, _| used.contains(key.as_str()));

        if self.batch.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: BufferUsages::INDEX,
        }));
    }

    /// Records the quads built by the last [`SpriteRenderer::prepare`] into `render_pass`.
    pub fn render(&self, render_pass: &mut RenderPass<'_>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for (quad, key) in self.batch.iter().enumerate() {
            let Some(texture) = self.textures.get(key) else {
                continue;
            };
            let first = quad as u32 * 6;
            render_pass.set_bind_group(0, &texture.bind_group, &[]);
            render_pass.draw_indexed(first..first + 6, 0, 0..1);
        }
    }

    fn upload(&self, device: &Device, queue: &wgpu::Queue, sprite: &Sprite) -> CachedTexture {
        let pixels = sprite.pixels();
        let (width, height) = pixels.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("Sprite texture: {}", sprite.key())),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            pixels.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
            label: Some(&format!("Sprite bind group: {}", sprite.key())),
        });

        CachedTexture {
            _texture: texture,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_quad_spans_ndc() {
        let quad = quad_vertices(Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT));
        assert_eq!(quad[0].position, [-1.0, 1.0]);
        assert_eq!(quad[1].position, [1.0, 1.0]);
        assert_eq!(quad[2].position, [1.0, -1.0]);
        assert_eq!(quad[3].position, [-1.0, -1.0]);
        assert_eq!(quad[0].uv, [0.0, 0.0]);
        assert_eq!(quad[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn offscreen_rects_map_outside_clip_space() {
        let quad = quad_vertices(Rect::new(-500, 250, 500, 250));
        assert_eq!(quad[0].position, [-2.0, 0.0]);
        assert_eq!(quad[2].position, [-1.0, -1.0]);
    }

    #[test]
    fn indices_address_their_own_quad() {
        assert_eq!(quad_indices(0), [0, 1, 2, 0, 2, 3]);
        assert_eq!(quad_indices(3), [12, 13, 14, 12, 14, 15]);
    }
}
