//! WGPU-based renderer for Dragon Escape.
//!
//! This module provides [`WgpuRenderer`], which owns the surface, device and queue and
//! turns one frame's list of [`SpriteDraw`]s into a presented image: the frame is cleared
//! to white and the sprites are drawn over it back to front.
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`] once the window exists and call
//! [`WgpuRenderer::render_frame`] each tick.

use crate::renderer::RenderError;
use crate::renderer::sprite::{SpriteDraw, SpriteRenderer};

/// Owns every GPU resource the game needs.
pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    /// The WGPU device for resource creation.
    pub device: wgpu::Device,
    /// The WGPU queue for submitting commands.
    pub queue: wgpu::Queue,
    /// Draws the game's sprites.
    pub sprite_renderer: SpriteRenderer,
}

impl WgpuRenderer {
    /// Initializes a new [`WgpuRenderer`] for a `width` x `height` physical pixel surface.
    ///
    /// # Errors
    /// Fails if no adapter can drive `surface`, the device cannot be opened, or the surface
    /// reports no usable texture format.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        log::info!("using adapter {:?}", adapter.get_info().name);
        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;

        surface.configure(&device, &surface_config);

        let sprite_renderer = SpriteRenderer::new(&device, surface_config.format);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            sprite_renderer,
        })
    }

    /// Reconfigures the surface after the window's physical size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Clears to white, draws `draws` in order and presents.
    ///
    /// # Errors
    /// Returns [`RenderError::Surface`] when no frame could be acquired. A lost or
    /// outdated surface is reconfigured before returning, so the next call can succeed.
    pub fn render_frame(&mut self, draws: &[SpriteDraw<'_>]) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err @ (wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost)) => {
                self.surface.configure(&self.device, &self.surface_config);
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.sprite_renderer.prepare(&self.device, &self.queue, draws);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.sprite_renderer.render(&mut render_pass);
        }

        self.queue.submit(Some(encoder.finish()));
        surface_texture.present();
        self.device.poll(wgpu::Maintain::Poll);
        Ok(())
    }

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, RenderError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(RenderError::NoAdapter)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
        let device = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        Ok(device)
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, RenderError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        })
    }
}
