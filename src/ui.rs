//! egui overlay: top navigation bar and the dismissible info panel.

use winit::window::Window;

use crate::render::GpuState;

/// Panel palette, roughly the site's amber-on-white scheme.
const AMBER: egui::Color32 = egui::Color32::from_rgb(217, 119, 6);
const AMBER_DARK: egui::Color32 = egui::Color32::from_rgb(120, 53, 15);
const PURPLE_DARK: egui::Color32 = egui::Color32::from_rgb(107, 33, 168);
const BODY_TEXT: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);
const HINT_TEXT: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);

/// egui overlay state: context, winit bridge, renderer and panel toggles.
pub struct UiOverlay {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,

    /// Info panel open/closed; collapses to a small reopen button.
    pub info_open: bool,
}

impl UiOverlay {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            info_open: true,
        }
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Whether egui wants the pointer (so a press should not reach the cat).
    pub fn wants_pointer(&self) -> bool {
        self.egui_ctx.wants_pointer_input()
    }

    /// Run the egui frame and produce paint output.
    /// Returns (clipped_primitives, textures_delta, screen_descriptor).
    pub fn run_frame(
        &mut self,
        window: &Window,
        screen_w: u32,
        screen_h: u32,
    ) -> (
        Vec<egui::epaint::ClippedPrimitive>,
        egui::TexturesDelta,
        egui_wgpu::ScreenDescriptor,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        // Mutable control — read from self, written back after run().
        let mut info_open = self.info_open;

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            draw_ui(ctx, &mut info_open);
        });

        self.info_open = info_open;

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_w, screen_h],
            pixels_per_point,
        };

        (clipped_primitives, full_output.textures_delta, screen_descriptor)
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare_egui(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor)
    }

    /// Render egui into the given render pass.
    pub fn render_egui(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        for &id in &textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

fn draw_ui(ctx: &egui::Context, info_open: &mut bool) {
    // --- Navigation bar ---
    let nav_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 210))
        .inner_margin(egui::Margin::symmetric(0, 14));

    egui::TopBottomPanel::top("navbar")
        .frame(nav_frame)
        .show_separator_line(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    // Center the wordmark by padding half the remaining width.
                    let text_width = 130.0;
                    let pad = (ui.available_width() - text_width) * 0.5;
                    ui.add_space(pad.max(0.0));
                    ui.spacing_mut().item_spacing.x = 0.0;
                    ui.label(
                        egui::RichText::new("sleepycat")
                            .color(AMBER)
                            .strong()
                            .size(22.0),
                    );
                    ui.label(
                        egui::RichText::new(".com")
                            .color(AMBER_DARK)
                            .strong()
                            .size(22.0),
                    );
                });
            });
        });

    // --- Info panel (bottom-left), or its reopen button when closed ---
    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 215))
        .corner_radius(8.0)
        .inner_margin(12.0);

    if *info_open {
        egui::Window::new("info_panel")
            .title_bar(false)
            .anchor(egui::Align2::LEFT_BOTTOM, [20.0, -20.0])
            .resizable(false)
            .default_width(260.0)
            .frame(panel_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Sleepy Cat")
                            .color(PURPLE_DARK)
                            .strong()
                            .size(16.0),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            *info_open = false;
                        }
                    });
                });
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(
                        "Drag the cat to move it around. It will wake up when moved \
                         and fall back asleep after a few seconds.",
                    )
                    .color(BODY_TEXT)
                    .size(13.0),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Your purr-fect screen companion ✨")
                        .color(HINT_TEXT)
                        .size(11.0),
                );
            });
    } else {
        egui::Window::new("info_button")
            .title_bar(false)
            .anchor(egui::Align2::LEFT_BOTTOM, [20.0, -20.0])
            .resizable(false)
            .frame(panel_frame)
            .show(ctx, |ui| {
                if ui
                    .button(egui::RichText::new("ℹ").color(PURPLE_DARK).size(16.0))
                    .clicked()
                {
                    *info_open = true;
                }
            });
    }
}
