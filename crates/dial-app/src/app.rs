use dial_engine::canvas::SceneCanvas;
use dial_engine::core::{App, AppControl, FrameCtx};
use dial_engine::input::MouseButton;
use dial_engine::render::SceneRenderer;
use dial_engine::window::CursorIcon;
use dial_face::{ClockRenderer, ClockStyle, LocalClock, TimeSource};

use crate::config::AppConfig;
use crate::fonts;
use crate::link;

/// The clock window.
///
/// The face is built on the first frame from the window's logical size at
/// that moment and keeps that layout for the rest of the run.
pub struct ClockApp<T = LocalClock> {
    config: AppConfig,
    style: ClockStyle,
    time: T,
    clock: Option<ClockRenderer<SceneCanvas>>,
    scene: SceneRenderer,
}

impl ClockApp {
    pub fn new(config: AppConfig) -> Self {
        Self::with_time_source(config, LocalClock)
    }
}

impl<T: TimeSource> ClockApp<T> {
    pub fn with_time_source(config: AppConfig, time: T) -> Self {
        Self {
            config,
            style: ClockStyle::default(),
            time,
            clock: None,
            scene: SceneRenderer::new(),
        }
    }

    fn build_clock(&self, ctx: &FrameCtx<'_, '_>) -> Option<ClockRenderer<SceneCanvas>> {
        let viewport = ctx.window.logical_size();
        if !viewport.is_valid() {
            log::debug!("window has no area yet; deferring clock setup");
            return None;
        }

        let (fonts, font) = fonts::load_fonts(&self.config.font_paths);
        let mut canvas = SceneCanvas::new(viewport, fonts).with_background(self.style.background);
        if let Some(id) = font {
            canvas = canvas.with_font(id);
        }
        log::info!("clock face {}x{}", viewport.width, viewport.height);
        Some(ClockRenderer::new(viewport, Some(canvas)).with_style(self.style.clone()))
    }

    fn handle_pointer(&self, ctx: &FrameCtx<'_, '_>) {
        if ctx.input_frame.pointer_moved {
            ctx.window.set_cursor(CursorIcon::Pointer);
        }
        if ctx.input_frame.clicked(MouseButton::Left) {
            if let Err(e) = link::open(&self.config.link) {
                log::warn!("{e}");
            }
        }
    }
}

impl<T: TimeSource + 'static> App for ClockApp<T> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.handle_pointer(ctx);

        if self.clock.is_none() {
            self.clock = self.build_clock(ctx);
        }
        let Some(clock) = self.clock.as_mut() else {
            return AppControl::Continue;
        };
        if !clock.is_supported() {
            return AppControl::Continue;
        }

        let now = self.time.now();
        if let Some(canvas) = clock.canvas_mut() {
            canvas.set_text_scale(ctx.window.scale_factor());
        }
        clock.render(now);

        let Some(canvas) = clock.canvas_mut() else {
            return AppControl::Continue;
        };
        let background = canvas.background();
        let (draw_list, fonts) = canvas.parts_mut();
        let scene = &mut self.scene;
        ctx.render(background, |rctx, target| {
            scene.render(rctx, target, draw_list, fonts);
        })
    }
}
