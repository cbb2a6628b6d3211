use anyhow::{Context, Result};
use ouroboros::self_referencing;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{
    InputEvent, InputFrame, InputState, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};
use crate::time::Ticker;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Period between scheduled redraws.
    pub tick: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "dial".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            tick: Duration::from_secs(1),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs the event loop until it is closed or the app
    /// returns [`AppControl::Exit`].
    ///
    /// Returns the startup error when the window or its GPU context could not
    /// be created; a GPU failure can be recognized by downcasting to
    /// [`GpuUnsupported`](crate::device::GpuUnsupported).
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut driver = Driver::new(config, gpu_init, app);

        event_loop
            .run_app(&mut driver)
            .context("winit event loop terminated with error")?;

        driver.startup_error.map_or(Ok(()), Err)
    }
}

/// The window together with the GPU surface that borrows it.
#[self_referencing]
struct Surface {
    input_state: InputState,
    input_frame: InputFrame,
    ticker: Ticker,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl Surface {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(config.initial_size);
        let window = event_loop.create_window(attrs).context("failed to create window")?;

        SurfaceTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            ticker: Ticker::new(config.tick),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(anyhow::Error::new)
        .with_context(|| format!("failed to set up graphics for window {:?}", config.title))
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }
}

/// Event-loop handler driving the single window.
struct Driver<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    surface: Option<Surface>,
    startup_error: Option<anyhow::Error>,
}

impl<A: CoreApp + 'static> Driver<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self { config, gpu_init, app, surface: None, startup_error: None }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(surface) = self.surface.take() {
            log::info!("window {:?} closed", surface.id());
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let app = &mut self.app;
        let Some(surface) = self.surface.as_mut() else { return };

        let control = surface.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: fields.window },
                gpu: fields.gpu,
                input: fields.input_state,
                input_frame: fields.input_frame,
            };
            let control = app.on_frame(&mut ctx);

            // Per-frame deltas are consumed by the frame that saw them.
            fields.input_frame.clear();
            control
        });

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

impl<A: CoreApp + 'static> ApplicationHandler for Driver<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(surface) = self.surface.as_mut() {
            surface.with_ticker_mut(|t| t.reset());
            return;
        }

        match Surface::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(surface) => {
                log::info!(
                    "window {:?} created ({:?}, tick {:?})",
                    surface.id(),
                    self.config.title,
                    self.config.tick
                );
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = self.surface.as_mut() else { return };

        if surface.with_ticker_mut(|t| t.poll(Instant::now())) {
            surface.with_window(|w| w.request_redraw());
        }

        let flow = match surface.with_ticker(|t| t.deadline()) {
            Some(at) => ControlFlow::WaitUntil(at),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(flow);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let app = &mut self.app;
        let Some(surface) = self.surface.as_mut() else { return };

        let control = surface.with_mut(|fields| {
            if let Some(ev) = translate_input_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
                // Let the app react to input without waiting for the next tick.
                fields.window.request_redraw();
            }
            app.on_window_event(&event)
        });
        if control == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => surface.with_mut(|fields| {
                fields.gpu.resize(size);
                fields.window.request_redraw();
            }),
            WindowEvent::ScaleFactorChanged { .. } => surface.with_mut(|fields| {
                fields.gpu.resize(fields.window.inner_size());
                fields.window.request_redraw();
            }),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn translate_input_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }
        WindowEvent::MouseInput { state: st, button, .. } => {
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));
            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: match st {
                    ElementState::Pressed => MouseButtonState::Pressed,
                    ElementState::Released => MouseButtonState::Released,
                },
                x,
                y,
            }))
        }
        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
