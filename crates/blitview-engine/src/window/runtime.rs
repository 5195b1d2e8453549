use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, LoadCtx};
use crate::device::{Gpu, GpuInit, SurfaceDrawables, SurfaceErrorAction, WgpuDevice};
use crate::view::{DrawOutcome, ImageView, RenderMode, ViewConfig};

use super::fit_size;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "blitview".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives its image view until it is closed.
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, view_config: ViewConfig, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, gpu_init, view_config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    // None when no rendering device could be acquired.
    #[borrows(window)]
    #[covariant]
    gpu: Option<Gpu<'this>>,
}

/// Retry budget for frames lost to surface reconfiguration.
///
/// One retry is allowed until a frame is presented or the window changes, so a
/// surface that stays outdated does not spin the event loop.
#[derive(Debug, Default)]
struct ReconfigureRetry {
    spent: bool,
}

impl ReconfigureRetry {
    /// Whether another frame should be requested after a reconfiguration.
    fn on_reconfigured(&mut self) -> bool {
        !std::mem::replace(&mut self.spent, true)
    }

    fn reset(&mut self) {
        self.spent = false;
    }
}

struct ViewerWindow {
    entry: WindowEntry,
    view: ImageView<WgpuDevice>,

    /// Drawable size the window was last fitted to.
    fitted: Option<PhysicalSize<u32>>,

    retry: ReconfigureRetry,
}

impl ViewerWindow {
    fn id(&self) -> WindowId {
        self.entry.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.entry.with_window(|w| w.request_redraw());
    }

    /// Sizes the window around a new drawable size, per the view's content mode.
    fn fit_window(&mut self) {
        let drawable = self.view.drawable_size();
        if self.fitted == Some(drawable) {
            return;
        }
        self.fitted = Some(drawable);

        let mode = self.view.config().content_mode;
        self.entry.with_window(|w| {
            let bounds = w
                .current_monitor()
                .map(|m| m.size())
                .unwrap_or(drawable);
            let target = fit_size(mode, drawable, bounds);
            if w.inner_size() != target {
                log::debug!("fitting window to {}x{}", target.width, target.height);
                let _ = w.request_inner_size(target);
            }
        });
    }

    /// Runs one redraw and reports what the surface asked for.
    fn redraw(&mut self) -> Option<SurfaceErrorAction> {
        let Self { entry, view, retry, .. } = self;

        entry.with_mut(|fields| {
            let Some(gpu) = fields.gpu.as_mut() else {
                log::trace!("redraw skipped: no rendering device");
                return None;
            };

            let mut drawables = SurfaceDrawables::new(gpu, fields.window);
            let outcome = view.draw(&mut drawables);
            log::trace!("redraw: {outcome:?}");
            if outcome == DrawOutcome::Presented {
                retry.reset();
            }

            drawables.error_action()
        })
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    view_config: ViewConfig,
    app: A,

    window: Option<ViewerWindow>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(initial: RuntimeConfig, gpu_init: GpuInit, view_config: ViewConfig, app: A) -> Self {
        Self {
            initial,
            gpu_init,
            view_config,
            app,
            window: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.initial.title.clone())
            .with_inner_size(self.initial.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = GpuInit {
            framebuffer_only: self.view_config.framebuffer_only,
            ..self.gpu_init.clone()
        };

        let entry = WindowEntryBuilder {
            window,
            gpu_builder: |w| match pollster::block_on(Gpu::new(w, gpu_init)) {
                Ok(gpu) => Some(gpu),
                Err(e) => {
                    log::warn!("GPU initialization failed: {e:#}");
                    None
                }
            },
        }
        .build();

        let size = entry.with_window(|w| w.inner_size());
        let device = entry.with_gpu(|gpu| gpu.as_ref().map(Gpu::render_device));

        let mut view = ImageView::new(self.view_config, size);
        self.app.view_did_load(&mut LoadCtx::new(&mut view, device));

        self.window = Some(ViewerWindow {
            entry,
            view,
            fitted: Some(size),
            retry: ReconfigureRetry::default(),
        });
        Ok(())
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit();
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        let Some(vw) = self.window.as_mut() else {
            return;
        };

        if vw.view.take_needs_display() {
            vw.fit_window();
            vw.request_redraw();
        } else if vw.view.config().render_mode == RenderMode::Continuous {
            vw.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        let Some(vw) = self.window.as_mut().filter(|vw| vw.id() == window_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.request_exit();
            }

            WindowEvent::Resized(new_size) => {
                vw.retry.reset();
                if vw.view.config().auto_resize_drawable {
                    vw.view.set_drawable_size(new_size);
                }
                vw.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if vw.view.config().auto_resize_drawable {
                    let new_size = vw.entry.with_window(|w| w.inner_size());
                    vw.view.set_drawable_size(new_size);
                }
                vw.request_redraw();
            }

            WindowEvent::RedrawRequested => match vw.redraw() {
                Some(SurfaceErrorAction::Fatal) => {
                    log::error!("surface out of memory; exiting");
                    self.request_exit();
                }
                // The frame was lost to reconfiguration; ask for another one.
                Some(SurfaceErrorAction::Reconfigured) => {
                    if vw.retry.on_reconfigured() {
                        vw.view.set_needs_display();
                    } else {
                        log::warn!("surface still outdated after reconfiguring; waiting for a resize");
                    }
                }
                Some(SurfaceErrorAction::SkipFrame) | None => {}
            },

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retries_once_per_streak() {
        let mut retry = ReconfigureRetry::default();
        assert!(retry.on_reconfigured());
        assert!(!retry.on_reconfigured());
        assert!(!retry.on_reconfigured());
    }

    #[test]
    fn reset_restores_the_retry() {
        let mut retry = ReconfigureRetry::default();
        retry.on_reconfigured();
        retry.reset();
        assert!(retry.on_reconfigured());
    }
}
