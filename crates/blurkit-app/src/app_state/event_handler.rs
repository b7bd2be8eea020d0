//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use blurkit_supervisor::ExitTrigger;

use super::core::BlurkitApp;
use super::types::AppPhase;

impl ApplicationHandler for BlurkitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.wants_window() {
            return;
        }

        if let Err(e) = self.initialize_window(event_loop) {
            tracing::error!("Failed to open window: {e}");
            self.shutdown(ExitTrigger::StartupFailed);
            event_loop.exit();
            return;
        }

        // The probe may have finished while the window was being built.
        self.navigate_if_ready();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown(ExitTrigger::WindowClosed);
                // There is only one window, so this was also the last one.
                self.shutdown(ExitTrigger::AllWindowsClosed);
                event_loop.exit();
            }

            WindowEvent::Destroyed => {
                self.shutdown(ExitTrigger::AllWindowsClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.sync_webview_bounds(size);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase >= AppPhase::Closing {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown(ExitTrigger::EventLoopExiting);
    }
}
