//! Shows a presentation in a native window backed by the platform webview.

use anyhow::Context;
use log::debug;
use slidev_lib::window::{Window, WindowRequest};
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop};
use tao::platform::run_return::EventLoopExtRunReturn;
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

/// A [`Window`] built on `tao` and `wry`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebviewWindow;

impl Window for WebviewWindow {
    fn open(&self, request: &WindowRequest) -> anyhow::Result<()> {
        let mut event_loop = EventLoop::new();
        let geometry = request.geometry;

        let window = WindowBuilder::new()
            .with_title(&request.title)
            .with_inner_size(LogicalSize::new(geometry.width, geometry.height))
            .with_position(LogicalPosition::new(geometry.x, geometry.y))
            .build(&event_loop)
            .context("Failed to create window")?;

        let builder = WebViewBuilder::new().with_url(&request.url);

        #[cfg(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "ios",
            target_os = "android"
        ))]
        let webview = builder.build(&window);

        #[cfg(not(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "ios",
            target_os = "android"
        )))]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = window
                .default_vbox()
                .ok_or_else(|| anyhow::anyhow!("Window has no GTK container for the webview"))?;
            builder.build_gtk(vbox)
        };

        let _webview = webview.context("Failed to create webview")?;
        debug!("showing {}", request.url);

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Wait;

            if let Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } = event
            {
                *control_flow = ControlFlow::Exit;
            }
        });

        Ok(())
    }
}
