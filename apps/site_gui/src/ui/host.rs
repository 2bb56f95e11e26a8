//! [`DisplayHost`] backed by an egui context.
//!
//! egui has no native surfaces or callbacks, so the host fakes both: one
//! logical surface covers the window, frame requests fire at the start of the
//! next egui pass and resize notifications are queued when the window rect
//! changes between passes.

use std::collections::{BTreeMap, BTreeSet};

use shared::SiteError;
use site_core::{
    host::{FrameRequestId, ListenerId, SurfaceId},
    DisplayHost, Frame, Viewport,
};

pub struct EguiHost {
    ctx: egui::Context,
    viewport: Viewport,
    next_handle: u64,
    surface: Option<SurfaceId>,
    listeners: BTreeMap<ListenerId, Option<Viewport>>,
    requested_frames: BTreeSet<FrameRequestId>,
    fired_frames: BTreeSet<FrameRequestId>,
    last_frame: Option<Frame>,
}

impl EguiHost {
    pub fn new(ctx: egui::Context) -> Self {
        let viewport = viewport_of(&ctx);
        Self {
            ctx,
            viewport,
            next_handle: 0,
            surface: None,
            listeners: BTreeMap::new(),
            requested_frames: BTreeSet::new(),
            fired_frames: BTreeSet::new(),
            last_frame: None,
        }
    }

    /// Called once per egui pass before the site is pumped.
    pub fn begin_frame(&mut self) {
        let viewport = viewport_of(&self.ctx);
        if viewport != self.viewport {
            self.viewport = viewport;
            for pending in self.listeners.values_mut() {
                *pending = Some(viewport);
            }
        }
        self.fired_frames.append(&mut self.requested_frames);
    }

    /// Most recent frame presented on the window surface.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.surface.and(self.last_frame.as_ref())
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

fn viewport_of(ctx: &egui::Context) -> Viewport {
    let rect = ctx.input(|i| i.screen_rect());
    Viewport::new(rect.width(), rect.height()).with_pixel_ratio(ctx.pixels_per_point())
}

impl DisplayHost for EguiHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn attach_surface(&mut self, _viewport: Viewport) -> Result<SurfaceId, SiteError> {
        if self.surface.is_some() {
            return Err(SiteError::surface("window surface is already attached"));
        }
        let id = SurfaceId(self.next_handle());
        self.surface = Some(id);
        Ok(id)
    }

    fn resize_surface(&mut self, _surface: SurfaceId, _viewport: Viewport) {
        // The window surface always tracks the egui screen rect.
    }

    fn present(&mut self, surface: SurfaceId, frame: &Frame) {
        if self.surface == Some(surface) {
            self.last_frame = Some(frame.clone());
        }
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        if self.surface == Some(surface) {
            self.surface = None;
            self.last_frame = None;
        }
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.next_handle());
        self.listeners.insert(id, None);
        id
    }

    fn unsubscribe_resize(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn take_resize(&mut self, listener: ListenerId) -> Option<Viewport> {
        self.listeners.get_mut(&listener).and_then(Option::take)
    }

    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_handle());
        self.requested_frames.insert(id);
        self.ctx.request_repaint();
        id
    }

    fn cancel_frame(&mut self, request: FrameRequestId) {
        self.requested_frames.remove(&request);
        self.fired_frames.remove(&request);
    }

    fn take_frame(&mut self, request: FrameRequestId) -> bool {
        self.fired_frames.remove(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_requests_fire_on_the_next_pass() {
        let mut host = EguiHost::new(egui::Context::default());
        let request = host.request_frame();
        assert!(!host.take_frame(request));
        host.begin_frame();
        assert!(host.take_frame(request));
        assert!(!host.take_frame(request));
    }

    #[test]
    fn only_one_window_surface_can_be_attached() {
        let mut host = EguiHost::new(egui::Context::default());
        let surface = host.attach_surface(host.viewport()).expect("surface");
        let err = host
            .attach_surface(host.viewport())
            .expect_err("second surface");
        assert_eq!(err.code(), shared::ErrorCode::SurfaceUnavailable);

        host.detach_surface(surface);
        assert!(host.attach_surface(host.viewport()).is_ok());
    }
}
