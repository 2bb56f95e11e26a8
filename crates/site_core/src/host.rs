//! Boundary with the display environment, plus an in-memory host used by
//! tests and the command-line tools.

use std::collections::{BTreeMap, BTreeSet};

use shared::SiteError;

use crate::background::Frame;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Width over height; a collapsed viewport reports 1.0.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

macro_rules! handle_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);
    };
}

handle_newtype!(SurfaceId);
handle_newtype!(ListenerId);
handle_newtype!(FrameRequestId);

/// What the background animator needs from its environment. Hosts deliver
/// resize and refresh notifications by queueing them; the animator drains
/// them with [`DisplayHost::take_resize`] and [`DisplayHost::take_frame`].
pub trait DisplayHost {
    fn viewport(&self) -> Viewport;

    fn attach_surface(&mut self, viewport: Viewport) -> Result<SurfaceId, SiteError>;
    fn resize_surface(&mut self, surface: SurfaceId, viewport: Viewport);
    fn present(&mut self, surface: SurfaceId, frame: &Frame);
    fn detach_surface(&mut self, surface: SurfaceId);

    fn subscribe_resize(&mut self) -> ListenerId;
    fn unsubscribe_resize(&mut self, listener: ListenerId);
    /// Latest viewport delivered to `listener` since the previous call.
    fn take_resize(&mut self, listener: ListenerId) -> Option<Viewport>;

    fn request_frame(&mut self) -> FrameRequestId;
    fn cancel_frame(&mut self, request: FrameRequestId);
    /// True once the refresh callback for `request` has fired.
    fn take_frame(&mut self, request: FrameRequestId) -> bool;
}

#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Viewport,
    graphics_available: bool,
    next_handle: u64,
    surfaces: BTreeMap<SurfaceId, Viewport>,
    listeners: BTreeMap<ListenerId, Option<Viewport>>,
    requested_frames: BTreeSet<FrameRequestId>,
    fired_frames: BTreeSet<FrameRequestId>,
    presented_frames: u64,
    last_frame: Option<Frame>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            graphics_available: true,
            next_handle: 0,
            surfaces: BTreeMap::new(),
            listeners: BTreeMap::new(),
            requested_frames: BTreeSet::new(),
            fired_frames: BTreeSet::new(),
            presented_frames: 0,
            last_frame: None,
        }
    }

    /// A host that refuses to hand out rendering surfaces.
    pub fn without_graphics(viewport: Viewport) -> Self {
        Self {
            graphics_available: false,
            ..Self::new(viewport)
        }
    }

    /// Simulates a window resize: updates the viewport and notifies every
    /// subscribed listener. Returns how many listeners were notified.
    pub fn resize(&mut self, viewport: Viewport) -> usize {
        self.viewport = viewport;
        for pending in self.listeners.values_mut() {
            *pending = Some(viewport);
        }
        self.listeners.len()
    }

    /// Simulates one display refresh: fires every outstanding frame request.
    /// Returns how many requests fired.
    pub fn refresh(&mut self) -> usize {
        let fired = self.requested_frames.len();
        self.fired_frames.append(&mut self.requested_frames);
        fired
    }

    pub fn attached_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    pub fn surface_viewport(&self, surface: SurfaceId) -> Option<Viewport> {
        self.surfaces.get(&surface).copied()
    }

    pub fn resize_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_frame_requests(&self) -> usize {
        self.requested_frames.len() + self.fired_frames.len()
    }

    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl DisplayHost for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn attach_surface(&mut self, viewport: Viewport) -> Result<SurfaceId, SiteError> {
        if !self.graphics_available {
            return Err(SiteError::surface("headless host has no graphics capability"));
        }
        let id = SurfaceId(self.next_handle());
        self.surfaces.insert(id, viewport);
        Ok(id)
    }

    fn resize_surface(&mut self, surface: SurfaceId, viewport: Viewport) {
        if let Some(size) = self.surfaces.get_mut(&surface) {
            *size = viewport;
        }
    }

    fn present(&mut self, surface: SurfaceId, frame: &Frame) {
        if self.surfaces.contains_key(&surface) {
            self.presented_frames += 1;
            self.last_frame = Some(frame.clone());
        }
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
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
    fn resize_is_only_delivered_to_subscribed_listeners() {
        let mut host = HeadlessHost::new(Viewport::new(800.0, 600.0));
        let listener = host.subscribe_resize();
        assert_eq!(host.take_resize(listener), None);

        assert_eq!(host.resize(Viewport::new(400.0, 200.0)), 1);
        assert_eq!(host.take_resize(listener), Some(Viewport::new(400.0, 200.0)));
        assert_eq!(host.take_resize(listener), None);

        host.unsubscribe_resize(listener);
        assert_eq!(host.resize(Viewport::new(100.0, 100.0)), 0);
        assert_eq!(host.take_resize(listener), None);
    }

    #[test]
    fn frame_requests_fire_once_per_refresh() {
        let mut host = HeadlessHost::new(Viewport::new(800.0, 600.0));
        let request = host.request_frame();
        assert!(!host.take_frame(request));
        assert_eq!(host.refresh(), 1);
        assert!(host.take_frame(request));
        assert!(!host.take_frame(request));

        let cancelled = host.request_frame();
        host.cancel_frame(cancelled);
        assert_eq!(host.refresh(), 0);
        assert!(!host.take_frame(cancelled));
        assert_eq!(host.pending_frame_requests(), 0);
    }

    #[test]
    fn surfaces_attach_and_detach() {
        let mut host = HeadlessHost::new(Viewport::new(800.0, 600.0));
        let surface = host.attach_surface(host.viewport()).expect("surface");
        assert_eq!(host.attached_surfaces(), 1);
        host.resize_surface(surface, Viewport::new(10.0, 20.0));
        assert_eq!(host.surface_viewport(surface), Some(Viewport::new(10.0, 20.0)));
        host.detach_surface(surface);
        assert_eq!(host.attached_surfaces(), 0);
    }

    #[test]
    fn graphics_less_host_refuses_surfaces() {
        let mut host = HeadlessHost::without_graphics(Viewport::new(800.0, 600.0));
        let err = host.attach_surface(host.viewport()).expect_err("no graphics");
        assert_eq!(err.code(), shared::ErrorCode::SurfaceUnavailable);
    }

    #[test]
    fn aspect_handles_collapsed_viewports() {
        assert_eq!(Viewport::new(1600.0, 800.0).aspect(), 2.0);
        assert_eq!(Viewport::new(1600.0, 0.0).aspect(), 1.0);
    }
}
