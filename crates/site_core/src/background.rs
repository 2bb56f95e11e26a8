//! Decorative rotating particle field.
//!
//! Lifecycle: [`BackgroundAnimator::mount`] attaches one surface, subscribes
//! to resize and requests the first refresh callback. Each fired callback
//! advances time, rotates the field, presents a projected frame and requests
//! the next one. [`BackgroundAnimator::unmount`] releases all three.

use std::f64::consts::TAU;

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::SiteError;

use crate::{
    config::BackgroundSettings,
    host::{DisplayHost, FrameRequestId, ListenerId, SurfaceId, Viewport},
};

/// Fixed cloud of points, uniformly spread over a cube centred at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
}

impl ParticleField {
    pub fn generate(count: usize, spread: f32, rng: &mut impl Rng) -> Self {
        let positions = (0..count)
            .map(|_| {
                [
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread,
                ]
            })
            .collect();
        Self { positions }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Perspective camera on the +Z axis looking toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Camera {
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    fn focal(&self) -> f32 {
        1.0 / (self.fov_degrees.to_radians() * 0.5).tan()
    }

    /// Normalized device coordinates and view depth of a world-space point,
    /// or `None` when it falls outside the frustum.
    pub fn project(&self, point: [f32; 3]) -> Option<([f32; 2], f32)> {
        let depth = self.distance - point[2];
        if depth <= self.near || depth >= self.far {
            return None;
        }
        let focal = self.focal();
        let x = point[0] * focal / (self.aspect * depth);
        let y = point[1] * focal / depth;
        if x.abs() > 1.0 || y.abs() > 1.0 {
            return None;
        }
        Some(([x, y], depth))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Logical pixels from the top-left corner of the surface.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub color: [u8; 3],
    pub opacity: f32,
    pub points: Vec<ProjectedPoint>,
}

/// Rotation about X then Y, matching an XYZ Euler order with no Z term.
fn rotate(point: [f32; 3], rotation_x: f32, rotation_y: f32) -> [f32; 3] {
    let (sin_y, cos_y) = rotation_y.sin_cos();
    let x = point[0] * cos_y + point[2] * sin_y;
    let z = -point[0] * sin_y + point[2] * cos_y;

    let (sin_x, cos_x) = rotation_x.sin_cos();
    let y = point[1] * cos_x - z * sin_x;
    let z = point[1] * sin_x + z * cos_x;
    [x, y, z]
}

pub struct BackgroundAnimator {
    settings: BackgroundSettings,
    field: ParticleField,
    camera: Camera,
    viewport: Viewport,
    time: f64,
    rotation_x: f64,
    rotation_y: f64,
    frames_rendered: u64,
    surface: Option<SurfaceId>,
    resize_listener: Option<ListenerId>,
    frame_request: Option<FrameRequestId>,
}

impl BackgroundAnimator {
    pub fn mount(
        host: &mut dyn DisplayHost,
        settings: &BackgroundSettings,
    ) -> Result<Self, SiteError> {
        let viewport = host.viewport();
        let surface = host.attach_surface(viewport)?;

        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = ParticleField::generate(settings.particle_count, settings.spread, &mut rng);
        let camera = Camera {
            fov_degrees: settings.fov_degrees,
            aspect: viewport.aspect(),
            near: settings.near,
            far: settings.far,
            distance: settings.camera_distance,
        };

        let resize_listener = host.subscribe_resize();
        let frame_request = host.request_frame();

        tracing::info!(
            particles = field.len(),
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = viewport.pixel_ratio,
            "background animator mounted"
        );

        Ok(Self {
            settings: settings.clone(),
            field,
            camera,
            viewport,
            time: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            frames_rendered: 0,
            surface: Some(surface),
            resize_listener: Some(resize_listener),
            frame_request: Some(frame_request),
        })
    }

    /// Drains pending host notifications. Returns `true` when a frame was
    /// presented.
    pub fn pump(&mut self, host: &mut dyn DisplayHost) -> bool {
        let Some(surface) = self.surface else {
            return false;
        };

        if let Some(listener) = self.resize_listener {
            if let Some(viewport) = host.take_resize(listener) {
                self.resize(host, viewport);
            }
        }

        let Some(request) = self.frame_request else {
            return false;
        };
        if !host.take_frame(request) {
            return false;
        }

        self.advance();
        let frame = self.render();
        host.present(surface, &frame);
        self.frames_rendered += 1;
        self.frame_request = Some(host.request_frame());
        true
    }

    pub fn advance(&mut self) {
        self.time += f64::from(self.settings.time_step);
        self.rotation_x = self.time * f64::from(self.settings.rotation_rate_x);
        self.rotation_y = self.time * f64::from(self.settings.rotation_rate_y);
    }

    pub fn render(&self) -> Frame {
        let viewport = self.viewport;
        let half_height = viewport.height * 0.5;
        // Angles grow without bound; wrap before narrowing to f32.
        let rotation_x = self.rotation_x.rem_euclid(TAU) as f32;
        let rotation_y = self.rotation_y.rem_euclid(TAU) as f32;
        let points = self
            .field
            .positions()
            .iter()
            .filter_map(|&position| {
                let rotated = rotate(position, rotation_x, rotation_y);
                let ([x, y], depth) = self.camera.project(rotated)?;
                // Size attenuates with distance, like a perspective point sprite.
                let diameter = self.settings.point_size * half_height * self.camera.focal() / depth;
                Some(ProjectedPoint {
                    x: (x + 1.0) * 0.5 * viewport.width,
                    y: (1.0 - y) * 0.5 * viewport.height,
                    radius: (diameter * 0.5).max(0.5),
                })
            })
            .collect();

        Frame {
            viewport,
            color: self.settings.color,
            opacity: self.settings.opacity,
            points,
        }
    }

    fn resize(&mut self, host: &mut dyn DisplayHost, viewport: Viewport) {
        if let Some(surface) = self.surface {
            host.resize_surface(surface, viewport);
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            aspect = self.camera.aspect,
            "background resized"
        );
    }

    /// Releases the resize subscription, the pending refresh request and the
    /// surface. Safe to call more than once.
    pub fn unmount(&mut self, host: &mut dyn DisplayHost) {
        if let Some(listener) = self.resize_listener.take() {
            host.unsubscribe_resize(listener);
        }
        if let Some(request) = self.frame_request.take() {
            host.cancel_frame(request);
        }
        if let Some(surface) = self.surface.take() {
            host.detach_surface(surface);
            tracing::info!(frames = self.frames_rendered, "background animator unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Unwrapped rotation angles in radians.
    pub fn rotation(&self) -> (f64, f64) {
        (self.rotation_x, self.rotation_y)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Drop for BackgroundAnimator {
    fn drop(&mut self) {
        if self.surface.is_some() {
            tracing::warn!("background animator dropped while mounted; surface was not released");
        }
    }
}

#[cfg(test)]
#[path = "tests/background_tests.rs"]
mod tests;
