//! Zoom/pan transform and the gesture-driven controller that owns it.

use crate::scale::{LinearScale, Viewport};

/// Default allowed scale factors.
pub const DEFAULT_SCALE_EXTENT: (f64, f64) = (1.0, 1000.0);

/// Wheel exponent per line scrolled.
const LINE_WHEEL_FACTOR: f64 = 0.05;
/// Wheel exponent per pixel scrolled.
const PIXEL_WHEEL_FACTOR: f64 = 0.002;

/// A scale factor `k` followed by a translation `(x, y)`.
///
/// Screen position of a world point `p` is `p * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, point: [f64; 2]) -> [f64; 2] {
        [point[0] * self.k + self.x, point[1] * self.k + self.y]
    }

    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.x
    }

    pub fn invert(&self, point: [f64; 2]) -> [f64; 2] {
        [self.invert_x(point[0]), self.invert_y(point[1])]
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Same translation, different scale factor.
    pub fn with_scale(&self, k: f64) -> Self {
        Self { k, ..*self }
    }

    /// Translate by a world-space offset (multiplied by `k` on screen).
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + self.k * dx,
            y: self.y + self.k * dy,
        }
    }

    /// Move the transform so that world point `world` lands on `screen`.
    pub fn anchor(&self, screen: [f64; 2], world: [f64; 2]) -> Self {
        let moved = [world[0] * self.k + self.x, world[1] * self.k + self.y];
        if moved == screen {
            return *self;
        }
        Self {
            k: self.k,
            x: self.x + screen[0] - moved[0],
            y: self.y + screen[1] - moved[1],
        }
    }

    /// Rescale an X scale so its domain covers what this transform shows.
    pub fn rescale_x(&self, scale: &LinearScale) -> LinearScale {
        let (r0, r1) = scale.range();
        let d0 = scale.invert(self.invert_x(r0));
        let d1 = scale.invert(self.invert_x(r1));
        scale.with_domain((d0, d1))
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Limits a transform must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    /// Allowed range for `k`.
    pub scale_extent: (f64, f64),
    /// Viewport box gestures operate in.
    pub extent: [[f64; 2]; 2],
    /// World box that must stay covering the viewport.
    pub translate_extent: [[f64; 2]; 2],
}

impl ZoomBounds {
    /// Bounds where both the gesture and translate extents are the viewport box.
    pub fn for_viewport(viewport: Viewport, scale_extent: (f64, f64)) -> Self {
        Self {
            scale_extent,
            extent: viewport.extent(),
            translate_extent: viewport.extent(),
        }
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        k.min(self.scale_extent.1).max(self.scale_extent.0)
    }

    /// Shift `transform` so no content outside `translate_extent` comes into view.
    ///
    /// When the extent is smaller than the view along an axis, it is centered.
    pub fn constrain(&self, transform: ZoomTransform) -> ZoomTransform {
        let [[e0x, e0y], [e1x, e1y]] = self.extent;
        let [[t0x, t0y], [t1x, t1y]] = self.translate_extent;

        let dx0 = transform.invert_x(e0x) - t0x;
        let dx1 = transform.invert_x(e1x) - t1x;
        let dy0 = transform.invert_y(e0y) - t0y;
        let dy1 = transform.invert_y(e1y) - t1y;

        transform.translate(axis_shift(dx0, dx1), axis_shift(dy0, dy1))
    }
}

fn axis_shift(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        return (d0 + d1) / 2.0;
    }
    let low = d0.min(0.0);
    if low != 0.0 { low } else { d1.max(0.0) }
}

/// Mouse wheel movement; positive scrolls up (zooms in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    Lines(f64),
    Pixels(f64),
}

impl WheelDelta {
    /// Power of two applied to the scale factor.
    fn exponent(&self) -> f64 {
        match self {
            WheelDelta::Lines(y) => y * LINE_WHEEL_FACTOR,
            WheelDelta::Pixels(y) => y * PIXEL_WHEEL_FACTOR,
        }
    }
}

/// Input events recognized on the interaction surface, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Pointer pressed; the world point under it becomes the drag anchor.
    DragStart { at: [f64; 2] },
    /// Pointer moved while pressed.
    DragMove { to: [f64; 2] },
    /// Pointer released.
    DragEnd,
    /// Wheel or pinch around a pointer position.
    Wheel { delta: WheelDelta, at: [f64; 2] },
    /// Multiply the scale factor around a position (keyboard zoom).
    ZoomBy { factor: f64, at: [f64; 2] },
}

/// Zoom state machine. There is no transition back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ZoomState {
    /// No gesture has changed the view yet.
    #[default]
    Idle,
    /// The current transform.
    Transformed(ZoomTransform),
}

/// Single writer of the zoom transform.
#[derive(Debug, Clone)]
pub struct ZoomController {
    bounds: ZoomBounds,
    state: ZoomState,
    /// World point grabbed at drag start.
    drag_anchor: Option<[f64; 2]>,
}

impl ZoomController {
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            bounds,
            state: ZoomState::Idle,
            drag_anchor: None,
        }
    }

    pub fn bounds(&self) -> &ZoomBounds {
        &self.bounds
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Published transform, `None` until the first gesture.
    pub fn transform(&self) -> Option<ZoomTransform> {
        match self.state {
            ZoomState::Idle => None,
            ZoomState::Transformed(t) => Some(t),
        }
    }

    /// Current transform, identity while idle.
    pub fn current(&self) -> ZoomTransform {
        self.transform().unwrap_or_default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Apply a gesture. Returns the new transform when one is published.
    pub fn handle(&mut self, gesture: Gesture) -> Option<ZoomTransform> {
        let current = self.current();

        match gesture {
            Gesture::DragStart { at } => {
                self.drag_anchor = Some(current.invert(at));
                None
            }
            Gesture::DragMove { to } => {
                let anchor = self.drag_anchor?;
                self.publish(current.anchor(to, anchor))
            }
            Gesture::DragEnd => {
                self.drag_anchor = None;
                None
            }
            Gesture::Wheel { delta, at } => {
                self.zoom_around(current, current.k * delta.exponent().exp2(), at)
            }
            Gesture::ZoomBy { factor, at } => self.zoom_around(current, current.k * factor, at),
        }
    }

    /// Publish the identity transform, ending any drag in progress.
    pub fn reset(&mut self) -> ZoomTransform {
        self.drag_anchor = None;
        self.state = ZoomState::Transformed(ZoomTransform::IDENTITY);
        ZoomTransform::IDENTITY
    }

    fn zoom_around(
        &mut self,
        current: ZoomTransform,
        k: f64,
        at: [f64; 2],
    ) -> Option<ZoomTransform> {
        if !k.is_finite() {
            return None;
        }
        let k = self.bounds.clamp_scale(k);
        if k == current.k {
            return None;
        }
        let world = current.invert(at);
        self.publish(current.with_scale(k).anchor(at, world))
    }

    fn publish(&mut self, transform: ZoomTransform) -> Option<ZoomTransform> {
        let constrained = self.bounds.constrain(transform);
        tracing::debug!(
            k = constrained.k,
            x = constrained.x,
            y = constrained.y,
            "Zoom transform updated"
        );
        self.state = ZoomState::Transformed(constrained);
        Some(constrained)
    }
}
