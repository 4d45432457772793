//! Directional slide transitions between menu levels.
//!
//! The [`TransitionController`] turns each navigation [`Step`] into a pair of
//! animated layers: the level being left slides out, the level being entered
//! slides in. Time is supplied by the caller through
//! [`TransitionController::advance`], so the controller is deterministic and
//! independent of any clock.
//!
//! Forward steps move content leftward (old level exits toward the back edge,
//! new level enters from the forward edge); backward steps mirror that. Both
//! layers share one duration and one easing curve.
//!
//! A step issued while another is still animating supersedes it: the new
//! incoming layer becomes the only interactive one, while exit layers already
//! in flight keep running until they finish on their own.

use super::modes::Direction;
use super::navigation::Step;
use crate::domain::NavigationPath;

/// Duration of the level slide, in seconds.
pub const SLIDE_DURATION_SECS: f64 = 0.3;

/// Horizontal travel as a fraction of the sheet width.
pub const SLIDE_DISTANCE: f64 = 1.1;

/// Shared ease curve for slides and the sheet height tween.
pub const STANDARD_EASING: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);

/// A CSS-style cubic Bézier timing function anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Maps linear progress `x` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        // Newton-Raphson on x(t) = x, falling back to bisection on flat slopes.
        let mut t = x;
        for _ in 0..8 {
            let error = Self::sample(self.x1, self.x2, t) - x;
            if error.abs() < 1e-6 {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= error / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..32 {
            let sampled = Self::sample(self.x1, self.x2, t);
            if (sampled - x).abs() < 1e-6 {
                break;
            }
            if sampled < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

/// Whether a layer is arriving or leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Entering,
    Exiting,
}

/// One level being animated.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub path: NavigationPath,
    pub role: LayerRole,
    pub direction: Direction,
    elapsed: f64,
    /// Offset and opacity at `elapsed == 0`. Only exits start away from rest.
    origin: (f64, f64),
}

impl Layer {
    fn new(path: NavigationPath, role: LayerRole, direction: Direction) -> Self {
        Self { path, role, direction, elapsed: 0.0, origin: (0.0, 1.0) }
    }

    fn exiting_from(path: NavigationPath, direction: Direction, origin: (f64, f64)) -> Self {
        Self { origin, ..Self::new(path, LayerRole::Exiting, direction) }
    }

    fn finished(&self, duration: f64) -> bool {
        self.elapsed >= duration
    }
}

/// Where a layer should be drawn on the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFrame {
    pub path: NavigationPath,
    pub role: LayerRole,

    /// Horizontal offset as a signed fraction of sheet width; `0.0` is at rest.
    pub offset: f64,

    /// `0.0` fully transparent, `1.0` fully opaque.
    pub opacity: f64,

    /// Only the current level ever accepts focus or clicks.
    pub interactive: bool,
}

/// Sequences slide-out / slide-in layers for navigation steps.
#[derive(Debug, Clone)]
pub struct TransitionController {
    duration: f64,
    easing: CubicBezier,
    entering: Option<Layer>,
    exiting: Vec<Layer>,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(SLIDE_DURATION_SECS, STANDARD_EASING)
    }
}

impl TransitionController {
    #[must_use]
    pub const fn new(duration: f64, easing: CubicBezier) -> Self {
        Self { duration, easing, entering: None, exiting: Vec::new() }
    }

    /// Starts animating `step`.
    ///
    /// Any entering layer still in flight is superseded by the new one. Its
    /// level is `step.from`, which exits from wherever it was drawn last.
    pub fn begin(&mut self, step: &Step) {
        let origin = match self.entering.take() {
            Some(layer) => {
                tracing::debug!(superseded = %step.from, "transition superseded mid-flight");
                let frame = self.frame_for(&layer);
                (frame.offset, frame.opacity)
            }
            None => (0.0, 1.0),
        };
        self.exiting.push(Layer::exiting_from(step.from.clone(), step.direction, origin));
        self.entering = Some(Layer::new(step.to.clone(), LayerRole::Entering, step.direction));
    }

    /// Drops every layer so the current level renders at rest.
    ///
    /// Used when the sheet opens, since nothing was mounted while closed.
    pub fn settle(&mut self) {
        self.entering = None;
        self.exiting.clear();
    }

    /// Advances all layers by `dt` seconds and retires finished ones.
    ///
    /// Returns `true` while anything is still animating.
    pub fn advance(&mut self, dt: f64) -> bool {
        let duration = self.duration;
        for layer in self.exiting.iter_mut().chain(self.entering.as_mut()) {
            layer.elapsed += dt.max(0.0);
        }
        self.exiting.retain(|layer| !layer.finished(duration));
        if self.entering.as_ref().is_some_and(|layer| layer.finished(duration)) {
            self.entering = None;
        }
        self.is_animating()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.entering.is_some() || !self.exiting.is_empty()
    }

    fn eased(&self, layer: &Layer) -> f64 {
        self.easing.ease(layer.elapsed / self.duration)
    }

    fn frame_for(&self, layer: &Layer) -> LayerFrame {
        let p = self.eased(layer);
        let (from_offset, from_opacity) = layer.origin;
        let (offset, opacity) = match (layer.role, layer.direction) {
            (LayerRole::Entering, Direction::Forward) => (SLIDE_DISTANCE * (1.0 - p), p),
            (LayerRole::Entering, Direction::Backward) => (-SLIDE_DISTANCE * (1.0 - p), p),
            (LayerRole::Exiting, Direction::Forward) => {
                (from_offset + (-SLIDE_DISTANCE - from_offset) * p, from_opacity * (1.0 - p))
            }
            (LayerRole::Exiting, Direction::Backward) => {
                (from_offset + (SLIDE_DISTANCE - from_offset) * p, from_opacity * (1.0 - p))
            }
        };
        LayerFrame {
            path: layer.path.clone(),
            role: layer.role,
            offset,
            opacity,
            interactive: layer.role == LayerRole::Entering,
        }
    }

    /// Returns the layers to draw this frame, back to front.
    ///
    /// At rest this is a single opaque, interactive layer at `current`.
    /// During a transition the exiting layers come first and the entering
    /// layer (the only interactive one) last.
    #[must_use]
    pub fn frames(&self, current: &NavigationPath) -> Vec<LayerFrame> {
        let mut frames: Vec<LayerFrame> = self.exiting.iter().map(|l| self.frame_for(l)).collect();
        match &self.entering {
            Some(layer) => frames.push(self.frame_for(layer)),
            None => frames.push(LayerFrame {
                path: current.clone(),
                role: LayerRole::Entering,
                offset: 0.0,
                opacity: 1.0,
                interactive: true,
            }),
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(ids: &[&str]) -> NavigationPath {
        ids.iter().copied().collect()
    }

    fn step(from: &[&str], to: &[&str], direction: Direction) -> Step {
        Step { from: path(from), to: path(to), direction }
    }

    #[test]
    fn easing_hits_endpoints_and_is_monotonic() {
        let curve = STANDARD_EASING;
        assert!(curve.ease(0.0).abs() < 1e-9);
        assert!((curve.ease(1.0) - 1.0).abs() < 1e-9);

        let mut previous = 0.0;
        for i in 1..=20 {
            let value = curve.ease(f64::from(i) / 20.0);
            assert!(value >= previous - 1e-9);
            previous = value;
        }
        // The standard curve decelerates: past halfway at the midpoint.
        assert!(curve.ease(0.5) > 0.5);
    }

    #[test]
    fn at_rest_only_the_current_level_is_drawn() {
        let controller = TransitionController::default();
        let frames = controller.frames(&path(&["a"]));
        assert_eq!(frames.len(), 1);
        assert!(frames[0].interactive);
        assert!(frames[0].offset.abs() < f64::EPSILON);
    }

    #[test]
    fn forward_slides_old_left_and_new_in_from_right() {
        let mut controller = TransitionController::default();
        controller.begin(&step(&[], &["a"], Direction::Forward));

        let frames = controller.frames(&path(&["a"]));
        assert_eq!(frames.len(), 2);
        let (old, new) = (&frames[0], &frames[1]);
        assert_eq!(old.role, LayerRole::Exiting);
        assert!(!old.interactive);
        assert!(new.interactive);
        assert!((new.offset - SLIDE_DISTANCE).abs() < 1e-9);

        controller.advance(SLIDE_DURATION_SECS / 2.0);
        let frames = controller.frames(&path(&["a"]));
        assert!(frames[0].offset < 0.0);
        assert!(frames[1].offset > 0.0 && frames[1].offset < SLIDE_DISTANCE);
    }

    #[test]
    fn backward_mirrors_forward() {
        let mut forward = TransitionController::default();
        forward.begin(&step(&[], &["a"], Direction::Forward));
        forward.advance(0.1);

        let mut backward = TransitionController::default();
        backward.begin(&step(&["a"], &[], Direction::Backward));
        backward.advance(0.1);

        let f = forward.frames(&path(&["a"]));
        let b = backward.frames(&path(&[]));
        assert!((f[0].offset + b[0].offset).abs() < 1e-9);
        assert!((f[1].offset + b[1].offset).abs() < 1e-9);
        assert!((f[1].opacity - b[1].opacity).abs() < 1e-9);
    }

    #[test]
    fn transition_settles_after_duration() {
        let mut controller = TransitionController::default();
        controller.begin(&step(&[], &["a"], Direction::Forward));
        assert!(controller.advance(0.2));
        assert!(!controller.advance(0.2));
        assert_eq!(controller.frames(&path(&["a"])).len(), 1);
    }

    #[test]
    fn new_step_supersedes_in_flight_target() {
        let mut controller = TransitionController::default();
        controller.begin(&step(&[], &["a"], Direction::Forward));
        controller.advance(0.2);
        controller.begin(&step(&["a"], &["a", "b"], Direction::Forward));

        let frames = controller.frames(&path(&["a", "b"]));
        let interactive: Vec<_> = frames.iter().filter(|f| f.interactive).collect();
        assert_eq!(interactive.len(), 1);
        assert_eq!(interactive[0].path, path(&["a", "b"]));
        // Root exit (0.2s in) plus the superseded "a" now exiting, plus the new target.
        assert_eq!(frames.len(), 3);

        // The older exit finishes first without blocking the newer layers.
        controller.advance(0.1);
        assert_eq!(controller.frames(&path(&["a", "b"])).len(), 2);
    }

    #[test]
    fn superseded_layer_exits_from_where_it_was_drawn() {
        let mut controller = TransitionController::default();
        controller.begin(&step(&[], &["a"], Direction::Forward));
        controller.advance(0.1);
        let before = controller.frames(&path(&["a"]))[1].clone();
        assert!(before.offset > 0.0 && before.opacity < 1.0);

        controller.begin(&step(&["a"], &[], Direction::Backward));
        let frames = controller.frames(&path(&[]));
        let superseded = frames.iter().find(|f| f.path == path(&["a"])).expect("superseded layer drawn");
        assert_eq!(superseded.role, LayerRole::Exiting);
        assert!((superseded.offset - before.offset).abs() < 1e-9);
        assert!((superseded.opacity - before.opacity).abs() < 1e-9);

        controller.advance(SLIDE_DURATION_SECS / 2.0);
        let frames = controller.frames(&path(&[]));
        let superseded = frames.iter().find(|f| f.path == path(&["a"])).expect("still exiting");
        assert!(superseded.offset > before.offset && superseded.offset < SLIDE_DISTANCE);
        assert!(superseded.opacity < before.opacity);
    }

    #[test]
    fn settle_clears_everything() {
        let mut controller = TransitionController::default();
        controller.begin(&step(&[], &["a"], Direction::Forward));
        controller.settle();
        assert!(!controller.is_animating());
    }
}
