use crate::{
    config::{SymmetryConfig, FRAME_RATE},
    geom::{slice_angle, Segment},
    input::{InputEvent, StrokeCapture},
    symmetry::replicate,
};

/// Global rotation of the snowflake, in degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct SpinState {
    pub angle: f64,
}
impl SpinState {
    /// Advances by `step` degrees, wrapping into `[0, 360)`.
    pub fn advance(&mut self, step: f64) {
        self.angle = (self.angle + step).rem_euclid(360.);
    }

    pub fn radians(&self) -> f64 {
        self.angle.to_radians()
    }
}

/// Converts wall-clock time into fixed frame ticks.
#[derive(Debug)]
pub(crate) struct FrameClock {
    interval: f64,
    last: Option<f64>,
    pending: f64,
}
impl FrameClock {
    pub fn new(rate: f64) -> Self {
        Self {
            interval: 1. / rate,
            last: None,
            pending: 0.,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Number of whole ticks since the previous call. The first call yields
    /// one tick.
    pub fn tick(&mut self, now: f64) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 1;
        };
        self.pending += (now - last).max(0.);
        let ticks = (self.pending / self.interval).floor();
        self.pending -= ticks * self.interval;
        // Don't try to catch up after the window was hidden for a while
        ticks.min(FRAME_RATE) as u32
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LoopState {
    Idle,
    Drawing,
    Spinning,
}

/// Everything the frame loop owns. The render set is always derived from
/// `slice` and `symmetry`.
pub(crate) struct AppState {
    pub slice: Vec<Segment>,
    pub symmetry: SymmetryConfig,
    pub spin: SpinState,
    pub spinning: bool,
    pub capture: StrokeCapture,
    render_set: Vec<Segment>,
    dirty: bool,
}
impl AppState {
    pub fn new(symmetry: SymmetryConfig, spinning: bool) -> Self {
        Self {
            slice: vec![],
            symmetry,
            spin: SpinState::default(),
            spinning,
            capture: StrokeCapture::default(),
            render_set: vec![],
            dirty: false,
        }
    }

    pub fn loop_state(&self) -> LoopState {
        if self.capture.is_active() {
            LoopState::Drawing
        } else if self.spinning {
            LoopState::Spinning
        } else {
            LoopState::Idle
        }
    }

    pub fn arc(&self) -> f64 {
        slice_angle(self.symmetry.count())
    }

    /// Call after changing `symmetry` directly.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Applies one event. `Export` is left to the caller.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(point) => {
                let arc = self.arc();
                self.capture.begin(point, arc);
            }
            InputEvent::PointerMove(point) => {
                let arc = self.arc();
                if let Some(segment) = self.capture.extend(point, arc) {
                    self.slice.push(segment);
                    self.dirty = true;
                }
            }
            InputEvent::PointerUp => self.capture.end(),
            InputEvent::Reset => {
                log::debug!("Clearing {} segments", self.slice.len());
                self.slice.clear();
                self.dirty = true;
            }
            InputEvent::ToggleMirror => {
                self.symmetry.toggle_mirror();
                log::debug!("Mirror: {}", self.symmetry.mirror);
                self.dirty = true;
            }
            InputEvent::ToggleSpin => self.spinning = !self.spinning,
            InputEvent::CycleCount => self.change_count(SymmetryConfig::cycle),
            InputEvent::IncreaseCount => self.change_count(SymmetryConfig::increase),
            InputEvent::DecreaseCount => self.change_count(SymmetryConfig::decrease),
            InputEvent::Export => (),
        }
    }

    pub fn set_count(&mut self, count: u32) {
        self.change_count(|symmetry| symmetry.set_count(count));
    }

    /// Changes the slice count and drops segments that fall outside the new
    /// base wedge.
    fn change_count(&mut self, change: impl FnOnce(&mut SymmetryConfig)) {
        change(&mut self.symmetry);
        let arc = self.arc();
        let before = self.slice.len();
        self.slice.retain(|segment| segment.in_wedge(arc));
        log::debug!(
            "Slices: {}, dropped {} segments",
            self.symmetry.count(),
            before - self.slice.len()
        );
        self.dirty = true;
    }

    /// Advances the spin by `ticks` frames of `step` degrees.
    pub fn advance(&mut self, ticks: u32, step: f64) {
        if self.spinning {
            for _ in 0..ticks {
                self.spin.advance(step);
            }
        }
    }

    /// The replicated segments, recomputed if the slice or config changed.
    pub fn render_set(&mut self) -> &[Segment] {
        if self.dirty {
            self.render_set = replicate(&self.slice, &self.symmetry);
            self.dirty = false;
        }
        &self.render_set
    }
}
