//! Scroll controller: drag, wheel and inertia with hard clamping.
//!
//! The offset is the content's vertical displacement: `0` shows the top of
//! the content, negative values scroll further down. After every transition
//! the offset satisfies
//!
//! ```text
//! min(0, viewport_height - total_height) <= offset <= 0
//! ```
//!
//! # State machine
//!
//! | state    | event          | next                                      |
//! |----------|----------------|-------------------------------------------|
//! | Idle     | pointer down   | Dragging                                  |
//! | Dragging | pointer move   | Dragging (offset follows the pointer)     |
//! | Dragging | pointer up     | Inertia if fast enough, else Idle         |
//! | Inertia  | tick           | Inertia, or Idle once slow or pinned      |
//! | Inertia  | pointer down   | Dragging (inertia cancelled)              |
//! | any      | wheel          | unchanged (ignored while Dragging)        |

use tracing::debug;

/// Inertia tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Release speed (units per tick) above which inertia starts.
    pub inertia_threshold: f64,
    /// Velocity multiplier per nominal frame, in `[0, 1]`.
    pub decay_factor: f64,
    /// Speed below which inertia stops.
    pub stop_threshold: f64,
    /// When false, releasing a drag always goes straight to Idle.
    pub inertia_enabled: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            inertia_threshold: 1.0,
            decay_factor: 0.85,
            stop_threshold: 0.25,
            inertia_enabled: true,
        }
    }
}

/// Scroll controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollMode {
    /// Nothing is moving.
    #[default]
    Idle,
    /// The pointer is held down and drives the offset.
    Dragging,
    /// The content coasts after a fast release.
    Inertia,
}

impl ScrollMode {
    /// Short label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            ScrollMode::Idle => "idle",
            ScrollMode::Dragging => "drag",
            ScrollMode::Inertia => "inertia",
        }
    }
}

/// Observable scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Content offset, `<= 0`.
    pub offset: f64,
    /// Offset change per tick.
    pub velocity: f64,
    /// Current mode.
    pub mode: ScrollMode,
}

/// Input accepted by [`ScrollController::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// Pointer pressed at vertical position `y`.
    PointerDown {
        /// Pointer y in viewport coordinates.
        y: f64,
    },
    /// Pointer moved to vertical position `y`.
    PointerMove {
        /// Pointer y in viewport coordinates.
        y: f64,
    },
    /// Pointer released.
    PointerUp,
    /// Wheel scrolled; positive `delta_y` moves towards the end of the content.
    Wheel {
        /// Wheel delta.
        delta_y: f64,
    },
    /// Frame elapsed; `dt` is measured in nominal frames.
    Tick {
        /// Elapsed frames.
        dt: f64,
    },
}

/// Owns the scroll state and the clamp bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollController {
    state: ScrollState,
    last_y: f64,
    viewport_height: f64,
    total_height: f64,
    config: ScrollConfig,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollController {
    /// Idle controller at the top, with empty bounds.
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            state: ScrollState::default(),
            last_y: 0.0,
            viewport_height: 0.0,
            total_height: 0.0,
            config,
        }
    }

    /// Idle controller at the top of content with the given bounds.
    pub fn with_bounds(config: ScrollConfig, viewport_height: f64, total_height: f64) -> Self {
        let mut controller = Self::new(config);
        controller.set_bounds(viewport_height, total_height);
        controller
    }

    /// Current state snapshot.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Current offset.
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Current velocity.
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Current mode.
    pub fn mode(&self) -> ScrollMode {
        self.state.mode
    }

    /// Inertia tuning in effect.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Viewport height used for clamping.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Content height used for clamping.
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// True while inertia is running and the host should keep ticking.
    pub fn is_animating(&self) -> bool {
        self.state.mode == ScrollMode::Inertia
    }

    /// Lowest allowed offset: `min(0, viewport_height - total_height)`.
    pub fn min_offset(&self) -> f64 {
        (self.viewport_height - self.total_height).min(0.0)
    }

    /// Clamp a candidate offset into `[min_offset, 0]`.
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return self.state.offset;
        }
        offset.min(0.0).max(self.min_offset())
    }

    /// Content offset as a fraction of the scrollable range (0 = top).
    pub fn progress(&self) -> f64 {
        let min = self.min_offset();
        if min == 0.0 {
            0.0
        } else {
            self.state.offset / min
        }
    }

    /// Update clamp bounds and re-clamp the offset immediately.
    ///
    /// Non-finite or negative heights count as zero. An inertia run that gets
    /// pinned by the new bounds stops.
    pub fn set_bounds(&mut self, viewport_height: f64, total_height: f64) {
        self.viewport_height = sanitize_extent(viewport_height);
        self.total_height = sanitize_extent(total_height);

        let clamped = self.clamp(self.state.offset);
        let pinned = clamped != self.state.offset;
        self.state.offset = clamped;

        if pinned && self.state.mode == ScrollMode::Inertia {
            self.stop();
        }
    }

    /// Pointer pressed. Cancels inertia and starts a drag.
    pub fn pointer_down(&mut self, y: f64) {
        self.last_y = y;
        if self.state.mode != ScrollMode::Dragging {
            self.state.velocity = 0.0;
            self.set_mode(ScrollMode::Dragging);
        }
    }

    /// Pointer moved. Only acts while dragging.
    pub fn pointer_move(&mut self, y: f64) {
        if self.state.mode != ScrollMode::Dragging || !y.is_finite() {
            return;
        }
        let delta = y - self.last_y;
        self.last_y = y;
        self.state.velocity = delta;
        self.state.offset = self.clamp(self.state.offset + delta);
    }

    /// Pointer released. Starts inertia when the last drag step was fast.
    pub fn pointer_up(&mut self) {
        if self.state.mode != ScrollMode::Dragging {
            return;
        }
        if self.config.inertia_enabled && self.state.velocity.abs() > self.config.inertia_threshold {
            self.set_mode(ScrollMode::Inertia);
        } else {
            self.stop();
        }
    }

    /// Advance inertia by `dt` nominal frames.
    ///
    /// Returns true while inertia is still running afterwards.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.state.mode != ScrollMode::Inertia || !(dt.is_finite() && dt > 0.0) {
            return self.is_animating();
        }

        self.state.velocity *= self.config.decay_factor.powf(dt);
        let target = self.state.offset + self.state.velocity;
        let clamped = self.clamp(target);
        self.state.offset = clamped;

        if self.state.velocity.abs() < self.config.stop_threshold || clamped != target {
            self.stop();
        }
        self.is_animating()
    }

    /// Wheel input. Ignored while dragging; otherwise shifts the offset
    /// without changing mode.
    pub fn wheel(&mut self, delta_y: f64) {
        if self.state.mode == ScrollMode::Dragging || !delta_y.is_finite() {
            return;
        }
        self.state.offset = self.clamp(self.state.offset - delta_y);
    }

    /// Move towards the end of the content by `amount` (negative moves back).
    ///
    /// Stops inertia. Ignored while dragging.
    pub fn scroll_by(&mut self, amount: f64) {
        if self.state.mode == ScrollMode::Dragging || !amount.is_finite() {
            return;
        }
        self.jump_to(self.state.offset - amount);
    }

    /// Jump to the top. Ignored while dragging.
    pub fn scroll_to_top(&mut self) {
        if self.state.mode != ScrollMode::Dragging {
            self.jump_to(0.0);
        }
    }

    /// Jump to the bottom. Ignored while dragging.
    pub fn scroll_to_bottom(&mut self) {
        if self.state.mode != ScrollMode::Dragging {
            self.jump_to(self.min_offset());
        }
    }

    /// Dispatch an event.
    pub fn apply(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::PointerDown { y } => self.pointer_down(y),
            ScrollEvent::PointerMove { y } => self.pointer_move(y),
            ScrollEvent::PointerUp => self.pointer_up(),
            ScrollEvent::Wheel { delta_y } => self.wheel(delta_y),
            ScrollEvent::Tick { dt } => {
                self.tick(dt);
            }
        }
    }

    fn jump_to(&mut self, offset: f64) {
        self.state.offset = self.clamp(offset);
        self.stop();
    }

    fn stop(&mut self) {
        self.state.velocity = 0.0;
        self.set_mode(ScrollMode::Idle);
    }

    fn set_mode(&mut self, mode: ScrollMode) {
        if self.state.mode != mode {
            debug!(from = ?self.state.mode, to = ?mode, offset = self.state.offset, "Scroll mode changed");
            self.state.mode = mode;
        }
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
