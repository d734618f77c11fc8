#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// Step length clamped to be non-negative.
    pub fn dt(&self) -> f32 {
        self.dt_seconds.max(0.0)
    }

    /// Seconds elapsed at the start of this tick, assuming a fixed step.
    pub fn time(&self) -> f32 {
        self.tick as f32 * self.dt()
    }

    pub fn next(self) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            ..self
        }
    }
}
