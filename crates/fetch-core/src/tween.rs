use crate::Interpolate;

/// A resumable interpolation task: `{start, target, elapsed, duration}`.
///
/// The owner advances it once per tick and writes the returned value wherever it belongs.
/// Cancelling is dropping the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    start: T,
    target: T,
    elapsed: f32,
    duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenStep<T> {
    Running(T),
    Finished(T),
}

impl<T> TweenStep<T> {
    pub fn value(self) -> T {
        match self {
            TweenStep::Running(v) | TweenStep::Finished(v) => v,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TweenStep::Finished(_))
    }
}

impl<T: Interpolate> Tween<T> {
    pub fn new(start: T, target: T, duration: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn target(&self) -> T {
        self.target
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.target;
        }
        self.start.interpolate(self.target, self.progress())
    }

    /// Advance by `dt` and return the value for this tick.
    ///
    /// The final step always lands exactly on `target`.
    pub fn advance(&mut self, dt: f32) -> TweenStep<T> {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            self.elapsed = self.duration;
            TweenStep::Finished(self.target)
        } else {
            TweenStep::Running(self.value())
        }
    }
}
