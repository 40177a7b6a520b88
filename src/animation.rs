use keyframe::EasingFunction;

/// Easing curves available to the sweep driver.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum EasingType {
    Linear,
    EaseIn,
    /// Decelerating curve: fast start, slow finish.
    #[default]
    EaseOut,
    EaseInOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
        }
    }
}

impl EasingType {
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

/// Repeating integer interpolation driving the sweep offset.
///
/// Each cycle restarts from the start value; there is no reverse/bounce.
/// The clock is advanced explicitly by the host loop.
#[derive(Clone, Debug)]
pub struct SweepAnimation {
    from: i32,
    to: i32,
    /// One full cycle in seconds. Always positive; the engine only builds
    /// drivers from validated specs.
    duration: f64,
    elapsed: f64,
    easing: EasingType,
}

impl SweepAnimation {
    pub fn new(from: i32, to: i32, duration_ms: u64, easing: EasingType) -> Self {
        Self {
            from,
            to,
            duration: duration_ms as f64 / 1000.0,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advances the cycle clock by `dt` seconds and returns the new value.
    /// Wraps back to the start value when a cycle completes.
    pub fn advance(&mut self, dt: f64) -> i32 {
        self.elapsed = (self.elapsed + dt) % self.duration;
        self.value()
    }

    /// Current interpolated value, rounded to the integer grid.
    pub fn value(&self) -> i32 {
        let progress = (self.elapsed / self.duration).clamp(0.0, 1.0) as f32;
        let eased = self.easing.eval(progress);
        let span = (self.to - self.from) as f32;
        self.from + (span * eased).round() as i32
    }

    pub fn start_value(&self) -> i32 {
        self.from
    }
}
