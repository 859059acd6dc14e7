use glam::Vec2;

/// Explicit accessor pair for the two values a [`DeltaControl`] edits.
///
/// `P` is whatever struct owns the values; the control is handed `&mut P`
/// each tick instead of holding a reference into it.
pub struct ValueBinding<P> {
    pub get: fn(&P) -> Vec2,
    pub set: fn(&mut P, Vec2),
}

impl<P> Clone for ValueBinding<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ValueBinding<P> {}

impl<P> std::fmt::Debug for ValueBinding<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueBinding").finish_non_exhaustive()
    }
}

/// Headless delta slider.
///
/// Pressing inside the square widget sets a rate proportional to the
/// distance from its center; every [`update`](Self::update) while held moves
/// both bound values by that rate and clamps them to `[min, max]`.
#[derive(Debug, Clone)]
pub struct DeltaControl<P> {
    name: String,
    min: f32,
    max: f32,
    speed: f32,
    width: f32,
    binding: ValueBinding<P>,
    rate: Vec2,
    touched: bool,
    active: bool,
}

impl<P> DeltaControl<P> {
    pub fn new(
        name: impl Into<String>,
        min: f32,
        max: f32,
        speed: f32,
        width: f32,
        binding: ValueBinding<P>,
    ) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            speed,
            width,
            binding,
            rate: Vec2::ZERO,
            touched: false,
            active: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.release();
        }
    }

    /// Press or drag at `point`, in widget-local coordinates.
    pub fn touch(&mut self, point: Vec2) {
        if !self.active || self.width <= 0.0 {
            return;
        }
        let center = self.width / 2.0;
        self.rate = Vec2::new(
            (point.x - center) / self.width / 10.0,
            -(point.y - center) / self.width / 10.0,
        );
        self.touched = true;
    }

    pub fn release(&mut self) {
        self.touched = false;
        self.rate = Vec2::ZERO;
    }

    /// Apply one tick of change. Returns whether the values were written.
    pub fn update(&self, params: &mut P) -> bool {
        if !self.active || !self.touched {
            return false;
        }
        let current = (self.binding.get)(params);
        let next = (current + self.rate * self.speed).clamp(Vec2::splat(self.min), Vec2::splat(self.max));
        (self.binding.set)(params, next);
        tracing::trace!(control = %self.name, x = next.x, y = next.y, "delta control update");
        true
    }

    pub fn value(&self, params: &P) -> Vec2 {
        (self.binding.get)(params)
    }

    /// Position of each value within the range, `0.0` at min and `1.0` at max.
    pub fn ratio(&self, params: &P) -> Vec2 {
        let span = self.max - self.min;
        if span == 0.0 {
            return Vec2::ZERO;
        }
        (self.value(params) - Vec2::splat(self.min)) / span
    }

    pub fn at_min(&self, params: &P) -> [bool; 2] {
        let v = self.value(params);
        [v.x <= self.min, v.y <= self.min]
    }

    pub fn at_max(&self, params: &P) -> [bool; 2] {
        let v = self.value(params);
        [v.x >= self.max, v.y >= self.max]
    }
}
