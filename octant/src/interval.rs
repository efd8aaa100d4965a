//! Closed floating-point ranges along a single axis

/// Stores a closed range `[lower, upper]` along one axis
#[derive(Copy, Clone, PartialEq)]
pub struct Interval {
    lower: f32,
    upper: f32,
}

impl std::fmt::Debug for Interval {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        f.debug_tuple("")
            .field(&self.lower)
            .field(&self.upper)
            .finish()
    }
}

impl Interval {
    /// Builds a new interval
    ///
    /// # Panics
    /// Panics if `lower > upper` or either bound is `NaN`
    #[inline]
    pub fn new(lower: f32, upper: f32) -> Self {
        assert!(upper >= lower, "invalid interval [{lower}, {upper}]");
        Self { lower, upper }
    }
    /// Returns the lower bound of the interval
    #[inline]
    pub fn lower(&self) -> f32 {
        self.lower
    }
    /// Returns the upper bound of the interval
    #[inline]
    pub fn upper(&self) -> f32 {
        self.upper
    }
    /// Checks whether the given value is contained in the (closed) interval
    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.lower && v <= self.upper
    }
    /// Returns the midpoint of the interval
    ///
    /// This never overflows, and always lies within the interval.
    #[inline]
    pub fn midpoint(self) -> f32 {
        (self.lower * 0.5 + self.upper * 0.5)
            .max(self.lower)
            .min(self.upper)
    }

    /// Splits the interval at the midpoint
    ///
    /// ```
    /// # use octant::Interval;
    /// let a = Interval::new(0.0, 1.0);
    /// let (lo, hi) = a.split();
    /// assert_eq!(lo, Interval::new(0.0, 0.5));
    /// assert_eq!(hi, Interval::new(0.5, 1.0));
    /// ```
    pub fn split(self) -> (Self, Self) {
        let mid = self.midpoint();
        (
            Interval::new(self.lower, mid),
            Interval::new(mid, self.upper),
        )
    }

    /// Calculates the width of the interval
    ///
    /// ```
    /// # use octant::Interval;
    /// let a = Interval::new(2.0, 3.0);
    /// assert_eq!(a.width(), 1.0);
    /// ```
    pub fn width(self) -> f32 {
        self.upper - self.lower
    }

    /// Returns half of the interval's width
    ///
    /// Unlike [`width`](Self::width), this is finite for any finite interval.
    pub fn half_width(self) -> f32 {
        self.upper * 0.5 - self.lower * 0.5
    }

    /// Returns an interval with half-width `h` and the same midpoint
    ///
    /// If `h` is smaller than the current half-width, the interval is
    /// unchanged.  The result always contains the original interval, and is
    /// clamped to the finite `f32` range.
    pub fn grow(self, h: f32) -> Self {
        if h <= self.half_width() {
            self
        } else {
            let mid = self.midpoint();
            Interval::new(
                (mid - h).max(f32::MIN).min(self.lower),
                (mid + h).min(f32::MAX).max(self.upper),
            )
        }
    }
}

impl From<f32> for Interval {
    fn from(f: f32) -> Self {
        Interval::new(f, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_grow() {
        let a = Interval::new(1.0, 2.0);
        assert_eq!(a.grow(0.25), a);
        assert_eq!(a.grow(1.5), Interval::new(0.0, 3.0));

        let p = Interval::from(4.0);
        assert_eq!(p.width(), 0.0);
        assert_eq!(p.grow(1.0), Interval::new(3.0, 5.0));

        let big = Interval::new(3e38, 3.4e38);
        let g = big.grow(f32::MAX);
        assert_eq!(g.upper(), f32::MAX);
        assert!(g.lower().is_finite());
        assert!(g.contains(big.lower()));
    }

    #[test]
    fn test_extreme_midpoint() {
        let a = Interval::new(-3e38, 3e38);
        assert_eq!(a.midpoint(), 0.0);
        assert_eq!(a.half_width(), 3e38);
        let (lo, hi) = a.split();
        assert_eq!(lo, Interval::new(-3e38, 0.0));
        assert_eq!(hi, Interval::new(0.0, 3e38));

        let b = Interval::new(3e38, 3.4e38);
        assert!(b.midpoint().is_finite());
        assert!(b.contains(b.midpoint()));

        // Halving the smallest subnormal rounds to zero
        let tiny = Interval::from(f32::from_bits(1));
        assert_eq!(tiny.midpoint(), tiny.lower());
        let (lo, hi) = tiny.split();
        assert_eq!(lo, tiny);
        assert_eq!(hi, tiny);
    }

    #[test]
    fn test_contains() {
        let a = Interval::new(-1.0, 1.0);
        assert!(a.contains(-1.0));
        assert!(a.contains(1.0));
        assert!(!a.contains(1.5));
        assert!(!a.contains(f32::NAN));
    }

    #[test]
    #[should_panic]
    fn test_bad_interval() {
        Interval::new(1.0, 0.0);
    }
}
