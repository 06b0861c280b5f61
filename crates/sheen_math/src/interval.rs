#[derive(Debug, Clone, Copy, PartialEq)]

pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// NaN input maps to `min` so callers never store a NaN angle or FOV.
    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return self.min;
        }
        x.clamp(self.min, self.max)
    }

    /// Strictly positive distances, used to filter ray hits.
    pub const POSITIVE: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        let interval = Interval::new(2.0, 7.0);
        assert_eq!(interval.size(), 5.0);

        let negative = Interval::new(-5.0, 5.0);
        assert_eq!(negative.size(), 10.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(5.0));
        assert!(!interval.surrounds(-0.1));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(1.0, 150.0);

        assert_eq!(interval.clamp(-5.0), 1.0);
        assert_eq!(interval.clamp(1.0), 1.0);
        assert_eq!(interval.clamp(75.0), 75.0);
        assert_eq!(interval.clamp(150.0), 150.0);
        assert_eq!(interval.clamp(400.0), 150.0);
        assert_eq!(interval.clamp(f32::NAN), 1.0);
    }

    #[test]
    fn test_interval_positive() {
        assert!(!Interval::POSITIVE.surrounds(0.0));
        assert!(!Interval::POSITIVE.surrounds(-1.0));
        assert!(Interval::POSITIVE.surrounds(1e-6));
        assert!(Interval::POSITIVE.surrounds(1e10));
    }
}
