//! Clock-edge disturbances.
//!
//! The wall clock is sampled once per frame. When the second changes every
//! particle gets a small vibration impulse; when the minute changes it gets a
//! much larger shatter impulse that blows the formation apart. Impulses land
//! in the particles' acceleration for the current frame only.

use std::ops::Range;

use glam::Vec2;
use motes_core::ClockReading;
use rand::Rng;

use crate::random_unit;

/// A one-shot, randomly directed push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impulse {
    /// Fired on every second boundary.
    Vibration,
    /// Fired on every minute boundary.
    Shatter,
}

impl Impulse {
    /// Range the impulse magnitude is drawn from.
    pub fn magnitude_range(self) -> Range<f32> {
        match self {
            Impulse::Vibration => 0.0..18.0,
            Impulse::Shatter => 300.0..600.0,
        }
    }

    /// Draw one impulse vector.
    pub fn sample(self, rng: &mut impl Rng) -> Vec2 {
        random_unit(rng) * rng.gen_range(self.magnitude_range())
    }
}

/// Which clock boundaries were crossed since the previous sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edges {
    pub second: bool,
    pub minute: bool,
}

impl Edges {
    /// Impulses to apply for these edges, vibration first.
    pub fn impulses(self) -> impl Iterator<Item = Impulse> {
        let vibration = self.second.then_some(Impulse::Vibration);
        let shatter = self.minute.then_some(Impulse::Shatter);
        vibration.into_iter().chain(shatter)
    }
}

/// Edge detector over successive clock samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockEdges {
    last_second: u32,
    last_minute: u32,
}

impl ClockEdges {
    /// Start tracking from `reading`; the first sample reports no edges.
    pub fn new(reading: &ClockReading) -> Self {
        Self {
            last_second: reading.second,
            last_minute: reading.minute,
        }
    }

    /// Compare `reading` with the previous sample and remember it.
    pub fn observe(&mut self, reading: &ClockReading) -> Edges {
        let edges = Edges {
            second: reading.second != self.last_second,
            minute: reading.minute != self.last_minute,
        };
        self.last_second = reading.second;
        self.last_minute = reading.minute;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at(minute: u32, second: u32) -> ClockReading {
        ClockReading {
            hour: 12,
            minute,
            second,
            day: 1,
            month: 1,
            year: 2024,
            weekday: 1,
        }
    }

    #[test]
    fn test_first_sample_has_no_edges() {
        let mut edges = ClockEdges::new(&at(34, 59));
        assert_eq!(edges.observe(&at(34, 59)), Edges::default());
    }

    #[test]
    fn test_second_edge() {
        let mut edges = ClockEdges::new(&at(34, 58));
        let e = edges.observe(&at(34, 59));
        assert!(e.second && !e.minute);
        assert_eq!(e.impulses().collect::<Vec<_>>(), vec![Impulse::Vibration]);
    }

    #[test]
    fn test_minute_rollover_fires_once() {
        let mut edges = ClockEdges::new(&at(34, 59));
        let e = edges.observe(&at(35, 0));
        assert_eq!(
            e.impulses().collect::<Vec<_>>(),
            vec![Impulse::Vibration, Impulse::Shatter]
        );
        // Subsequent frames within the same second are quiet
        assert_eq!(edges.observe(&at(35, 0)), Edges::default());
        assert_eq!(edges.observe(&at(35, 0)), Edges::default());
    }

    #[test]
    fn test_sample_magnitudes_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for impulse in [Impulse::Vibration, Impulse::Shatter] {
            let range = impulse.magnitude_range();
            for _ in 0..500 {
                let m = impulse.sample(&mut rng).length();
                assert!(m >= range.start - 1e-3 && m < range.end + 1e-3, "{m}");
            }
        }
    }
}
