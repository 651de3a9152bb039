//! The simulation context owned by the render loop.

use glam::Vec2;
use motes_core::{ClockReading, DISPLAY_HEIGHT, DISPLAY_WIDTH, Palette, ZONE_COUNT};
use motes_fonts::Face;
use noise::Perlin;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::disturbance::{ClockEdges, Impulse};
use crate::render::Sprite;
use crate::zone::Zone;

/// What happened during [`SwarmWorld::begin_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A vibration impulse was applied.
    pub vibration: bool,
    /// A shatter impulse was applied.
    pub shatter: bool,
    /// Zones whose target points were rebuilt.
    pub regenerated: [bool; ZONE_COUNT],
}

/// All four zones plus the shared state that drives them.
#[derive(Debug)]
pub struct SwarmWorld {
    zones: Vec<Zone>,
    noise: Perlin,
    rng: StdRng,
    frame: u64,
    edges: Option<ClockEdges>,
    palette: Palette,
    face: Option<Face>,
}

impl SwarmWorld {
    /// World with `particles_per_zone` particles per zone, seeded from entropy.
    pub fn new(particles_per_zone: usize, palette: Palette) -> Self {
        Self::with_rng(particles_per_zone, palette, StdRng::from_entropy())
    }

    /// World with a fixed seed.
    pub fn seeded(particles_per_zone: usize, palette: Palette, seed: u64) -> Self {
        Self::with_rng(particles_per_zone, palette, StdRng::seed_from_u64(seed))
    }

    fn with_rng(particles_per_zone: usize, palette: Palette, mut rng: StdRng) -> Self {
        let display = Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
        let zones = (0..ZONE_COUNT)
            .map(|i| Zone::new(i, display, particles_per_zone, palette.idle, &mut rng))
            .collect();
        let noise = Perlin::new(rng.r#gen());

        Self {
            zones,
            noise,
            rng,
            frame: 0,
            edges: None,
            palette,
            face: None,
        }
    }

    /// Use `face` for the digit glyphs from the next frame on.
    pub fn set_face(&mut self, face: Face) {
        log::info!("digits now drawn with '{}'", face.name());
        self.face = Some(face);
        for zone in &mut self.zones {
            zone.invalidate();
        }
    }

    pub fn has_face(&self) -> bool {
        self.face.is_some()
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Detect clock edges, apply their impulses, and retarget every zone.
    ///
    /// The very first reading only primes edge detection.
    pub fn begin_frame(&mut self, reading: &ClockReading) -> FrameReport {
        let mut report = FrameReport::default();

        let edges = match self.edges.as_mut() {
            Some(tracker) => tracker.observe(reading),
            None => {
                self.edges = Some(ClockEdges::new(reading));
                Default::default()
            }
        };

        for impulse in edges.impulses() {
            match impulse {
                Impulse::Vibration => report.vibration = true,
                Impulse::Shatter => {
                    log::debug!("minute rollover at {}, shattering", reading.footer_text());
                    report.shatter = true;
                }
            }
            for zone in &mut self.zones {
                zone.apply_impulse(impulse, &mut self.rng);
            }
        }

        for (zone, digit) in self.zones.iter_mut().zip(reading.digits()) {
            report.regenerated[zone.index()] = zone.retarget(self.face.as_ref(), digit);
        }

        report
    }

    /// Step every particle of every zone once and advance the frame counter.
    pub fn advance(&mut self) {
        for zone in &mut self.zones {
            zone.step(self.frame, &self.noise, &self.palette, &mut self.rng);
        }
        self.frame += 1;
    }

    /// A full frame: [`begin_frame`](Self::begin_frame) then
    /// [`advance`](Self::advance).
    pub fn tick(&mut self, reading: &ClockReading) -> FrameReport {
        let report = self.begin_frame(reading);
        self.advance();
        report
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zone `index`, or `None` past the last zone.
    pub fn zone(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Sprites for every particle in every zone.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.zones.iter().flat_map(|zone| zone.sprites(self.frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::MAX_SPEED;
    use motes_core::ColorTheme;
    use motes_fonts::BlockFace;

    fn reading(hour: u32, minute: u32, second: u32) -> ClockReading {
        ClockReading {
            hour,
            minute,
            second,
            day: 9,
            month: 3,
            year: 2024,
            weekday: 6,
        }
    }

    fn world() -> SwarmWorld {
        let mut world = SwarmWorld::seeded(800, ColorTheme::Moss.palette(), 42);
        world.set_face(Face::Block(BlockFace::new()));
        world
    }

    #[test]
    fn test_first_frame_has_no_disturbance() {
        let mut w = world();
        let report = w.begin_frame(&reading(12, 34, 59));
        assert!(!report.vibration && !report.shatter);
        assert_eq!(report.regenerated, [true; ZONE_COUNT]);
        assert!(w.zones().iter().all(|z| z
            .particles()
            .iter()
            .all(|p| p.acceleration() == Vec2::ZERO)));
    }

    #[test]
    fn test_second_edge_pushes_every_zone() {
        let mut w = world();
        w.tick(&reading(12, 34, 58));

        let report = w.begin_frame(&reading(12, 34, 59));
        assert!(report.vibration && !report.shatter);
        for zone in w.zones() {
            assert!(
                zone.particles()
                    .iter()
                    .any(|p| p.acceleration().length() > 0.0),
                "zone {} untouched",
                zone.index()
            );
        }
    }

    #[test]
    fn test_invariants_hold_through_shatters() {
        let mut w = world();
        let mut clock = (12, 0, 0);

        for _ in 0..240 {
            w.tick(&reading(clock.0, clock.1, clock.2));
            for zone in w.zones() {
                for p in zone.particles() {
                    assert!(p.velocity().length() <= MAX_SPEED + 1e-3);
                    assert!(zone.bounds().contains(p.position()));
                }
            }
            // Every frame is a new second, every fifth a new minute
            clock.2 = (clock.2 + 1) % 60;
            if clock.2 % 5 == 0 {
                clock.1 = (clock.1 + 1) % 60;
            }
        }
    }

    #[test]
    fn test_no_face_keeps_simulating() {
        let mut w = SwarmWorld::seeded(50, ColorTheme::Moss.palette(), 7);
        assert!(!w.has_face());
        let before: Vec<Vec2> = w.zones()[0].particles().iter().map(|p| p.position()).collect();

        for s in 0..30 {
            let report = w.tick(&reading(8, 15, s));
            assert_eq!(report.regenerated, [false; ZONE_COUNT]);
        }
        assert_eq!(w.frame(), 30);
        assert!(w.zones().iter().all(|z| z.particles().iter().all(|p| !p.is_targeted())));
        let after: Vec<Vec2> = w.zones()[0].particles().iter().map(|p| p.position()).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_set_face_rebuilds_glyphs() {
        let mut w = world();
        w.tick(&reading(10, 10, 10));
        let report = w.tick(&reading(10, 10, 10));
        assert_eq!(report.regenerated, [false; ZONE_COUNT]);

        w.set_face(Face::Block(BlockFace::new()));
        let report = w.tick(&reading(10, 10, 10));
        assert_eq!(report.regenerated, [true; ZONE_COUNT]);
    }

    #[test]
    fn test_zone_lookup() {
        let w = world();
        assert_eq!(w.zone(2).map(Zone::index), Some(2));
        assert!(w.zone(ZONE_COUNT).is_none());
    }

    #[test]
    fn test_sprites_cover_all_particles() {
        let w = world();
        assert_eq!(w.sprites().count(), 4 * 800);
    }
}
