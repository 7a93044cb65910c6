/// Decorative background: floating particles plus a pointer follower
///
/// Each particle drifts in a straight line between two random points and
/// back again; positions are kept normalized (0..1) and scaled to the
/// canvas bounds when drawing.
use iced::mouse;
use iced::widget::canvas::{self, Path};
use iced::{Color, Point, Rectangle, Renderer, Theme, Vector};
use rand::Rng;
use std::time::Instant;

use crate::Message;

const PARTICLE_RADIUS: f32 = 4.0;
const FOLLOWER_RADIUS: f32 = 12.0;
/// Fraction of the remaining distance the follower covers per tick
const FOLLOWER_EASING: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    from: Vector,
    to: Vector,
    /// Seconds for one leg of the trip
    period: f32,
}

impl Particle {
    /// Normalized position after `elapsed` seconds (ping-pong, linear)
    fn position(&self, elapsed: f32) -> Vector {
        let t = ping_pong(elapsed / self.period);
        self.from + (self.to - self.from) * t
    }
}

/// 0 → 1 → 0 → 1 ... for an ever-increasing phase
fn ping_pong(phase: f32) -> f32 {
    let cycle = phase.rem_euclid(2.0);
    if cycle <= 1.0 {
        cycle
    } else {
        2.0 - cycle
    }
}

/// State of the animated background
pub struct ParticleField {
    particles: Vec<Particle>,
    started: Instant,
    elapsed: f32,
    pointer: Option<Point>,
    follower: Option<Point>,
    cache: canvas::Cache,
}

impl ParticleField {
    pub fn new(count: usize) -> Self {
        let mut rng = rand::thread_rng();
        let particles = (0..count)
            .map(|_| Particle {
                from: Vector::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)),
                to: Vector::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)),
                // Between 10 and 20 seconds per leg
                period: rng.gen_range(10.0..20.0),
            })
            .collect();

        Self {
            particles,
            started: Instant::now(),
            elapsed: 0.0,
            pointer: None,
            follower: None,
            cache: canvas::Cache::new(),
        }
    }

    /// Advance the animation to `now`
    pub fn tick(&mut self, now: Instant) {
        self.elapsed = now.saturating_duration_since(self.started).as_secs_f32();

        if let Some(target) = self.pointer {
            let current = self.follower.unwrap_or(target);
            self.follower = Some(current + (target - current) * FOLLOWER_EASING);
        }

        self.cache.clear();
    }

    /// Track the pointer for the follower dot
    pub fn pointer_moved(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}

impl canvas::Program<Message> for ParticleField {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let particle_color = Color::from_rgba(0.659, 0.333, 0.969, 0.2);

            for particle in &self.particles {
                let position = particle.position(self.elapsed);
                let center = Point::new(position.x * bounds.width, position.y * bounds.height);
                frame.fill(&Path::circle(center, PARTICLE_RADIUS), particle_color);
            }

            // The follower uses window coordinates; the canvas fills the window
            if let Some(follower) = self.follower {
                frame.fill(
                    &Path::circle(follower, FOLLOWER_RADIUS),
                    Color::from_rgba(0.024, 0.714, 0.831, 0.3),
                );
            }
        });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_ping_pong_bounces() {
        assert_eq!(ping_pong(0.0), 0.0);
        assert_eq!(ping_pong(0.5), 0.5);
        assert_eq!(ping_pong(1.0), 1.0);
        assert_eq!(ping_pong(1.5), 0.5);
        assert_eq!(ping_pong(2.0), 0.0);
    }

    #[test]
    fn test_particle_reaches_end_after_one_period() {
        let particle = Particle {
            from: Vector::new(0.0, 0.0),
            to: Vector::new(1.0, 0.5),
            period: 10.0,
        };
        assert_eq!(particle.position(10.0), Vector::new(1.0, 0.5));
        assert_eq!(particle.position(20.0), Vector::new(0.0, 0.0));
    }

    #[test]
    fn test_particles_stay_in_unit_square() {
        let mut field = ParticleField::new(20);
        assert_eq!(field.len(), 20);

        field.tick(field.started + Duration::from_secs(37));
        for particle in &field.particles {
            assert!((10.0..20.0).contains(&particle.period));
            let p = particle.position(field.elapsed);
            assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_follower_eases_toward_pointer() {
        let mut field = ParticleField::new(0);
        let now = Instant::now();
        field.tick(now);
        assert_eq!(field.follower, None);

        field.pointer_moved(Point::new(100.0, 0.0));
        field.tick(now);
        assert_eq!(field.follower, Some(Point::new(100.0, 0.0)));

        field.pointer_moved(Point::new(200.0, 0.0));
        field.tick(now);
        let follower = field.follower.unwrap();
        assert!(follower.x > 100.0 && follower.x < 200.0);
    }
}
