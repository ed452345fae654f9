//! One firework entity: ascent physics, explosion into a particle burst,
//! trail decay, and self-reset. The lifecycle runs forever; every tick is an
//! ordered pair of calls, [`Firework::update`] (physics) then
//! [`Firework::render`] (drawing), so the physics can be asserted against a
//! headless surface.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::canvas::{Canvas, Gradient, Paint};
use crate::color::{Hsl, Rgba};

// Classic shell colors
const PALETTE: [Hsl; 4] = [
    Hsl::new(51.0, 100.0, 50.0),  // golden
    Hsl::new(0.0, 0.0, 75.0),     // silver
    Hsl::new(120.0, 100.0, 50.0), // green
    Hsl::new(0.0, 100.0, 50.0),   // red
];

// Downward acceleration per tick. The ascending rocket feels 0.7x of it;
// debris gets the full value.
const GRAVITY: f32 = 0.08;

const BASE_PARTICLE_COUNT: usize = 60;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExplosionPattern {
    /// One uniform ring: equally spaced angles, lightly jittered speed.
    RadialUniform,
    /// Two full circles at two fixed speeds, expanding concentrically.
    ConcentricRings,
    /// Eight principal rays, ten particles each, jittered around the ray.
    Starburst,
}

impl ExplosionPattern {
    fn random(rng: &mut fastrand::Rng) -> Self {
        match rng.usize(0..3) {
            0 => ExplosionPattern::RadialUniform,
            1 => ExplosionPattern::ConcentricRings,
            _ => ExplosionPattern::Starburst,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Ascending,
    Exploded,
}

struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    alpha: f32,
    color: Hsl,
    /// Past positions, oldest first. Capped at `max_trail`.
    trail: VecDeque<(f32, f32)>,
    max_trail: usize,
    /// Whether this tick's render overlays the white glint disc.
    glint: bool,
}

struct Sparkle {
    x: f32,
    y: f32,
    size: f32,
    alpha: f32,
}

pub struct Firework {
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    wind: f32,
    color: Hsl,
    pattern: ExplosionPattern,
    state: State,
    particles: Vec<Particle>,
    sparkles: Vec<Sparkle>,
    age: u32,
    rng: fastrand::Rng,
}

impl Firework {
    /// `width`/`height` are the canvas dimensions in pixels; `rng` is the
    /// entity's own generator, seedable for reproducible displays.
    pub fn new(width: f32, height: f32, rng: fastrand::Rng) -> Self {
        let mut fw = Self {
            width,
            height,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            wind: 0.0,
            color: PALETTE[0],
            pattern: ExplosionPattern::RadialUniform,
            state: State::Ascending,
            particles: Vec::new(),
            sparkles: Vec::new(),
            age: 0,
            rng,
        };
        fw.reset();
        fw
    }

    /// Host notification that the canvas changed size. The stored
    /// dimensions feed the explosion-trigger altitude immediately and the
    /// launch lane at the next reset; entities in flight are not disturbed.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn pattern(&self) -> ExplosionPattern {
        self.pattern
    }

    /// Ticks since the last reset.
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn sparkle_count(&self) -> usize {
        self.sparkles.len()
    }

    fn reset(&mut self) {
        // Half the launches cluster in the central third; the rest split
        // between two side bands.
        self.x = if self.rng.f32() < 0.5 {
            self.width * (0.33 + self.rng.f32() * 0.34)
        } else if self.rng.f32() < 0.5 {
            self.width * (0.1 + self.rng.f32() * 0.2)
        } else {
            self.width * (0.7 + self.rng.f32() * 0.2)
        };
        self.y = self.height;

        self.color = PALETTE[self.rng.usize(0..PALETTE.len())];
        self.pattern = ExplosionPattern::random(&mut self.rng);

        self.vx = (self.rng.f32() - 0.5) * 1.5;
        self.vy = -(self.rng.f32() * 4.0 + 6.0);
        self.wind = (self.rng.f32() - 0.5) * 0.02;

        self.state = State::Ascending;
        self.particles.clear();
        self.sparkles.clear();
        self.age = 0;
    }

    /// Advance the simulation one tick. Physics only; pair with [`render`].
    ///
    /// [`render`]: Firework::render
    pub fn update(&mut self) {
        self.age += 1;
        match self.state {
            State::Ascending => self.ascend(),
            State::Exploded => self.decay(),
        }
    }

    fn ascend(&mut self) {
        self.vx += self.wind;
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY * 0.7;

        if self.rng.f32() < 0.2 {
            self.sparkles.push(Sparkle {
                x: self.x,
                y: self.y,
                size: self.rng.f32() * 1.5,
                alpha: 0.8,
            });
        }

        // Pop once the climb stalls or the shell clears 80% of the canvas
        // height, whichever comes first.
        if self.vy >= -2.0 || self.y <= self.height * 0.2 {
            self.explode();
        }
    }

    fn explode(&mut self) {
        match self.pattern {
            ExplosionPattern::RadialUniform => {
                for i in 0..BASE_PARTICLE_COUNT {
                    let angle = i as f32 / BASE_PARTICLE_COUNT as f32 * TAU;
                    let speed = 4.0 + self.rng.f32();
                    self.spawn_particle(angle, speed);
                }
            }
            ExplosionPattern::ConcentricRings => {
                for &speed in &[3.0, 5.0] {
                    for i in 0..BASE_PARTICLE_COUNT {
                        let angle = i as f32 / BASE_PARTICLE_COUNT as f32 * TAU;
                        self.spawn_particle(angle, speed);
                    }
                }
            }
            ExplosionPattern::Starburst => {
                for ray in 0..8 {
                    let base = ray as f32 / 8.0 * TAU;
                    for _ in 0..10 {
                        let angle = base + (self.rng.f32() - 0.5) * 0.5;
                        let speed = 3.0 + self.rng.f32() * 2.0;
                        self.spawn_particle(angle, speed);
                    }
                }
            }
        }
        self.state = State::Exploded;
    }

    fn spawn_particle(&mut self, angle: f32, speed: f32) {
        let mut trail = VecDeque::new();
        trail.push_back((self.x, self.y));
        self.particles.push(Particle {
            x: self.x,
            y: self.y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            size: self.rng.f32() * 2.0 + 1.5,
            alpha: 1.0,
            color: self.color,
            trail,
            max_trail: self.rng.usize(5..=12),
            glint: false,
        });
    }

    fn decay(&mut self) {
        let rng = &mut self.rng;
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += GRAVITY;
            p.vx *= 0.99; // horizontal drag only
            p.size *= 0.96;

            p.trail.push_back((p.x, p.y));
            if p.trail.len() > p.max_trail {
                p.trail.pop_front();
            }

            p.glint = rng.f32() < 0.05;
            p.alpha -= 0.016;
            p.alpha > 0.0
        });

        self.sparkles.retain_mut(|s| {
            s.alpha -= 0.05;
            s.alpha > 0.0
        });

        if self.particles.is_empty() && self.sparkles.is_empty() {
            self.reset();
        }
    }

    /// Draw the current state. Never mutates simulation state.
    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        match self.state {
            State::Ascending => self.render_streak(canvas),
            State::Exploded => self.render_burst(canvas),
        }
    }

    /// Short fading streak behind the rocket, along the reversed velocity.
    fn render_streak<C: Canvas>(&self, canvas: &mut C) {
        canvas.set_line_width(2.0);
        for i in 0..4 {
            let alpha = (1.0 - i as f32 / 4.0) * 0.4;
            let offset = i as f32 * 2.0;
            canvas.begin_path();
            canvas.move_to(self.x - self.vx * offset, self.y - self.vy * offset);
            canvas.line_to(
                self.x - self.vx * (offset + 2.0),
                self.y - self.vy * (offset + 2.0),
            );
            canvas.set_stroke(Paint::Solid(Rgba::white(alpha)));
            canvas.stroke();
        }
    }

    fn render_burst<C: Canvas>(&self, canvas: &mut C) {
        for p in &self.particles {
            if p.trail.len() > 1 {
                // Trail fades from nothing at the oldest point up to the
                // particle's current alpha at its position.
                let (ox, oy) = p.trail[0];
                let gradient = Gradient::new((ox, oy), (p.x, p.y))
                    .add_stop(0.0, p.color.with_alpha(0.0))
                    .add_stop(1.0, p.color.with_alpha(p.alpha));
                canvas.begin_path();
                canvas.move_to(ox, oy);
                for &(tx, ty) in p.trail.iter().skip(1) {
                    canvas.line_to(tx, ty);
                }
                canvas.set_stroke(Paint::Linear(gradient));
                canvas.set_line_width(p.size);
                canvas.stroke();
            }

            canvas.set_fill(Paint::Solid(p.color.with_alpha(p.alpha)));
            canvas.fill_circle(p.x, p.y, p.size);

            if p.glint {
                canvas.set_fill(Paint::Solid(Rgba::white(p.alpha * 0.3)));
                canvas.fill_circle(p.x, p.y, p.size * 1.5);
            }
        }

        for s in &self.sparkles {
            canvas.set_fill(Paint::Solid(Rgba::white(s.alpha)));
            canvas.fill_circle(s.x, s.y, s.size);
        }
    }
}
