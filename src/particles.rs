//! Cosmetic particle simulations, in canvas coordinates (origin top-left, y down).
//! One `step` is one 60 Hz tick.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};

pub const AMBIENT_COUNT: usize = 100;

const GRAVITY: f32 = 0.06;
const DRAG: f32 = 0.998;
const LIFE_DECAY: f32 = 3.0;
const FULL_LIFE: f32 = 255.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Diameter in canvas units.
    pub radius: f32,
    /// 0-255
    pub opacity: f32,
}

/// Drifting background dots. Created once, never added to or removed.
#[derive(Resource, Clone, Debug, Default)]
pub struct AmbientField {
    particles: Vec<Particle>,
}

impl AmbientField {
    pub fn scatter<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                position: Vec2::new(
                    rng.random_range(0.0..CANVAS_WIDTH),
                    rng.random_range(0.0..CANVAS_HEIGHT),
                ),
                velocity: Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5)),
                radius: rng.random_range(2.0..5.0),
                opacity: rng.random_range(50.0..150.0),
            })
            .collect();
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.position += p.velocity;

            if p.position.x < 0.0 {
                p.position.x = CANVAS_WIDTH;
            }
            if p.position.x > CANVAS_WIDTH {
                p.position.x = 0.0;
            }
            if p.position.y < 0.0 {
                p.position.y = CANVAS_HEIGHT;
            }
            if p.position.y > CANVAS_HEIGHT {
                p.position.y = 0.0;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spark {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub life: f32,
}

impl Spark {
    /// Alpha for drawing, fading out with remaining life.
    pub fn alpha(&self) -> f32 {
        (self.life / FULL_LIFE).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FireworkBurst {
    pub origin: Vec2,
    pub color: Color,
    pub sparks: Vec<Spark>,
}

impl FireworkBurst {
    pub fn launch<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let origin = Vec2::new(
            rng.random_range(CANVAS_WIDTH * 0.2..CANVAS_WIDTH * 0.8),
            rng.random_range(CANVAS_HEIGHT * 0.15..CANVAS_HEIGHT * 0.45),
        );
        let color = Color::srgb_u8(
            rng.random_range(50..255),
            rng.random_range(50..255),
            rng.random_range(50..255),
        );

        let count = rng.random_range(40..80);
        let speed: f32 = rng.random_range(2.0..6.0);
        let sparks = (0..count)
            .map(|_| {
                let angle: f32 = rng.random_range(0.0..TAU);
                // Each axis gets its own magnitude, which makes bursts slightly ragged.
                let vx = angle.cos() * rng.random_range(0.5..speed);
                let vy = angle.sin() * rng.random_range(0.5..speed);
                Spark {
                    position: origin,
                    velocity: Vec2::new(vx, vy),
                    radius: rng.random_range(2.0..4.0),
                    life: FULL_LIFE,
                }
            })
            .collect();

        Self {
            origin,
            color,
            sparks,
        }
    }

    fn step(&mut self) {
        for s in &mut self.sparks {
            s.velocity.y += GRAVITY;
            s.velocity.x *= DRAG;
            s.position += s.velocity;
            s.life -= LIFE_DECAY;
        }
        self.sparks
            .retain(|s| s.life > 0.0 && s.position.y <= CANVAS_HEIGHT);
    }
}

/// Live bursts on the result screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fireworks {
    bursts: Vec<FireworkBurst>,
}

impl Fireworks {
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.bursts.push(FireworkBurst::launch(rng));
    }

    pub fn step(&mut self) {
        for burst in &mut self.bursts {
            burst.step();
        }
        self.bursts.retain(|b| !b.sparks.is_empty());
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
    }

    pub fn bursts(&self) -> &[FireworkBurst] {
        &self.bursts
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }

    pub fn spark_count(&self) -> usize {
        self.bursts.iter().map(|b| b.sparks.len()).sum()
    }
}
