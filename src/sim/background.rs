//! Decorative backdrop: twinkling stars, drifting nebulae and planets,
//! occasional comets and UFOs. Animates in every phase, menus included.

use glam::Vec2;
use rand::Rng;

use super::rand_between;
use super::state::Viewport;
use crate::palette::{self, Rgb};

/// Comet spawn chance per second
const COMET_RATE: f32 = 0.12;
/// UFO spawn chance per second
const UFO_RATE: f32 = 0.03;
const COMET_FADE: f32 = 0.3;
const UFO_FADE: f32 = 0.18;
const UFO_SPEED: f32 = 120.0;
const NEBULA_COUNT: usize = 8;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub twinkle_speed: f32,
    pub twinkle_offset: f32,
    pub color: Rgb,
}

impl Star {
    /// Opacity at background time `t`
    pub fn opacity(&self, t: f32) -> f32 {
        (t * self.twinkle_speed + self.twinkle_offset).sin() * 0.5 + 0.5
    }
}

#[derive(Debug, Clone)]
pub struct Nebula {
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub struct BackdropPlanet {
    pub pos: Vec2,
    pub size: f32,
    /// Horizontal drift (px/s)
    pub speed: f32,
    pub color: Rgb,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct Comet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct Ufo {
    pub pos: Vec2,
    pub vel_x: f32,
    pub life: f32,
    pub size: f32,
}

/// All backdrop stores
#[derive(Debug, Clone, Default)]
pub struct Background {
    pub stars: Vec<Star>,
    pub nebulae: Vec<Nebula>,
    pub planets: Vec<BackdropPlanet>,
    pub comets: Vec<Comet>,
    pub ufos: Vec<Ufo>,
    /// Seconds of backdrop animation
    pub time: f32,
}

impl Background {
    pub fn new<R: Rng>(rng: &mut R, viewport: Viewport, star_count: usize) -> Self {
        let mut bg = Self::default();
        bg.reseed(rng, viewport, star_count);
        bg
    }

    /// Regenerate the static layers for a (possibly resized) viewport
    pub fn reseed<R: Rng>(&mut self, rng: &mut R, viewport: Viewport, star_count: usize) {
        let (w, h) = (viewport.width, viewport.height);

        self.stars = (0..star_count)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h),
                size: rng.random::<f32>() * 2.5,
                twinkle_speed: rand_between(rng, 0.01, 0.03),
                twinkle_offset: rng.random::<f32>() * std::f32::consts::TAU,
                color: if rng.random::<f32>() > 0.95 {
                    palette::STAR_TINTS[rng.random_range(0..palette::STAR_TINTS.len())]
                } else {
                    palette::WHITE
                },
            })
            .collect();

        self.planets = palette::BACKDROP_PLANETS
            .iter()
            .map(|&color| BackdropPlanet {
                pos: Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h),
                size: rand_between(rng, 40.0, 120.0),
                speed: (rng.random::<f32>() - 0.5) * 12.0,
                color,
                opacity: rand_between(rng, 0.3, 0.6),
            })
            .collect();

        self.nebulae = (0..NEBULA_COUNT)
            .map(|i| Nebula {
                pos: Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h),
                size: rand_between(rng, 200.0, 500.0),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 6.0,
                    (rng.random::<f32>() - 0.5) * 6.0,
                ),
                color: palette::NEBULA_TINTS[i % palette::NEBULA_TINTS.len()],
            })
            .collect();

        self.comets.clear();
        self.ufos.clear();
    }

    /// Advance the backdrop. With `effects` off only the stars animate.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, dt: f32, viewport: Viewport, effects: bool) {
        let (w, h) = (viewport.width, viewport.height);
        self.time += dt;

        if !effects {
            self.comets.clear();
            self.ufos.clear();
            return;
        }

        for cloud in &mut self.nebulae {
            cloud.pos += cloud.vel * dt;
            cloud.pos.x = wrap(cloud.pos.x, cloud.size, w);
            cloud.pos.y = wrap(cloud.pos.y, cloud.size, h);
        }

        for planet in &mut self.planets {
            planet.pos.x = wrap(planet.pos.x + planet.speed * dt, planet.size, w);
        }

        if rng.random::<f32>() < COMET_RATE * dt {
            self.comets.push(Comet {
                pos: Vec2::new(rng.random::<f32>() * w, -50.0),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 180.0,
                    rand_between(rng, 180.0, 480.0),
                ),
                life: 1.0,
                size: 3.0,
            });
        }
        for comet in &mut self.comets {
            comet.pos += comet.vel * dt;
            comet.life -= COMET_FADE * dt;
        }
        self.comets.retain(|c| c.life > 0.0 && c.pos.y < h + 50.0);

        if rng.random::<f32>() < UFO_RATE * dt {
            let from_left = rng.random::<bool>();
            self.ufos.push(Ufo {
                pos: Vec2::new(
                    if from_left { -50.0 } else { w + 50.0 },
                    rng.random::<f32>() * h * 0.3,
                ),
                vel_x: if from_left { UFO_SPEED } else { -UFO_SPEED },
                life: 1.0,
                size: 20.0,
            });
            log::debug!("UFO sighted");
        }
        for ufo in &mut self.ufos {
            ufo.pos.x += ufo.vel_x * dt;
            ufo.life -= UFO_FADE * dt;
        }
        self.ufos
            .retain(|u| u.life > 0.0 && u.pos.x > -100.0 && u.pos.x < w + 100.0);
    }
}

/// Wrap a coordinate that left `[-margin, extent + margin]` to the other side
fn wrap(v: f32, margin: f32, extent: f32) -> f32 {
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_reseed_counts() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bg = Background::new(&mut rng, VIEW, 300);
        assert_eq!(bg.stars.len(), 300);
        assert_eq!(bg.planets.len(), 4);
        assert_eq!(bg.nebulae.len(), NEBULA_COUNT);
        assert!(bg.stars.iter().all(|s| (0.0..=1.0).contains(&s.opacity(12.0))));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(-61.0, 60.0, 800.0), 860.0);
        assert_eq!(wrap(861.0, 60.0, 800.0), -60.0);
        assert_eq!(wrap(10.0, 60.0, 800.0), 10.0);
    }

    #[test]
    fn test_comets_fade_out() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut bg = Background::new(&mut rng, VIEW, 0);
        bg.comets.push(Comet {
            pos: Vec2::new(100.0, 0.0),
            vel: Vec2::new(0.0, 10.0),
            life: 0.01,
            size: 3.0,
        });
        bg.tick(&mut rng, 0.05, VIEW, true);
        // Only a freshly spawned comet could remain
        assert!(bg.comets.iter().all(|c| c.life > 0.9));
    }

    #[test]
    fn test_effects_off_clears_transients() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bg = Background::new(&mut rng, VIEW, 10);
        bg.ufos.push(Ufo {
            pos: Vec2::ZERO,
            vel_x: UFO_SPEED,
            life: 1.0,
            size: 20.0,
        });
        bg.tick(&mut rng, 0.016, VIEW, false);
        assert!(bg.ufos.is_empty());
        assert!((bg.time - 0.016).abs() < 1e-6);
    }
}
