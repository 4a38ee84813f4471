//! Frame building: session state in, draw list out
//!
//! Pure with respect to the session; the painter never feeds anything back.

use glam::Vec2;

use super::shapes::{DrawList, diamond_points, rock_points, star_points};
use crate::consts::*;
use crate::palette::{self, Rgb};
use crate::sim::climbing::ClimbingState;
use crate::sim::collect::{CollectState, DropZone};
use crate::sim::state::{GameSession, ModeState};
use crate::sim::{AsteroidsState, Background, ObstacleKind, ParticleKind};

/// Screen-shake jitter at `time` for magnitude `shake`
pub fn shake_offset(shake: f32, time: f32) -> Vec2 {
    if shake <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((time * 91.7).sin(), (time * 73.3).cos()) * shake * 0.5
}

/// Build everything visible this frame, back to front
pub fn build_frame(gs: &GameSession, time: f32) -> DrawList {
    let mut list = DrawList::new(palette::SPACE_TOP);
    list.offset = shake_offset(gs.screen_shake, time);

    background(&mut list, &gs.background, gs.settings.background_effects);

    match &gs.mode {
        ModeState::Idle => {}
        ModeState::Collect(state) => collect(&mut list, gs, state),
        ModeState::Asteroids(state) => asteroids(&mut list, gs, state),
        ModeState::Climbing(state) => climbing(&mut list, gs, state),
    }

    for beam in &gs.laser_beams {
        let a = beam.life.clamp(0.0, 1.0);
        list.line(beam.start, beam.end, 6.0, palette::LASER_CYAN.with_alpha(a * 0.3));
        list.line(beam.start, beam.end, 2.0, palette::WHITE.with_alpha(a));
    }

    for p in gs.particles.particles() {
        let a = p.life.clamp(0.0, 1.0);
        match p.kind {
            ParticleKind::Shockwave => list.ring(p.pos, p.size, 3.0, p.color.with_alpha(a)),
            ParticleKind::Normal | ParticleKind::Collect => {
                list.circle(p.pos, p.size * (0.5 + 0.5 * a), p.color.with_alpha(a))
            }
        }
    }

    list
}

fn background(list: &mut DrawList, bg: &Background, effects: bool) {
    if effects {
        for cloud in &bg.nebulae {
            list.glow(cloud.pos, cloud.size, cloud.color.with_alpha(0.1));
        }
    }

    for star in &bg.stars {
        list.circle(star.pos, star.size, star.color.with_alpha(star.opacity(bg.time)));
    }

    if !effects {
        return;
    }
    for planet in &bg.planets {
        list.glow(planet.pos, planet.size * 1.4, planet.color.with_alpha(planet.opacity * 0.3));
        list.circle(planet.pos, planet.size, planet.color.with_alpha(planet.opacity));
    }
    for comet in &bg.comets {
        let tail = comet.pos - comet.vel.normalize_or_zero() * 60.0;
        list.line(tail, comet.pos, comet.size, palette::WHITE.with_alpha(comet.life * 0.5));
        list.circle(comet.pos, comet.size, palette::WHITE.with_alpha(comet.life));
    }
    for ufo in &bg.ufos {
        let a = ufo.life.clamp(0.0, 1.0);
        list.glow(ufo.pos, ufo.size * 1.5, palette::UFO_GREEN.with_alpha(a * 0.3));
        list.ring(ufo.pos, ufo.size, 2.0, palette::UFO_GREEN.with_alpha(a));
        list.circle(ufo.pos - Vec2::new(0.0, ufo.size * 0.3), ufo.size * 0.4, Rgb::hex(0xc0c0c0).with_alpha(a));
    }
}

fn player_planet(list: &mut DrawList, gs: &GameSession, pos: Vec2, radius: f32) {
    let skin = gs.skin;
    list.glow(pos, radius * 1.6, skin.glow.with_alpha(0.4));
    list.circle(pos, radius, skin.body.with_alpha(1.0));
    list.circle(
        pos - Vec2::splat(radius * 0.3),
        radius * 0.35,
        skin.body.lighten(30.0).with_alpha(0.6),
    );
    if gs.player.shield_active {
        list.ring(pos, radius + 15.0, 4.0, palette::SHIELD_BLUE.with_alpha(1.0));
    }
}

fn collect(list: &mut DrawList, gs: &GameSession, state: &CollectState) {
    let zone = DropZone::for_viewport(gs.viewport);
    list.rect(
        zone.center - zone.size / 2.0,
        zone.size,
        Some(palette::SUCCESS_GREEN.with_alpha(0.1)),
        Some(palette::SUCCESS_GREEN.with_alpha(0.8)),
    );

    for planet in state.planets.iter().filter(|p| !p.collected) {
        let color = planet.color.rgb();
        if planet.is_target {
            list.glow(planet.pos, planet.size + 15.0, color.with_alpha(0.5));
        }
        list.circle(planet.pos, planet.size, color.with_alpha(1.0));
        list.circle(
            planet.pos - Vec2::splat(planet.size * 0.3),
            planet.size * 0.4,
            color.lighten(30.0).with_alpha(0.7),
        );
    }
}

fn asteroids(list: &mut DrawList, gs: &GameSession, state: &AsteroidsState) {
    player_planet(list, gs, gs.viewport.center(), CENTER_PLANET_RADIUS);

    for rock in &state.asteroids {
        let color = rock.kind.color();
        list.polygon(
            rock_points(rock.pos, rock.size, rock.rotation, 10),
            color.with_alpha(1.0),
        );
        list.ring(rock.pos, rock.size * 0.9, 2.0, color.darken(20.0).with_alpha(0.8));
    }
}

fn climbing(list: &mut DrawList, gs: &GameSession, state: &ClimbingState) {
    let glow = gs.skin.glow;
    for point in &state.trail {
        list.circle(point.pos, PLAYER_RADIUS * 0.5 * point.life, glow.with_alpha(point.life * 0.3));
    }

    for o in &state.obstacles {
        let fill = o.kind.color().with_alpha(1.0);
        match o.kind {
            ObstacleKind::Asteroid => {
                list.polygon(rock_points(o.pos, o.size, o.pos.x * 0.01, 9), fill)
            }
            ObstacleKind::Star => {
                list.glow(o.pos, o.size * 2.0, o.kind.color().with_alpha(0.4));
                list.polygon(star_points(o.pos, o.size, o.size * 0.45, 5, 0.0), fill);
            }
            ObstacleKind::Crystal => {
                list.glow(o.pos, o.size * 2.0, o.kind.color().with_alpha(0.4));
                list.polygon(diamond_points(o.pos, o.size), fill);
            }
        }
    }

    for p in &state.powerups {
        let pulse = 1.0 + 0.15 * p.animation_time.sin();
        let color = p.kind.color();
        list.glow(p.pos, p.size * 2.0 * pulse, color.with_alpha(0.5));
        list.circle(p.pos, p.size * pulse, color.with_alpha(0.9));
        list.ring(p.pos, p.size * pulse + 4.0, 2.0, palette::WHITE.with_alpha(0.8));
    }

    if gs.player.speed_boost > 0.0 {
        list.circle(state.player, 50.0, palette::SPEED_YELLOW.with_alpha(0.2));
    }
    player_planet(list, gs, state.player, PLAYER_RADIUS);
}
