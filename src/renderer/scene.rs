//! Scene building
//!
//! Turns a borrowed `GameState` into a triangle list. Pure: no GPU, no clock,
//! so it runs in native tests.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{HEIGHT, WIDTH};
use crate::settings::Settings;
use crate::sim::{Bird, GameState, Pipe, Rect};

/// Hill silhouette sits this far above the ground line
const HILL_RISE: f32 = 30.0;
const HILL_STEP: f32 = 10.0;
const HILL_FREQUENCY: f32 = 0.02;
const HILL_AMPLITUDE: f32 = 6.0;

const STRIPE_PITCH: f32 = 20.0;
const STRIPE_WIDTH: f32 = 10.0;

const PIPE_OUTLINE_WIDTH: f32 = 2.0;
const CAP_OVERHANG: f32 = 4.0;
const CAP_HEIGHT: f32 = 10.0;

const BIRD_CORNER: f32 = 6.0;
const BIRD_OUTLINE_WIDTH: f32 = 2.0;

/// Build the full frame: background, pipes, bird
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let ground_y = state.ground_y();
    let mut vertices = Vec::with_capacity(1024);
    background(&mut vertices, ground_y);
    for pipe in &state.pipes {
        pipe_vertices(&mut vertices, pipe, ground_y);
    }
    vertices.extend(bird(&state.bird, settings.effective_rotation(state.bird.rotation)));
    vertices
}

fn background(vertices: &mut Vec<Vertex>, ground_y: f32) {
    vertices.extend(shapes::vertical_gradient(
        Rect::new(0.0, 0.0, WIDTH, HEIGHT),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));

    let base = ground_y - HILL_RISE;
    let steps = (WIDTH / HILL_STEP) as usize;
    let hills: Vec<Vec2> = (0..=steps)
        .map(|i| {
            let x = i as f32 * HILL_STEP;
            Vec2::new(x, base + (x * HILL_FREQUENCY).sin() * HILL_AMPLITUDE)
        })
        .collect();
    vertices.extend(shapes::area_under(&hills, HEIGHT, colors::HILLS));

    let ground = Rect::new(0.0, ground_y, WIDTH, HEIGHT - ground_y);
    vertices.extend(shapes::rect(ground, colors::GROUND));
    let mut x = 0.0;
    while x < WIDTH {
        vertices.extend(shapes::rect(
            Rect::new(x, ground_y, STRIPE_WIDTH, ground.h),
            colors::GROUND_STRIPE,
        ));
        x += STRIPE_PITCH;
    }
}

fn pipe_vertices(vertices: &mut Vec<Vertex>, pipe: &Pipe, ground_y: f32) {
    for segment in [pipe.top_rect(), pipe.bottom_rect(ground_y)] {
        vertices.extend(shapes::rect(segment, colors::PIPE));
        vertices.extend(shapes::rect_outline(
            segment,
            PIPE_OUTLINE_WIDTH,
            colors::PIPE_OUTLINE,
        ));
    }

    // Lips at the mouth of each segment
    let cap_x = pipe.x - CAP_OVERHANG;
    let cap_w = pipe.width + 2.0 * CAP_OVERHANG;
    vertices.extend(shapes::rect(
        Rect::new(cap_x, pipe.gap_top - CAP_HEIGHT, cap_w, CAP_HEIGHT),
        colors::PIPE_CAP,
    ));
    vertices.extend(shapes::rect(
        Rect::new(cap_x, pipe.gap_bottom(), cap_w, CAP_HEIGHT),
        colors::PIPE_CAP,
    ));
}

/// Bird drawn around its center, tilted by `rotation`
pub fn bird(bird: &Bird, rotation: f32) -> Vec<Vertex> {
    let (w, h) = (bird.width, bird.height);
    let body = Rect::new(-w / 2.0, -h / 2.0, w, h);

    let mut vertices = Vec::new();
    // Outline first, body on top of it
    vertices.extend(shapes::rounded_rect(
        Rect::new(
            body.x - BIRD_OUTLINE_WIDTH / 2.0,
            body.y - BIRD_OUTLINE_WIDTH / 2.0,
            body.w + BIRD_OUTLINE_WIDTH,
            body.h + BIRD_OUTLINE_WIDTH,
        ),
        BIRD_CORNER + BIRD_OUTLINE_WIDTH / 2.0,
        colors::BIRD_OUTLINE,
        4,
    ));
    vertices.extend(shapes::rounded_rect(body, BIRD_CORNER, colors::BIRD_BODY, 4));

    // Wing
    vertices.extend(shapes::rounded_rect(
        Rect::new(-8.0, -4.0, 16.0, 8.0),
        4.0,
        colors::BIRD_WING,
        3,
    ));

    // Eye
    vertices.extend(shapes::circle(Vec2::new(6.0, -6.0), 5.0, colors::BIRD_EYE, 12));
    vertices.extend(shapes::circle(Vec2::new(7.0, -6.0), 2.0, colors::BIRD_PUPIL, 8));

    // Beak
    vertices.extend(shapes::triangle(
        Vec2::new(w / 2.0 - 2.0, 0.0),
        Vec2::new(w / 2.0 + 8.0, -4.0),
        Vec2::new(w / 2.0 + 8.0, 4.0),
        colors::BIRD_BEAK,
    ));

    shapes::transform(&mut vertices, Vec2::new(bird.x, bird.y), rotation);
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, spawn_pipe, tick};

    #[test]
    fn test_pipes_add_geometry() {
        let settings = Settings::default();
        let mut state = GameState::new(4);
        let empty = build_scene(&state, &settings).len();

        tick(&mut state, &TickInput::FLAP, 0.0);
        spawn_pipe(&mut state);
        let one = build_scene(&state, &settings).len();
        spawn_pipe(&mut state);
        let two = build_scene(&state, &settings).len();
        assert!(one > empty);
        assert_eq!(two - one, one - empty);
    }

    #[test]
    fn test_bird_near_its_position() {
        let b = Bird {
            y: 200.0,
            ..Default::default()
        };
        let reach = Vec2::new(b.width / 2.0 + 8.0, b.height / 2.0 + 2.0).length();
        for v in bird(&b, 0.6) {
            let d = Vec2::from(v.position).distance(Vec2::new(b.x, b.y));
            assert!(d <= reach + 1e-3);
        }
    }

    #[test]
    fn test_beak_points_forward_without_tilt() {
        let b = Bird::default();
        let v = bird(&b, 0.0);
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_eq!(max_x, b.x + b.width / 2.0 + 8.0);
    }

    #[test]
    fn test_scene_is_pure() {
        let settings = Settings::default();
        let state = GameState::new(4);
        assert_eq!(build_scene(&state, &settings), build_scene(&state, &settings));
    }
}
