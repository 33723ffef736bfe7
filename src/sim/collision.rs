//! Collision detection for axis-aligned boxes
//!
//! The bird is a box, every pipe is two boxes (above and below the gap), and
//! the playfield is bounded by the ceiling (y = 0) and the ground line.

use super::state::{Bird, CrashCause, Pipe};

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Check the bird against one pipe (top segment first)
pub fn pipe_collision(bird: &Rect, pipe: &Pipe, ground_y: f32) -> Option<CrashCause> {
    if bird.overlaps(&pipe.top_rect()) {
        Some(CrashCause::PipeTop(pipe.id))
    } else if bird.overlaps(&pipe.bottom_rect(ground_y)) {
        Some(CrashCause::PipeBottom(pipe.id))
    } else {
        None
    }
}

/// Check the bird against the ground line and the top of the surface
pub fn boundary_collision(bird: &Bird, ground_y: f32) -> Option<CrashCause> {
    if bird.y + bird.height / 2.0 >= ground_y {
        Some(CrashCause::Ground)
    } else if bird.y - bird.height / 2.0 <= 0.0 {
        Some(CrashCause::Ceiling)
    } else {
        None
    }
}

/// First collision in iteration order: pipes (oldest first), then boundaries
pub fn first_collision(bird: &Bird, pipes: &[Pipe], ground_y: f32) -> Option<CrashCause> {
    let bounds = bird.bounds();
    pipes
        .iter()
        .find_map(|pipe| pipe_collision(&bounds, pipe, ground_y))
        .or_else(|| boundary_collision(bird, ground_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(id: u32, x: f32, gap_top: f32) -> Pipe {
        Pipe {
            id,
            x,
            gap_top,
            gap_height: 160.0,
            width: 45.0,
            scored: false,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Touching edges is not an overlap
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_bird_in_gap_is_safe() {
        let bird = Bird {
            y: 280.0,
            ..Default::default()
        };
        let p = pipe(1, 70.0, 200.0);
        assert_eq!(pipe_collision(&bird.bounds(), &p, 530.0), None);
    }

    #[test]
    fn test_top_and_bottom_hits() {
        let p = pipe(7, 70.0, 200.0);

        let high = Bird {
            y: 195.0,
            ..Default::default()
        };
        assert_eq!(
            pipe_collision(&high.bounds(), &p, 530.0),
            Some(CrashCause::PipeTop(7))
        );

        let low = Bird {
            y: 365.0,
            ..Default::default()
        };
        assert_eq!(
            pipe_collision(&low.bounds(), &p, 530.0),
            Some(CrashCause::PipeBottom(7))
        );
    }

    #[test]
    fn test_boundaries() {
        let ground = Bird {
            y: 530.0 - 12.0,
            ..Default::default()
        };
        assert_eq!(boundary_collision(&ground, 530.0), Some(CrashCause::Ground));

        let ceiling = Bird {
            y: 12.0,
            ..Default::default()
        };
        assert_eq!(
            boundary_collision(&ceiling, 530.0),
            Some(CrashCause::Ceiling)
        );

        let middle = Bird::default();
        assert_eq!(boundary_collision(&middle, 530.0), None);
    }

    #[test]
    fn test_first_collision_order() {
        // Both pipes overlap the bird; the older one wins
        let bird = Bird {
            y: 100.0,
            ..Default::default()
        };
        let pipes = [pipe(1, 70.0, 200.0), pipe(2, 75.0, 250.0)];
        assert_eq!(
            first_collision(&bird, &pipes, 530.0),
            Some(CrashCause::PipeTop(1))
        );
    }

    #[test]
    fn test_pipe_checked_before_ground() {
        let bird = Bird {
            y: 525.0,
            ..Default::default()
        };
        let pipes = [pipe(4, 70.0, 100.0)];
        assert_eq!(
            first_collision(&bird, &pipes, 530.0),
            Some(CrashCause::PipeBottom(4))
        );
    }
}
