//! Collision tests between the avatar and falling entities
//!
//! Only two shapes exist: axis-aligned boxes and circles. Touching edges
//! never count as a hit.

use glam::Vec2;

use super::state::{Avatar, Obstacle, Orb};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on all four sides
    pub fn inset(self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap: shared edges are not an overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Obstacle box at full size against the avatar box shrunk by `margin`
pub fn avatar_hits_obstacle(avatar: &Avatar, obstacle: &Obstacle, margin: f32) -> bool {
    let hitbox = Rect::new(avatar.pos, avatar.size).inset(margin);
    hitbox.overlaps(&Rect::new(obstacle.pos, obstacle.size))
}

/// Orb is collected when its center lies strictly within
/// `orb.radius + avatar.width / 2` of the avatar's center
pub fn avatar_collects_orb(avatar: &Avatar, orb: &Orb) -> bool {
    avatar.center().distance(orb.pos) < orb.radius + avatar.size.x / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn avatar_at(x: f32, y: f32) -> Avatar {
        let mut avatar = Avatar::new(&Tuning::default());
        avatar.pos = Vec2::new(x, y);
        avatar
    }

    fn obstacle_at(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            speed: 3.0,
        }
    }

    #[test]
    fn test_full_overlap_hits() {
        let avatar = avatar_at(100.0, 100.0);
        let obstacle = obstacle_at(90.0, 90.0, 60.0, 60.0);
        assert!(avatar_hits_obstacle(&avatar, &obstacle, 4.0));
    }

    #[test]
    fn test_margin_forgives_grazes() {
        let avatar = avatar_at(100.0, 100.0);
        // Overlaps the raw avatar box by 3px on the left, inside the 4px margin
        let obstacle = obstacle_at(60.0, 100.0, 43.0, 20.0);
        assert!(!avatar_hits_obstacle(&avatar, &obstacle, 4.0));
        assert!(avatar_hits_obstacle(&avatar, &obstacle, 0.0));
    }

    #[test]
    fn test_touching_edges_do_not_hit() {
        let avatar = avatar_at(100.0, 100.0);
        // Right edge of obstacle exactly at left edge of shrunk hitbox
        let obstacle = obstacle_at(64.0, 100.0, 40.0, 20.0);
        assert!(!avatar_hits_obstacle(&avatar, &obstacle, 4.0));
        let obstacle = obstacle_at(64.1, 100.0, 40.0, 20.0);
        assert!(avatar_hits_obstacle(&avatar, &obstacle, 4.0));
    }

    #[test]
    fn test_orb_at_center_is_collected() {
        let avatar = avatar_at(100.0, 100.0);
        let orb = Orb {
            pos: avatar.center(),
            radius: 15.0,
            speed: 2.0,
            pulse_phase: 0.0,
        };
        assert!(avatar_collects_orb(&avatar, &orb));
    }

    #[test]
    fn test_orb_at_exact_reach_is_not_collected() {
        let avatar = avatar_at(100.0, 100.0);
        // 15 + 20 = 35 away: strict less-than fails
        let orb = Orb {
            pos: avatar.center() + Vec2::new(35.0, 0.0),
            radius: 15.0,
            speed: 2.0,
            pulse_phase: 0.0,
        };
        assert!(!avatar_collects_orb(&avatar, &orb));
    }
}
