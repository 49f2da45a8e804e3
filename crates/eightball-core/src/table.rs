//! Static table geometry: playing-surface bounds, pocket centers, spots.

use glam::Vec2;

/// Immutable description of the pool table. The surface is an axis-aligned
/// rectangle centered on the origin; pockets sit at the four corners and
/// the midpoints of the two long rails.
#[derive(Debug, Clone)]
pub struct Table {
    /// Half extent along X (the long axis).
    pub half_width: f32,
    /// Half extent along Y (the short axis).
    pub half_length: f32,
    /// Shared radius of every ball.
    pub ball_radius: f32,
    /// Distance from a pocket center within which a ball is captured.
    pub capture_radius: f32,
    pockets: [Vec2; 6],
    cue_spot: Vec2,
    rack_apex: Vec2,
}

impl Table {
    /// The standard table used for every match: 2.54 x 1.27 surface,
    /// 0.028 ball radius, 0.1 capture radius.
    pub fn standard() -> Self {
        Self::new(1.27, 0.635, 0.028, 0.1)
    }

    pub fn new(half_width: f32, half_length: f32, ball_radius: f32, capture_radius: f32) -> Self {
        debug_assert!(half_width > 0.0 && half_length > 0.0);
        debug_assert!(ball_radius > 0.0);
        debug_assert!(capture_radius > ball_radius);

        let pockets = [
            Vec2::new(-half_width, -half_length),
            Vec2::new(0.0, -half_length),
            Vec2::new(half_width, -half_length),
            Vec2::new(-half_width, half_length),
            Vec2::new(0.0, half_length),
            Vec2::new(half_width, half_length),
        ];

        Self {
            half_width,
            half_length,
            ball_radius,
            capture_radius,
            pockets,
            // Cue ball starts on the head string, rack on the foot spot.
            cue_spot: Vec2::new(0.0, -half_length * 0.7874),
            rack_apex: Vec2::new(0.0, half_length * 0.315),
        }
    }

    pub fn pockets(&self) -> &[Vec2; 6] {
        &self.pockets
    }

    pub fn cue_spot(&self) -> Vec2 {
        self.cue_spot
    }

    pub fn rack_apex(&self) -> Vec2 {
        self.rack_apex
    }

    /// Whether a ball center is inside the playing surface, accounting for
    /// the ball radius.
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x.abs() + self.ball_radius <= self.half_width
            && pos.y.abs() + self.ball_radius <= self.half_length
    }

    /// Index and distance of the pocket nearest to a point.
    pub fn nearest_pocket(&self, pos: Vec2) -> (usize, f32) {
        let mut best = (0, f32::INFINITY);
        for (i, pocket) in self.pockets.iter().enumerate() {
            let dist = pos.distance(*pocket);
            if dist < best.1 {
                best = (i, dist);
            }
        }
        best
    }

    /// The pocket capturing a ball at `pos`, if any.
    pub fn capturing_pocket(&self, pos: Vec2) -> Option<usize> {
        let (idx, dist) = self.nearest_pocket(pos);
        (dist < self.capture_radius).then_some(idx)
    }
}
