//! Ball identity, group classification, and the triangular rack layout.

use glam::Vec2;

/// Identifier for a ball on the table: 0 is the cue ball, 1-15 are the
/// numbered balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct BallId(pub u8);

impl BallId {
    pub const CUE: BallId = BallId(0);
    pub const EIGHT: BallId = BallId(8);

    /// All 16 ids in ascending order (cue first).
    pub fn all() -> impl Iterator<Item = BallId> {
        (0..16).map(BallId)
    }

    pub fn group(self) -> BallGroup {
        match self.0 {
            0 => BallGroup::Cue,
            1..=7 => BallGroup::Solid,
            8 => BallGroup::Eight,
            9..=15 => BallGroup::Stripe,
            n => unreachable!("invalid ball number {}", n),
        }
    }

    pub fn is_cue(self) -> bool {
        self.0 == 0
    }
}

/// Ball category. Players are assigned `Solid` or `Stripe` at the first
/// legal pocket of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum BallGroup {
    Cue,
    Solid,
    Eight,
    Stripe,
}

impl BallGroup {
    /// The opposing player group. Only meaningful for `Solid`/`Stripe`.
    pub fn opposite(self) -> BallGroup {
        match self {
            BallGroup::Solid => BallGroup::Stripe,
            BallGroup::Stripe => BallGroup::Solid,
            other => other,
        }
    }

    /// The numbered balls belonging to this group.
    pub fn members(self) -> Vec<BallId> {
        match self {
            BallGroup::Solid => (1..=7).map(BallId).collect(),
            BallGroup::Stripe => (9..=15).map(BallId).collect(),
            BallGroup::Eight => vec![BallId::EIGHT],
            BallGroup::Cue => vec![BallId::CUE],
        }
    }
}

/// Standard 8-ball triangle rack.
/// Returns positions for balls 1-15 (index = number - 1), apex row first,
/// rows spreading away from the cue ball. The 8-ball sits at the center of
/// the third row; stripes and solids alternate through the rest.
///
/// ```text
///       1        <- apex (row 0, nearest the cue ball)
///      9 2
///     3 8 10
///    11 4 5 12
///  6 13 14 7 15
/// ```
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> [Vec2; 15] {
    // Small slack so freshly racked balls do not start in contact.
    let gap = ball_radius * 2.0 + ball_radius * 0.08;
    let row_offset = gap * 0.866; // sqrt(3)/2, equilateral rows

    // (ball number, row, lateral offset from the rack centerline)
    let layout: [(u8, usize, f32); 15] = [
        (1, 0, 0.0),
        (9, 1, -0.5),
        (2, 1, 0.5),
        (3, 2, -1.0),
        (8, 2, 0.0),
        (10, 2, 1.0),
        (11, 3, -1.5),
        (4, 3, -0.5),
        (5, 3, 0.5),
        (12, 3, 1.5),
        (6, 4, -2.0),
        (13, 4, -1.0),
        (14, 4, 0.0),
        (7, 4, 1.0),
        (15, 4, 2.0),
    ];

    let mut positions = [Vec2::ZERO; 15];
    for (number, row, lateral) in layout {
        let x = apex.x + lateral * gap;
        let y = apex.y + row as f32 * row_offset;
        positions[(number - 1) as usize] = Vec2::new(x, y);
    }
    positions
}
