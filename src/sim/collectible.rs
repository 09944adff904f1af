//! Dots, energisers and bonus fruit

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Dot,
    Energiser,
    /// Bonus fruit; `image` is the 1-based fruit selector for the level
    Fruit { image: u8 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub kind: CollectibleKind,
    pub score: u64,
    /// Remaining display ticks (fruit only)
    pub display_ticks: Option<u32>,
}

impl Collectible {
    pub fn dot(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            kind: CollectibleKind::Dot,
            score: DOT_SCORE,
            display_ticks: None,
        }
    }

    pub fn energiser(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            kind: CollectibleKind::Energiser,
            score: ENERGISER_SCORE,
            display_ticks: None,
        }
    }

    /// Bonus fruit for a 1-based level; later levels share the last fruit
    pub fn fruit(id: u32, pos: Vec2, level: u32) -> Self {
        let image = level.clamp(1, FRUIT_SCORES.len() as u32) as u8;
        Self {
            id,
            pos,
            kind: CollectibleKind::Fruit { image },
            score: FRUIT_SCORES[image as usize - 1],
            display_ticks: Some(FRUIT_DISPLAY_TICKS),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::cell(self.pos)
    }

    /// Count down the display timer; returns `true` once the fruit has expired
    pub fn tick_display(&mut self) -> bool {
        match self.display_ticks.as_mut() {
            Some(ticks) => {
                *ticks = ticks.saturating_sub(1);
                *ticks == 0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fruit_selector_by_level() {
        let fruit = Collectible::fruit(1, Vec2::ZERO, 1);
        assert_eq!(fruit.kind, CollectibleKind::Fruit { image: 1 });
        assert_eq!(fruit.score, 100);
        let fruit = Collectible::fruit(1, Vec2::ZERO, 5);
        assert_eq!(fruit.score, 1000);
        let fruit = Collectible::fruit(1, Vec2::ZERO, 12);
        assert_eq!(fruit.kind, CollectibleKind::Fruit { image: 7 });
        assert_eq!(fruit.score, 3000);
    }

    #[test]
    fn test_fruit_expires_dots_do_not() {
        let mut fruit = Collectible::fruit(1, Vec2::ZERO, 1);
        for _ in 0..FRUIT_DISPLAY_TICKS - 1 {
            assert!(!fruit.tick_display());
        }
        assert!(fruit.tick_display());

        let mut dot = Collectible::dot(2, Vec2::ZERO);
        assert!(!dot.tick_display());
        assert_eq!(dot.score, DOT_SCORE);
    }
}
