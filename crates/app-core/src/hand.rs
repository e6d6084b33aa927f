//! Per-frame hand landmarks as delivered by the pose estimator.
//!
//! A frame is 21 normalized `(x, y)` points in `[0, 1]`, indexed the way
//! hand-landmark models number them. Only four of them are consumed here.

use crate::constants::{HAND_SIZE_MIN, LANDMARK_COUNT};
use crate::error::LandmarkError;
use glam::Vec2;

/// The landmarks the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Wrist = 0,
    ThumbTip = 4,
    IndexTip = 8,
    MiddleMcp = 9,
}

impl Landmark {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbTip => "thumb-tip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
        }
    }
}

/// One validated landmark set. Discarded after the frame is processed.
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    points: [Vec2; LANDMARK_COUNT],
}

impl HandFrame {
    /// Validate a raw landmark slice: exactly 21 points, all finite.
    pub fn from_points(raw: &[[f32; 2]]) -> Result<Self, LandmarkError> {
        if raw.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                actual: raw.len(),
            });
        }
        let mut points = [Vec2::ZERO; LANDMARK_COUNT];
        for (i, p) in raw.iter().enumerate() {
            if !p[0].is_finite() || !p[1].is_finite() {
                return Err(LandmarkError::NonFinite { index: i });
            }
            points[i] = Vec2::from(*p);
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn point(&self, lm: Landmark) -> Vec2 {
        self.points[lm.index()]
    }

    /// Wrist to middle-finger base distance, floored away from zero.
    pub fn hand_size(&self) -> f32 {
        self.point(Landmark::Wrist)
            .distance(self.point(Landmark::MiddleMcp))
            .max(HAND_SIZE_MIN)
    }

    /// Index-to-thumb distance normalized by [`HandFrame::hand_size`].
    pub fn pinch_ratio(&self) -> f32 {
        let dist = self
            .point(Landmark::IndexTip)
            .distance(self.point(Landmark::ThumbTip));
        dist / self.hand_size()
    }
}
