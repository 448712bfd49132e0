use bytemuck::{Pod, Zeroable};

use crate::error::{Result, RigError};

/// Candidate contact between two faces, as reported by a collision detector.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct CollisionPair {
    pub receiver: i32,
    pub intruder: i32,
}

impl CollisionPair {
    pub const SENTINEL: Self = Self {
        receiver: -1,
        intruder: -1,
    };

    pub const fn new(receiver: i32, intruder: i32) -> Self {
        Self { receiver, intruder }
    }

    pub fn is_active(&self) -> bool {
        self.receiver >= 0 && self.intruder >= 0
    }

    pub fn discard(&mut self) {
        *self = Self::SENTINEL;
    }
}

/// `frames x pairs` candidate pairs, frame-major. Filters only ever replace
/// entries with [`CollisionPair::SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionPairBuffer {
    frames: usize,
    pairs_per_frame: usize,
    pairs: Vec<CollisionPair>,
}

impl CollisionPairBuffer {
    pub fn new(frames: usize, pairs_per_frame: usize, pairs: Vec<CollisionPair>) -> Result<Self> {
        if pairs.len() != frames * pairs_per_frame {
            return Err(RigError::ShapeMismatch {
                expected: frames * pairs_per_frame,
                found: pairs.len(),
            });
        }
        Ok(Self {
            frames,
            pairs_per_frame,
            pairs,
        })
    }

    /// Every slot set to the sentinel.
    pub fn empty(frames: usize, pairs_per_frame: usize) -> Self {
        Self {
            frames,
            pairs_per_frame,
            pairs: vec![CollisionPair::SENTINEL; frames * pairs_per_frame],
        }
    }

    /// Wraps a detector's flat `[receiver, intruder, receiver, intruder, ..]`
    /// buffer.
    pub fn from_flat(frames: usize, pairs_per_frame: usize, flat: &[i32]) -> Result<Self> {
        if flat.len() != frames * pairs_per_frame * 2 {
            return Err(RigError::ShapeMismatch {
                expected: frames * pairs_per_frame * 2,
                found: flat.len(),
            });
        }
        let pairs = bytemuck::cast_slice::<i32, CollisionPair>(flat).to_vec();
        Self::new(frames, pairs_per_frame, pairs)
    }

    pub fn as_flat(&self) -> &[i32] {
        bytemuck::cast_slice(&self.pairs)
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn pairs_per_frame(&self) -> usize {
        self.pairs_per_frame
    }

    pub fn pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }

    pub(crate) fn pairs_mut(&mut self) -> &mut [CollisionPair] {
        &mut self.pairs
    }

    /// # Panics
    ///
    /// If `frame >= self.frame_count()`.
    pub fn frame(&self, frame: usize) -> &[CollisionPair] {
        let start = frame * self.pairs_per_frame;
        &self.pairs[start..start + self.pairs_per_frame]
    }

    pub fn set(&mut self, frame: usize, slot: usize, pair: CollisionPair) -> Result<()> {
        if frame >= self.frames {
            return Err(RigError::FrameOutOfRange {
                frame,
                frame_count: self.frames,
            });
        }
        if slot >= self.pairs_per_frame {
            return Err(RigError::SlotOutOfRange {
                slot,
                pairs_per_frame: self.pairs_per_frame,
            });
        }
        self.pairs[frame * self.pairs_per_frame + slot] = pair;
        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_active()).count()
    }

    pub fn active(&self) -> impl Iterator<Item = (usize, usize, CollisionPair)> + '_ {
        let per_frame = self.pairs_per_frame.max(1);
        self.pairs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(move |(i, p)| (i / per_frame, i % per_frame, *p))
    }
}
