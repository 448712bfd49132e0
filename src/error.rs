use thiserror::Error;

#[derive(Error, Debug)]
pub enum RigError {
    #[error("invalid joint topology: {0}")]
    InvalidTopology(String),

    #[error("unknown joint `{0}`")]
    UnknownJoint(String),

    #[error("invalid rotation at frame {frame}, joint {joint}: {reason}")]
    InvalidRotationInput {
        frame: usize,
        joint: usize,
        reason: &'static str,
    },

    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("frame {frame} out of range, batch has {frame_count} frames")]
    FrameOutOfRange { frame: usize, frame_count: usize },

    #[error("pair slot {slot} out of range, frames hold {pairs_per_frame} pairs")]
    SlotOutOfRange { slot: usize, pairs_per_frame: usize },

    #[error("face {face} has {vertex_count} vertices, only triangles and quads are supported")]
    InvalidMeshFace { face: usize, vertex_count: usize },

    #[error("face {face} references index {index}, valid range is 0..{vertex_count}")]
    FaceIndexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },

    #[error("collision pair {slot} references face {face}, mesh has {face_count} faces")]
    PairIndexOutOfRange {
        slot: usize,
        face: i32,
        face_count: usize,
    },

    #[error("invalid skinning weights: {0}")]
    InvalidWeights(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RigError>;
