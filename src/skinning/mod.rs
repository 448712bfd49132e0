//! Linear blend skinning module

pub mod bind;
pub mod lbs;
pub mod weights;

pub use bind::BindAlignment;
pub use lbs::{linear_blend, SkinnedRig};
pub use weights::SkinningWeights;
