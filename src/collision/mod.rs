mod filter;
mod mask;
mod pairs;
mod sdf;

pub use filter::{CollisionMaskFilter, FilterReport};
pub use mask::{MaskKind, VertexMask, EXCLUDED, UNASSIGNED};
pub use pairs::{CollisionPair, CollisionPairBuffer};
pub use sdf::{BoxField, SignedDistance, SphereField};
