//! # rig-deform
//!
//! Skeletal deformation and self-collision filtering for skinned characters.
//!
//! ## Features
//! - Joint hierarchy with index-based parents in topological order
//! - Forward kinematics from 6D or Euler local rotations, batched over frames
//! - Linear blend skinning with a bind-pose alignment fix
//! - Collision candidate filtering by component, weight correlation and surface masks
//! - OFF / skel / anim text export
//!
//! ## Example
//! ```rust,ignore
//! use rig_deform::{JointHierarchy, PoseBatch, SkinnedRig, SkinningWeights};
//! use glam::{Mat4, Vec3};
//!
//! // Build a two-joint arm
//! let hierarchy = JointHierarchy::builder()
//!     .root("Shoulder", Vec3::ZERO)
//!     .joint("Elbow", "Shoulder", Vec3::X)
//!     .build()?;
//!
//! let weights = SkinningWeights::from_rows(
//!     vec!["Shoulder", "Elbow"],
//!     vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]],
//! )?;
//! let bind = vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
//! let binds = vec![Mat4::IDENTITY, Mat4::from_translation(Vec3::X)];
//! let rig = SkinnedRig::new(hierarchy, weights, bind, binds)?;
//!
//! // Bend the elbow a quarter turn
//! let pose = PoseBatch::from_euler(vec![vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 1.57)]])?;
//! let frames = rig.animate(&pose)?;
//! println!("tip: {:?}", frames[0][2]);
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod export;
pub mod kinematics;
pub mod math;
pub mod mesh;
pub mod rig;
pub mod skinning;

pub use collision::{
    BoxField, CollisionMaskFilter, CollisionPair, CollisionPairBuffer, FilterReport, MaskKind,
    SignedDistance, SphereField, VertexMask,
};
pub use config::{Config, ConfigError, FilterConfig, PipelineConfig};
pub use error::{Result, RigError};
pub use kinematics::{ForwardKinematics, GlobalTransforms, PoseBatch, RotationEncoding};
pub use mesh::Mesh;
pub use rig::{HierarchyBuilder, Joint, JointHierarchy, JointSelection};
pub use skinning::{BindAlignment, SkinnedRig, SkinningWeights};
