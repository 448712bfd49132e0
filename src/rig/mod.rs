//! Rig topology module
//!
//! Joints are stored in a flat array in topological order; parents are
//! referenced by index.

pub mod hierarchy;
pub mod joint;
pub mod selection;

pub use hierarchy::{HierarchyBuilder, JointHierarchy};
pub use joint::Joint;
pub use selection::JointSelection;
