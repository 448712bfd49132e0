//! Plain-text writers for deformed geometry, skeletons and animation.
//!
//! All writers take any [`std::io::Write`] and leave buffering to the caller.

mod anim;
mod off;
mod skel;

pub use anim::write_anim;
pub use off::write_off;
pub use skel::write_skel;
