//! Address chains and the trust-boundary walk over them.

mod builder;
mod walker;

pub use builder::{AddressChain, build_chain};
pub use walker::{enumerate, resolve};
