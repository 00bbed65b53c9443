//! Cart state synchronization.
//!
//! The remote commerce backend owns the cart; this module keeps a local,
//! renderable copy in step with it. Mutations are applied optimistically so
//! the UI never waits on the network to show a plausible cart, then resolved
//! against the authoritative response.
//!
//! Remote failures never escape [`CartSynchronizer`]: every operation leaves
//! the caller with either updated state or the state it started with. The
//! single user-visible failure is checkout, which signals with `None`.

mod backend;
mod state;
mod sync;

pub use backend::CartBackend;
pub use state::{CartLineItem, CartSnapshot, CartState, RemoteResult, resolve};
pub use sync::CartSynchronizer;
