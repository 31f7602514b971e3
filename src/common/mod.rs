//! Common, shared types.

pub mod session;
pub mod sets;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
