//! Adapters implementing the driven ports.

pub mod memory;
