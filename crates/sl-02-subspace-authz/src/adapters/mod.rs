//! Gas meter adapters.

mod gas_meter;

pub use gas_meter::{BasicGasMeter, InfiniteGasMeter};
