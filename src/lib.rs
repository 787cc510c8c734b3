//! Fixed-point inference engine for a 1-D keyword-spotting CNN.
//!
//! All arithmetic is integer-only: i16 storage scaled by 2^FRAC_BITS, i32
//! accumulation inside layer reductions, saturation instead of wrap on
//! overflow. Activations flow through two fixed scratch regions, so peak RAM
//! is bounded by the two largest co-existing tensors rather than the sum of
//! all layer outputs.
pub mod arena;
pub mod error;
pub mod graph;
pub mod gsc;
pub mod ops;
pub mod quant;

// Re-exports kept minimal
pub use arena::Arena;
pub use error::ModelError;
pub use gsc::GscModel;
