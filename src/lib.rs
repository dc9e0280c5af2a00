//! Purpose: Embeddable codec for the structured-text JSON wire format.
//! Exports: `core` (node model, discriminator registry, decode/encode, links, errors).
//! Role: Pure decode/encode library; no I/O, transport, or storage of its own.
//! Invariants: Decoding is pure; the only post-build mutation is write-once link patching.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod core;
