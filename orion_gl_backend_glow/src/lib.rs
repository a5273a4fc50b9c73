/*!
# Orion GL - glow backend

OpenGL implementation of the `orion_gl` graphics backend trait.

This crate translates every backend call into the matching OpenGL call
through the `glow` bindings. It performs no validation of its own; Orion
checks keys, versions and enum values before anything reaches it.
*/

mod glow_backend;

pub use glow_backend::GlowBackend;
