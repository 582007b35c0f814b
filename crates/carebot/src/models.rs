//! These models represent the values passed between the agent runtime, the
//! backend and the renderers.
//!
//! Tool results arrive as loosely-shaped JSON. They are decoded into these
//! types only after `payload` has normalized them, so every field that can be
//! missing upstream is optional here.
pub mod records;
pub mod role;
pub mod tool;
