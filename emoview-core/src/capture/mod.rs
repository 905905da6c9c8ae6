//! The per-clip capture loop and the host seam it drives.

/// Host services consumed by a capture.
pub mod host;
/// User-facing run log.
pub mod log;
/// PNG output.
pub mod output;
/// Scope guards for host-owned resources.
pub mod scoped;
/// Capture session orchestration.
pub mod session;
/// Capture settings.
pub mod settings;
/// Per-clip protocol steps.
pub mod step;
