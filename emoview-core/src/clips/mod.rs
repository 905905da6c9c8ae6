//! Clip discovery and clip-file metadata.

/// `.anim` header parsing.
pub mod anim;
/// Folder scanning and the name-ordered clip set.
pub mod library;
