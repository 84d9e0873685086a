//! Markdown rendering

pub mod summary;

pub use summary::render_summary;
