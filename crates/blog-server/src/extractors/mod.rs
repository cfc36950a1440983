//! Request extractors

pub mod notices;
pub mod post_id;

pub use notices::Notices;
pub use post_id::PostId;
