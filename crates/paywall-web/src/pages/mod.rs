//! Page Components

mod post;

pub use post::PostPage;
