pub mod comment;
pub mod de;
pub mod derived;
pub mod metrics;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use derived::{EnrichedPost, TrendingPost, UserWithStats, DEFAULT_CATEGORY};
pub use metrics::{Growth, Percent};
pub use post::Post;
pub use user::{Author, User, ANONYMOUS_NAME, ANONYMOUS_USERNAME};
