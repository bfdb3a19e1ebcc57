pub mod user;
pub mod shoutout;
pub mod comment;
pub mod reaction;
pub mod report;
pub mod admin;
pub mod validation;

// Re-export models for convenience
pub use user::{User, UserRole, UserResponse};
pub use shoutout::{Shoutout, ShoutoutFilter, ShoutoutResponse};
pub use comment::{Comment, CommentResponse};
pub use reaction::{Reaction, ReactionType};
pub use report::{Report, ReportStatus, PendingReport};
pub use admin::{AdminAction, AdminLog, AdminStats, LeaderboardEntry, TargetType};
