use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::db::repository::{ShoutoutRepository, UserRepository};
use crate::models::admin::{DepartmentCount, NameCount};
use crate::models::{AdminStats, LeaderboardEntry, Shoutout, User, UserResponse};
use crate::{AppError, Result};

pub const POINTS_PER_SENT: u64 = 10;
pub const POINTS_PER_RECEIVED: u64 = 15;
const TOP_LIST_LEN: usize = 5;

/// Engagement figures derived from the stored shoutouts
pub struct StatsService {
    user_repo: Arc<dyn UserRepository>,
    shoutout_repo: Arc<dyn ShoutoutRepository>,
}

impl StatsService {
    pub fn new(user_repo: Arc<dyn UserRepository>, shoutout_repo: Arc<dyn ShoutoutRepository>) -> Self {
        Self {
            user_repo,
            shoutout_repo,
        }
    }

    async fn load(&self) -> Result<(Vec<User>, Vec<Shoutout>)> {
        let users = self.user_repo.list_users().await?;
        let shoutouts = self.shoutout_repo.list_shoutouts().await?;
        Ok((users, shoutouts))
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let (users, shoutouts) = self.load().await?;
        Ok(compute_leaderboard(&users, &shoutouts))
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        let (users, shoutouts) = self.load().await?;
        Ok(compute_admin_stats(&users, &shoutouts))
    }

    /// `Name,Department,Posts Sent,Points`, one row per user ordered by id.
    pub async fn export_csv(&self) -> Result<String> {
        let (users, shoutouts) = self.load().await?;
        let tallies = tally(&shoutouts);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["Name", "Department", "Posts Sent", "Points"])
            .map_err(|e| AppError::InternalError(format!("Failed to write CSV header: {}", e)))?;

        for user in &users {
            let (sent, received) = tallies.get(&user.id).copied().unwrap_or_default();
            writer
                .write_record([
                    user.name.clone(),
                    user.department.clone(),
                    sent.to_string(),
                    points(sent, received).to_string(),
                ])
                .map_err(|e| AppError::InternalError(format!("Failed to write CSV record: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::InternalError(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::InternalError(format!("CSV output is not UTF-8: {}", e)))
    }
}

fn points(sent: u64, received: u64) -> u64 {
    sent * POINTS_PER_SENT + received * POINTS_PER_RECEIVED
}

/// user id -> (shoutouts sent, shoutouts received)
fn tally(shoutouts: &[Shoutout]) -> HashMap<i64, (u64, u64)> {
    let mut tallies: HashMap<i64, (u64, u64)> = HashMap::new();
    for shoutout in shoutouts {
        tallies.entry(shoutout.sender_id).or_default().0 += 1;
        for recipient in &shoutout.recipient_ids {
            tallies.entry(*recipient).or_default().1 += 1;
        }
    }
    tallies
}

pub fn compute_leaderboard(users: &[User], shoutouts: &[Shoutout]) -> Vec<LeaderboardEntry> {
    let tallies = tally(shoutouts);
    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .map(|user| {
            let (sent, received) = tallies.get(&user.id).copied().unwrap_or_default();
            LeaderboardEntry {
                user: UserResponse::from(user),
                sent,
                received,
                points: points(sent, received),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.points.cmp(&a.points).then(a.user.id.cmp(&b.user.id)));
    entries
}

pub fn compute_admin_stats(users: &[User], shoutouts: &[Shoutout]) -> AdminStats {
    let tallies = tally(shoutouts);

    let top = |pick: fn(&(u64, u64)) -> u64| {
        let mut counts: Vec<NameCount> = users
            .iter()
            .map(|user| NameCount {
                name: user.name.clone(),
                count: tallies.get(&user.id).map(pick).unwrap_or(0),
            })
            .collect();
        // Stable sort keeps id order among equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(TOP_LIST_LEN);
        counts
    };

    let departments_by_user: HashMap<i64, &str> =
        users.iter().map(|u| (u.id, u.department.as_str())).collect();
    let mut engagement: BTreeMap<&str, u64> =
        users.iter().map(|u| (u.department.as_str(), 0)).collect();
    for shoutout in shoutouts {
        if let Some(department) = departments_by_user.get(&shoutout.sender_id) {
            *engagement.entry(*department).or_default() += 1;
        }
    }

    AdminStats {
        total_shoutouts: shoutouts.len() as u64,
        total_active_users: users.len() as u64,
        top_contributors: top(|t| t.0),
        most_tagged_users: top(|t| t.1),
        department_engagement: engagement
            .into_iter()
            .map(|(department, count)| DepartmentCount {
                department: department.to_string(),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::Utc;

    fn user(id: i64, name: &str, department: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@company.com", name.to_lowercase()),
            department: department.to_string(),
            role: UserRole::Employee,
            password_hash: String::new(),
            joined_at: Utc::now(),
        }
    }

    fn shoutout(id: i64, sender_id: i64, recipient_ids: Vec<i64>) -> Shoutout {
        Shoutout {
            id,
            sender_id,
            message: "thanks".to_string(),
            image_url: None,
            created_at: Utc::now(),
            recipient_ids,
        }
    }

    fn fixture() -> (Vec<User>, Vec<Shoutout>) {
        let users = vec![
            user(1, "Alice", "Engineering"),
            user(2, "Bob", "Sales"),
            user(3, "Charlie", "Product"),
            user(4, "Diana", "Engineering"),
        ];
        let shoutouts = vec![
            shoutout(1, 1, vec![2]),
            shoutout(2, 1, vec![2, 3]),
            shoutout(3, 4, vec![1]),
        ];
        (users, shoutouts)
    }

    #[test]
    fn leaderboard_weights_received_higher_than_sent() {
        let (users, shoutouts) = fixture();
        let board = compute_leaderboard(&users, &shoutouts);

        let summary: Vec<(i64, u64)> = board.iter().map(|e| (e.user.id, e.points)).collect();
        // Alice: 2 sent, 1 received = 35; Bob: 2 received = 30;
        // Charlie: 1 received = 15; Diana: 1 sent = 10
        assert_eq!(summary, vec![(1, 35), (2, 30), (3, 15), (4, 10)]);
    }

    #[test]
    fn leaderboard_breaks_ties_by_id() {
        let users = vec![user(2, "Bob", "Sales"), user(1, "Alice", "Sales")];
        let board = compute_leaderboard(&users, &[]);
        assert_eq!(board[0].user.id, 1);
        assert_eq!(board[1].user.id, 2);
    }

    #[test]
    fn admin_stats_counts_contributors_tags_and_departments() {
        let (users, shoutouts) = fixture();
        let stats = compute_admin_stats(&users, &shoutouts);

        assert_eq!(stats.total_shoutouts, 3);
        assert_eq!(stats.total_active_users, 4);
        assert_eq!(stats.top_contributors[0], NameCount { name: "Alice".into(), count: 2 });
        assert_eq!(stats.most_tagged_users[0], NameCount { name: "Bob".into(), count: 2 });
        assert_eq!(
            stats.department_engagement,
            vec![
                DepartmentCount { department: "Engineering".into(), count: 3 },
                DepartmentCount { department: "Product".into(), count: 0 },
                DepartmentCount { department: "Sales".into(), count: 0 },
            ]
        );
    }

    #[test]
    fn top_lists_are_capped_at_five() {
        let users: Vec<User> = (1..=8).map(|id| user(id, &format!("U{}", id), "Ops")).collect();
        let stats = compute_admin_stats(&users, &[]);
        assert_eq!(stats.top_contributors.len(), 5);
        assert_eq!(stats.most_tagged_users.len(), 5);
    }
}
