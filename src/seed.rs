use tracing::{info, warn};

use crate::models::shoutout::NewShoutout;
use crate::models::user::CreateUserRequest;
use crate::models::UserRole;
use crate::{AppState, Result};

const DEMO_USERS: [(&str, &str, &str, UserRole); 4] = [
    ("Alice Smith", "alice@company.com", "Engineering", UserRole::Admin),
    ("Bob Johnson", "bob@company.com", "Sales", UserRole::Employee),
    ("Charlie Davis", "charlie@company.com", "Product", UserRole::Employee),
    ("Diana Prince", "diana@company.com", "Engineering", UserRole::Employee),
];

/// Populates an empty store with demo users and a first shoutout so the board
/// has something to show. Does nothing when seeding is disabled or users exist.
pub async fn seed_demo_data(app_state: &AppState) -> Result<()> {
    if !app_state.config.seed_demo_data {
        info!("🌱 SEED: Demo data disabled");
        return Ok(());
    }

    let existing = app_state.db.user_repo.count_users().await?;
    if existing > 0 {
        info!("🌱 SEED: Store already holds {} users, skipping demo data", existing);
        return Ok(());
    }

    let mut created = Vec::with_capacity(DEMO_USERS.len());
    for (name, email, department, role) in DEMO_USERS {
        let request = CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: app_state.config.seed_password.clone(),
            department: department.to_string(),
        };
        match app_state
            .user_service
            .create_user(request, role, &app_state.auth_service)
            .await
        {
            Ok(user) => created.push(user),
            Err(e) => warn!("⚠️ SEED: Failed to create demo user {}: {}", email, e),
        }
    }

    if let [alice, bob, ..] = created.as_slice() {
        let shoutout = app_state
            .db
            .shoutout_repo
            .create_shoutout(&NewShoutout {
                sender_id: alice.id,
                message: format!("Huge thanks to @{} for helping with the server migration! 🚀", bob.name),
                image_url: None,
                recipient_ids: vec![bob.id],
            })
            .await?;
        info!("🌱 SEED: Created welcome shoutout {}", shoutout.id);
    }

    info!("✅ SEED: {}/{} demo users created", created.len(), DEMO_USERS.len());
    Ok(())
}
