//! Database seeder for Fundtrack development and testing.
//!
//! Seeds one demo account per role plus a small project/expenditure fixture
//! so every dashboard has something to show. Safe to run twice: existing
//! rows are left alone.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use fundtrack_core::auth::hash_password;
use fundtrack_db::repositories::{CreateExpenditureInput, CreateProjectInput};
use fundtrack_db::{ExpenditureRepository, ProjectRepository, UserRepository};
use fundtrack_db::connect;
use fundtrack_shared::{Amount, ProjectStatus, Role};

const DEMO_PASSWORD: &str = "fundtrack-demo";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = connect(&database_url, 5)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo accounts...");
    seed_users(&db).await;

    println!("Seeding sample projects and expenditures...");
    seed_projects(&db).await;

    println!("Seeding complete!");
}

async fn seed_users(db: &DatabaseConnection) {
    let repo = UserRepository::new(db.clone());

    for (username, role) in [
        ("demo-agency", Role::Agency),
        ("demo-donor", Role::Donor),
        ("demo-government", Role::Government),
    ] {
        let exists = repo
            .username_exists(username)
            .await
            .expect("Failed to check username");
        if exists {
            println!("  {username} already present, skipping");
            continue;
        }

        let hash = hash_password(DEMO_PASSWORD).expect("Failed to hash demo password");
        repo.create(username, &hash, role)
            .await
            .expect("Failed to create demo user");
        println!("  {username} ({role}) created, password '{DEMO_PASSWORD}'");
    }
}

async fn seed_projects(db: &DatabaseConnection) {
    let projects = ProjectRepository::new(db.clone());
    let expenditures = ExpenditureRepository::new(db.clone());

    let existing = projects.list().await.expect("Failed to list projects");
    if !existing.is_empty() {
        println!("  projects already present, skipping");
        return;
    }

    let wells = projects
        .create(CreateProjectInput {
            name: "Borehole Rehabilitation".to_string(),
            description: Some("Rehabilitate 12 boreholes in the northern district".to_string()),
            status: ProjectStatus::InProgress,
        })
        .await
        .expect("Failed to create project");

    projects
        .create(CreateProjectInput {
            name: "Market Access Road".to_string(),
            description: None,
            status: ProjectStatus::Planning,
        })
        .await
        .expect("Failed to create project");

    for (category, amount, date) in [
        ("Labor", "1250.00", "2026-06-15"),
        ("Materials", "830.50", "2026-06-20"),
        ("Transport", "140.25", "2026-07-01"),
    ] {
        expenditures
            .create(CreateExpenditureInput {
                project_id: wells.id,
                category: category.to_string(),
                amount: Amount::parse(amount).expect("Seed amount should parse"),
                description: None,
                date: date
                    .parse::<NaiveDate>()
                    .expect("Seed date should parse"),
            })
            .await
            .expect("Failed to create expenditure");
    }
    println!("  2 projects, 3 expenditures created");
}
