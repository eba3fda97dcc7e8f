use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

use roster::cli::seeder::seed_database;
use roster::cli::{add_role, create_user, list_roles, remove_role};
use roster_auth::Role;
use roster_config::DatabaseConfig;
use roster_db::init_db_pool;

#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "Roster CLI - Administrative tools for the Roster API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recreate roles, demo users and demo persons
    Seed {
        /// Number of generated persons to add after the demo persons
        #[arg(long, default_value = "0")]
        fake_persons: usize,
    },
    /// Create a user account
    CreateUser {
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Role to grant, repeatable (defaults to `user`)
        #[arg(short = 'r', long = "role")]
        roles: Vec<Role>,
    },
    /// Grant a role to an existing user
    AddRole {
        #[arg(short = 'u', long)]
        username: String,

        #[arg(short = 'r', long)]
        role: Role,
    },
    /// Revoke a role from an existing user
    RemoveRole {
        #[arg(short = 'u', long)]
        username: String,

        #[arg(short = 'r', long)]
        role: Role,
    },
    /// Show the roles of an existing user
    Roles {
        #[arg(short = 'u', long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Seed { fake_persons } => seed_database(&pool, fake_persons)
            .await
            .map(|summary| {
                println!(
                    "   Users: {}, persons: {}",
                    summary.users, summary.persons
                )
            }),
        Commands::CreateUser {
            username,
            password,
            roles,
        } => handle_create_user(&pool, username, password, roles).await,
        Commands::AddRole { username, role } => add_role(&pool, &username, role)
            .await
            .map(|user| println!("✅ {} now has roles {:?}", user.username, user.roles)),
        Commands::RemoveRole { username, role } => remove_role(&pool, &username, role)
            .await
            .map(|user| println!("✅ {} now has roles {:?}", user.username, user.roles)),
        Commands::Roles { username } => list_roles(&pool, &username)
            .await
            .map(|roles| println!("{}: {:?}", username, roles)),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    Ok(init_db_pool(&config).await?)
}

async fn handle_create_user(
    pool: &PgPool,
    username: Option<String>,
    password: Option<String>,
    roles: Vec<Role>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let user = create_user(pool, &username, &password, &roles).await?;

    println!("\n✅ User created successfully!");
    println!("   Username: {}", user.username);
    println!("   Roles: {:?}", user.roles);
    Ok(())
}
