use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use schoolhouse::cli::{create_admin, seeder};

#[derive(Parser)]
#[command(name = "schoolhouse-cli")]
#[command(about = "Schoolhouse CLI - Administrative tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake classes, teachers and students
    Seed {
        /// Number of classes to create
        #[arg(short = 'c', long, default_value = "6")]
        classes: usize,

        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "6")]
        teachers: usize,

        /// Number of students per class
        #[arg(short = 's', long, default_value = "25")]
        students: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin { email, password } => {
            let email = email.unwrap_or_else(|| {
                Input::new()
                    .with_prompt("Email")
                    .interact_text()
                    .expect("Failed to read email")
            });
            let password = password.unwrap_or_else(|| {
                Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .expect("Failed to read password")
            });

            match create_admin(&pool, &email, &password).await {
                Ok(id) => {
                    println!("✅ Admin created successfully!");
                    println!("   Email: {}", email);
                    println!("   ID: {}", id);
                }
                Err(e) => {
                    eprintln!("❌ Error creating admin: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Seed {
            classes,
            teachers,
            students,
        } => {
            let config = seeder::SeedConfig {
                classes,
                teachers,
                students_per_class: students,
            };

            if let Err(e) = seeder::seed(&pool, config).await {
                eprintln!("❌ Seeding failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
