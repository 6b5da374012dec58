//! NewsAI Command Line Client
//!
//! Entry point and wiring. Uses `anyhow` for top-level errors; the client
//! crates report typed errors that are rendered here.

mod commands;

use std::sync::Arc;

use anyhow::Context;
use auth::{AuthConfig, FileCredentialStore, RequestPipeline};
use clap::{Parser, Subcommand};
use platform::config::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "newsai", about = "NewsAI client: account, feed, analysis and payments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long, env = "NEWSAI_EMAIL")]
        email: String,
        #[arg(long, env = "NEWSAI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "NEWSAI_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in profile
    Me,
    /// Show today's AI usage
    Usage,
    /// Delete the account and forget the session
    DeleteAccount {
        #[arg(long)]
        yes: bool,
    },
    /// List feed articles
    Feed {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        sentiment: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Run the streaming multi-agent analysis for an article
    Analyze {
        /// Article id to fetch from the backend
        #[arg(long, conflicts_with = "file")]
        id: Option<String>,
        /// Article JSON file
        #[arg(long)]
        file: Option<std::path::PathBuf>,
    },
    /// Ask a question, optionally about one article
    Ask {
        question: String,
        #[arg(long)]
        article: Option<String>,
    },
    /// Summarize the current feed
    Summary,
    /// Show or update feed preferences
    Prefs {
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        keywords: Option<Vec<String>>,
        #[arg(long)]
        style: Option<String>,
    },
    /// List subscription plans
    Plans,
    /// Buy a plan
    Subscribe { plan: String },
    /// Show payment history
    History,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsai=info,auth=info,payment=info,analysis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let client_config = Arc::new(ClientConfig::from_env().context("Invalid client configuration")?);
    let auth_config = Arc::new(AuthConfig::from_env());
    let store = Arc::new(FileCredentialStore::new(auth_config.credential_path.clone()));
    let pipeline = RequestPipeline::new(store, client_config.clone(), auth_config)
        .context("Failed to build HTTP client")?;

    tracing::debug!(base_url = %client_config.base_url, "Client configured");

    let app = commands::App::new(pipeline);
    match cli.command {
        Command::Login { email, password } => app.login(email, password).await,
        Command::Register {
            email,
            password,
            name,
        } => app.register(email, password, name).await,
        Command::Logout => app.logout().await,
        Command::Me => app.me().await,
        Command::Usage => app.usage().await,
        Command::DeleteAccount { yes } => app.delete_account(yes).await,
        Command::Feed {
            category,
            sentiment,
            search,
        } => app.feed(category, sentiment, search).await,
        Command::Analyze { id, file } => app.analyze(id, file).await,
        Command::Ask { question, article } => app.ask(question, article).await,
        Command::Summary => app.summary().await,
        Command::Prefs {
            categories,
            keywords,
            style,
        } => app.prefs(categories, keywords, style).await,
        Command::Plans => {
            commands::plans();
            Ok(())
        }
        Command::Subscribe { plan } => app.subscribe(&plan).await,
        Command::History => app.history().await,
    }
}
