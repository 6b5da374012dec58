//! Command Handlers
//!
//! Each handler builds the use case it needs over the shared pipeline and
//! prints a plain-text result to stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use analysis::{
    AiService, AnalysisConfig, AnalysisEvent, AnalysisIngester, AnalysisProgress, AnalysisStatus,
    AnalysisStream, Article, AskRequest, FeedFilters, NewsService, PreferencesService,
};
use anyhow::{Context, bail};
use auth::application::{
    LoginInput, LoginUseCase, LogoutUseCase, ProfileService, RegisterInput, RegisterUseCase,
};
use auth::{FileCredentialStore, RequestPipeline};
use futures_util::StreamExt;
use kernel::id::ArticleId;
use payment::domain::value_object::plan;
use payment::{
    AuthProfileRefresher, HttpPaymentGateway, NoWallet, PaymentConfig, PaymentHistoryUseCase,
    SettlementOrchestrator, SettlementOutcome, SettlementState, SolanaRpcClient,
};

type Pipeline = RequestPipeline<FileCredentialStore>;

pub struct App {
    pipeline: Pipeline,
    analysis_config: Arc<AnalysisConfig>,
}

impl App {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            analysis_config: Arc::new(AnalysisConfig::default()),
        }
    }

    fn profile(&self) -> ProfileService<FileCredentialStore> {
        ProfileService::new(self.pipeline.clone())
    }

    // ------------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------------

    pub async fn login(&self, email: String, password: String) -> anyhow::Result<()> {
        let user = LoginUseCase::new(self.pipeline.clone())
            .execute(LoginInput { email, password })
            .await?;
        println!("Signed in as {}", user.display_name());
        Ok(())
    }

    pub async fn register(
        &self,
        email: String,
        password: String,
        full_name: Option<String>,
    ) -> anyhow::Result<()> {
        let user = RegisterUseCase::new(self.pipeline.clone())
            .execute(RegisterInput {
                email,
                password,
                full_name,
            })
            .await?;
        println!("Welcome, {}", user.display_name());
        Ok(())
    }

    pub async fn logout(&self) -> anyhow::Result<()> {
        LogoutUseCase::new(self.pipeline.store().clone())
            .execute()
            .await?;
        println!("Signed out");
        Ok(())
    }

    pub async fn me(&self) -> anyhow::Result<()> {
        let user = self.profile().me().await?;
        println!("{} <{}>", user.display_name(), user.email);
        if user.has_active_premium() {
            match user.premium_expiry {
                Some(expiry) => println!("Plan: Pro (until {})", expiry.format("%Y-%m-%d")),
                None => println!("Plan: Pro"),
            }
        } else {
            println!("Plan: Free");
        }
        println!("Refresh tokens: {}", user.refresh_tokens);
        Ok(())
    }

    pub async fn usage(&self) -> anyhow::Result<()> {
        let usage = self.profile().usage().await?;
        println!(
            "Today: {} / {} tokens ({:.0}%), {} remaining",
            usage.daily_tokens,
            usage.limit_daily,
            usage.daily_fraction() * 100.0,
            usage.daily_remaining()
        );
        println!("Requests: {}, total tokens: {}", usage.request_count, usage.total_tokens);
        Ok(())
    }

    pub async fn delete_account(&self, confirmed: bool) -> anyhow::Result<()> {
        if !confirmed {
            bail!("Refusing to delete the account without --yes");
        }
        self.profile().delete_account().await?;
        println!("Account deleted");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // News and AI
    // ------------------------------------------------------------------------

    pub async fn feed(
        &self,
        category: Option<String>,
        sentiment: Option<String>,
        search: Option<String>,
    ) -> anyhow::Result<()> {
        let filters = FeedFilters {
            category,
            sentiment,
            search,
        };
        let articles = NewsService::new(self.pipeline.clone(), self.analysis_config.clone())
            .feed(&filters)
            .await?;

        if articles.is_empty() {
            println!("No articles");
        }
        for article in &articles {
            let sentiment = article.sentiment.as_deref().unwrap_or("-");
            println!("{:<12} [{sentiment}] {}", article.id.as_str(), article.title);
        }
        Ok(())
    }

    pub async fn analyze(&self, id: Option<String>, file: Option<PathBuf>) -> anyhow::Result<()> {
        let article = match (id, file) {
            (Some(id), _) => {
                NewsService::new(self.pipeline.clone(), self.analysis_config.clone())
                    .get_article(&ArticleId::new(id))
                    .await?
            }
            (None, Some(path)) => read_article(&path)?,
            (None, None) => bail!("Pass --id or --file"),
        };

        let ingester = AnalysisIngester::new(self.pipeline.clone(), self.analysis_config.clone());
        let mut stream = ingester.process(&article).await?;
        let mut progress = AnalysisProgress::new(article);

        while let Some(event) = next_or_interrupt(&mut stream).await {
            progress.apply(event);
            match (&progress.stage, &progress.message) {
                (Some(stage), Some(message)) if !progress.is_finished() => {
                    println!("[{:>3.0}%] {stage}: {message}", progress.fraction * 100.0);
                }
                _ => {}
            }
        }

        match progress.status {
            AnalysisStatus::Completed => {
                for message in &progress.chat {
                    println!("\n{}", message.content);
                }
                Ok(())
            }
            AnalysisStatus::Failed => {
                bail!(progress.error.unwrap_or_else(|| "Analysis failed".to_string()))
            }
            AnalysisStatus::Running => {
                println!("Analysis cancelled");
                Ok(())
            }
        }
    }

    pub async fn ask(&self, question: String, article: Option<String>) -> anyhow::Result<()> {
        let mut request = AskRequest::new(question);
        if let Some(id) = article {
            request = request.about(ArticleId::new(id));
        }
        let answer = AiService::new(self.pipeline.clone(), self.analysis_config.clone())
            .ask(&request)
            .await?;
        println!("{answer}");
        Ok(())
    }

    pub async fn summary(&self) -> anyhow::Result<()> {
        let summary = AiService::new(self.pipeline.clone(), self.analysis_config.clone())
            .summarize_feed()
            .await?;
        println!("{summary}");
        Ok(())
    }

    pub async fn prefs(
        &self,
        categories: Option<Vec<String>>,
        keywords: Option<Vec<String>>,
        style: Option<String>,
    ) -> anyhow::Result<()> {
        let service = PreferencesService::new(self.pipeline.clone(), self.analysis_config.clone());
        let mut prefs = service.get().await?;

        let changed = categories.is_some() || keywords.is_some() || style.is_some();
        if changed {
            if let Some(categories) = categories {
                prefs.favorite_categories = categories;
            }
            if let Some(keywords) = keywords {
                prefs.favorite_keywords = keywords;
            }
            if style.is_some() {
                prefs.summary_style = style;
            }
            prefs = service.update(&prefs).await?;
        }

        println!("Categories: {}", prefs.favorite_categories.join(", "));
        println!("Keywords: {}", prefs.favorite_keywords.join(", "));
        println!(
            "Summary style: {}",
            prefs.summary_style.as_deref().unwrap_or("default")
        );
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------------

    pub async fn subscribe(&self, plan_id: &str) -> anyhow::Result<()> {
        let config = Arc::new(PaymentConfig::from_env());
        let orchestrator = SettlementOrchestrator::new(
            Arc::new(HttpPaymentGateway::new(self.pipeline.clone(), config.clone())),
            Arc::new(NoWallet),
            Arc::new(SolanaRpcClient::new(config.rpc_url.clone(), config.rpc_timeout)),
            Arc::new(AuthProfileRefresher::new(self.profile())),
            config,
        )
        .with_observer(|_from: SettlementState, to: SettlementState| {
            if let Some(line) = describe(to) {
                println!("{line}");
            }
        });

        match orchestrator.purchase(plan_id).await? {
            SettlementOutcome::Settled(settlement) => {
                println!(
                    "Payment confirmed: {} {}",
                    settlement.intent.amount, settlement.intent.currency
                );
                println!("Signature: {}", settlement.signature);
                if let Some(url) = settlement.explorer_url {
                    println!("Explorer: {url}");
                }
            }
            SettlementOutcome::Cancelled { payment_id } => {
                println!("Payment {payment_id} cancelled");
            }
        }
        Ok(())
    }

    pub async fn history(&self) -> anyhow::Result<()> {
        let config = Arc::new(PaymentConfig::from_env());
        let gateway = Arc::new(HttpPaymentGateway::new(self.pipeline.clone(), config.clone()));
        let entries = PaymentHistoryUseCase::new(gateway, config).execute().await?;

        if entries.is_empty() {
            println!("No payments yet");
        }
        for entry in &entries {
            let tx = &entry.transaction;
            let date = tx
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            let mode = if tx.is_test() { " (test)" } else { "" };
            println!(
                "{date}  {} {}  {:?}{mode}",
                tx.amount, tx.currency, tx.status
            );
            if let Some(url) = &entry.explorer_url {
                println!("    {url}");
            }
        }
        Ok(())
    }
}

pub fn plans() {
    for plan in plan::ALL {
        let price = if plan.is_free() {
            "free".to_string()
        } else {
            format!("{} SOL / month", plan.price_sol)
        };
        println!("{} ({}): {price}", plan.name, plan.id);
        for feature in plan.features {
            println!("  - {feature}");
        }
    }
}

fn describe(state: SettlementState) -> Option<&'static str> {
    match state {
        SettlementState::Simulating => Some("Simulating payment..."),
        SettlementState::AwaitingSignature => Some("Waiting for wallet signature..."),
        SettlementState::Confirming => Some("Waiting for confirmation..."),
        SettlementState::Verifying => Some("Verifying with the server..."),
        _ => None,
    }
}

fn read_article(path: &Path) -> anyhow::Result<Article> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid article JSON in {}", path.display()))
}

/// Next event, or `None` once Ctrl-C cancels the stream
async fn next_or_interrupt(stream: &mut AnalysisStream) -> Option<AnalysisEvent> {
    tokio::select! {
        event = stream.next() => event,
        _ = tokio::signal::ctrl_c() => {
            stream.cancel();
            tracing::info!("Analysis interrupted");
            None
        }
    }
}
