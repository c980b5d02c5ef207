use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use newsbot::notify::{self, LogBackend, Notifier};
use newsbot::{sources, translate, BotProfile, Config, HttpFeedFetcher, NewsBot};

#[derive(Debug, Parser)]
#[command(name = "newsbot", about = "Post a random sample of fresh feed items to Discord")]
struct Args {
    /// Which bot to run.
    #[arg(long, value_enum, env = "NEWSBOT_PROFILE", default_value_t = BotProfile::Agile)]
    profile: BotProfile,

    /// Log payloads instead of posting, and leave the cache untouched.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("newsbot=info".parse()?)
                .add_directive("discord_webhook=info".parse()?)
                .add_directive("translate_client=info".parse()?),
        )
        .init();

    let args = Args::parse();
    info!(profile = %args.profile, dry_run = args.dry_run, "News bot starting...");

    // Load config
    let config = Config::from_env(args.profile)?;
    config.log_keys();

    let sources = sources::resolve(&config);
    let fetcher = HttpFeedFetcher::new(config.http_timeout)?;
    let translator = translate::chain_from_config(&config.translate, config.http_timeout)?;

    let notifier: Box<dyn Notifier> = if args.dry_run {
        Box::new(LogBackend)
    } else {
        notify::from_config(&config)?
    };

    let mut bot = NewsBot::new(config, sources, Box::new(fetcher), notifier).with_translator(translator);
    if args.dry_run {
        bot = bot.without_cache_writes();
    }

    let stats = bot.run(&mut rand::rng()).await;

    info!("News bot run complete. {stats}");
    Ok(())
}
