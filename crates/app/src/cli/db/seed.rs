use clap::Args;
use dazzle::pricing::ShippingPolicy;
use dazzle_app::{context::AppContext, seed};
use tracing::info;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let ctx = AppContext::from_database_url(&args.database_url, ShippingPolicy::default())
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let summary = seed::seed_catalog(&ctx)
        .await
        .map_err(|error| format!("failed to seed catalog: {error}"))?;

    info!(
        categories = summary.categories,
        products = summary.products,
        reviews = summary.reviews,
        "seeded catalog"
    );

    Ok(())
}
