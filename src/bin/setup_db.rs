//! One-shot database setup: apply migrations, seed the fixture agents, exit.

use anyhow::{Context, Result};
use clap::Parser;
use microsite::{
    config::ConfigLoader,
    db,
    migration::{Migrator, MigratorTrait},
    seeds::{SeedPolicy, seed_agents},
    telemetry,
};

#[derive(Debug, Parser)]
#[command(about = "Apply migrations and seed the agents table")]
struct Args {
    /// Seed policy; defaults to a full reseed.
    #[arg(long, default_value_t = SeedPolicy::Always)]
    reseed: SeedPolicy,

    /// Only apply migrations.
    #[arg(long)]
    skip_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loader = ConfigLoader::new();
    let config = loader.load().context("loading configuration")?;
    telemetry::init_tracing(&config).context("initializing tracing")?;

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    Migrator::up(&db, None)
        .await
        .context("applying database migrations")?;
    log::info!("Migrations applied");

    if args.skip_seed {
        return Ok(());
    }

    let inserted = seed_agents(&db, args.reseed)
        .await
        .context("seeding agents")?;
    println!("Seeded {} agents (policy {})", inserted, args.reseed);

    Ok(())
}
