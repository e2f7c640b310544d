use clap::{Args, Subcommand};

mod migrate;
mod seed;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending migrations
    Migrate(migrate::MigrateArgs),

    /// Load the sample catalog into an empty database
    Seed(seed::SeedArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args).await,
        DbSubcommand::Seed(args) => seed::run(args).await,
    }
}
