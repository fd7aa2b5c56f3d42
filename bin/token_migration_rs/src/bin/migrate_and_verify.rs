use std::time::Instant;

use token_migration_rs::{
    constants::Env,
    core::{MigrationService, VerificationService},
    utils::{connect_contract_rpc, elapsed_minutes, load_addresses, log_elapsed},
};
use token_migration_utils::log::setup_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_logger(None)?;

    let env = Env::new()?;
    let addresses = load_addresses(&env)?;
    let contract_rpc = connect_contract_rpc(&env).await?;
    log::info!("Config params: {:#?}", env.migration);

    let start_time = Instant::now();
    let migration_result = MigrationService::new(env.migration.clone(), contract_rpc.clone())
        .migrate(&addresses)
        .await;
    if let Err(err) = migration_result {
        return log_elapsed(start_time, Err(err.into()));
    }
    log::info!(
        "Migration done in {:.2} minutes",
        elapsed_minutes(start_time)
    );

    let verification_result = VerificationService::new(env.migration.clone(), contract_rpc)
        .verify(&addresses)
        .await;

    log_elapsed(start_time, verification_result)?;
    Ok(())
}
