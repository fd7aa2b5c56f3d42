use std::time::Instant;

use token_migration_rs::{
    constants::Env,
    core::MigrationService,
    utils::{connect_contract_rpc, load_addresses, log_elapsed},
};
use token_migration_utils::log::setup_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_logger(None)?;

    let env = Env::new()?;
    let addresses = load_addresses(&env)?;
    let contract_rpc = connect_contract_rpc(&env).await?;

    let start_time = Instant::now();
    let migration_service = MigrationService::new(env.migration.clone(), contract_rpc);
    let result = migration_service.migrate(&addresses).await;

    log_elapsed(start_time, result)?;
    Ok(())
}
