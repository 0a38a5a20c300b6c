//! Startup checks and first-run seeding.

use anyhow::bail;
use tracing::info;

use registry::service::RegistryService;

use crate::config::ServerConfig;

/// Verify configuration is valid before anything opens.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.jwt.secret.is_empty() {
        bail!("jwt.secret must not be empty");
    }
    if config.jwt.expire_secs <= 0 {
        bail!("jwt.expire_secs must be positive");
    }
    if config.storage.data_dir.is_empty() {
        bail!("storage.data_dir must not be empty");
    }
    Ok(())
}

/// Seed the initial admin account on a fresh store.
///
/// Every mutating route needs a token and tokens need an account, so an
/// empty users table would otherwise be unreachable. Seeding only runs
/// when bootstrap credentials are configured AND the table is empty —
/// an existing deployment is never touched.
pub fn ensure_admin_account(
    registry: &RegistryService,
    config: &ServerConfig,
) -> anyhow::Result<()> {
    let Some(bootstrap) = &config.bootstrap else {
        return Ok(());
    };

    if registry.count_users()? > 0 {
        return Ok(());
    }

    registry.seed_admin(&bootstrap.admin_username, &bootstrap.admin_password)?;
    info!("seeded bootstrap admin account '{}'", bootstrap.admin_username);
    Ok(())
}
