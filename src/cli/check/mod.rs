//! Check command - validates every configured policy

use tracing::info;

use super::ConfigArgs;

/// Load all policies into a fresh registry, failing on the first invalid one
pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config = args.load()?;
    let (_, ids) = crate::create_registry(&config).await?;

    info!(policies = ids.len(), "Configuration check passed");
    println!("{} policies OK", ids.len());

    Ok(())
}
