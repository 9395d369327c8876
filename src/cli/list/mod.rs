//! List command - prints registered policies and module kinds

use crate::domain::ChainRegistry;
use crate::infrastructure::ModuleCatalog;

use super::ConfigArgs;

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config = args.load()?;
    let (registry, _) = crate::create_registry(&config).await?;

    println!("Policies:");
    for id in registry.registration_ids(None, None).await? {
        let Some(context) = registry.registration_context(&id).await? else {
            continue;
        };

        println!(
            "  {}  {}/{}  {} module(s)  {}",
            id,
            context.layer().unwrap_or("*"),
            context.app_context().unwrap_or("*"),
            context.entry_count(),
            context.description().unwrap_or("")
        );
    }

    println!("Module kinds:");
    for kind in ModuleCatalog::with_builtin_modules()?.kinds() {
        println!("  {}", kind);
    }

    Ok(())
}
