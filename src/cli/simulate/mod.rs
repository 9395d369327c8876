//! Simulate command - evaluates one chain against an empty message

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::domain::{AuthStatus, ChainRegistry, MessageInfo, ServerAuthContext, Subject};

use super::ConfigArgs;

/// Arguments for the simulate command
#[derive(Args, Clone, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Message layer; omit for any layer
    #[arg(long)]
    pub layer: Option<String>,

    /// Application context; omit for any application
    #[arg(long)]
    pub app_context: Option<String>,
}

pub async fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let config = args.config.load()?;
    let (registry, _) = crate::create_registry(&config).await?;

    let chain = registry
        .lookup(args.layer.as_deref(), args.app_context.as_deref())
        .await?
        .with_context(|| {
            format!(
                "No policy applies to {}/{}",
                args.layer.as_deref().unwrap_or("*"),
                args.app_context.as_deref().unwrap_or("*")
            )
        })?;

    let mut context = ServerAuthContext::new(chain);
    let mut message = MessageInfo::new();
    let mut client_subject = Subject::new();
    let service_subject = Subject::new();

    let status = context
        .validate_request(&mut message, &mut client_subject, &service_subject)
        .await?;

    info!(
        status = %status,
        modules_invoked = context.modules_invoked(),
        "Simulation finished"
    );
    println!("validate_request: {}", status);
    println!("modules invoked:  {}", context.modules_invoked());

    if status == AuthStatus::Success {
        let response = context.secure_response(&mut message, &service_subject).await?;
        println!("secure_response:  {}", response);

        context.clean_subject(&mut message, &mut client_subject).await?;
    }

    Ok(())
}
