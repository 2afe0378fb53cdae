//! Session simulator for the entitlement engine.
//!
//! Plays the role of the external collaborators: supplies the persisted plan
//! record (from a JSON file, or Starter defaults) and usage counts, then
//! prints the gating decisions a UI would act on.

use anyhow::Context as _;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use aurelo_entitlements::{
    definition_of, resolver, EntitlementContext, FeatureKey, LimitKey, TrialStatus, WorkspaceId,
    WorkspacePlan,
};

#[derive(Parser)]
#[command(name = "aurelo-demo")]
#[command(about = "Simulate an Aurelo session against the plan entitlement engine")]
struct Cli {
    /// Path to a persisted workspace plan record (JSON). Starter defaults
    /// when omitted.
    #[arg(long)]
    plan_file: Option<PathBuf>,

    /// Current active-client count reported by the UI
    #[arg(long, default_value_t = 0)]
    clients: u32,

    /// Start the 7-day trial before printing decisions
    #[arg(long)]
    start_trial: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let record = match &cli.plan_file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read plan record {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse plan record {}", path.display()))?
        }
        None => WorkspacePlan::starter_defaults(Utc::now()),
    };

    let mut ctx = EntitlementContext::bound(WorkspaceId(Uuid::new_v4()), record);

    if cli.start_trial {
        ctx.start_trial()?;
    }

    let effective = ctx.effective_tier();
    let def = definition_of(effective);
    println!("plan: {} ({})", def.name, def.tagline);
    println!("literal tier: {}, effective tier: {}", ctx.plan_id(), effective);
    match ctx.trial_status() {
        TrialStatus::NeverStarted => println!("trial: available"),
        TrialStatus::Active => println!("trial: active, {} day(s) left", ctx.trial_days_remaining()),
        TrialStatus::Lapsed => println!("trial: already used"),
    }

    println!("\nfeatures:");
    for key in FeatureKey::ALL {
        let state = if ctx.can(key) {
            "enabled".to_string()
        } else {
            format!("requires {}", ctx.required_plan(key))
        };
        println!("  {:24} {}", key.as_str(), state);
    }

    println!("\nlimits:");
    for key in LimitKey::ALL {
        println!("  {:20} {}", key.as_str(), resolver::format_limit(ctx.limit(key)));
    }

    println!("\nactive clients: {}", cli.clients);
    println!("  at limit:     {}", ctx.at_limit(LimitKey::ActiveClients, cli.clients));
    println!("  would exceed: {}", ctx.would_exceed(LimitKey::ActiveClients, cli.clients));
    if ctx.would_exceed(LimitKey::ActiveClients, cli.clients) {
        match ctx.upgrade_plan(LimitKey::ActiveClients) {
            Some(tier) => println!("  upgrade to:   {}", tier),
            None => println!("  upgrade to:   (no higher ceiling offered)"),
        }
    }

    Ok(())
}
