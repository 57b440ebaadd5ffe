use anyhow::Context;
use clap::Parser;
use placekit::config::policy::TransformPolicy;
use placekit::utils::{logger, validation::Validate};

#[derive(Parser)]
#[command(name = "policy-check")]
#[command(about = "Resolves the build transform policy for a target environment")]
struct Args {
    /// Path to the policy TOML file
    #[arg(short, long, default_value = "build-policy.toml")]
    config: String,

    /// Target build environment (matched exactly, case-sensitive)
    #[arg(short, long, default_value = "production")]
    environment: String,

    /// Use the built-in default policy instead of a file
    #[arg(long)]
    builtin: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let policy = if args.builtin {
        tracing::info!("Using built-in default policy");
        TransformPolicy::default()
    } else {
        tracing::info!("📁 Loading policy from: {}", args.config);
        TransformPolicy::from_file(&args.config)
            .with_context(|| format!("Failed to load policy file '{}'", args.config))?
    };

    policy
        .validate()
        .context("Policy validation failed")?;

    let plugins = policy.resolve(&args.environment);
    tracing::info!(
        "Resolved {} plugin(s) for environment '{}'",
        plugins.len(),
        args.environment
    );

    if args.verbose {
        let mut environments = policy.environments();
        environments.sort_unstable();
        tracing::debug!("Configured environments: {}", environments.join(", "));
    }

    // Unknown environments are not an error: the build tool falls through
    // to the base configuration.
    if plugins.is_empty() {
        println!(
            "No transforms configured for environment '{}'",
            args.environment
        );
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&plugins)?);

    Ok(())
}
