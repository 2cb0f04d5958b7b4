//! claimdrop command line.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use claimdrop_crypto::{encode_address, generate_keypair, parse_address};
use claimdrop_deploy::{Deployment, DeploymentConfig, Provisioner, StepOutcome};
use claimdrop_merkle::{load_distribution, DistributionTree};
use claimdrop_signer::{AuthorizationService, SignerConfig};
use claimdrop_types::{Address, ClaimAuthorization, ClaimRequest, Timestamp};
use claimdrop_utils::{format_duration, init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "claimdrop", about = "Merkle-root token distribution tooling")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "CLAIMDROP_LOG_LEVEL")]
    log_level: String,

    /// Log output format: "human" or "json".
    #[arg(long, default_value = "human", env = "CLAIMDROP_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build and query the distribution tree.
    Tree {
        #[command(subcommand)]
        action: TreeAction,
    },

    /// Generate a fresh signer key.
    Keygen,

    /// Sign a claim request with the authorization service key.
    Authorize {
        /// Signer TOML configuration.
        #[arg(long, env = "CLAIMDROP_SIGNER_CONFIG")]
        config: PathBuf,

        /// JSON claim request.
        #[arg(long)]
        request: PathBuf,

        /// Hex HMAC tag of the request body. Required when a request key
        /// is configured.
        #[arg(long)]
        tag: Option<String>,

        /// Hex signing seed; overrides the config file.
        #[arg(long, env = "CLAIMDROP_SIGNING_SEED", hide_env_values = true)]
        signing_seed: Option<String>,

        /// Hex request HMAC key; overrides the config file.
        #[arg(long, env = "CLAIMDROP_REQUEST_MAC_KEY", hide_env_values = true)]
        request_mac_key: Option<String>,
    },

    /// Validate and provision a deployment.
    Deploy {
        #[command(subcommand)]
        action: DeployAction,
    },

    /// Submit a signed authorization against a deployment state file.
    Claim {
        #[arg(long, env = "CLAIMDROP_STATE")]
        state: PathBuf,

        /// Authorization bundle produced by `authorize`.
        #[arg(long)]
        authorization: PathBuf,

        /// Submitting account, hex or `cdrp_` text. Must be the claimant.
        #[arg(long)]
        caller: String,
    },

    /// Return unclaimed tokens to the treasury after the deadline.
    Sweep {
        #[arg(long, env = "CLAIMDROP_STATE")]
        state: PathBuf,

        /// Unix time to sweep at; defaults to now.
        #[arg(long)]
        now: Option<u64>,
    },

    /// Show balances and claim progress of a deployment state file.
    Status {
        #[arg(long, env = "CLAIMDROP_STATE")]
        state: PathBuf,
    },
}

#[derive(clap::Subcommand)]
enum TreeAction {
    /// Print the Merkle root of a distribution file.
    Build {
        #[arg(long)]
        input: PathBuf,

        /// Write every entry's proof record here as JSON.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the leaf and proof of one user.
    Prove {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        user_id: u64,
    },
}

#[derive(clap::Subcommand)]
enum DeployAction {
    /// Validate a deployment config without changing anything.
    Check {
        #[arg(long, env = "CLAIMDROP_DEPLOY_CONFIG")]
        config: PathBuf,

        /// Unix time to validate against; defaults to now.
        #[arg(long)]
        now: Option<u64>,
    },

    /// Run provisioning steps, resuming from the state file if it exists.
    Run {
        #[arg(long, env = "CLAIMDROP_DEPLOY_CONFIG")]
        config: PathBuf,

        #[arg(long, env = "CLAIMDROP_STATE")]
        state: PathBuf,

        #[arg(long)]
        now: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, &cli.log_level);

    match cli.command {
        Command::Tree { action } => match action {
            TreeAction::Build { input, output } => tree_build(&input, output.as_deref()),
            TreeAction::Prove { input, user_id } => tree_prove(&input, user_id),
        },
        Command::Keygen => keygen(),
        Command::Authorize {
            config,
            request,
            tag,
            signing_seed,
            request_mac_key,
        } => {
            let mut config = SignerConfig::from_toml_file(&config)?;
            if signing_seed.is_some() {
                config.signing_seed = signing_seed;
            }
            if request_mac_key.is_some() {
                config.request_mac_key = request_mac_key;
            }
            authorize(&config, &request, tag.as_deref())
        }
        Command::Deploy { action } => match action {
            DeployAction::Check { config, now } => deploy_check(&config, now),
            DeployAction::Run { config, state, now } => deploy_run(&config, &state, now),
        },
        Command::Claim {
            state,
            authorization,
            caller,
        } => claim(&state, &authorization, &caller),
        Command::Sweep { state, now } => sweep(&state, now),
        Command::Status { state } => status(&state),
    }
}

fn timestamp(now: Option<u64>) -> Timestamp {
    now.map_or_else(Timestamp::now, Timestamp::new)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_tree(input: &Path) -> anyhow::Result<DistributionTree> {
    let entries = load_distribution(input)
        .with_context(|| format!("reading distribution {}", input.display()))?;
    Ok(DistributionTree::build(entries)?)
}

fn tree_build(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let tree = build_tree(input)?;
    tracing::info!(entries = tree.len(), root = %tree.root(), "tree built");
    if let Some(path) = output {
        let records = tree.proof_records();
        std::fs::write(path, serde_json::to_vec_pretty(&records)?)
            .with_context(|| format!("writing proofs to {}", path.display()))?;
        tracing::info!(path = %path.display(), "proof records written");
    }
    println!("{}", tree.root());
    Ok(())
}

fn tree_prove(input: &Path, user_id: u64) -> anyhow::Result<()> {
    let tree = build_tree(input)?;
    let entry = tree
        .entry(user_id)
        .cloned()
        .with_context(|| format!("user id {user_id} is not in the distribution"))?;
    let record = claimdrop_merkle::ProofRecord {
        leaf: tree.leaf(user_id)?,
        proof: tree.proof(user_id)?,
        entry,
    };
    print_json(&record)
}

fn keygen() -> anyhow::Result<()> {
    let keypair = generate_keypair()?;
    let address = Address::from_public_key(&keypair.public);
    println!("public_key   = {}", keypair.public);
    println!("address      = {}", encode_address(&address));
    println!("signing_seed = {}", hex::encode(keypair.private.0));
    Ok(())
}

fn authorize(config: &SignerConfig, request: &Path, tag: Option<&str>) -> anyhow::Result<()> {
    let service = AuthorizationService::from_config(config)?;
    let body = std::fs::read(request)
        .with_context(|| format!("reading request {}", request.display()))?;

    let authorization = match tag {
        Some(tag) => service.authorize_signed_request(&body, tag)?,
        None => {
            let request: ClaimRequest = serde_json::from_slice(&body)?;
            service.authorize(&request)?
        }
    };
    print_json(&authorization)
}

fn deploy_check(config: &Path, now: Option<u64>) -> anyhow::Result<()> {
    let now = timestamp(now);
    let plan = DeploymentConfig::from_toml_file(config)?.validate(now)?;
    let window = now.elapsed_since(plan.distributor().claim_deadline);
    println!("deployment config is valid");
    println!("  token supply      {}", plan.total_supply());
    println!("  distributor       {}", encode_address(&plan.distributor().account));
    println!("  merkle root       {}", plan.distributor().merkle_root);
    println!("  pool allocation   {}", plan.distributor_allocation());
    println!("  custody allocation {}", plan.custody_allocation());
    println!("  timelock delay    {}", format_duration(plan.timelock_delay()));
    println!("  claim window      {}", format_duration(window));
    Ok(())
}

fn load_deployment(path: &Path) -> anyhow::Result<Deployment> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading state {}", path.display()))?;
    Ok(Deployment::load_state(&bytes)?)
}

fn save_deployment(path: &Path, deployment: &Deployment) -> anyhow::Result<()> {
    std::fs::write(path, deployment.save_state()?)
        .with_context(|| format!("writing state {}", path.display()))
}

fn deploy_run(config: &Path, state: &Path, now: Option<u64>) -> anyhow::Result<()> {
    let plan = DeploymentConfig::from_toml_file(config)?.validate(timestamp(now))?;
    let provisioner = Provisioner::new(plan);

    let mut deployment = if state.exists() {
        tracing::info!(path = %state.display(), "resuming from existing state");
        load_deployment(state)?
    } else {
        Deployment::default()
    };

    // Save whatever was applied even if a later step failed.
    let result = provisioner.run(&mut deployment);
    save_deployment(state, &deployment)?;
    let report = result?;

    for (step, outcome) in &report.steps {
        let label = match outcome {
            StepOutcome::Applied => "applied",
            StepOutcome::AlreadyDone => "already done",
        };
        println!("{step:<24} {label}");
    }
    Ok(())
}

fn claim(state: &Path, authorization: &Path, caller: &str) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(authorization)
        .with_context(|| format!("reading authorization {}", authorization.display()))?;
    let auth: ClaimAuthorization = serde_json::from_str(&text)?;
    let caller =
        parse_address(caller).with_context(|| format!("bad caller address '{caller}'"))?;

    let mut deployment = load_deployment(state)?;
    let (Some(distributor), Some(token)) =
        (deployment.distributor.as_mut(), deployment.token.as_mut())
    else {
        bail!("deployment is not provisioned; run `deploy run` first");
    };
    distributor.claim(&caller, &auth, token)?;
    for event in distributor.drain_events() {
        print_json(&event)?;
    }
    save_deployment(state, &deployment)
}

fn sweep(state: &Path, now: Option<u64>) -> anyhow::Result<()> {
    let mut deployment = load_deployment(state)?;
    let (Some(distributor), Some(token)) =
        (deployment.distributor.as_mut(), deployment.token.as_mut())
    else {
        bail!("deployment is not provisioned; run `deploy run` first");
    };
    let amount = distributor.sweep(timestamp(now), token)?;
    println!("swept {amount} to {}", encode_address(&distributor.config().treasury));
    save_deployment(state, &deployment)
}

fn status(state: &Path) -> anyhow::Result<()> {
    let deployment = load_deployment(state)?;
    let Some(token) = deployment.token.as_ref() else {
        println!("token not created");
        return Ok(());
    };
    println!("token supply   {}", token.total_supply());
    println!("delegated      {}", token.delegated_supply());
    match deployment.distributor.as_ref() {
        Some(dist) => {
            println!("pool balance   {}", token.balance_of(&dist.account()));
            println!("claims         {}", dist.claimed_count());
            println!("total claimed  {}", dist.total_claimed());
            println!("deadline       {}", dist.config().claim_deadline);
        }
        None => println!("distributor not created"),
    }
    Ok(())
}
