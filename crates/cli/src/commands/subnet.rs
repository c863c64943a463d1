//! Subnet Commands

use anyhow::{bail, Context as _, Result};
use clap::Subcommand;
use serde::Serialize;
use tracing::debug;

use vpcsync_core::{
    decide, deploy, plan_removal, remove, Context, DesiredSpec, ReconcileDecision,
    SqliteStateStore, StateStore, SubnetState, TracingLog,
};
use vpcsync_provider::SubnetClient;

use crate::config::Config;
use crate::output::{print_info, print_item, print_success, OutputFormat, TableDisplay};

#[derive(Subcommand)]
pub enum SubnetCommands {
    /// Create or replace the subnet so it matches the given placement
    Deploy {
        /// Resource name the state is stored under
        #[arg(short, long, default_value = "default")]
        name: String,

        /// VPC the subnet belongs to
        #[arg(long)]
        vpc_id: String,

        /// Availability zone of the subnet
        #[arg(long)]
        availability_zone: String,
    },

    /// Delete the subnet recorded in state
    Remove {
        /// Resource name the state is stored under
        #[arg(short, long, default_value = "default")]
        name: String,
    },

    /// Show what deploy or remove would do, without calling the provider
    Plan {
        /// Resource name the state is stored under
        #[arg(short, long, default_value = "default")]
        name: String,

        /// VPC the subnet should belong to
        #[arg(long, required_unless_present = "destroy")]
        vpc_id: Option<String>,

        /// Availability zone the subnet should be in
        #[arg(long, required_unless_present = "destroy")]
        availability_zone: Option<String>,

        /// Plan a removal instead of a deploy
        #[arg(long, conflicts_with_all = ["vpc_id", "availability_zone"])]
        destroy: bool,
    },

    /// Show the stored state
    Show {
        /// Resource name the state is stored under
        #[arg(short, long, default_value = "default")]
        name: String,
    },
}

/// Deploy result display wrapper
#[derive(Serialize)]
pub struct DeployedDisplay {
    pub name: String,
    pub subnet_id: String,
}

impl TableDisplay for DeployedDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "SUBNET ID"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.name.clone(), self.subnet_id.clone()]
    }
}

/// Plan display wrapper
#[derive(Serialize)]
pub struct PlanDisplay {
    pub name: String,
    pub decision: ReconcileDecision,
    pub subnet_id: Option<String>,
}

impl TableDisplay for PlanDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "ACTION", "CURRENT SUBNET"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.decision.to_string(),
            self.subnet_id.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

/// Stored state display wrapper
#[derive(Serialize)]
pub struct StateDisplay {
    pub name: String,
    #[serde(flatten)]
    pub state: SubnetState,
}

impl TableDisplay for StateDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "SUBNET ID", "VPC", "AVAILABILITY ZONE"]
    }

    fn row(&self) -> Vec<String> {
        let cell = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        vec![
            self.name.clone(),
            cell(&self.state.subnet_id),
            cell(&self.state.vpc_id),
            cell(&self.state.availability_zone),
        ]
    }
}

pub async fn execute(cmd: SubnetCommands, config: &Config, format: OutputFormat) -> Result<()> {
    match cmd {
        SubnetCommands::Deploy {
            name,
            vpc_id,
            availability_zone,
        } => {
            let desired = desired_spec(&vpc_id, &availability_zone)?;
            let store = open_store(config, &name)?;
            let client = SubnetClient::new(config.client_config())?;

            let ctx = Context::load(&store, &TracingLog)?;
            let deployed = deploy(&client, &desired, &ctx).await?;

            print_item(
                &DeployedDisplay {
                    name,
                    subnet_id: deployed.subnet_id,
                },
                format,
            );
        }

        SubnetCommands::Remove { name } => {
            let store = open_store(config, &name)?;
            let client = SubnetClient::new(config.client_config())?;

            let ctx = Context::load(&store, &TracingLog)?;
            if ctx.state().subnet_id.is_none() {
                print_info(&format!("No subnet recorded for '{}'", name));
                return Ok(());
            }

            let inputs = ctx.state().applied_spec().unwrap_or_default();
            remove(&client, &inputs, &ctx).await?;
            print_success(&format!("Subnet for '{}' removed", name));
        }

        SubnetCommands::Plan {
            name,
            vpc_id,
            availability_zone,
            destroy,
        } => {
            let store = open_store(config, &name)?;
            let prior = store.load()?;

            let decision = if destroy {
                plan_removal(&prior)
            } else {
                let desired = desired_spec(
                    vpc_id.as_deref().unwrap_or_default(),
                    availability_zone.as_deref().unwrap_or_default(),
                )?;
                decide(&desired, &prior)
            };
            debug!("Planned {} for {}", decision, name);

            print_item(
                &PlanDisplay {
                    name,
                    decision,
                    subnet_id: prior.subnet_id,
                },
                format,
            );
        }

        SubnetCommands::Show { name } => {
            let store = open_store(config, &name)?;
            let state = store.load()?;
            print_item(&StateDisplay { name, state }, format);
        }
    }

    Ok(())
}

/// Validate raw inputs into a desired spec
fn desired_spec(vpc_id: &str, availability_zone: &str) -> Result<DesiredSpec> {
    let vpc_id = vpc_id.trim();
    let availability_zone = availability_zone.trim();

    if vpc_id.is_empty() {
        bail!("vpc id must not be empty");
    }
    if availability_zone.is_empty() {
        bail!("availability zone must not be empty");
    }

    Ok(DesiredSpec::new(vpc_id, availability_zone))
}

fn open_store(config: &Config, name: &str) -> Result<SqliteStateStore> {
    if let Some(parent) = config.state_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create state directory {}", parent.display()))?;
    }
    let store = SqliteStateStore::open(&config.state_path, name)?;
    Ok(store)
}
