//! Applying reconciliation decisions
//!
//! Runs the provider calls a decision needs, strictly in order, and
//! commits state through the context after each successful mutation.
//! A failed call aborts the run before its state is saved.

use crate::api::SubnetApi;
use crate::context::Context;
use crate::error::Result;
use crate::reconciler::{decide, plan_removal};
use crate::types::{Deployed, DesiredSpec, ReconcileDecision, SubnetState};
use tracing::{debug, info, warn};

/// Converge the subnet to `inputs`, returning its identifier
pub async fn deploy<A>(api: &A, inputs: &DesiredSpec, ctx: &Context<'_>) -> Result<Deployed>
where
    A: SubnetApi + ?Sized,
{
    let prior = ctx.state();
    let decision = decide(inputs, prior);
    info!(
        vpc_id = %inputs.vpc_id,
        availability_zone = %inputs.availability_zone,
        %decision,
        "Reconciling subnet"
    );

    match (decision, prior.subnet_id.as_deref()) {
        (ReconcileDecision::NoOp, Some(existing)) => {
            ctx.log(&format!("Subnet {} is up to date", existing));
            return Ok(Deployed {
                subnet_id: existing.to_string(),
            });
        }
        (ReconcileDecision::Replace, Some(existing)) => {
            ctx.log(&format!(
                "Subnet {} changed placement, replacing it",
                existing
            ));
            api.delete_subnet(existing).await?;
            ctx.save(&prior.without_subnet())?;
            debug!("Deleted subnet {} ahead of recreation", existing);
        }
        _ => {}
    }

    create(api, inputs, ctx).await
}

async fn create<A>(api: &A, inputs: &DesiredSpec, ctx: &Context<'_>) -> Result<Deployed>
where
    A: SubnetApi + ?Sized,
{
    ctx.log(&format!(
        "Creating subnet in {} ({})",
        inputs.vpc_id, inputs.availability_zone
    ));

    let created = api
        .create_subnet(&inputs.vpc_id, &inputs.availability_zone)
        .await?;
    ctx.save(&SubnetState::created(&created.subnet_id, inputs))?;

    info!("Created subnet {}", created.subnet_id);
    Ok(Deployed {
        subnet_id: created.subnet_id,
    })
}

/// Delete the subnet recorded in the context's state, if any
pub async fn remove<A>(api: &A, inputs: &DesiredSpec, ctx: &Context<'_>) -> Result<()>
where
    A: SubnetApi + ?Sized,
{
    let prior = ctx.state();
    let decision = plan_removal(prior);
    info!(vpc_id = %inputs.vpc_id, %decision, "Removing subnet");

    let Some(subnet_id) = prior.subnet_id.as_deref() else {
        debug!("No subnet recorded, nothing to remove");
        return Ok(());
    };

    ctx.log(&format!("Removing subnet {}", subnet_id));
    match api.delete_subnet(subnet_id).await {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {
            warn!("Subnet {} was already gone", subnet_id);
            ctx.log(&format!("Subnet {} not found, treating as removed", subnet_id));
        }
        Err(e) => return Err(e.into()),
    }

    ctx.save(&SubnetState::default())?;
    info!("Removed subnet {}", subnet_id);
    Ok(())
}
