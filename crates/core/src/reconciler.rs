//! Reconciliation decisions
//!
//! Compares desired configuration with last-applied state. A subnet's VPC
//! and availability zone cannot be changed in place, so any difference in
//! either means destroy and recreate.

use crate::types::{DesiredSpec, ReconcileDecision, SubnetState};

/// Decide what `deploy` has to do to converge `prior` to `desired`
pub fn decide(desired: &DesiredSpec, prior: &SubnetState) -> ReconcileDecision {
    if prior.subnet_id.is_none() {
        return ReconcileDecision::Create;
    }

    let same_vpc = prior.vpc_id.as_deref() == Some(desired.vpc_id.as_str());
    let same_zone = prior.availability_zone.as_deref() == Some(desired.availability_zone.as_str());

    if same_vpc && same_zone {
        ReconcileDecision::NoOp
    } else {
        ReconcileDecision::Replace
    }
}

/// Decide what `remove` has to do with `prior`
pub fn plan_removal(prior: &SubnetState) -> ReconcileDecision {
    match prior.subnet_id {
        Some(_) => ReconcileDecision::Delete,
        None => ReconcileDecision::NoOp,
    }
}
