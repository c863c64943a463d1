//! Core types for vpcsync

use serde::{Deserialize, Serialize};

/// Desired configuration of a subnet, supplied by the caller on every run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredSpec {
    /// Parent network the subnet lives in
    pub vpc_id: String,
    /// Placement zone of the subnet
    pub availability_zone: String,
}

impl DesiredSpec {
    pub fn new(vpc_id: impl Into<String>, availability_zone: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            availability_zone: availability_zone.into(),
        }
    }
}

/// Last-applied state of a subnet.
///
/// When `subnet_id` is set, `vpc_id` and `availability_zone` hold the
/// configuration the live subnet was created with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
}

impl SubnetState {
    /// State of a subnet freshly created from `spec`
    pub fn created(subnet_id: impl Into<String>, spec: &DesiredSpec) -> Self {
        Self {
            subnet_id: Some(subnet_id.into()),
            vpc_id: Some(spec.vpc_id.clone()),
            availability_zone: Some(spec.availability_zone.clone()),
        }
    }

    /// Same record with the subnet identifier cleared
    pub fn without_subnet(&self) -> Self {
        Self {
            subnet_id: None,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subnet_id.is_none() && self.vpc_id.is_none() && self.availability_zone.is_none()
    }

    /// Configuration the subnet was last applied with, if complete
    pub fn applied_spec(&self) -> Option<DesiredSpec> {
        match (&self.vpc_id, &self.availability_zone) {
            (Some(vpc_id), Some(zone)) => Some(DesiredSpec::new(vpc_id, zone)),
            _ => None,
        }
    }
}

/// Action chosen for a single reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileDecision {
    NoOp,
    Create,
    Replace,
    Delete,
}

impl ReconcileDecision {
    /// Whether applying this decision touches the provider
    pub fn is_mutating(&self) -> bool {
        !matches!(self, ReconcileDecision::NoOp)
    }
}

impl std::fmt::Display for ReconcileDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileDecision::NoOp => write!(f, "no-op"),
            ReconcileDecision::Create => write!(f, "create"),
            ReconcileDecision::Replace => write!(f, "replace"),
            ReconcileDecision::Delete => write!(f, "delete"),
        }
    }
}

/// Output of a successful deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployed {
    pub subnet_id: String,
}
