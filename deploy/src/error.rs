use claimdrop_distributor::DistributorError;
use claimdrop_token::TokenError;
use thiserror::Error;

use crate::provision::ProvisionStep;

/// One broken rule in a deployment config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("{field}: '{value}' is not a valid address")]
    BadAddress { field: &'static str, value: String },

    #[error("{field} must not be the zero address")]
    ZeroAddress { field: &'static str },

    #[error("{field}: '{value}' is not a valid amount")]
    BadAmount { field: &'static str, value: String },

    #[error("merkle_root: {0}")]
    BadRoot(String),

    #[error("merkle_root must not be zero")]
    ZeroRoot,

    #[error("signer: {0}")]
    BadSigner(String),

    #[error("timelock delay {delay}s outside [{min}s, {max}s]")]
    TimelockDelayOutOfRange { delay: u64, min: u64, max: u64 },

    #[error("vesting begin {begin} must be after deployment time {now}")]
    VestingBeginNotInFuture { begin: u64, now: u64 },

    #[error("vesting cliff {cliff} is before begin {begin}")]
    VestingCliffBeforeBegin { begin: u64, cliff: u64 },

    #[error("vesting end {end} is not after cliff {cliff}")]
    VestingEndNotAfterCliff { cliff: u64, end: u64 },

    #[error("claim deadline {deadline} must be after deployment time {now}")]
    ClaimDeadlineNotInFuture { deadline: u64, now: u64 },

    #[error("allocations total {allocated} but supply is {supply}")]
    AllocationExceedsSupply { allocated: u128, supply: u128 },

    #[error("{0} and {1} must be different accounts")]
    AccountCollision(&'static str, &'static str),
}

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid deployment config: {}", format_violations(.0))]
    Invalid(Vec<ConfigViolation>),

    #[error("step {step} cannot run: {reason}")]
    MissingPrerequisite {
        step: ProvisionStep,
        reason: &'static str,
    },

    #[error("step {step} failed: {source}")]
    Token {
        step: ProvisionStep,
        #[source]
        source: TokenError,
    },

    #[error("step {step} failed: {source}")]
    Distributor {
        step: ProvisionStep,
        #[source]
        source: DistributorError,
    },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
