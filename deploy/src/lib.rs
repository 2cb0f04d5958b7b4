//! Deployment of a claimdrop distribution.
//!
//! A [`DeploymentConfig`] is read from TOML and validated once into a
//! [`ValidatedDeployment`]; nothing is deployed from an unvalidated config.
//! The [`Provisioner`] then walks an ordered list of steps against a
//! [`Deployment`]. Each step first checks whether its effect is already
//! present, so an interrupted run is resumed by running again.

pub mod config;
pub mod error;
pub mod provision;
pub mod validate;

pub use config::DeploymentConfig;
pub use error::{ConfigViolation, DeployError};
pub use provision::{Deployment, ProvisionReport, ProvisionStep, Provisioner, StepOutcome};
pub use validate::{ValidatedDeployment, VestingSchedule, MAX_TIMELOCK_DELAY, MIN_TIMELOCK_DELAY};
