//! Resumable provisioning of a validated deployment.

use std::collections::BTreeSet;
use std::fmt;

use claimdrop_distributor::Distributor;
use claimdrop_token::{TokenError, TokenLedger};
use claimdrop_types::{Address, TokenAmount};
use claimdrop_utils::format_duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DeployError;
use crate::validate::ValidatedDeployment;

/// Everything provisioning has created so far.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Deployment {
    pub token: Option<TokenLedger>,
    pub distributor: Option<Distributor>,
    /// Funding steps that completed. Balances move after deployment
    /// (claims, sweeps, custody spending), so funding is never re-derived
    /// from them.
    pub funded: BTreeSet<ProvisionStep>,
}

impl Deployment {
    pub fn save_state(&self) -> Result<Vec<u8>, DeployError> {
        bincode::serialize(self).map_err(|e| DeployError::Snapshot(e.to_string()))
    }

    pub fn load_state(data: &[u8]) -> Result<Self, DeployError> {
        bincode::deserialize(data).map_err(|e| DeployError::Snapshot(e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProvisionStep {
    CreateToken,
    CreateDistributor,
    AuthorizeDistributor,
    FundDistributor,
    FundCustody,
}

impl ProvisionStep {
    /// Execution order.
    pub const ALL: [ProvisionStep; 5] = [
        ProvisionStep::CreateToken,
        ProvisionStep::CreateDistributor,
        ProvisionStep::AuthorizeDistributor,
        ProvisionStep::FundDistributor,
        ProvisionStep::FundCustody,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateToken => "create_token",
            Self::CreateDistributor => "create_distributor",
            Self::AuthorizeDistributor => "authorize_distributor",
            Self::FundDistributor => "fund_distributor",
            Self::FundCustody => "fund_custody",
        }
    }
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    AlreadyDone,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub steps: Vec<(ProvisionStep, StepOutcome)>,
}

impl ProvisionReport {
    pub fn applied(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, outcome)| *outcome == StepOutcome::Applied)
            .count()
    }

    /// True when the run changed nothing.
    pub fn is_noop(&self) -> bool {
        self.applied() == 0
    }
}

pub struct Provisioner {
    plan: ValidatedDeployment,
}

impl Provisioner {
    pub fn new(plan: ValidatedDeployment) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &ValidatedDeployment {
        &self.plan
    }

    /// Run every step in order, skipping those whose effect already exists.
    /// Stops at the first failure; running again resumes from there.
    pub fn run(&self, deployment: &mut Deployment) -> Result<ProvisionReport, DeployError> {
        let mut report = ProvisionReport::default();
        for step in ProvisionStep::ALL {
            let outcome = self.step(deployment, step).inspect_err(|e| {
                warn!(%step, error = %e, "provisioning stopped");
            })?;
            report.steps.push((step, outcome));
        }

        let window = self
            .plan
            .validated_at()
            .elapsed_since(self.plan.distributor().claim_deadline);
        info!(
            applied = report.applied(),
            claim_window = %format_duration(window),
            "provisioning complete"
        );
        Ok(report)
    }

    /// Run a single step if its effect is not yet present.
    pub fn step(
        &self,
        deployment: &mut Deployment,
        step: ProvisionStep,
    ) -> Result<StepOutcome, DeployError> {
        if self.is_done(deployment, step) {
            debug!(%step, "already done");
            return Ok(StepOutcome::AlreadyDone);
        }
        self.apply(deployment, step)?;
        info!(%step, "step applied");
        Ok(StepOutcome::Applied)
    }

    pub fn is_done(&self, deployment: &Deployment, step: ProvisionStep) -> bool {
        let plan = &self.plan;
        let pool = plan.distributor().account;
        match step {
            ProvisionStep::CreateToken => deployment.token.is_some(),
            ProvisionStep::CreateDistributor => deployment.distributor.is_some(),
            ProvisionStep::AuthorizeDistributor => deployment
                .token
                .as_ref()
                .is_some_and(|t| t.distributor() == Some(pool)),
            ProvisionStep::FundDistributor | ProvisionStep::FundCustody => {
                deployment.funded.contains(&step)
            }
        }
    }

    fn apply(&self, deployment: &mut Deployment, step: ProvisionStep) -> Result<(), DeployError> {
        let plan = &self.plan;
        let holder = plan.genesis_holder();
        let token_err = |source: TokenError| DeployError::Token { step, source };

        match step {
            ProvisionStep::CreateToken => {
                let token =
                    TokenLedger::new(holder, plan.total_supply()).map_err(token_err)?;
                deployment.token = Some(token);
            }
            ProvisionStep::CreateDistributor => {
                let dist = Distributor::new(plan.distributor().clone())
                    .map_err(|source| DeployError::Distributor { step, source })?;
                deployment.distributor = Some(dist);
            }
            ProvisionStep::AuthorizeDistributor => {
                if deployment.distributor.is_none() {
                    return Err(DeployError::MissingPrerequisite {
                        step,
                        reason: "distributor not created",
                    });
                }
                let token = token_mut(deployment, step)?;
                token
                    .set_distributor(&holder, &plan.distributor().account)
                    .map_err(token_err)?;
            }
            ProvisionStep::FundDistributor => {
                let claimed = deployment
                    .distributor
                    .as_ref()
                    .map(Distributor::total_claimed)
                    .ok_or(DeployError::MissingPrerequisite {
                        step,
                        reason: "distributor not created",
                    })?;
                let pool = plan.distributor().account;
                let token = token_mut(deployment, step)?;
                let held = token.balance_of(&pool).saturating_add(claimed);
                top_up(token, &holder, &pool, plan.distributor_allocation(), held)
                    .map_err(token_err)?;
                deployment.funded.insert(step);
            }
            ProvisionStep::FundCustody => {
                let custody = plan.custody();
                let token = token_mut(deployment, step)?;
                let held = token.balance_of(&custody);
                top_up(token, &holder, &custody, plan.custody_allocation(), held)
                    .map_err(token_err)?;
                deployment.funded.insert(step);
            }
        }
        Ok(())
    }
}

fn token_mut(
    deployment: &mut Deployment,
    step: ProvisionStep,
) -> Result<&mut TokenLedger, DeployError> {
    deployment
        .token
        .as_mut()
        .ok_or(DeployError::MissingPrerequisite {
            step,
            reason: "token not created",
        })
}

/// Transfer only the shortfall. Covers tokens that reached the account
/// before its funding step was recorded.
fn top_up(
    token: &mut TokenLedger,
    from: &Address,
    to: &Address,
    target: TokenAmount,
    held: TokenAmount,
) -> Result<(), TokenError> {
    let shortfall = target.saturating_sub(held);
    if shortfall.is_zero() {
        return Ok(());
    }
    token.transfer(from, to, shortfall)
}
