//! One-shot validation of a [`DeploymentConfig`].

use claimdrop_crypto::parse_address;
use claimdrop_distributor::DistributorConfig;
use claimdrop_types::{Address, MerkleRoot, PublicKey, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::config::DeploymentConfig;
use crate::error::{ConfigViolation, DeployError};

pub const MIN_TIMELOCK_DELAY: u64 = 2 * 24 * 60 * 60;
pub const MAX_TIMELOCK_DELAY: u64 = 30 * 24 * 60 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    pub amount: TokenAmount,
    pub begin: Timestamp,
    pub cliff: Timestamp,
    pub end: Timestamp,
}

/// A deployment config that passed every check. Only [`DeploymentConfig::validate`]
/// produces one, and it cannot be modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedDeployment {
    genesis_holder: Address,
    total_supply: TokenAmount,
    timelock: Address,
    timelock_delay: u64,
    distributor: DistributorConfig,
    distributor_allocation: TokenAmount,
    custody: Address,
    custody_allocation: TokenAmount,
    vesting: VestingSchedule,
    validated_at: Timestamp,
}

impl ValidatedDeployment {
    pub fn genesis_holder(&self) -> Address {
        self.genesis_holder
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn timelock(&self) -> Address {
        self.timelock
    }

    pub fn timelock_delay(&self) -> u64 {
        self.timelock_delay
    }

    pub fn distributor(&self) -> &DistributorConfig {
        &self.distributor
    }

    pub fn distributor_allocation(&self) -> TokenAmount {
        self.distributor_allocation
    }

    pub fn custody(&self) -> Address {
        self.custody
    }

    pub fn custody_allocation(&self) -> TokenAmount {
        self.custody_allocation
    }

    pub fn vesting(&self) -> VestingSchedule {
        self.vesting
    }

    pub fn validated_at(&self) -> Timestamp {
        self.validated_at
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<ConfigViolation>,
}

impl Checker {
    fn address(&mut self, field: &'static str, value: &str) -> Address {
        match parse_address(value) {
            Some(addr) if addr.is_zero() => {
                self.violations.push(ConfigViolation::ZeroAddress { field });
                addr
            }
            Some(addr) => addr,
            None => {
                self.violations.push(ConfigViolation::BadAddress {
                    field,
                    value: value.to_string(),
                });
                Address::ZERO
            }
        }
    }

    fn amount(&mut self, field: &'static str, value: &str) -> TokenAmount {
        match value.trim().replace('_', "").parse::<u128>() {
            Ok(raw) => TokenAmount::new(raw),
            Err(_) => {
                self.violations.push(ConfigViolation::BadAmount {
                    field,
                    value: value.to_string(),
                });
                TokenAmount::ZERO
            }
        }
    }

    fn distinct(&mut self, a: (&'static str, Address), b: (&'static str, Address)) {
        if !a.1.is_zero() && a.1 == b.1 {
            self.violations.push(ConfigViolation::AccountCollision(a.0, b.0));
        }
    }

    fn check(&mut self, ok: bool, violation: impl FnOnce() -> ConfigViolation) {
        if !ok {
            self.violations.push(violation());
        }
    }
}

impl DeploymentConfig {
    /// Check every rule and report all violations at once.
    pub fn validate(&self, now: Timestamp) -> Result<ValidatedDeployment, DeployError> {
        let mut c = Checker::default();

        let genesis_holder = c.address("token.genesis_holder", &self.token.genesis_holder);
        let total_supply = c.amount("token.total_supply", &self.token.total_supply);
        let timelock = c.address("timelock.address", &self.timelock.address);
        let account = c.address("distributor.account", &self.distributor.account);
        let distributor_allocation =
            c.amount("distributor.allocation", &self.distributor.allocation);
        let custody = c.address("custody.address", &self.custody.address);
        let custody_allocation = c.amount("custody.allocation", &self.custody.allocation);
        let vesting_amount = c.amount("vesting.amount", &self.vesting.amount);

        let merkle_root = match self.distributor.merkle_root.parse::<MerkleRoot>() {
            Ok(root) => {
                c.check(!root.is_zero(), || ConfigViolation::ZeroRoot);
                root
            }
            Err(e) => {
                c.violations.push(ConfigViolation::BadRoot(e.to_string()));
                MerkleRoot::ZERO
            }
        };
        let signer = match self.distributor.signer.parse::<PublicKey>() {
            Ok(key) if key.0 == [0u8; 32] => {
                c.violations
                    .push(ConfigViolation::BadSigner("key must not be zero".into()));
                key
            }
            Ok(key) => key,
            Err(e) => {
                c.violations.push(ConfigViolation::BadSigner(e.to_string()));
                PublicKey([0u8; 32])
            }
        };

        let delay = self.timelock.delay_secs;
        c.check(
            (MIN_TIMELOCK_DELAY..=MAX_TIMELOCK_DELAY).contains(&delay),
            || ConfigViolation::TimelockDelayOutOfRange {
                delay,
                min: MIN_TIMELOCK_DELAY,
                max: MAX_TIMELOCK_DELAY,
            },
        );

        let v = &self.vesting;
        c.check(v.begin > now.as_secs(), || {
            ConfigViolation::VestingBeginNotInFuture {
                begin: v.begin,
                now: now.as_secs(),
            }
        });
        c.check(v.cliff >= v.begin, || ConfigViolation::VestingCliffBeforeBegin {
            begin: v.begin,
            cliff: v.cliff,
        });
        c.check(v.end > v.cliff, || ConfigViolation::VestingEndNotAfterCliff {
            cliff: v.cliff,
            end: v.end,
        });

        let deadline = self.distributor.claim_deadline;
        c.check(deadline > now.as_secs(), || {
            ConfigViolation::ClaimDeadlineNotInFuture {
                deadline,
                now: now.as_secs(),
            }
        });

        let allocated = distributor_allocation
            .checked_add(custody_allocation)
            .and_then(|sum| sum.checked_add(vesting_amount));
        c.check(
            allocated.is_some_and(|sum| sum <= total_supply),
            || ConfigViolation::AllocationExceedsSupply {
                allocated: allocated.map_or(u128::MAX, |a| a.raw()),
                supply: total_supply.raw(),
            },
        );

        c.distinct(("distributor.account", account), ("token.genesis_holder", genesis_holder));
        c.distinct(("distributor.account", account), ("timelock.address", timelock));
        c.distinct(("distributor.account", account), ("custody.address", custody));

        if !c.violations.is_empty() {
            return Err(DeployError::Invalid(c.violations));
        }

        Ok(ValidatedDeployment {
            genesis_holder,
            total_supply,
            timelock,
            timelock_delay: delay,
            distributor: DistributorConfig {
                account,
                merkle_root,
                signer,
                treasury: timelock,
                claim_deadline: Timestamp::new(deadline),
            },
            distributor_allocation,
            custody,
            custody_allocation,
            vesting: VestingSchedule {
                amount: vesting_amount,
                begin: Timestamp::new(v.begin),
                cliff: Timestamp::new(v.cliff),
                end: Timestamp::new(v.end),
            },
            validated_at: now,
        })
    }
}
