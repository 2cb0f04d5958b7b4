//! The interface the distributor pays claimants through.

use claimdrop_types::{Address, TokenAmount};
use tracing::info;

use crate::error::TokenError;
use crate::ledger::TokenLedger;

/// Ledger operations available to the registered distributor.
///
/// Each method either applies fully or returns an error with no effect.
pub trait PayoutLedger {
    fn balance_of(&self, account: &Address) -> TokenAmount;

    /// Transfer `amount` from `pool` to `recipient`, then set `recipient`'s
    /// delegate to `delegate` unless one is already set. A zero `delegate`
    /// leaves the recipient unset.
    fn payout(
        &mut self,
        pool: &Address,
        recipient: &Address,
        amount: TokenAmount,
        delegate: &Address,
    ) -> Result<(), TokenError>;

    /// Transfer `amount` from `pool` to `to` with no delegation change.
    fn release(&mut self, pool: &Address, to: &Address, amount: TokenAmount)
        -> Result<(), TokenError>;
}

impl PayoutLedger for TokenLedger {
    fn balance_of(&self, account: &Address) -> TokenAmount {
        TokenLedger::balance_of(self, account)
    }

    fn payout(
        &mut self,
        pool: &Address,
        recipient: &Address,
        amount: TokenAmount,
        delegate: &Address,
    ) -> Result<(), TokenError> {
        self.check_distributor(pool)?;
        self.check_transfer(pool, recipient, amount)?;

        self.next_sequence();
        self.apply_transfer(pool, recipient, amount);
        if self.delegates(recipient).is_none() && !delegate.is_zero() {
            self.apply_delegate(recipient, delegate);
        }
        info!(%recipient, %amount, %delegate, "payout");
        Ok(())
    }

    fn release(
        &mut self,
        pool: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        self.check_distributor(pool)?;
        self.check_transfer(pool, to, amount)?;
        self.next_sequence();
        self.apply_transfer(pool, to, amount);
        info!(%to, %amount, "release");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::new([b; 32])
    }

    fn funded() -> TokenLedger {
        let admin = addr(0xAA);
        let pool = addr(0xD1);
        let mut l = TokenLedger::new(admin, TokenAmount::new(1_000)).unwrap();
        l.set_distributor(&admin, &pool).unwrap();
        l.transfer(&admin, &pool, TokenAmount::new(500)).unwrap();
        l
    }

    #[test]
    fn payout_sets_unset_delegate() {
        let mut l = funded();
        l.payout(&addr(0xD1), &addr(1), TokenAmount::new(100), &addr(9))
            .unwrap();
        assert_eq!(l.balance_of(&addr(1)), TokenAmount::new(100));
        assert_eq!(l.delegates(&addr(1)), Some(addr(9)));
        assert_eq!(l.current_votes(&addr(9)), TokenAmount::new(100));
    }

    #[test]
    fn payout_keeps_existing_delegate() {
        let mut l = funded();
        l.delegate(&addr(1), &addr(4)).unwrap();
        l.payout(&addr(0xD1), &addr(1), TokenAmount::new(100), &addr(9))
            .unwrap();
        assert_eq!(l.delegates(&addr(1)), Some(addr(4)));
        assert_eq!(l.current_votes(&addr(4)), TokenAmount::new(100));
        assert_eq!(l.current_votes(&addr(9)), TokenAmount::ZERO);
    }

    #[test]
    fn payout_with_zero_delegate_leaves_unset() {
        let mut l = funded();
        l.payout(&addr(0xD1), &addr(1), TokenAmount::new(100), &Address::ZERO)
            .unwrap();
        assert_eq!(l.delegates(&addr(1)), None);
    }

    #[test]
    fn payout_from_unregistered_pool_rejected() {
        let mut l = funded();
        let err = l
            .payout(&addr(0xAA), &addr(1), TokenAmount::new(1), &addr(9))
            .unwrap_err();
        assert_eq!(err, TokenError::Unauthorized(addr(0xAA)));
        assert_eq!(l.balance_of(&addr(1)), TokenAmount::ZERO);
    }

    #[test]
    fn failed_payout_changes_nothing() {
        let mut l = funded();
        let seq = l.sequence();
        let err = l
            .payout(&addr(0xD1), &addr(1), TokenAmount::new(501), &addr(9))
            .unwrap_err();
        assert!(matches!(err, TokenError::InsufficientBalance { .. }));
        assert_eq!(l.delegates(&addr(1)), None);
        assert_eq!(l.sequence(), seq);
    }

    #[test]
    fn release_moves_pool_balance() {
        let mut l = funded();
        l.release(&addr(0xD1), &addr(0x77), TokenAmount::new(500))
            .unwrap();
        assert_eq!(l.balance_of(&addr(0xD1)), TokenAmount::ZERO);
        assert_eq!(l.balance_of(&addr(0x77)), TokenAmount::new(500));
        assert_eq!(l.delegates(&addr(0x77)), None);
    }
}
