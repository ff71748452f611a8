//! Balance ledger capability
//!
//! Multisig wallets never own funds directly. They hold a balance on an
//! external ledger and move it through this trait.

use crate::token::token::{Token, TokenError, TransferEvent};

/// A transferable balance ledger
pub trait Ledger {
    /// Current balance held by `holder`
    fn balance_of(&self, holder: &str) -> u128;

    /// Move `amount` from `from` to `to`
    fn transfer(&mut self, from: &str, to: &str, amount: u128)
        -> Result<TransferEvent, TokenError>;
}

impl Ledger for Token {
    fn balance_of(&self, holder: &str) -> u128 {
        Token::balance_of(self, holder)
    }

    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<TransferEvent, TokenError> {
        Token::transfer(self, from, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_through_ledger<L: Ledger>(ledger: &mut L) -> Result<TransferEvent, TokenError> {
        ledger.transfer("alice", "bob", 40)
    }

    #[test]
    fn test_token_as_ledger() {
        let mut token = Token::deploy("Test Token", "TST", 0, 100, "alice").unwrap();

        let event = move_through_ledger(&mut token).unwrap();

        assert_eq!(event.amount, 40);
        assert_eq!(Ledger::balance_of(&token, "alice"), 60);
        assert_eq!(Ledger::balance_of(&token, "bob"), 40);
    }
}
