use anchor_lang::prelude::*;

/// Protocol errors raised by the escrow handlers and account constraints.
///
/// A missing escrow surfaces as Anchor's `AccountNotInitialized`, and a
/// duplicate `(maker, seed)` as the system program's `AccountAlreadyInUse`,
/// both raised while the accounts are loaded.
#[error_code]
pub enum EscrowError {
    #[msg("Invalid amount: amount must be greater than zero")]
    InvalidAmount,
    #[msg("Insufficient funds: source token account balance is too low")]
    InsufficientFunds,
    #[msg("Unauthorized: only the escrow maker can cancel")]
    Unauthorized,
    #[msg("Invalid maker: maker does not match escrow maker")]
    InvalidMaker,
    #[msg("Invalid mint A: mint_a does not match escrow mint_a")]
    InvalidMintA,
    #[msg("Invalid mint B: mint_b does not match escrow mint_b")]
    InvalidMintB,
}
