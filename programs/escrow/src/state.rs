use anchor_lang::prelude::*;

/// PDA seed prefix for escrow accounts
pub const ESCROW_SEED: &[u8] = b"escrow";

/// Terms of one open swap; its address also signs for the vault
#[account(discriminator = 1)]
#[derive(InitSpace)]
pub struct Escrow {
    /// Maker-chosen nonce, lets one maker keep several escrows open
    pub seed: u64,
    /// Depositor, and the destination of payment and rent
    pub maker: Pubkey,
    /// Offered asset, held in the vault
    pub mint_a: Pubkey,
    /// Demanded asset
    pub mint_b: Pubkey,
    /// Quantity of `mint_b` a taker must pay
    pub receive: u64,
    pub bump: u8,
}

impl Escrow {
    /// Total account size including the discriminator
    pub const SPACE: usize = Escrow::DISCRIMINATOR.len() + Escrow::INIT_SPACE;
}

/// Derive the escrow address owned by `maker` for a given `seed`
pub fn find_escrow_address(maker: &Pubkey, seed: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ESCROW_SEED, maker.as_ref(), seed.to_le_bytes().as_ref()],
        &crate::ID,
    )
}
