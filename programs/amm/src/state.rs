use anchor_lang::prelude::*;

/// PDA seed prefix for the pool config, followed by the little-endian seed
pub const CONFIG_SEED: &[u8] = b"config";
/// PDA seed prefix for the LP mint, followed by the config address
pub const LP_SEED: &[u8] = b"lp";
pub const LP_DECIMALS: u8 = 6;
/// Fees are in basis points and must stay below 100%
pub const MAX_FEE_BPS: u16 = 10_000;

/// Pool configuration; also the authority of both vaults and the LP mint.
#[account(discriminator = 1)]
#[derive(InitSpace)]
pub struct Config {
    pub seed: u64,
    /// May lock and unlock the pool; with `None` the pool can never be locked
    pub authority: Option<Pubkey>,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub fee: u16,
    pub locked: bool,
    pub config_bump: u8,
    pub lp_bump: u8,
}

impl Config {
    pub const SPACE: usize = Config::DISCRIMINATOR.len() + Config::INIT_SPACE;
}

/// Derive the `(config, mint_lp)` addresses of the pool created with `seed`
pub fn find_pool_addresses(seed: u64) -> (Pubkey, Pubkey) {
    let (config, _) = Pubkey::find_program_address(&[CONFIG_SEED, &seed.to_le_bytes()], &crate::ID);
    let (mint_lp, _) = Pubkey::find_program_address(&[LP_SEED, config.as_ref()], &crate::ID);
    (config, mint_lp)
}
