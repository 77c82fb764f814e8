use anchor_lang::prelude::*;

mod errors;
mod instructions;
mod state;

pub use errors::AmmError;
pub use state::{find_pool_addresses, Config, CONFIG_SEED, LP_DECIMALS, LP_SEED, MAX_FEE_BPS};

use instructions::*;

declare_id!("CgxgyeunixBkS8offKfeDg2s1EbPDcud7Wct4TV9xKLM");

#[program]
pub mod amm {
    use super::*;

    /// Create a pool for the (mint_x, mint_y) pair with its LP mint and vaults
    #[instruction(discriminator = 0)]
    pub fn initialize(
        ctx: Context<Initialize>,
        seed: u64,
        fee: u16,
        authority: Option<Pubkey>,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, seed, fee, authority)
    }

    /// Add liquidity and receive `amount` LP tokens
    #[instruction(discriminator = 1)]
    pub fn deposit(ctx: Context<Deposit>, amount: u64, max_x: u64, max_y: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount, max_x, max_y)
    }

    /// Burn `amount` LP tokens for a proportional share of both vaults
    #[instruction(discriminator = 2)]
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64, min_x: u64, min_y: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, amount, min_x, min_y)
    }

    /// Trade one side of the pool for the other along the x * y = k curve
    #[instruction(discriminator = 3)]
    pub fn swap(ctx: Context<Swap>, is_x: bool, amount: u64, min: u64) -> Result<()> {
        instructions::swap::handler(ctx, is_x, amount, min)
    }

    /// Freeze deposits, withdrawals and swaps
    #[instruction(discriminator = 4)]
    pub fn lock(ctx: Context<SetLock>) -> Result<()> {
        instructions::lock::handler(ctx, true)
    }

    #[instruction(discriminator = 5)]
    pub fn unlock(ctx: Context<SetLock>) -> Result<()> {
        instructions::lock::handler(ctx, false)
    }
}
