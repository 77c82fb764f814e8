use anchor_lang::prelude::*;

mod errors;
mod instructions;
mod state;

pub use errors::EscrowError;
pub use state::{find_escrow_address, Escrow, ESCROW_SEED};

use instructions::*;

declare_id!("7PiBLhjVj6JGW7fdnqd8ysURMhjCJnQw4dxsxK7LMP7K");

#[program]
pub mod escrow {
    use super::*;

    /// Open an escrow: maker locks mint A in a vault and names the mint B amount it wants
    #[instruction(discriminator = 0)]
    pub fn make(ctx: Context<Make>, seed: u64, receive: u64, amount: u64) -> Result<()> {
        instructions::make::handler(ctx, seed, receive, amount)
    }

    /// Settle the escrow: taker pays mint B to the maker and receives the vaulted mint A
    #[instruction(discriminator = 1)]
    pub fn take(ctx: Context<Take>) -> Result<()> {
        instructions::take::handler(ctx)
    }

    /// Abort the escrow: maker reclaims mint A and both accounts are closed
    #[instruction(discriminator = 2)]
    pub fn cancel(ctx: Context<Cancel>) -> Result<()> {
        instructions::cancel::handler(ctx)
    }
}
