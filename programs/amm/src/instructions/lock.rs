use anchor_lang::prelude::*;

use crate::{
    errors::AmmError,
    state::{Config, CONFIG_SEED},
};

#[derive(Accounts)]
pub struct SetLock<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = config.authority == Some(authority.key()) @ AmmError::Unauthorized,
        seeds = [CONFIG_SEED, config.seed.to_le_bytes().as_ref()],
        bump = config.config_bump,
    )]
    pub config: Account<'info, Config>,
}

pub fn handler(ctx: Context<SetLock>, locked: bool) -> Result<()> {
    ctx.accounts.config.locked = locked;

    msg!("Pool {} locked: {}", ctx.accounts.config.seed, locked);
    Ok(())
}
