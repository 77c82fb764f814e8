use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{
    errors::AmmError,
    state::{Config, CONFIG_SEED, LP_DECIMALS, LP_SEED, MAX_FEE_BPS},
};

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub initializer: Signer<'info>,

    pub mint_x: Box<Account<'info, Mint>>,
    pub mint_y: Box<Account<'info, Mint>>,

    /// `init` rejects a seed that already names a pool
    #[account(
        init,
        payer = initializer,
        space = Config::SPACE,
        seeds = [CONFIG_SEED, seed.to_le_bytes().as_ref()],
        bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = initializer,
        mint::decimals = LP_DECIMALS,
        mint::authority = config,
        seeds = [LP_SEED, config.key().as_ref()],
        bump,
    )]
    pub mint_lp: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = initializer,
        associated_token::mint = mint_x,
        associated_token::authority = config,
    )]
    pub vault_x: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = initializer,
        associated_token::mint = mint_y,
        associated_token::authority = config,
    )]
    pub vault_y: Box<Account<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    seed: u64,
    fee: u16,
    authority: Option<Pubkey>,
) -> Result<()> {
    require_gt!(MAX_FEE_BPS, fee, AmmError::InvalidFee);

    ctx.accounts.config.set_inner(Config {
        seed,
        authority,
        mint_x: ctx.accounts.mint_x.key(),
        mint_y: ctx.accounts.mint_y.key(),
        fee,
        locked: false,
        config_bump: ctx.bumps.config,
        lp_bump: ctx.bumps.mint_lp,
    });

    msg!("Pool {} initialized with a {} bps fee", seed, fee);
    Ok(())
}
