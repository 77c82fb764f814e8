use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{transfer_checked, Mint, Token, TokenAccount, TransferChecked},
};
use constant_product_curve::{ConstantProduct, LiquidityPair};

use crate::{
    errors::AmmError,
    state::{Config, CONFIG_SEED, LP_SEED},
};

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    pub mint_x: Box<Account<'info, Mint>>,
    pub mint_y: Box<Account<'info, Mint>>,

    #[account(
        has_one = mint_x,
        has_one = mint_y,
        seeds = [CONFIG_SEED, config.seed.to_le_bytes().as_ref()],
        bump = config.config_bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        seeds = [LP_SEED, config.key().as_ref()],
        bump = config.lp_bump,
    )]
    pub mint_lp: Box<Account<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint_x,
        associated_token::authority = config,
    )]
    pub vault_x: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = mint_y,
        associated_token::authority = config,
    )]
    pub vault_y: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint_x,
        associated_token::authority = user,
    )]
    pub user_ata_x: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint_y,
        associated_token::authority = user,
    )]
    pub user_ata_y: Box<Account<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Swap<'info> {
    /// User pays `amount` into the vault on the `is_x` side
    pub fn pay_in(&self, is_x: bool, amount: u64) -> Result<()> {
        let (from, to, mint, decimals) = match is_x {
            true => (&self.user_ata_x, &self.vault_x, &self.mint_x, self.mint_x.decimals),
            false => (&self.user_ata_y, &self.vault_y, &self.mint_y, self.mint_y.decimals),
        };

        let cpi_accounts = TransferChecked {
            from: from.to_account_info(),
            mint: mint.to_account_info(),
            to: to.to_account_info(),
            authority: self.user.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);

        transfer_checked(cpi_ctx, amount, decimals)
    }

    /// Pool pays `amount` out of the opposite vault, signed by the config PDA
    pub fn pay_out(&self, is_x: bool, amount: u64) -> Result<()> {
        let (from, to, mint, decimals) = match is_x {
            true => (&self.vault_y, &self.user_ata_y, &self.mint_y, self.mint_y.decimals),
            false => (&self.vault_x, &self.user_ata_x, &self.mint_x, self.mint_x.decimals),
        };

        let seed_bytes = self.config.seed.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] =
            &[&[CONFIG_SEED, seed_bytes.as_ref(), &[self.config.config_bump]]];

        let cpi_accounts = TransferChecked {
            from: from.to_account_info(),
            mint: mint.to_account_info(),
            to: to.to_account_info(),
            authority: self.config.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );

        transfer_checked(cpi_ctx, amount, decimals)
    }
}

/// `is_x` selects the side being paid in; `min` bounds what comes out.
pub fn handler(ctx: Context<Swap>, is_x: bool, amount: u64, min: u64) -> Result<()> {
    require!(!ctx.accounts.config.locked, AmmError::PoolLocked);
    require_gt!(amount, 0, AmmError::InvalidAmount);

    let mut curve = ConstantProduct::init(
        ctx.accounts.vault_x.amount,
        ctx.accounts.vault_y.amount,
        ctx.accounts.mint_lp.supply,
        ctx.accounts.config.fee,
        None,
    )
    .map_err(AmmError::from)?;

    let pair = match is_x {
        true => LiquidityPair::X,
        false => LiquidityPair::Y,
    };
    let swap = curve.swap(pair, amount, min).map_err(AmmError::from)?;
    require!(swap.deposit != 0 && swap.withdraw != 0, AmmError::InvalidAmount);

    ctx.accounts.pay_in(is_x, swap.deposit)?;
    ctx.accounts.pay_out(is_x, swap.withdraw)?;

    msg!(
        "Swapped {} in for {} out, {} fee",
        swap.deposit,
        swap.withdraw,
        swap.fee
    );
    Ok(())
}
