use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{mint_to, transfer_checked, Mint, MintTo, Token, TokenAccount, TransferChecked},
};
use constant_product_curve::ConstantProduct;

use crate::{
    errors::AmmError,
    state::{Config, CONFIG_SEED, LP_DECIMALS, LP_SEED},
};

#[derive(Accounts)]
pub struct Deposit<'info> {
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
        mut,
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
        mut,
        associated_token::mint = mint_x,
        associated_token::authority = user,
    )]
    pub user_ata_x: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = mint_y,
        associated_token::authority = user,
    )]
    pub user_ata_y: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint_lp,
        associated_token::authority = user,
    )]
    pub user_ata_lp: Box<Account<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    /// Token amounts owed for `amount` LP tokens.
    /// An empty pool takes the caller's maxima as-is and so sets the price.
    pub fn required_amounts(&self, amount: u64, max_x: u64, max_y: u64) -> Result<(u64, u64)> {
        if self.mint_lp.supply == 0 && self.vault_x.amount == 0 && self.vault_y.amount == 0 {
            return Ok((max_x, max_y));
        }

        let amounts = ConstantProduct::xy_deposit_amounts_from_l(
            self.vault_x.amount,
            self.vault_y.amount,
            self.mint_lp.supply,
            amount,
            LP_DECIMALS.into(),
        )
        .map_err(AmmError::from)?;

        Ok((amounts.x, amounts.y))
    }

    pub fn deposit_tokens(&self, is_x: bool, amount: u64) -> Result<()> {
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

    /// Mint LP tokens to the user, signed by the config PDA
    pub fn mint_lp_tokens(&self, amount: u64) -> Result<()> {
        let seed_bytes = self.config.seed.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] =
            &[&[CONFIG_SEED, seed_bytes.as_ref(), &[self.config.config_bump]]];

        let cpi_accounts = MintTo {
            mint: self.mint_lp.to_account_info(),
            to: self.user_ata_lp.to_account_info(),
            authority: self.config.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );

        mint_to(cpi_ctx, amount)
    }
}

pub fn handler(ctx: Context<Deposit>, amount: u64, max_x: u64, max_y: u64) -> Result<()> {
    require!(!ctx.accounts.config.locked, AmmError::PoolLocked);
    require_gt!(amount, 0, AmmError::InvalidAmount);
    require_gt!(max_x, 0, AmmError::InvalidAmount);
    require_gt!(max_y, 0, AmmError::InvalidAmount);

    let (x, y) = ctx.accounts.required_amounts(amount, max_x, max_y)?;
    require!(x <= max_x && y <= max_y, AmmError::SlippageExceeded);

    require_gte!(ctx.accounts.user_ata_x.amount, x, AmmError::InsufficientBalance);
    require_gte!(ctx.accounts.user_ata_y.amount, y, AmmError::InsufficientBalance);

    ctx.accounts.deposit_tokens(true, x)?;
    ctx.accounts.deposit_tokens(false, y)?;
    ctx.accounts.mint_lp_tokens(amount)?;

    msg!("Deposited {} x and {} y for {} LP", x, y, amount);
    Ok(())
}
