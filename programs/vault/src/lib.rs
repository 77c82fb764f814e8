use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

declare_id!("9gatejTYz7JwXjai64pp9gWsCttFUW9avwSC59TNxfsM");

/// PDA seed prefix for the per-owner state account
pub const STATE_SEED: &[u8] = b"state";
/// PDA seed prefix for the lamport vault, scoped to a state account
pub const VAULT_SEED: &[u8] = b"vault";

#[program]
pub mod vault {
    use super::*;

    /// Create the owner's vault state and remember both PDA bumps
    #[instruction(discriminator = 0)]
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        ctx.accounts.vault_state.set_inner(VaultState {
            vault_bump: ctx.bumps.vault,
            state_bump: ctx.bumps.vault_state,
        });

        msg!("Vault initialized for {}", ctx.accounts.signer.key());
        Ok(())
    }

    /// Deposit lamports into the vault
    ///
    /// Requirements:
    /// 1. Amount must be non-zero
    /// 2. The vault must end up rent-exempt as a 0-byte SystemAccount
    #[instruction(discriminator = 1)]
    pub fn deposit(ctx: Context<Payment>, amount: u64) -> Result<()> {
        require_gt!(amount, 0, VaultError::InvalidAmount);

        let balance = ctx
            .accounts
            .vault
            .lamports()
            .checked_add(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        let rent_minimum = Rent::get()?.minimum_balance(0);
        require_gte!(balance, rent_minimum, VaultError::BelowRentMinimum);

        let cpi_context = CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.signer.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        );

        transfer(cpi_context, amount)?;

        msg!("Deposited {} lamports to vault", amount);
        Ok(())
    }

    /// Withdraw part of the vault back to the owner
    ///
    /// Requirements:
    /// 1. Amount must be non-zero and covered by the vault balance
    /// 2. What remains is either nothing or still rent-exempt
    #[instruction(discriminator = 2)]
    pub fn withdraw(ctx: Context<Payment>, amount: u64) -> Result<()> {
        require_gt!(amount, 0, VaultError::InvalidAmount);

        let vault_balance = ctx.accounts.vault.lamports();
        require_gte!(vault_balance, amount, VaultError::InsufficientFunds);

        let remaining = vault_balance
            .checked_sub(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        if remaining != 0 {
            let rent_minimum = Rent::get()?.minimum_balance(0);
            require_gte!(remaining, rent_minimum, VaultError::BelowRentMinimum);
        }

        ctx.accounts.release(amount)?;

        msg!("Withdrew {} lamports from vault", amount);
        Ok(())
    }

    /// Drain the vault and close the state account
    #[instruction(discriminator = 3)]
    pub fn close(ctx: Context<Close>) -> Result<()> {
        let vault_balance = ctx.accounts.vault.lamports();

        if vault_balance > 0 {
            let state_key = ctx.accounts.vault_state.key();
            let signer_seeds: &[&[&[u8]]] = &[&[
                VAULT_SEED,
                state_key.as_ref(),
                &[ctx.accounts.vault_state.vault_bump],
            ]];

            let cpi_context = CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.signer.to_account_info(),
                },
                signer_seeds,
            );

            transfer(cpi_context, vault_balance)?;
        }

        msg!("Vault closed, {} lamports returned", vault_balance);
        Ok(())
    }
}

// ============================================================
// State
// ============================================================

#[account(discriminator = 1)]
#[derive(InitSpace)]
pub struct VaultState {
    pub vault_bump: u8,
    pub state_bump: u8,
}

impl VaultState {
    pub const SPACE: usize = VaultState::DISCRIMINATOR.len() + VaultState::INIT_SPACE;
}

/// Derive the `(vault_state, vault)` addresses owned by `owner`
pub fn find_vault_addresses(owner: &Pubkey) -> (Pubkey, Pubkey) {
    let (state, _) = Pubkey::find_program_address(&[STATE_SEED, owner.as_ref()], &ID);
    let (vault, _) = Pubkey::find_program_address(&[VAULT_SEED, state.as_ref()], &ID);
    (state, vault)
}

// ============================================================
// Account Structures
// ============================================================

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Per-owner state PDA derived from ["state", signer.key()]
    #[account(
        init,
        payer = signer,
        space = VaultState::SPACE,
        seeds = [STATE_SEED, signer.key().as_ref()],
        bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// The vault PDA derived from ["vault", vault_state.key()]
    #[account(
        seeds = [VAULT_SEED, vault_state.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Payment<'info> {
    /// Vault owner; pays deposits and receives withdrawals
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [STATE_SEED, signer.key().as_ref()],
        bump = vault_state.state_bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.key().as_ref()],
        bump = vault_state.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Payment<'info> {
    /// Move `amount` lamports from the vault back to the signer with PDA signing
    pub fn release(&self, amount: u64) -> Result<()> {
        let state_key = self.vault_state.key();
        let signer_seeds: &[&[&[u8]]] =
            &[&[VAULT_SEED, state_key.as_ref(), &[self.vault_state.vault_bump]]];

        let cpi_context = CpiContext::new_with_signer(
            self.system_program.to_account_info(),
            Transfer {
                from: self.vault.to_account_info(),
                to: self.signer.to_account_info(),
            },
            signer_seeds,
        );

        transfer(cpi_context, amount)
    }
}

#[derive(Accounts)]
pub struct Close<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// State account is closed and its rent returned to the signer
    #[account(
        mut,
        close = signer,
        seeds = [STATE_SEED, signer.key().as_ref()],
        bump = vault_state.state_bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.key().as_ref()],
        bump = vault_state.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

// ============================================================
// Error Definitions
// ============================================================

#[error_code]
pub enum VaultError {
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Insufficient funds in vault")]
    InsufficientFunds,
    #[msg("Vault balance would fall below the rent-exempt minimum")]
    BelowRentMinimum,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_space_matches_layout() {
        assert_eq!(VaultState::INIT_SPACE, 2);
        assert_eq!(VaultState::SPACE, 3);
    }

    #[test]
    fn vault_is_scoped_to_its_state_account() {
        let owner = Pubkey::new_unique();
        let (state, vault) = find_vault_addresses(&owner);

        let (expected_state, _) = Pubkey::find_program_address(&[b"state", owner.as_ref()], &ID);
        let (expected_vault, _) = Pubkey::find_program_address(&[b"vault", state.as_ref()], &ID);

        assert_eq!(state, expected_state);
        assert_eq!(vault, expected_vault);
        assert_ne!(state, vault);
    }

    #[test]
    fn owners_get_distinct_vaults() {
        let (first_state, first_vault) = find_vault_addresses(&Pubkey::new_unique());
        let (second_state, second_vault) = find_vault_addresses(&Pubkey::new_unique());

        assert_ne!(first_state, second_state);
        assert_ne!(first_vault, second_vault);
    }
}
