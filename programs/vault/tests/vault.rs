//! End-to-end tests against the compiled program.
//!
//! Build the program first (`anchor build` or `cargo build-sbf`) so that
//! `target/deploy/vault.so` exists.

use std::str::FromStr;

use anchor_lang::AccountDeserialize;
use litesvm::LiteSVM;
use solana_sdk::{
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

const PROGRAM_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../target/deploy/vault.so");

const INITIAL_BALANCE: u64 = 10_000_000;
const DEPOSIT: u64 = 2_000_000;
const WITHDRAW: u64 = 1_000_000;

const ACCOUNT_ALREADY_IN_USE: u32 = 0;
const ACCOUNT_NOT_INITIALIZED: u32 = 3012;

// VaultError codes
const INVALID_AMOUNT: u32 = 6000;
const INSUFFICIENT_FUNDS: u32 = 6001;
const BELOW_RENT_MINIMUM: u32 = 6002;

fn program_id() -> Pubkey {
    Pubkey::new_from_array(vault::ID.to_bytes())
}

fn system_program() -> Pubkey {
    Pubkey::from_str("11111111111111111111111111111111").unwrap()
}

fn custom(code: u32) -> TransactionError {
    TransactionError::InstructionError(0, InstructionError::Custom(code))
}

struct Fixture {
    svm: LiteSVM,
    owner: Keypair,
    state: Pubkey,
    vault: Pubkey,
}

impl Fixture {
    fn new() -> Self {
        let mut svm = LiteSVM::new();
        svm.add_program_from_file(program_id(), PROGRAM_PATH)
            .expect("vault.so missing, build the program first");

        let owner = Keypair::new();
        svm.airdrop(&owner.pubkey(), INITIAL_BALANCE).unwrap();

        let anchor_owner = anchor_lang::prelude::Pubkey::new_from_array(owner.pubkey().to_bytes());
        let (state, vault) = vault::find_vault_addresses(&anchor_owner);

        Self {
            svm,
            owner,
            state: Pubkey::new_from_array(state.to_bytes()),
            vault: Pubkey::new_from_array(vault.to_bytes()),
        }
    }

    fn send(&mut self, discriminator: u8, amount: Option<u64>) -> Result<(), TransactionError> {
        let mut data = vec![discriminator];
        if let Some(amount) = amount {
            data.extend_from_slice(&amount.to_le_bytes());
        }

        let ix = Instruction {
            program_id: program_id(),
            accounts: vec![
                AccountMeta::new(self.owner.pubkey(), true),
                AccountMeta::new(self.state, false),
                AccountMeta::new(self.vault, false),
                AccountMeta::new_readonly(system_program(), false),
            ],
            data,
        };

        self.svm.expire_blockhash();
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.owner.pubkey()),
            &[&self.owner],
            self.svm.latest_blockhash(),
        );
        self.svm
            .send_transaction(tx)
            .map(|_| ())
            .map_err(|failed| failed.err)
    }

    fn initialize(&mut self) -> Result<(), TransactionError> {
        self.send(0, None)
    }

    fn deposit(&mut self, amount: u64) -> Result<(), TransactionError> {
        self.send(1, Some(amount))
    }

    fn withdraw(&mut self, amount: u64) -> Result<(), TransactionError> {
        self.send(2, Some(amount))
    }

    fn close(&mut self) -> Result<(), TransactionError> {
        self.send(3, None)
    }

    fn lamports(&self, address: &Pubkey) -> u64 {
        self.svm.get_account(address).map_or(0, |account| account.lamports)
    }
}

#[test]
fn initialize_records_both_bumps() {
    let mut fx = Fixture::new();

    fx.initialize().unwrap();

    let account = fx.svm.get_account(&fx.state).unwrap();
    assert_eq!(account.owner, program_id());

    let state = vault::VaultState::try_deserialize(&mut account.data.as_slice()).unwrap();
    let (_, state_bump) = Pubkey::find_program_address(
        &[vault::STATE_SEED, fx.owner.pubkey().as_ref()],
        &program_id(),
    );
    let (_, vault_bump) =
        Pubkey::find_program_address(&[vault::VAULT_SEED, fx.state.as_ref()], &program_id());

    assert_eq!(state.state_bump, state_bump);
    assert_eq!(state.vault_bump, vault_bump);
}

#[test]
fn initialize_twice_fails() {
    let mut fx = Fixture::new();

    fx.initialize().unwrap();
    assert_eq!(fx.initialize(), Err(custom(ACCOUNT_ALREADY_IN_USE)));
}

#[test]
fn deposit_withdraw_close_lifecycle() {
    let mut fx = Fixture::new();
    fx.initialize().unwrap();

    fx.deposit(DEPOSIT).unwrap();
    assert_eq!(fx.lamports(&fx.vault), DEPOSIT);

    fx.withdraw(WITHDRAW).unwrap();
    assert_eq!(fx.lamports(&fx.vault), DEPOSIT - WITHDRAW);

    fx.close().unwrap();
    assert_eq!(fx.lamports(&fx.vault), 0);
    assert_eq!(fx.lamports(&fx.state), 0);

    assert_eq!(fx.deposit(DEPOSIT), Err(custom(ACCOUNT_NOT_INITIALIZED)));
}

#[test]
fn withdraw_can_empty_the_vault() {
    let mut fx = Fixture::new();
    fx.initialize().unwrap();
    fx.deposit(DEPOSIT).unwrap();

    fx.withdraw(DEPOSIT).unwrap();

    assert_eq!(fx.lamports(&fx.vault), 0);
    // The state account survives until close
    assert!(fx.lamports(&fx.state) > 0);
}

#[test]
fn close_on_empty_vault_only_drops_state() {
    let mut fx = Fixture::new();
    fx.initialize().unwrap();

    fx.close().unwrap();

    assert_eq!(fx.lamports(&fx.vault), 0);
    assert_eq!(fx.lamports(&fx.state), 0);
}

#[test]
fn deposit_requires_initialized_state() {
    let mut fx = Fixture::new();

    assert_eq!(fx.deposit(DEPOSIT), Err(custom(ACCOUNT_NOT_INITIALIZED)));
}

#[test]
fn zero_amounts_are_rejected() {
    let mut fx = Fixture::new();
    fx.initialize().unwrap();

    assert_eq!(fx.deposit(0), Err(custom(INVALID_AMOUNT)));
    fx.deposit(DEPOSIT).unwrap();
    assert_eq!(fx.withdraw(0), Err(custom(INVALID_AMOUNT)));
    assert_eq!(fx.lamports(&fx.vault), DEPOSIT);
}

#[test]
fn withdraw_above_balance_is_rejected() {
    let mut fx = Fixture::new();
    fx.initialize().unwrap();
    fx.deposit(DEPOSIT).unwrap();

    assert_eq!(fx.withdraw(DEPOSIT + 1), Err(custom(INSUFFICIENT_FUNDS)));
    assert_eq!(fx.lamports(&fx.vault), DEPOSIT);
}

#[test]
fn vault_never_holds_less_than_rent_minimum() {
    let mut fx = Fixture::new();
    fx.initialize().unwrap();

    // 0-byte accounts need 890_880 lamports to be rent-exempt
    assert_eq!(fx.deposit(100_000), Err(custom(BELOW_RENT_MINIMUM)));

    fx.deposit(DEPOSIT).unwrap();
    assert_eq!(fx.withdraw(1_500_000), Err(custom(BELOW_RENT_MINIMUM)));
    assert_eq!(fx.lamports(&fx.vault), DEPOSIT);

    // Once the vault holds enough, smaller top-ups are fine
    fx.deposit(1_000).unwrap();
    assert_eq!(fx.lamports(&fx.vault), DEPOSIT + 1_000);
}

#[test]
fn withdraw_down_to_rent_minimum_is_allowed() {
    let mut fx = Fixture::new();
    fx.initialize().unwrap();
    fx.deposit(DEPOSIT).unwrap();

    fx.withdraw(DEPOSIT - 890_880).unwrap();
    assert_eq!(fx.lamports(&fx.vault), 890_880);

    // One more lamport would leave the vault below the floor
    assert_eq!(fx.withdraw(1), Err(custom(BELOW_RENT_MINIMUM)));
    fx.withdraw(890_880).unwrap();
    assert_eq!(fx.lamports(&fx.vault), 0);
}
