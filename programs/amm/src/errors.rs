use anchor_lang::prelude::*;
use constant_product_curve::CurveError;

#[error_code]
pub enum AmmError {
    #[msg("Invalid amount: amount must be greater than zero")]
    InvalidAmount,
    #[msg("Fee must be below 10000 basis points")]
    InvalidFee,
    #[msg("Pool is locked")]
    PoolLocked,
    #[msg("Slippage exceeded")]
    SlippageExceeded,
    #[msg("Only the pool authority can do this")]
    Unauthorized,
    #[msg("Insufficient balance")]
    InsufficientBalance,
    #[msg("Pool has no liquidity")]
    NoLiquidity,
    #[msg("Curve arithmetic overflow")]
    Overflow,
    #[msg("Curve arithmetic underflow")]
    Underflow,
    #[msg("Invalid curve precision")]
    InvalidPrecision,
}

impl From<CurveError> for AmmError {
    fn from(error: CurveError) -> AmmError {
        match error {
            CurveError::InvalidPrecision => AmmError::InvalidPrecision,
            CurveError::Overflow => AmmError::Overflow,
            CurveError::Underflow => AmmError::Underflow,
            CurveError::InvalidFeeAmount => AmmError::InvalidFee,
            CurveError::InsufficientBalance => AmmError::InsufficientBalance,
            CurveError::ZeroBalance => AmmError::NoLiquidity,
            CurveError::SlippageLimitExceeded => AmmError::SlippageExceeded,
        }
    }
}
