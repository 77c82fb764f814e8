pub mod deposit;
pub mod initialize;
pub mod lock;
pub mod swap;
pub mod withdraw;

pub use deposit::*;
pub use initialize::*;
pub use lock::*;
pub use swap::*;
pub use withdraw::*;
