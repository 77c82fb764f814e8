pub mod cancel;
pub mod make;
pub mod take;

pub use cancel::*;
pub use make::*;
pub use take::*;
