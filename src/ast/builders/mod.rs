pub mod conditions;
pub mod exprs;

pub use self::conditions::*;
pub use self::exprs::*;
