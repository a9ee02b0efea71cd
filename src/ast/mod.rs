pub mod builders;
pub mod cond;
pub mod expr;
pub mod operators;
pub mod sql;
pub mod values;

pub use self::cond::{Clause, Condition};
pub use self::expr::Expr;
pub use self::operators::{BinaryOp, BoolOp, CompareOp};
pub use self::sql::{SqlFragment, SqlPart};
pub use self::values::Value;
