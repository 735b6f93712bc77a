mod account;
mod credits;
mod ledger;
mod money;
mod transaction;

pub use account::*;
pub use credits::*;
pub use ledger::*;
pub use money::*;
pub use transaction::*;
