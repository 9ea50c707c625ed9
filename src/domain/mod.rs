mod entry;
mod ledger;
mod validation;

pub use entry::*;
pub use ledger::*;
pub use validation::*;
