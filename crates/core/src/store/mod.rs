mod error;
mod keys;
mod traits;

pub use error::{Result, StoreError};
pub use keys::{LEDGER_KEY, TOKEN_KEY};
pub use traits::{CasOutcome, KvStore};
