mod loader;
mod writer;

pub use loader::{BankFormat, LoadError, load_bank, parse_bank};
pub use writer::{WriteError, write_versions};
