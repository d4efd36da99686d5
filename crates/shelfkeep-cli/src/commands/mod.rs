pub mod book;
pub mod config;
pub mod customer;
pub mod loan;
pub mod product;
pub mod status;

pub use book::BookCommand;
pub use config::ConfigCommand;
pub use customer::CustomerCommand;
pub use loan::LoanCommand;
pub use product::ProductCommand;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print `value` as pretty JSON, or with `plain` otherwise.
pub(crate) fn emit<T, F>(json: bool, value: &T, plain: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T),
{
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
        println!("{rendered}");
    } else {
        plain(value);
    }
    Ok(())
}
