//! Command implementations for the velotrace CLI.

mod analyze;
mod batch;
mod extract;
mod init;

// Re-export all command functions
pub use analyze::cmd_analyze;
pub use batch::cmd_batch;
pub use extract::cmd_extract;
pub use init::cmd_init;
