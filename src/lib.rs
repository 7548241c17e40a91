//! Baha Blacklist - gamer.com.tw block list maintenance
//!
//! Keeps an account's block list in sync with a shared list and removes
//! accounts that have gone inactive once the list grows too large.
//!
//! # Architecture
//!
//! - [`session`]: HTTP client, cookie jar import, login and CSRF tokens
//! - [`api`]: add, export, lookup and remove operations
//! - [`workflow`]: the update / export / clean runner
//! - [`config`]: TOML file, environment and command line settings
//! - [`cli`]: entry points used by the binaries
//!
//! # Usage
//!
//! ```bash
//! baha-blacklist -a my_account -p my_password --mode update export
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use baha_blacklist::{BlacklistClient, Settings, types::ListKind};
//!
//! # fn main() -> anyhow::Result<()> {
//! # tokio_test::block_on(async {
//! let mut settings = Settings::default();
//! settings.account.account = "my_account".to_string();
//! settings.account.password = "my_password".to_string();
//!
//! let client = BlacklistClient::new(settings)?;
//! if client.login().await {
//!     let blocked = client.export_users(ListKind::Blacklist).await;
//!     println!("{} users blocked", blocked.len());
//! }
//! # Ok(())
//! # })
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;
pub mod workflow;

pub use api::BlacklistClient;
pub use config::Settings;
pub use error::{Error, Result};
pub use session::GamerSession;
pub use workflow::{BlacklistSite, Mode};
