//! Playledger Client SDK.
//!
//! This crate provides a client library for game backends and tooling to
//! talk to the playledger service.
//!
//! # Example
//!
//! ```no_run
//! use playledger_client::PlayledgerClient;
//!
//! # async fn example() -> Result<(), playledger_client::ClientError> {
//! let client = PlayledgerClient::new("http://playledger:8080");
//!
//! let result = client.register("player-1").await?;
//! assert!(result.success);
//!
//! let result = client.get_game_data("player-1").await?;
//! if result.success {
//!     println!("game data: {:?}", result.payload);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;

pub use client::{ClientOptions, PlayledgerClient};
pub use error::ClientError;
