//! # Grimvale - Game Economy & Battle Engine for Chat Bots
//!
//! Grimvale is the persistent simulation core of a multiplayer chat-bot RPG. It owns
//! the dynamic supply/demand market, the turn-based PvE battle resolution, and the
//! durable JSON collection store the two engines commit through. The surrounding
//! chat surface (command parsing, reply formatting, session handling) is expected
//! to live in the embedding bot and call into this crate's APIs.
//!
//! ## Features
//!
//! - **Dynamic Economy**: Per-item supply/demand pressure pricing with volatility by
//!   rarity, mean reversion on a periodic tick, and rotating world events layered on
//!   top of price queries.
//! - **Turn-Based Battles**: Speed-ordered combat rounds with skills, status effects,
//!   elemental multipliers, critical/miss rolls, and job passives, capped at 20 rounds.
//! - **Durable Storage**: Atomic temp-file-then-rename collection writes serialized
//!   per collection, with reads that degrade to empty rather than failing callers.
//! - **Testable Time**: Every TTL and expiry check goes through an injected
//!   [`clock::Clock`] so tests control the wall clock.
//! - **Async Design**: Built with Tokio; engines stay synchronous and pure between a
//!   single read at the start and a single commit at the end of each operation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use grimvale::config::GameConfig;
//! use grimvale::storage::JsonStore;
//! use grimvale::rpg::economy::EconomyEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GameConfig::load("grimvale.toml").await?;
//!     let store = Arc::new(JsonStore::open("./data")?);
//!     let economy = EconomyEngine::new(store, config.economy);
//!
//!     economy.load_economy().await?;
//!     let price = economy.get_buy_price("iron_sword");
//!     println!("iron_sword costs {}g", price);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Atomic JSON collection persistence
//! - [`rpg`] - Catalogs, economy engine, battle engine, player records
//! - [`config`] - Tuning configuration with TOML loading
//! - [`clock`] - Injectable wall clock for TTL/expiry logic
//! - [`rng`] - Pure weighted-sampling and variance helpers

pub mod clock;
pub mod config;
pub mod rng;
pub mod rpg;
pub mod storage;
