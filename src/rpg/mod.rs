//! Game systems: catalogs, market, combat, and player progression.
//!
//! Layout mirrors the data flow: [`items`] and [`monsters`] are read-only
//! registries; [`economy`] owns the live market on top of the item catalog;
//! [`battle`] resolves encounters between a [`player::PlayerRecord`] and a
//! scaled monster; [`status`] and [`skills`] are the combat vocabulary both
//! sides share. Nothing in here performs I/O except the economy engine's
//! read-at-start / commit-at-end calls into the store.

pub mod battle;
pub mod economy;
pub mod errors;
pub mod items;
pub mod monsters;
pub mod player;
pub mod skills;
pub mod status;
pub mod types;

pub use errors::GameError;
pub use types::{Element, ItemKind, Rarity, StatBonus};
