//! # Kalah
//!
//! The Kalah sowing game with a minimax opponent.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: pit layout, player, rule variants, board state machine
//! - [`ai`] — Agent trait, alpha-beta move search, random agent
//! - [`session`] — Driving two agents through complete games
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
