//! # Checkers Engine
//!
//! A turn-based checkers (draughts) rule engine for 6×6, 8×8 and 10×10
//! boards: legal-move generation, mandatory capture, multi-jump chains,
//! king promotion, scoring, and win/tie/forfeit detection. Rendering and
//! input are left to the host; the `checkers` binary is a console host and
//! `selfplay` runs headless random games.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, notation, rules, session controller
//! - [`ai`] — Agent trait and the random move picker
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
