//! Pool pump controller library.
//!
//! Decides, once per measurement interval, whether the pool circulation
//! pump and the solar heating pump run.  The decision logic lives in
//! [`control`] and [`app`] and touches hardware only through the port
//! traits in [`app::ports`]; [`adapters`], [`drivers`] and [`sensors`]
//! supply the concrete implementations.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod mode;
pub mod sensors;
pub mod timer;
