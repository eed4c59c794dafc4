//! Terminal front end for the noughts engine
//!
//! This module provides the command-line interface for playing against the
//! minimax player and for inspecting its decisions.

pub mod commands;
pub mod config;
pub mod output;
