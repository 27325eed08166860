//! Core components, types, and utilities for the howdy-hub-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Process configuration from action inputs and runner environment.
//! - Per-repository bot configuration and its defaults.
//! - Webhook event payloads.
//! - Welcome templates and workflow-command output.

pub mod actions;
pub mod config;
pub mod event;
pub mod repo_config;
pub mod templates;
pub mod types;
