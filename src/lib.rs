// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitTrack: personal activity and goal tracking
//!
//! This crate provides the tracking core (activity store, goals, derived
//! statistics, CSV export, snapshot persistence) and a local JSON API the
//! dashboard front end talks to.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use error::AppError;
use services::Tracker;
use std::sync::{Mutex, MutexGuard};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tracker: Mutex<Tracker>,
}

impl AppState {
    pub fn new(config: Config, tracker: Tracker) -> Self {
        Self {
            config,
            tracker: Mutex::new(tracker),
        }
    }

    /// Exclusive access to the tracker for one request.
    pub fn tracker(&self) -> Result<MutexGuard<'_, Tracker>, AppError> {
        self.tracker
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Tracker lock poisoned")))
    }
}
