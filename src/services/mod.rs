// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregation;
pub mod export;
pub mod storage;
pub mod store;
pub mod tracker;

pub use storage::{Snapshot, StorageAdapter};
pub use store::{ActivityStore, IdGenerator, NotFound, SequentialIds, UuidGenerator};
pub use tracker::{Persisted, Tracker};
