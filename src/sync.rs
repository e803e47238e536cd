//! Poison recovery extension traits for std::sync locks
//!
//! A panic inside a listener or validator must not brick the config cache,
//! so every lock in the crate goes through these helpers.

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Extension trait for Mutex with poison recovery
pub trait MutexExt<T> {
    /// Lock the mutex, recovering from poison errors
    fn lock_recovered(&self) -> MutexGuard<'_, T>;
}

/// Extension trait for RwLock with poison recovery
pub trait RwLockExt<T> {
    /// Acquire a read lock, recovering from poison errors
    fn read_recovered(&self) -> RwLockReadGuard<'_, T>;

    /// Acquire a write lock, recovering from poison errors
    fn write_recovered(&self) -> RwLockWriteGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_recovered(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Config cache mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl<T> RwLockExt<T> for RwLock<T> {
    fn read_recovered(&self) -> RwLockReadGuard<'_, T> {
        match self.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("RwLock was poisoned (read), recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_recovered(&self) -> RwLockWriteGuard<'_, T> {
        match self.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("RwLock was poisoned (write), recovering");
                poisoned.into_inner()
            }
        }
    }
}
