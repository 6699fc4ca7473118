// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared, lockable containers.
//!
//! Containers take `&mut self` for mutation, so single-owner code needs no
//! locking at all. When several threads must reach the same container,
//! wrap it in [`Shared`]: one mutex per instance, cloned handles point at
//! the same container.

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::list::List;
use crate::vector::Vector;

/// Reference-counted container behind its own mutex.
#[derive(Debug, Default)]
pub struct Shared<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Block until the lock is held.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    /// Run `f` with shared access under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run `f` with exclusive access under the lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Whether both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Take the container back if this is the last handle.
    pub fn try_unwrap(self) -> Result<T, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }

    /// Lock two instances in address order and run `f` on both.
    ///
    /// Two threads calling this with the arguments swapped take the locks
    /// in the same order.
    fn with_pair<R>(&self, other: &Self, f: impl FnOnce(&T, &T) -> R) -> R {
        let self_first = Arc::as_ptr(&self.inner) < Arc::as_ptr(&other.inner);
        if self_first {
            let a = self.inner.lock();
            let b = other.inner.lock();
            f(&a, &b)
        } else {
            let b = other.inner.lock();
            let a = self.inner.lock();
            f(&a, &b)
        }
    }
}

impl Shared<List> {
    /// Compare two shared lists; the same instance is Equal without
    /// locking twice.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        self.with_pair(other, List::compare)
    }
}

impl Shared<Vector> {
    /// Compare two shared vectors; the same instance is Equal without
    /// locking twice.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        self.with_pair(other, Vector::compare)
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
