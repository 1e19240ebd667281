// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::collections::HashMap;
use std::sync::Arc;

use crate::Error;

use super::{PaintBrush, SharedBrush};

/// An opaque value that identifies a subscriber.
pub type ClientKey = usize;

/// A brush change callback.
///
/// Receives a brush name and its new state.
pub type BrushCallback = Arc<dyn Fn(&str, &PaintBrush) + Send + Sync>;

struct Subscriber {
    key: ClientKey,
    callback: BrushCallback,
}

impl Subscriber {
    fn matches(&self, key: ClientKey, callback: &BrushCallback) -> bool {
        self.key == key && Arc::ptr_eq(&self.callback, callback)
    }
}

struct Entry {
    brush: SharedBrush,
    subscribers: Vec<Subscriber>,
}


/// A table of named brushes.
///
/// Clients can subscribe to a brush to be notified when it's reconfigured.
#[derive(Default)]
pub struct BrushRegistry {
    entries: HashMap<String, Entry>,
}

impl BrushRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        BrushRegistry::default()
    }

    /// Registers a new brush.
    pub fn create(&mut self, name: &str, brush: PaintBrush) -> Result<SharedBrush, Error> {
        if self.entries.contains_key(name) {
            return Err(Error::BrushExists(name.to_string()));
        }

        let brush = SharedBrush::new(brush);
        self.entries.insert(name.to_string(), Entry {
            brush: brush.clone(),
            subscribers: Vec::new(),
        });

        log::debug!("created paint brush '{}'", name);
        Ok(brush)
    }

    /// Returns a handle to a named brush.
    pub fn get(&self, name: &str) -> Result<SharedBrush, Error> {
        self.entry(name).map(|e| e.brush.clone())
    }

    /// Removes a brush from the registry.
    ///
    /// Outstanding handles keep the brush alive.
    pub fn delete(&mut self, name: &str) -> Result<(), Error> {
        match self.entries.remove(name) {
            Some(_) => Ok(()),
            None => Err(Error::BrushNotFound(name.to_string())),
        }
    }

    /// Returns sorted brush names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Checks that the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a change callback.
    ///
    /// Registering the same callback with the same key twice does nothing.
    pub fn subscribe(&mut self, name: &str, key: ClientKey, callback: BrushCallback) -> Result<(), Error> {
        let entry = self.entry_mut(name)?;
        if !entry.subscribers.iter().any(|s| s.matches(key, &callback)) {
            entry.subscribers.push(Subscriber { key, callback });
        }

        Ok(())
    }

    /// Removes a change callback.
    ///
    /// Returns `false` when the pair wasn't registered.
    pub fn unsubscribe(&mut self, name: &str, key: ClientKey, callback: &BrushCallback) -> Result<bool, Error> {
        let entry = self.entry_mut(name)?;
        let len = entry.subscribers.len();
        entry.subscribers.retain(|s| !s.matches(key, callback));
        Ok(entry.subscribers.len() != len)
    }

    /// Returns the number of subscribers of a brush.
    pub fn subscriber_count(&self, name: &str) -> Result<usize, Error> {
        self.entry(name).map(|e| e.subscribers.len())
    }

    /// Modifies a brush and notifies its subscribers.
    ///
    /// `f` is applied to a copy, so when it fails the brush is left unchanged
    /// and nobody is notified.
    pub fn configure<F>(&self, name: &str, f: F) -> Result<(), Error>
        where F: FnOnce(&mut PaintBrush) -> Result<(), Error>
    {
        let entry = self.entry(name)?;
        let mut brush = entry.brush.snapshot();
        f(&mut brush)?;
        *entry.brush.write() = brush.clone();

        for s in &entry.subscribers {
            (s.callback)(name, &brush);
        }

        Ok(())
    }

    fn entry(&self, name: &str) -> Result<&Entry, Error> {
        self.entries.get(name).ok_or_else(|| Error::BrushNotFound(name.to_string()))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut Entry, Error> {
        self.entries.get_mut(name).ok_or_else(|| Error::BrushNotFound(name.to_string()))
    }
}

impl core::fmt::Debug for BrushRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrushRegistry")
            .field("names", &self.names())
            .finish()
    }
}
