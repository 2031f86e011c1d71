/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! A type map used by middleware to pass configuration alongside a request.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

type AnyMap = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

/// A type-map of configuration data.
///
/// Each type may be stored at most once; inserting a second value of the same type replaces the
/// first and returns it.
#[derive(Default)]
pub struct PropertyBag {
    map: AnyMap,
}

impl PropertyBag {
    pub fn new() -> Self {
        PropertyBag {
            map: HashMap::new(),
        }
    }

    /// Insert a type into this `PropertyBag`.
    ///
    /// If a value of this type already existed, it will be returned.
    pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(val))
            .and_then(|boxed| boxed.downcast().ok().map(|boxed| *boxed))
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut())
    }

    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast().ok().map(|boxed| *boxed))
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBag")
            .field("entries", &self.map.len())
            .finish()
    }
}

/// A `PropertyBag` shared between a request and the middleware handling it.
#[derive(Clone, Debug, Default)]
pub struct SharedPropertyBag(Arc<Mutex<PropertyBag>>);

impl SharedPropertyBag {
    pub fn new() -> Self {
        SharedPropertyBag(Arc::new(Mutex::new(PropertyBag::new())))
    }

    /// Lock the bag for reading or writing.
    ///
    /// The guard must not be held across an `.await`.
    pub fn acquire(&self) -> MutexGuard<'_, PropertyBag> {
        // a panic while holding the lock leaves the bag in a consistent state: every
        // mutation is a single map operation
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn acquire_mut(&self) -> MutexGuard<'_, PropertyBag> {
        self.acquire()
    }
}

#[cfg(test)]
mod test {
    use super::{PropertyBag, SharedPropertyBag};

    #[derive(Debug, Eq, PartialEq)]
    struct Region(&'static str);

    #[test]
    fn insert_replaces_existing_values() {
        let mut bag = PropertyBag::new();
        assert_eq!(bag.insert(Region("us-east-1")), None);
        assert_eq!(bag.insert(Region("us-west-2")), Some(Region("us-east-1")));
        assert_eq!(bag.get::<Region>(), Some(&Region("us-west-2")));
        assert_eq!(bag.get::<u32>(), None);
        bag.get_mut::<Region>().unwrap().0 = "eu-west-1";
        assert_eq!(bag.remove::<Region>(), Some(Region("eu-west-1")));
        assert!(bag.is_empty());
    }

    #[test]
    fn shared_bag_is_visible_through_clones() {
        let bag = SharedPropertyBag::new();
        let cloned = bag.clone();
        cloned.acquire_mut().insert(5_u32);
        assert_eq!(bag.acquire().get::<u32>(), Some(&5));
    }
}
