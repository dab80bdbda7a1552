// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-thread ambient logging context.
//!
//! Key/value pairs written through a [`ContextScope`] are visible to every
//! logger on the current thread until the scope is dropped. Dropping the
//! scope restores each touched key to the value it had before the scope
//! wrote it, on every exit path including unwinding, so nothing leaks into
//! later, unrelated events.
//!
//! Scopes nest; they must be dropped in reverse order of creation, which
//! holding them in local bindings guarantees.

use std::cell::RefCell;
use std::marker::PhantomData;

use seltzer_api::Attributes;

thread_local! {
    static CONTEXT: RefCell<Attributes> = const { RefCell::new(Attributes::new()) };
}

/// Guard owning the keys it wrote to the ambient context.
#[must_use = "the context is restored as soon as the scope is dropped"]
#[derive(Debug)]
pub struct ContextScope {
    // Prior value of every key this scope touched, in first-write order.
    saved: Vec<(String, Option<String>)>,
    // Bound to the thread whose context it modifies.
    _not_send: PhantomData<*const ()>,
}

impl ContextScope {
    /// Open a scope on the current thread.
    pub fn enter() -> Self {
        Self {
            saved: Vec::new(),
            _not_send: PhantomData,
        }
    }

    /// Set `key` to `value` for the lifetime of this scope.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        // Convert before borrowing; a conversion may itself read the context.
        let key = key.into();
        let value = value.into();
        let previous = CONTEXT.with(|c| c.borrow_mut().insert(key.clone(), value));
        if !self.saved.iter().any(|(k, _)| *k == key) {
            self.saved.push((key, previous));
        }
    }

    /// Number of distinct keys written through this scope.
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    /// Whether nothing has been written through this scope.
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        let saved = std::mem::take(&mut self.saved);
        // try_with: the thread-local may already be gone during thread exit.
        let _ = CONTEXT.try_with(|c| {
            let mut map = c.borrow_mut();
            for (key, previous) in saved.into_iter().rev() {
                match previous {
                    Some(value) => map.insert(key, value),
                    None => map.remove(&key),
                };
            }
        });
    }
}

/// Snapshot of the current thread's context.
pub fn current() -> Attributes {
    CONTEXT.with(|c| c.borrow().clone())
}

/// Value of `key` in the current thread's context.
pub fn get(key: &str) -> Option<String> {
    CONTEXT.with(|c| c.borrow().get(key).cloned())
}

/// Whether the current thread's context is empty.
pub fn is_empty() -> bool {
    CONTEXT.with(|c| c.borrow().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::thread;

    #[test]
    fn insert_visible_until_drop() {
        {
            let mut scope = ContextScope::enter();
            scope.insert("a", "1");
            assert_eq!(get("a").as_deref(), Some("1"));
            assert_eq!(scope.len(), 1);
        }
        assert!(get("a").is_none());
        assert!(is_empty());
    }

    struct Derived;

    impl From<Derived> for String {
        fn from(_: Derived) -> String {
            format!("{}-derived", get("base").unwrap_or_default())
        }
    }

    #[test]
    fn value_conversion_may_read_context() {
        let mut scope = ContextScope::enter();
        scope.insert("base", "b");
        scope.insert("copy", Derived);
        assert_eq!(get("copy").as_deref(), Some("b-derived"));
    }

    #[test]
    fn nested_scope_restores_outer_value() {
        let mut outer = ContextScope::enter();
        outer.insert("k", "outer");
        {
            let mut inner = ContextScope::enter();
            inner.insert("k", "inner");
            inner.insert("extra", "x");
            assert_eq!(get("k").as_deref(), Some("inner"));
        }
        assert_eq!(get("k").as_deref(), Some("outer"));
        assert!(get("extra").is_none());
        drop(outer);
        assert!(is_empty());
    }

    #[test]
    fn repeated_key_restores_original() {
        let mut outer = ContextScope::enter();
        outer.insert("k", "orig");
        {
            let mut scope = ContextScope::enter();
            scope.insert("k", "one");
            scope.insert("k", "two");
            assert_eq!(scope.len(), 1);
            assert_eq!(get("k").as_deref(), Some("two"));
        }
        assert_eq!(get("k").as_deref(), Some("orig"));
    }

    #[test]
    fn released_on_panic() {
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut scope = ContextScope::enter();
            scope.insert("doomed", "yes");
            panic!("boom");
        }));
        assert!(result.is_err());
        assert!(get("doomed").is_none());
    }

    #[test]
    fn context_is_per_thread() {
        let mut scope = ContextScope::enter();
        scope.insert("here", "1");
        let seen = thread::spawn(current).join().unwrap();
        assert!(seen.is_empty());
        assert_eq!(current().len(), 1);
    }

    #[test]
    fn empty_scope() {
        let scope = ContextScope::enter();
        assert!(scope.is_empty());
    }
}
