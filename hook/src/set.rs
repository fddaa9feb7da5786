//! Hook registration.

use std::collections::HashMap;
use std::fmt;
use veto_core::Attributes;

use crate::HookResult;

/// A validation check over an instance's field map.
pub type HookFn = Box<dyn Fn(&Attributes) -> HookResult + Send + Sync>;

/// Hooks registered by (type name, method name).
#[derive(Default)]
pub struct HookSet {
    hooks: HashMap<(String, String), HookFn>,
}

impl HookSet {
    /// Create an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook for a method. Replaces any previous registration.
    pub fn register<F>(&mut self, type_name: impl Into<String>, method: impl Into<String>, hook: F)
    where
        F: Fn(&Attributes) -> HookResult + Send + Sync + 'static,
    {
        self.hooks
            .insert((type_name.into(), method.into()), Box::new(hook));
    }

    /// Get the hook registered for a method.
    pub fn get(&self, type_name: &str, method: &str) -> Option<&HookFn> {
        self.hooks
            .get(&(type_name.to_string(), method.to_string()))
    }

    /// Check if a hook is registered for a method.
    pub fn contains(&self, type_name: &str, method: &str) -> bool {
        self.get(type_name, method).is_some()
    }

    /// Get the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .hooks
            .keys()
            .map(|(t, m)| format!("{}.{}", t, m))
            .collect();
        keys.sort_unstable();
        f.debug_struct("HookSet").field("hooks", &keys).finish()
    }
}
