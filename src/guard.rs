//! Reference-identity cycle detection for encoding.
//!
//! Encoding walks the instance graph depth first. Each record or collection
//! pushes its identity when entered and pops it when done, so the guard holds
//! exactly the current path from the root. Meeting an identity already on that
//! path means the graph loops back on itself.
//!
//! Because only the active path is tracked, a node reached twice through
//! different branches (a diamond) is fine.
//!
//! A guard built with [`CycleGuard::with_max_depth`] also refuses to enter
//! more instances than its limit, each of which becomes one nesting level of
//! the encoded value.
//!
//! ```rust
//! use object_notation::{CycleGuard, Error};
//!
//! let shared = vec![1, 2, 3];
//! let mut guard = CycleGuard::new();
//!
//! guard.enter(&shared, "Shared").unwrap();
//! assert_eq!(guard.enter(&shared, "Shared"), Err(Error::circular_reference("Shared")));
//! guard.leave();
//!
//! // Entering again after leaving is a second visit, not a cycle.
//! assert!(guard.scope(&shared, "Shared", |_| Ok(())).is_ok());
//! ```

use crate::{Error, Result};
use std::any::TypeId;

/// Storage address plus concrete type. A record and its first field share an
/// address, the type keeps them apart.
type Identity = (usize, TypeId);

/// The stack of instances currently being encoded.
#[derive(Debug, Default)]
pub struct CycleGuard {
    active: Vec<Identity>,
    max_depth: Option<usize>,
}

impl CycleGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A guard that also fails with [`Error::TooDeep`] past `max_depth` levels.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        CycleGuard {
            active: Vec::new(),
            max_depth: Some(max_depth),
        }
    }

    fn identity<T: 'static>(instance: &T) -> Identity {
        (instance as *const T as usize, TypeId::of::<T>())
    }

    /// Pushes `instance`, failing if it is already being encoded or the
    /// depth limit is reached.
    pub fn enter<T: 'static>(&mut self, instance: &T, type_name: &str) -> Result<()> {
        let id = Self::identity(instance);
        if self.active.contains(&id) {
            return Err(Error::circular_reference(type_name));
        }
        if let Some(limit) = self.max_depth {
            if self.active.len() >= limit {
                return Err(Error::too_deep(limit));
            }
        }
        self.active.push(id);
        Ok(())
    }

    /// Pops the most recently entered instance.
    pub fn leave(&mut self) {
        self.active.pop();
    }

    /// Runs `f` with `instance` entered, leaving again whatever `f` returns.
    pub fn scope<T: 'static, R>(
        &mut self,
        instance: &T,
        type_name: &str,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.enter(instance, type_name)?;
        let result = f(self);
        self.leave();
        result
    }

    /// Number of instances on the active path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.active.len()
    }
}
