//! Component lifecycle hooks.
//!
//! A [`Scope`] stands in for one mounted component instance. Composables
//! register `on_mounted` / `on_before_unmount` closures on it, so attaching
//! and detaching their listeners follows the component rather than the
//! caller remembering to do it.

use std::cell::{Cell, RefCell};
use std::fmt;

use thiserror::Error;

type Hook = Box<dyn FnOnce()>;

/// Where a scope is in its life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeState {
    #[default]
    Created,
    Mounted,
    Unmounted,
}

/// Invalid lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("scope is already mounted")]
    AlreadyMounted,

    #[error("scope was never mounted")]
    NotMounted,

    #[error("scope has already been unmounted")]
    AlreadyUnmounted,
}

#[derive(Default)]
struct Hooks {
    mounted: Vec<Hook>,
    before_unmount: Vec<Hook>,
}

/// Lifecycle of one component instance: `Created → Mounted → Unmounted`.
///
/// Dropping a mounted scope runs its teardown hooks, so listeners tied to
/// the scope cannot outlive it.
#[derive(Default)]
pub struct Scope {
    state: Cell<ScopeState>,
    hooks: RefCell<Hooks>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScopeState {
        self.state.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.get() == ScopeState::Mounted
    }

    /// Run `hook` once the scope mounts. Runs immediately if it already has.
    pub fn on_mounted(&self, hook: impl FnOnce() + 'static) {
        match self.state.get() {
            ScopeState::Created => self.hooks.borrow_mut().mounted.push(Box::new(hook)),
            ScopeState::Mounted => {
                log::debug!("[scope] on_mounted registered after mount, running now");
                hook();
            }
            ScopeState::Unmounted => {
                log::debug!("[scope] on_mounted registered after unmount, dropped");
            }
        }
    }

    /// Run `hook` when the scope unmounts or is dropped while mounted.
    pub fn on_before_unmount(&self, hook: impl FnOnce() + 'static) {
        match self.state.get() {
            ScopeState::Created | ScopeState::Mounted => {
                self.hooks.borrow_mut().before_unmount.push(Box::new(hook))
            }
            ScopeState::Unmounted => {
                log::debug!("[scope] on_before_unmount registered after unmount, dropped");
            }
        }
    }

    pub fn mount(&self) -> Result<(), LifecycleError> {
        match self.state.get() {
            ScopeState::Mounted => Err(LifecycleError::AlreadyMounted),
            ScopeState::Unmounted => Err(LifecycleError::AlreadyUnmounted),
            ScopeState::Created => {
                self.state.set(ScopeState::Mounted);
                let hooks = std::mem::take(&mut self.hooks.borrow_mut().mounted);
                log::debug!("[scope] mounted, {} hook(s)", hooks.len());
                for hook in hooks {
                    hook();
                }
                Ok(())
            }
        }
    }

    pub fn unmount(&self) -> Result<(), LifecycleError> {
        match self.state.get() {
            ScopeState::Created => Err(LifecycleError::NotMounted),
            ScopeState::Unmounted => Err(LifecycleError::AlreadyUnmounted),
            ScopeState::Mounted => {
                self.teardown();
                Ok(())
            }
        }
    }

    fn teardown(&self) {
        self.state.set(ScopeState::Unmounted);
        let hooks = std::mem::take(&mut self.hooks.borrow_mut().before_unmount);
        log::debug!("[scope] unmounting, {} hook(s)", hooks.len());
        for hook in hooks {
            hook();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if self.state.get() == ScopeState::Mounted {
            self.teardown();
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks = self.hooks.borrow();
        f.debug_struct("Scope")
            .field("state", &self.state.get())
            .field("mounted_hooks", &hooks.mounted.len())
            .field("unmount_hooks", &hooks.before_unmount.len())
            .finish()
    }
}
