//! Shared fixture for rspec driving scenarios.
//!
//! rspec requires its environment to be `Clone + Send + Sync`, which a Bevy
//! `App` is not. The fixture keeps the app behind a mutex and runs suites
//! serially so the app is only ever touched from one thread at a time.
//!
//! [`run_serial`] sets `exit_on_failure(true)`. A failed `then` step exits the
//! test process with a non-zero status, so `cargo test` reports the suite as
//! failed instead of only printing the failure.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::*;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};

/// Bevy `App` marked `Send` and `Sync` for use inside rspec closures.
#[derive(Debug)]
pub struct GuardedApp(pub App);

// SAFETY: every access goes through the fixture's mutex and suites run with
// `parallel(false)`, so the wrapped app never crosses threads concurrently.
unsafe impl Send for GuardedApp {}
unsafe impl Sync for GuardedApp {}

/// Cloneable handle to one app shared by every step of a suite.
#[derive(Debug, Clone)]
pub struct DriveFixture {
    app: Arc<Mutex<GuardedApp>>,
}

impl DriveFixture {
    /// Wraps an already-configured app.
    pub fn new(app: App) -> Self {
        Self {
            app: Arc::new(Mutex::new(GuardedApp(app))),
        }
    }

    /// Locks the app, recovering from a poisoned mutex.
    pub fn app(&self) -> MutexGuard<'_, GuardedApp> {
        self.app.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the locked app.
    pub fn with_app<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut guard = self.app();
        f(&mut guard.0)
    }
}

/// Runs an rspec suite on the current thread, one example at a time.
///
/// A failing example exits the test process with a non-zero status.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}
