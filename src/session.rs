#[cfg(test)]
use std::cell::Cell;

use gloo_storage::{SessionStorage, Storage};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::LOADER_SESSION_KEY;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoaderSeen {
    pub seen: bool,
    pub at: i64,
}

/// Where the "loader already shown" mark lives.
pub trait LoaderFlag {
    fn is_set(&self) -> bool;
    fn mark(&self);
}

/// Browser session storage; cleared when the tab closes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionFlag;

impl LoaderFlag for SessionFlag {
    fn is_set(&self) -> bool {
        SessionStorage::get::<LoaderSeen>(LOADER_SESSION_KEY)
            .map(|record| record.seen)
            .unwrap_or(false)
    }

    fn mark(&self) {
        let record = LoaderSeen {
            seen: true,
            at: chrono::Utc::now().timestamp_millis(),
        };
        if let Err(e) = SessionStorage::set(LOADER_SESSION_KEY, record) {
            warn!("Could not persist loader flag: {}", e);
        }
    }
}

/// In-memory flag for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryFlag(Cell<bool>);

#[cfg(test)]
impl MemoryFlag {
    pub fn preset(value: bool) -> Self {
        Self(Cell::new(value))
    }
}

#[cfg(test)]
impl LoaderFlag for MemoryFlag {
    fn is_set(&self) -> bool {
        self.0.get()
    }

    fn mark(&self) {
        self.0.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_flag_marks() {
        let flag = MemoryFlag::default();
        assert!(!flag.is_set());
        flag.mark();
        assert!(flag.is_set());
        assert!(MemoryFlag::preset(true).is_set());
    }
}
