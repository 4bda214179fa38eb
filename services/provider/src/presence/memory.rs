use super::DataPresence;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process oracle backed by an atomic flag.
#[derive(Debug, Default)]
pub struct InMemoryDataPresence {
    present: AtomicBool,
}

impl InMemoryDataPresence {
    /// Start with the given presence.
    #[must_use]
    pub const fn new(present: bool) -> Self {
        Self {
            present: AtomicBool::new(present),
        }
    }
}

impl DataPresence for InMemoryDataPresence {
    fn exists(&self) -> bool {
        self.present.load(Ordering::SeqCst)
    }

    fn set_present(&self) -> io::Result<()> {
        self.present.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn set_absent(&self) -> io::Result<()> {
        self.present.store(false, Ordering::SeqCst);
        Ok(())
    }
}
