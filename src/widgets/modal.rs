use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Page-level scroll state shared by everything that can lock scrolling.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    locks: Arc<AtomicUsize>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.locks.load(Ordering::SeqCst) > 0
    }

    /// Suppress page scrolling until the returned guard is dropped.
    pub fn lock_scroll(&self) -> ScrollLock {
        self.locks.fetch_add(1, Ordering::SeqCst);
        ScrollLock {
            locks: Arc::clone(&self.locks),
        }
    }
}

/// Releases its scroll lock on drop.
#[derive(Debug)]
pub struct ScrollLock {
    locks: Arc<AtomicUsize>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.locks.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    Key(Key),
    BackdropClick,
    ContentClick,
    CloseButton,
}

/// Overlay dialog state.
///
/// While open the modal holds a scroll lock and closes on Escape, a backdrop
/// click, or the close button. Clicks inside the content never reach the
/// backdrop.
#[derive(Debug)]
pub struct Modal {
    viewport: Viewport,
    title: String,
    lock: Option<ScrollLock>,
}

impl Modal {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title: String::new(),
            lock: None,
        }
    }

    pub fn open(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if self.lock.is_none() {
            self.lock = Some(self.viewport.lock_scroll());
        }
    }

    pub fn close(&mut self) {
        self.lock = None;
    }

    pub fn is_open(&self) -> bool {
        self.lock.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Feed an input event. Returns true when the event closed the modal.
    pub fn handle(&mut self, event: ModalEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        match event {
            ModalEvent::Key(Key::Escape) | ModalEvent::BackdropClick | ModalEvent::CloseButton => {
                self.close();
                true
            }
            ModalEvent::Key(_) | ModalEvent::ContentClick => false,
        }
    }
}
