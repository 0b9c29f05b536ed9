//! Presentation helpers with no business logic.

pub mod form;
pub mod modal;

pub use form::{FormError, MenuItemForm};
pub use modal::{Key, Modal, ModalEvent, ScrollLock, Viewport};
