use thiserror::Error;

use crate::PointerEventKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("Unknown pointer event {0:?}")]
    UnknownEvent(String),
    #[error("Listener is not subscribed to {0:?}")]
    NotSubscribed(PointerEventKind),
    #[error("Unknown mouse button {0:?}")]
    UnknownButton(String),
    #[error("No capture target is bound")]
    NoTarget,
}
