use serde::Serialize;

/// Categories a flash message can be queued under. Each one is delivered
/// to views as a separate list.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FlashKind {
    SuccessMsg,
    ErrorMsg,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::SuccessMsg,
            message: message.into(),
        }
    }

    pub fn error_msg(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::ErrorMsg,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FlashMessages {
    pub success_msg: Vec<String>,
    pub error_msg: Vec<String>,
    pub error: Vec<String>,
}

impl FlashMessages {
    pub fn push(&mut self, flash: Flash) {
        match flash.kind {
            FlashKind::SuccessMsg => &mut self.success_msg,
            FlashKind::ErrorMsg => &mut self.error_msg,
            FlashKind::Error => &mut self.error,
        }.push(flash.message)
    }

    pub fn is_empty(&self) -> bool {
        self.success_msg.is_empty()
            && self.error_msg.is_empty()
            && self.error.is_empty()
    }
}
