/// One region of the state tree: a payload plus the loading flag and error
/// slot every async intent drives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slice<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Slice<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            is_loading: false,
            error: None,
        }
    }

    pub(crate) fn pending(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn fulfill(&mut self, write: impl FnOnce(&mut T)) {
        self.is_loading = false;
        self.error = None;
        write(&mut self.data);
    }

    /// Payload is left untouched.
    pub(crate) fn reject(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Payload and error are left untouched.
    pub(crate) fn cancel(&mut self) {
        self.is_loading = false;
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }
}

/// How an async intent ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Fulfilled,
    Rejected(String),
    Cancelled,
}

impl Settled {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled)
    }
}
