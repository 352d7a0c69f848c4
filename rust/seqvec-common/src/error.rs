use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, len }.into())
    }

    pub fn allocation_failed(slots: usize, bytes: usize) -> Error {
        Error(ErrorKind::AllocationFailed { slots, bytes }.into())
    }

    pub fn capacity_overflow(slots: usize) -> Error {
        Error(ErrorKind::CapacityOverflow { slots }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to allocate storage for {slots} slots ({bytes} bytes)")]
    AllocationFailed { slots: usize, bytes: usize },

    #[error("requested capacity of {slots} slots overflows the allocatable size")]
    CapacityOverflow { slots: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
