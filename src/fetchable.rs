//! Per-resource load state: `Idle -> Loading -> Ready | Failed`.
//!
//! Loading and Failed keep whatever the slice held before, so a refresh or a failed refetch does
//! not blank out data that is already on screen.

pub trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fetchable<T> {
    Idle,
    Loading {
        stale: Option<T>,
    },
    Ready(T),
    Failed {
        reason: String,
        stale: Option<T>,
    },
}

// NB: hand-written so that `T` needn't be [Default]
impl<T> Default for Fetchable<T> {
    fn default() -> Self {
        Fetchable::Idle
    }
}

/// What a slice should show, checked in priority order: loading, then error, then empty, then
/// populated.
#[derive(Debug, PartialEq)]
pub enum Status<'a, T> {
    Loading,
    Failed(&'a str),
    Empty,
    Populated(&'a T),
}

impl<T> Fetchable<T> {
    pub fn begin(&mut self) {
        let stale = self.take_data();
        *self = Fetchable::Loading { stale };
    }

    pub fn resolve(&mut self, data: T) {
        *self = Fetchable::Ready(data);
    }

    /// Previous data, if any, stays in place.
    pub fn reject(&mut self, reason: impl Into<String>) {
        let stale = self.take_data();
        *self = Fetchable::Failed {
            reason: reason.into(),
            stale,
        };
    }

    pub fn reset(&mut self) {
        *self = Fetchable::Idle;
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Fetchable::Idle => None,
            Fetchable::Loading { stale } | Fetchable::Failed { stale, .. } => stale.as_ref(),
            Fetchable::Ready(data) => Some(data),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Fetchable::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetchable::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    fn take_data(&mut self) -> Option<T> {
        match std::mem::replace(self, Fetchable::Idle) {
            Fetchable::Idle => None,
            Fetchable::Loading { stale } | Fetchable::Failed { stale, .. } => stale,
            Fetchable::Ready(data) => Some(data),
        }
    }
}

impl<T: IsEmpty> Fetchable<T> {
    pub fn status(&self) -> Status<'_, T> {
        if self.is_loading() {
            return Status::Loading;
        }
        if let Some(reason) = self.error() {
            return Status::Failed(reason);
        }
        match self.data() {
            Some(data) if !data.is_empty() => Status::Populated(data),
            _ => Status::Empty,
        }
    }
}
