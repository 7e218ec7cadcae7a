//! Signals - versioned values owned by the state graph
//!
//! A [`Signal`] holds the latest settled value of one node plus the stamp of
//! the propagation wave that last changed it. The graph bumps its wave stamp
//! once per event; a dependent node recomputes when any of its triggers
//! carries the current stamp. Reads always see the last published value.

/// Names of every signal in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalId {
    ActivePiece,
    Rotation,
    VerticalOffset,
    HorizontalOffset,
    Board,
    GameOver,
}

/// Wave stamp. `0` means "initial value, never republished".
pub type Stamp = u64;

#[derive(Debug, Clone)]
pub struct Signal<T> {
    value: T,
    changed_at: Stamp,
}

impl<T: PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            changed_at: 0,
        }
    }

    /// Latest settled value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Wave in which the value last changed.
    pub fn changed_at(&self) -> Stamp {
        self.changed_at
    }

    /// Whether the value changed during wave `stamp`.
    pub fn changed_in(&self, stamp: Stamp) -> bool {
        self.changed_at == stamp
    }

    /// Publish `value` in wave `stamp`.
    ///
    /// Publishing an equal value is a no-op and does not wake dependents.
    /// Returns whether the value changed.
    pub fn publish(&mut self, value: T, stamp: Stamp) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.changed_at = stamp;
        true
    }
}

impl<T: Copy + PartialEq> Signal<T> {
    pub fn value(&self) -> T {
        self.value
    }
}
