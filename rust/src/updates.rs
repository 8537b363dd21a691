use crate::state::MessengerState;
use crate::Action;

#[derive(Clone, Debug)]
pub enum StoreUpdate {
    FullState { rev: u64, state: MessengerState },
}

impl StoreUpdate {
    pub fn rev(&self) -> u64 {
        match self {
            StoreUpdate::FullState { rev, .. } => *rev,
        }
    }

    pub fn state(&self) -> &MessengerState {
        match self {
            StoreUpdate::FullState { state, .. } => state,
        }
    }
}

#[derive(Debug)]
pub enum StoreMsg {
    Dispatch(Action),
    /// Reduce a batch back to back, publishing a single snapshot at the end.
    DispatchBatch(Vec<Action>),
    Shutdown,
}
