mod actions;
mod core;
mod error;
pub mod fixture;
mod logging;
mod state;
mod updates;
mod views;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;

use flume::{Receiver, Sender};

pub use crate::core::config::{load_store_config, StoreConfig, CONFIG_FILE_NAME};
pub use crate::core::{
    apply_acks, dedup_by_cid, merge_interactions, reduce, sort_interactions, DecodeFn,
    PayloadRegistry, Reducer, DEFAULT_MAX_LIFECYCLE_CHAIN,
};
pub use actions::Action;
pub use error::DecodeError;
pub use logging::init_logging;
pub use state::*;
pub use updates::*;
pub use views::*;

/// Receives every published snapshot, in order.
pub trait StateReconciler: Send + Sync + 'static {
    fn reconcile(&self, update: StoreUpdate);
}

/// Owns the reducer thread. Actions are reduced one at a time, in arrival order.
pub struct MessengerStore {
    store_tx: Sender<StoreMsg>,
    update_rx: Receiver<StoreUpdate>,
    listening: AtomicBool,
    shared_state: Arc<RwLock<MessengerState>>,
}

impl MessengerStore {
    pub fn new(data_dir: String) -> Arc<Self> {
        logging::init_logging(&data_dir);
        let config = load_store_config(&data_dir);
        tracing::info!(data_dir = %data_dir, embedded = config.embedded(), "MessengerStore::new() starting");

        let reducer = Reducer::default().with_max_chain(config.max_lifecycle_chain());
        Self::with_reducer(config.initial_state(), reducer)
    }

    /// Starts from an explicit snapshot, skipping config and logging setup.
    pub fn with_reducer(initial: MessengerState, reducer: Reducer) -> Arc<Self> {
        let (update_tx, update_rx) = flume::unbounded();
        let (store_tx, store_rx) = flume::unbounded::<StoreMsg>();
        let shared_state = Arc::new(RwLock::new(initial.clone()));

        // Single reducer thread; snapshots leave it only as clones.
        let shared_for_actor = shared_state.clone();
        thread::spawn(move || {
            let mut actor = StoreActor {
                state: initial,
                rev: 0,
                reducer,
                update_sender: update_tx,
                shared_state: shared_for_actor,
            };
            while let Ok(msg) = store_rx.recv() {
                if !actor.handle_message(msg) {
                    break;
                }
            }
            tracing::debug!("store actor stopped");
        });

        Arc::new(Self {
            store_tx,
            update_rx,
            listening: AtomicBool::new(false),
            shared_state,
        })
    }

    pub fn state(&self) -> MessengerState {
        match self.shared_state.read() {
            Ok(g) => g.clone(),
            Err(poison) => poison.into_inner().clone(),
        }
    }

    pub fn dispatch(&self, action: Action) {
        // Contract: never block caller.
        let _ = self.store_tx.send(StoreMsg::Dispatch(action));
    }

    pub fn dispatch_batch(&self, actions: Vec<Action>) {
        let _ = self.store_tx.send(StoreMsg::DispatchBatch(actions));
    }

    pub fn shutdown(&self) {
        let _ = self.store_tx.send(StoreMsg::Shutdown);
    }

    pub fn listen_for_updates(&self, reconciler: Box<dyn StateReconciler>) {
        if self
            .listening
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            // Avoid multiple listeners that would split messages.
            return;
        }

        let rx = self.update_rx.clone();
        thread::spawn(move || {
            while let Ok(update) = rx.recv() {
                reconciler.reconcile(update);
            }
        });
    }
}

struct StoreActor {
    state: MessengerState,
    rev: u64,
    reducer: Reducer,
    update_sender: Sender<StoreUpdate>,
    shared_state: Arc<RwLock<MessengerState>>,
}

impl StoreActor {
    fn handle_message(&mut self, msg: StoreMsg) -> bool {
        match msg {
            StoreMsg::Dispatch(action) => {
                self.apply(action);
                self.emit_state();
            }
            StoreMsg::DispatchBatch(actions) => {
                if actions.is_empty() {
                    return true;
                }
                for action in actions {
                    self.apply(action);
                }
                self.emit_state();
            }
            StoreMsg::Shutdown => return false,
        }
        true
    }

    fn apply(&mut self, action: Action) {
        let previous = std::mem::take(&mut self.state);
        self.state = self.reducer.reduce(previous, action);
    }

    fn commit_state_snapshot(&self, snapshot: &MessengerState) {
        match self.shared_state.write() {
            Ok(mut g) => *g = snapshot.clone(),
            Err(poison) => *poison.into_inner() = snapshot.clone(),
        }
    }

    fn emit_state(&mut self) {
        self.rev += 1;
        let snapshot = self.state.clone();
        self.commit_state_snapshot(&snapshot);
        let _ = self.update_sender.send(StoreUpdate::FullState {
            rev: self.rev,
            state: snapshot,
        });
    }
}
