use crate::actions::Action;
use crate::state::{AppState, MessengerState, DEFAULT_ACCOUNT_ID};

use super::Outcome;

/// Expected lifecycle edges. Anything else is logged, never rejected.
static ALLOWED_TRANSITIONS: &[(AppState, AppState)] = &[
    (AppState::Closed, AppState::OpeningWaitingForDaemon),
    (AppState::Closed, AppState::OpeningWaitingForClients),
    (AppState::OpeningWaitingForDaemon, AppState::OpeningWaitingForClients),
    (AppState::OpeningWaitingForDaemon, AppState::OpeningListingEvents),
    (AppState::OpeningWaitingForDaemon, AppState::Closed),
    (AppState::OpeningWaitingForClients, AppState::OpeningListingEvents),
    (AppState::OpeningWaitingForClients, AppState::Closed),
    (AppState::OpeningListingEvents, AppState::OpeningGettingLocalSettings),
    (AppState::OpeningListingEvents, AppState::StreamDone),
    (AppState::OpeningListingEvents, AppState::Closed),
    (AppState::OpeningGettingLocalSettings, AppState::OpeningMarkConversationsAsClosed),
    (AppState::OpeningGettingLocalSettings, AppState::Closed),
    (AppState::OpeningMarkConversationsAsClosed, AppState::Ready),
    (AppState::OpeningMarkConversationsAsClosed, AppState::GetStarted),
    (AppState::OpeningMarkConversationsAsClosed, AppState::Closed),
    (AppState::GetStarted, AppState::OnBoarding),
    (AppState::GetStarted, AppState::Ready),
    (AppState::GetStarted, AppState::Closed),
    (AppState::OnBoarding, AppState::Ready),
    (AppState::OnBoarding, AppState::Closed),
    (AppState::Ready, AppState::OnBoarding),
    (AppState::Ready, AppState::StreamDone),
    (AppState::Ready, AppState::DeletingClosingDaemon),
    (AppState::Ready, AppState::Closed),
    (AppState::StreamDone, AppState::Closed),
    (AppState::DeletingClosingDaemon, AppState::DeletingClearingStorage),
    (AppState::DeletingClearingStorage, AppState::Closed),
];

impl AppState {
    pub fn can_transition_to(self, next: AppState) -> bool {
        self == next
            || ALLOWED_TRANSITIONS
                .iter()
                .any(|(from, to)| *from == self && *to == next)
    }
}

pub(super) fn check_transition(action: &'static str, from: AppState, to: AppState) {
    if !from.can_transition_to(to) {
        tracing::warn!(action, ?from, ?to, "unexpected app state change");
    }
}

pub(super) fn request_open(mut state: MessengerState) -> Outcome {
    let Some(next) = state.next_selected_account.take() else {
        tracing::debug!("open requested without a pending account");
        return Outcome::done(state);
    };
    tracing::info!(account = %next, embedded = state.embedded, "opening account");
    state.selected_account = Some(next);
    state.app_state = if state.embedded {
        AppState::OpeningWaitingForDaemon
    } else {
        AppState::OpeningWaitingForClients
    };
    Outcome::done(state)
}

pub(super) fn enter(mut state: MessengerState, app_state: AppState) -> Outcome {
    state.app_state = app_state;
    Outcome::done(state)
}

/// Picks the post-bootstrap screen: onboarding for fresh accounts, `Ready` otherwise.
pub(super) fn opening_complete(mut state: MessengerState) -> Outcome {
    let lacks_display_name = state
        .account
        .as_ref()
        .map_or(true, |account| account.display_name.trim().is_empty());
    let needs_get_started = state.is_new_account
        || state.accounts.is_empty()
        || (state.accounts.len() == 1 && lacks_display_name);

    state.app_state = if needs_get_started {
        AppState::GetStarted
    } else {
        AppState::Ready
    };
    state.is_new_account = false;
    Outcome::done(state)
}

pub(super) fn set_on_boarding(mut state: MessengerState) -> Outcome {
    if state.account.is_some() {
        state.app_state = AppState::OnBoarding;
    } else {
        tracing::debug!("onboarding requested before an account was loaded");
    }
    Outcome::done(state)
}

pub(super) fn select_next_account(mut state: MessengerState, account_id: String) -> Outcome {
    if !state.embedded {
        tracing::debug!(account = %account_id, "account switch requires embedded mode");
        return Outcome::done(state);
    }
    if state.selected_account.as_deref() == Some(account_id.as_str()) {
        tracing::debug!(account = %account_id, "account already selected");
        return Outcome::done(state);
    }
    state.next_selected_account = Some(account_id);
    state.is_new_account = false;
    Outcome::then(state, Action::SetClosed)
}

pub(super) fn account_created(mut state: MessengerState, account_id: String) -> Outcome {
    state.next_selected_account = Some(account_id);
    state.is_new_account = true;
    Outcome::then(state, Action::SetClosed)
}

pub(super) fn bridge_closed(mut state: MessengerState) -> Outcome {
    if state.app_state == AppState::DeletingClosingDaemon {
        state.app_state = AppState::DeletingClearingStorage;
        return Outcome::done(state);
    }
    Outcome::then(state, Action::SetClosed)
}

pub(super) fn storage_cleared(mut state: MessengerState) -> Outcome {
    if let Some(deleted) = state.selected_account.take() {
        state.accounts.retain(|a| a.account_id != deleted);
        tracing::info!(account = %deleted, "account storage cleared");
    }
    state.next_selected_account = None;
    state.is_new_account = false;
    Outcome::then(state, Action::SetClosed)
}

pub(super) fn stream_done(mut state: MessengerState) -> Outcome {
    state.app_state = AppState::StreamDone;
    state.stream_in_progress = None;
    Outcome::done(state)
}

/// Tears the session down to a fresh snapshot, keeping what identifies the device.
pub(super) fn set_closed(state: MessengerState) -> Outcome {
    let next_selected_account = if state.embedded {
        state.next_selected_account
    } else {
        Some(DEFAULT_ACCOUNT_ID.to_string())
    };
    let reset = MessengerState {
        app_state: AppState::Closed,
        embedded: state.embedded,
        daemon_address: state.daemon_address,
        accounts: state.accounts,
        is_new_account: state.is_new_account,
        next_selected_account,
        ..MessengerState::initial()
    };

    if reset.next_selected_account.is_some() {
        return Outcome::then(reset, Action::RequestOpen);
    }
    Outcome::done(reset)
}
