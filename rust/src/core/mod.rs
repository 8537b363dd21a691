mod acks;
pub(crate) mod config;
mod decode;
mod handlers;
mod lifecycle;
mod merge;

use std::collections::VecDeque;
use std::sync::OnceLock;

use crate::actions::Action;
use crate::state::{AppState, MessengerState};

pub use acks::apply_acks;
pub use decode::{DecodeFn, PayloadRegistry};
pub use merge::{dedup_by_cid, merge_interactions, sort_interactions};

/// Upper bound on chained lifecycle steps triggered by a single action.
pub const DEFAULT_MAX_LIFECYCLE_CHAIN: usize = 8;

/// Result of one handler: the next snapshot plus lifecycle steps to run after it.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub(crate) state: MessengerState,
    pub(crate) chain: Vec<Action>,
}

impl Outcome {
    pub(crate) fn done(state: MessengerState) -> Self {
        Self {
            state,
            chain: vec![],
        }
    }

    pub(crate) fn then(state: MessengerState, next: Action) -> Self {
        Self {
            state,
            chain: vec![next],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reducer {
    registry: PayloadRegistry,
    max_chain: usize,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(PayloadRegistry::standard())
    }
}

impl Reducer {
    pub fn new(registry: PayloadRegistry) -> Self {
        Self {
            registry,
            max_chain: DEFAULT_MAX_LIFECYCLE_CHAIN,
        }
    }

    pub fn with_max_chain(mut self, max_chain: usize) -> Self {
        self.max_chain = max_chain.max(1);
        self
    }

    pub fn registry(&self) -> &PayloadRegistry {
        &self.registry
    }

    /// Applies `action` and any lifecycle steps it chains, in order.
    ///
    /// Every step is checked against the lifecycle edge table; unexpected
    /// transitions are logged and kept.
    pub fn reduce(&self, state: MessengerState, action: Action) -> MessengerState {
        if action.is_lifecycle() {
            tracing::info!(action = action.tag(), from = ?state.app_state, "lifecycle");
        } else {
            tracing::debug!(action = action.tag(), "reduce");
        }

        let mut state = state;
        let mut pending = VecDeque::from([action]);
        let mut steps = 0usize;
        while let Some(action) = pending.pop_front() {
            if steps >= self.max_chain {
                tracing::warn!(
                    action = action.tag(),
                    dropped = pending.len() + 1,
                    "lifecycle chain too long, stopping"
                );
                break;
            }
            steps += 1;

            let from = state.app_state;
            let tag = action.tag();
            let Outcome { state: next, chain } = self.apply(state, action);
            lifecycle::check_transition(tag, from, next.app_state);
            state = next;

            for follow_up in chain.into_iter().rev() {
                tracing::debug!(after = tag, action = follow_up.tag(), "chained");
                pending.push_front(follow_up);
            }
        }
        state
    }

    fn apply(&self, state: MessengerState, action: Action) -> Outcome {
        match action {
            // Protocol stream events
            Action::ConversationUpdated { conversation } => {
                handlers::conversation_updated(state, conversation)
            }
            Action::AccountUpdated { account } => handlers::account_updated(state, account),
            Action::ContactUpdated { contact } => handlers::contact_updated(state, contact),
            Action::MediaUpdated { media } => handlers::media_updated(state, media),
            Action::MemberUpdated { member } => handlers::member_updated(state, member),
            Action::DeviceUpdated => {
                tracing::info!("ignored event type DeviceUpdated");
                Outcome::done(state)
            }
            Action::ConversationPartialLoad {
                conversation_public_key,
                interactions,
                medias,
            } => handlers::partial_load(
                &self.registry,
                state,
                conversation_public_key,
                interactions,
                medias,
            ),
            Action::InteractionUpdated { interaction } => {
                handlers::interaction_updated(&self.registry, state, interaction)
            }
            Action::InteractionDeleted {
                cid,
                conversation_public_key,
            } => handlers::interaction_deleted(state, cid, conversation_public_key),
            Action::ListEnded => handlers::list_ended(state),
            Action::Unknown { event_kind } => {
                tracing::warn!(%event_kind, "unknown action type");
                Outcome::done(state)
            }

            // Stream status
            Action::SetStreamError { error } => handlers::set_stream_error(state, error),
            Action::SetStreamInProgress { progress } => {
                handlers::set_stream_in_progress(state, progress)
            }
            Action::SetStreamDone => lifecycle::stream_done(state),

            // Notifications
            Action::AddNotificationInhibitor { inhibitor } => {
                handlers::add_notification_inhibitor(state, inhibitor)
            }
            Action::RemoveNotificationInhibitor { inhibitor } => {
                handlers::remove_notification_inhibitor(state, inhibitor)
            }

            // Demo data
            Action::AddSyntheticData {
                conversations,
                contacts,
                interactions,
                members,
            } => handlers::add_synthetic_data(state, conversations, contacts, interactions, members),
            Action::DeleteSyntheticData => handlers::delete_synthetic_data(state),

            // Settings
            Action::SetDaemonAddress { address } => handlers::set_daemon_address(state, address),
            Action::SetPersistentOptions { options } => {
                handlers::set_persistent_options(state, options)
            }
            Action::SetAccounts { accounts } => handlers::set_accounts(state, accounts),

            // Lifecycle
            Action::RequestOpen => lifecycle::request_open(state),
            Action::DaemonReady => {
                lifecycle::enter(state, AppState::OpeningWaitingForClients)
            }
            Action::ClientsReady => {
                lifecycle::enter(state, AppState::OpeningListingEvents)
            }
            Action::GettingLocalSettings => {
                lifecycle::enter(state, AppState::OpeningGettingLocalSettings)
            }
            Action::MarkingConversationsClosed => lifecycle::enter(
                state,
                AppState::OpeningMarkConversationsAsClosed,
            ),
            Action::OpeningComplete => lifecycle::opening_complete(state),
            Action::SetOnBoarding => lifecycle::set_on_boarding(state),
            Action::SelectNextAccount { account_id } => {
                lifecycle::select_next_account(state, account_id)
            }
            Action::AccountCreated { account_id } => lifecycle::account_created(state, account_id),
            Action::BridgeClosed => lifecycle::bridge_closed(state),
            Action::DeleteAccount => {
                lifecycle::enter(state, AppState::DeletingClosingDaemon)
            }
            Action::StorageCleared => lifecycle::storage_cleared(state),
            Action::SetClosed => lifecycle::set_closed(state),
        }
    }
}

fn default_reducer() -> &'static Reducer {
    static DEFAULT: OnceLock<Reducer> = OnceLock::new();
    DEFAULT.get_or_init(Reducer::default)
}

/// Reduces one action with the standard payload registry.
pub fn reduce(state: MessengerState, action: Action) -> MessengerState {
    default_reducer().reduce(state, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        Account, AccountMetadata, AppState, Contact, Conversation, InteractionType, Media,
        Member, RawInteraction, DEFAULT_ACCOUNT_ID,
    };

    const CONV: &str = "conv-1";

    fn raw(cid: &str, sent_date: i64, kind: InteractionType) -> RawInteraction {
        let payload = match kind {
            InteractionType::Acknowledge => serde_json::json!({}),
            InteractionType::SetUserInfo => serde_json::json!({ "display_name": "alice" }),
            _ => serde_json::json!({ "body": format!("msg {cid}") }),
        };
        RawInteraction {
            cid: cid.into(),
            conversation_public_key: CONV.into(),
            type_tag: kind.tag(),
            payload: serde_json::to_vec(&payload).unwrap(),
            sent_date,
            acknowledged: false,
            target_cid: None,
            is_mine: true,
            member_public_key: None,
        }
    }

    fn ack(cid: &str, sent_date: i64, target: &str) -> RawInteraction {
        let mut a = raw(cid, sent_date, InteractionType::Acknowledge);
        a.target_cid = Some(target.into());
        a
    }

    fn conversation(key: &str, is_open: bool) -> Conversation {
        Conversation {
            public_key: key.into(),
            display_name: "Chat".into(),
            link: String::new(),
            kind: Default::default(),
            is_open,
            last_update: 0,
            contact_public_key: None,
            unread_count: 0,
            synthetic: false,
        }
    }

    fn partial_load(interactions: Vec<RawInteraction>) -> Action {
        Action::ConversationPartialLoad {
            conversation_public_key: CONV.into(),
            interactions,
            medias: vec![],
        }
    }

    fn cids(state: &MessengerState) -> Vec<&str> {
        state.interactions[CONV]
            .iter()
            .map(|i| i.cid.as_str())
            .collect()
    }

    #[test]
    fn partial_load_merges_and_applies_acks() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![
                raw("c1", 10, InteractionType::UserMessage),
                raw("c3", 30, InteractionType::UserMessage),
                ack("a1", 35, "c1"),
                raw("c2", 20, InteractionType::UserMessage),
            ]),
        );
        assert_eq!(cids(&state), vec!["c3", "c2", "c1"]);
        assert!(state.interactions[CONV][2].acknowledged);
        assert!(!state.interactions[CONV][0].acknowledged);
    }

    #[test]
    fn redelivered_page_is_a_no_op() {
        let page = vec![
            raw("c2", 20, InteractionType::UserMessage),
            raw("c1", 10, InteractionType::UserMessage),
        ];
        let once = reduce(MessengerState::initial(), partial_load(page.clone()));
        let twice = reduce(once.clone(), partial_load(page));
        assert_eq!(once, twice);
    }

    #[test]
    fn redelivered_page_keeps_earlier_acks() {
        let page = vec![
            raw("m2", 20, InteractionType::UserMessage),
            raw("m1", 10, InteractionType::UserMessage),
        ];
        let state = reduce(MessengerState::initial(), partial_load(page.clone()));
        let state = reduce(
            state,
            Action::InteractionUpdated {
                interaction: ack("a1", 30, "m1"),
            },
        );
        assert!(state.interactions[CONV][1].acknowledged);

        let state = reduce(state, partial_load(page.clone()));
        assert_eq!(cids(&state), vec!["m2", "m1"]);
        assert!(state.interactions[CONV][1].acknowledged);
        assert!(!state.interactions[CONV][0].acknowledged);

        // Live update of the acked head entry.
        let state = reduce(
            state,
            partial_load(vec![ack("a2", 40, "m2")]),
        );
        let state = reduce(
            state,
            Action::InteractionUpdated {
                interaction: page[0].clone(),
            },
        );
        assert!(state.interactions[CONV].iter().all(|i| i.acknowledged));
    }

    #[test]
    fn ack_for_unloaded_target_is_dropped_and_not_replayed() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![
                raw("c1", 10, InteractionType::UserMessage),
                ack("a1", 15, "c9"),
            ]),
        );
        assert_eq!(cids(&state), vec!["c1"]);
        let state = reduce(state, partial_load(vec![raw("c9", 5, InteractionType::UserMessage)]));
        assert_eq!(cids(&state), vec!["c1", "c9"]);
        assert!(state.interactions[CONV].iter().all(|i| !i.acknowledged));
    }

    #[test]
    fn unknown_interaction_type_never_reaches_history() {
        let mut unknown = raw("x1", 50, InteractionType::UserMessage);
        unknown.type_tag = 999;
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![unknown, raw("c1", 10, InteractionType::UserMessage)]),
        );
        assert_eq!(cids(&state), vec!["c1"]);
    }

    #[test]
    fn partial_load_upserts_medias() {
        let media = Media {
            cid: "m1".into(),
            mime_type: "image/png".into(),
            filename: "a.png".into(),
            display_name: String::new(),
        };
        let state = reduce(
            MessengerState::initial(),
            Action::ConversationPartialLoad {
                conversation_public_key: CONV.into(),
                interactions: vec![],
                medias: vec![media.clone()],
            },
        );
        assert_eq!(state.medias["m1"], media);
        assert!(!state.interactions.contains_key(CONV));
    }

    #[test]
    fn interaction_updated_delegates_to_partial_load() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![raw("c1", 10, InteractionType::UserMessage)]),
        );
        let state = reduce(
            state,
            Action::InteractionUpdated {
                interaction: raw("c2", 20, InteractionType::UserMessage),
            },
        );
        assert_eq!(cids(&state), vec!["c2", "c1"]);
        let state = reduce(
            state,
            Action::InteractionUpdated {
                interaction: ack("a1", 25, "c2"),
            },
        );
        assert_eq!(cids(&state), vec!["c2", "c1"]);
        assert!(state.interactions[CONV][0].acknowledged);
    }

    #[test]
    fn closing_conversation_collapses_to_newest_user_message() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![
                raw("u1", 10, InteractionType::UserMessage),
                raw("u2", 20, InteractionType::UserMessage),
                ack("a1", 25, "u1"),
                raw("u3", 30, InteractionType::UserMessage),
                raw("u4", 40, InteractionType::UserMessage),
                ack("a2", 45, "u3"),
                raw("u5", 50, InteractionType::UserMessage),
                raw("s1", 60, InteractionType::SetUserInfo),
            ]),
        );
        assert_eq!(state.interactions[CONV].len(), 6);

        let state = reduce(
            state,
            Action::ConversationUpdated {
                conversation: conversation(CONV, false),
            },
        );
        assert_eq!(cids(&state), vec!["u5"]);
        assert!(!state.conversations[CONV].is_open);
    }

    #[test]
    fn closing_conversation_without_user_messages_drops_history() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![raw("s1", 60, InteractionType::SetUserInfo)]),
        );
        let state = reduce(
            state,
            Action::ConversationUpdated {
                conversation: conversation(CONV, false),
            },
        );
        assert!(!state.interactions.contains_key(CONV));
    }

    #[test]
    fn open_conversation_update_keeps_history() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![
                raw("u1", 10, InteractionType::UserMessage),
                raw("u2", 20, InteractionType::UserMessage),
            ]),
        );
        let state = reduce(
            state,
            Action::ConversationUpdated {
                conversation: conversation(CONV, true),
            },
        );
        assert_eq!(cids(&state), vec!["u2", "u1"]);
    }

    #[test]
    fn entity_updates_are_last_write_wins() {
        let mut contact = Contact {
            public_key: "pk".into(),
            display_name: "first".into(),
            state: Default::default(),
            conversation_public_key: None,
            created_date: 0,
            synthetic: false,
        };
        let state = reduce(
            MessengerState::initial(),
            Action::ContactUpdated {
                contact: contact.clone(),
            },
        );
        contact.display_name = "second".into();
        let state = reduce(state, Action::ContactUpdated { contact });
        assert_eq!(state.contacts["pk"].display_name, "second");

        let member = Member {
            public_key: "m".into(),
            conversation_public_key: CONV.into(),
            display_name: "bob".into(),
            synthetic: false,
        };
        let state = reduce(state, Action::MemberUpdated { member });
        assert_eq!(state.members[CONV]["m"].display_name, "bob");

        let state = reduce(
            state,
            Action::AccountUpdated {
                account: Account {
                    public_key: "me".into(),
                    display_name: "Me".into(),
                    link: String::new(),
                },
            },
        );
        assert_eq!(state.account.as_ref().map(|a| a.public_key.as_str()), Some("me"));
    }

    #[test]
    fn scoped_interaction_deletion_removes_entry() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![
                raw("c1", 10, InteractionType::UserMessage),
                raw("c2", 20, InteractionType::UserMessage),
            ]),
        );
        let unscoped = reduce(
            state.clone(),
            Action::InteractionDeleted {
                cid: "c1".into(),
                conversation_public_key: None,
            },
        );
        assert_eq!(unscoped, state);

        let scoped = reduce(
            state,
            Action::InteractionDeleted {
                cid: "c1".into(),
                conversation_public_key: Some(CONV.into()),
            },
        );
        assert_eq!(cids(&scoped), vec!["c2"]);
    }

    #[test]
    fn unknown_action_leaves_state_untouched() {
        let state = MessengerState::initial();
        let out = reduce(
            state.clone(),
            Action::Unknown {
                event_kind: "TypeSomethingNew".into(),
            },
        );
        assert_eq!(out, state);
        assert_eq!(reduce(state.clone(), Action::DeviceUpdated), state);
    }

    #[test]
    fn notification_inhibitors_are_a_set() {
        let add = |s, name: &str| {
            reduce(
                s,
                Action::AddNotificationInhibitor {
                    inhibitor: name.into(),
                },
            )
        };
        let state = add(MessengerState::initial(), "chat");
        let state = add(state, "chat");
        let state = add(state, "settings");
        assert_eq!(state.notification_inhibitors, vec!["chat", "settings"]);

        let state = reduce(
            state,
            Action::RemoveNotificationInhibitor {
                inhibitor: "chat".into(),
            },
        );
        let state = reduce(
            state,
            Action::RemoveNotificationInhibitor {
                inhibitor: "missing".into(),
            },
        );
        assert_eq!(state.notification_inhibitors, vec!["settings"]);
    }

    #[test]
    fn stream_status_fields() {
        let state = reduce(MessengerState::initial(), Action::ListEnded);
        assert!(state.initial_list_complete);

        let state = reduce(
            state,
            Action::SetStreamError {
                error: Some(crate::state::StreamError {
                    message: "disconnected".into(),
                }),
            },
        );
        assert!(state.stream_error.is_some());
        let state = reduce(state, Action::SetStreamError { error: None });
        assert!(state.stream_error.is_none());
    }

    fn open_embedded() -> MessengerState {
        reduce(MessengerState::with_mode(true, ""), Action::RequestOpen)
    }

    #[test]
    fn embedded_bootstrap_without_accounts_lands_on_get_started() {
        let state = open_embedded();
        assert_eq!(state.app_state, AppState::OpeningWaitingForDaemon);

        let state = reduce(state, Action::ClientsReady);
        assert_eq!(state.app_state, AppState::OpeningListingEvents);
        let state = reduce(state, Action::GettingLocalSettings);
        assert_eq!(state.app_state, AppState::OpeningGettingLocalSettings);
        let state = reduce(state, Action::MarkingConversationsClosed);
        assert_eq!(state.app_state, AppState::OpeningMarkConversationsAsClosed);
        let state = reduce(state, Action::OpeningComplete);
        assert_eq!(state.app_state, AppState::GetStarted);
    }

    fn bootstrapped(accounts: usize, display_name: &str) -> MessengerState {
        let mut state = open_embedded();
        state.accounts = (0..accounts)
            .map(|i| AccountMetadata {
                account_id: i.to_string(),
                name: None,
            })
            .collect();
        state.account = Some(Account {
            public_key: "me".into(),
            display_name: display_name.into(),
            link: String::new(),
        });
        [
            Action::DaemonReady,
            Action::ClientsReady,
            Action::GettingLocalSettings,
            Action::MarkingConversationsClosed,
            Action::OpeningComplete,
        ]
        .into_iter()
        .fold(state, reduce)
    }

    #[test]
    fn readiness_check() {
        assert_eq!(bootstrapped(1, "").app_state, AppState::GetStarted);
        assert_eq!(bootstrapped(1, "Alice").app_state, AppState::Ready);
        assert_eq!(bootstrapped(2, "").app_state, AppState::Ready);
    }

    #[test]
    fn new_account_flag_forces_get_started_once() {
        let mut state = open_embedded();
        state.accounts = vec![
            AccountMetadata {
                account_id: "0".into(),
                name: None,
            },
            AccountMetadata {
                account_id: "1".into(),
                name: None,
            },
        ];
        state.is_new_account = true;
        let state = reduce(state, Action::OpeningComplete);
        assert_eq!(state.app_state, AppState::GetStarted);
        assert!(!state.is_new_account);
    }

    #[test]
    fn select_next_account_closes_then_reopens() {
        let state = bootstrapped(2, "Alice");
        assert_eq!(state.selected_account.as_deref(), Some(DEFAULT_ACCOUNT_ID));

        let state = reduce(
            state,
            Action::SelectNextAccount {
                account_id: "1".into(),
            },
        );
        assert_eq!(state.app_state, AppState::OpeningWaitingForDaemon);
        assert_eq!(state.selected_account.as_deref(), Some("1"));
        assert_eq!(state.next_selected_account, None);
        assert_eq!(state.accounts.len(), 2);
        assert!(state.account.is_none());
    }

    #[test]
    fn select_same_or_remote_account_is_ignored() {
        let state = bootstrapped(2, "Alice");
        let same = reduce(
            state.clone(),
            Action::SelectNextAccount {
                account_id: DEFAULT_ACCOUNT_ID.into(),
            },
        );
        assert_eq!(same, state);

        let mut remote = state;
        remote.embedded = false;
        let out = reduce(
            remote.clone(),
            Action::SelectNextAccount {
                account_id: "1".into(),
            },
        );
        assert_eq!(out, remote);
    }

    #[test]
    fn account_created_reopens_flagged_new() {
        let state = bootstrapped(1, "Alice");
        let state = reduce(
            state,
            Action::AccountCreated {
                account_id: "7".into(),
            },
        );
        assert_eq!(state.app_state, AppState::OpeningWaitingForDaemon);
        assert_eq!(state.selected_account.as_deref(), Some("7"));
        assert!(state.is_new_account);
    }

    #[test]
    fn bridge_closed_tears_down_unless_deleting() {
        let state = bootstrapped(2, "Alice");
        let closed = reduce(state.clone(), Action::BridgeClosed);
        assert_eq!(closed.app_state, AppState::Closed);
        assert!(closed.conversations.is_empty());

        let again = reduce(closed.clone(), Action::BridgeClosed);
        assert_eq!(again, closed);

        let deleting = reduce(state, Action::DeleteAccount);
        assert_eq!(deleting.app_state, AppState::DeletingClosingDaemon);
        let clearing = reduce(deleting, Action::BridgeClosed);
        assert_eq!(clearing.app_state, AppState::DeletingClearingStorage);

        let done = reduce(clearing, Action::StorageCleared);
        assert_eq!(done.app_state, AppState::Closed);
        assert_eq!(done.accounts.len(), 1);
        assert_eq!(done.accounts[0].account_id, "1");
    }

    #[test]
    fn remote_mode_close_reopens_immediately() {
        let mut state = reduce(MessengerState::with_mode(false, "10.0.0.1:9091"), Action::RequestOpen);
        assert_eq!(state.app_state, AppState::OpeningWaitingForClients);
        state.initial_list_complete = true;
        let state = reduce(state, Action::SetClosed);
        assert_eq!(state.app_state, AppState::OpeningWaitingForClients);
        assert_eq!(state.daemon_address, "10.0.0.1:9091");
        assert!(!state.initial_list_complete);
    }

    #[test]
    fn unexpected_transition_is_still_applied() {
        let state = reduce(MessengerState::initial(), Action::OpeningComplete);
        assert_eq!(state.app_state, AppState::GetStarted);
    }

    #[test]
    fn chain_limit_stops_runaway_sequences() {
        let reducer = Reducer::default().with_max_chain(1);
        let state = open_embedded();
        let state = reducer.reduce(
            state,
            Action::AccountCreated {
                account_id: "1".into(),
            },
        );
        // SetClosed never ran.
        assert_eq!(state.app_state, AppState::OpeningWaitingForDaemon);
        assert_eq!(state.next_selected_account.as_deref(), Some("1"));
    }

    #[test]
    fn stream_done_clears_progress() {
        let mut state = bootstrapped(2, "Alice");
        state.stream_in_progress = Some(crate::state::StreamProgress {
            stream: "import".into(),
            msg: "working".into(),
            progress: 0.5,
            completed: 1,
            total: 2,
        });
        let state = reduce(state, Action::SetStreamDone);
        assert_eq!(state.app_state, AppState::StreamDone);
        assert!(state.stream_in_progress.is_none());
    }

    #[test]
    fn synthetic_data_round_trip() {
        let real = conversation("real", true);
        let state = reduce(
            MessengerState::initial(),
            Action::ConversationUpdated {
                conversation: real,
            },
        );
        let state = reduce(state, Action::DeleteSyntheticData);
        assert!(state.conversations.contains_key("real"));

        let fake = crate::fixture::SyntheticDataset::generate(2, 3, 4);
        let fake_key = fake.conversations[0].public_key.clone();
        let state = reduce(state, fake.into_action());
        assert_eq!(state.conversations.len(), 3);
        assert_eq!(state.interactions[&fake_key].len(), 4);
        assert!(state.members.contains_key(&fake_key));

        let state = reduce(state, Action::DeleteSyntheticData);
        assert_eq!(state.conversations.len(), 1);
        assert!(state.contacts.is_empty());
        assert!(state.members.is_empty());
        assert!(!state.interactions.contains_key(&fake_key));
    }

    #[test]
    fn synthetic_interactions_in_real_conversations_are_removed() {
        let state = reduce(
            MessengerState::initial(),
            partial_load(vec![raw("real-1", 10, InteractionType::UserMessage)]),
        );

        let mut demo = crate::fixture::SyntheticDataset::generate(1, 0, 2).interactions;
        for interaction in &mut demo {
            interaction.conversation_public_key = CONV.into();
            interaction.synthetic = false;
        }
        let state = reduce(
            state,
            Action::AddSyntheticData {
                conversations: vec![],
                contacts: vec![],
                interactions: demo,
                members: vec![],
            },
        );
        assert_eq!(state.interactions[CONV].len(), 3);
        assert!(state.interactions[CONV].iter().filter(|i| i.synthetic).count() == 2);

        let state = reduce(state, Action::DeleteSyntheticData);
        assert_eq!(cids(&state), vec!["real-1"]);

        let state = reduce(
            reduce(
                MessengerState::initial(),
                crate::fixture::SyntheticDataset::generate(0, 0, 0).into_action(),
            ),
            Action::DeleteSyntheticData,
        );
        assert!(state.interactions.is_empty());
    }
}
