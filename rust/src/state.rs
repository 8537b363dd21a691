use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Account selected when nothing else was picked (remote daemon mode always uses it).
pub const DEFAULT_ACCOUNT_ID: &str = "0";

/// Coarse client bootstrap phase. Orthogonal to any single conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppState {
    Closed,
    OpeningListingEvents,
    OpeningWaitingForDaemon,
    OpeningWaitingForClients,
    OpeningGettingLocalSettings,
    OpeningMarkConversationsAsClosed,
    Ready,
    GetStarted,
    OnBoarding,
    StreamDone,
    DeletingClosingDaemon,
    DeletingClearingStorage,
}

/// Wire-level interaction kind. Tags match the messenger `AppMessage.Type` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    Undefined,
    UserMessage,
    UserReaction,
    GroupInvitation,
    SetGroupInfo,
    SetUserInfo,
    Acknowledge,
    ReplyOptions,
    MonitorMetadata,
}

impl InteractionType {
    pub const ALL: [InteractionType; 9] = [
        Self::Undefined,
        Self::UserMessage,
        Self::UserReaction,
        Self::GroupInvitation,
        Self::SetGroupInfo,
        Self::SetUserInfo,
        Self::Acknowledge,
        Self::ReplyOptions,
        Self::MonitorMetadata,
    ];

    pub fn tag(&self) -> i32 {
        match self {
            Self::Undefined => 0,
            Self::UserMessage => 1,
            Self::UserReaction => 2,
            Self::GroupInvitation => 3,
            Self::SetGroupInfo => 4,
            Self::SetUserInfo => 5,
            Self::Acknowledge => 6,
            Self::ReplyOptions => 7,
            Self::MonitorMetadata => 8,
        }
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub body: String,
    #[serde(default)]
    pub medias: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReaction {
    pub emoji: String,
    #[serde(default)]
    pub remove: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInvitation {
    pub link: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInfo {
    pub display_name: String,
    #[serde(default)]
    pub avatar_cid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledge {
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyOption {
    pub display: String,
    pub payload: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorMetadata {
    pub event: String,
}

/// Decoded interaction payload, one variant per known [`InteractionType`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    UserMessage(UserMessage),
    UserReaction(UserReaction),
    GroupInvitation(GroupInvitation),
    SetGroupInfo(SetInfo),
    SetUserInfo(SetInfo),
    Acknowledge(Acknowledge),
    ReplyOptions(Vec<ReplyOption>),
    MonitorMetadata(MonitorMetadata),
}

/// Interaction record as delivered by the protocol client, payload still encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInteraction {
    pub cid: String,
    pub conversation_public_key: String,
    pub type_tag: i32,
    #[serde(default)]
    pub payload: Vec<u8>,
    pub sent_date: i64,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub target_cid: Option<String>,
    #[serde(default)]
    pub is_mine: bool,
    #[serde(default)]
    pub member_public_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub cid: String,
    pub conversation_public_key: String,
    pub sent_date: i64,
    pub kind: InteractionType,
    pub payload: Payload,
    pub acknowledged: bool,
    pub target_cid: Option<String>,
    pub is_mine: bool,
    pub member_public_key: Option<String>,
    /// Demo entry added through `AddSyntheticData`.
    #[serde(default)]
    pub synthetic: bool,
}

impl Interaction {
    /// Newest-first display order: `sent_date` descending, then cid descending.
    ///
    /// Returns [`Ordering::Less`] when `self` belongs before `other`.
    pub fn display_order_cmp(&self, other: &Self) -> Ordering {
        other
            .sent_date
            .cmp(&self.sent_date)
            .then_with(|| other.cid.cmp(&self.cid))
    }

    pub fn is_ack(&self) -> bool {
        self.kind == InteractionType::Acknowledge
    }

    pub fn is_user_message(&self) -> bool {
        self.kind == InteractionType::UserMessage
    }

    pub fn ack_target(&self) -> Option<&str> {
        if !self.is_ack() {
            return None;
        }
        self.target_cid.as_deref()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationType {
    #[default]
    Undefined,
    Account,
    Contact,
    MultiMember,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub public_key: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub kind: ConversationType,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub last_update: i64,
    #[serde(default)]
    pub contact_public_key: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub synthetic: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactState {
    #[default]
    Undefined,
    IncomingRequest,
    OutgoingRequestEnqueued,
    OutgoingRequestSent,
    Accepted,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub public_key: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub state: ContactState,
    #[serde(default)]
    pub conversation_public_key: Option<String>,
    #[serde(default)]
    pub created_date: i64,
    #[serde(default)]
    pub synthetic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub public_key: String,
    pub conversation_public_key: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub synthetic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub cid: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub public_key: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub link: String,
}

/// Entry of the known-account list kept by the account service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetadata {
    pub account_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamError {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamProgress {
    pub stream: String,
    pub msg: String,
    pub progress: f32,
    pub completed: u32,
    pub total: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentOptions {
    pub notifications_enabled: bool,
    pub i18n_language: String,
    pub debug_enabled: bool,
    pub suggestions_enabled: bool,
}

/// Store root: the in-memory derived view the UI reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessengerState {
    pub app_state: AppState,
    pub embedded: bool,
    pub daemon_address: String,

    pub account: Option<Account>,
    pub accounts: Vec<AccountMetadata>,
    pub selected_account: Option<String>,
    pub next_selected_account: Option<String>,
    pub is_new_account: bool,

    pub conversations: HashMap<String, Conversation>,
    pub contacts: HashMap<String, Contact>,
    // conversation key -> newest-first interactions
    pub interactions: HashMap<String, Vec<Interaction>>,
    // conversation key -> member key -> member
    pub members: HashMap<String, HashMap<String, Member>>,
    pub medias: HashMap<String, Media>,

    pub initial_list_complete: bool,
    pub stream_error: Option<StreamError>,
    pub stream_in_progress: Option<StreamProgress>,
    pub notification_inhibitors: Vec<String>,
    pub persistent_options: PersistentOptions,
}

impl MessengerState {
    pub fn initial() -> Self {
        Self {
            app_state: AppState::Closed,
            embedded: true,
            daemon_address: String::new(),
            account: None,
            accounts: vec![],
            selected_account: None,
            next_selected_account: Some(DEFAULT_ACCOUNT_ID.to_string()),
            is_new_account: false,
            conversations: HashMap::new(),
            contacts: HashMap::new(),
            interactions: HashMap::new(),
            members: HashMap::new(),
            medias: HashMap::new(),
            initial_list_complete: false,
            stream_error: None,
            stream_in_progress: None,
            notification_inhibitors: vec![],
            persistent_options: PersistentOptions::default(),
        }
    }

    pub fn with_mode(embedded: bool, daemon_address: impl Into<String>) -> Self {
        Self {
            embedded,
            daemon_address: daemon_address.into(),
            ..Self::initial()
        }
    }
}

impl Default for MessengerState {
    fn default() -> Self {
        Self::initial()
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
