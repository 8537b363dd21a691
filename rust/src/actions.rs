use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::state::{
    Account, AccountMetadata, Contact, Conversation, Interaction, Media, Member,
    PersistentOptions, RawInteraction, StreamError, StreamProgress,
};

/// Everything the reducer understands: protocol stream events plus local actions.
///
/// JSON form is `{"kind": ..., "payload": ...}`. A `kind` this client does not
/// know deserializes to [`Action::Unknown`] instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "kind", content = "payload")]
pub enum Action {
    // Protocol stream events
    ConversationUpdated {
        conversation: Conversation,
    },
    AccountUpdated {
        account: Account,
    },
    ContactUpdated {
        contact: Contact,
    },
    MediaUpdated {
        media: Media,
    },
    MemberUpdated {
        member: Member,
    },
    DeviceUpdated,
    ConversationPartialLoad {
        conversation_public_key: String,
        #[serde(default)]
        interactions: Vec<RawInteraction>,
        #[serde(default)]
        medias: Vec<Media>,
    },
    InteractionUpdated {
        interaction: RawInteraction,
    },
    InteractionDeleted {
        cid: String,
        #[serde(default)]
        conversation_public_key: Option<String>,
    },
    ListEnded,
    /// Event kind this client has no handler for.
    Unknown {
        event_kind: String,
    },

    // Stream status
    SetStreamError {
        error: Option<StreamError>,
    },
    SetStreamInProgress {
        progress: Option<StreamProgress>,
    },
    SetStreamDone,

    // Notifications
    AddNotificationInhibitor {
        inhibitor: String,
    },
    RemoveNotificationInhibitor {
        inhibitor: String,
    },

    // Demo data
    AddSyntheticData {
        #[serde(default)]
        conversations: Vec<Conversation>,
        #[serde(default)]
        contacts: Vec<Contact>,
        #[serde(default)]
        interactions: Vec<Interaction>,
        #[serde(default)]
        members: Vec<Member>,
    },
    DeleteSyntheticData,

    // Settings
    SetDaemonAddress {
        address: String,
    },
    SetPersistentOptions {
        options: PersistentOptions,
    },
    SetAccounts {
        accounts: Vec<AccountMetadata>,
    },

    // Lifecycle
    RequestOpen,
    DaemonReady,
    ClientsReady,
    GettingLocalSettings,
    MarkingConversationsClosed,
    OpeningComplete,
    SetOnBoarding,
    SelectNextAccount {
        account_id: String,
    },
    AccountCreated {
        account_id: String,
    },
    BridgeClosed,
    DeleteAccount,
    StorageCleared,
    SetClosed,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Action::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("kind")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        match Action::deserialize(value) {
            Ok(action) => Ok(action),
            Err(e) => match kind {
                Some(kind) if !Action::KINDS.contains(&kind.as_str()) => {
                    Ok(Action::Unknown { event_kind: kind })
                }
                _ => Err(D::Error::custom(e)),
            },
        }
    }
}

impl Action {
    /// Every `kind` value the JSON form accepts.
    pub const KINDS: &'static [&'static str] = &[
        "ConversationUpdated",
        "AccountUpdated",
        "ContactUpdated",
        "MediaUpdated",
        "MemberUpdated",
        "DeviceUpdated",
        "ConversationPartialLoad",
        "InteractionUpdated",
        "InteractionDeleted",
        "ListEnded",
        "Unknown",
        "SetStreamError",
        "SetStreamInProgress",
        "SetStreamDone",
        "AddNotificationInhibitor",
        "RemoveNotificationInhibitor",
        "AddSyntheticData",
        "DeleteSyntheticData",
        "SetDaemonAddress",
        "SetPersistentOptions",
        "SetAccounts",
        "RequestOpen",
        "DaemonReady",
        "ClientsReady",
        "GettingLocalSettings",
        "MarkingConversationsClosed",
        "OpeningComplete",
        "SetOnBoarding",
        "SelectNextAccount",
        "AccountCreated",
        "BridgeClosed",
        "DeleteAccount",
        "StorageCleared",
        "SetClosed",
    ];

    /// Short log-friendly tag, never includes payload content.
    pub fn tag(&self) -> &'static str {
        match self {
            // Protocol stream events
            Action::ConversationUpdated { .. } => "ConversationUpdated",
            Action::AccountUpdated { .. } => "AccountUpdated",
            Action::ContactUpdated { .. } => "ContactUpdated",
            Action::MediaUpdated { .. } => "MediaUpdated",
            Action::MemberUpdated { .. } => "MemberUpdated",
            Action::DeviceUpdated => "DeviceUpdated",
            Action::ConversationPartialLoad { .. } => "ConversationPartialLoad",
            Action::InteractionUpdated { .. } => "InteractionUpdated",
            Action::InteractionDeleted { .. } => "InteractionDeleted",
            Action::ListEnded => "ListEnded",
            Action::Unknown { .. } => "Unknown",

            // Stream status
            Action::SetStreamError { .. } => "SetStreamError",
            Action::SetStreamInProgress { .. } => "SetStreamInProgress",
            Action::SetStreamDone => "SetStreamDone",

            // Notifications
            Action::AddNotificationInhibitor { .. } => "AddNotificationInhibitor",
            Action::RemoveNotificationInhibitor { .. } => "RemoveNotificationInhibitor",

            // Demo data
            Action::AddSyntheticData { .. } => "AddSyntheticData",
            Action::DeleteSyntheticData => "DeleteSyntheticData",

            // Settings
            Action::SetDaemonAddress { .. } => "SetDaemonAddress",
            Action::SetPersistentOptions { .. } => "SetPersistentOptions",
            Action::SetAccounts { .. } => "SetAccounts",

            // Lifecycle
            Action::RequestOpen => "RequestOpen",
            Action::DaemonReady => "DaemonReady",
            Action::ClientsReady => "ClientsReady",
            Action::GettingLocalSettings => "GettingLocalSettings",
            Action::MarkingConversationsClosed => "MarkingConversationsClosed",
            Action::OpeningComplete => "OpeningComplete",
            Action::SetOnBoarding => "SetOnBoarding",
            Action::SelectNextAccount { .. } => "SelectNextAccount",
            Action::AccountCreated { .. } => "AccountCreated",
            Action::BridgeClosed => "BridgeClosed",
            Action::DeleteAccount => "DeleteAccount",
            Action::StorageCleared => "StorageCleared",
            Action::SetClosed => "SetClosed",
        }
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Action::RequestOpen
                | Action::DaemonReady
                | Action::ClientsReady
                | Action::GettingLocalSettings
                | Action::MarkingConversationsClosed
                | Action::OpeningComplete
                | Action::SetOnBoarding
                | Action::SelectNextAccount { .. }
                | Action::AccountCreated { .. }
                | Action::BridgeClosed
                | Action::DeleteAccount
                | Action::StorageCleared
                | Action::SetClosed
                | Action::SetStreamDone
        )
    }
}
