use std::collections::HashMap;

use crate::state::{
    Account, AccountMetadata, Contact, Conversation, Interaction, Media, Member,
    MessengerState, PersistentOptions, RawInteraction, StreamError, StreamProgress,
};

use super::acks::apply_acks;
use super::decode::PayloadRegistry;
use super::merge::{dedup_by_cid, merge_interactions, sort_interactions};
use super::Outcome;

pub(super) fn conversation_updated(
    mut state: MessengerState,
    conversation: Conversation,
) -> Outcome {
    let key = conversation.public_key.clone();

    // Closed conversations only keep what the list row needs.
    if !conversation.is_open {
        if let Some(list) = state.interactions.remove(&key) {
            let before = list.len();
            let newest = list.into_iter().find(|i| i.is_user_message());
            tracing::debug!(conversation = %key, before, "collapsing closed conversation");
            if let Some(newest) = newest {
                state.interactions.insert(key.clone(), vec![newest]);
            }
        }
    }

    state.conversations.insert(key, conversation);
    Outcome::done(state)
}

pub(super) fn account_updated(mut state: MessengerState, account: Account) -> Outcome {
    state.account = Some(account);
    Outcome::done(state)
}

pub(super) fn contact_updated(mut state: MessengerState, contact: Contact) -> Outcome {
    state.contacts.insert(contact.public_key.clone(), contact);
    Outcome::done(state)
}

pub(super) fn media_updated(mut state: MessengerState, media: Media) -> Outcome {
    state.medias.insert(media.cid.clone(), media);
    Outcome::done(state)
}

pub(super) fn member_updated(mut state: MessengerState, member: Member) -> Outcome {
    state
        .members
        .entry(member.conversation_public_key.clone())
        .or_default()
        .insert(member.public_key.clone(), member);
    Outcome::done(state)
}

pub(super) fn partial_load(
    registry: &PayloadRegistry,
    mut state: MessengerState,
    conversation_public_key: String,
    raws: Vec<RawInteraction>,
    medias: Vec<Media>,
) -> Outcome {
    let received = raws.len();
    let decoded: Vec<Interaction> = registry
        .decode_interactions(raws)
        .into_iter()
        .filter(|i| {
            let belongs = i.conversation_public_key == conversation_public_key;
            if !belongs {
                tracing::warn!(
                    cid = %i.cid,
                    conversation = %conversation_public_key,
                    other = %i.conversation_public_key,
                    "interaction delivered in another conversation's page"
                );
            }
            belongs
        })
        .collect();
    let (acks, entries): (Vec<Interaction>, Vec<Interaction>) =
        dedup_by_cid(sort_interactions(decoded))
            .into_iter()
            .partition(|i| i.is_ack());

    tracing::debug!(
        conversation = %conversation_public_key,
        received,
        entries = entries.len(),
        acks = acks.len(),
        medias = medias.len(),
        "partial load"
    );

    let existing = state
        .interactions
        .remove(&conversation_public_key)
        .unwrap_or_default();
    let merged = apply_acks(merge_interactions(existing, entries), &acks);
    if !merged.is_empty() {
        state.interactions.insert(conversation_public_key, merged);
    }

    state
        .medias
        .extend(medias.into_iter().map(|m| (m.cid.clone(), m)));
    Outcome::done(state)
}

pub(super) fn interaction_updated(
    registry: &PayloadRegistry,
    state: MessengerState,
    interaction: RawInteraction,
) -> Outcome {
    let conversation_public_key = interaction.conversation_public_key.clone();
    partial_load(
        registry,
        state,
        conversation_public_key,
        vec![interaction],
        vec![],
    )
}

/// Deletion needs the owning conversation; cid alone is ignored.
pub(super) fn interaction_deleted(
    mut state: MessengerState,
    cid: String,
    conversation_public_key: Option<String>,
) -> Outcome {
    let Some(conversation_public_key) = conversation_public_key else {
        tracing::debug!(%cid, "interaction deletion without conversation, ignoring");
        return Outcome::done(state);
    };

    if let Some(list) = state.interactions.get_mut(&conversation_public_key) {
        let before = list.len();
        list.retain(|i| i.cid != cid);
        if list.len() != before {
            tracing::debug!(%cid, conversation = %conversation_public_key, "interaction deleted");
        }
        if list.is_empty() {
            state.interactions.remove(&conversation_public_key);
        }
    }
    Outcome::done(state)
}

pub(super) fn list_ended(mut state: MessengerState) -> Outcome {
    state.initial_list_complete = true;
    Outcome::done(state)
}

pub(super) fn set_stream_error(mut state: MessengerState, error: Option<StreamError>) -> Outcome {
    if let Some(error) = &error {
        tracing::warn!(error = %error.message, "event stream failed");
    }
    state.stream_error = error;
    Outcome::done(state)
}

pub(super) fn set_stream_in_progress(
    mut state: MessengerState,
    progress: Option<StreamProgress>,
) -> Outcome {
    state.stream_in_progress = progress;
    Outcome::done(state)
}

pub(super) fn add_notification_inhibitor(mut state: MessengerState, inhibitor: String) -> Outcome {
    if !state.notification_inhibitors.contains(&inhibitor) {
        state.notification_inhibitors.push(inhibitor);
    }
    Outcome::done(state)
}

pub(super) fn remove_notification_inhibitor(
    mut state: MessengerState,
    inhibitor: String,
) -> Outcome {
    state.notification_inhibitors.retain(|i| *i != inhibitor);
    Outcome::done(state)
}

pub(super) fn add_synthetic_data(
    mut state: MessengerState,
    conversations: Vec<Conversation>,
    contacts: Vec<Contact>,
    interactions: Vec<Interaction>,
    members: Vec<Member>,
) -> Outcome {
    for mut conversation in conversations {
        conversation.synthetic = true;
        state
            .conversations
            .insert(conversation.public_key.clone(), conversation);
    }
    for mut contact in contacts {
        contact.synthetic = true;
        state.contacts.insert(contact.public_key.clone(), contact);
    }
    for mut member in members {
        member.synthetic = true;
        state
            .members
            .entry(member.conversation_public_key.clone())
            .or_default()
            .insert(member.public_key.clone(), member);
    }

    let mut pages: HashMap<String, Vec<Interaction>> = HashMap::new();
    for mut interaction in interactions {
        interaction.synthetic = true;
        pages
            .entry(interaction.conversation_public_key.clone())
            .or_default()
            .push(interaction);
    }
    for (key, mut page) in pages {
        page = dedup_by_cid(sort_interactions(page));
        let existing = state.interactions.remove(&key).unwrap_or_default();
        state
            .interactions
            .insert(key, merge_interactions(existing, page));
    }

    Outcome::done(state)
}

pub(super) fn delete_synthetic_data(mut state: MessengerState) -> Outcome {
    let removed: Vec<String> = state
        .conversations
        .values()
        .filter(|c| c.synthetic)
        .map(|c| c.public_key.clone())
        .collect();
    state.conversations.retain(|_, c| !c.synthetic);
    for key in &removed {
        state.interactions.remove(key);
    }
    // Demo entries may also sit inside real conversations.
    for list in state.interactions.values_mut() {
        list.retain(|i| !i.synthetic);
    }
    state.interactions.retain(|_, list| !list.is_empty());

    state.contacts.retain(|_, c| !c.synthetic);
    for members in state.members.values_mut() {
        members.retain(|_, m| !m.synthetic);
    }
    state.members.retain(|_, members| !members.is_empty());

    tracing::debug!(conversations = removed.len(), "synthetic data removed");
    Outcome::done(state)
}

pub(super) fn set_daemon_address(mut state: MessengerState, address: String) -> Outcome {
    state.daemon_address = address;
    Outcome::done(state)
}

pub(super) fn set_persistent_options(
    mut state: MessengerState,
    options: PersistentOptions,
) -> Outcome {
    state.persistent_options = options;
    Outcome::done(state)
}

pub(super) fn set_accounts(mut state: MessengerState, accounts: Vec<AccountMetadata>) -> Outcome {
    state.accounts = accounts;
    Outcome::done(state)
}
