use crate::state::{Contact, Conversation, Interaction, Media, Member, MessengerState};

/// Newest-first history of one conversation; empty when nothing is loaded.
pub fn interactions_for<'a>(state: &'a MessengerState, conversation_pk: &str) -> &'a [Interaction] {
    state
        .interactions
        .get(conversation_pk)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// What a conversation list row previews.
pub fn newest_user_message<'a>(
    state: &'a MessengerState,
    conversation_pk: &str,
) -> Option<&'a Interaction> {
    interactions_for(state, conversation_pk)
        .iter()
        .find(|i| i.is_user_message())
}

/// Most recently updated first; ties fall back to the key so the order is stable.
pub fn conversation_list(state: &MessengerState) -> Vec<&Conversation> {
    let mut list: Vec<&Conversation> = state.conversations.values().collect();
    list.sort_by(|a, b| {
        b.last_update
            .cmp(&a.last_update)
            .then_with(|| a.public_key.cmp(&b.public_key))
    });
    list
}

/// Members sorted by display name, then key.
pub fn members_of<'a>(state: &'a MessengerState, conversation_pk: &str) -> Vec<&'a Member> {
    let Some(members) = state.members.get(conversation_pk) else {
        return vec![];
    };
    let mut list: Vec<&Member> = members.values().collect();
    list.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.public_key.cmp(&b.public_key))
    });
    list
}

pub fn conversation<'a>(state: &'a MessengerState, public_key: &str) -> Option<&'a Conversation> {
    state.conversations.get(public_key)
}

pub fn contact<'a>(state: &'a MessengerState, public_key: &str) -> Option<&'a Contact> {
    state.contacts.get(public_key)
}

pub fn media<'a>(state: &'a MessengerState, cid: &str) -> Option<&'a Media> {
    state.medias.get(cid)
}

pub fn interaction<'a>(
    state: &'a MessengerState,
    conversation_pk: &str,
    cid: &str,
) -> Option<&'a Interaction> {
    interactions_for(state, conversation_pk)
        .iter()
        .find(|i| i.cid == cid)
}

/// Own user messages still waiting for an acknowledgment.
pub fn unacknowledged_outgoing(state: &MessengerState, conversation_pk: &str) -> usize {
    interactions_for(state, conversation_pk)
        .iter()
        .filter(|i| i.is_mine && i.is_user_message() && !i.acknowledged)
        .count()
}

pub fn notifications_inhibited(state: &MessengerState) -> bool {
    !state.notification_inhibitors.is_empty()
}
