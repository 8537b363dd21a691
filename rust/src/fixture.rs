//! Demo data for screenshots and UI development.
//!
//! Everything produced here is tagged `synthetic` so a single
//! `DeleteSyntheticData` action removes it again.

use crate::actions::Action;
use crate::state::{
    now_millis, Contact, ContactState, Conversation, ConversationType, Interaction,
    InteractionType, Member, Payload, UserMessage,
};

const SAMPLE_LINES: &[&str] = &[
    "Hey, are you around later?",
    "Just landed, will call you in a bit",
    "Did you see the photos?",
    "Sounds good to me",
    "Let's do Thursday instead",
    "On my way",
];

#[derive(Debug, Clone, Default)]
pub struct SyntheticDataset {
    pub conversations: Vec<Conversation>,
    pub contacts: Vec<Contact>,
    pub interactions: Vec<Interaction>,
    pub members: Vec<Member>,
}

impl SyntheticDataset {
    /// One contact conversation per entry, each with its members and a short history.
    pub fn generate(
        conversation_count: usize,
        members_per_conversation: usize,
        interactions_per_conversation: usize,
    ) -> Self {
        let now = now_millis();
        let mut data = Self::default();

        for c in 0..conversation_count {
            let conversation_pk = fake_key();
            let contact_pk = fake_key();
            let name = format!("Demo contact {}", c + 1);

            data.contacts.push(Contact {
                public_key: contact_pk.clone(),
                display_name: name.clone(),
                state: ContactState::Accepted,
                conversation_public_key: Some(conversation_pk.clone()),
                created_date: now,
                synthetic: true,
            });

            for m in 0..members_per_conversation {
                data.members.push(Member {
                    public_key: fake_key(),
                    conversation_public_key: conversation_pk.clone(),
                    display_name: format!("{name} device {}", m + 1),
                    synthetic: true,
                });
            }

            // Spread the history one minute apart, newest last.
            for i in 0..interactions_per_conversation {
                let line = SAMPLE_LINES[(c + i) % SAMPLE_LINES.len()];
                data.interactions.push(Interaction {
                    cid: fake_key(),
                    conversation_public_key: conversation_pk.clone(),
                    sent_date: now - ((interactions_per_conversation - i) as i64) * 60_000,
                    kind: InteractionType::UserMessage,
                    payload: Payload::UserMessage(UserMessage {
                        body: line.to_string(),
                        medias: vec![],
                    }),
                    acknowledged: i % 2 == 0,
                    target_cid: None,
                    is_mine: i % 2 == 0,
                    member_public_key: None,
                    synthetic: true,
                });
            }

            data.conversations.push(Conversation {
                public_key: conversation_pk,
                display_name: name,
                link: String::new(),
                kind: ConversationType::Contact,
                is_open: false,
                last_update: now,
                contact_public_key: Some(contact_pk),
                unread_count: (c % 3) as u32,
                synthetic: true,
            });
        }

        data
    }

    pub fn into_action(self) -> Action {
        Action::AddSyntheticData {
            conversations: self.conversations,
            contacts: self.contacts,
            interactions: self.interactions,
            members: self.members,
        }
    }
}

fn fake_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
