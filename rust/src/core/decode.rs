use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::state::{Interaction, InteractionType, Payload, RawInteraction};

pub type DecodeFn = fn(&[u8]) -> Result<Payload, DecodeError>;

fn json<T: DeserializeOwned>(bytes: &[u8], kind: InteractionType) -> Result<T, DecodeError> {
    serde_json::from_slice(bytes).map_err(|source| DecodeError::Malformed { kind, source })
}

/// Wire tag -> payload decoder.
///
/// The protocol may know more interaction types than this client; anything not
/// registered here is dropped during decoding instead of failing the page.
#[derive(Clone)]
pub struct PayloadRegistry {
    decoders: HashMap<i32, (InteractionType, DecodeFn)>,
}

impl PayloadRegistry {
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(InteractionType::UserMessage, |b| {
            json(b, InteractionType::UserMessage).map(Payload::UserMessage)
        });
        registry.register(InteractionType::UserReaction, |b| {
            json(b, InteractionType::UserReaction).map(Payload::UserReaction)
        });
        registry.register(InteractionType::GroupInvitation, |b| {
            json(b, InteractionType::GroupInvitation).map(Payload::GroupInvitation)
        });
        registry.register(InteractionType::SetGroupInfo, |b| {
            json(b, InteractionType::SetGroupInfo).map(Payload::SetGroupInfo)
        });
        registry.register(InteractionType::SetUserInfo, |b| {
            json(b, InteractionType::SetUserInfo).map(Payload::SetUserInfo)
        });
        registry.register(InteractionType::Acknowledge, |b| {
            json(b, InteractionType::Acknowledge).map(Payload::Acknowledge)
        });
        registry.register(InteractionType::ReplyOptions, |b| {
            json(b, InteractionType::ReplyOptions).map(Payload::ReplyOptions)
        });
        registry.register(InteractionType::MonitorMetadata, |b| {
            json(b, InteractionType::MonitorMetadata).map(Payload::MonitorMetadata)
        });
        registry
    }

    pub fn register(&mut self, kind: InteractionType, decoder: DecodeFn) {
        if kind == InteractionType::Undefined {
            return;
        }
        self.decoders.insert(kind.tag(), (kind, decoder));
    }

    pub fn unregister(&mut self, kind: InteractionType) {
        self.decoders.remove(&kind.tag());
    }

    pub fn decode(&self, raw: RawInteraction) -> Result<Interaction, DecodeError> {
        let Some((kind, decoder)) = self.decoders.get(&raw.type_tag) else {
            return Err(DecodeError::UnknownType(raw.type_tag));
        };
        let payload = decoder(&raw.payload)?;

        let target_cid = match (&payload, raw.target_cid) {
            (_, Some(target)) => Some(target),
            (Payload::Acknowledge(ack), None) => ack.target.clone(),
            (_, None) => None,
        };

        Ok(Interaction {
            cid: raw.cid,
            conversation_public_key: raw.conversation_public_key,
            sent_date: raw.sent_date,
            kind: *kind,
            payload,
            acknowledged: raw.acknowledged,
            target_cid,
            is_mine: raw.is_mine,
            member_public_key: raw.member_public_key,
            synthetic: false,
        })
    }

    /// Best-effort decode of a page. Unknown and undecodable records vanish.
    pub fn decode_interactions(&self, raws: Vec<RawInteraction>) -> Vec<Interaction> {
        raws.into_iter()
            .filter_map(|raw| {
                let cid = raw.cid.clone();
                match self.decode(raw) {
                    Ok(interaction) => Some(interaction),
                    Err(e) => {
                        tracing::debug!(%cid, err = %e, "dropping interaction");
                        None
                    }
                }
            })
            .collect()
    }
}

impl Default for PayloadRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for PayloadRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<InteractionType> = self.decoders.values().map(|(k, _)| *k).collect();
        kinds.sort_by_key(|k| k.tag());
        f.debug_struct("PayloadRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}
