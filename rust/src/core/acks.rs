use crate::state::Interaction;

/// Flags interactions targeted by `acks` as acknowledged.
///
/// Acks whose target is not in `interactions` are dropped. Nothing is kept
/// around for a target that shows up later.
pub fn apply_acks(mut interactions: Vec<Interaction>, acks: &[Interaction]) -> Vec<Interaction> {
    for ack in acks {
        let Some(target) = ack.ack_target() else {
            tracing::trace!(cid = %ack.cid, "ack without target");
            continue;
        };
        match interactions.iter_mut().find(|i| i.cid == target) {
            Some(found) => found.acknowledged = true,
            None => {
                tracing::trace!(cid = %ack.cid, target_cid = %target, "ack target not loaded, dropping");
            }
        }
    }
    interactions
}
