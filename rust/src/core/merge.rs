use std::collections::{HashMap, HashSet};

use crate::state::Interaction;

/// Sort newest-first using [`Interaction::display_order_cmp`].
pub fn sort_interactions(mut interactions: Vec<Interaction>) -> Vec<Interaction> {
    interactions.sort_by(|a, b| a.display_order_cmp(b));
    interactions
}

/// Keeps the first (newest) copy of every cid.
pub fn dedup_by_cid(mut interactions: Vec<Interaction>) -> Vec<Interaction> {
    let mut seen = HashSet::new();
    interactions.retain(|i| seen.insert(i.cid.clone()));
    interactions
}

fn sorts_before(a: &Interaction, b: &Interaction) -> bool {
    a.display_order_cmp(b).is_lt()
}

/// Merges a page of interactions into a conversation's history.
///
/// Both inputs must be sorted newest-first and be cid-unique. The result keeps
/// both properties; merging the same page twice only refreshes values.
/// A refreshed entry never loses an acknowledgment it already had.
/// `existing` is consumed and edited in place.
pub fn merge_interactions(
    mut existing: Vec<Interaction>,
    incoming: Vec<Interaction>,
) -> Vec<Interaction> {
    if incoming.is_empty() {
        return existing;
    }
    if existing.is_empty() {
        return incoming;
    }

    // Upsert of the newest entry, the common case for live updates.
    if incoming.len() == 1 && incoming[0].cid == existing[0].cid {
        let still_newest = existing
            .get(1)
            .map_or(true, |next| sorts_before(&incoming[0], next));
        if still_newest {
            let mut incoming = incoming;
            let mut item = incoming.remove(0);
            item.acknowledged |= existing[0].acknowledged;
            existing[0] = item;
            return existing;
        }
    }

    let known: HashSet<&str> = existing.iter().map(|i| i.cid.as_str()).collect();
    let collides = incoming.iter().any(|i| known.contains(i.cid.as_str()));
    drop(known);

    if !collides {
        let (Some(existing_newest), Some(existing_oldest)) = (existing.first(), existing.last())
        else {
            return incoming;
        };
        let (Some(incoming_newest), Some(incoming_oldest)) = (incoming.first(), incoming.last())
        else {
            return existing;
        };

        if sorts_before(incoming_oldest, existing_newest) {
            let mut merged = incoming;
            merged.extend(existing);
            return merged;
        }
        if sorts_before(existing_oldest, incoming_newest) {
            existing.extend(incoming);
            return existing;
        }
    }

    merge_overlapping(existing, incoming)
}

fn merge_overlapping(mut existing: Vec<Interaction>, incoming: Vec<Interaction>) -> Vec<Interaction> {
    // An entry that moved in time is re-placed from its incoming copy.
    let incoming_dates: HashMap<&str, i64> = incoming
        .iter()
        .map(|i| (i.cid.as_str(), i.sent_date))
        .collect();
    let mut moved_acked: HashSet<String> = HashSet::new();
    existing.retain(|e| {
        let keep = incoming_dates
            .get(e.cid.as_str())
            .map_or(true, |date| *date == e.sent_date);
        if !keep && e.acknowledged {
            moved_acked.insert(e.cid.clone());
        }
        keep
    });
    drop(incoming_dates);

    let mut cursor = 0;
    for mut item in incoming {
        if moved_acked.contains(&item.cid) {
            item.acknowledged = true;
        }

        while cursor < existing.len() && sorts_before(&existing[cursor], &item) {
            cursor += 1;
        }

        let same_cid = existing[cursor..]
            .iter()
            .take_while(|e| e.sent_date == item.sent_date)
            .position(|e| e.cid == item.cid);

        match same_cid {
            Some(offset) => {
                let slot = &mut existing[cursor + offset];
                item.acknowledged |= slot.acknowledged;
                *slot = item;
            }
            None => existing.insert(cursor, item),
        }
    }

    existing
}
