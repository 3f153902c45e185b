use std::collections::{HashMap, HashSet};

use super::index::TopicTreeIndex;
use crate::models::{AdjacencyEntry, Hop, RankedSubtopic, Tier};

/// Expands the 2-pointer adjacency model into a full proximity ranking per
/// subtopic.
///
/// Algorithm, per subtopic `c`:
/// 1. Seed with self (always `Near`, position 0), then the immediate left and
///    right neighbors.
/// 2. Advance the left and right cursors alternately (left first), one hop per
///    round, appending each newly reached subtopic until both chains run out.
/// 3. Tier classification is monotonic per direction: every subtopic reached
///    after the first `Boundary` hop in that direction is `Far`, even when the
///    later hops are `Local` within their own topic.
/// 4. Stably partition the discovery order into the `Near` block followed by
///    the `Far` block.
///
/// A subtopic reachable from both directions keeps its first (nearer)
/// classification. Each walk is bounded by the total subtopic count, so a
/// degenerate adjacency model cannot loop.
pub fn expand_rankings(
    index: &TopicTreeIndex,
    adjacency: &HashMap<String, AdjacencyEntry>,
) -> HashMap<String, Vec<RankedSubtopic>> {
    let total = index.subtopic_count();
    let mut rankings = HashMap::with_capacity(total);

    for lane in index.topics() {
        for subtopic_id in &lane.subtopics {
            rankings.insert(subtopic_id.clone(), expand_one(subtopic_id, adjacency, total));
        }
    }

    rankings
}

fn expand_one(
    origin: &str,
    adjacency: &HashMap<String, AdjacencyEntry>,
    total: usize,
) -> Vec<RankedSubtopic> {
    let mut discovered = vec![RankedSubtopic {
        id: origin.to_string(),
        tier: Tier::Near,
    }];
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(origin.to_string());

    let entry = match adjacency.get(origin) {
        Some(entry) => entry,
        None => return discovered,
    };

    let mut left_far = matches!(&entry.left, Some(r) if r.hop == Hop::Boundary);
    let mut right_far = matches!(&entry.right, Some(r) if r.hop == Hop::Boundary);
    let mut left = entry.left.as_ref().map(|r| r.id.clone());
    let mut right = entry.right.as_ref().map(|r| r.id.clone());

    if let Some(id) = &left {
        record(&mut discovered, &mut seen, id, left_far);
    }
    if let Some(id) = &right {
        record(&mut discovered, &mut seen, id, right_far);
    }

    let mut rounds = 0;
    while (left.is_some() || right.is_some()) && rounds < total {
        rounds += 1;

        left = match left
            .as_deref()
            .and_then(|id| adjacency.get(id))
            .and_then(|e| e.left.as_ref())
        {
            Some(next) => {
                left_far = left_far || next.hop == Hop::Boundary;
                record(&mut discovered, &mut seen, &next.id, left_far);
                Some(next.id.clone())
            }
            None => None,
        };

        right = match right
            .as_deref()
            .and_then(|id| adjacency.get(id))
            .and_then(|e| e.right.as_ref())
        {
            Some(next) => {
                right_far = right_far || next.hop == Hop::Boundary;
                record(&mut discovered, &mut seen, &next.id, right_far);
                Some(next.id.clone())
            }
            None => None,
        };
    }

    let (near, far): (Vec<_>, Vec<_>) = discovered
        .into_iter()
        .partition(|ranked| ranked.tier == Tier::Near);
    near.into_iter().chain(far).collect()
}

fn record(discovered: &mut Vec<RankedSubtopic>, seen: &mut HashSet<String>, id: &str, far: bool) {
    if seen.insert(id.to_string()) {
        discovered.push(RankedSubtopic {
            id: id.to_string(),
            tier: if far { Tier::Far } else { Tier::Near },
        });
    }
}
