//! Split-point computation: lowest common ancestor of two branch heads over
//! a commit DAG that may contain merge nodes.
//!
//! Two independent frontiers (one per head) expand outward by distance,
//! breadth-first via a min-heap keyed on distance. After each round the two
//! frontiers' visited sets are intersected; the first non-empty intersection
//! wins, picking the smallest distance from head A and breaking ties by
//! insertion order (see module doc on [`Frontier`]).

use std::collections::{BinaryHeap, HashMap};
use std::cmp::Reverse;

use crate::error::Result;
use crate::model::types::ObjectId;
use crate::store::ObjectStore;

/// One side of the bidirectional search: a min-heap frontier plus the
/// best-known `(distance, insertion order)` for every commit visited so far.
///
/// `insertion order` is assigned the first time a commit is recorded into
/// `dist` (not on later updates to a smaller distance) — this is the
/// "earlier-inserted wins" tie-break.
struct Frontier {
    heap: BinaryHeap<Reverse<(u64, u64, ObjectId)>>,
    push_seq: u64,
    dist: HashMap<ObjectId, (u64, u64)>,
    insertion_seq: u64,
}

impl Frontier {
    fn seed(head: ObjectId) -> Self {
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0, 0, head)));
        Self {
            heap,
            push_seq: 1,
            dist: HashMap::new(),
            insertion_seq: 0,
        }
    }

    /// Pop one item and, if it improves on (or introduces) that commit's
    /// recorded distance, record it and enqueue its parents at `dist + 1`.
    fn step(&mut self, store: &ObjectStore) -> Result<()> {
        let Some(Reverse((dist, _, id))) = self.heap.pop() else {
            return Ok(());
        };
        let should_update = match self.dist.get(&id) {
            None => true,
            Some(&(best, _)) => dist < best,
        };
        if !should_update {
            return Ok(());
        }
        let seq = self.insertion_seq;
        self.insertion_seq += 1;
        self.dist.insert(id.clone(), (dist, seq));

        let commit = store.load_commit(&id)?;
        for parent in commit.parents.iter().filter_map(|p| p.id()) {
            self.heap.push(Reverse((dist + 1, self.push_seq, parent.clone())));
            self.push_seq += 1;
        }
        Ok(())
    }
}

fn best_in_intersection(
    dist_a: &HashMap<ObjectId, (u64, u64)>,
    dist_b: &HashMap<ObjectId, (u64, u64)>,
) -> Option<ObjectId> {
    let mut best: Option<(&ObjectId, u64, u64)> = None;
    for (id, &(dist, seq)) in dist_a {
        if !dist_b.contains_key(id) {
            continue;
        }
        let is_better = match best {
            None => true,
            Some((_, best_dist, best_seq)) => dist < best_dist || (dist == best_dist && seq < best_seq),
        };
        if is_better {
            best = Some((id, dist, seq));
        }
    }
    best.map(|(id, _, _)| id.clone())
}

/// Compute the split point (lowest common ancestor) of two branch heads.
///
/// Returns `None` only if the two heads share no common ancestor at all,
/// which cannot happen for two heads drawn from the same repository (every
/// branch traces back to the shared initial commit).
pub fn split_point(store: &ObjectStore, head_a: &ObjectId, head_b: &ObjectId) -> Result<Option<ObjectId>> {
    let mut a = Frontier::seed(head_a.clone());
    let mut b = Frontier::seed(head_b.clone());

    loop {
        if a.heap.is_empty() && b.heap.is_empty() {
            tracing::warn!(%head_a, %head_b, "LCA search exhausted both frontiers with no common ancestor");
            return Ok(None);
        }
        a.step(store)?;
        b.step(store)?;
        if let Some(id) = best_in_intersection(&a.dist, &b.dist) {
            return Ok(Some(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::commit::Commit;
    use crate::model::types::ParentRef;

    fn chain(store: &ObjectStore, parent: &ObjectId, message: &str) -> ObjectId {
        let mut commit = store.load_commit(parent).unwrap();
        commit.parents = vec![ParentRef::Id(parent.clone())];
        commit.message = message.to_owned();
        store.put_commit(&commit).unwrap()
    }

    fn merge(store: &ObjectStore, p1: &ObjectId, p2: &ObjectId, message: &str) -> ObjectId {
        let mut commit = store.load_commit(p1).unwrap();
        commit.parents = vec![ParentRef::Id(p1.clone()), ParentRef::Id(p2.clone())];
        commit.message = message.to_owned();
        store.put_commit(&commit).unwrap()
    }

    #[test]
    fn identical_heads_split_at_themselves() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        store.init().unwrap();
        let initial = store.put_commit(&Commit::initial("me", "t")).unwrap();

        let split = split_point(&store, &initial, &initial).unwrap();
        assert_eq!(split, Some(initial));
    }

    #[test]
    fn linear_history_split_is_the_common_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        store.init().unwrap();
        let initial = store.put_commit(&Commit::initial("me", "t")).unwrap();
        let base = chain(&store, &initial, "base");

        let a = chain(&store, &base, "a1");
        let a = chain(&store, &a, "a2");

        let b = chain(&store, &base, "b1");

        let split = split_point(&store, &a, &b).unwrap();
        assert_eq!(split, Some(base));
    }

    #[test]
    fn split_is_commutative() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        store.init().unwrap();
        let initial = store.put_commit(&Commit::initial("me", "t")).unwrap();
        let base = chain(&store, &initial, "base");
        let a = chain(&store, &base, "a");
        let b = chain(&store, &base, "b");

        let forward = split_point(&store, &a, &b).unwrap();
        let backward = split_point(&store, &b, &a).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn fast_forward_case_split_equals_current_head() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        store.init().unwrap();
        let initial = store.put_commit(&Commit::initial("me", "t")).unwrap();
        let ahead = chain(&store, &initial, "ahead");

        let split = split_point(&store, &initial, &ahead).unwrap();
        assert_eq!(split, Some(initial));
    }

    #[test]
    fn split_point_through_a_merge_commit() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        store.init().unwrap();
        let initial = store.put_commit(&Commit::initial("me", "t")).unwrap();
        let base = chain(&store, &initial, "base");

        let a = chain(&store, &base, "a");
        let b = chain(&store, &base, "b");
        let merged = merge(&store, &a, &b, "merge a+b");

        let c = chain(&store, &base, "c");

        let split = split_point(&store, &merged, &c).unwrap();
        assert_eq!(split, Some(base));
    }
}
