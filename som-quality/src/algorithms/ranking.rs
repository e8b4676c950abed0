#[cfg(test)]
#[path = "../../tests/unit/algorithms/ranking_test.rs"]
mod ranking_test;

use crate::utils::{Float, compare_floats};
use rand::Rng;
use rand::seq::SliceRandom;

/// Keeps rank information about a single element of the ranked distances.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceTag {
    /// An index of the element in the original distances.
    pub index: usize,
    /// A distance value.
    pub distance: Float,
    /// A 1-based rank: tied elements receive the average of positions they occupy.
    pub rank: Float,
    /// The lowest 1-based position within the tie block.
    pub min_rank: usize,
}

/// Ranks distances in ascending order with tie handling. Returns tags in the original order.
///
/// The subject itself is expected to have an infinite distance which puts it to the last
/// position: such elements always receive `rank = n`. NaN is treated as infinity.
pub fn rank_distances(distances: &[Float]) -> Vec<DistanceTag> {
    let size = distances.len();
    let mut tags = sorted_tags(distances);

    let mut block_start = 0;
    while block_start < size {
        let distance = tags[block_start].distance;
        let block_end = (block_start..size).find(|&idx| tags[idx].distance != distance).unwrap_or(size);

        // NOTE positions are 1-based: sum(s+1..=e) / (e - s)
        let rank = if distance == Float::INFINITY {
            size as Float
        } else {
            (block_start + 1 + block_end) as Float / 2.
        };

        tags[block_start..block_end].iter_mut().for_each(|tag| {
            tag.rank = rank;
            tag.min_rank = block_start + 1;
        });

        block_start = block_end;
    }

    tags.sort_by_key(|tag| tag.index);

    tags
}

/// Ranks distances and returns two parallel arrays: ranks and min ranks.
pub fn ranks_of(distances: &[Float]) -> (Vec<Float>, Vec<usize>) {
    rank_distances(distances).into_iter().map(|tag| (tag.rank, tag.min_rank)).unzip()
}

/// Returns element indices ordered by increasing distance where members of every tie block are
/// put in random order. Infinite distances are omitted.
pub fn order_with_random_ties<R: Rng + ?Sized>(distances: &[Float], rng: &mut R) -> Vec<usize> {
    let tags = rank_distances(distances);
    let mut order = sorted_tags(distances)
        .into_iter()
        .filter(|tag| tag.distance != Float::INFINITY)
        .map(|tag| tag.index)
        .collect::<Vec<_>>();

    let mut block_start = 0;
    while block_start < order.len() {
        let min_rank = tags[order[block_start]].min_rank;
        let block_end =
            (block_start..order.len()).find(|&idx| tags[order[idx]].min_rank != min_rank).unwrap_or(order.len());

        order[block_start..block_end].shuffle(rng);
        block_start = block_end;
    }

    order
}

/// Returns tags sorted by distance, ties are kept in index order. Ranks are not assigned yet.
fn sorted_tags(distances: &[Float]) -> Vec<DistanceTag> {
    let mut tags = distances
        .iter()
        .enumerate()
        .map(|(index, &distance)| DistanceTag {
            index,
            distance: if distance.is_nan() { Float::INFINITY } else { distance },
            rank: 0.,
            min_rank: 0,
        })
        .collect::<Vec<_>>();

    tags.sort_by(|a, b| compare_floats(a.distance, b.distance).then(a.index.cmp(&b.index)));

    tags
}
