/// Bounded uniform sampling of converted points
use rand::Rng;
use rand::seq::SliceRandom;

/// Keeps at most `limit` items, chosen uniformly without replacement.
///
/// `None` or a count already within the limit returns the input untouched.
/// Otherwise the items are shuffled and truncated, so the surviving order
/// says nothing about the original scan order.
pub fn sample_bounded<T, R: Rng + ?Sized>(
    mut items: Vec<T>,
    limit: Option<usize>,
    rng: &mut R,
) -> Vec<T> {
    let Some(limit) = limit else {
        return items;
    };
    if items.len() <= limit {
        return items;
    }

    items.shuffle(rng);
    items.truncate(limit);
    items
}

/// Interprets a configured maximum, where zero or negative means unbounded.
pub fn point_limit(max_points: i64) -> Option<usize> {
    (max_points > 0).then(|| usize::try_from(max_points).unwrap_or(usize::MAX))
}
