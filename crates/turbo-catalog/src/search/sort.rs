//! Quicksort over arbitrary items.

use std::cmp::Ordering;

/// Sort `items` into a new vector, non-decreasing per `cmp`.
///
/// Partition-based with the last element of each range as pivot. The sort
/// is not stable: callers must not rely on the relative order of items
/// that compare equal. Already sorted and reverse-sorted inputs hit the
/// O(n^2) worst case; ranges are kept on an explicit work stack, so that
/// costs time but never call-stack depth.
pub fn quick_sort<T, F>(items: &[T], cmp: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut sorted = items.to_vec();
    if sorted.len() <= 1 {
        return sorted;
    }

    let mut ranges = vec![(0, sorted.len() - 1)];
    while let Some((low, high)) = ranges.pop() {
        if low >= high {
            continue;
        }
        let pivot = partition(&mut sorted, low, high, &cmp);
        if pivot > low {
            ranges.push((low, pivot - 1));
        }
        ranges.push((pivot + 1, high));
    }

    sorted
}

/// Lomuto partition of `items[low..=high]` around `items[high]`.
/// Returns the pivot's final index.
fn partition<T, F>(items: &mut [T], low: usize, high: usize, cmp: &F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut store = low;
    for j in low..high {
        if cmp(&items[j], &items[high]) == Ordering::Less {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, high);
    store
}
