use crate::algorithm::DiffAlgorithm;
use crate::diff::DiffOperation;
use crate::tokenizers::Token;

/// Myers O((N+M)D) shortest edit script over tokens, in linear space.
///
/// Common leading and trailing tokens are matched first. The rest is split at
/// the middle snake where a forward and a reverse search meet, and each half
/// is diffed recursively. Both searches take the insertion move only when it
/// reaches strictly further than the deletion move. Inside a run of changes
/// deletions come before insertions once the run is coalesced.
pub struct MyersAlgorithm;

impl MyersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MyersAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

/// One step of the edit path, by token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal(usize),
    Insert(usize),
    Delete(usize),
}

impl DiffAlgorithm for MyersAlgorithm {
    fn compute(&self, original: &[Token], modified: &[Token]) -> Vec<DiffOperation> {
        let mut edits = Vec::with_capacity(original.len() + modified.len());
        diff_range(original, modified, 0, 0, &mut edits);

        edits
            .into_iter()
            .map(|edit| match edit {
                Edit::Equal(i) => DiffOperation::equal(original[i].text.clone()),
                Edit::Delete(i) => DiffOperation::delete(original[i].text.clone()),
                Edit::Insert(j) => DiffOperation::insert(modified[j].text.clone()),
            })
            .collect()
    }
}

/// Append the edits turning `a` into `b`. `a_start` and `b_start` are the
/// positions of the slices in the full sequences.
fn diff_range(a: &[Token], b: &[Token], a_start: usize, b_start: usize, edits: &mut Vec<Edit>) {
    let prefix = a
        .iter()
        .zip(b)
        .take_while(|(x, y)| x.text == y.text)
        .count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x.text == y.text)
        .count();

    edits.extend((0..prefix).map(|i| Edit::Equal(a_start + i)));

    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];
    let a_mid_start = a_start + prefix;
    let b_mid_start = b_start + prefix;

    let split = if a_mid.is_empty() || b_mid.is_empty() {
        None
    } else {
        middle_snake(a_mid, b_mid)
    };

    match split {
        Some((x, y)) => {
            diff_range(&a_mid[..x], &b_mid[..y], a_mid_start, b_mid_start, edits);
            diff_range(&a_mid[x..], &b_mid[y..], a_mid_start + x, b_mid_start + y, edits);
        }
        None => {
            edits.extend((0..a_mid.len()).map(|i| Edit::Delete(a_mid_start + i)));
            edits.extend((0..b_mid.len()).map(|j| Edit::Insert(b_mid_start + j)));
        }
    }

    edits.extend((a.len() - suffix..a.len()).map(|i| Edit::Equal(a_start + i)));
}

/// Point where the forward and reverse searches first overlap, as an
/// `(x, y)` position to split both sequences at.
///
/// Only the furthest-reaching x per diagonal of the current round is kept, so
/// memory stays linear in the input length.
fn middle_snake(a: &[Token], b: &[Token]) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let v_len = 2 * max_d + 2;

    let mut v1 = vec![-1isize; v_len as usize];
    let mut v2 = vec![-1isize; v_len as usize];
    v1[(offset + 1) as usize] = 0;
    v2[(offset + 1) as usize] = 0;

    let delta = n - m;
    // The forward search checks for overlap when delta is odd, the reverse
    // search when it is even.
    let front = delta % 2 != 0;

    // Diagonals that ran off the edge of the grid are skipped in later rounds.
    let mut k1_start = 0;
    let mut k1_end = 0;
    let mut k2_start = 0;
    let mut k2_end = 0;

    for d in 0..max_d {
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;

            while x1 < n && y1 < m && a[x1 as usize].text == b[y1 as usize].text {
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;

            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if front {
                let k2_offset = offset + delta - k1;
                if (0..v_len).contains(&k2_offset) && v2[k2_offset as usize] != -1 {
                    let x2 = n - v2[k2_offset as usize];
                    if x1 >= x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;

            while x2 < n
                && y2 < m
                && a[(n - x2 - 1) as usize].text == b[(m - y2 - 1) as usize].text
            {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !front {
                let k1_offset = offset + delta - k2;
                if (0..v_len).contains(&k1_offset) && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = offset + x1 - k1_offset;
                    if x1 >= n - x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k2 += 2;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_tokens;
    use super::*;
    use crate::diff::{reconstruct_modified, reconstruct_original, EditType};

    fn kinds(ops: &[DiffOperation]) -> Vec<(EditType, &str)> {
        ops.iter().map(|op| (op.edit_type, op.text.as_str())).collect()
    }

    #[test]
    fn test_myers_insertion_in_middle() {
        let orig = create_tokens("Hello world.");
        let modified = create_tokens("Hello brave world.");

        let ops = MyersAlgorithm::new().compute(&orig, &modified);

        assert_eq!(
            kinds(&ops),
            vec![
                (EditType::Equal, "Hello"),
                (EditType::Equal, " "),
                (EditType::Insert, "brave"),
                (EditType::Insert, " "),
                (EditType::Equal, "world."),
            ]
        );
    }

    #[test]
    fn test_myers_is_minimal() {
        let orig = create_tokens("a b c a b b a");
        let modified = create_tokens("c b a b a c");

        let ops = MyersAlgorithm::new().compute(&orig, &modified);
        let changes = ops.iter().filter(|op| op.is_change()).count();

        assert_eq!(reconstruct_original(&ops), "a b c a b b a");
        assert_eq!(reconstruct_modified(&ops), "c b a b a c");
        // 13 + 11 tokens sharing a longest common subsequence of 8.
        assert_eq!(changes, 8);
    }

    #[test]
    fn test_all_deletions() {
        let orig = create_tokens("hello world");
        let modified = create_tokens("");

        let ops = MyersAlgorithm::new().compute(&orig, &modified);

        assert_eq!(ops.len(), 3);
        assert!(ops.iter().all(|op| op.edit_type == EditType::Delete));
    }

    #[test]
    fn test_all_insertions() {
        let orig = create_tokens("");
        let modified = create_tokens("hello world");

        let ops = MyersAlgorithm::new().compute(&orig, &modified);

        assert_eq!(ops.len(), 3);
        assert!(ops.iter().all(|op| op.edit_type == EditType::Insert));
    }

    #[test]
    fn test_large_rewrite_with_nothing_in_common() {
        let old: Vec<String> = (0..1000).map(|i| format!("old{i}")).collect();
        let new: Vec<String> = (0..1000).map(|i| format!("new{i}")).collect();
        let (old, new) = (old.join(" "), new.join("\n"));

        let ops = MyersAlgorithm::new().compute(&create_tokens(&old), &create_tokens(&new));

        assert_eq!(reconstruct_original(&ops), old);
        assert_eq!(reconstruct_modified(&ops), new);
        assert!(ops.iter().all(|op| op.is_change()));
        assert_eq!(ops.len(), 2 * 1999);
    }

    #[test]
    fn test_large_rewrite_keeps_shared_separators() {
        let old: Vec<String> = (0..1000).map(|i| format!("old{i}")).collect();
        let new: Vec<String> = (0..1000).map(|i| format!("new{i}")).collect();

        let ops = MyersAlgorithm::new().compute(
            &create_tokens(&old.join(" ")),
            &create_tokens(&new.join(" ")),
        );

        // Every word changes; the 999 single spaces are matched.
        assert_eq!(ops.iter().filter(|op| op.is_change()).count(), 2000);
        assert_eq!(ops.len(), 2000 + 999);
    }

    #[test]
    fn test_replacement_is_reconstructible() {
        let orig = create_tokens("pay for certain benefits");
        let modified = create_tokens("pay for qualified benefits");

        let ops = MyersAlgorithm::new().compute(&orig, &modified);

        assert_eq!(reconstruct_original(&ops), "pay for certain benefits");
        assert_eq!(reconstruct_modified(&ops), "pay for qualified benefits");
        assert_eq!(ops.iter().filter(|op| op.is_change()).count(), 2);
    }
}
