//! Post-processing of raw edit scripts.
//!
//! [`merge`] coalesces token-level operations into runs, with every run of
//! changes emitted as one Delete followed by one Insert. [`semantic`] then
//! folds short equalities that are sandwiched between larger edits into those
//! edits, so a reviewer sees "old phrase" → "new phrase" instead of a
//! word-by-word alternation.

use crate::diff::{DiffOperation, EditType};

/// Coalesce adjacent operations.
///
/// Inside each maximal run of non-Equal operations all deleted text is
/// gathered into a single Delete and all inserted text into a single Insert,
/// Delete first. Adjacent Equals are joined and empty operations dropped.
pub fn merge(operations: Vec<DiffOperation>) -> Vec<DiffOperation> {
    let mut merged: Vec<DiffOperation> = Vec::with_capacity(operations.len());
    let mut deleted = String::new();
    let mut inserted = String::new();

    for op in operations {
        match op.edit_type {
            EditType::Delete => deleted.push_str(&op.text),
            EditType::Insert => inserted.push_str(&op.text),
            EditType::Equal => {
                flush_changes(&mut merged, &mut deleted, &mut inserted);
                if op.text.is_empty() {
                    continue;
                }
                match merged.last_mut() {
                    Some(last) if last.edit_type == EditType::Equal => last.text.push_str(&op.text),
                    _ => merged.push(op),
                }
            }
        }
    }

    flush_changes(&mut merged, &mut deleted, &mut inserted);
    merged
}

fn flush_changes(merged: &mut Vec<DiffOperation>, deleted: &mut String, inserted: &mut String) {
    if !deleted.is_empty() {
        merged.push(DiffOperation::delete(std::mem::take(deleted)));
    }
    if !inserted.is_empty() {
        merged.push(DiffOperation::insert(std::mem::take(inserted)));
    }
}

/// Semantic cleanup over coalesced operations.
///
/// An Equal run is absorbed when its length (in characters) is no greater
/// than the larger of the inserted/deleted lengths on each side of it. The
/// equality is replaced by a Delete and an Insert of the same text, so both
/// sides still reconstruct exactly. After any absorption the scan restarts
/// from the previous equality, since its neighbours just grew.
pub fn semantic(operations: Vec<DiffOperation>) -> Vec<DiffOperation> {
    let mut ops = operations;
    let mut changes = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<String> = None;
    let mut pointer: isize = 0;

    // Edit lengths before and after the last equality.
    let mut inserted_before = 0;
    let mut deleted_before = 0;
    let mut inserted_after = 0;
    let mut deleted_after = 0;

    while (pointer as usize) < ops.len() {
        let p = pointer as usize;

        if ops[p].edit_type == EditType::Equal {
            equalities.push(p);
            inserted_before = inserted_after;
            deleted_before = deleted_after;
            inserted_after = 0;
            deleted_after = 0;
            last_equality = Some(ops[p].text.clone());
        } else {
            let len = ops[p].char_len();
            if ops[p].edit_type == EditType::Insert {
                inserted_after += len;
            } else {
                deleted_after += len;
            }

            let absorb = match (&last_equality, equalities.last()) {
                (Some(equality), Some(&at)) => {
                    let eq_len = equality.chars().count();
                    (eq_len <= inserted_before.max(deleted_before)
                        && eq_len <= inserted_after.max(deleted_after))
                    .then_some(at)
                }
                _ => None,
            };

            if let Some(at) = absorb {
                let text = ops[at].text.clone();
                ops.insert(at, DiffOperation::delete(text));
                ops[at + 1].edit_type = EditType::Insert;

                // Drop the absorbed equality and re-examine the one before it.
                equalities.pop();
                equalities.pop();
                pointer = equalities.last().map_or(-1, |&i| i as isize);

                inserted_before = 0;
                deleted_before = 0;
                inserted_after = 0;
                deleted_after = 0;
                last_equality = None;
                changes = true;
            }
        }

        pointer += 1;
    }

    if changes {
        merge(ops)
    } else {
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{reconstruct_modified, reconstruct_original};

    fn kinds(ops: &[DiffOperation]) -> Vec<(EditType, &str)> {
        ops.iter().map(|op| (op.edit_type, op.text.as_str())).collect()
    }

    #[test]
    fn test_merge_orders_deletes_first() {
        let ops = vec![
            DiffOperation::equal("a"),
            DiffOperation::insert("x"),
            DiffOperation::delete("b"),
            DiffOperation::insert("y"),
            DiffOperation::delete("c"),
            DiffOperation::equal("d"),
            DiffOperation::equal("e"),
        ];

        assert_eq!(
            kinds(&merge(ops)),
            vec![
                (EditType::Equal, "a"),
                (EditType::Delete, "bc"),
                (EditType::Insert, "xy"),
                (EditType::Equal, "de"),
            ]
        );
    }

    #[test]
    fn test_merge_drops_empty_operations() {
        let ops = vec![
            DiffOperation::equal(""),
            DiffOperation::insert("x"),
            DiffOperation::equal(""),
        ];
        assert_eq!(kinds(&merge(ops)), vec![(EditType::Insert, "x")]);
    }

    #[test]
    fn test_semantic_absorbs_short_equality() {
        // "The cat" -> "A dog": the single space between two edits is noise.
        let ops = vec![
            DiffOperation::delete("The"),
            DiffOperation::insert("A"),
            DiffOperation::equal(" "),
            DiffOperation::delete("cat"),
            DiffOperation::insert("dog"),
            DiffOperation::equal(" sat"),
        ];

        let cleaned = semantic(ops);

        assert_eq!(
            kinds(&cleaned),
            vec![
                (EditType::Delete, "The cat"),
                (EditType::Insert, "A dog"),
                (EditType::Equal, " sat"),
            ]
        );
        assert_eq!(reconstruct_original(&cleaned), "The cat sat");
        assert_eq!(reconstruct_modified(&cleaned), "A dog sat");
    }

    #[test]
    fn test_semantic_keeps_long_equality() {
        let ops = vec![
            DiffOperation::delete("certain"),
            DiffOperation::insert("qualified"),
            DiffOperation::equal(" benefits on a pre-tax basis, "),
            DiffOperation::delete("lowering"),
            DiffOperation::insert("reducing"),
        ];

        let cleaned = semantic(ops.clone());
        assert_eq!(cleaned, ops);
    }

    #[test]
    fn test_semantic_leaves_leading_equality() {
        let ops = vec![
            DiffOperation::equal("Hello "),
            DiffOperation::insert("brave "),
            DiffOperation::equal("world."),
        ];

        assert_eq!(semantic(ops.clone()), ops);
    }

    #[test]
    fn test_semantic_cascades_backwards() {
        // Absorbing the lone space makes the edit after " x " large enough
        // to absorb " x " on the second look.
        let ops = vec![
            DiffOperation::equal("Start "),
            DiffOperation::delete("aaaa"),
            DiffOperation::insert("bbbb"),
            DiffOperation::equal(" x "),
            DiffOperation::delete("c"),
            DiffOperation::insert("d"),
            DiffOperation::equal(" "),
            DiffOperation::delete("eeee"),
            DiffOperation::insert("ffff"),
        ];

        let cleaned = semantic(ops);

        assert_eq!(
            kinds(&cleaned),
            vec![
                (EditType::Equal, "Start "),
                (EditType::Delete, "aaaa x c eeee"),
                (EditType::Insert, "bbbb x d ffff"),
            ]
        );
    }
}
