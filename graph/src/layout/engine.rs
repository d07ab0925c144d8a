use std::collections::HashMap;

use crate::core::{Changeset, EdgeType};

use super::row::DisplayRow;

/// Compute display rows for an ordered changeset snapshot.
///
/// The input order is preserved: the snapshot arrives topologically sorted
/// (children above parents) and the engine only annotates each row with its
/// nesting level, branch geometry and elision flag. Identical input yields
/// identical output.
pub fn layout(changesets: &[Changeset]) -> Vec<DisplayRow> {
    let n = changesets.len();
    let index: HashMap<&str, usize> = changesets
        .iter()
        .enumerate()
        .map(|(i, cs)| (cs.change_id.as_str(), i))
        .collect();

    // Displayed parent of each row: the first link resolving to a row below
    // it. Links to absent ids, or ids above the child, are contract
    // violations and are ignored so the row falls back to a root.
    let mut parent: Vec<Option<usize>> = vec![None; n];
    // Ancestor-side elision flag: the marker renders above the ancestor,
    // inside the gap left by the hidden revisions.
    let mut elided = vec![false; n];
    for (i, cs) in changesets.iter().enumerate() {
        for link in &cs.parents {
            match index.get(link.id.as_str()) {
                Some(&p) if p > i => {
                    parent[i] = Some(p);
                    if link.elided {
                        elided[p] = true;
                    }
                    break;
                }
                _ => continue,
            }
        }
    }

    // First child in display order per parent.
    let mut first_child: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        if let Some(p) = parent[i] {
            if first_child[p].is_none() {
                first_child[p] = Some(i);
            }
        }
    }

    // Levels resolve bottom-up: a parent always sits below its children, so
    // walking in reverse sees every parent before its children. The first
    // child continues at the parent's level; every sibling branch opens one
    // level deeper.
    let mut level = vec![0usize; n];
    let mut is_first = vec![true; n];
    for i in (0..n).rev() {
        if let Some(p) = parent[i] {
            let first = first_child[p] == Some(i);
            is_first[i] = first;
            level[i] = if first { level[p] } else { level[p] + 1 };
        }
    }

    changesets
        .iter()
        .enumerate()
        .map(|(i, cs)| DisplayRow {
            changeset: cs.clone(),
            level: level[i],
            is_first_child: is_first[i],
            edge_type: if elided[i] {
                EdgeType::Indirect
            } else {
                EdgeType::Direct
            },
            elided: elided[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParentLink;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn changeset(id: &str, parents: &[ParentLink]) -> Changeset {
        let ts = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut cs = Changeset::new(id, &id[..1], "alice", ts, format!("change {id}"));
        cs.parents = parents.iter().cloned().collect();
        cs
    }

    #[test]
    fn linear_history_stays_at_level_zero() {
        let snapshot = vec![
            changeset("eee", &[ParentLink::direct("bbb")]),
            changeset("bbb", &[ParentLink::direct("aaa")]),
            changeset("aaa", &[]),
        ];

        let rows = layout(&snapshot);

        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.level, 0);
            assert!(row.is_first_child);
            assert_eq!(row.edge_type, EdgeType::Direct);
            assert!(!row.elided);
        }
    }

    #[test]
    fn sibling_branch_opens_one_level_deeper() {
        let snapshot = vec![
            changeset("eee", &[ParentLink::direct("bbb")]),
            changeset("ccc", &[ParentLink::direct("bbb")]),
            changeset("bbb", &[ParentLink::direct("aaa")]),
            changeset("aaa", &[]),
        ];

        let rows = layout(&snapshot);

        // eee is bbb's first child and continues its line.
        assert_eq!(rows[0].level, 0);
        assert!(rows[0].is_first_child);
        // ccc is a sibling branch, indented by exactly one.
        assert_eq!(rows[1].level, rows[2].level + 1);
        assert!(!rows[1].is_first_child);
        assert_eq!(rows[2].level, 0);
    }

    #[test]
    fn nested_branches_accumulate_levels() {
        let snapshot = vec![
            changeset("fff", &[ParentLink::direct("ccc")]),
            changeset("ddd", &[ParentLink::direct("ccc")]),
            changeset("ccc", &[ParentLink::direct("aaa")]),
            changeset("eee", &[ParentLink::direct("aaa")]),
            changeset("aaa", &[]),
        ];

        let rows = layout(&snapshot);

        assert_eq!(rows[0].level, 0); // fff continues ccc
        assert_eq!(rows[1].level, 1); // ddd branches off ccc
        assert_eq!(rows[2].level, 0); // ccc continues aaa
        assert_eq!(rows[3].level, 1); // eee branches off aaa
        assert_eq!(rows[4].level, 0);
    }

    #[test]
    fn elided_link_marks_the_ancestor_side_row() {
        let snapshot = vec![
            changeset("eee", &[ParentLink::elided("aaa")]),
            changeset("aaa", &[]),
        ];

        let rows = layout(&snapshot);

        assert!(!rows[0].elided);
        assert_eq!(rows[0].edge_type, EdgeType::Direct);
        assert!(rows[1].elided);
        assert_eq!(rows[1].edge_type, EdgeType::Indirect);
    }

    #[test]
    fn elided_rows_are_always_indirect() {
        let snapshot = vec![
            changeset("eee", &[ParentLink::elided("bbb")]),
            changeset("ccc", &[ParentLink::direct("bbb")]),
            changeset("bbb", &[]),
        ];

        for row in layout(&snapshot) {
            if row.elided {
                assert_eq!(row.edge_type, EdgeType::Indirect);
            }
        }
    }

    #[test]
    fn missing_parent_renders_as_root() {
        let snapshot = vec![
            changeset("eee", &[ParentLink::direct("gone")]),
            changeset("aaa", &[]),
        ];

        let rows = layout(&snapshot);

        assert_eq!(rows[0].level, 0);
        assert!(rows[0].is_first_child);
        assert_eq!(rows[0].edge_type, EdgeType::Direct);
    }

    #[test]
    fn parent_above_child_is_ignored() {
        // Out-of-order input violates the caller contract; the child must
        // still lay out instead of failing the redraw.
        let snapshot = vec![
            changeset("aaa", &[]),
            changeset("eee", &[ParentLink::direct("aaa")]),
        ];

        let rows = layout(&snapshot);

        assert_eq!(rows[1].level, 0);
        assert!(rows[1].is_first_child);
    }

    #[test]
    fn merge_uses_first_resolvable_link() {
        let snapshot = vec![
            changeset("mmm", &[ParentLink::direct("bbb"), ParentLink::direct("ccc")]),
            changeset("bbb", &[ParentLink::direct("aaa")]),
            changeset("ccc", &[ParentLink::direct("aaa")]),
            changeset("aaa", &[]),
        ];

        let rows = layout(&snapshot);

        // mmm follows its first parent's line; ccc opens a branch off aaa.
        assert_eq!(rows[0].level, 0);
        assert!(rows[0].is_first_child);
        assert_eq!(rows[2].level, 1);
        assert!(!rows[2].is_first_child);
    }

    #[test]
    fn layout_is_deterministic() {
        let snapshot = vec![
            changeset("eee", &[ParentLink::direct("bbb")]),
            changeset("ccc", &[ParentLink::elided("bbb")]),
            changeset("bbb", &[]),
        ];

        assert_eq!(layout(&snapshot), layout(&snapshot));
    }
}
