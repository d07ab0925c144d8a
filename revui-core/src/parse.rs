use std::collections::HashSet;

use chrono::{DateTime, Local};
use graph::{Changeset, ParentLink};
use smallvec::SmallVec;

use crate::error::JjError;

/// Field separator inside one log record.
pub const FIELD_SEP: char = '\u{1f}';
/// Record separator between revisions.
pub const RECORD_SEP: char = '\u{1e}';

/// Template handed to `jj log -T`: one field-separated record per revision,
/// so parsing never has to guess at layout.
pub fn log_template() -> String {
    [
        "change_id",
        "change_id.shortest()",
        "author.name()",
        "author.timestamp().format(\"%Y-%m-%dT%H:%M:%S%z\")",
        "description.first_line()",
        "bookmarks.join(\" \")",
        "parents.map(|p| p.change_id()).join(\" \")",
        concat!(
            "concat(",
            "if(current_working_copy, \"w\", \"-\"), ",
            "if(immutable, \"i\", \"-\"), ",
            "if(conflict, \"c\", \"-\"), ",
            "if(empty, \"e\", \"-\"), ",
            "if(root, \"r\", \"-\"))",
        ),
    ]
    .join(&format!(" ++ \"{FIELD_SEP}\" ++ "))
        + &format!(" ++ \"{RECORD_SEP}\"")
}

/// Parse the output of a templated `jj log --no-graph` run, preserving jj's
/// revision order.
pub fn parse_log(output: &str) -> Result<Vec<Changeset>, JjError> {
    let mut changesets = Vec::new();
    for record in output.split(RECORD_SEP) {
        if record.trim().is_empty() {
            continue;
        }
        changesets.push(parse_record(record)?);
    }
    Ok(changesets)
}

fn parse_record(record: &str) -> Result<Changeset, JjError> {
    let fields: Vec<&str> = record.split(FIELD_SEP).collect();
    let &[change_id, short_id, author, timestamp, description, bookmarks, parents, flags] =
        fields.as_slice()
    else {
        return Err(JjError::Parse(format!(
            "expected 8 fields, got {}",
            fields.len()
        )));
    };

    let timestamp = DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z")
        .map_err(|err| JjError::Parse(format!("bad timestamp {timestamp:?}: {err}")))?
        .with_timezone(&Local);

    let mut changeset = Changeset::new(change_id, short_id, author, timestamp, description);
    changeset.bookmarks = bookmarks.split_whitespace().map(str::to_string).collect();
    changeset.parents = parents.split_whitespace().map(ParentLink::direct).collect();
    changeset.is_working_copy = flags.contains('w');
    changeset.is_immutable = flags.contains('i');
    changeset.has_conflict = flags.contains('c');
    changeset.is_empty = flags.contains('e');
    changeset.is_root = flags.contains('r');
    Ok(changeset)
}

/// Rewrite parent links whose target is not in the snapshot.
///
/// `resolver` maps a missing parent id to the nearest ancestor the snapshot
/// still displays; the rewritten link is marked elided. Links that resolve
/// nowhere are dropped, so a revision cut off from its displayed ancestry
/// lays out as a root.
pub fn resolve_elided_links<F>(changesets: &mut [Changeset], mut resolver: F)
where
    F: FnMut(&str) -> Option<String>,
{
    let present: HashSet<String> = changesets
        .iter()
        .map(|cs| cs.change_id.clone())
        .collect();

    for changeset in changesets.iter_mut() {
        if changeset
            .parents
            .iter()
            .all(|link| present.contains(&link.id))
        {
            continue;
        }
        let mut links: SmallVec<[ParentLink; 2]> = SmallVec::new();
        for link in changeset.parents.drain(..) {
            if present.contains(&link.id) {
                if links.iter().all(|kept| kept.id != link.id) {
                    links.push(link);
                }
                continue;
            }
            match resolver(&link.id) {
                Some(ancestor) if present.contains(&ancestor) => {
                    if links.iter().all(|kept| kept.id != ancestor) {
                        links.push(ParentLink::elided(ancestor));
                    }
                }
                _ => log::debug!("dropping unresolvable parent {}", link.id),
            }
        }
        changeset.parents = links;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn record(fields: &[&str]) -> String {
        fields.join(&FIELD_SEP.to_string())
    }

    fn sample_record() -> String {
        record(&[
            "qpvuntsm12345678",
            "qp",
            "alice",
            "2024-03-01T12:00:00+0100",
            "teach the parser new tricks",
            "main feature",
            "zzzzzzzz rlvkpnrz",
            "w----",
        ])
    }

    #[test]
    fn parses_a_full_record() {
        let output = format!("{}{}", sample_record(), RECORD_SEP);
        let changesets = parse_log(&output).unwrap();

        assert_eq!(changesets.len(), 1);
        let cs = &changesets[0];
        assert_eq!(cs.change_id, "qpvuntsm12345678");
        assert_eq!(cs.change_id_short, "qp");
        assert_eq!(cs.id_rest(), "vuntsm12345678");
        assert_eq!(cs.author, "alice");
        assert_eq!(cs.description, "teach the parser new tricks");
        assert_eq!(cs.bookmarks, vec!["main", "feature"]);
        assert_eq!(cs.parents.len(), 2);
        assert_eq!(cs.parents[0], ParentLink::direct("zzzzzzzz"));
        assert!(cs.is_working_copy);
        assert!(!cs.is_immutable);
        assert!(!cs.has_conflict);
    }

    #[test]
    fn parses_flag_field() {
        let output = format!(
            "{}{}",
            record(&[
                "abc", "a", "bob", "2024-03-01T12:00:00+0000", "", "", "", "-icer",
            ]),
            RECORD_SEP
        );
        let changesets = parse_log(&output).unwrap();

        let cs = &changesets[0];
        assert!(!cs.is_working_copy);
        assert!(cs.is_immutable);
        assert!(cs.has_conflict);
        assert!(cs.is_empty);
        assert!(cs.is_root);
    }

    #[test]
    fn parses_multiple_records_in_order() {
        let first = record(&["aaa", "a", "x", "2024-03-01T12:00:00+0000", "", "", "", "-----"]);
        let second = record(&["bbb", "b", "x", "2024-03-01T11:00:00+0000", "", "", "aaa", "-----"]);
        let output = format!("{first}{RECORD_SEP}{second}{RECORD_SEP}\n");

        let changesets = parse_log(&output).unwrap();

        assert_eq!(changesets.len(), 2);
        assert_eq!(changesets[0].change_id, "aaa");
        assert_eq!(changesets[1].change_id, "bbb");
    }

    #[test]
    fn rejects_short_records() {
        let output = format!("only{FIELD_SEP}four{FIELD_SEP}fields{FIELD_SEP}here{RECORD_SEP}");
        assert!(matches!(parse_log(&output), Err(JjError::Parse(_))));
    }

    #[test]
    fn rejects_bad_timestamps() {
        let output = format!(
            "{}{}",
            record(&["abc", "a", "bob", "yesterday", "", "", "", "-----"]),
            RECORD_SEP
        );
        assert!(matches!(parse_log(&output), Err(JjError::Parse(_))));
    }

    #[test]
    fn template_names_every_field() {
        let template = log_template();
        for keyword in [
            "change_id",
            "author.name()",
            "description.first_line()",
            "bookmarks.join",
            "parents.map",
            "current_working_copy",
            "immutable",
            "conflict",
            "empty",
            "root",
        ] {
            assert!(template.contains(keyword), "missing {keyword}");
        }
    }

    fn snapshot(ids: &[(&str, &[&str])]) -> Vec<Changeset> {
        let ts = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        ids.iter()
            .map(|(id, parents)| {
                let mut cs = Changeset::new(*id, &id[..1], "alice", ts, "");
                cs.parents = parents.iter().map(|p| ParentLink::direct(*p)).collect();
                cs
            })
            .collect()
    }

    #[test]
    fn keeps_present_links_untouched() {
        let mut changesets = snapshot(&[("eee", &["bbb"]), ("bbb", &[])]);
        resolve_elided_links(&mut changesets, |_| panic!("resolver must not run"));
        assert_eq!(changesets[0].parents[0], ParentLink::direct("bbb"));
    }

    #[test]
    fn rewrites_missing_links_to_elided_ancestors() {
        let mut changesets = snapshot(&[("eee", &["hidden"]), ("bbb", &[])]);
        resolve_elided_links(&mut changesets, |missing| {
            assert_eq!(missing, "hidden");
            Some("bbb".to_string())
        });
        assert_eq!(changesets[0].parents[0], ParentLink::elided("bbb"));
    }

    #[test]
    fn drops_links_that_resolve_nowhere() {
        let mut changesets = snapshot(&[("eee", &["hidden"]), ("bbb", &[])]);
        resolve_elided_links(&mut changesets, |_| None);
        assert!(changesets[0].parents.is_empty());
    }

    #[test]
    fn deduplicates_rewritten_links() {
        let mut changesets = snapshot(&[("mmm", &["gone1", "gone2"]), ("bbb", &[])]);
        resolve_elided_links(&mut changesets, |_| Some("bbb".to_string()));
        assert_eq!(changesets[0].parents.len(), 1);
        assert_eq!(changesets[0].parents[0], ParentLink::elided("bbb"));
    }
}
