use chrono::{Local, TimeZone};
use graph::{layout, Changeset, ParentLink};
use revui_ui::{Palette, RowRenderer};

/// Render a synthetic change graph to stdout: branches, an elided stretch,
/// bookmarks, a conflict, and wide glyphs, without needing a jj workspace.
fn main() {
    println!("revui graph demo");
    println!("================\n");

    let changesets = sample_changesets();
    let rows = layout(&changesets);

    let palette = Palette::default();
    let renderer = RowRenderer::new(&palette);

    for (index, row) in rows.iter().enumerate() {
        for line in renderer.render(row, index == 0, None) {
            println!("{line}");
        }
    }

    println!();
    println!("{} changesets, {} rows", changesets.len(), rows.len());
}

fn sample_changesets() -> Vec<Changeset> {
    let ts = |hour| Local.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap();

    let mut working = Changeset::new("qpvuntsm1234", "qp", "alice", ts(16), "");
    working.is_working_copy = true;
    working.is_empty = true;
    working.parents.push(ParentLink::direct("rlvkpnrz5678"));

    let mut feature = Changeset::new("rlvkpnrz5678", "rl", "alice", ts(15), "teach 🦀 to draw graphs");
    feature.bookmarks = vec!["feature".to_string()];
    feature.parents.push(ParentLink::direct("mzvwutvl9abc"));

    let mut side = Changeset::new("kkmpptxz3456", "kk", "bob", ts(14), "experiment on the side");
    side.has_conflict = true;
    side.parents.push(ParentLink::direct("mzvwutvl9abc"));

    let mut trunk = Changeset::new("mzvwutvl9abc", "mz", "alice", ts(12), "stabilize the layout");
    trunk.bookmarks = vec!["main".to_string()];
    trunk.parents.push(ParentLink::elided("zzzzzzzzzzzz"));

    let mut root = Changeset::new("zzzzzzzzzzzz", "zz", "", ts(0), "");
    root.is_root = true;
    root.is_immutable = true;

    vec![working, feature, side, trunk, root]
}
