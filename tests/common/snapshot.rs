//! Snapshot fixtures written to temporary files

use std::io::Write;
use tempfile::NamedTempFile;

/// One relationship row in the default snapshot layout
#[derive(Debug, Clone, Copy)]
pub struct SnapshotRow<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub block: bool,
    pub follow: bool,
}

impl<'a> SnapshotRow<'a> {
    pub fn follow(from: &'a str, to: &'a str) -> Self {
        Self { from, to, block: false, follow: true }
    }

    pub fn block(from: &'a str, to: &'a str) -> Self {
        Self { from, to, block: true, follow: false }
    }

    pub fn neither(from: &'a str, to: &'a str) -> Self {
        Self { from, to, block: false, follow: false }
    }
}

fn flag(set: bool) -> &'static str {
    if set {
        "t"
    } else {
        "f"
    }
}

/// Write rows under the standard eight-column header
pub fn write_snapshot(rows: &[SnapshotRow<'_>]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "actor_did,subject_did,rkey,created_at,updated_at,muted,blocked,followed"
    )
    .unwrap();
    for row in rows {
        writeln!(
            file,
            "{},{},3k2a,2024-01-01,2024-01-02,f,{},{}",
            row.from,
            row.to,
            flag(row.block),
            flag(row.follow)
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}
