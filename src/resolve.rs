//! Ordering and collision handling for definition records.
//!
//! Every schema pass sorts its records before building symbols, and the order
//! it picks is the on-disk order of the generated constants. Two orderings are
//! used:
//!
//! - [`sort_by_name`]: plain ascending raw `name`.
//! - [`sort_by_precedence`]: ascending raw `name`, and among records sharing a
//!   name the *authoritative* one first (origin mentions `RFC`), then
//!   non-conflicting before conflicting. Remaining ties keep input order.
//!
//! Both sorts are stable, so the output only depends on the input sequence.
//!
//! ## Uniqueness
//!
//! Origin suffixing resolves the collisions the upstream data flags, but not
//! all of them (two RFC records can share a name). [`dedup_symbols`] is the
//! final guard: the first symbol for an identifier wins and later ones are
//! returned to the caller as dropped. Since the precedence sort puts the
//! authoritative record first, the survivor is the preferred definition.

use crate::record::Record;
use crate::symbol::Symbol;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

bitflags::bitflags! {
    /// Collision-relevant facts about a record, read once from its fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RecordFlags: u8 {
        /// `origin` mentions an RFC.
        const AUTHORITATIVE = 1 << 0;
        /// Upstream flagged the name as colliding (`conflict: true`).
        const CONFLICT      = 1 << 1;
        const OBSOLETE      = 1 << 2;
    }
}

impl RecordFlags {
    pub fn of(record: &Record) -> Self {
        let mut flags = RecordFlags::empty();
        flags.set(RecordFlags::AUTHORITATIVE, is_authoritative(record));
        flags.set(RecordFlags::CONFLICT, record.get_bool("conflict"));
        flags.set(RecordFlags::OBSOLETE, record.get_bool("obsolete"));
        flags
    }

    /// A flagged collision that is not settled by RFC authority.
    pub fn needs_suffix(self) -> bool {
        self.contains(RecordFlags::CONFLICT) && !self.contains(RecordFlags::AUTHORITATIVE)
    }
}

/// Whether a record's origin marks it as coming from an RFC.
pub fn is_authoritative(record: &Record) -> bool {
    record.get_str("origin").contains("RFC")
}

pub fn sort_by_name(records: &mut [&Record]) {
    records.sort_by(|a, b| a.get_str("name").cmp(b.get_str("name")));
}

/// Tie-break for records that share a raw name.
///
/// ```text
/// RFC origin      -> first
/// conflict=false  -> before conflict=true
/// otherwise       -> Equal (stable sort keeps input order)
/// ```
pub fn precedence(a: &Record, b: &Record) -> Ordering {
    a.get_str("name").cmp(b.get_str("name")).then_with(|| {
        let (fa, fb) = (RecordFlags::of(a), RecordFlags::of(b));
        fb.contains(RecordFlags::AUTHORITATIVE)
            .cmp(&fa.contains(RecordFlags::AUTHORITATIVE))
            .then_with(|| fa.contains(RecordFlags::CONFLICT).cmp(&fb.contains(RecordFlags::CONFLICT)))
    })
}

pub fn sort_by_precedence(records: &mut [&Record]) {
    records.sort_by(|a, b| precedence(a, b));
}

/// Number of records carrying each raw name.
pub fn name_counts<'a>(records: &[&'a Record]) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for &record in records {
        *counts.entry(record.get_str("name")).or_insert(0) += 1;
    }
    counts
}

/// Split `symbols` into the first occurrence of each identifier (in order)
/// and the later duplicates.
pub fn dedup_symbols(symbols: Vec<Symbol>) -> (Vec<Symbol>, Vec<Symbol>) {
    let mut seen: HashSet<String> = HashSet::with_capacity(symbols.len());
    let mut kept = Vec::with_capacity(symbols.len());
    let mut dropped = Vec::new();

    for symbol in symbols {
        if seen.insert(symbol.ident.clone()) {
            kept.push(symbol);
        } else {
            dropped.push(symbol);
        }
    }

    (kept, dropped)
}
