//! CMX3600 line patterns
//!
//! Compiled once on first use and shared for the lifetime of the process.

use regex::Regex;
use std::sync::LazyLock;

/// `HH:MM:SS:FF`, with `;` or `.` before the frames field for drop-frame
const TC: &str = r"\d{2}:\d{2}:\d{2}[:;.]\d{2}";

/// Event line: number, reel, track, transition, source in/out, record in/out.
///
/// A transition duration (`D 030`) may follow the transition code; it is
/// matched but not captured.
pub static EVENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(\d+)\s+(\S+)\s+(\w+)\s+(\w+)(?:\s+\d{{1,3}})?\s+({TC})\s+({TC})\s+({TC})\s+({TC})"
    ))
    .expect("event pattern is valid")
});

/// Comment line: everything after the leading `*`
pub static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\s?(.*)$").expect("comment pattern is valid"));

pub static SOURCE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\*\s*SOURCE FILE:\s*(.*)$").expect("source file pattern is valid")
});

pub static SOURCE_CLIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\*\s*FROM CLIP NAME:\s*(.*)$").expect("source clip pattern is valid")
});

/// Track token: one leading character, optional numeric suffix
pub static TRACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w)(\d+)?").expect("track pattern is valid"));

/// Motion effect line: reel, speed in frames per second, entry timecode
pub static MOTION_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*M2\s+(\S+)\s+(-?\d+(?:\.\d+)?)\s+({TC})"))
        .expect("motion effect pattern is valid")
});

/// Full timecode string, anchored at both ends
///
/// Hours take two or more digits so long timelines read back what they render.
pub static TIMECODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})([:;.])(\d{2})$").expect("timecode pattern is valid")
});
