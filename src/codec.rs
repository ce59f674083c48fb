// Line-oriented record format of the user file.
//
// Each user is one block:
//   ---USER START---
//   Name: <text>
//   Age: <integer>
//   Height: <float>
//   Weight: <float>
//   Username: <text>
//   Password: <text>
//   Subscribed: Yes|No
//   CustomPlan: <text, may be empty>
//   ---USER END---
// Blocks are found by scanning for the start marker and run through the
// end marker. A block that is cut short by another start marker, runs long,
// has a wrong label or an unparseable value fails on its own; scanning picks
// up again after it, so later records are never shifted.

use crate::error::StoreError;
use crate::model::{self, User};

pub const START_MARKER: &str = "---USER START---";
pub const END_MARKER: &str = "---USER END---";

/// Field labels in on-disk order.
pub const LABELS: [&str; 8] = [
    "Name",
    "Age",
    "Height",
    "Weight",
    "Username",
    "Password",
    "Subscribed",
    "CustomPlan",
];

/// Lines following the start marker: eight fields plus the end marker.
pub const BODY_LINES: usize = LABELS.len() + 1;

/// Encode a user as a full block, markers included, every line `\n` terminated.
pub fn encode_record(user: &User) -> String {
    let mut out = String::with_capacity(160);
    out.push_str(START_MARKER);
    out.push('\n');
    for (label, value) in LABELS.iter().zip(field_values(user)) {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    out.push_str(END_MARKER);
    out.push('\n');
    out
}

fn field_values(user: &User) -> [String; 8] {
    [
        user.name.clone(),
        user.age.to_string(),
        user.height.to_string(),
        user.weight.to_string(),
        user.username.clone(),
        user.password.clone(),
        if user.subscribed { "Yes" } else { "No" }.to_string(),
        user.custom_plan.clone(),
    ]
}

/// Decode the lines that follow a start marker.
///
/// `record` is the 1-based block position, used only in error messages.
pub fn decode_record(record: usize, body: &[&str]) -> Result<User, StoreError> {
    let values = raw_values(record, body)?;
    let [name, age, height, weight, username, password, subscribed, custom_plan] = values;

    let height = parse_number(record, "Height", height)?;
    let weight = parse_number(record, "Weight", weight)?;
    model::validate_height(height).map_err(|e| malformed(record, e.to_string()))?;
    model::validate_weight(weight).map_err(|e| malformed(record, e.to_string()))?;

    Ok(User {
        name: name.to_string(),
        age: parse_number(record, "Age", age)?,
        height,
        weight,
        username: username.to_string(),
        password: password.to_string(),
        subscribed: match subscribed {
            "Yes" => true,
            "No" => false,
            other => {
                return Err(malformed(
                    record,
                    format!("Subscribed must be Yes or No, got {other:?}"),
                ))
            }
        },
        custom_plan: custom_plan.to_string(),
    })
}

/// Check the block shape and labels and return the eight field values as
/// written, without parsing numbers.
pub fn raw_values<'a>(record: usize, body: &[&'a str]) -> Result<[&'a str; 8], StoreError> {
    if body.len() != BODY_LINES {
        return Err(malformed(
            record,
            format!("expected {BODY_LINES} lines after the start marker, found {}", body.len()),
        ));
    }
    if body[LABELS.len()] != END_MARKER {
        return Err(malformed(record, format!("missing {END_MARKER:?}")));
    }

    let mut values = [""; 8];
    for (slot, (label, line)) in values.iter_mut().zip(LABELS.iter().zip(body.iter().copied())) {
        *slot = field_value(line, label).ok_or_else(|| {
            malformed(record, format!("expected a {label:?} line, found {line:?}"))
        })?;
    }
    Ok(values)
}

/// Value after the first `": "`, provided the text before it is `label`.
/// A bare `"Label:"` (trailing space trimmed by an editor) is an empty value.
fn field_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    match line.split_once(": ") {
        Some((key, value)) if key == label => Some(value),
        Some(_) => None,
        None => line
            .strip_prefix(label)
            .filter(|rest| *rest == ":")
            .map(|_| ""),
    }
}

fn parse_number<T: std::str::FromStr>(record: usize, label: &str, raw: &str) -> Result<T, StoreError> {
    raw.trim()
        .parse()
        .map_err(|_| malformed(record, format!("{label} is not a number: {raw:?}")))
}

fn malformed(record: usize, reason: String) -> StoreError {
    StoreError::MalformedRecord { record, reason }
}

/// One block found in the file: its raw lines (markers included, no line
/// terminators) and the decode outcome.
#[derive(Debug)]
pub struct RecordBlock {
    pub record: usize,
    pub lines: Vec<String>,
    pub decoded: Result<User, StoreError>,
}

impl RecordBlock {
    pub fn user(&self) -> Option<&User> {
        self.decoded.as_ref().ok()
    }

    /// Username as written in the block, even if other fields fail to decode
    /// or the block has lines added or missing.
    pub fn username(&self) -> Option<&str> {
        self.lines
            .iter()
            .skip(1)
            .find_map(|line| field_value(line, "Username"))
    }

    pub fn body(&self) -> Vec<&str> {
        self.lines.iter().skip(1).map(String::as_str).collect()
    }

    /// Re-emit the block exactly as read.
    pub fn write_raw(&self, out: &mut String) {
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Split file contents into record blocks. Text outside blocks is ignored.
pub fn scan_blocks(content: &str) -> Vec<RecordBlock> {
    let lines: Vec<&str> = content.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i] != START_MARKER {
            i += 1;
            continue;
        }

        // Run through the end marker, or stop before a new start marker.
        // Over-long blocks stay whole so a rewrite copies every line.
        let start = i;
        let mut end = i + 1;
        while end < lines.len() && lines[end] != START_MARKER {
            end += 1;
            if lines[end - 1] == END_MARKER {
                break;
            }
        }

        let record = blocks.len() + 1;
        let body = &lines[start + 1..end];
        blocks.push(RecordBlock {
            record,
            lines: lines[start..end].iter().map(|l| l.to_string()).collect(),
            decoded: decode_record(record, body),
        });
        i = end;
    }
    blocks
}
