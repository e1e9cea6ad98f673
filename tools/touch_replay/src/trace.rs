use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{bail, Context, Result};
use pinchframe::{ContactSample, TouchPhase};

#[derive(Clone, Debug, PartialEq)]
pub enum TraceRecord {
    Touch {
        ms: u64,
        phase: TouchPhase,
        touches: Vec<ContactSample>,
        changed: Vec<ContactSample>,
    },
    Tick {
        ms: u64,
    },
}

impl TraceRecord {
    pub fn ms(&self) -> u64 {
        match self {
            TraceRecord::Touch { ms, .. } | TraceRecord::Tick { ms } => *ms,
        }
    }
}

pub fn parse_trace(path: &Path) -> Result<Vec<TraceRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut out = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        if let Some(record) = parse_line(&line)
            .with_context(|| format!("{}:{line_no} invalid trace line", path.display()))?
        {
            out.push(record);
        }
    }
    Ok(out)
}

pub fn parse_line(line: &str) -> Result<Option<TraceRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    match parts.as_slice() {
        ["tick", ms] => Ok(Some(TraceRecord::Tick {
            ms: parse_ms(ms)?,
        })),
        ["touch", ms, phase, touches, changed] => Ok(Some(TraceRecord::Touch {
            ms: parse_ms(ms)?,
            phase: parse_phase(phase)?,
            touches: parse_contacts(touches)?,
            changed: parse_contacts(changed)?,
        })),
        ["touch", ..] => bail!("expected touch,<ms>,<phase>,<touches>,<changed>"),
        [kind, ..] => bail!("unknown record kind '{kind}'"),
        [] => Ok(None),
    }
}

fn parse_ms(raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .with_context(|| format!("invalid ms '{raw}'"))
}

fn parse_phase(raw: &str) -> Result<TouchPhase> {
    Ok(match raw.to_ascii_lowercase().as_str() {
        "start" => TouchPhase::Start,
        "move" => TouchPhase::Move,
        "end" => TouchPhase::End,
        "cancel" => TouchPhase::Cancel,
        other => bail!("unknown phase '{other}'"),
    })
}

/// `id:x:y` entries joined with `|`; an empty field or `-` means none.
fn parse_contacts(raw: &str) -> Result<Vec<ContactSample>> {
    if raw.is_empty() || raw == "-" {
        return Ok(Vec::new());
    }
    raw.split('|')
        .map(|entry| {
            let fields: Vec<&str> = entry.split(':').collect();
            let [id, x, y] = fields.as_slice() else {
                bail!("contact '{entry}' is not id:x:y");
            };
            let id = id
                .parse::<u32>()
                .with_context(|| format!("invalid contact id '{id}'"))?;
            let x = x.parse::<i32>().with_context(|| format!("invalid x '{x}'"))?;
            let y = y.parse::<i32>().with_context(|| format!("invalid y '{y}'"))?;
            Ok(ContactSample::new(id, x, y))
        })
        .collect()
}

pub fn parse_expected_kinds(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut kinds = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let kind = token.to_ascii_lowercase();
        if !crate::GESTURE_KINDS.contains(&kind.as_str()) {
            bail!(
                "{}:{line_no} invalid expected gesture kind: {token}",
                path.display()
            );
        }
        kinds.push(kind);
    }
    Ok(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_touch_record_with_contacts() {
        let record = parse_line("touch,120,start,1:10:20|2:-5:7,2:-5:7")
            .expect("parse")
            .expect("record");

        assert_eq!(
            record,
            TraceRecord::Touch {
                ms: 120,
                phase: TouchPhase::Start,
                touches: vec![ContactSample::new(1, 10, 20), ContactSample::new(2, -5, 7)],
                changed: vec![ContactSample::new(2, -5, 7)],
            }
        );
        assert_eq!(record.ms(), 120);
    }

    #[test]
    fn empty_contact_lists_are_allowed() {
        let record = parse_line("touch, 300, end, -, 1:170:100")
            .expect("parse")
            .expect("record");
        let TraceRecord::Touch { touches, changed, .. } = record else {
            panic!("expected touch record");
        };
        assert!(touches.is_empty());
        assert_eq!(changed, vec![ContactSample::new(1, 170, 100)]);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        assert_eq!(parse_line("# header").expect("parse"), None);
        assert_eq!(parse_line("   ").expect("parse"), None);
        assert_eq!(
            parse_line("tick,600").expect("parse"),
            Some(TraceRecord::Tick { ms: 600 })
        );
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(parse_line("touch,1,start,1:2").is_err());
        assert!(parse_line("touch,1,hover,-,-").is_err());
        assert!(parse_line("touch,x,start,-,-").is_err());
        assert!(parse_line("pen,1").is_err());
    }
}
