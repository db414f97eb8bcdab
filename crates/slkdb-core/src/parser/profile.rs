//! Profile text tables (`[id]` sections with `key=value` lines).
//!
//! Like SYLK cells, values are kept as raw bytes.

use super::{lines, text_value};
use crate::identifier::ObjectId;
use crate::manager::StringInterner;
use crate::record::RecordSet;

/// One `[id]` section.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Section {
    pub(crate) id: String,
    pub(crate) entries: Vec<(String, Vec<u8>)>,
}

/// Split profile text into sections.
///
/// Lines before the first section and lines without `=` are ignored, as
/// are `//` comments, including one trailing a section header.
pub(crate) fn sections(data: &[u8]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in lines(data) {
        let line = line.trim_ascii();
        if line.is_empty() || line.starts_with(b"//") {
            continue;
        }

        if let Some(id) = header(line) {
            sections.push(Section {
                id: String::from_utf8_lossy(id.trim_ascii()).into_owned(),
                entries: Vec::new(),
            });
            continue;
        }

        let Some(section) = sections.last_mut() else {
            continue;
        };
        let Some(eq) = line.iter().position(|b| *b == b'=') else {
            continue;
        };
        let (key, value) = (&line[..eq], &line[eq + 1..]);
        section.entries.push((
            String::from_utf8_lossy(key.trim_ascii()).into_owned(),
            unquote(value.trim_ascii()).to_vec(),
        ));
    }

    sections
}

/// The id of a `[id]` line, which may be followed by a `//` comment.
fn header(line: &[u8]) -> Option<&[u8]> {
    let rest = line.strip_prefix(b"[")?;
    let close = rest.iter().position(|b| *b == b']')?;
    let trailer = rest[close + 1..].trim_ascii();
    if trailer.is_empty() || trailer.starts_with(b"//") {
        Some(&rest[..close])
    } else {
        None
    }
}

fn unquote(value: &[u8]) -> &[u8] {
    if value.len() >= 2 && value.starts_with(b"\"") && value.ends_with(b"\"") {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Merge profile text into `set`.
pub(crate) fn merge(
    data: &[u8],
    new_records: bool,
    set: &mut RecordSet,
    strings: &mut StringInterner,
) {
    for section in sections(data) {
        if section.id.is_empty() {
            continue;
        }
        let id = ObjectId::alias(section.id);
        if !new_records && !set.contains(&id) {
            continue;
        }

        let record = set.entry(id);
        for (key, value) in &section.entries {
            record.insert(strings.intern(key), text_value(value, strings));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections() {
        let parsed = sections(
            b"ignored=1\n\
             [Misc]\n\
             // comment\n\
             GoldTextColor=255,255,220,0\n\
             Name=\"Gold, Mine\"\n\
             no separator\n\
             \n\
             [ hfoo ]\n\
             Tip = Train a Footman\n",
        );

        assert_eq!(
            parsed,
            vec![
                Section {
                    id: "Misc".into(),
                    entries: vec![
                        ("GoldTextColor".into(), b"255,255,220,0".to_vec()),
                        ("Name".into(), b"Gold, Mine".to_vec()),
                    ],
                },
                Section {
                    id: "hfoo".into(),
                    entries: vec![("Tip".into(), b"Train a Footman".to_vec())],
                },
            ]
        );
    }

    #[test]
    fn test_merge_decorates_only() {
        let mut set = RecordSet::new();
        set.entry(ObjectId::alias("hfoo"));
        let mut strings = StringInterner::new();

        merge(b"[hfoo]\nName=Footman\n[hkni]\nName=Knight\n", false, &mut set, &mut strings);
        assert_eq!(set.len(), 1);

        merge(b"[hkni]\nName=Knight\n", true, &mut set, &mut strings);
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get(&ObjectId::alias("hkni")).unwrap().get("Name"),
            Some(&Value::from("Knight"))
        );
    }

    #[test]
    fn test_header_with_trailing_comment() {
        let parsed = sections(
            b"[hkni]\nName=Knight\n\
              [hfoo] // Footman\nName=Footman\n\
              [hpea]x\nTip=skip\n",
        );

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].id, "hfoo");
        // `[hpea]x` is not a header, so its entries stay in hfoo
        assert_eq!(
            parsed[1].entries,
            vec![
                ("Name".into(), b"Footman".to_vec()),
                ("Tip".into(), b"skip".to_vec()),
            ]
        );
        assert_eq!(parsed[0].entries, vec![("Name".into(), b"Knight".to_vec())]);
    }

    #[test]
    fn test_merge_keeps_legacy_bytes() {
        let mut set = RecordSet::new();
        let mut strings = StringInterner::new();
        merge(b"[hfoo]\nName=\xd6\xd0\nTip=\"ok\"\n", true, &mut set, &mut strings);

        let record = set.get(&ObjectId::alias("hfoo")).unwrap();
        assert_eq!(record.get("Name").and_then(Value::as_bytes), Some(&b"\xd6\xd0"[..]));
        assert_eq!(record.get("Tip"), Some(&Value::from("ok")));
    }
}
