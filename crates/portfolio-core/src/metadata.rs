use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// MetadataField
// ---------------------------------------------------------------------------

/// Front-matter fields whose presence is tracked on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetadataField {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "made with")]
    MadeWith,
    #[serde(rename = "colors")]
    Colors,
    #[serde(rename = "layout")]
    Layout,
    #[serde(rename = "tags")]
    Tags,
    #[serde(rename = "wip")]
    Wip,
}

impl MetadataField {
    pub fn all() -> &'static [MetadataField] {
        &[
            MetadataField::Created,
            MetadataField::MadeWith,
            MetadataField::Colors,
            MetadataField::Layout,
            MetadataField::Tags,
            MetadataField::Wip,
        ]
    }

    /// The key as written in description front-matter.
    pub fn key(self) -> &'static str {
        match self {
            MetadataField::Created => "created",
            MetadataField::MadeWith => "made with",
            MetadataField::Colors => "colors",
            MetadataField::Layout => "layout",
            MetadataField::Tags => "tags",
            MetadataField::Wip => "wip",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Parsed description front-matter.
///
/// Values stay loosely typed (`serde_yaml::Value`); the accessors below are
/// where each field's notion of "filled in" lives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    map: Mapping,
}

impl Metadata {
    pub fn from_mapping(map: Mapping) -> Self {
        Self { map }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Truthiness the way a hand-written YAML flag is meant: `null`, `false`,
    /// `""`, `0` and empty collections are all false. Missing keys are false.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// Whether `field` is meaningfully filled in.
    pub fn is_present(&self, field: MetadataField) -> bool {
        let Some(value) = self.get(field.key()) else {
            return false;
        };
        if is_blank(value) {
            return false;
        }
        match field {
            MetadataField::Created => !stringify(value).contains('?'),
            MetadataField::MadeWith | MetadataField::Layout => !is_placeholder_list(value),
            MetadataField::Colors => has_any_color(value),
            MetadataField::Tags | MetadataField::Wip => true,
        }
    }

    pub fn presence(&self) -> PresenceMap {
        PresenceMap::from_metadata(self)
    }
}

/// Null or an empty string.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other).unwrap_or_default(),
    }
}

/// A list left as scaffolded: empty, or a single `-` with nothing after it.
fn is_placeholder_list(value: &Value) -> bool {
    match value {
        Value::Sequence(seq) => match seq.as_slice() {
            [] => true,
            [only] => only.is_null(),
            _ => false,
        },
        _ => false,
    }
}

fn has_any_color(value: &Value) -> bool {
    match value {
        Value::Mapping(colors) => ["primary", "secondary"]
            .iter()
            .any(|k| colors.get(*k).is_some_and(|v| !v.is_null())),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// PresenceMap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceMap(BTreeMap<MetadataField, bool>);

impl PresenceMap {
    /// Every field absent, used for projects with no description at all.
    pub fn absent() -> Self {
        Self(MetadataField::all().iter().map(|f| (*f, false)).collect())
    }

    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self(
            MetadataField::all()
                .iter()
                .map(|f| (*f, metadata.is_present(*f)))
                .collect(),
        )
    }

    pub fn get(&self, field: MetadataField) -> bool {
        self.0.get(&field).copied().unwrap_or(false)
    }

    pub fn any(&self) -> bool {
        self.0.values().any(|v| *v)
    }

    pub fn all(&self) -> bool {
        self.0.values().all(|v| *v)
    }

    /// Fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MetadataField, bool)> + '_ {
        self.0.iter().map(|(f, v)| (*f, *v))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(yaml: &str) -> Metadata {
        match serde_yaml::from_str::<Value>(yaml).unwrap() {
            Value::Mapping(m) => Metadata::from_mapping(m),
            _ => Metadata::default(),
        }
    }

    #[test]
    fn missing_keys_are_absent() {
        let presence = Metadata::default().presence();
        for field in MetadataField::all() {
            assert!(!presence.get(*field), "{field} should be absent");
        }
        assert_eq!(presence, PresenceMap::absent());
    }

    #[test]
    fn created_placeholder_is_absent() {
        assert!(!meta("created: ????-??-??").is_present(MetadataField::Created));
        assert!(meta("created: 2021-03-01").is_present(MetadataField::Created));
        assert!(meta("created: 2021").is_present(MetadataField::Created));
        assert!(!meta("created: 2021-??-??").is_present(MetadataField::Created));
    }

    #[test]
    fn made_with_single_null_is_absent() {
        assert!(!meta("made with: [null]").is_present(MetadataField::MadeWith));
        assert!(!meta("made with:\n    -\n").is_present(MetadataField::MadeWith));
        assert!(meta("made with: [null, pen]").is_present(MetadataField::MadeWith));
        assert!(meta("made with: [pen]").is_present(MetadataField::MadeWith));
        assert!(meta("made with: rust").is_present(MetadataField::MadeWith));
    }

    #[test]
    fn layout_follows_placeholder_rule() {
        assert!(!meta("layout:\n    - \n").is_present(MetadataField::Layout));
        assert!(meta("layout: [p1, m1]").is_present(MetadataField::Layout));
    }

    #[test]
    fn colors_need_primary_or_secondary() {
        assert!(!meta("colors: {primary: null, secondary: null}").is_present(MetadataField::Colors));
        assert!(!meta("colors:\n    primary:\n    secondary:\n").is_present(MetadataField::Colors));
        assert!(meta("colors: {primary: '#fff'}").is_present(MetadataField::Colors));
        assert!(meta("colors: {secondary: red}").is_present(MetadataField::Colors));
        assert!(!meta("colors: {cadre: red}").is_present(MetadataField::Colors));
    }

    #[test]
    fn tags_and_wip_need_only_non_null() {
        assert!(meta("wip: false").is_present(MetadataField::Wip));
        assert!(!meta("wip:").is_present(MetadataField::Wip));
        assert!(meta("tags: [cli]").is_present(MetadataField::Tags));
        assert!(!meta("tags: null").is_present(MetadataField::Tags));
    }

    #[test]
    fn truthiness() {
        let m = meta("a: true\nb: false\nc: ''\nd: 0\ne: []\nf: yes please\ng: 1\nh: null");
        assert!(m.is_truthy("a"));
        assert!(!m.is_truthy("b"));
        assert!(!m.is_truthy("c"));
        assert!(!m.is_truthy("d"));
        assert!(!m.is_truthy("e"));
        assert!(m.is_truthy("f"));
        assert!(m.is_truthy("g"));
        assert!(!m.is_truthy("h"));
        assert!(!m.is_truthy("missing"));
    }

    #[test]
    fn presence_is_stable_when_reapplied() {
        let original = meta(
            "created: 2021-03-01\nmade with: [null]\ncolors: {primary: '#000'}\ntags: [web]\n",
        );
        let first = original.presence();

        // Keep only the fields that counted as present and check again.
        let mut kept = Mapping::new();
        for (field, present) in first.iter() {
            if present {
                let value = original.get(field.key()).cloned().unwrap();
                kept.insert(Value::String(field.key().to_string()), value);
            }
        }
        let second = Metadata::from_mapping(kept).presence();

        assert_eq!(first, second);
        assert_eq!(first, original.presence());
    }

    #[test]
    fn presence_map_any_all() {
        assert!(!PresenceMap::absent().any());
        let full = meta(
            "created: 2020-01-01\nmade with: [figma]\ncolors: {primary: red}\nlayout: [p1]\ntags: [a]\nwip: true",
        )
        .presence();
        assert!(full.all());
        assert!(full.any());
    }
}
