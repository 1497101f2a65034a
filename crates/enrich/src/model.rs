use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const CHINESE_NAME: &str = "chineseName";
pub const PRIMARY_SCHOOL: &str = "primarySchool";
pub const SECONDARY_SCHOOL: &str = "secondarySchool";
pub const RELATIONSHIP: &str = "relationship";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One school entry from the dataset, kept as its JSON object.
///
/// Only `chineseName` has to be present. Assigning a field that already
/// exists keeps its position; new fields are appended. Untouched values are
/// written back exactly as read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl<'de> Deserialize<'de> for EntityRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::deserialize(deserializer)?;
        if !fields.contains_key(CHINESE_NAME) {
            return Err(D::Error::missing_field(CHINESE_NAME));
        }
        Ok(Self(fields))
    }
}

impl EntityRecord {
    pub fn new(chinese_name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(CHINESE_NAME.into(), Value::String(chinese_name.into()));
        Self(fields)
    }

    /// The join key, when it is a string. `null`, numbers and the like never
    /// match a lookup row.
    pub fn chinese_name(&self) -> Option<&str> {
        self.get_str(CHINESE_NAME)
    }

    pub fn primary_school(&self) -> Option<&str> {
        self.get_str(PRIMARY_SCHOOL)
    }

    pub fn secondary_school(&self) -> Option<&str> {
        self.get_str(SECONDARY_SCHOOL)
    }

    pub fn relationship(&self) -> Option<&str> {
        self.get_str(RELATIONSHIP)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Set a field in place; an existing key keeps its position.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Ordered records, loaded from and written back to JSON.
pub type Dataset = Vec<EntityRecord>;

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// Counters from building the lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupStats {
    pub rows: usize,
    pub distinct_names: usize,
    /// Rows whose name had already been seen (last write wins).
    pub overwritten: usize,
    pub related: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichSummary {
    pub records: usize,
    pub related: usize,
    /// Records whose `chineseName` has no row in the lookup table.
    pub unmatched: usize,
}

/// Everything a finished run reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output: String,
    pub lookup: LookupStats,
    pub summary: EnrichSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> EntityRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn only_chinese_name_is_required() {
        let record = parse(r#"{"chineseName":"晨曦幼稚園"}"#);
        assert_eq!(record.chinese_name(), Some("晨曦幼稚園"));
        assert_eq!(record.primary_school(), None);
        assert_eq!(record.relationship(), None);
    }

    #[test]
    fn missing_chinese_name_is_rejected() {
        let err = serde_json::from_str::<EntityRecord>(r#"{"englishName":"A"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `chineseName`"), "{err}");
    }

    #[test]
    fn non_string_chinese_name_is_kept_but_has_no_key() {
        let null_name = parse(r#"{"chineseName":null}"#);
        let number_name = parse(r#"{"chineseName":7}"#);

        assert_eq!(null_name.chinese_name(), None);
        assert_eq!(number_name.chinese_name(), None);
        assert_eq!(number_name.get(CHINESE_NAME), Some(&serde_json::json!(7)));
    }

    #[test]
    fn set_keeps_existing_position_and_appends_new_fields() {
        let mut record = parse(r#"{"primarySchool":"p","chineseName":"A","district":"沙田"}"#);

        record.set(PRIMARY_SCHOOL, "");
        record.set(RELATIONSHIP, "有關係");

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"primarySchool":"","chineseName":"A","district":"沙田","relationship":"有關係"}"#
        );
    }

    #[test]
    fn large_numbers_round_trip_exactly() {
        let input = r#"{"chineseName":"A","schoolNo":123456789012345678901234,"ratio":0.10000000000000000001}"#;
        let record = parse(input);
        assert_eq!(serde_json::to_string(&record).unwrap(), input);
    }
}
