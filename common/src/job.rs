use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Categories offered by the category select, in display order.
pub const CATEGORIES: [&str; 10] = [
    "Graphics & Design",
    "Mobile App Development",
    "Frontend Web Development",
    "MERN Stack Development",
    "Account & Finance",
    "Artificial Intelligence",
    "Video Animation",
    "MEAN Stack Development",
    "MEVN Stack Development",
    "Data Entry Operator",
];

/// Backend-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A posted job as the backend sends it.
///
/// Salary and `expired` are kept as raw JSON values: the server sends
/// numbers and booleans, while local edits store whatever string the user
/// typed. Fields this crate does not know about are carried in `extra` so
/// an update sends the record back whole.
///
/// The id is read from `_id`, or from `id` when `_id` is absent. An `id`
/// next to `_id` is an ordinary extra field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(rename = "_id")]
    pub id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_salary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_from: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_to: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for JobRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        JobRecord::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for JobRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        if !fields.contains_key("_id") {
            if let Some(id) = fields.remove("id") {
                fields.insert("_id".to_string(), id);
            }
        }
        JobRecord::deserialize(Value::Object(fields)).map_err(D::Error::custom)
    }
}

impl JobRecord {
    /// An otherwise empty record with the given id.
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            country: None,
            city: None,
            category: None,
            location: None,
            description: None,
            fixed_salary: None,
            salary_from: None,
            salary_to: None,
            expired: None,
            extra: Map::new(),
        }
    }

    /// Stores `value` verbatim. Numeric and flag fields keep the raw
    /// string; nothing is parsed or validated.
    pub fn set_field(&mut self, field: JobField, value: impl Into<String>) {
        let value = value.into();
        match field {
            JobField::Title => self.title = Some(value),
            JobField::Country => self.country = Some(value),
            JobField::City => self.city = Some(value),
            JobField::Category => self.category = Some(value),
            JobField::Location => self.location = Some(value),
            JobField::Description => self.description = Some(value),
            JobField::FixedSalary => self.fixed_salary = Some(Value::String(value)),
            JobField::SalaryFrom => self.salary_from = Some(Value::String(value)),
            JobField::SalaryTo => self.salary_to = Some(Value::String(value)),
            JobField::Expired => self.expired = Some(Value::String(value)),
        }
    }

    /// Text shown in the input for `field`: the value when it is truthy,
    /// otherwise the empty string.
    pub fn display_value(&self, field: JobField) -> String {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match field {
            JobField::Title => text(&self.title),
            JobField::Country => text(&self.country),
            JobField::City => text(&self.city),
            JobField::Category => text(&self.category),
            JobField::Location => text(&self.location),
            JobField::Description => text(&self.description),
            JobField::FixedSalary => truthy_text(self.fixed_salary.as_ref()),
            JobField::SalaryFrom => truthy_text(self.salary_from.as_ref()),
            JobField::SalaryTo => truthy_text(self.salary_to.as_ref()),
            JobField::Expired => match &self.expired {
                Some(v) => value_text(v),
                None => String::new(),
            },
        }
    }

    /// Which salary inputs a card shows. A truthy `fixedSalary` wins;
    /// otherwise the from/to pair is shown, even when both are empty.
    pub fn salary_input(&self) -> SalaryInput {
        if self.has_fixed_salary() {
            SalaryInput::Fixed(self.display_value(JobField::FixedSalary))
        } else {
            SalaryInput::Range {
                from: self.display_value(JobField::SalaryFrom),
                to: self.display_value(JobField::SalaryTo),
            }
        }
    }

    pub fn has_fixed_salary(&self) -> bool {
        self.fixed_salary.as_ref().is_some_and(is_truthy)
    }

    pub fn has_ranged_salary(&self) -> bool {
        self.salary_from.as_ref().is_some_and(is_truthy)
            || self.salary_to.as_ref().is_some_and(is_truthy)
    }

    /// Whether the expired select reads TRUE.
    pub fn is_expired(&self) -> bool {
        match &self.expired {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }
}

/// Salary inputs rendered for a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalaryInput {
    Fixed(String),
    Range { from: String, to: String },
}

/// Editable fields of a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Title,
    Country,
    City,
    Category,
    Location,
    Description,
    FixedSalary,
    SalaryFrom,
    SalaryTo,
    Expired,
}

impl JobField {
    pub const ALL: [JobField; 10] = [
        JobField::Title,
        JobField::Country,
        JobField::City,
        JobField::Category,
        JobField::Location,
        JobField::Description,
        JobField::FixedSalary,
        JobField::SalaryFrom,
        JobField::SalaryTo,
        JobField::Expired,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Country => "country",
            JobField::City => "city",
            JobField::Category => "category",
            JobField::Location => "location",
            JobField::Description => "description",
            JobField::FixedSalary => "fixedSalary",
            JobField::SalaryFrom => "salaryFrom",
            JobField::SalaryTo => "salaryTo",
            JobField::Expired => "expired",
        }
    }

    /// Card label, e.g. `Title:`.
    pub fn label(self) -> String {
        let name = match self {
            JobField::FixedSalary | JobField::SalaryFrom | JobField::SalaryTo => "salary",
            other => other.as_str(),
        };
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{}:", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown job field `{}`", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for JobField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => value_text(v),
        _ => String::new(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_accepts_id_alias() {
        let job: JobRecord =
            serde_json::from_value(json!({"id": "1", "title": "A", "fixedSalary": 500})).unwrap();
        assert_eq!(job.id, JobId::from("1"));
        assert_eq!(job.title.as_deref(), Some("A"));
    }

    #[test]
    fn test_underscore_id_wins_over_id() {
        let job: JobRecord =
            serde_json::from_value(json!({"_id": "abc", "id": "legacy-7", "fixedSalary": 1}))
                .unwrap();
        assert_eq!(job.id, JobId::from("abc"));
        assert_eq!(job.extra.get("id"), Some(&json!("legacy-7")));

        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["_id"], "abc");
        assert_eq!(back["id"], "legacy-7");
    }

    #[test]
    fn test_missing_id_is_an_error() {
        assert!(serde_json::from_value::<JobRecord>(json!({"title": "A"})).is_err());
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let job: JobRecord = serde_json::from_value(json!({
            "_id": "abc",
            "postedBy": "u1",
            "jobPostedOn": "2024-01-01"
        }))
        .unwrap();
        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["_id"], "abc");
        assert_eq!(back["postedBy"], "u1");
        assert_eq!(back["jobPostedOn"], "2024-01-01");
    }

    #[test]
    fn test_fixed_salary_selects_fixed_input() {
        let job: JobRecord =
            serde_json::from_value(json!({"_id": "1", "fixedSalary": 500})).unwrap();
        assert_eq!(job.salary_input(), SalaryInput::Fixed("500".to_string()));
    }

    #[test]
    fn test_zero_fixed_salary_falls_back_to_range() {
        let job: JobRecord = serde_json::from_value(json!({
            "_id": "1",
            "fixedSalary": 0,
            "salaryFrom": 100,
            "salaryTo": 200
        }))
        .unwrap();
        assert_eq!(
            job.salary_input(),
            SalaryInput::Range {
                from: "100".to_string(),
                to: "200".to_string()
            }
        );
    }

    #[test]
    fn test_set_field_keeps_raw_string() {
        let mut job = JobRecord::new("1");
        job.set_field(JobField::FixedSalary, "12abc");
        assert_eq!(job.fixed_salary, Some(Value::String("12abc".to_string())));
        assert_eq!(job.display_value(JobField::FixedSalary), "12abc");
    }

    #[test]
    fn test_expired_display() {
        let mut job: JobRecord =
            serde_json::from_value(json!({"_id": "1", "expired": false})).unwrap();
        assert_eq!(job.display_value(JobField::Expired), "false");
        assert!(!job.is_expired());
        job.set_field(JobField::Expired, "true");
        assert!(job.is_expired());
    }

    #[test]
    fn test_field_parse_and_label() {
        assert_eq!("fixedsalary".parse::<JobField>(), Ok(JobField::FixedSalary));
        assert_eq!("title".parse::<JobField>(), Ok(JobField::Title));
        assert!("salary".parse::<JobField>().is_err());
        assert_eq!(JobField::Country.label(), "Country:");
        assert_eq!(JobField::SalaryTo.label(), "Salary:");
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(1.5)));
    }
}
