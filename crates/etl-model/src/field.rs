//! Request fields: timing columns carry a timeline, everything else passes through.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::interval::TimeInterval;
use crate::level::Level;
use crate::timeline::Timeline;

/// Semantic role a user assigned to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Subject,
    Quality,
    Component,
    Timing,
    Value,
}

impl Purpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Quality => "quality",
            Self::Component => "component",
            Self::Timing => "timing",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timing column and, once segmented, its timeline.
///
/// `format` and `interval` stay optional because a column can be marked as
/// timing before the user has configured either; segmentation simply waits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedField {
    pub levels: Vec<Level>,
    pub format: Option<String>,
    pub interval: Option<TimeInterval>,
    /// Substitute for empty raw values.
    pub null_value: Option<String>,
    pub timeline: Option<Timeline>,
}

impl SegmentedField {
    pub fn new(levels: Vec<Level>) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: TimeInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_null_value(mut self, value: impl Into<String>) -> Self {
        self.null_value = Some(value.into());
        self
    }

    /// Whether a timeline has been computed for this field.
    pub fn is_segmented(&self) -> bool {
        self.timeline.is_some()
    }
}

/// A column with any purpose other than timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntimedField {
    purpose: Purpose,
    pub levels: Vec<Level>,
}

impl UntimedField {
    /// Creates a pass-through field; timing columns belong in [`SegmentedField`].
    pub fn new(purpose: Purpose, levels: Vec<Level>) -> Result<Self> {
        if purpose == Purpose::Timing {
            return Err(ModelError::PurposeMismatch {
                purpose: purpose.to_string(),
            });
        }
        Ok(Self { purpose, levels })
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }
}

/// One column of a request, split once into timing and non-timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldSpec", into = "FieldSpec")]
pub enum Field {
    Timing(SegmentedField),
    Untimed(UntimedField),
}

impl Field {
    pub fn purpose(&self) -> Purpose {
        match self {
            Self::Timing(_) => Purpose::Timing,
            Self::Untimed(field) => field.purpose(),
        }
    }

    pub fn levels(&self) -> &[Level] {
        match self {
            Self::Timing(field) => &field.levels,
            Self::Untimed(field) => &field.levels,
        }
    }

    pub fn as_timing(&self) -> Option<&SegmentedField> {
        match self {
            Self::Timing(field) => Some(field),
            Self::Untimed(_) => None,
        }
    }
}

/// Name-keyed collection of request fields.
///
/// Entries are shared so that untouched fields keep their identity across
/// recomputation; iteration order is name order.
pub type FieldSet = BTreeMap<String, Arc<Field>>;

/// Flat wire shape of a [`Field`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldSpec {
    purpose: Purpose,
    #[serde(default)]
    levels: Vec<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval: Option<TimeInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    null_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeline: Option<Timeline>,
}

impl TryFrom<FieldSpec> for Field {
    type Error = ModelError;

    fn try_from(spec: FieldSpec) -> Result<Self> {
        match spec.purpose {
            Purpose::Timing => Ok(Self::Timing(SegmentedField {
                levels: spec.levels,
                format: spec.format,
                interval: spec.interval,
                null_value: spec.null_value,
                timeline: spec.timeline,
            })),
            purpose => Ok(Self::Untimed(UntimedField::new(purpose, spec.levels)?)),
        }
    }
}

impl From<Field> for FieldSpec {
    fn from(field: Field) -> Self {
        match field {
            Field::Timing(field) => Self {
                purpose: Purpose::Timing,
                levels: field.levels,
                format: field.format,
                interval: field.interval,
                null_value: field.null_value,
                timeline: field.timeline,
            },
            Field::Untimed(field) => Self {
                purpose: field.purpose,
                levels: field.levels,
                format: None,
                interval: None,
                null_value: None,
                timeline: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalUnit;

    #[test]
    fn timing_purpose_is_rejected_for_untimed_fields() {
        let err = UntimedField::new(Purpose::Timing, Vec::new()).unwrap_err();
        assert!(matches!(err, ModelError::PurposeMismatch { .. }));
        assert!(UntimedField::new(Purpose::Subject, Vec::new()).is_ok());
    }

    #[test]
    fn field_deserializes_by_purpose() {
        let json = r#"{
            "purpose": "timing",
            "levels": [{ "value": "2020-01", "count": 2 }],
            "format": "YYYY-MM",
            "interval": { "unit": "M", "count": 1 },
            "nullValue": "2020-01"
        }"#;
        let field: Field = serde_json::from_str(json).expect("deserialize timing field");
        let timing = field.as_timing().expect("timing field");
        assert_eq!(timing.format.as_deref(), Some("YYYY-MM"));
        assert_eq!(timing.interval.map(|i| i.unit()), Some(IntervalUnit::Month));
        assert_eq!(timing.null_value.as_deref(), Some("2020-01"));
        assert!(!timing.is_segmented());

        let field: Field =
            serde_json::from_str(r#"{ "purpose": "subject", "levels": [] }"#).expect("subject");
        assert_eq!(field.purpose(), Purpose::Subject);
        assert!(field.as_timing().is_none());
    }

    #[test]
    fn untimed_fields_drop_timing_keys_on_serialize() {
        let field = Field::Untimed(
            UntimedField::new(Purpose::Value, vec![Level::new("42", 1)]).expect("value field"),
        );
        let json = serde_json::to_string(&field).expect("serialize");
        assert_eq!(
            json,
            r#"{"purpose":"value","levels":[{"value":"42","count":1}]}"#
        );
    }
}
