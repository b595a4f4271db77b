//! Loading timeline requests from JSON.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use etl_model::{Field, FieldSet};

use crate::column::check_file_size;
use crate::error::{IngestError, Result};

/// A request: every field contributing to one result matrix, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRequest {
    pub fields: BTreeMap<String, Field>,
}

impl TimelineRequest {
    /// Converts the request into a shared field set.
    pub fn into_field_set(self) -> FieldSet {
        self.fields
            .into_iter()
            .map(|(name, field)| (name, Arc::new(field)))
            .collect()
    }

    /// Builds a request back from a field set, e.g. to write results out.
    pub fn from_field_set(fields: &FieldSet) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(name, field)| (name.clone(), field.as_ref().clone()))
                .collect(),
        }
    }
}

/// Parses a request from a JSON string.
pub fn parse_request(json: &str, path: &Path) -> Result<TimelineRequest> {
    serde_json::from_str(json).map_err(|source| IngestError::InvalidRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a request file.
pub fn load_request(path: &Path) -> Result<TimelineRequest> {
    check_file_size(path)?;
    let json = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let request = parse_request(&json, path)?;
    tracing::debug!(
        path = %path.display(),
        fields = request.fields.len(),
        "loaded timeline request"
    );
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_model::Purpose;

    const REQUEST: &str = r#"{
        "fields": {
            "visit_date": {
                "purpose": "timing",
                "levels": [{ "value": "2020-01", "count": 4 }],
                "format": "YYYY-MM",
                "interval": { "unit": "M", "count": 1 },
                "nullValue": null
            },
            "site": { "purpose": "subject", "levels": [{ "value": "A", "count": 3 }] }
        }
    }"#;

    #[test]
    fn parses_mixed_fields() {
        let request = parse_request(REQUEST, Path::new("request.json")).unwrap();
        assert_eq!(request.fields.len(), 2);
        assert_eq!(request.fields["visit_date"].purpose(), Purpose::Timing);
        assert_eq!(request.fields["site"].purpose(), Purpose::Subject);

        let fields = request.clone().into_field_set();
        assert_eq!(TimelineRequest::from_field_set(&fields), request);
    }

    #[test]
    fn unknown_unit_code_is_rejected() {
        let json = REQUEST.replace(r#""unit": "M""#, r#""unit": "Q""#);
        let err = parse_request(&json, Path::new("request.json")).unwrap_err();
        assert!(matches!(err, IngestError::InvalidRequest { .. }));
        assert!(err.to_string().contains("invalid interval unit 'Q'"));
    }
}
