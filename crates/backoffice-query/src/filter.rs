use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::operator::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Text,
    Select,
    Checkbox,
    Number,
    Date,
}

impl FilterType {
    /// `number` and `date` are declared for views but have no encoding yet.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            FilterType::Text | FilterType::Select | FilterType::Checkbox
        )
    }

    fn ensure_supported(self, field: &str) -> Result<(), FilterError> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(FilterError::UnsupportedFilterType {
                field: field.to_string(),
                filter_type: self,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

/// A filter a view allows on its collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FilterOption>>,
}

impl FilterDecl {
    pub fn new(name: impl Into<String>, filter_type: FilterType) -> Self {
        Self {
            name: name.into(),
            filter_type,
            operator: Operator::Equals,
            options: None,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_options(mut self, options: Vec<FilterOption>) -> Self {
        self.options = Some(options);
        self
    }
}

/// One named, typed predicate contributing to the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterField {
    pub name: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    pub value: Option<String>,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FilterOption>>,
}

impl FilterField {
    /// Builds an empty field for `decl`. Fails for unsupported filter types.
    pub fn new(decl: &FilterDecl) -> Result<Self, FilterError> {
        decl.filter_type.ensure_supported(&decl.name)?;
        Ok(Self {
            name: decl.name.clone(),
            filter_type: decl.filter_type,
            value: None,
            operator: decl.operator,
            options: decl.options.clone(),
        })
    }

    /// Builds a field for `decl`, taking value and operator from a raw query value when present.
    pub fn from_raw(decl: &FilterDecl, raw: Option<&str>) -> Result<Self, FilterError> {
        let mut field = Self::new(decl)?;
        if let Some(raw) = raw {
            let (value, operator) = decode(&decl.name, raw, decl.filter_type)?;
            field.value = Some(value);
            field.operator = operator;
        }
        Ok(field)
    }

    pub fn is_empty(&self) -> bool {
        self.value.as_deref().is_none_or(str::is_empty)
    }

    /// The query-string form of this field, or `None` when it has no value.
    pub fn encoded(&self) -> Option<String> {
        match self.value.as_deref() {
            Some(v) if !v.is_empty() => Some(encode(v, self.operator)),
            _ => None,
        }
    }
}

/// `equals → v`, `contains → ~v`, `lesser_than → <v`, `greater_than → >v`.
pub fn encode(value: &str, operator: Operator) -> String {
    let prefix = operator.prefix();
    let mut out = String::with_capacity(prefix.len() + value.len());
    out.push_str(prefix);
    out.push_str(value);
    out
}

/// Inverse of [`encode`] for a field of `filter_type`.
///
/// Text values carry their operator prefix. Select and checkbox values are
/// always exact matches and are returned untouched.
pub fn decode(
    field: &str,
    raw: &str,
    filter_type: FilterType,
) -> Result<(String, Operator), FilterError> {
    filter_type.ensure_supported(field)?;
    match filter_type {
        FilterType::Text => {
            let (operator, value) = Operator::split(raw);
            Ok((value.to_string(), operator))
        }
        _ => Ok((raw.to_string(), Operator::Equals)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_and_date_fail_fast() {
        for filter_type in [FilterType::Number, FilterType::Date] {
            let decl = FilterDecl::new("amount", filter_type);
            let err = FilterField::new(&decl).unwrap_err();
            assert_eq!(
                err,
                FilterError::UnsupportedFilterType {
                    field: "amount".into(),
                    filter_type,
                }
            );
            assert!(decode("amount", "10", filter_type).is_err());
        }
    }

    #[test]
    fn text_decodes_operator_prefix() {
        assert_eq!(
            decode("name", "~acme", FilterType::Text).unwrap(),
            ("acme".to_string(), Operator::Contains)
        );
        assert_eq!(
            decode("name", "acme", FilterType::Text).unwrap(),
            ("acme".to_string(), Operator::Equals)
        );
    }

    #[test]
    fn select_and_checkbox_always_equal() {
        assert_eq!(
            decode("status", "~pending", FilterType::Select).unwrap(),
            ("~pending".to_string(), Operator::Equals)
        );
        assert_eq!(
            decode("verified", "true", FilterType::Checkbox).unwrap(),
            ("true".to_string(), Operator::Equals)
        );
    }

    #[test]
    fn empty_field_has_no_encoding() {
        let decl = FilterDecl::new("name", FilterType::Text).with_operator(Operator::Contains);
        let mut field = FilterField::new(&decl).unwrap();
        assert!(field.encoded().is_none());

        field.value = Some(String::new());
        assert!(field.is_empty());
        assert!(field.encoded().is_none());

        field.value = Some("acme".into());
        assert_eq!(field.encoded().as_deref(), Some("~acme"));
    }

    #[test]
    fn from_raw_keeps_declared_operator_when_absent() {
        let decl = FilterDecl::new("email", FilterType::Text).with_operator(Operator::Contains);
        let field = FilterField::from_raw(&decl, None).unwrap();
        assert_eq!(field.operator, Operator::Contains);
        assert_eq!(field.value, None);

        let field = FilterField::from_raw(&decl, Some(">b")).unwrap();
        assert_eq!(field.operator, Operator::GreaterThan);
        assert_eq!(field.value.as_deref(), Some("b"));
    }

    #[test]
    fn decl_deserializes_from_view_json() {
        let decl: FilterDecl = serde_json::from_value(serde_json::json!({
            "name": "status",
            "type": "select",
            "options": [{ "label": "Active", "value": "active" }]
        }))
        .unwrap();
        assert_eq!(decl.filter_type, FilterType::Select);
        assert_eq!(decl.operator, Operator::Equals);
        assert_eq!(decl.options.unwrap().len(), 1);
    }
}
