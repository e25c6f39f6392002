use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::listing::{
    Currency, Listing, ListingCondition, MarketplaceCategory, RawListing, TargetAudience,
    ValidatedListing,
};

/// Form field a validation issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListingField {
    /// Listing title.
    Title,
    /// Description body.
    Description,
    /// Category selector.
    Category,
    /// Condition selector.
    Condition,
    /// Asking price.
    Price,
    /// Currency selector.
    Currency,
    /// Pickup location.
    Location,
    /// Delivery checkbox.
    ShippingAvailable,
    /// Units in stock.
    StockUnits,
    /// Audience selector.
    TargetAudience,
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Category => "category",
            Self::Condition => "condition",
            Self::Price => "price",
            Self::Currency => "currency",
            Self::Location => "location",
            Self::ShippingAvailable => "shippingAvailable",
            Self::StockUnits => "stockUnits",
            Self::TargetAudience => "targetAudience",
        };
        f.write_str(name)
    }
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Offending field.
    pub field: ListingField,
    /// Message suitable for display next to the form.
    pub message: String,
}

impl FieldIssue {
    fn new(field: ListingField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every violation found in a submitted listing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("listing failed validation with {} issue(s): {}", .issues.len(), join_messages(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Issues in form field order.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Display messages only.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.message.clone()).collect()
    }

    /// Whether a given field was rejected.
    #[must_use]
    pub fn has_field(&self, field: ListingField) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn join_messages(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Length limits applied to free-text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum description length in characters.
    pub max_description_chars: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 120,
            max_description_chars: 2_000,
        }
    }
}

/// Turns a [`RawListing`] into a [`ValidatedListing`], collecting all issues.
#[derive(Debug, Clone, Default)]
pub struct ListingValidator {
    limits: ValidationLimits,
}

impl ListingValidator {
    /// Validator with custom limits.
    #[must_use]
    pub const fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Validates every field and reports all violations together.
    pub fn validate(&self, raw: &RawListing) -> Result<ValidatedListing, ValidationError> {
        let mut issues = Vec::new();

        let title = required_text(
            raw.title.as_ref(),
            ListingField::Title,
            "Title is required",
            self.limits.max_title_chars,
            &mut issues,
        );
        let description = required_text(
            raw.description.as_ref(),
            ListingField::Description,
            "Description is required",
            self.limits.max_description_chars,
            &mut issues,
        );
        let category = choice(
            raw.category.as_ref(),
            ListingField::Category,
            "Category",
            MarketplaceCategory::from_label,
            &mut issues,
        );
        let condition = choice(
            raw.condition.as_ref(),
            ListingField::Condition,
            "Condition",
            ListingCondition::from_label,
            &mut issues,
        );
        let price = parse_price(raw.price.as_ref(), &mut issues);
        let currency = choice(
            raw.currency.as_ref(),
            ListingField::Currency,
            "Currency",
            Currency::from_label,
            &mut issues,
        );
        let location = required_text(
            raw.location.as_ref(),
            ListingField::Location,
            "Location is required",
            usize::MAX,
            &mut issues,
        );
        let shipping_available = parse_shipping(raw.shipping_available.as_ref(), &mut issues);
        let stock_units = parse_stock_units(raw.stock_units.as_ref(), &mut issues);
        let target_audience = choice(
            raw.target_audience.as_ref(),
            ListingField::TargetAudience,
            "Target audience",
            TargetAudience::from_label,
            &mut issues,
        );

        match (
            title,
            description,
            category,
            condition,
            price,
            currency,
            location,
            shipping_available,
            stock_units,
            target_audience,
        ) {
            (
                Some(title),
                Some(description),
                Some(category),
                Some(condition),
                Some(price),
                Some(currency),
                Some(location),
                Some(shipping_available),
                Some(stock_units),
                Some(target_audience),
            ) => Ok(ValidatedListing::new(Listing {
                title,
                description,
                category,
                condition,
                price,
                currency,
                location,
                shipping_available,
                stock_units,
                target_audience,
            })),
            _ => Err(ValidationError { issues }),
        }
    }
}

/// Text form value after trimming.
enum Text<'a> {
    Missing,
    Present(&'a str),
    WrongType,
}

fn text(value: Option<&Value>) -> Text<'_> {
    match value {
        None | Some(Value::Null) => Text::Missing,
        Some(Value::String(raw)) => match raw.trim() {
            "" => Text::Missing,
            trimmed => Text::Present(trimmed),
        },
        Some(_) => Text::WrongType,
    }
}

fn required_text(
    value: Option<&Value>,
    field: ListingField,
    missing: &str,
    max_chars: usize,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    let trimmed = match text(value) {
        Text::Present(trimmed) => trimmed,
        Text::Missing => {
            issues.push(FieldIssue::new(field, missing));
            return None;
        }
        Text::WrongType => {
            issues.push(FieldIssue::new(
                field,
                format!("{} must be text", capitalize(field)),
            ));
            return None;
        }
    };
    let chars = trimmed.chars().count();
    if chars > max_chars {
        issues.push(FieldIssue::new(
            field,
            format!("{} must be at most {max_chars} characters (got {chars})", capitalize(field)),
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn choice<T>(
    value: Option<&Value>,
    field: ListingField,
    label: &str,
    parse: impl Fn(&str) -> Option<T>,
    issues: &mut Vec<FieldIssue>,
) -> Option<T> {
    match text(value) {
        Text::Missing => {
            issues.push(FieldIssue::new(field, format!("{label} is required")));
            None
        }
        Text::WrongType => {
            issues.push(FieldIssue::new(
                field,
                format!("{label} must be one of the listed options"),
            ));
            None
        }
        Text::Present(raw) => {
            let parsed = parse(raw);
            if parsed.is_none() {
                issues.push(FieldIssue::new(
                    field,
                    format!("{label} '{raw}' is not a supported option"),
                ));
            }
            parsed
        }
    }
}

fn parse_shipping(value: Option<&Value>, issues: &mut Vec<FieldIssue>) -> Option<bool> {
    match value {
        None | Some(Value::Null) => Some(false),
        Some(Value::Bool(offered)) => Some(*offered),
        Some(_) => {
            issues.push(FieldIssue::new(
                ListingField::ShippingAvailable,
                "Shipping availability must be true or false",
            ));
            None
        }
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|parsed| parsed.is_finite())
}

fn parse_price(value: Option<&Value>, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        issues.push(FieldIssue::new(ListingField::Price, "Price is required"));
        return None;
    };
    match number(value) {
        None => {
            issues.push(FieldIssue::new(ListingField::Price, "Price must be a number"));
            None
        }
        Some(amount) if amount < 0.0 => {
            issues.push(FieldIssue::new(
                ListingField::Price,
                "Price cannot be negative",
            ));
            None
        }
        Some(amount) => Some(amount),
    }
}

fn parse_stock_units(value: Option<&Value>, issues: &mut Vec<FieldIssue>) -> Option<u32> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        issues.push(FieldIssue::new(
            ListingField::StockUnits,
            "Stock units are required",
        ));
        return None;
    };
    let Some(units) = number(value) else {
        issues.push(FieldIssue::new(
            ListingField::StockUnits,
            "Stock units must be a number",
        ));
        return None;
    };
    if units.fract() != 0.0 {
        issues.push(FieldIssue::new(
            ListingField::StockUnits,
            "Stock units must be a whole number",
        ));
        return None;
    }
    if units < 1.0 {
        issues.push(FieldIssue::new(
            ListingField::StockUnits,
            "Stock units must be at least 1",
        ));
        return None;
    }
    if units > f64::from(u32::MAX) {
        issues.push(FieldIssue::new(
            ListingField::StockUnits,
            "Stock units are too large",
        ));
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let units = units as u32;
    Some(units)
}

fn capitalize(field: ListingField) -> String {
    let name = field.to_string();
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::default_listing;

    #[test]
    fn reference_listing_validates() {
        let listing = ListingValidator::default()
            .validate(&default_listing())
            .unwrap();
        assert_eq!(listing.category, MarketplaceCategory::Electronics);
        assert_eq!(listing.condition, ListingCondition::LikeNew);
        assert_eq!(listing.stock_units, 1);
        assert!(listing.shipping_available);
    }

    #[test]
    fn reports_every_violated_field() {
        let mut raw = default_listing();
        raw.price = Some(Value::from(-1));
        raw.stock_units = Some(Value::from(0));
        let err = ListingValidator::default().validate(&raw).unwrap_err();
        assert!(err.issues().len() >= 2);
        assert!(err.has_field(ListingField::Price));
        assert!(err.has_field(ListingField::StockUnits));
        assert!(err
            .messages()
            .contains(&"Price cannot be negative".to_string()));
    }

    #[test]
    fn empty_form_lists_all_required_fields_in_order() {
        let err = ListingValidator::default()
            .validate(&RawListing::default())
            .unwrap_err();
        let fields: Vec<_> = err.issues().iter().map(|issue| issue.field).collect();
        assert_eq!(
            fields,
            vec![
                ListingField::Title,
                ListingField::Description,
                ListingField::Category,
                ListingField::Condition,
                ListingField::Price,
                ListingField::Currency,
                ListingField::Location,
                ListingField::StockUnits,
                ListingField::TargetAudience,
            ]
        );
    }

    #[test]
    fn rejects_unknown_options_and_whitespace_text() {
        let mut raw = default_listing();
        raw.title = Some("   ".into());
        raw.category = Some("Groceries".into());
        raw.currency = Some("EUR".into());
        let err = ListingValidator::default().validate(&raw).unwrap_err();
        assert_eq!(err.issues().len(), 3);
        assert!(err.messages()[1].contains("Groceries"));
    }

    #[test]
    fn stock_units_must_be_whole() {
        let mut raw = default_listing();
        raw.stock_units = Some(Value::from(1.5));
        let err = ListingValidator::default().validate(&raw).unwrap_err();
        assert_eq!(err.messages(), vec!["Stock units must be a whole number"]);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut raw = default_listing();
        raw.price = Some(Value::from(" 2500 "));
        raw.stock_units = Some(Value::from("3"));
        raw.shipping_available = None;
        let listing = ListingValidator::default().validate(&raw).unwrap();
        assert!((listing.price - 2500.0).abs() < f64::EPSILON);
        assert_eq!(listing.stock_units, 3);
        assert!(!listing.shipping_available);
    }

    #[test]
    fn enforces_title_limit() {
        let mut raw = default_listing();
        raw.title = Some("x".repeat(20).into());
        let validator = ListingValidator::new(ValidationLimits {
            max_title_chars: 10,
            ..ValidationLimits::default()
        });
        let err = validator.validate(&raw).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Title must be at most 10 characters (got 20)"]
        );
    }

    #[test]
    fn mistyped_fields_are_reported_with_the_rest() {
        let raw: RawListing = serde_json::from_str(
            r#"{
                "title": "",
                "description": "Barely used",
                "category": 7,
                "condition": "Good",
                "price": -1,
                "currency": "INR",
                "location": "Delhi",
                "shippingAvailable": "yes",
                "stockUnits": 0,
                "targetAudience": "Mid-Range"
            }"#,
        )
        .unwrap();
        let err = ListingValidator::default().validate(&raw).unwrap_err();
        let fields: Vec<_> = err.issues().iter().map(|issue| issue.field).collect();
        assert_eq!(
            fields,
            vec![
                ListingField::Title,
                ListingField::Category,
                ListingField::Price,
                ListingField::ShippingAvailable,
                ListingField::StockUnits,
            ]
        );
        assert_eq!(
            err.messages(),
            vec![
                "Title is required",
                "Category must be one of the listed options",
                "Price cannot be negative",
                "Shipping availability must be true or false",
                "Stock units must be at least 1",
            ]
        );
    }

    #[test]
    fn non_string_text_field_is_flagged() {
        let mut raw = default_listing();
        raw.location = Some(Value::from(400_001));
        let err = ListingValidator::default().validate(&raw).unwrap_err();
        assert_eq!(err.messages(), vec!["Location must be text"]);
    }

    #[test]
    fn error_display_summarises_messages() {
        let mut raw = default_listing();
        raw.location = None;
        let err = ListingValidator::default().validate(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "listing failed validation with 1 issue(s): Location is required"
        );
    }

    #[test]
    fn text_fields_are_trimmed() {
        let mut raw = default_listing();
        raw.location = Some("  Pune ".into());
        let listing = ListingValidator::default().validate(&raw).unwrap();
        assert_eq!(listing.location, "Pune");
    }
}
