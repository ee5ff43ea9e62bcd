//! Session feature encoding
//!
//! Turns one raw CSV row (field name -> raw string) into a typed
//! [`SessionRecord`] and its purchase label. All string-keyed access to the
//! input happens here; everything downstream works on the fixed-order
//! numeric vector returned by [`SessionRecord::to_features`].

use std::collections::HashMap;

use crate::errors::{Result, ShoppingError};

/// Binary purchase label: 1 if the session ended in revenue, 0 otherwise.
pub type Label = u8;

/// Width of the encoded feature vector.
pub const FEATURE_COUNT: usize = 17;

/// Input columns in feature-vector order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Administrative",
    "Administrative_Duration",
    "Informational",
    "Informational_Duration",
    "ProductRelated",
    "ProductRelated_Duration",
    "BounceRates",
    "ExitRates",
    "PageValues",
    "SpecialDay",
    "Month",
    "OperatingSystems",
    "Browser",
    "Region",
    "TrafficType",
    "VisitorType",
    "Weekend",
];

/// Column holding the ground-truth label.
pub const LABEL_COLUMN: &str = "Revenue";

const RETURNING_VISITOR: &str = "Returning_Visitor";
const TRUE_LITERAL: &str = "TRUE";

/// Calendar month, indexed from 0 (January) to 11 (December).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    June,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    // The dataset spells June in full but abbreviates July; the keys
    // are matched exactly as they appear in the data.
    const TABLE: [(&'static str, Month); 12] = [
        ("Jan", Month::Jan),
        ("Feb", Month::Feb),
        ("Mar", Month::Mar),
        ("Apr", Month::Apr),
        ("May", Month::May),
        ("June", Month::June),
        ("Jul", Month::Jul),
        ("Aug", Month::Aug),
        ("Sep", Month::Sep),
        ("Oct", Month::Oct),
        ("Nov", Month::Nov),
        ("Dec", Month::Dec),
    ];

    /// Look up a month by its literal key. Matching is exact and case-sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, month)| *month)
    }

    /// Zero-based month index.
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Anything that can hand out a raw field by column name.
pub trait RawRow {
    fn field(&self, column: &'static str) -> Option<&str>;
}

impl RawRow for HashMap<String, String> {
    fn field(&self, column: &'static str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl RawRow for HashMap<&str, &str> {
    fn field(&self, column: &'static str) -> Option<&str> {
        self.get(column).copied()
    }
}

/// One shopping session with every field parsed to its natural type.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRecord {
    pub administrative: i64,
    pub administrative_duration: f64,
    pub informational: i64,
    pub informational_duration: f64,
    pub product_related: i64,
    pub product_related_duration: f64,
    pub bounce_rates: f64,
    pub exit_rates: f64,
    pub page_values: f64,
    pub special_day: f64,
    pub month: Month,
    pub operating_systems: i64,
    pub browser: i64,
    pub region: i64,
    pub traffic_type: i64,
    pub returning_visitor: bool,
    pub weekend: bool,
}

impl SessionRecord {
    /// Fixed-order numeric vector, matching [`FEATURE_COLUMNS`].
    pub fn to_features(&self) -> Vec<f64> {
        vec![
            self.administrative as f64,
            self.administrative_duration,
            self.informational as f64,
            self.informational_duration,
            self.product_related as f64,
            self.product_related_duration,
            self.bounce_rates,
            self.exit_rates,
            self.page_values,
            self.special_day,
            f64::from(self.month.index()),
            self.operating_systems as f64,
            self.browser as f64,
            self.region as f64,
            self.traffic_type as f64,
            f64::from(u8::from(self.returning_visitor)),
            f64::from(u8::from(self.weekend)),
        ]
    }
}

/// Encode a raw row into a typed record and its label.
///
/// `row` is the 1-based data row number used in error messages.
///
/// # Errors
///
/// Fails on the first missing column, non-integer count, non-numeric real
/// or unrecognised month. Binary fields never fail: anything other than the
/// exact literal (`"Returning_Visitor"` / `"TRUE"`) encodes as 0.
pub fn encode_row<R: RawRow + ?Sized>(raw: &R, row: usize) -> Result<(SessionRecord, Label)> {
    let fields = Fields { raw, row };

    let record = SessionRecord {
        administrative: fields.integer("Administrative")?,
        administrative_duration: fields.real("Administrative_Duration")?,
        informational: fields.integer("Informational")?,
        informational_duration: fields.real("Informational_Duration")?,
        product_related: fields.integer("ProductRelated")?,
        product_related_duration: fields.real("ProductRelated_Duration")?,
        bounce_rates: fields.real("BounceRates")?,
        exit_rates: fields.real("ExitRates")?,
        page_values: fields.real("PageValues")?,
        special_day: fields.real("SpecialDay")?,
        month: fields.month("Month")?,
        operating_systems: fields.integer("OperatingSystems")?,
        browser: fields.integer("Browser")?,
        region: fields.integer("Region")?,
        traffic_type: fields.integer("TrafficType")?,
        returning_visitor: fields.text("VisitorType")? == RETURNING_VISITOR,
        weekend: fields.text("Weekend")? == TRUE_LITERAL,
    };

    let label = Label::from(fields.text(LABEL_COLUMN)? == TRUE_LITERAL);

    Ok((record, label))
}

struct Fields<'a, R: ?Sized> {
    raw: &'a R,
    row: usize,
}

impl<R: RawRow + ?Sized> Fields<'_, R> {
    fn text(&self, column: &'static str) -> Result<&str> {
        self.raw
            .field(column)
            .ok_or(ShoppingError::MissingColumn(column))
    }

    fn integer(&self, column: &'static str) -> Result<i64> {
        let value = self.text(column)?;
        value.parse().map_err(|_| ShoppingError::InvalidInteger {
            row: self.row,
            column,
            value: value.to_string(),
        })
    }

    // NaN and infinities parse but are not valid feature values
    fn real(&self, column: &'static str) -> Result<f64> {
        let value = self.text(column)?;
        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(parsed),
            _ => Err(ShoppingError::InvalidFloat {
                row: self.row,
                column,
                value: value.to_string(),
            }),
        }
    }

    fn month(&self, column: &'static str) -> Result<Month> {
        let value = self.text(column)?;
        Month::from_key(value).ok_or_else(|| ShoppingError::UnknownMonth {
            row: self.row,
            value: value.to_string(),
        })
    }
}
