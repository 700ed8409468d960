use super::model::Record;

/// A comma-separated multi-value field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiField {
    Director,
    Cast,
    Country,
    Genre,
}

impl MultiField {
    /// Raw text of this field on `record`, if present.
    pub fn raw(self, record: &Record) -> Option<&str> {
        match self {
            MultiField::Director => record.director.as_deref(),
            MultiField::Cast => record.cast.as_deref(),
            MultiField::Country => record.country.as_deref(),
            MultiField::Genre => record.listed_in.as_deref(),
        }
    }

    /// Values of this field on `record`; empty when the field is absent.
    pub fn values(self, record: &Record) -> impl Iterator<Item = &str> {
        self.raw(record).into_iter().flat_map(split_values)
    }
}

/// Split on commas, trim each piece and drop empty pieces. Duplicates are kept.
pub fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// One `(record, value)` row per value of `field`, in record order and then
/// split order.
pub fn explode<'a>(view: &[&'a Record], field: MultiField) -> Vec<(&'a Record, &'a str)> {
    view.iter()
        .flat_map(|&record| field.values(record).map(move |value| (record, value)))
        .collect()
}
