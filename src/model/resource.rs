//! Resource metadata as seen by the layout engine.

/// One metadata value attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    /// Numeric id of the property this value belongs to.
    pub property_id: u64,
    /// The literal text value.
    pub value: String,
}

impl PropertyValue {
    pub fn new(property_id: u64, value: impl Into<String>) -> Self {
        Self {
            property_id,
            value: value.into(),
        }
    }
}

/// An identified entity (an item or an item set) whose metadata drives
/// folder naming. Values keep their stored order; the first matching
/// value wins when deriving a folder name.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    /// Numeric resource id.
    pub id: u64,
    /// Ordered metadata values.
    pub values: Vec<PropertyValue>,
}

impl Resource {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            values: Vec::new(),
        }
    }

    /// Add a metadata value, preserving insertion order.
    pub fn with_value(mut self, property_id: u64, value: impl Into<String>) -> Self {
        self.values.push(PropertyValue::new(property_id, value));
        self
    }

    /// Values of one property, in stored order.
    pub fn values_of(&self, property_id: u64) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(move |v| v.property_id == property_id)
            .map(|v| v.value.as_str())
    }
}
