use serde::Serialize;

/// A single user-defined property
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MessageProperty {
    name: String,
    value: String,
}

impl MessageProperty {
    /// Creates a property from the given name and value
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> MessageProperty {
        MessageProperty {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// TRUE if this property is named `name` (case-sensitive)
    pub fn has_same_name(&self, name: &str) -> bool {
        self.name == name
    }
}

/// The ordered user-defined properties of a message.
/// Holds at most one property per name; updating a property moves it to the end.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyList {
    entries: Vec<MessageProperty>,
}

impl PropertyList {
    /// Creates an empty property list
    pub fn new() -> PropertyList {
        PropertyList {
            entries: Vec::new(),
        }
    }

    /// The value of the first property named `name`, if any
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|property| property.has_same_name(name))
            .map(MessageProperty::value)
    }

    /// Adds the property, replacing (and moving to the end) any property with the same name
    pub fn set(&mut self, property: MessageProperty) {
        if let Some(position) = self
            .entries
            .iter()
            .position(|current| current.has_same_name(property.name()))
        {
            let _ = self.entries.remove(position);
        }

        self.entries.push(property);
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// TRUE if no property was set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the properties in order
    pub fn iter(&self) -> std::slice::Iter<'_, MessageProperty> {
        self.entries.iter()
    }

    /// A copy of all properties, in order
    pub fn to_vec(&self) -> Vec<MessageProperty> {
        self.entries.clone()
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a MessageProperty;
    type IntoIter = std::slice::Iter<'a, MessageProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
