//! Attribute builders shared by the schemas.

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Description};

pub(crate) fn string(constraint: AttributeConstraint, description: &str) -> Attribute {
    Attribute {
        attr_type: AttributeType::String,
        description: Description::markdown(description),
        constraint,
        ..Default::default()
    }
}

pub(crate) fn boolean(constraint: AttributeConstraint, description: &str) -> Attribute {
    Attribute {
        attr_type: AttributeType::Bool,
        description: Description::markdown(description),
        constraint,
        ..Default::default()
    }
}

pub(crate) fn string_list(constraint: AttributeConstraint, description: &str) -> Attribute {
    Attribute {
        attr_type: AttributeType::List(Box::new(AttributeType::String)),
        description: Description::markdown(description),
        constraint,
        ..Default::default()
    }
}

pub(crate) fn sensitive(attribute: Attribute) -> Attribute {
    Attribute {
        sensitive: true,
        ..attribute
    }
}

/// `Description` text listing the accepted protobuf names.
pub(crate) fn with_values(text: &str, names: &[&str]) -> String {
    format!("{text}, supported values: {}", names.join(", "))
}
