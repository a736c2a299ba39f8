//! Events emitted after database writes.
//!
//! Each written event names the entity table it covers and carries the uuids
//! that were written plus any per-row errors. Event names follow the
//! `<entity>.written` convention so subscribers can match on them without
//! depending on the concrete types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An event describing a completed write to one entity table.
pub trait WrittenEvent {
    /// Event name, `<entity>.written`.
    const NAME: &'static str;
    /// Entity (table) the write touched.
    const ENTITY_NAME: &'static str;

    fn uuids(&self) -> &[Uuid];

    fn errors(&self) -> &[String];

    /// Type-erased form for the event bus.
    fn to_envelope(&self) -> WrittenEventEnvelope {
        WrittenEventEnvelope {
            name: Self::NAME.to_string(),
            entity_name: Self::ENTITY_NAME.to_string(),
            uuids: self.uuids().to_vec(),
            errors: self.errors().to_vec(),
        }
    }
}

/// A written event with its concrete type erased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenEventEnvelope {
    pub name: String,
    pub entity_name: String,
    pub uuids: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Define a [`WrittenEvent`] for an entity.
///
/// ```rust
/// # use emporium_core::define_written_event;
/// # use emporium_core::events::WrittenEvent;
/// define_written_event!(TaxWrittenEvent, "tax");
///
/// assert_eq!(TaxWrittenEvent::NAME, "tax.written");
/// ```
#[macro_export]
macro_rules! define_written_event {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            pub uuids: Vec<::uuid::Uuid>,
            pub errors: Vec<String>,
        }

        impl $name {
            #[must_use]
            pub const fn new(uuids: Vec<::uuid::Uuid>) -> Self {
                Self {
                    uuids,
                    errors: Vec::new(),
                }
            }
        }

        impl $crate::events::WrittenEvent for $name {
            const NAME: &'static str = concat!($entity, ".written");
            const ENTITY_NAME: &'static str = $entity;

            fn uuids(&self) -> &[::uuid::Uuid] {
                &self.uuids
            }

            fn errors(&self) -> &[String] {
                &self.errors
            }
        }
    };
}

define_written_event!(
    AreaCountryStateTranslationWrittenEvent,
    "area_country_state_translation"
);
define_written_event!(CustomerGroupWrittenEvent, "customer_group");
define_written_event!(
    CustomerGroupTranslationWrittenEvent,
    "customer_group_translation"
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_area_country_state_translation_names() {
        assert_eq!(
            AreaCountryStateTranslationWrittenEvent::NAME,
            "area_country_state_translation.written"
        );
        assert_eq!(
            AreaCountryStateTranslationWrittenEvent::ENTITY_NAME,
            "area_country_state_translation"
        );
    }

    #[test]
    fn test_envelope_carries_uuids() {
        let uuid = Uuid::from_u128(5);
        let event = CustomerGroupTranslationWrittenEvent::new(vec![uuid]);
        let envelope = event.to_envelope();

        assert_eq!(envelope.name, "customer_group_translation.written");
        assert_eq!(envelope.entity_name, "customer_group_translation");
        assert_eq!(envelope.uuids, vec![uuid]);

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("errors").is_none());
    }
}
