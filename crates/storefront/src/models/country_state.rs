//! Country state translation type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One language's name for a country state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCountryStateTranslation {
    pub area_country_state_uuid: Uuid,
    pub language_uuid: Uuid,
    pub name: String,
}
