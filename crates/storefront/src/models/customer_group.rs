//! Customer group domain type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer group, hydrated in one language.
///
/// Groups drive price display (gross vs net), group-wide discounts and the
/// minimum order value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerGroup {
    pub uuid: Uuid,
    /// Short technical key, e.g. `EK` or `H`.
    pub group_key: String,
    /// Name in the requested language, else the fallback language.
    pub name: Option<String>,
    pub display_gross: bool,
    pub input_gross: bool,
    pub has_global_discount: bool,
    pub percentage_global_discount: Decimal,
    pub minimum_order_amount: Decimal,
    pub minimum_order_amount_surcharge: Decimal,
}
