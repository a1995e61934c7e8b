/// Default page size for the report table
pub const DEFAULT_PAGE_SIZE: i64 = 15;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Address string used as the frequency-grouping key when a report carries
/// no usable address. Grouping key only, never shown to users.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Default display address substituted when a structured location is missing
/// its address field. Inherited from the original data set; overridable via
/// FALLBACK_ADDRESS (see `ReportsConfig`).
pub const DEFAULT_FALLBACK_ADDRESS: &str =
    "10-6-38/2 road no:-10, vijaynagar colony, Mahabubnagar";
