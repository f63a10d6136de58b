//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of groups kept by every top-N chart unless overridden
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound accepted for `--limit`
pub const MAX_LIMIT: usize = 1000;

/// Default chart width in pixels
pub const DEFAULT_CHART_WIDTH: usize = 900;

// Column names of the sales export
pub const ORDER_DATE: &str = "Order Date";
pub const SHIP_DATE: &str = "Ship Date";
pub const COUNTRY: &str = "Country";
pub const SEGMENT: &str = "Segment";
pub const CATEGORY: &str = "Category";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const PRODUCT_NAME: &str = "Product Name";
pub const CUSTOMER_NAME: &str = "Customer Name";
pub const ORDER_ID: &str = "Order ID";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const QUANTITY: &str = "Quantity";
pub const DISCOUNT: &str = "Discount";

/// Columns the full set of views reads from
pub const REQUIRED_COLUMNS: &[&str] = &[
    ORDER_DATE,
    SHIP_DATE,
    COUNTRY,
    SEGMENT,
    CATEGORY,
    SUB_CATEGORY,
    PRODUCT_NAME,
    CUSTOMER_NAME,
    ORDER_ID,
    SALES,
    PROFIT,
    QUANTITY,
    DISCOUNT,
];

/// Columns coerced to calendar dates right after ingestion
pub const DATE_COLUMNS: &[&str] = &[ORDER_DATE, SHIP_DATE];

/// Numeric columns described on the overview page
pub const SUMMARY_COLUMNS: &[&str] = &[SALES, PROFIT, QUANTITY];

/// Columns whose distinct counts are shown on the overview page
pub const OVERVIEW_DISTINCT_COLUMNS: &[(&str, &str)] = &[
    ("Unique Countries", COUNTRY),
    ("Unique Segments", SEGMENT),
    ("Unique Product Categories", CATEGORY),
];

// Cell spellings read as missing values (compared after trimming)
pub const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A",
];

/// Textual date layouts accepted by date coercion, tried in order.
/// Slash dates are month-first.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-time layouts accepted by date coercion (time part is discarded)
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// Spreadsheet serial dates count days from 1899-12-30; 2958465 is 9999-12-31
pub const MIN_SERIAL_DATE: f64 = 1.0;
pub const MAX_SERIAL_DATE: f64 = 2_958_465.0;
