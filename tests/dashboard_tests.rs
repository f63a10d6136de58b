use pretty_assertions::assert_eq;
use sales_dash::aggregator::GroupValue;
use sales_dash::dashboard::{render_view, Outcome, Session, View};
use sales_dash::parser::{load_table, FileFormat};
use sales_dash::utils::SessionError;

const SUPERSTORE_CSV: &str = "\
Order ID,Order Date,Ship Date,Country,Segment,Category,Sub-Category,Product Name,Customer Name,Sales,Profit,Quantity,Discount
CA-2016-152156,11/8/2016,11/11/2016,United States,Consumer,Furniture,Bookcases,Bush Somerset Collection Bookcase,Claire Gute,261.96,41.91,2,0
CA-2016-152156,11/8/2016,11/11/2016,United States,Consumer,Furniture,Chairs,Hon Deluxe Fabric Chair,Claire Gute,731.94,219.58,3,0
CA-2016-138688,6/12/2016,6/16/2016,United States,Corporate,Office Supplies,Labels,Self-Adhesive Address Labels,Darrin Van Huff,14.62,6.87,2,0
US-2015-108966,10/11/2015,10/18/2015,United States,Consumer,Furniture,Tables,Bretford Table,Sean O'Donnell,957.58,-383.03,5,0.45
US-2015-108966,10/11/2015,10/18/2015,United States,Consumer,Office Supplies,Storage,Eldon Storage,Sean O'Donnell,22.37,2.52,2,0.2
CA-2014-115812,6/9/2014,soon,United States,Home Office,Technology,Phones,Mitel Phone,Brosina Hoffman,907.15,90.72,6,0.2
";

#[test]
fn test_products_view() {
    let table = load_table(SUPERSTORE_CSV.as_bytes(), FileFormat::Csv).unwrap();

    let report = render_view(&table, View::Products, 10, "superstore.csv");

    assert_eq!(report.view, View::Products);
    assert_eq!(report.row_count, 6);
    assert!(report.overview.is_none());
    assert_eq!(report.sections.len(), 6);
    assert!(report.sections.iter().all(|s| !s.outcome.is_error()));

    let categories = report
        .sections
        .iter()
        .find(|s| s.id == "sales_by_category")
        .unwrap();
    let pairs = &categories.outcome.value().unwrap().pairs;
    assert_eq!(pairs[0].key, "Furniture");
    assert_eq!(pairs[1].key, "Technology");
    assert_eq!(pairs[2].key, "Office Supplies");
}

#[test]
fn test_customers_view_orders_chart() {
    let table = load_table(SUPERSTORE_CSV.as_bytes(), FileFormat::Csv).unwrap();

    let report = render_view(&table, View::Customers, 10, "superstore.csv");

    let orders = report
        .sections
        .iter()
        .find(|s| s.id == "top_customers_by_orders")
        .unwrap();
    let pairs = &orders.outcome.value().unwrap().pairs;
    assert!(pairs.iter().all(|p| p.value == 1.0));
    assert_eq!(pairs[0], GroupValue::new("Claire Gute", 1.0));
}

#[test]
fn test_missing_column_only_affects_its_charts() {
    let csv = "Product Name,Sales,Quantity\nA,10,1\nB,30,2\nA,5,3\n";
    let table = load_table(csv.as_bytes(), FileFormat::Csv).unwrap();

    let report = render_view(&table, View::Products, 10, "partial.csv");

    let by_id = |id: &str| report.sections.iter().find(|s| s.id == id).unwrap();
    assert_eq!(
        by_id("top_products_by_sales").outcome.value().unwrap().pairs,
        vec![GroupValue::new("B", 30.0), GroupValue::new("A", 15.0)]
    );
    assert_eq!(
        by_id("top_products_by_profit").outcome,
        Outcome::Error("Missing required column: Profit".to_string())
    );
    assert!(by_id("sales_by_category").outcome.is_error());
    assert!(!by_id("top_products_by_quantity").outcome.is_error());
}

#[test]
fn test_overview_view() {
    let table = load_table(SUPERSTORE_CSV.as_bytes(), FileFormat::Csv).unwrap();

    let report = render_view(&table, View::Overview, 10, "superstore.csv");

    assert!(report.sections.is_empty());
    let overview = report.overview.unwrap();
    assert_eq!(overview.total_records, 6);

    let distinct: Vec<(String, Outcome<usize>)> = overview
        .distinct_counts
        .into_iter()
        .map(|d| (d.label, d.outcome))
        .collect();
    assert_eq!(
        distinct,
        vec![
            ("Unique Countries".to_string(), Outcome::Value(1)),
            ("Unique Segments".to_string(), Outcome::Value(3)),
            ("Unique Product Categories".to_string(), Outcome::Value(3)),
        ]
    );

    let quantity = overview
        .statistics
        .iter()
        .find(|s| s.column == "Quantity")
        .unwrap()
        .outcome
        .value()
        .unwrap();
    assert_eq!(quantity.count, 6);
    assert_eq!(quantity.min, Some(2.0));
    assert_eq!(quantity.max, Some(6.0));
    assert_eq!(quantity.median, Some(2.5));

    // "soon" could not be coerced to a date
    assert_eq!(overview.missing_values.len(), 1);
    assert_eq!(overview.missing_values[0].column, "Ship Date");
    assert_eq!(overview.missing_values[0].missing, 1);
}

#[test]
fn test_overview_with_missing_summary_column() {
    let table = load_table(b"Sales,Segment\n1,Consumer\n", FileFormat::Csv).unwrap();

    let overview = render_view(&table, View::Overview, 10, "x.csv")
        .overview
        .unwrap();

    let outcomes: Vec<bool> = overview
        .statistics
        .iter()
        .map(|s| s.outcome.is_error())
        .collect();
    assert_eq!(outcomes, vec![false, true, true]);
    assert!(overview.distinct_counts[0].outcome.is_error());
    assert_eq!(overview.distinct_counts[1].outcome, Outcome::Value(1));
}

#[test]
fn test_session_rejects_render_after_bad_upload() {
    let mut session = Session::new();
    session
        .upload("ok.csv", SUPERSTORE_CSV.as_bytes(), FileFormat::Csv)
        .unwrap();
    assert!(session.render(View::Customers, 10).is_ok());

    assert!(session.upload("empty.csv", b"", FileFormat::Csv).is_err());
    assert!(matches!(
        session.render(View::Customers, 10),
        Err(SessionError::NoDataset)
    ));
}
