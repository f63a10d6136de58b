//! Dashboard views and the chart catalogue behind each of them.

use crate::aggregator::{AggregateFn, AggregationRequest};
use crate::utils::config::{
    CATEGORY, CUSTOMER_NAME, DISCOUNT, ORDER_ID, PRODUCT_NAME, PROFIT, QUANTITY, SALES, SEGMENT,
    SUB_CATEGORY,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three mutually exclusive pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Overview,
    Products,
    Customers,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview of the Data",
            View::Products => "Product Insights",
            View::Customers => "Customer Insights",
        }
    }

    /// Charts shown on this view, in display order
    pub fn charts(&self, limit: usize) -> Vec<ChartSpec> {
        let catalogue: &[ChartTemplate] = match self {
            View::Overview => &[],
            View::Products => PRODUCT_CHARTS,
            View::Customers => CUSTOMER_CHARTS,
        };
        catalogue.iter().map(|t| t.build(limit)).collect()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Overview => write!(f, "overview"),
            View::Products => write!(f, "products"),
            View::Customers => write!(f, "customers"),
        }
    }
}

/// How a chart colours its bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    /// One colour for every bar
    Bar,
    /// One colour per group, with a legend
    Categorical,
}

/// A chart: display metadata plus the query that feeds it
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub style: ChartStyle,
    pub request: AggregationRequest,
}

struct ChartTemplate {
    id: &'static str,
    subject: &'static str,
    group_by: &'static str,
    metric: &'static str,
    func: AggregateFn,
    y_label: &'static str,
    style: ChartStyle,
}

impl ChartTemplate {
    fn build(&self, limit: usize) -> ChartSpec {
        ChartSpec {
            id: self.id,
            title: format!("Top {} {}", limit, self.subject),
            x_label: self.group_by,
            y_label: self.y_label,
            style: self.style,
            request: AggregationRequest::new(self.group_by, self.metric, self.func)
                .with_limit(limit),
        }
    }
}

const PRODUCT_CHARTS: &[ChartTemplate] = &[
    ChartTemplate {
        id: "top_products_by_sales",
        subject: "Products by Sales",
        group_by: PRODUCT_NAME,
        metric: SALES,
        func: AggregateFn::Sum,
        y_label: "Total Sales",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "top_products_by_profit",
        subject: "Products by Profit",
        group_by: PRODUCT_NAME,
        metric: PROFIT,
        func: AggregateFn::Sum,
        y_label: "Total Profit",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "top_products_by_quantity",
        subject: "Products by Quantity Sold",
        group_by: PRODUCT_NAME,
        metric: QUANTITY,
        func: AggregateFn::Sum,
        y_label: "Quantity Sold",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "top_products_by_discount",
        subject: "Products by Average Discount",
        group_by: PRODUCT_NAME,
        metric: DISCOUNT,
        func: AggregateFn::Mean,
        y_label: "Average Discount",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "sales_by_category",
        subject: "Sales by Category",
        group_by: CATEGORY,
        metric: SALES,
        func: AggregateFn::Sum,
        y_label: "Sales",
        style: ChartStyle::Categorical,
    },
    ChartTemplate {
        id: "sales_by_sub_category",
        subject: "Sales by Sub-Category",
        group_by: SUB_CATEGORY,
        metric: SALES,
        func: AggregateFn::Sum,
        y_label: "Total Sales",
        style: ChartStyle::Bar,
    },
];

const CUSTOMER_CHARTS: &[ChartTemplate] = &[
    ChartTemplate {
        id: "top_customers_by_sales",
        subject: "Customers by Sales",
        group_by: CUSTOMER_NAME,
        metric: SALES,
        func: AggregateFn::Sum,
        y_label: "Total Sales",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "top_customers_by_quantity",
        subject: "Customers by Quantity Purchased",
        group_by: CUSTOMER_NAME,
        metric: QUANTITY,
        func: AggregateFn::Sum,
        y_label: "Total Quantity Purchased",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "top_customers_by_profit",
        subject: "Customers by Profit",
        group_by: CUSTOMER_NAME,
        metric: PROFIT,
        func: AggregateFn::Sum,
        y_label: "Total Profit",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "top_customers_by_discount",
        subject: "Customers by Average Discount",
        group_by: CUSTOMER_NAME,
        metric: DISCOUNT,
        func: AggregateFn::Mean,
        y_label: "Average Discount",
        style: ChartStyle::Bar,
    },
    ChartTemplate {
        id: "sales_by_segment",
        subject: "Sales by Segment",
        group_by: SEGMENT,
        metric: SALES,
        func: AggregateFn::Sum,
        y_label: "Sales",
        style: ChartStyle::Categorical,
    },
    ChartTemplate {
        id: "top_customers_by_orders",
        subject: "Customers by Number of Orders",
        group_by: CUSTOMER_NAME,
        metric: ORDER_ID,
        func: AggregateFn::CountDistinct,
        y_label: "Number of Orders",
        style: ChartStyle::Bar,
    },
];
