//! Aggregation queries
//!
//! Each report loads everything it needs in one concurrent batch. Queries in
//! a batch are independent; the first failure fails the whole batch.

use futures::future::try_join_all;

use crate::domain::{
    CancelledOrder, Gender, Order, OrderFilter, OrderStatus, Product, ProductFilter, Role, StockLevel, User,
    UserFilter,
};
use crate::store::RecordStore;
use crate::Result;
use super::windows::ReportWindows;

/// Orders shown as recent transactions on the dashboard.
pub const RECENT_TRANSACTIONS: usize = 4;

#[derive(Clone, Debug, Default)]
pub struct DashboardBatch {
    pub this_month_products: u64,
    pub last_month_products: u64,
    pub this_month_users: u64,
    pub last_month_users: u64,
    pub this_month_orders: Vec<Order>,
    pub last_month_orders: Vec<Order>,
    pub product_count: u64,
    pub user_count: u64,
    pub all_orders: Vec<Order>,
    pub last_six_months_orders: Vec<Order>,
    pub category_counts: Vec<(String, u64)>,
    pub male: u64,
    pub female: u64,
    pub others: u64,
    pub recent_orders: Vec<Order>,
}

#[derive(Clone, Debug, Default)]
pub struct PieBatch {
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,
    pub out_of_stock: u64,
    pub in_stock: u64,
    pub admins: u64,
    pub customers: u64,
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub product_count: u64,
    pub category_counts: Vec<(String, u64)>,
}

#[derive(Clone, Debug, Default)]
pub struct BarBatch {
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub cancelled_orders: Vec<CancelledOrder>,
}

#[derive(Clone, Debug, Default)]
pub struct LineBatch {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

/// Pairs each category with its product count.
pub async fn count_per_category(store: &dyn RecordStore, categories: Vec<String>) -> Result<Vec<(String, u64)>> {
    let filters: Vec<ProductFilter> = categories.iter().map(|c| ProductFilter::in_category(c.as_str())).collect();
    let counts = try_join_all(filters.iter().map(|f| store.count_products(f))).await?;
    Ok(categories.into_iter().zip(counts).collect())
}

pub async fn load_dashboard(store: &dyn RecordStore, windows: &ReportWindows) -> Result<DashboardBatch> {
    let this_month_products = ProductFilter::created_within(windows.this_month);
    let last_month_products = ProductFilter::created_within(windows.last_month);
    let this_month_users = UserFilter::created_within(windows.this_month);
    let last_month_users = UserFilter::created_within(windows.last_month);
    let this_month_orders = OrderFilter::created_within(windows.this_month);
    let last_month_orders = OrderFilter::created_within(windows.last_month);
    let six_months = OrderFilter::created_within(windows.last_six_months);
    let (all_products, all_users, all_orders) = (ProductFilter::all(), UserFilter::all(), OrderFilter::all());
    let (male, female, others) =
        (UserFilter::gender(Gender::Male), UserFilter::gender(Gender::Female), UserFilter::gender(Gender::Others));

    let (
        this_month_products,
        last_month_products,
        this_month_users,
        last_month_users,
        this_month_orders,
        last_month_orders,
        product_count,
        user_count,
        all_orders,
        last_six_months_orders,
        categories,
        male,
        female,
        others,
        recent_orders,
    ) = tokio::try_join!(
        store.count_products(&this_month_products),
        store.count_products(&last_month_products),
        store.count_users(&this_month_users),
        store.count_users(&last_month_users),
        store.orders(&this_month_orders),
        store.orders(&last_month_orders),
        store.count_products(&all_products),
        store.count_users(&all_users),
        store.orders(&all_orders),
        store.orders(&six_months),
        store.distinct_categories(),
        store.count_users(&male),
        store.count_users(&female),
        store.count_users(&others),
        store.first_orders(RECENT_TRANSACTIONS),
    )?;

    let category_counts = count_per_category(store, categories).await?;

    Ok(DashboardBatch {
        this_month_products,
        last_month_products,
        this_month_users,
        last_month_users,
        this_month_orders,
        last_month_orders,
        product_count,
        user_count,
        all_orders,
        last_six_months_orders,
        category_counts,
        male,
        female,
        others,
        recent_orders,
    })
}

pub async fn load_pie(store: &dyn RecordStore) -> Result<PieBatch> {
    let (processing, shipped, delivered) = (
        OrderFilter::status(OrderStatus::Processing),
        OrderFilter::status(OrderStatus::Shipped),
        OrderFilter::status(OrderStatus::Delivered),
    );
    let (out_of_stock, in_stock) =
        (ProductFilter::stock(StockLevel::OutOfStock), ProductFilter::stock(StockLevel::InStock));
    let (admins, customers) = (UserFilter::role(Role::Admin), UserFilter::role(Role::User));
    let (all_products, all_users, all_orders) = (ProductFilter::all(), UserFilter::all(), OrderFilter::all());

    let (
        processing,
        shipped,
        delivered,
        cancelled,
        out_of_stock,
        in_stock,
        admins,
        customers,
        users,
        orders,
        product_count,
        categories,
    ) = tokio::try_join!(
        store.count_orders(&processing),
        store.count_orders(&shipped),
        store.count_orders(&delivered),
        store.count_cancelled_orders(&all_orders),
        store.count_products(&out_of_stock),
        store.count_products(&in_stock),
        store.count_users(&admins),
        store.count_users(&customers),
        store.users(&all_users),
        store.orders(&all_orders),
        store.count_products(&all_products),
        store.distinct_categories(),
    )?;

    let category_counts = count_per_category(store, categories).await?;

    Ok(PieBatch {
        processing,
        shipped,
        delivered,
        cancelled,
        out_of_stock,
        in_stock,
        admins,
        customers,
        users,
        orders,
        product_count,
        category_counts,
    })
}

pub async fn load_bar(store: &dyn RecordStore, windows: &ReportWindows) -> Result<BarBatch> {
    let products = ProductFilter::created_within(windows.last_six_months);
    let users = UserFilter::created_within(windows.last_six_months);
    let orders = OrderFilter::created_within(windows.last_twelve_months);

    let (products, users, orders, cancelled_orders) = tokio::try_join!(
        store.products(&products),
        store.users(&users),
        store.orders(&orders),
        store.cancelled_orders(&orders),
    )?;

    Ok(BarBatch { products, users, orders, cancelled_orders })
}

pub async fn load_line(store: &dyn RecordStore, windows: &ReportWindows) -> Result<LineBatch> {
    let users = UserFilter::created_within(windows.last_twelve_months);
    let products = ProductFilter::created_within(windows.last_twelve_months);
    let orders = OrderFilter::created_within(windows.last_twelve_months);

    let (users, products, orders) =
        tokio::try_join!(store.users(&users), store.products(&products), store.orders(&orders))?;

    Ok(LineBatch { users, products, orders })
}
