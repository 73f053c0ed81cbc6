//! Storefront tables and their table-specific queries.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each table is a static [`TableSpec`] plus a thin service type that derefs
//! to [`RecordService`] for plain CRUD and adds the handful of named queries
//! the pages use (trending products, featured reviews, and so on).

#[cfg(test)]
#[path = "tables_test.rs"]
mod tables_test;

use std::ops::Deref;
use std::rc::Rc;

use serde_json::Value;

use super::coerce::Coercion;
use super::record::{Messages, Query, RecordService, TableSpec, record_id};
use crate::net::records::RecordTransport;
use crate::net::types::{Identity, Operator, Record, RecordId, SortType, WhereClause};
use crate::state::notifications::Notifier;

/// Default size of the trending products strip.
pub const TRENDING_LIMIT: u32 = 4;
/// Default number of featured reviews.
pub const FEATURED_LIMIT: u32 = 3;
/// Lowest rating a review needs to be featured.
pub const FEATURED_MIN_RATING: i64 = 4;
/// Number of categories on the landing page.
pub const CATEGORY_STRIP_LIMIT: u32 = 4;
/// Frames offered in the virtual try-on picker.
pub const TRY_ON_FRAME_LIMIT: u32 = 8;

pub const TRY_ON_STARTED: &str = "Started";
pub const TRY_ON_COMPLETED: &str = "Completed";

// =============================================================================
// TABLE SPECS
// =============================================================================

pub static PRODUCTS: TableSpec = TableSpec {
    table: "product",
    fields: &[
        "price",
        "discount_price",
        "image",
        "overlay_image",
        "rating",
        "review_count",
        "is_new",
        "category",
    ],
    writable: &[
        "Name",
        "Tags",
        "Owner",
        "price",
        "discount_price",
        "image",
        "overlay_image",
        "rating",
        "review_count",
        "is_new",
        "category",
    ],
    coercions: &[
        ("price", Coercion::Float { default: 0.0 }),
        ("discount_price", Coercion::Float { default: 0.0 }),
        ("rating", Coercion::Float { default: 0.0 }),
        ("review_count", Coercion::Int { default: 0 }),
        ("is_new", Coercion::Bool),
    ],
    create_defaults: &[],
    order: ("CreatedOn", SortType::Desc),
    messages: Messages {
        load_list: "Failed to load products",
        load_one: "Failed to load product details",
        created: Some("Product created successfully"),
        create_failed: "Failed to create product",
        updated: Some("Product updated successfully"),
        update_failed: "Failed to update product",
        deleted: Some("Product deleted successfully"),
        delete_failed: "Failed to delete product",
    },
};

pub static CATEGORIES: TableSpec = TableSpec {
    table: "product_category",
    fields: &["image", "product_count"],
    writable: &["Name", "Tags", "Owner", "image", "product_count"],
    coercions: &[],
    create_defaults: &[],
    order: ("Name", SortType::Asc),
    messages: Messages {
        load_list: "Failed to load categories",
        load_one: "Failed to load category details",
        created: Some("Category created successfully"),
        create_failed: "Failed to create category",
        updated: Some("Category updated successfully"),
        update_failed: "Failed to update category",
        deleted: Some("Category deleted successfully"),
        delete_failed: "Failed to delete category",
    },
};

pub static CUSTOMERS: TableSpec = TableSpec {
    table: "Customer1",
    fields: &["email", "profile_image"],
    writable: &["Name", "Tags", "Owner", "email", "profile_image"],
    coercions: &[],
    create_defaults: &[],
    order: ("Name", SortType::Asc),
    messages: Messages {
        load_list: "Failed to load customers",
        load_one: "Failed to load customer details",
        created: Some("Customer profile created successfully"),
        create_failed: "Failed to create customer profile",
        updated: Some("Customer profile updated successfully"),
        update_failed: "Failed to update customer profile",
        deleted: Some("Customer profile deleted successfully"),
        delete_failed: "Failed to delete customer profile",
    },
};

pub static TESTIMONIALS: TableSpec = TableSpec {
    table: "testimonial",
    fields: &["content", "rating", "customer"],
    writable: &["Name", "Tags", "Owner", "content", "rating", "customer"],
    coercions: &[("rating", Coercion::Int { default: 5 })],
    create_defaults: &[],
    order: ("CreatedOn", SortType::Desc),
    messages: Messages {
        load_list: "Failed to load testimonials",
        load_one: "Failed to load testimonial details",
        created: Some("Review submitted successfully"),
        create_failed: "Failed to submit review",
        updated: Some("Review updated successfully"),
        update_failed: "Failed to update review",
        deleted: Some("Review deleted successfully"),
        delete_failed: "Failed to delete review",
    },
};

pub static CARTS: TableSpec = TableSpec {
    table: "cart",
    fields: &["is_active", "total_amount", "customer"],
    writable: &["Name", "Tags", "Owner", "is_active", "total_amount", "customer"],
    coercions: &[
        ("total_amount", Coercion::Float { default: 0.0 }),
        ("is_active", Coercion::Bool),
    ],
    create_defaults: &[],
    order: ("CreatedOn", SortType::Desc),
    messages: Messages {
        load_list: "Failed to load carts",
        load_one: "Failed to load cart details",
        created: None,
        create_failed: "Failed to create cart",
        updated: None,
        update_failed: "Failed to update cart",
        deleted: None,
        delete_failed: "Failed to delete cart",
    },
};

pub static TRY_ON_SESSIONS: TableSpec = TableSpec {
    table: "try_on_session",
    fields: &["customer_image", "is_face_detected", "status", "selected_product", "customer"],
    writable: &[
        "Name",
        "Tags",
        "Owner",
        "customer_image",
        "is_face_detected",
        "status",
        "selected_product",
        "customer",
    ],
    coercions: &[("is_face_detected", Coercion::Bool)],
    create_defaults: &[("status", TRY_ON_STARTED)],
    order: ("CreatedOn", SortType::Desc),
    messages: Messages {
        load_list: "Failed to load try-on sessions",
        load_one: "Failed to load try-on session details",
        created: None,
        create_failed: "Failed to create try-on session",
        updated: None,
        update_failed: "Failed to update try-on session",
        deleted: None,
        delete_failed: "Failed to delete try-on session",
    },
};

// =============================================================================
// SERVICES
// =============================================================================

macro_rules! table_service {
    ($(#[$meta:meta])* $name:ident => $spec:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(RecordService);

        impl $name {
            #[must_use]
            pub fn new(transport: Rc<dyn RecordTransport>, notifier: Rc<dyn Notifier>) -> Self {
                Self(RecordService::new(&$spec, transport, notifier))
            }
        }

        impl Deref for $name {
            type Target = RecordService;

            fn deref(&self) -> &RecordService {
                &self.0
            }
        }
    };
}

table_service!(
    /// Catalog products.
    ProductService => PRODUCTS
);
table_service!(ProductCategoryService => CATEGORIES);
table_service!(
    /// Storefront customers, keyed by email.
    CustomerService => CUSTOMERS
);
table_service!(TestimonialService => TESTIMONIALS);
table_service!(CartService => CARTS);
table_service!(
    /// Virtual try-on sessions. New sessions start in the `Started` status.
    TryOnSessionService => TRY_ON_SESSIONS
);

fn name_contains(term: &str) -> WhereClause {
    WhereClause::new("Name", Operator::Contains, term)
}

impl ProductService {
    /// Highest rated products.
    pub async fn trending(&self, limit: u32) -> Vec<Record> {
        self.fetch(Query::new().order("rating", SortType::Desc).page(limit, 0)).await
    }

    /// Newest products, as offered in the try-on picker.
    pub async fn first_page(&self, limit: u32) -> Vec<Record> {
        self.fetch(Query::new().page(limit, 0)).await
    }

    pub async fn search(&self, term: &str) -> Vec<Record> {
        self.fetch(Query::new().filter(name_contains(term))).await
    }
}

impl ProductCategoryService {
    /// First page of categories for the landing page strip.
    pub async fn strip(&self, limit: u32) -> Vec<Record> {
        self.fetch(Query::new().page(limit, 0)).await
    }

    pub async fn search(&self, term: &str) -> Vec<Record> {
        self.fetch(Query::new().filter(name_contains(term)).order("Name", SortType::Asc)).await
    }
}

impl CustomerService {
    pub async fn by_email(&self, email: &str) -> Option<Record> {
        self.fetch_first(Query::new().filter(WhereClause::new("email", Operator::ExactMatch, email)))
            .await
    }

    /// Customer row for a signed-in identity, created on first visit.
    ///
    /// Identities without an email address have no customer row.
    pub async fn find_or_create(&self, identity: &Identity) -> Option<Record> {
        let email = identity.email_address()?;
        if let Some(existing) = self.by_email(email).await {
            return Some(existing);
        }

        let mut record = Record::new();
        let name = identity.display_name().unwrap_or_else(|| email.to_owned());
        record.insert("Name".to_owned(), Value::from(name));
        record.insert("email".to_owned(), Value::from(email));
        record.insert("profile_image".to_owned(), Value::from(identity.profile_picture().unwrap_or("")));
        self.create(&record).await
    }
}

impl TestimonialService {
    /// Best reviews first, rated at least [`FEATURED_MIN_RATING`].
    pub async fn featured(&self, limit: u32) -> Vec<Record> {
        let query = Query::new()
            .filter(WhereClause::new("rating", Operator::GreaterThanOrEqualTo, FEATURED_MIN_RATING))
            .order("rating", SortType::Desc)
            .page(limit, 0);
        self.fetch(query).await
    }
}

impl CartService {
    pub async fn active_for_customer(&self, customer: RecordId) -> Option<Record> {
        let query = Query::new()
            .filter(WhereClause::new("customer", Operator::ExactMatch, customer))
            .filter(WhereClause::new("is_active", Operator::ExactMatch, true));
        self.fetch_first(query).await
    }
}

impl TryOnSessionService {
    pub async fn by_customer(&self, customer: RecordId) -> Vec<Record> {
        let query = Query::new()
            .filter(WhereClause::new("customer", Operator::ExactMatch, customer))
            .order("CreatedOn", SortType::Desc);
        self.fetch(query).await
    }

    /// Record a new try-on of `product` with the customer's photo.
    pub async fn start(&self, customer: RecordId, product: &Record, customer_image: &str) -> Option<Record> {
        let product_name = product.get("Name").and_then(Value::as_str).unwrap_or("");
        let mut record = Record::new();
        record.insert("Name".to_owned(), Value::from(format!("Try-on session for {product_name}")));
        record.insert("customer_image".to_owned(), Value::from(customer_image));
        record.insert("selected_product".to_owned(), product.get("Id").cloned().unwrap_or(Value::Null));
        record.insert("customer".to_owned(), Value::from(customer));
        record.insert("status".to_owned(), Value::from(TRY_ON_STARTED));
        record.insert("is_face_detected".to_owned(), Value::Bool(false));
        self.create(&record).await
    }

    /// Mark the customer's most recent session as face-detected and done.
    ///
    /// Returns `None` when the customer has no sessions.
    pub async fn complete_latest(&self, customer: RecordId) -> Option<Record> {
        let latest = self.by_customer(customer).await.into_iter().next()?;
        let id = record_id(&latest)?;
        let mut changes = Record::new();
        changes.insert("is_face_detected".to_owned(), Value::Bool(true));
        changes.insert("status".to_owned(), Value::from(TRY_ON_COMPLETED));
        self.update(id, &changes).await
    }
}
