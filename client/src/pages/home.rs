//! Storefront landing page: categories, trending products, virtual try-on
//! and featured reviews.
//!
//! SYSTEM CONTEXT
//! ==============
//! Data loads in the browser only, through the record-store services. A
//! signed-in visitor also gets a customer row (found by email or created)
//! so later carts and try-on sessions have an owner.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use std::rc::Rc;

use leptos::prelude::*;
use serde_json::Value;

use crate::net::records::{HostedRecordStore, RecordTransport};
use crate::components::try_on::TryOn;
use crate::net::types::{ClientConfig, Identity, Record};
use crate::services::tables::{
    CATEGORY_STRIP_LIMIT, CustomerService, FEATURED_LIMIT, ProductCategoryService, ProductService,
    TRENDING_LIMIT, TRY_ON_FRAME_LIMIT, TestimonialService,
};
use crate::state::notifications::{NotificationState, Notifier};
use crate::state::session::SessionState;

/// Everything the landing page renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HomeData {
    pub categories: Vec<Record>,
    pub trending: Vec<Record>,
    pub frames: Vec<Record>,
    pub featured: Vec<Record>,
    pub customer: Option<Record>,
}

fn text<'a>(record: &'a Record, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

fn number(record: &Record, field: &str) -> Option<f64> {
    record.get(field).and_then(Value::as_f64)
}

/// `$12.50` style price label.
pub fn price_label(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Price to charge and the struck-through original, when discounted.
pub fn product_prices(product: &Record) -> (String, Option<String>) {
    let price = number(product, "price").unwrap_or(0.0);
    match number(product, "discount_price") {
        Some(discount) if discount > 0.0 && discount < price => (price_label(discount), Some(price_label(price))),
        _ => (price_label(price), None),
    }
}

/// `12 Products` label of a category card; a missing count reads as zero.
pub fn product_count_label(category: &Record) -> String {
    let count = category.get("product_count").and_then(|v| v.as_i64().or_else(|| v.as_str()?.parse().ok()));
    format!("{} Products", count.unwrap_or(0))
}

/// Five-star rating strip, rounded to whole stars and clamped to 0..=5.
pub fn star_rating(rating: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

async fn load_home(
    config: Option<ClientConfig>,
    identity: Option<Identity>,
    notifications: RwSignal<NotificationState>,
) -> HomeData {
    let Some(config) = config else {
        return HomeData::default();
    };
    let transport: Rc<dyn RecordTransport> = Rc::new(HostedRecordStore::new(config));
    let notifier: Rc<dyn Notifier> = Rc::new(notifications);

    let products = ProductService::new(transport.clone(), notifier.clone());
    let categories = ProductCategoryService::new(transport.clone(), notifier.clone());
    let testimonials = TestimonialService::new(transport.clone(), notifier.clone());
    let categories = categories.strip(CATEGORY_STRIP_LIMIT).await;
    let trending = products.trending(TRENDING_LIMIT).await;
    let frames = products.first_page(TRY_ON_FRAME_LIMIT).await;
    let featured = testimonials.featured(FEATURED_LIMIT).await;

    let customer = match identity {
        Some(identity) => CustomerService::new(transport, notifier).find_or_create(&identity).await,
        None => None,
    };

    HomeData { categories, trending, frames, featured, customer }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let notifications = expect_context::<RwSignal<NotificationState>>();
    let config = expect_context::<RwSignal<Option<ClientConfig>>>();

    let data = LocalResource::new(move || {
        let identity = session.with(|s| s.session.identity.clone());
        load_home(config.get(), identity, notifications)
    });

    view! {
        <div class="home">
            <section class="hero">
                <h1>"See the world in style"</h1>
                <p>"Find frames that fit your face, then try them on virtually before you buy."</p>
                {move || {
                    data.get()
                        .and_then(|d| d.customer)
                        .map(|c| view! { <p class="hero__welcome">"Welcome back, " {text(&c, "Name").to_owned()}</p> })
                }}
            </section>

            <section class="category-strip">
                <h2>"Featured Categories"</h2>
                <Suspense fallback=|| view! { <p>"Loading categories..."</p> }>
                    {move || data.get().map(|d| view! { <CategoryStrip categories=d.categories/> })}
                </Suspense>
            </section>

            <section class="trending">
                <h2>"Trending Products"</h2>
                <Suspense fallback=|| view! { <p>"Loading products..."</p> }>
                    {move || data.get().map(|d| view! { <ProductGrid products=d.trending/> })}
                </Suspense>
            </section>

            <Suspense fallback=|| ()>
                {move || data.get().map(|d| view! { <TryOn frames=d.frames customer=d.customer/> })}
            </Suspense>

            <section class="testimonials">
                <h2>"What Our Customers Say"</h2>
                <Suspense fallback=|| view! { <p>"Loading reviews..."</p> }>
                    {move || data.get().map(|d| view! { <TestimonialList reviews=d.featured/> })}
                </Suspense>
            </section>
        </div>
    }
}

#[component]
fn ProductGrid(products: Vec<Record>) -> impl IntoView {
    if products.is_empty() {
        return view! { <p class="empty">"No products available yet."</p> }.into_any();
    }
    products
        .into_iter()
        .map(|product| {
            let (price, original) = product_prices(&product);
            let rating = number(&product, "rating").unwrap_or(0.0);
            view! {
                <article class="product-card">
                    <img src=text(&product, "image").to_owned() alt=text(&product, "Name").to_owned()/>
                    <h3>{text(&product, "Name").to_owned()}</h3>
                    <span class="product-card__rating">{star_rating(rating)}</span>
                    <span class="product-card__price">{price}</span>
                    {original.map(|o| view! { <s class="product-card__original">{o}</s> })}
                </article>
            }
        })
        .collect_view()
        .into_any()
}

#[component]
fn CategoryStrip(categories: Vec<Record>) -> impl IntoView {
    categories
        .into_iter()
        .map(|category| {
            view! {
                <article class="category-card">
                    <img src=text(&category, "image").to_owned() alt=text(&category, "Name").to_owned()/>
                    <h3>{text(&category, "Name").to_owned()}</h3>
                    <p>{product_count_label(&category)}</p>
                </article>
            }
        })
        .collect_view()
}

#[component]
fn TestimonialList(reviews: Vec<Record>) -> impl IntoView {
    reviews
        .into_iter()
        .map(|review| {
            let rating = number(&review, "rating").unwrap_or(0.0);
            view! {
                <blockquote class="testimonial">
                    <span class="testimonial__rating">{star_rating(rating)}</span>
                    <p>{text(&review, "content").to_owned()}</p>
                    <cite>{text(&review, "Name").to_owned()}</cite>
                </blockquote>
            }
        })
        .collect_view()
}
