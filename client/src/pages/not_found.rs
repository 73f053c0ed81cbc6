//! Fallback page for unknown routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404 - Page Not Found"</h1>
            <p>"Oops! We can't seem to find the page you're looking for."</p>
            <a href="/" class="btn-primary">"Return Home"</a>
        </div>
    }
}
