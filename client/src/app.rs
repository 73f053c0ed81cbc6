//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns every shared signal. `SessionGate` runs the one-shot session
//! bootstrap in the browser and holds back the routed pages until the
//! identity provider has answered.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{header::Header, toasts::Toasts};
use crate::net::types::ClientConfig;
use crate::pages::{
    auth::{CallbackPage, ErrorPage, LoginPage, SignupPage},
    home::HomePage,
    not_found::NotFoundPage,
};
use crate::state::{notifications::NotificationState, session::SessionState};
use crate::util::theme::Theme;

/// Placeholder shown until identity setup completes.
pub const INITIALIZING_MESSAGE: &str = "Initializing application...";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let notifications = RwSignal::new(NotificationState::default());
    let theme = RwSignal::new(Theme::default());
    let config = RwSignal::new(None::<ClientConfig>);

    provide_context(session);
    provide_context(notifications);
    provide_context(theme);
    provide_context(config);

    // Browser-only: effects never run during SSR.
    Effect::new(move || {
        let preferred = crate::util::theme::read_preference();
        crate::util::theme::apply(preferred);
        theme.set(preferred);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/opticalhub.css"/>
        <Title text="OpticalHub"/>

        <Router>
            <SessionGate>
                <Header/>
                <main class="app-main">
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("signup") view=SignupPage/>
                        <Route path=StaticSegment("callback") view=CallbackPage/>
                        <Route path=StaticSegment("error") view=ErrorPage/>
                        <Route path=StaticSegment("") view=HomePage/>
                    </Routes>
                </main>
            </SessionGate>
            <Toasts/>
        </Router>
    }
}

/// Runs session bootstrap once and renders `children` after it completes.
#[component]
fn SessionGate(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    #[cfg(feature = "hydrate")]
    {
        let config = expect_context::<RwSignal<Option<ClientConfig>>>();
        let navigate = leptos_router::hooks::use_navigate();
        Effect::new(move || {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                start_session(navigate, session, config).await;
            });
        });
    }

    view! {
        <Show
            when=move || session.with(SessionState::is_initialized)
            fallback=|| view! { <div class="app-loading">{INITIALIZING_MESSAGE}</div> }
        >
            {children()}
        </Show>
    }
}

#[cfg(feature = "hydrate")]
async fn start_session<F>(
    navigate: F,
    session: RwSignal<SessionState>,
    config: RwSignal<Option<ClientConfig>>,
) where
    F: Fn(&str, leptos_router::NavigateOptions),
{
    use crate::net::identity::{HostedIdentityProvider, SetupOptions};
    use crate::util::auth::{RouterNavigator, bootstrap_session};

    let client_config = match crate::net::api::fetch_client_config().await {
        Ok(c) => c,
        Err(e) => {
            log::error!("Authentication failed: {e}");
            return;
        }
    };
    config.set(Some(client_config.clone()));

    let options = SetupOptions::from_config(&client_config);
    let provider = HostedIdentityProvider::new(client_config);
    let navigator = RouterNavigator::new(navigate);
    let phase = bootstrap_session(&provider, &options, &navigator, &session).await;
    log::debug!("session bootstrap finished: {phase:?}");
}
