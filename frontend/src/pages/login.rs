use wasm_bindgen_futures::spawn_local;
use web_sys::{console, HtmlInputElement};
use yew::prelude::*;
use yew_router::prelude::{use_navigator, Link};

use crate::{
    api,
    i18n::{current::login as t, fill_one},
    router::Route,
};

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Login,
    Register,
}

#[derive(Clone, Copy, PartialEq)]
enum Tone {
    Success,
    Error,
    Info,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Error => "error",
            Tone::Info => "info",
        }
    }
}

/// Who the stored token belongs to, as last checked against the backend.
#[derive(Clone, PartialEq)]
enum AuthStatus {
    Checking,
    SignedOut,
    SignedIn(String),
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(|| false);
    let message = use_state(|| None::<(Tone, String)>);
    let status = use_state(|| {
        if api::client().session().is_authenticated() {
            AuthStatus::Checking
        } else {
            AuthStatus::SignedOut
        }
    });

    // Verify a stored token once; a rejected one is purged by the client.
    {
        let status = status.clone();
        let message = message.clone();
        use_effect_with((), move |_| {
            if *status == AuthStatus::Checking {
                spawn_local(async move {
                    match api::client().current_user().await {
                        Ok(profile) => status.set(AuthStatus::SignedIn(profile.email)),
                        Err(err) if err.is_auth() => {
                            status.set(AuthStatus::SignedOut);
                            message.set(Some((Tone::Error, t::SESSION_INVALID.to_string())));
                        },
                        Err(err) => {
                            console::warn_1(&format!("Failed to check session: {err}").into());
                            status.set(AuthStatus::SignedIn(String::new()));
                        },
                    }
                });
            }
            || ()
        });
    }

    let on_email = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                email.set(target.value());
            }
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(target.value());
            }
        })
    };

    let submit = {
        let email = email.clone();
        let password = password.clone();
        let busy = busy.clone();
        let message = message.clone();
        let navigator = navigator.clone();
        move |mode: Mode| {
            let email = email.clone();
            let password = password.clone();
            let busy = busy.clone();
            let message = message.clone();
            let navigator = navigator.clone();
            Callback::from(move |event: MouseEvent| {
                event.prevent_default();
                if *busy {
                    return;
                }
                busy.set(true);
                let email = (*email).clone();
                let password = (*password).clone();
                let busy = busy.clone();
                let message = message.clone();
                let navigator = navigator.clone();
                spawn_local(async move {
                    let client = api::client();
                    let result = match mode {
                        Mode::Login => client.login(&email, &password).await.map(|_| t::LOGGED_IN),
                        Mode::Register => client.register(&email, &password).await.map(|_| t::REGISTERED),
                    };
                    busy.set(false);
                    match result {
                        Ok(done) => {
                            message.set(Some((Tone::Success, done.to_string())));
                            if let Some(nav) = navigator {
                                nav.push(&Route::Home);
                            }
                        },
                        Err(err) => {
                            console::error_1(&format!("{} {err}", t::FAILED).into());
                            message.set(Some((Tone::Error, err.user_message(t::FAILED))));
                        },
                    }
                });
            })
        }
    };

    let on_logout = {
        let status = status.clone();
        let message = message.clone();
        Callback::from(move |_: MouseEvent| {
            api::client().logout();
            status.set(AuthStatus::SignedOut);
            message.set(Some((Tone::Info, t::LOGGED_OUT.to_string())));
        })
    };

    let signed_in = matches!(*status, AuthStatus::SignedIn(_));
    let status_line = match &*status {
        AuthStatus::Checking => String::new(),
        AuthStatus::SignedOut => t::STATUS_SIGNED_OUT.to_string(),
        AuthStatus::SignedIn(email) if email.is_empty() => fill_one(t::STATUS_SIGNED_IN, t::FALLBACK_USER),
        AuthStatus::SignedIn(email) => fill_one(t::STATUS_SIGNED_IN, email),
    };
    let locked = *busy || *status != AuthStatus::SignedOut;

    let notice = match (*message).clone() {
        Some((tone, text)) => html! {
            <p class={classes!("auth-message", tone.class())}>{ text }</p>
        },
        None => Html::default(),
    };

    html! {
        <main class="container auth-page">
            <h2>{ t::TITLE }</h2>
            <p class="auth-status">{ status_line }</p>
            <form class="auth-form">
                <label>
                    { t::EMAIL }
                    <input type="email" autocomplete="email" value={(*email).clone()} oninput={on_email} />
                </label>
                <label>
                    { t::PASSWORD }
                    <input
                        type="password"
                        autocomplete="current-password"
                        value={(*password).clone()}
                        oninput={on_password}
                    />
                </label>
                <div class="auth-actions">
                    <button type="submit" class="btn btn-primary" disabled={locked} onclick={submit(Mode::Login)}>
                        { if *busy { t::PROCESSING } else { t::LOGIN } }
                    </button>
                    <button type="button" class="btn btn-reset" disabled={locked} onclick={submit(Mode::Register)}>
                        { t::REGISTER }
                    </button>
                    if signed_in {
                        <button type="button" class="btn btn-reset" disabled={*busy} onclick={on_logout}>
                            { t::LOGOUT }
                        </button>
                        <Link<Route> to={Route::Settings} classes="btn btn-primary">{ t::TO_SETTINGS }</Link<Route>>
                    }
                </div>
            </form>
            { notice }
        </main>
    }
}
