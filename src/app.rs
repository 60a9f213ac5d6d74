use std::rc::Rc;
use std::time::Duration;

use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::HttpActivityApi;
use crate::board::{ActivityBoard, RenderTarget, Timer};
use crate::config::BoardConfig;
use crate::view::{ActivityCard, FilterControl, ListView, Message, SelectOption};

/// Everything on screen, owned by a single reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub filters: Vec<FilterControl>,
    pub list: ListView,
    pub options: Vec<SelectOption>,
    pub message: Option<Message>,
    pub email: String,
    pub activity: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            list: ListView::Loading,
            options: Vec::new(),
            message: None,
            email: String::new(),
            activity: String::new(),
        }
    }
}

pub enum ViewAction {
    Filters(Vec<FilterControl>),
    List(ListView),
    Options(Vec<SelectOption>),
    Message(Option<Message>),
    ResetForm,
    Email(String),
    Activity(String),
}

impl Reducible for ViewState {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: ViewAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ViewAction::Filters(filters) => next.filters = filters,
            ViewAction::List(list) => next.list = list,
            ViewAction::Options(options) => {
                // A rebuilt selector drops a choice that no longer exists.
                if !options.iter().any(|o| !o.disabled && o.value == next.activity) {
                    next.activity.clear();
                }
                next.options = options;
            }
            ViewAction::Message(message) => next.message = message,
            ViewAction::ResetForm => {
                next.email.clear();
                next.activity.clear();
            }
            ViewAction::Email(email) => next.email = email,
            ViewAction::Activity(activity) => next.activity = activity,
        }
        Rc::new(next)
    }
}

#[derive(Clone)]
pub struct ReducerTarget(UseReducerDispatcher<ViewState>);

impl RenderTarget for ReducerTarget {
    fn set_filters(&self, filters: Vec<FilterControl>) {
        self.0.dispatch(ViewAction::Filters(filters));
    }

    fn set_list(&self, list: ListView) {
        self.0.dispatch(ViewAction::List(list));
    }

    fn set_options(&self, options: Vec<SelectOption>) {
        self.0.dispatch(ViewAction::Options(options));
    }

    fn set_message(&self, message: Option<Message>) {
        self.0.dispatch(ViewAction::Message(message));
    }

    fn reset_form(&self) {
        self.0.dispatch(ViewAction::ResetForm);
    }
}

pub struct GlooTimer;

impl Timer for GlooTimer {
    type Handle = Timeout;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task)
    }
}

type Board = ActivityBoard<HttpActivityApi, ReducerTarget, GlooTimer>;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: BoardConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let view = use_reducer(ViewState::default);

    let board: Rc<Board> = {
        let dispatcher = view.dispatcher();
        use_memo(props.config.clone(), move |cfg| {
            ActivityBoard::new(
                HttpActivityApi::new(cfg.api_base.clone()),
                ReducerTarget(dispatcher),
                GlooTimer,
                cfg.message_timeout(),
            )
        })
    };

    // Initial load
    {
        let board = board.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let _ = board.load_catalog().await;
            });
            || ()
        });
    }

    let on_filter = {
        let board = board.clone();
        Callback::from(move |key: String| board.set_filter(&key))
    };

    let on_unregister = {
        let board = board.clone();
        Callback::from(move |(activity, email): (String, String)| {
            let board = board.clone();
            spawn_local(async move {
                let _ = board.unregister(&activity, &email).await;
            });
        })
    };

    let on_email = {
        let dispatcher = view.dispatcher();
        Callback::from(move |email: String| dispatcher.dispatch(ViewAction::Email(email)))
    };

    let on_activity = {
        let dispatcher = view.dispatcher();
        Callback::from(move |activity: String| dispatcher.dispatch(ViewAction::Activity(activity)))
    };

    let on_submit = {
        let board = board.clone();
        let email = view.email.clone();
        let activity = view.activity.clone();
        Callback::from(move |_: ()| {
            if activity.is_empty() {
                return;
            }
            let board = board.clone();
            let email = email.clone();
            let activity = activity.clone();
            spawn_local(async move {
                let _ = board.submit_signup(&activity, &email).await;
            });
        })
    };

    html! {
      <main class="wrap">
        <header>
          <h1>{ "Mergington High School" }</h1>
          <h2>{ "Extracurricular Activities" }</h2>
        </header>

        <section id="activities-container">
          <h3>{ "Available Activities" }</h3>
          <FilterBar filters={view.filters.clone()} on_filter={on_filter} />
          <ActivityList list={view.list.clone()} on_unregister={on_unregister} />
        </section>

        <section id="signup-container">
          <h3>{ "Sign Up for an Activity" }</h3>
          <SignupForm
            options={view.options.clone()}
            email={view.email.clone()}
            activity={view.activity.clone()}
            on_email={on_email}
            on_activity={on_activity}
            on_submit={on_submit}
          />
          <MessageBanner message={view.message.clone()} />
        </section>
      </main>
    }
}

#[derive(Properties, PartialEq)]
struct FilterBarProps {
    filters: Vec<FilterControl>,
    on_filter: Callback<String>,
}

#[function_component(FilterBar)]
fn filter_bar(props: &FilterBarProps) -> Html {
    html! {
      <div id="category-filters" class="filters">
        { for props.filters.iter().map(|f| {
            let on_click = {
                let on_filter = props.on_filter.clone();
                let key = f.key.clone();
                Callback::from(move |_: MouseEvent| on_filter.emit(key.clone()))
            };
            html! {
              <button
                key={f.key.clone()}
                class={classes!("filter-btn", f.active.then_some("active"))}
                data-category={f.key.clone()}
                onclick={on_click}
              >
                { f.label.clone() }
              </button>
            }
        }) }
      </div>
    }
}

#[derive(Properties, PartialEq)]
struct ActivityListProps {
    list: ListView,
    on_unregister: Callback<(String, String)>,
}

#[function_component(ActivityList)]
fn activity_list(props: &ActivityListProps) -> Html {
    let body = match &props.list {
        ListView::Cards(cards) => html! {
          <>
            { for cards.iter().map(|card| html! {
                <ActivityCardView
                  key={card.name.clone()}
                  card={card.clone()}
                  on_unregister={props.on_unregister.clone()}
                />
            }) }
          </>
        },
        other => html! { <p>{ other.placeholder().unwrap_or_default() }</p> },
    };

    html! { <div id="activities-list">{ body }</div> }
}

#[derive(Properties, PartialEq)]
struct ActivityCardProps {
    card: ActivityCard,
    on_unregister: Callback<(String, String)>,
}

#[function_component(ActivityCardView)]
fn activity_card(props: &ActivityCardProps) -> Html {
    let card = &props.card;

    let participants = if card.participants.is_empty() {
        html! { <p class="no-participants">{ "No participants yet" }</p> }
    } else {
        html! {
          <ul class="participants-list">
            { for card.participants.iter().map(|email| {
                let on_click = {
                    let on_unregister = props.on_unregister.clone();
                    let pair = (card.name.clone(), email.clone());
                    Callback::from(move |_: MouseEvent| on_unregister.emit(pair.clone()))
                };
                html! {
                  <li key={email.clone()}>
                    <span class="participant-email">{ email.clone() }</span>
                    <button class="delete-btn" title="Unregister" onclick={on_click}>{ "✕" }</button>
                  </li>
                }
            }) }
          </ul>
        }
    };

    html! {
      <div class="activity-card" data-category={card.category_key.clone()}>
        <h4>
          { card.name.clone() }
          <span class={card.badge_class()}>{ card.category.clone() }</span>
        </h4>
        <p>{ card.description.clone() }</p>
        <p><strong>{ "Schedule:" }</strong>{ format!(" {}", card.schedule) }</p>
        <p class={card.availability_class()}>
          <strong>{ "Availability:" }</strong>{ format!(" {}", card.availability_text()) }
        </p>
        <div class="participants-section">
          <strong>{ "Participants:" }</strong>
          { participants }
        </div>
      </div>
    }
}

#[derive(Properties, PartialEq)]
struct SignupFormProps {
    options: Vec<SelectOption>,
    email: String,
    activity: String,
    on_email: Callback<String>,
    on_activity: Callback<String>,
    on_submit: Callback<()>,
}

#[function_component(SignupForm)]
fn signup_form(props: &SignupFormProps) -> Html {
    let on_email_input = {
        let on_email = props.on_email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_email.emit(input.value());
        })
    };

    let on_activity_change = {
        let on_activity = props.on_activity.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_activity.emit(select.value());
        })
    };

    let on_form_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
      <form id="signup-form" onsubmit={on_form_submit}>
        <div class="form-group">
          <label for="email">{ "Student Email:" }</label>
          <input
            type="email"
            id="email"
            required={true}
            placeholder="your-email@mergington.edu"
            value={props.email.clone()}
            oninput={on_email_input}
          />
        </div>
        <div class="form-group">
          <label for="activity">{ "Select Activity:" }</label>
          <select
            id="activity"
            required={true}
            value={props.activity.clone()}
            onchange={on_activity_change}
          >
            { for props.options.iter().map(|o| html! {
                <option
                  key={o.label.clone()}
                  value={o.value.clone()}
                  disabled={o.disabled}
                  selected={o.value == props.activity}
                >
                  { o.label.clone() }
                </option>
            }) }
          </select>
        </div>
        <button type="submit">{ "Sign Up" }</button>
      </form>
    }
}

#[derive(Properties, PartialEq)]
struct MessageBannerProps {
    message: Option<Message>,
}

#[function_component(MessageBanner)]
fn message_banner(props: &MessageBannerProps) -> Html {
    match &props.message {
        Some(m) => html! { <div id="message" class={m.kind.css_class()}>{ m.text.clone() }</div> },
        None => html! { <div id="message" class="hidden"></div> },
    }
}
