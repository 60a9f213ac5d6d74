use std::cell::RefCell;
use std::time::Duration;

use crate::api::ActivityApi;
use crate::error::BoardError;
use crate::model::{Catalog, Filter};
use crate::view::{self, FilterControl, ListView, Message, SelectOption};

/// Where the board writes what should be on screen.
pub trait RenderTarget {
    fn set_filters(&self, filters: Vec<FilterControl>);
    fn set_list(&self, list: ListView);
    fn set_options(&self, options: Vec<SelectOption>);
    /// `None` hides the message area.
    fn set_message(&self, message: Option<Message>);
    fn reset_form(&self);
}

/// One-shot timers. Dropping the handle cancels the task if it has not run.
pub trait Timer {
    type Handle;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Owns the catalog snapshot and the active filter, and pushes views to the
/// render target. All methods take `&self` and never hold a borrow across an
/// `.await`, so a shared `Rc<ActivityBoard>` can serve every event handler.
pub struct ActivityBoard<A, T, C>
where
    A: ActivityApi,
    T: RenderTarget + Clone + 'static,
    C: Timer,
{
    api: A,
    target: T,
    timer: C,
    message_timeout: Duration,
    catalog: RefCell<Catalog>,
    filter: RefCell<Filter>,
    pending_hide: RefCell<Option<C::Handle>>,
}

impl<A, T, C> ActivityBoard<A, T, C>
where
    A: ActivityApi,
    T: RenderTarget + Clone + 'static,
    C: Timer,
{
    pub fn new(api: A, target: T, timer: C, message_timeout: Duration) -> Self {
        Self {
            api,
            target,
            timer,
            message_timeout,
            catalog: RefCell::new(Catalog::new()),
            filter: RefCell::new(Filter::All),
            pending_hide: RefCell::new(None),
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter.borrow().clone()
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog.borrow().clone()
    }

    /// Fetches and installs a fresh catalog. On failure the previous catalog,
    /// filter and controls stay as they were; only the list shows the error.
    pub async fn load_catalog(&self) -> Result<(), BoardError> {
        match self.api.fetch_activities().await {
            Ok(catalog) => {
                log::debug!("loaded {} activities", catalog.len());
                *self.catalog.borrow_mut() = catalog;
                self.target.set_filters(self.filter_controls());
                self.render();
                self.populate_selector();
                Ok(())
            }
            Err(e) => {
                log::error!("error fetching activities: {}", e);
                self.target.set_list(ListView::LoadFailed);
                Err(e)
            }
        }
    }

    pub fn render(&self) {
        let list = view::render(&self.catalog.borrow(), &self.filter.borrow());
        self.target.set_list(list);
    }

    /// Unknown categories are accepted and simply match nothing.
    pub fn set_filter(&self, key: &str) {
        *self.filter.borrow_mut() = Filter::from_key(key);
        self.target.set_filters(self.filter_controls());
        self.render();
    }

    pub fn populate_selector(&self) {
        self.target.set_options(view::selector_options(&self.catalog.borrow()));
    }

    /// On success the form is reset and the catalog reloaded. Either way the
    /// outcome is shown as a message.
    pub async fn submit_signup(&self, activity: &str, email: &str) -> Result<(), BoardError> {
        match self.api.signup(activity, email).await {
            Ok(text) => {
                self.show_message(Message::success(text));
                self.target.reset_form();
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    pub async fn unregister(&self, activity: &str, email: &str) -> Result<(), BoardError> {
        match self.api.unregister(activity, email).await {
            Ok(text) => {
                self.show_message(Message::success(text));
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Shows `message` and restarts the hide countdown. The countdown of any
    /// earlier message is cancelled, so the newest message always gets the
    /// full timeout.
    pub fn show_message(&self, message: Message) {
        self.target.set_message(Some(message));
        let target = self.target.clone();
        let handle = self
            .timer
            .schedule(self.message_timeout, Box::new(move || target.set_message(None)));
        // The old handle is dropped here, after the new one exists.
        self.pending_hide.replace(Some(handle));
    }

    fn filter_controls(&self) -> Vec<FilterControl> {
        view::filter_controls(&self.catalog.borrow(), &self.filter.borrow())
    }

    // A failed refresh after a successful change already shows in the list.
    async fn refresh(&self) {
        let _ = self.load_catalog().await;
    }

    fn report(&self, e: BoardError) -> BoardError {
        match &e {
            BoardError::TransportFailure { action, .. } => {
                log::error!("error during {}: {}", action, e)
            }
            _ => log::warn!("{}", e),
        }
        self.show_message(Message::error(e.user_message()));
        e
    }
}
