//! View models handed to the render target. Everything here is a pure
//! function of the catalog and filter.

use crate::model::{Availability, Catalog, Filter};

pub const NO_MATCHES: &str = "No activities found in this category.";
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const LOADING: &str = "Loading activities...";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const ALL_LABEL: &str = "All Activities";

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub category: String,
    /// Lower-cased category, used for the badge class.
    pub category_key: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: u32,
    pub availability: Availability,
    pub participants: Vec<String>,
}

impl ActivityCard {
    pub fn availability_text(&self) -> String {
        self.availability.label(self.spots_left)
    }

    pub fn availability_class(&self) -> String {
        let extra = self.availability.css_class();
        if extra.is_empty() {
            "availability".to_string()
        } else {
            format!("availability {}", extra)
        }
    }

    pub fn badge_class(&self) -> String {
        format!("category-badge category-{}", self.category_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Cards(Vec<ActivityCard>),
    /// Nothing matched the filter.
    Empty,
    LoadFailed,
}

impl ListView {
    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            ListView::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListView::Loading => Some(LOADING),
            ListView::Empty => Some(NO_MATCHES),
            ListView::LoadFailed => Some(LOAD_FAILED),
            ListView::Cards(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    /// Case-folded id, `"all"` for the permanent control.
    pub key: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Empty for the placeholder.
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success message",
            MessageKind::Error => "error message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: MessageKind::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: MessageKind::Error }
    }
}

/// One card per activity passing `filter`, in catalog order. An empty result
/// becomes the placeholder rather than an empty card list.
pub fn render(catalog: &Catalog, filter: &Filter) -> ListView {
    let cards: Vec<ActivityCard> = catalog
        .iter()
        .filter(|(_, activity)| filter.matches(activity))
        .map(|(name, activity)| ActivityCard {
            name: name.to_string(),
            category: activity.category.clone(),
            category_key: activity.category_key(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            availability: activity.availability(),
            participants: activity.participants.clone(),
        })
        .collect();

    if cards.is_empty() {
        ListView::Empty
    } else {
        ListView::Cards(cards)
    }
}

/// The permanent "all" control followed by one control per category.
/// Only the control whose key equals the filter is active.
pub fn filter_controls(catalog: &Catalog, filter: &Filter) -> Vec<FilterControl> {
    let active = filter.key();
    std::iter::once((Filter::ALL_KEY.to_string(), ALL_LABEL.to_string()))
        .chain(catalog.categories())
        .map(|(key, label)| FilterControl {
            active: key == active,
            key,
            label,
        })
        .collect()
}

pub fn selector_options(catalog: &Catalog) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: String::new(),
        label: SELECT_PLACEHOLDER.to_string(),
        disabled: true,
    }];
    options.extend(catalog.iter().map(|(name, activity)| SelectOption {
        value: name.to_string(),
        label: format!("{} ({})", name, activity.category),
        disabled: false,
    }));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::activity;

    fn school() -> Catalog {
        Catalog::from_entries(vec![
            ("Chess Club".to_string(), activity("Academic", 12, 2)),
            ("Gym Class".to_string(), activity("Sports", 30, 2)),
            ("Drama Club".to_string(), activity("Arts", 25, 25)),
            ("Basketball Team".to_string(), activity("sports", 15, 12)),
        ])
    }

    #[test]
    fn all_filter_renders_every_activity_in_order() {
        let view = render(&school(), &Filter::All);
        let names: Vec<&str> = view.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Chess Club", "Gym Class", "Drama Club", "Basketball Team"]);
        assert_eq!(view.placeholder(), None);
    }

    #[test]
    fn category_filter_matches_case_insensitively() {
        let view = render(&school(), &Filter::from_key("SPORTS"));
        let names: Vec<&str> = view.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Gym Class", "Basketball Team"]);
    }

    #[test]
    fn unknown_category_shows_placeholder() {
        let view = render(&school(), &Filter::from_key("robotics"));
        assert_eq!(view, ListView::Empty);
        assert_eq!(view.placeholder(), Some("No activities found in this category."));

        assert_eq!(render(&Catalog::new(), &Filter::All), ListView::Empty);
    }

    #[test]
    fn cards_carry_availability() {
        let view = render(&school(), &Filter::All);
        let drama = &view.cards()[2];
        assert_eq!(drama.availability_text(), "Full");
        assert_eq!(drama.availability_class(), "availability full");

        let basketball = &view.cards()[3];
        assert_eq!(basketball.availability_text(), "3 spots left");
        assert_eq!(basketball.availability_class(), "availability limited");
        assert_eq!(basketball.badge_class(), "category-badge category-sports");

        let chess = &view.cards()[0];
        assert_eq!(chess.availability_text(), "10 spots left");
        assert_eq!(chess.availability_class(), "availability");
    }

    #[test]
    fn filter_controls_mark_one_active() {
        let controls = filter_controls(&school(), &Filter::from_key("sports"));
        let keys: Vec<&str> = controls.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["all", "academic", "sports", "arts"]);
        assert_eq!(controls[2].label, "Sports");
        let active: Vec<&str> = controls.iter().filter(|c| c.active).map(|c| c.key.as_str()).collect();
        assert_eq!(active, vec!["sports"]);

        let controls = filter_controls(&Catalog::new(), &Filter::All);
        assert_eq!(controls.len(), 1);
        assert!(controls[0].active);
    }

    #[test]
    fn padded_category_control_is_active_and_renders_cards() {
        let catalog = Catalog::from_entries(vec![
            ("Drama Club".to_string(), activity(" Arts ", 25, 2)),
            ("Gym Class".to_string(), activity("Sports", 30, 2)),
        ]);
        let key = filter_controls(&catalog, &Filter::All)[1].key.clone();
        let filter = Filter::from_key(&key);

        let active: Vec<String> = filter_controls(&catalog, &filter)
            .into_iter()
            .filter(|c| c.active)
            .map(|c| c.key)
            .collect();
        assert_eq!(active, vec![key]);

        let view = render(&catalog, &filter);
        let names: Vec<&str> = view.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Drama Club"]);
        assert_eq!(view.cards()[0].badge_class(), "category-badge category-arts");
    }

    #[test]
    fn selector_lists_placeholder_then_activities() {
        let catalog = Catalog::from_entries(vec![("Chess Club".to_string(), activity("Sports", 12, 0))]);
        let labels: Vec<String> = selector_options(&catalog).into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["-- Select an activity --", "Chess Club (Sports)"]);

        let options = selector_options(&catalog);
        assert!(options[0].disabled);
        assert_eq!(options[0].value, "");
        assert_eq!(options[1].value, "Chess Club");
    }
}
