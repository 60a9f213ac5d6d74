use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Fewer spots than this (but more than zero) shows as "limited".
pub const LIMITED_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    #[serde(default)]
    pub category: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Overbooked activities report zero rather than going negative.
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }

    pub fn availability(&self) -> Availability {
        Availability::from_spots(self.spots_left())
    }

    /// Filter key: trimmed and case-folded, the same way `Filter::from_key`
    /// folds control ids.
    pub fn category_key(&self) -> String {
        self.category.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Full,
    Limited,
    Open,
}

impl Availability {
    pub fn from_spots(spots_left: u32) -> Self {
        match spots_left {
            0 => Availability::Full,
            n if n < LIMITED_THRESHOLD => Availability::Limited,
            _ => Availability::Open,
        }
    }

    /// Extra class on the availability line; open activities get none.
    pub fn css_class(self) -> &'static str {
        match self {
            Availability::Full => "full",
            Availability::Limited => "limited",
            Availability::Open => "",
        }
    }

    pub fn label(self, spots_left: u32) -> String {
        match self {
            Availability::Full => "Full".to_string(),
            _ => format!("{} spots left", spots_left),
        }
    }
}

/// Snapshot of `GET /activities`, kept in the order the server sent it.
///
/// A JSON object is read entry by entry so the arrival order survives even
/// though `serde_json` maps would sort the keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<(String, Activity)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<(String, Activity)>) -> Self {
        let mut catalog = Self::new();
        for (name, activity) in entries {
            catalog.insert(name, activity);
        }
        catalog
    }

    /// Same-name entries replace in place, keeping the first position.
    pub fn insert(&mut self, name: String, activity: Activity) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories, case-insensitively, in first-seen order.
    /// Each pair is `(filter key, display name)`.
    pub fn categories(&self) -> Vec<(String, String)> {
        let mut seen: Vec<(String, String)> = Vec::new();
        for (_, activity) in self.iter() {
            if activity.category.trim().is_empty() {
                continue;
            }
            let key = activity.category_key();
            if !seen.iter().any(|(k, _)| *k == key) {
                seen.push((key, activity.category.trim().to_string()));
            }
        }
        seen
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping activity names to activities")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Catalog, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut catalog = Catalog::new();
                while let Some((name, activity)) = map.next_entry::<String, Activity>()? {
                    catalog.insert(name, activity);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Which category the card list is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub const ALL_KEY: &'static str = "all";

    /// Control ids are case-folded; `"all"` in any case means no filtering.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim().to_lowercase();
        if key == Self::ALL_KEY {
            Filter::All
        } else {
            Filter::Category(key)
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Filter::All => Self::ALL_KEY,
            Filter::Category(c) => c,
        }
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => activity.category_key() == *c,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn activity(category: &str, max: u32, taken: usize) -> Activity {
        Activity {
            description: format!("{} things", category),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            category: category.to_string(),
            max_participants: max,
            participants: (0..taken).map(|i| format!("student{}@mergington.edu", i)).collect(),
        }
    }

    #[test]
    fn availability_follows_spots_left() {
        let full = activity("Sports", 10, 10);
        assert_eq!(full.availability(), Availability::Full);
        assert_eq!(full.availability().label(full.spots_left()), "Full");

        let limited = activity("Sports", 10, 6);
        assert_eq!(limited.spots_left(), 4);
        assert_eq!(limited.availability(), Availability::Limited);
        assert_eq!(limited.availability().css_class(), "limited");

        let open = activity("Sports", 10, 2);
        assert_eq!(open.availability(), Availability::Open);
        assert_eq!(open.availability().label(open.spots_left()), "8 spots left");
        assert_eq!(open.availability().css_class(), "");
    }

    #[test]
    fn overbooked_activity_is_full() {
        let a = activity("Arts", 2, 3);
        assert_eq!(a.spots_left(), 0);
        assert_eq!(a.availability(), Availability::Full);
    }

    #[test]
    fn catalog_keeps_server_order() {
        let json = r#"{
            "Zumba": {"description": "d", "schedule": "s", "category": "Sports", "max_participants": 5, "participants": []},
            "Art Studio": {"description": "d", "schedule": "s", "category": "Arts", "max_participants": 18, "participants": []},
            "Math Club": {"description": "d", "schedule": "s", "category": "Academic", "max_participants": 9, "participants": ["a@b.com"]}
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = catalog.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zumba", "Art Studio", "Math Club"]);
        assert_eq!(catalog.get("Math Club").unwrap().participants.len(), 1);
    }

    #[test]
    fn catalog_rejects_non_object() {
        assert!(serde_json::from_str::<Catalog>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Catalog>(r#"{"x": {"schedule": "s"}}"#).is_err());
    }

    #[test]
    fn categories_are_case_insensitive_and_first_seen() {
        let catalog = Catalog::from_entries(vec![
            ("Gym".to_string(), activity("Sports", 30, 1)),
            ("Drama".to_string(), activity("Arts", 25, 2)),
            ("Soccer".to_string(), activity("sports", 22, 0)),
            ("Mystery".to_string(), activity("", 5, 0)),
        ]);
        assert_eq!(
            catalog.categories(),
            vec![
                ("sports".to_string(), "Sports".to_string()),
                ("arts".to_string(), "Arts".to_string()),
            ]
        );
    }

    #[test]
    fn padded_category_control_selects_its_activities() {
        let catalog = Catalog::from_entries(vec![("Drama".to_string(), activity(" Arts ", 25, 2))]);
        let (key, label) = catalog.categories().remove(0);
        assert_eq!(key, "arts");
        assert_eq!(label, "Arts");

        let filter = Filter::from_key(&key);
        assert_eq!(filter.key(), key);
        assert!(filter.matches(catalog.iter().next().unwrap().1));
    }

    #[test]
    fn filter_keys_fold_case() {
        assert_eq!(Filter::from_key("ALL"), Filter::All);
        assert_eq!(Filter::from_key("Sports"), Filter::Category("sports".to_string()));
        assert!(Filter::from_key("sports").matches(&activity("SPORTS", 1, 0)));
        assert!(!Filter::from_key("arts").matches(&activity("Sports", 1, 0)));
    }
}
