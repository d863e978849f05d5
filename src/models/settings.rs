//! User preferences and the bounded favorites list

use serde::{Deserialize, Serialize};

use super::weather::TemperatureUnit;

/// Maximum number of favorites kept
pub const MAX_FAVORITES: usize = 5;

/// Ordered, duplicate-free list of at most [`MAX_FAVORITES`] place names.
///
/// Insertion order is significant: index 0 is the oldest entry and the first
/// to be evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FavoritesList {
    names: Vec<String>,
}

impl FavoritesList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.names.iter()
    }

    /// Favorite at a zero-based position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Append `name`, evicting the oldest entry when full.
    ///
    /// Returns `false` and leaves the list untouched if `name` is already present.
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        if self.names.len() >= MAX_FAVORITES {
            self.names.remove(0);
        }
        self.names.push(name.to_string());
        true
    }

    /// Remove `name`, returning whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }
}

impl From<Vec<String>> for FavoritesList {
    fn from(names: Vec<String>) -> Self {
        let mut list = Self::new();
        for name in names {
            list.add(&name);
        }
        list
    }
}

impl From<FavoritesList> for Vec<String> {
    fn from(list: FavoritesList) -> Self {
        list.names
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Place looked up when none is given
    pub default_location: Option<String>,
    /// Unit temperatures are requested and displayed in
    pub temperature_unit: TemperatureUnit,
    /// Favorite place names
    pub favorites: FavoritesList,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_list() -> FavoritesList {
        let mut list = FavoritesList::new();
        for name in ["Oslo", "Lima", "Cairo", "Perth", "Quito"] {
            assert!(list.add(name));
        }
        list
    }

    #[test]
    fn test_sixth_favorite_evicts_oldest() {
        let mut list = full_list();
        assert!(list.add("Tokyo"));

        assert_eq!(list.len(), MAX_FAVORITES);
        let names: Vec<&String> = list.iter().collect();
        assert_eq!(names, ["Lima", "Cairo", "Perth", "Quito", "Tokyo"]);
    }

    #[test]
    fn test_duplicate_is_noop() {
        let mut list = full_list();
        let before = list.clone();

        assert!(!list.add("Cairo"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove() {
        let mut list = full_list();
        assert!(list.remove("Perth"));
        assert!(!list.remove("Perth"));
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(3), Some("Quito"));
    }

    #[test]
    fn test_deserialize_enforces_bounds() {
        let json = r#"["A", "B", "A", "C", "D", "E", "F", "G"]"#;
        let list: FavoritesList = serde_json::from_str(json).unwrap();
        let names: Vec<&String> = list.iter().collect();
        assert_eq!(names, ["C", "D", "E", "F", "G"]);
    }

    #[test]
    fn test_settings_field_names() {
        let mut settings = Settings::default();
        settings.favorites.add("Oslo");
        let value = serde_json::to_value(&settings).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "default_location": null,
                "temperature_unit": "Celsius",
                "favorites": ["Oslo"],
            })
        );
    }
}
