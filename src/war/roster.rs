//! Named rosters and the roster book they are picked from

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::character::{generate_profile, migrate_roster, Character, StoredCharacter};
use crate::core::dice::RandomSource;
use crate::core::error::{Result, WarError};

/// One side of a war
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub members: Vec<Character>,
}

impl Roster {
    pub fn new(name: impl Into<String>, members: Vec<Character>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.members.iter().filter(|c| c.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.living().count()
    }

    /// Summed HP of living members
    pub fn total_hp(&self) -> u32 {
        self.living().fold(0u32, |sum, c| sum.saturating_add(c.hp))
    }
}

/// Random roster of `size` generated profiles named `"{name} {n}"`
pub fn random_roster<R: RandomSource + ?Sized>(name: &str, size: usize, rng: &mut R) -> Roster {
    let members = (1..=size)
        .map(|n| generate_profile(format!("{} {}", name, n), rng))
        .collect();
    Roster::new(name, members)
}

/// Rosters keyed by group name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterBook {
    groups: BTreeMap<String, Vec<Character>>,
}

impl RosterBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, members: Vec<Character>) {
        self.groups.insert(name.into(), members);
    }

    pub fn get(&self, name: &str) -> Option<&[Character]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Snapshot a named group as a roster
    pub fn roster(&self, name: &str) -> Result<Roster> {
        self.get(name)
            .map(|members| Roster::new(name, members.to_vec()))
            .ok_or_else(|| WarError::RosterNotFound(name.to_string()))
    }

    /// Write a roster's current members back under its name
    pub fn store(&mut self, roster: &Roster) {
        self.groups.insert(roster.name.clone(), roster.members.clone());
    }
}

/// Parse a roster book from JSON of the form `{ "Group 1": [record, ...], ... }`.
///
/// Every record goes through load-time migration.
pub fn parse_roster_book(json: &str) -> Result<RosterBook> {
    let raw: BTreeMap<String, Vec<StoredCharacter>> = serde_json::from_str(json)?;
    let mut book = RosterBook::new();
    for (name, records) in raw {
        let members = migrate_roster(&records)?;
        tracing::debug!("Loaded roster {} with {} members", name, members.len());
        book.insert(name, members);
    }
    Ok(book)
}

/// Load a roster book from a JSON file
pub fn load_roster_book(path: impl AsRef<Path>) -> Result<RosterBook> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let book = parse_roster_book(&contents)?;
    tracing::info!("Loaded {} rosters from {}", book.len(), path.display());
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::core::dice::SeededRng;
    use crate::core::types::CharacterId;

    #[test]
    fn test_total_hp_counts_living_only() {
        let mut members = vec![
            Character::from_class(CharacterId::new(), "A", CharacterClass::Brute),
            Character::from_class(CharacterId::new(), "B", CharacterClass::Shooter),
        ];
        members[0].hp = 5;
        members[1].hp = 0;
        let roster = Roster::new("Crew", members);
        assert_eq!(roster.total_hp(), 5);
        assert_eq!(roster.alive_count(), 1);
    }

    #[test]
    fn test_total_hp_saturates() {
        let mut members = vec![
            Character::from_class(CharacterId::new(), "A", CharacterClass::Brute),
            Character::from_class(CharacterId::new(), "B", CharacterClass::Brute),
        ];
        for c in &mut members {
            c.max_hp = u32::MAX;
            c.hp = u32::MAX - 1;
        }
        assert_eq!(Roster::new("Giants", members).total_hp(), u32::MAX);
    }

    #[test]
    fn test_oversized_record_rejected_at_load() {
        let json = r#"{ "A": [
            {"schemaVersion": 2, "class": 5, "hp": 4000000000, "maxHp": 4000000000},
            {"schemaVersion": 2, "class": 5, "hp": 4000000000, "maxHp": 4000000000}
        ] }"#;
        assert!(matches!(parse_roster_book(json), Err(WarError::InvalidSetup(_))));
    }

    #[test]
    fn test_random_roster_names() {
        let mut rng = SeededRng::seeded(9);
        let roster = random_roster("Raiders", 3, &mut rng);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.members[2].name, "Raiders 3");
    }

    #[test]
    fn test_parse_book_migrates_records() {
        let json = r#"{
            "Group 1": [
                {"name": "Old Timer", "class": 5, "hp": 8, "maxHp": 12, "armor": 2, "initiative": 3}
            ],
            "Group 2": [
                {"schemaVersion": 2, "name": "Vex", "class": 1, "gunPoints": 0, "bulletTokens": 4}
            ]
        }"#;
        let book = parse_roster_book(json).unwrap();
        assert_eq!(book.names().collect::<Vec<_>>(), vec!["Group 1", "Group 2"]);

        let first = book.roster("Group 1").unwrap();
        assert_eq!(first.members[0].armor_plates, 6);
        assert_eq!(first.members[0].hp, 8);

        let second = book.roster("Group 2").unwrap();
        assert!(!second.members[0].has_ranged_weapon);
        assert_eq!(second.members[0].bullet_tokens, 0);
    }

    #[test]
    fn test_missing_roster() {
        let book = RosterBook::new();
        assert!(matches!(book.roster("Nobody"), Err(WarError::RosterNotFound(_))));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(parse_roster_book("[1, 2]"), Err(WarError::SerdeError(_))));
        assert!(matches!(
            parse_roster_book(r#"{"G": [{"class": 12}]}"#),
            Err(WarError::UnknownClass(12))
        ));
    }
}
