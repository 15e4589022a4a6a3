use serde::{Deserialize, Serialize};

// Storage keys shared by both widgets
pub const MODULE_KEY: &str = "module";
pub const BASE_PRICE_KEY: &str = "base_price";
pub const EMAIL_KEY: &str = "email";

/// Storage keys that differ per widget: the reveal flag and the reward text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    pub flag: &'static str,
    pub reward: &'static str,
}

pub const SCRATCH_SESSION: SessionKeys = SessionKeys {
    flag: "has_scratched",
    reward: "scratch_reward",
};

pub const WHEEL_SESSION: SessionKeys = SessionKeys {
    flag: "has_spun",
    reward: "win_text",
};

/// The reward context for one browser session. Filled from the reward
/// service on widget init (or spin completion), then frozen into session
/// storage by the first reveal.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RewardAssignment {
    pub reward: String,
    pub module: String,
    pub base_price: i64,
    pub email: String,
}

impl RewardAssignment {
    /// The key/value pairs that make up the persisted reveal record.
    /// Everything is stored as a string; `base_price` as its decimal form.
    pub fn session_entries(&self, keys: &SessionKeys) -> [(&'static str, String); 5] {
        [
            (keys.flag, "true".to_string()),
            (keys.reward, self.reward.clone()),
            (MODULE_KEY, self.module.clone()),
            (BASE_PRICE_KEY, self.base_price.to_string()),
            (EMAIL_KEY, self.email.clone()),
        ]
    }

    /// Rebuilds the assignment from stored values. Returns `None` unless the
    /// widget's reveal flag is set. Missing fields come back empty and a
    /// non-numeric `base_price` comes back as 0; a stale or mangled record
    /// must never take the page down.
    pub fn from_session<F>(keys: &SessionKeys, get: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if get(keys.flag).as_deref() != Some("true") {
            return None;
        }
        Some(Self {
            reward: get(keys.reward).unwrap_or_default(),
            module: get(MODULE_KEY).unwrap_or_default(),
            base_price: get(BASE_PRICE_KEY)
                .and_then(|v| match v.parse() {
                    Ok(price) => Some(price),
                    Err(_) => {
                        log::warn!("stored base price {:?} is not numeric", v);
                        None
                    }
                })
                .unwrap_or(0),
            email: get(EMAIL_KEY).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> RewardAssignment {
        RewardAssignment {
            reward: "20% Discount".to_string(),
            module: "sprechen b1".to_string(),
            base_price: 2000,
            email: "a@b.test".to_string(),
        }
    }

    fn store(entries: &[(&'static str, String)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn round_trips_through_entries() {
        let saved = sample();
        let map = store(&saved.session_entries(&SCRATCH_SESSION));
        let loaded =
            RewardAssignment::from_session(&SCRATCH_SESSION, |k| map.get(k).cloned()).unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn absent_flag_means_not_revealed() {
        let map: HashMap<String, String> = HashMap::new();
        assert!(RewardAssignment::from_session(&WHEEL_SESSION, |k| map.get(k).cloned()).is_none());
    }

    #[test]
    fn flags_are_per_widget() {
        let map = store(&sample().session_entries(&SCRATCH_SESSION));
        assert!(RewardAssignment::from_session(&WHEEL_SESSION, |k| map.get(k).cloned()).is_none());
    }

    #[test]
    fn malformed_base_price_loads_as_zero() {
        let mut map = store(&sample().session_entries(&WHEEL_SESSION));
        map.insert(BASE_PRICE_KEY.to_string(), "not a number".to_string());
        let loaded =
            RewardAssignment::from_session(&WHEEL_SESSION, |k| map.get(k).cloned()).unwrap();
        assert_eq!(loaded.base_price, 0);
    }

    #[test]
    fn missing_fields_load_as_defaults() {
        let mut map = HashMap::new();
        map.insert(SCRATCH_SESSION.flag.to_string(), "true".to_string());
        let loaded =
            RewardAssignment::from_session(&SCRATCH_SESSION, |k| map.get(k).cloned()).unwrap();
        assert_eq!(loaded, RewardAssignment::default());
    }

    #[test]
    fn repeated_loads_are_identical() {
        let map = store(&sample().session_entries(&WHEEL_SESSION));
        let first =
            RewardAssignment::from_session(&WHEEL_SESSION, |k| map.get(k).cloned()).unwrap();
        let second =
            RewardAssignment::from_session(&WHEEL_SESSION, |k| map.get(k).cloned()).unwrap();
        assert_eq!(first, second);
    }
}
