use mealbook_shared::normalize_name;
use serde::Serialize;

pub const DEFAULT_THRESHOLD: f64 = 0.34;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngredientMatch {
    pub ingredient_id: String,
    pub name: String,
    /// Levenshtein distance between the normalized names, 0 for exact matches.
    pub distance: usize,
}

struct Candidate {
    id: String,
    name: String,
    key: String,
}

/// Fuzzy lookup of free-text ingredient names in the catalog.
pub struct Matcher {
    candidates: Vec<Candidate>,
    threshold: f64,
}

/// Lowercased, whitespace-collapsed name with a trailing plural removed.
pub fn normalize(name: &str) -> String {
    let name = normalize_name(name);

    if let Some(stem) = name.strip_suffix("ies") {
        if stem.chars().count() > 1 {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = name.strip_suffix("oes") {
        if stem.chars().count() > 1 {
            return format!("{stem}o");
        }
    }

    if name.ends_with('s') && !name.ends_with("ss") && name.chars().count() > 3 {
        return name[..name.len() - 1].to_owned();
    }

    name
}

impl Matcher {
    pub fn new(catalog: impl IntoIterator<Item = (String, String)>, threshold: f64) -> Self {
        let candidates = catalog
            .into_iter()
            .map(|(id, name)| Candidate {
                key: normalize(&name),
                id,
                name,
            })
            .collect();

        Self {
            candidates,
            threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Makes an ingredient created during the import matchable by later lines.
    pub fn push(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let name = name.into();

        self.candidates.push(Candidate {
            key: normalize(&name),
            id: id.into(),
            name,
        });
    }

    pub fn find(&self, name: &str) -> Option<IngredientMatch> {
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }

        if let Some(exact) = self
            .candidates
            .iter()
            .filter(|c| c.key == key)
            .min_by(|a, b| a.id.cmp(&b.id))
        {
            return Some(IngredientMatch {
                ingredient_id: exact.id.to_owned(),
                name: exact.name.to_owned(),
                distance: 0,
            });
        }

        let key_len = key.chars().count();

        self.candidates
            .iter()
            .filter_map(|c| {
                let distance = strsim::levenshtein(&key, &c.key);
                let len = key_len.max(c.key.chars().count());
                let ratio = distance as f64 / len as f64;

                (ratio <= self.threshold).then_some((distance, c))
            })
            .min_by(|(da, a), (db, b)| {
                da.cmp(db)
                    .then_with(|| a.key.chars().count().cmp(&b.key.chars().count()))
                    .then_with(|| a.key.cmp(&b.key))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|(distance, c)| IngredientMatch {
                ingredient_id: c.id.to_owned(),
                name: c.name.to_owned(),
                distance,
            })
    }
}
