use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_segmentation::UnicodeSegmentation;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z]+)\}").expect("placeholder pattern is valid"));

/// Named substitution slots understood by guidance and segment templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSlot {
    Name,
    Slot,
    Terrain,
    AdventureHighlights,
    FoodHighlights,
    PhotoHighlights,
    NatureHighlights,
    ShoppingHighlights,
}

impl TemplateSlot {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "slot" => Some(Self::Slot),
            "terrain" => Some(Self::Terrain),
            "adventureHighlights" => Some(Self::AdventureHighlights),
            "foodHighlights" => Some(Self::FoodHighlights),
            "photoHighlights" => Some(Self::PhotoHighlights),
            "natureHighlights" => Some(Self::NatureHighlights),
            "shoppingHighlights" => Some(Self::ShoppingHighlights),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateVars<'a> {
    values: Vec<(TemplateSlot, &'a str)>,
}

impl<'a> TemplateVars<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(value: &'a str) -> Self {
        Self::new().with(TemplateSlot::Name, value)
    }

    pub fn with(mut self, slot: TemplateSlot, value: &'a str) -> Self {
        self.values.retain(|(existing, _)| *existing != slot);
        self.values.push((slot, value));
        self
    }

    fn get(&self, slot: TemplateSlot) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(existing, _)| *existing == slot)
            .map(|(_, value)| *value)
    }
}

/// Fills `{slot}` placeholders. Unknown or unset placeholders are left untouched.
pub fn render(template: &str, vars: &TemplateVars<'_>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            TemplateSlot::from_key(&caps[1])
                .and_then(|slot| vars.get(slot))
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Capitalises the first letter of every word, lower-casing the rest.
pub fn title_case(value: &str) -> String {
    value
        .split_word_bounds()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                _ => word.to_string(),
            }
        })
        .collect()
}

/// Integer with `,` thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_known_slots_and_keeps_unknown() {
        let vars = TemplateVars::name("Shimla").with(TemplateSlot::Terrain, "cedar ridgelines");
        assert_eq!(
            render("Walk {terrain} near {name} at {time}", &vars),
            "Walk cedar ridgelines near Shimla at {time}"
        );
    }

    #[test]
    fn unset_slot_stays_verbatim() {
        assert_eq!(render("{slot} trek", &TemplateVars::new()), "{slot} trek");
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("solo backpacker"), "Solo Backpacker");
        assert_eq!(title_case("FAMILY"), "Family");
        assert_eq!(title_case("sunrise"), "Sunrise");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(3000), "3,000");
        assert_eq!(group_thousands(26600), "26,600");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
