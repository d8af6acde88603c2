use mealbook_shared::{clean_name, recipe::Unit};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static RE_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<whole>\d+)\s+(?P<num>\d+)/(?P<den>\d+)|(?P<fnum>\d+)/(?P<fden>\d+)|(?P<low>\d+(?:[.,]\d+)?)(?:\s*(?:-|–|to)\s*(?P<high>\d+(?:[.,]\d+)?))?)\s*",
    )
    .unwrap()
});

static RE_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<unit>[A-Za-z]+)\.?(?:\s+|$)").unwrap());

static RE_PARENTHESES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

const VULGAR_FRACTIONS: [(char, &str); 15] = [
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// One ingredient line of an imported recipe.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParsedLine {
    pub raw: String,
    /// Number written on the line, if any.
    pub quantity: Option<f64>,
    /// Quantity converted to `unit`, 1 piece when the line has no number.
    pub amount: f64,
    pub unit: Unit,
    pub name: String,
    pub note: Option<String>,
}

/// Base unit and conversion factor of a written unit.
pub fn unit_factor(unit: &str) -> Option<(Unit, f64)> {
    let factor = match unit.to_lowercase().as_str() {
        "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => (Unit::Gram, 1.0),
        "kg" | "kilo" | "kilos" | "kilogram" | "kilograms" => (Unit::Gram, 1000.0),
        "oz" | "ounce" | "ounces" => (Unit::Gram, 28.35),
        "lb" | "lbs" | "pound" | "pounds" => (Unit::Gram, 453.59),
        "ml" | "millilitre" | "millilitres" | "milliliter" | "milliliters" => {
            (Unit::Millilitre, 1.0)
        }
        "cl" => (Unit::Millilitre, 10.0),
        "dl" => (Unit::Millilitre, 100.0),
        "l" | "litre" | "litres" | "liter" | "liters" => (Unit::Millilitre, 1000.0),
        "cup" | "cups" => (Unit::Millilitre, 240.0),
        "tbsp" | "tbs" | "tablespoon" | "tablespoons" => (Unit::Millilitre, 15.0),
        "tsp" | "teaspoon" | "teaspoons" => (Unit::Millilitre, 5.0),
        "piece" | "pieces" | "pc" | "pcs" | "whole" => (Unit::Piece, 1.0),
        _ => return None,
    };

    Some(factor)
}

fn replace_vulgar_fractions(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for c in value.chars() {
        match VULGAR_FRACTIONS.iter().find(|(f, _)| *f == c) {
            Some((_, ascii)) => {
                out.push(' ');
                out.push_str(ascii);
                out.push(' ');
            }
            None => out.push(c),
        }
    }

    out
}

fn number(value: &str) -> Option<f64> {
    value.replace(',', ".").parse::<f64>().ok()
}

fn fraction(num: &str, den: &str) -> Option<f64> {
    let num = number(num)?;
    let den = number(den)?;

    if den == 0.0 {
        return None;
    }

    Some(num / den)
}

fn leading_quantity(line: &str) -> (Option<f64>, &str) {
    let Some(caps) = RE_QUANTITY.captures(line) else {
        return (None, line);
    };

    let rest = &line[caps.get(0).map(|m| m.end()).unwrap_or_default()..];

    let quantity = if let (Some(whole), Some(num), Some(den)) =
        (caps.name("whole"), caps.name("num"), caps.name("den"))
    {
        number(whole.as_str()).zip(fraction(num.as_str(), den.as_str())).map(|(w, f)| w + f)
    } else if let (Some(num), Some(den)) = (caps.name("fnum"), caps.name("fden")) {
        fraction(num.as_str(), den.as_str())
    } else {
        caps.name("high")
            .or_else(|| caps.name("low"))
            .and_then(|m| number(m.as_str()))
    };

    match quantity {
        Some(quantity) => (Some(quantity), rest),
        None => (None, line),
    }
}

/// Splits a free-text line such as `1 ½ cups flour, sifted` into quantity,
/// unit, name and note.
pub fn parse_line(raw: &str) -> ParsedLine {
    let line = clean_name(&replace_vulgar_fractions(raw));
    let (quantity, rest) = leading_quantity(&line);

    let (unit, factor, rest) = match RE_UNIT.captures(rest) {
        Some(caps) => match caps.name("unit").and_then(|m| unit_factor(m.as_str())) {
            Some((unit, factor)) => {
                let end = caps.get(0).map(|m| m.end()).unwrap_or_default();
                (unit, factor, &rest[end..])
            }
            None => (Unit::Piece, 1.0, rest),
        },
        None => (Unit::Piece, 1.0, rest),
    };

    let rest = rest.strip_prefix("of ").unwrap_or(rest);
    let rest = RE_PARENTHESES.replace_all(rest, " ");
    let (name, note) = match rest.split_once(',') {
        Some((name, note)) => (clean_name(name), Some(clean_name(note))),
        None => (clean_name(&rest), None),
    };

    ParsedLine {
        raw: raw.trim().to_owned(),
        quantity,
        amount: quantity.unwrap_or(1.0) * factor,
        unit,
        name,
        note: note.filter(|n| !n.is_empty()),
    }
}
