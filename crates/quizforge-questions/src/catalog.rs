//! Static fact tables the generators draw from.

use crate::AnswerValue;

/// A fixed answer in a fact table.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FactAnswer {
    Number(i64),
    Word(&'static str),
}

impl From<FactAnswer> for AnswerValue {
    fn from(answer: FactAnswer) -> Self {
        match answer {
            FactAnswer::Number(n) => AnswerValue::Integer(n),
            FactAnswer::Word(w) => AnswerValue::text(w),
        }
    }
}

/// A ready-made (prompt, answer, explanation) triple.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fact {
    pub(crate) prompt: &'static str,
    pub(crate) answer: FactAnswer,
    pub(crate) explanation: &'static str,
}

const fn number(prompt: &'static str, n: i64, explanation: &'static str) -> Fact {
    Fact {
        prompt,
        answer: FactAnswer::Number(n),
        explanation,
    }
}

const fn word(
    prompt: &'static str,
    w: &'static str,
    explanation: &'static str,
) -> Fact {
    Fact {
        prompt,
        answer: FactAnswer::Word(w),
        explanation,
    }
}

pub(crate) const ELEMENTS: &[(&str, i64)] = &[
    ("Hydrogen", 1),
    ("Helium", 2),
    ("Lithium", 3),
    ("Carbon", 6),
    ("Nitrogen", 7),
    ("Oxygen", 8),
    ("Neon", 10),
    ("Sodium", 11),
    ("Magnesium", 12),
    ("Aluminium", 13),
    ("Silicon", 14),
    ("Phosphorus", 15),
    ("Sulfur", 16),
    ("Chlorine", 17),
    ("Argon", 18),
    ("Potassium", 19),
    ("Calcium", 20),
    ("Iron", 26),
    ("Copper", 29),
    ("Zinc", 30),
];

pub(crate) const BIOLOGY_FACTS: &[Fact] = &[
    number("How many bones does an adult human body have?", 206, "An adult human has 206 bones."),
    number("How many chambers does the human heart have?", 4, "The heart has 4 chambers."),
    word("Which organ pumps blood through the body?", "heart", "The heart pumps blood through the body."),
    word("Which gas do plants absorb for photosynthesis?", "carbon dioxide", "Plants absorb carbon dioxide."),
    word("Which organ is primarily responsible for gas exchange?", "lungs", "The lungs exchange oxygen and carbon dioxide."),
    word("What is the largest organ in the human body?", "skin", "The skin is the largest organ."),
    word("Which blood cells help fight infection?", "white blood cells", "White blood cells fight infection."),
    word("What is the basic unit of life?", "cell", "The cell is the basic unit of life."),
    number("How many pairs of chromosomes do humans usually have?", 23, "Humans usually have 23 chromosome pairs."),
    word("Which part of a plant absorbs water from soil?", "roots", "Roots absorb water and minerals from soil."),
];

pub(crate) const ASTRONOMY_FACTS: &[Fact] = &[
    word("Which planet is known as the Red Planet?", "mars", "Mars is often called the Red Planet."),
    word("Which planet is the largest in our solar system?", "jupiter", "Jupiter is the largest planet in our solar system."),
    word("What is the name of Earth's natural satellite?", "moon", "Earth's natural satellite is the Moon."),
    word("What galaxy contains our solar system?", "milky way", "Our solar system is in the Milky Way galaxy."),
    number("How long does Earth take to orbit the Sun (in days)?", 365, "Earth takes about 365 days to orbit the Sun."),
];

pub(crate) const PLANETS_FROM_SUN: &[&str] = &[
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus",
    "Neptune",
];

pub(crate) const COUNTRY_CAPITALS: &[(&str, &str)] = &[
    ("Germany", "Berlin"),
    ("France", "Paris"),
    ("Spain", "Madrid"),
    ("Italy", "Rome"),
    ("Portugal", "Lisbon"),
    ("Poland", "Warsaw"),
    ("Japan", "Tokyo"),
    ("India", "New Delhi"),
    ("Egypt", "Cairo"),
    ("Canada", "Ottawa"),
    ("Brazil", "Brasilia"),
    ("Australia", "Canberra"),
];

pub(crate) const COUNTRY_CONTINENTS: &[(&str, &str)] = &[
    ("Germany", "Europe"),
    ("Japan", "Asia"),
    ("Brazil", "South America"),
    ("Egypt", "Africa"),
    ("Australia", "Oceania"),
    ("Canada", "North America"),
];

pub(crate) const HISTORY_EVENTS: &[(&str, i64)] = &[
    ("the fall of the Berlin Wall", 1989),
    ("the first Moon landing", 1969),
    ("World War I began", 1914),
    ("World War II ended", 1945),
    ("the United Nations was founded", 1945),
    ("the French Revolution began", 1789),
    ("the Declaration of Independence (USA)", 1776),
    ("the invention of the World Wide Web", 1989),
    ("the Magna Carta was signed", 1215),
    ("the first modern Olympic Games", 1896),
];

/// (function, degrees, value) rows with exact table values.
pub(crate) const TRIG_TABLE: &[(&str, u32, f64)] = &[
    ("sin", 0, 0.0),
    ("cos", 0, 1.0),
    ("tan", 0, 0.0),
    ("sin", 30, 0.5),
    ("tan", 45, 1.0),
    ("cos", 60, 0.5),
    ("sin", 90, 1.0),
    ("cos", 180, -1.0),
];
