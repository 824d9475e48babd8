//! Geography and history.

use rand::Rng;

use super::pick;
use crate::catalog::{COUNTRY_CAPITALS, COUNTRY_CONTINENTS, HISTORY_EVENTS};
use crate::question::Draft;
use crate::{AnswerValue, GradeTier};

pub(crate) fn geography<R: Rng + ?Sized>(_tier: GradeTier, rng: &mut R) -> Draft {
    match *pick(rng, &["capital", "country", "continent"]) {
        "capital" => {
            let &(country, capital) = pick(rng, COUNTRY_CAPITALS);
            Draft::new(
                format!("What is the capital city of {country}?"),
                AnswerValue::text(capital),
                format!("The capital city of {country} is {capital}."),
            )
        }
        "country" => {
            let &(country, capital) = pick(rng, COUNTRY_CAPITALS);
            Draft::new(
                format!("{capital} is the capital city of which country?"),
                AnswerValue::text(country),
                format!("{capital} is the capital of {country}."),
            )
        }
        _ => {
            let &(country, continent) = pick(rng, COUNTRY_CONTINENTS);
            Draft::new(
                format!("Which continent is {country} in?"),
                AnswerValue::text(continent),
                format!("{country} is in {continent}."),
            )
        }
    }
}

pub(crate) fn history<R: Rng + ?Sized>(_tier: GradeTier, rng: &mut R) -> Draft {
    if rng.random_bool(0.5) {
        let &(event, year) = pick(rng, HISTORY_EVENTS);
        return Draft::new(
            format!("In which year did {event} happen?"),
            AnswerValue::Integer(year),
            format!("{event} happened in {year}."),
        );
    }

    // Asking "what happened in {year}" only works when that year names a
    // single event in the table.
    let unambiguous: Vec<(&str, i64)> = HISTORY_EVENTS
        .iter()
        .copied()
        .filter(|(_, year)| HISTORY_EVENTS.iter().filter(|(_, y)| y == year).count() == 1)
        .collect();
    let &(event, year) = pick(rng, &unambiguous);
    Draft::new(
        format!("What major event happened in {year}?"),
        AnswerValue::text(event),
        format!("A known event in {year} was {event}."),
    )
}
