//! Chemistry, biology, physics, and astronomy.

use rand::Rng;

use super::pick;
use crate::catalog::{ASTRONOMY_FACTS, BIOLOGY_FACTS, ELEMENTS, Fact, PLANETS_FROM_SUN};
use crate::question::Draft;
use crate::{AnswerValue, GradeTier};

impl From<&Fact> for Draft {
    fn from(fact: &Fact) -> Self {
        Draft::new(fact.prompt, fact.answer.into(), fact.explanation)
    }
}

pub(crate) fn chemistry<R: Rng + ?Sized>(_tier: GradeTier, rng: &mut R) -> Draft {
    let &(element, atomic_number) = pick(rng, ELEMENTS);
    let number = AnswerValue::Integer(atomic_number);

    match *pick(rng, &["atomic", "protons", "electrons", "element"]) {
        "atomic" => Draft::new(
            format!("What is the atomic number of {element}?"),
            number,
            format!("The atomic number of {element} is {atomic_number}."),
        ),
        "protons" => Draft::new(
            format!("How many protons does a neutral {element} atom have?"),
            number,
            format!("A neutral {element} atom has {atomic_number} protons."),
        ),
        "electrons" => Draft::new(
            format!("How many electrons does a neutral {element} atom have?"),
            number,
            format!("In a neutral atom, electrons equal protons: {atomic_number}."),
        ),
        _ => Draft::new(
            format!("Which element has atomic number {atomic_number}?"),
            AnswerValue::text(element),
            format!("Atomic number {atomic_number} belongs to {element}."),
        ),
    }
}

pub(crate) fn biology<R: Rng + ?Sized>(_tier: GradeTier, rng: &mut R) -> Draft {
    pick(rng, BIOLOGY_FACTS).into()
}

pub(crate) fn physics<R: Rng + ?Sized>(_tier: GradeTier, rng: &mut R) -> Draft {
    match *pick(rng, &["speed", "force", "potential_energy", "density", "kinetic_energy"]) {
        "speed" => {
            let distance: i64 = rng.random_range(20..=240);
            let time: i64 = rng.random_range(2..=12);
            let speed = AnswerValue::rounded(distance as f64 / time as f64);
            Draft::new(
                format!(
                    "Speed = distance / time. If distance is {distance} m and time is {time} s, what is speed (m/s)?"
                ),
                speed.clone(),
                format!("Speed = {distance} / {time} = {} m/s.", speed.format()),
            )
        }
        "force" => {
            let mass: i64 = rng.random_range(2..=25);
            let acceleration: i64 = rng.random_range(2..=12);
            let force = mass * acceleration;
            Draft::new(
                format!(
                    "Force = mass * acceleration. If mass is {mass} kg and acceleration is {acceleration} m/s^2, what is force (N)?"
                ),
                AnswerValue::Integer(force),
                format!("Force = {mass} * {acceleration} = {force} N."),
            )
        }
        "potential_energy" => {
            const G: i64 = 10;
            let mass: i64 = rng.random_range(1..=20);
            let height: i64 = rng.random_range(2..=30);
            let energy = mass * G * height;
            Draft::new(
                format!(
                    "Potential energy = m * g * h. For m={mass} kg, g={G} m/s^2, h={height} m, what is PE (J)?"
                ),
                AnswerValue::Integer(energy),
                format!("PE = {mass} * {G} * {height} = {energy} J."),
            )
        }
        "kinetic_energy" => {
            // Even masses keep 0.5 * m * v^2 a whole number.
            let mass: i64 = *pick(rng, &[2, 4, 6, 8, 10, 12, 14, 16]);
            let velocity: i64 = rng.random_range(2..=20);
            let energy = mass / 2 * velocity * velocity;
            Draft::new(
                format!(
                    "Kinetic energy = 0.5 * m * v^2. For m={mass} kg and v={velocity} m/s, what is KE (J)?"
                ),
                AnswerValue::Integer(energy),
                format!("KE = 0.5 * {mass} * {velocity}^2 = {energy} J."),
            )
        }
        _ => {
            let mass: i64 = rng.random_range(20..=200);
            let volume: i64 = rng.random_range(2..=25);
            let density = AnswerValue::rounded(mass as f64 / volume as f64);
            Draft::new(
                format!(
                    "Density = mass / volume. If mass is {mass} kg and volume is {volume} m^3, what is density (kg/m^3)?"
                ),
                density.clone(),
                format!("Density = {mass} / {volume} = {} kg/m^3.", density.format()),
            )
        }
    }
}

pub(crate) fn astronomy<R: Rng + ?Sized>(_tier: GradeTier, rng: &mut R) -> Draft {
    match *pick(rng, &["fact", "planet_position", "position_planet"]) {
        "fact" => pick(rng, ASTRONOMY_FACTS).into(),
        "planet_position" => {
            let idx = rng.random_range(0..PLANETS_FROM_SUN.len());
            let planet = PLANETS_FROM_SUN[idx];
            let position = idx + 1;
            Draft::new(
                format!("What number planet from the Sun is {planet}?"),
                AnswerValue::Integer(position as i64),
                format!("{planet} is planet number {position} from the Sun."),
            )
        }
        _ => {
            let idx = rng.random_range(0..PLANETS_FROM_SUN.len());
            let planet = PLANETS_FROM_SUN[idx];
            let position = idx + 1;
            Draft::new(
                format!("Which planet is number {position} from the Sun?"),
                AnswerValue::text(planet),
                format!("Planet number {position} from the Sun is {planet}."),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const TIER: GradeTier = GradeTier::Grade(8);

    #[test]
    fn test_chemistry_element_question_answers_with_name() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let draft = chemistry(TIER, &mut rng);
            if draft.prompt.starts_with("Which element") {
                let AnswerValue::Text(name) = &draft.answer else {
                    panic!("element question must have a text answer");
                };
                assert!(ELEMENTS.iter().any(|(e, _)| e == name));
            } else {
                assert!(matches!(draft.answer, AnswerValue::Integer(1..=30)));
            }
        }
    }

    #[test]
    fn test_biology_draws_from_fact_table() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let draft = biology(TIER, &mut rng);
            assert!(BIOLOGY_FACTS.iter().any(|f| f.prompt == draft.prompt));
        }
    }

    #[test]
    fn test_physics_kinetic_energy_is_whole() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..300 {
            let draft = physics(TIER, &mut rng);
            if draft.prompt.starts_with("Kinetic energy") {
                assert!(matches!(draft.answer, AnswerValue::Integer(_)));
            }
        }
    }

    #[test]
    fn test_physics_speed_rounds_to_two_decimals() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..300 {
            let draft = physics(TIER, &mut rng);
            if let AnswerValue::Decimal(v) = draft.answer {
                assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_astronomy_planet_position_is_one_based() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            let draft = astronomy(TIER, &mut rng);
            if draft.prompt.contains("Mercury") && draft.prompt.starts_with("What number") {
                assert_eq!(draft.answer, AnswerValue::Integer(1));
            }
            if draft.prompt == "Which planet is number 8 from the Sun?" {
                assert!(draft.answer.matches("neptune"));
            }
        }
    }
}
