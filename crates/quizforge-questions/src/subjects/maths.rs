//! Maths: arithmetic, statistics, geometry, algebra, trigonometry.

use std::f64::consts::PI;

use rand::Rng;

use super::pick;
use crate::catalog::TRIG_TABLE;
use crate::question::Draft;
use crate::{AnswerValue, GradeTier};

/// The maths question families, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Arithmetic,
    Stats,
    Geometry,
    Algebra,
    Trigonometry,
}

impl Kind {
    /// Kinds a player at `level` may be asked.
    fn unlocked(level: u8) -> Vec<Kind> {
        let mut kinds = vec![Kind::Arithmetic];
        if level >= 6 {
            kinds.extend([Kind::Stats, Kind::Geometry]);
        }
        if level >= 7 {
            kinds.push(Kind::Algebra);
        }
        if level >= 9 {
            kinds.push(Kind::Trigonometry);
        }
        kinds
    }
}

pub(crate) fn maths<R: Rng + ?Sized>(tier: GradeTier, rng: &mut R) -> Draft {
    let level = tier.level();
    match *pick(rng, &Kind::unlocked(level)) {
        Kind::Arithmetic => arithmetic(level, rng),
        Kind::Stats => stats(rng),
        Kind::Geometry => geometry(level, rng),
        Kind::Algebra => algebra(rng),
        Kind::Trigonometry => trigonometry(rng),
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Operand limits per level: (max addend, max factor, max divisor).
fn arithmetic_limits(level: u8) -> (i64, i64, i64) {
    match level {
        ..=4 => (50, 12, 12),
        5 => (100, 15, 20),
        6 => (500, 25, 30),
        _ => (5000, 50, 80),
    }
}

fn arithmetic<R: Rng + ?Sized>(level: u8, rng: &mut R) -> Draft {
    let (max_n, mult_max, div_max) = arithmetic_limits(level);

    match *pick(rng, &['+', '-', '*', '/']) {
        '+' => {
            let a = rng.random_range(1..=max_n);
            let b = rng.random_range(1..=max_n);
            let sum = a + b;
            Draft::new(
                format!("{a} + {b}"),
                AnswerValue::Integer(sum),
                format!("Add the numbers: {a} + {b} = {sum}."),
            )
        }
        '-' => {
            let x = rng.random_range(1..=max_n);
            let y = rng.random_range(1..=max_n);
            let (a, b) = if y > x { (y, x) } else { (x, y) };
            let diff = a - b;
            Draft::new(
                format!("{a} - {b}"),
                AnswerValue::Integer(diff),
                format!(
                    "Subtract the smaller number from the larger one: {a} - {b} = {diff}."
                ),
            )
        }
        '*' => {
            let a = rng.random_range(2..=mult_max);
            let b = rng.random_range(2..=mult_max);
            let product = a * b;
            Draft::new(
                format!("{a} * {b}"),
                AnswerValue::Integer(product),
                format!("Multiplication gives {a} * {b} = {product}."),
            )
        }
        _ => {
            // Build the dividend from the answer so the division is exact.
            let divisor = rng.random_range(2..=div_max);
            let quotient = rng.random_range(2..=(max_n / divisor).max(2));
            let dividend = divisor * quotient;
            Draft::new(
                format!("{dividend} / {divisor}"),
                AnswerValue::Integer(quotient),
                format!(
                    "Division is the inverse of multiplication: {divisor} * {quotient} = {dividend}, \
                     so {dividend} / {divisor} = {quotient}."
                ),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

fn stats<R: Rng + ?Sized>(rng: &mut R) -> Draft {
    let len = rng.random_range(4..=6);
    let mut data: Vec<i64> = (0..len).map(|_| rng.random_range(2..=50)).collect();
    data.sort_unstable();

    match *pick(rng, &["mean", "median", "range", "mode"]) {
        "mode" => {
            // Exactly one value must appear most often. Distinct data gets a
            // single forced repeat (index 0 would copy onto itself); a draw
            // with tied repeats is thrown away.
            let mode = loop {
                if has_no_repeats(&data) {
                    let idx = rng.random_range(1..len);
                    data[idx] = data[0];
                    data.sort_unstable();
                }
                if let Some(mode) = unique_mode(&data) {
                    break mode;
                }
                data = (0..len).map(|_| rng.random_range(2..=50)).collect();
                data.sort_unstable();
            };
            let list = join(&data);
            Draft::new(
                format!("What is the mode of: {list}?"),
                AnswerValue::Integer(mode),
                format!(
                    "The mode is the value that appears most often. In {list}, that is {mode}."
                ),
            )
        }
        "mean" => {
            let total: i64 = data.iter().sum();
            let mean = AnswerValue::rounded(total as f64 / len as f64);
            let list = join(&data);
            Draft::new(
                format!("What is the mean of: {list}?"),
                mean.clone(),
                format!("Mean = sum / count = {total} / {len} = {}.", mean.format()),
            )
        }
        "median" => {
            let mid = len / 2;
            let median = if len % 2 == 1 {
                AnswerValue::Integer(data[mid])
            } else {
                AnswerValue::rounded((data[mid - 1] + data[mid]) as f64 / 2.0)
            };
            let list = join(&data);
            Draft::new(
                format!("What is the median of: {list}?"),
                median.clone(),
                format!(
                    "The median is the middle value of the sorted list {list}: {}.",
                    median.format()
                ),
            )
        }
        _ => {
            let (min, max) = (data[0], data[len - 1]);
            let range = max - min;
            Draft::new(
                format!("What is the range of: {}?", join(&data)),
                AnswerValue::Integer(range),
                format!("Range = max - min = {max} - {min} = {range}."),
            )
        }
    }
}

/// `sorted` must be sorted; adjacent equal values mean a repeat.
fn has_no_repeats(sorted: &[i64]) -> bool {
    sorted.windows(2).all(|w| w[0] != w[1])
}

/// Most frequent value of a sorted slice, or `None` when several values
/// share the top count.
fn unique_mode(sorted: &[i64]) -> Option<i64> {
    let mut best: Option<(i64, usize)> = None;
    let mut tied = false;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..].iter().take_while(|&&v| v == value).count();
        match best {
            Some((_, top)) if run == top => tied = true,
            Some((_, top)) if run < top => {}
            _ => {
                best = Some((value, run));
                tied = false;
            }
        }
        i += run;
    }
    best.filter(|_| !tied).map(|(value, _)| value)
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Shape {
    RectangleArea,
    RectanglePerimeter,
    TriangleAngle,
    CircleArea,
    CircleCircumference,
    BoxVolume,
}

fn geometry<R: Rng + ?Sized>(level: u8, rng: &mut R) -> Draft {
    let mut shapes = vec![
        Shape::RectangleArea,
        Shape::RectanglePerimeter,
        Shape::TriangleAngle,
    ];
    if level >= 7 {
        shapes.extend([Shape::CircleArea, Shape::CircleCircumference]);
    }
    if level >= 8 {
        shapes.push(Shape::BoxVolume);
    }

    // A drawn triangle whose two angles reach 180 isn't a triangle: redraw
    // the whole shape until the scenario is valid.
    loop {
        match *pick(rng, &shapes) {
            Shape::RectangleArea => {
                let w = rng.random_range(2..=25);
                let h = rng.random_range(2..=25);
                let area = w * h;
                return Draft::new(
                    format!("What is the area of a rectangle with width {w} and height {h}?"),
                    AnswerValue::Integer(area),
                    format!("Area = width * height = {w} * {h} = {area}."),
                )
                .with_diagram(rectangle_svg(w, h));
            }
            Shape::RectanglePerimeter => {
                let w = rng.random_range(2..=20);
                let h = rng.random_range(2..=20);
                let perimeter = 2 * (w + h);
                return Draft::new(
                    format!(
                        "What is the perimeter of a rectangle with width {w} and height {h}?"
                    ),
                    AnswerValue::Integer(perimeter),
                    format!("Perimeter = 2 * (w + h) = 2 * ({w} + {h}) = {perimeter}."),
                )
                .with_diagram(rectangle_svg(w, h));
            }
            Shape::TriangleAngle => {
                let a: i64 = rng.random_range(30..=100);
                let b: i64 = rng.random_range(30..=100);
                let third = 180 - a - b;
                if third <= 0 {
                    continue;
                }
                return Draft::new(
                    format!("In a triangle, two angles are {a} and {b}. What is the third angle?"),
                    AnswerValue::Integer(third),
                    format!("Angles in a triangle sum to 180. So 180 - ({a} + {b}) = {third}."),
                )
                .with_diagram(triangle_svg(a, b));
            }
            Shape::CircleArea => {
                let r = rng.random_range(2..=12);
                let area = AnswerValue::rounded(PI * (r * r) as f64);
                return Draft::new(
                    format!(
                        "What is the area of a circle with radius {r}? (Use pi, round to 2 decimals.)"
                    ),
                    area.clone(),
                    format!("Area = pi * r^2 = pi * {r}^2 = {}.", area.format()),
                );
            }
            Shape::CircleCircumference => {
                let r = rng.random_range(2..=12);
                let circumference = AnswerValue::rounded(2.0 * PI * r as f64);
                return Draft::new(
                    format!(
                        "What is the circumference of a circle with radius {r}? (Use pi, round to 2 decimals.)"
                    ),
                    circumference.clone(),
                    format!(
                        "Circumference = 2 * pi * r = 2 * pi * {r} = {}.",
                        circumference.format()
                    ),
                );
            }
            Shape::BoxVolume => {
                let l = rng.random_range(2..=12);
                let w = rng.random_range(2..=12);
                let h = rng.random_range(2..=12);
                let volume = l * w * h;
                return Draft::new(
                    format!(
                        "What is the volume of a box with length {l}, width {w}, and height {h}?"
                    ),
                    AnswerValue::Integer(volume),
                    format!("Volume = l * w * h = {l} * {w} * {h} = {volume}."),
                );
            }
        }
    }
}

/// Labelled rectangle, scaled so the longer side spans 160 units.
fn rectangle_svg(w: i64, h: i64) -> String {
    let scale = 160.0 / w.max(h) as f64;
    let (pw, ph) = (w as f64 * scale, h as f64 * scale);
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 220 220\" width=\"220\" height=\"220\">\
         <rect x=\"30\" y=\"20\" width=\"{pw:.0}\" height=\"{ph:.0}\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"/>\
         <text x=\"{tx:.0}\" y=\"14\" text-anchor=\"middle\">{w}</text>\
         <text x=\"22\" y=\"{ty:.0}\" text-anchor=\"end\">{h}</text>\
         </svg>",
        tx = 30.0 + pw / 2.0,
        ty = 20.0 + ph / 2.0,
    )
}

/// Fixed-shape triangle with the two known angles and a `?` marked.
fn triangle_svg(a: i64, b: i64) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 220 160\" width=\"220\" height=\"160\">\
         <polygon points=\"20,140 200,140 90,20\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"/>\
         <text x=\"34\" y=\"132\">{a}&#176;</text>\
         <text x=\"168\" y=\"132\">{b}&#176;</text>\
         <text x=\"86\" y=\"44\">?</text>\
         </svg>"
    )
}

// ---------------------------------------------------------------------------
// Algebra and trigonometry
// ---------------------------------------------------------------------------

fn algebra<R: Rng + ?Sized>(rng: &mut R) -> Draft {
    let x: i64 = rng.random_range(1..=20);
    let a: i64 = rng.random_range(2..=12);
    let b: i64 = rng.random_range(-30..=30);
    let c = a * x + b;
    let sign = if b >= 0 { '+' } else { '-' };
    Draft::new(
        format!("Solve for x: {a}x {sign} {} = {c}", b.abs()),
        AnswerValue::Integer(x),
        format!("Move constants and divide: x = ({c} - ({b})) / {a} = {x}."),
    )
}

fn trigonometry<R: Rng + ?Sized>(rng: &mut R) -> Draft {
    let &(func, degrees, value) = pick(rng, TRIG_TABLE);
    let answer = AnswerValue::Decimal(value);
    Draft::new(
        format!("What is {func}({degrees} degrees)?"),
        answer.clone(),
        format!("{func}({degrees} deg) = {}.", answer.format()),
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_unlocked_kinds_by_level() {
        assert_eq!(Kind::unlocked(4), vec![Kind::Arithmetic]);
        assert_eq!(Kind::unlocked(6).len(), 3);
        assert!(Kind::unlocked(7).contains(&Kind::Algebra));
        assert!(!Kind::unlocked(8).contains(&Kind::Trigonometry));
        assert!(Kind::unlocked(13).contains(&Kind::Trigonometry));
    }

    #[test]
    fn test_young_players_only_get_arithmetic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let draft = maths(GradeTier::Grade(4), &mut rng);
            assert!(!draft.prompt.starts_with("Solve for x"));
            assert!(!draft.prompt.starts_with("What is"));
            assert!(!draft.prompt.starts_with("In a triangle"));
        }
    }

    #[test]
    fn test_arithmetic_answers_are_correct() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..300 {
            let draft = arithmetic(5, &mut rng);
            let parts: Vec<&str> = draft.prompt.split(' ').collect();
            let (a, op, b): (i64, &str, i64) =
                (parts[0].parse().unwrap(), parts[1], parts[2].parse().unwrap());
            let expected = match op {
                "+" => a + b,
                "-" => a - b,
                "*" => a * b,
                "/" => {
                    assert_eq!(a % b, 0, "division must be exact: {}", draft.prompt);
                    a / b
                }
                other => panic!("unexpected operator {other}"),
            };
            assert_eq!(draft.answer, AnswerValue::Integer(expected));
            assert!(expected >= 0, "subtraction never goes negative");
        }
    }

    #[test]
    fn test_geometry_triangle_third_angle_always_positive() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen_triangle = false;
        for _ in 0..500 {
            let draft = geometry(6, &mut rng);
            if draft.prompt.starts_with("In a triangle") {
                seen_triangle = true;
                match draft.answer {
                    AnswerValue::Integer(angle) => assert!(angle > 0),
                    other => panic!("unexpected answer {other:?}"),
                }
                assert!(draft.diagram.is_some());
            }
        }
        assert!(seen_triangle);
    }

    #[test]
    fn test_geometry_circles_locked_below_level_seven() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..300 {
            let draft = geometry(6, &mut rng);
            assert!(!draft.prompt.contains("circle"));
            assert!(!draft.prompt.contains("box"));
        }
    }

    #[test]
    fn test_algebra_solution_satisfies_equation() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let draft = algebra(&mut rng);
            // "Solve for x: {a}x {sign} {|b|} = {c}"
            let eq = draft.prompt.trim_start_matches("Solve for x: ");
            let parts: Vec<&str> = eq.split(' ').collect();
            let a: i64 = parts[0].trim_end_matches('x').parse().unwrap();
            let b: i64 = parts[2].parse().unwrap();
            let b = if parts[1] == "-" { -b } else { b };
            let c: i64 = parts[4].parse().unwrap();
            let AnswerValue::Integer(x) = draft.answer else {
                panic!("algebra answers are integers");
            };
            assert_eq!(a * x + b, c);
        }
    }

    #[test]
    fn test_unique_mode_rejects_ties() {
        assert_eq!(unique_mode(&[2, 2, 5, 5, 9]), None);
        assert_eq!(unique_mode(&[8, 22, 26, 40, 50]), None);
        assert_eq!(unique_mode(&[1, 3, 3, 3, 4, 4]), Some(3));
        assert_eq!(unique_mode(&[4, 4, 7]), Some(4));
    }

    #[test]
    fn test_stats_mode_is_unique_across_seeds() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..20 {
                let draft = stats(&mut rng);
                let Some(list) = draft.prompt.strip_prefix("What is the mode of: ") else {
                    continue;
                };
                let values: Vec<i64> = list
                    .trim_end_matches('?')
                    .split(", ")
                    .map(|v| v.parse().unwrap())
                    .collect();
                assert!(!has_no_repeats(&values), "seed {seed}: {}", draft.prompt);
                let mode = unique_mode(&values);
                assert!(mode.is_some(), "seed {seed}: tied mode in {}", draft.prompt);
                assert_eq!(Some(draft.answer), mode.map(AnswerValue::Integer));
            }
        }
    }

    #[test]
    fn test_stats_mode_always_has_repeat() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..300 {
            let draft = stats(&mut rng);
            if draft.prompt.starts_with("What is the mode") {
                let list = draft
                    .prompt
                    .trim_start_matches("What is the mode of: ")
                    .trim_end_matches('?');
                let values: Vec<i64> =
                    list.split(", ").map(|v| v.parse().unwrap()).collect();
                assert!(!has_no_repeats(&values), "{}", draft.prompt);
            }
        }
    }

    #[test]
    fn test_rectangle_svg_labels_sides() {
        let svg = rectangle_svg(4, 9);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">4</text>"));
        assert!(svg.contains(">9</text>"));
    }
}
