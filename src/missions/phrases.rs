//! Customer order phrasing. Every mission type has a small pool of templates;
//! the generator picks one at random so repeated orders read differently.

use rand::Rng;

use crate::shared::*;

fn lower(flavor: FlavorType) -> String {
    flavor.name().to_lowercase()
}

fn join_flavors(flavors: &[FlavorType], sep: &str) -> String {
    flavors.iter().map(|f| lower(*f)).collect::<Vec<_>>().join(sep)
}

fn plural(count: u8, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub fn cocktail_text(rng: &mut impl Rng, name: &str) -> String {
    match rng.gen_range(0..3) {
        0 => format!("Serve me the legendary \"{}\".", name),
        1 => format!("I've heard tales of the \"{}\". Pour me one!", name),
        _ => format!("One \"{}\", exactly as the book says.", name),
    }
}

pub fn similar_text(rng: &mut impl Rng, first: &str, second: &str) -> String {
    match rng.gen_range(0..3) {
        0 => format!("A \"{}\" or a \"{}\", I'm not fussy.", first, second),
        1 => format!("Either \"{}\" or \"{}\" will do.", first, second),
        _ => format!("Surprise me: \"{}\" or \"{}\".", first, second),
    }
}

pub fn variation_text(rng: &mut impl Rng, name: &str, original: &str, substitution: &str) -> String {
    match rng.gen_range(0..3) {
        0 => format!(
            "A \"{}\", but swap the {} for {}.",
            name, original, substitution
        ),
        1 => format!(
            "Make me a \"{}\" with {} instead of {}.",
            name, substitution, original
        ),
        _ => format!(
            "I'm off {} tonight. \"{}\" with {} in its place?",
            original, name, substitution
        ),
    }
}

pub fn flavor_text(rng: &mut impl Rng, flavor: FlavorType, required: u8) -> String {
    let f = lower(flavor);
    match rng.gen_range(0..3) {
        0 => format!(
            "Give me a {} drink with at least {} {} component{}.",
            f,
            required,
            f,
            if required == 1 { "" } else { "s" }
        ),
        1 => format!("I need something really {}. {} or more {} parts.", f, required, f),
        _ => format!("Make it {}, very {}! ({}+)", f, f, required),
    }
}

pub fn ingredient_text(rng: &mut impl Rng, ingredient: &str) -> String {
    match rng.gen_range(0..3) {
        0 => format!("Anything, as long as there's {} in it.", ingredient),
        1 => format!("I've a thirst for {}. Put some in.", ingredient),
        _ => format!("Don't leave out the {}.", ingredient),
    }
}

pub fn preparation_text(rng: &mut impl Rng, method: PrepMethod) -> String {
    let m = method.name().to_lowercase();
    match rng.gen_range(0..3) {
        0 => format!("I want my drink {}, nothing else.", m),
        1 => format!("Make sure this one is {}.", m),
        _ => format!("{} is the only way I'll take it.", method.name()),
    }
}

pub fn garnish_text(rng: &mut impl Rng, garnish: &str) -> String {
    match rng.gen_range(0..3) {
        0 => format!("Don't forget the {} on top!", garnish),
        1 => format!("I specifically want a {} garnish.", garnish),
        _ => format!("Make it pretty with a {}.", garnish),
    }
}

pub fn no_type_text(rng: &mut impl Rng, forbidden: &[FlavorType]) -> String {
    let list = join_flavors(forbidden, " or ");
    match rng.gen_range(0..3) {
        0 => format!("I can't handle {} drinks today.", list),
        1 => format!("Please avoid anything {}.", list),
        _ => format!("Make me something without {}.", list),
    }
}

pub fn exact_count_text(rng: &mut impl Rng, count: u8) -> String {
    let parts = plural(count, "component");
    match rng.gen_range(0..3) {
        0 => format!("Make me something with exactly {}.", parts),
        1 => format!("I want precisely {} in my glass, garnish included.", parts),
        _ => format!("Exactly {}, no more, no less.", parts),
    }
}

pub fn mixed_types_text(rng: &mut impl Rng, flavors: &[FlavorType]) -> String {
    let list = join_flavors(flavors, " and ");
    let primary = flavors.first().map(|f| lower(*f)).unwrap_or_default();
    match rng.gen_range(0..2) {
        0 => format!("Create a mostly {} blend.", list),
        _ => format!("A {} blend, heavy on the {}.", list, primary),
    }
}
