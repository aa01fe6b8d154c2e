//! Names for mass ranges, sweep entries and beam energies.
use rust_decimal::Decimal;

/// Titles of the default mass ranges, in ascending mass order
pub const MASS_TITLES: [&str; 4] = ["pi0", "LMR", "omphi", "IMR"];

/// Position of the low mass range in [`MASS_TITLES`]
pub const LMR_INDEX: usize = 1;

/// The label for the `index`-th mass range, or `None` if there is no title for it
pub fn range_label(index: usize, suffix: &str) -> Option<String> {
    MASS_TITLES
        .get(index)
        .map(|title| format!("{title}{suffix}"))
}

/// The label of one entry of a low mass range boundary sweep, carrying the
/// literal boundary values, e.g. `LMR_0.15-0.6`
pub fn sweep_label(e0: Decimal, e1: Decimal, suffix: &str) -> String {
    format!(
        "{}{suffix}_{}-{}",
        MASS_TITLES[LMR_INDEX],
        e0.normalize(),
        e1.normalize()
    )
}

/// Expand the abbreviated beam energies used in file names to their full values
pub fn energy_key(energy: &str) -> &str {
    match energy {
        "19" => "19.6",
        "62" => "62.4",
        _ => energy,
    }
}
