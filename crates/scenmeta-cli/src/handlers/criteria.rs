//! Criteria command handler: list the registry.

use scenmeta_core::{CriteriaSet, default_criteria};

use crate::presentation::{pad_right, print_separator};

const KEY_WIDTH: usize = 28;
const KIND_WIDTH: usize = 11;
const NAME_WIDTH: usize = 72;

/// Execute the criteria command.
pub fn execute() {
    print_table(&default_criteria());
}

fn print_table(criteria: &CriteriaSet) {
    println!(
        "{} {} {}",
        pad_right("KEY", KEY_WIDTH),
        pad_right("KIND", KIND_WIDTH),
        "NAME"
    );
    print_separator(KEY_WIDTH + KIND_WIDTH + NAME_WIDTH + 2);
    for (key, criterion) in criteria.iter() {
        println!(
            "{} {} {}",
            pad_right(key, KEY_WIDTH),
            pad_right(&criterion.kind().to_string(), KIND_WIDTH),
            criterion.name()
        );
    }
    println!();
    println!("{} criteria", criteria.len());
}
