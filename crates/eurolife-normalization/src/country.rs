use eurolife_common::any_to_string_non_empty;
use eurolife_model::CountryAliases;
use polars::prelude::AnyValue;

/// Maps heterogeneous country identifiers to one canonical code per country.
///
/// Total over any input: unmapped codes pass through trimmed but otherwise
/// unchanged. Aliases are resolved to a fixed point so that chained entries
/// (`A -> B`, `B -> C`) still normalize in one call.
#[derive(Debug, Clone, Copy)]
pub struct CountryCodeNormalizer<'a> {
    aliases: &'a CountryAliases,
}

impl<'a> CountryCodeNormalizer<'a> {
    pub fn new(aliases: &'a CountryAliases) -> Self {
        Self { aliases }
    }

    pub fn normalize(&self, raw: &str) -> String {
        let mut code = raw.trim();
        for _ in 0..=self.aliases.len() {
            let next = self.aliases.resolve(code).trim();
            if next == code {
                break;
            }
            code = next;
        }
        code.to_string()
    }

    /// Normalizes a cell, returning `None` when it is empty.
    pub fn normalize_cell(&self, cell: AnyValue<'_>) -> Option<String> {
        any_to_string_non_empty(cell).map(|raw| self.normalize(&raw))
    }
}
