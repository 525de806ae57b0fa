//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in order
    pub lines: Vec<CartLineFixture>,
}

/// One cart line in YAML, referencing a product by its fixture key.
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product fixture key
    pub product: String,

    /// Number of units
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cart_fixture_deserializes_lines_in_order() -> TestResult {
        let yaml = "\
lines:
  - product: season_box
    quantity: 1
  - product: citrus_box
    quantity: 2
";

        let fixture: CartFixture = serde_norway::from_str(yaml)?;

        assert_eq!(fixture.lines.len(), 2);

        let products: Vec<&str> = fixture
            .lines
            .iter()
            .map(|line| line.product.as_str())
            .collect();

        assert_eq!(products, vec!["season_box", "citrus_box"]);

        Ok(())
    }
}
