use crate::domain::model::{ProductId, ProductSelection};
use std::collections::BTreeMap;

/// Area for products that have no production area assigned.
pub const UNASSIGNED_AREA: &str = "SIN CUARTO PRODUCTIVO";

/// Groups selections by production area and expands each product by its quantity.
///
/// Areas come out in ordinal name order. Inside an area products keep the
/// order they were received in, each repeated `quantity` times contiguously.
pub fn group(selections: &[ProductSelection]) -> BTreeMap<String, Vec<ProductId>> {
    group_with_fallback(selections, UNASSIGNED_AREA)
}

pub fn group_with_fallback(
    selections: &[ProductSelection],
    unassigned_area: &str,
) -> BTreeMap<String, Vec<ProductId>> {
    let mut areas: BTreeMap<String, Vec<ProductId>> = BTreeMap::new();

    for selection in selections {
        let area_name = selection
            .production_area_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(unassigned_area);

        let expanded = areas.entry(area_name.to_string()).or_default();
        expanded.extend(std::iter::repeat(selection.product_id).take(selection.quantity as usize));
    }

    for (area_name, expanded) in &areas {
        tracing::debug!("Area '{}': {} label(s)", area_name, expanded.len());
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_sorted_ordinally() {
        let selections = vec![
            ProductSelection::new(1, Some("PASTELERIA"), 1),
            ProductSelection::new(2, Some("COCINA FRIA"), 1),
            ProductSelection::new(3, Some("cocina caliente"), 1),
        ];

        let areas = group(&selections);
        let names: Vec<&str> = areas.keys().map(String::as_str).collect();

        // uppercase sorts before lowercase in an ordinal compare
        assert_eq!(names, vec!["COCINA FRIA", "PASTELERIA", "cocina caliente"]);
    }

    #[test]
    fn test_missing_area_uses_sentinel() {
        let selections = vec![
            ProductSelection::new(7, None, 2),
            ProductSelection::new(8, Some("  "), 1),
        ];

        let areas = group(&selections);

        assert_eq!(areas.len(), 1);
        assert_eq!(areas[UNASSIGNED_AREA], vec![7, 7, 8]);
    }

    #[test]
    fn test_expansion_keeps_input_order_within_area() {
        let selections = vec![
            ProductSelection::new(30, Some("COCINA"), 2),
            ProductSelection::new(10, Some("COCINA"), 3),
            ProductSelection::new(20, Some("PANADERIA"), 1),
        ];

        let areas = group(&selections);

        assert_eq!(areas["COCINA"], vec![30, 30, 10, 10, 10]);
        assert_eq!(areas["PANADERIA"], vec![20]);
    }

    #[test]
    fn test_custom_fallback_area() {
        let selections = vec![ProductSelection::new(1, None, 1)];
        let areas = group_with_fallback(&selections, "GENERAL");
        assert_eq!(areas["GENERAL"], vec![1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group(&[]).is_empty());
    }
}
