use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit an ingredient quantity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MeasureUnit {
    Grams,
    Kilograms,
    Milliliters,
    Liters,
    Unit,
    Ounces,
    Pounds,
}

impl MeasureUnit {
    pub fn code(&self) -> &'static str {
        match self {
            MeasureUnit::Grams => "GR",
            MeasureUnit::Kilograms => "KG",
            MeasureUnit::Milliliters => "ML",
            MeasureUnit::Liters => "L",
            MeasureUnit::Unit => "UND",
            MeasureUnit::Ounces => "OZ",
            MeasureUnit::Pounds => "LB",
        }
    }

    pub fn spanish_name(&self, singular: bool) -> &'static str {
        match (self, singular) {
            (MeasureUnit::Grams, true) => "GRAMO",
            (MeasureUnit::Grams, false) => "GRAMOS",
            (MeasureUnit::Kilograms, true) => "KILOGRAMO",
            (MeasureUnit::Kilograms, false) => "KILOGRAMOS",
            (MeasureUnit::Milliliters, true) => "MILILITRO",
            (MeasureUnit::Milliliters, false) => "MILILITROS",
            (MeasureUnit::Liters, true) => "LITRO",
            (MeasureUnit::Liters, false) => "LITROS",
            (MeasureUnit::Unit, true) => "UNIDAD",
            (MeasureUnit::Unit, false) => "UNIDADES",
            (MeasureUnit::Ounces, true) => "ONZA",
            (MeasureUnit::Ounces, false) => "ONZAS",
            (MeasureUnit::Pounds, true) => "LIBRA",
            (MeasureUnit::Pounds, false) => "LIBRAS",
        }
    }

    /// Printed net content: `"1000 GRAMOS"`, `"1 LITRO"`.
    pub fn net_content(&self, quantity: Decimal) -> String {
        let quantity = quantity.normalize();
        format!("{} {}", quantity, self.spanish_name(quantity == Decimal::ONE))
    }
}

impl FromStr for MeasureUnit {
    type Err = String;

    /// Accepts the canonical codes plus the spellings found in kitchen spreadsheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GR" | "GRAMOS" | "GRAMO" | "G" => Ok(MeasureUnit::Grams),
            "KG" | "KILOGRAMOS" | "KILOGRAMO" | "KILO" | "KILOS" => Ok(MeasureUnit::Kilograms),
            "ML" | "MILILITROS" | "MILILITRO" => Ok(MeasureUnit::Milliliters),
            "L" | "LITROS" | "LITRO" | "LT" => Ok(MeasureUnit::Liters),
            "UND" | "UNIDAD" | "UNIDADES" | "U" => Ok(MeasureUnit::Unit),
            "OZ" | "ONZA" | "ONZAS" => Ok(MeasureUnit::Ounces),
            "LB" | "LIBRA" | "LIBRAS" => Ok(MeasureUnit::Pounds),
            other => Err(format!("unknown measure unit '{}'", other)),
        }
    }
}

impl TryFrom<String> for MeasureUnit {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MeasureUnit> for String {
    fn from(unit: MeasureUnit) -> Self {
        unit.code().to_string()
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
