//! Per-class base stats read from the attribute table (one CSV row per class).

use crate::asset_store::class_key;
use crate::error::{PokedexError, Result};
use std::collections::HashMap;
use std::io;
use std::path::Path;

pub const STAT_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; STAT_COUNT] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];

    /// Axis label drawn on the radar chart.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpecialAttack => "Sp. Atk",
            Stat::SpecialDefense => "Sp. Def",
            Stat::Speed => "Speed",
        }
    }

    pub fn labels() -> [&'static str; STAT_COUNT] {
        Stat::ALL.map(Stat::label)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Six non-negative stats in `Stat::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeVector {
    values: [f64; STAT_COUNT],
}

impl AttributeVector {
    pub fn new(values: [f64; STAT_COUNT]) -> Option<Self> {
        values
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
            .then_some(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.values[stat.index()]
    }
}

/// Which CSV columns hold the class name and each stat.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSchema {
    pub name_column: String,
    pub stat_columns: [String; STAT_COUNT],
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self {
            name_column: "Name".to_string(),
            stat_columns: Stat::labels().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    rows: HashMap<String, AttributeVector>,
}

impl AttributeTable {
    pub fn load(path: &Path, schema: &AttributeSchema) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| PokedexError::asset_load(path, format!("cannot open table: {}", e)))?;
        Self::from_reader(file, schema, path)
    }

    /// Parses CSV from any reader; `source` only names the origin in errors.
    pub fn from_reader<R: io::Read>(
        reader: R,
        schema: &AttributeSchema,
        source: &Path,
    ) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| PokedexError::asset_load(source, format!("unreadable header: {}", e)))?
            .clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let mut missing = Vec::new();
        let name_index = column(&schema.name_column);
        if name_index.is_none() {
            missing.push(schema.name_column.clone());
        }
        let mut stat_indices = [0usize; STAT_COUNT];
        for (slot, name) in stat_indices.iter_mut().zip(&schema.stat_columns) {
            match column(name) {
                Some(index) => *slot = index,
                None => missing.push(name.clone()),
            }
        }
        let name_index = match name_index {
            Some(index) if missing.is_empty() => index,
            _ => {
                return Err(PokedexError::asset_load(
                    source,
                    format!("missing column(s): {}", missing.join(", ")),
                ))
            }
        };

        let mut rows = HashMap::new();
        for (row, record) in reader.records().enumerate() {
            // header is line 1
            let line = row + 2;
            let record = record
                .map_err(|e| PokedexError::asset_load(source, format!("line {}: {}", line, e)))?;

            let name = record.get(name_index).unwrap_or_default();
            if name.trim().is_empty() {
                return Err(PokedexError::asset_load(
                    source,
                    format!("line {}: empty class name", line),
                ));
            }

            let mut values = [0.0; STAT_COUNT];
            for (value, (&index, column)) in values
                .iter_mut()
                .zip(stat_indices.iter().zip(&schema.stat_columns))
            {
                let field = record.get(index).unwrap_or_default().trim();
                *value = field.parse::<f64>().map_err(|_| {
                    PokedexError::asset_load(
                        source,
                        format!("line {}: {} is not a number: {:?}", line, column, field),
                    )
                })?;
            }
            let vector = AttributeVector::new(values).ok_or_else(|| {
                PokedexError::asset_load(
                    source,
                    format!("line {}: stats must be finite and non-negative", line),
                )
            })?;

            // alternate forms reuse the base name; first row wins
            rows.entry(class_key(name)).or_insert(vector);
        }

        Ok(Self { rows })
    }

    pub fn get(&self, class_name: &str) -> Result<&AttributeVector> {
        self.rows
            .get(&class_key(class_name))
            .ok_or_else(|| PokedexError::UnknownClass(class_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
